pub mod daily_record;
pub mod gift_item;
pub mod prompt;
pub mod staff_leave;
pub mod summary;
pub mod user;
