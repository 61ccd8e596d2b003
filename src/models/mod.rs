pub mod daily_record;
pub mod gift_item;
pub mod staff_leave;
pub mod user;
