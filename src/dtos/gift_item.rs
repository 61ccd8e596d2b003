use serde::Deserialize;

/// One row of the gift control grid as submitted. `sell_through_rate` is
/// derived server-side and never accepted from the client.
#[derive(Debug, Deserialize)]
pub struct GiftItemRow {
    pub campaign: String,
    pub item_name: String,
    pub allocated: f64,
    pub remaining: f64,
}

#[derive(Debug, Deserialize)]
pub struct SaveGiftItemsRequest {
    pub items: Vec<GiftItemRow>,
}
