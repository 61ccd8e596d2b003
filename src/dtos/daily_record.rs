use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::daily_record::DailyRecord;

/// Calendar slice selector: either a month of the managed year or an
/// explicit from/to range. Defaults to the current month (UTC+8).
#[derive(Debug, Deserialize)]
pub struct SliceParams {
    pub month: Option<u32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// One edited grid row. Only fields present in the payload are written to
/// the backing row; everything absent keeps its stored value. Derived fields
/// are never accepted from the client.
#[derive(Debug, Deserialize)]
pub struct RecordEdit {
    pub record_date: NaiveDate,
    pub target_revenue: Option<f64>,
    pub actual_revenue: Option<f64>,
    pub customer_count: Option<i64>,
    pub pastry_revenue: Option<f64>,
    pub pastry_units: Option<i64>,
    pub pastry_waste_units: Option<i64>,
    pub retail_revenue: Option<f64>,
    pub ncb_count: Option<i64>,
    pub baf_count: Option<i64>,
    pub festival_units: Option<i64>,
    pub delivery_ubereats: Option<f64>,
    pub delivery_foodpanda: Option<f64>,
    pub labor_hours: Option<f64>,
    pub note: Option<String>,
}

impl RecordEdit {
    /// Masked overwrite: copy only the fields present in the edit onto the
    /// backing row. Derived fields are recomputed by the caller afterwards.
    pub fn apply_to(&self, record: &mut DailyRecord) {
        if let Some(v) = self.target_revenue {
            record.target_revenue = v;
        }
        if let Some(v) = self.actual_revenue {
            record.actual_revenue = v;
        }
        if let Some(v) = self.customer_count {
            record.customer_count = v;
        }
        if let Some(v) = self.pastry_revenue {
            record.pastry_revenue = v;
        }
        if let Some(v) = self.pastry_units {
            record.pastry_units = v;
        }
        if let Some(v) = self.pastry_waste_units {
            record.pastry_waste_units = v;
        }
        if let Some(v) = self.retail_revenue {
            record.retail_revenue = v;
        }
        if let Some(v) = self.ncb_count {
            record.ncb_count = v;
        }
        if let Some(v) = self.baf_count {
            record.baf_count = v;
        }
        if let Some(v) = self.festival_units {
            record.festival_units = v;
        }
        if let Some(v) = self.delivery_ubereats {
            record.delivery_ubereats = v;
        }
        if let Some(v) = self.delivery_foodpanda {
            record.delivery_foodpanda = v;
        }
        if let Some(v) = self.labor_hours {
            record.labor_hours = v;
        }
        if let Some(note) = &self.note {
            record.note = note.clone();
        }
    }

    /// True when any numeric field carries a negative value.
    pub fn has_negative_value(&self) -> bool {
        let floats = [
            self.target_revenue,
            self.actual_revenue,
            self.pastry_revenue,
            self.retail_revenue,
            self.delivery_ubereats,
            self.delivery_foodpanda,
            self.labor_hours,
        ];
        let ints = [
            self.customer_count,
            self.pastry_units,
            self.pastry_waste_units,
            self.ncb_count,
            self.baf_count,
            self.festival_units,
        ];
        floats.iter().any(|v| v.is_some_and(|v| v < 0.0))
            || ints.iter().any(|v| v.is_some_and(|v| v < 0))
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveRecordsRequest {
    pub rows: Vec<RecordEdit>,
}

#[derive(Debug, Serialize)]
pub struct SaveRecordsResponse {
    pub updated: usize,
    /// Edited dates with no backing row; reported rather than silently dropped.
    pub skipped_dates: Vec<NaiveDate>,
}

/// Grid row decorated with the display-only calendar annotations.
#[derive(Debug, Serialize)]
pub struct DailyRecordResponse {
    #[serde(flatten)]
    pub record: DailyRecord,
    pub day_label: String,
    pub marketing_event: String,
}

impl From<DailyRecord> for DailyRecordResponse {
    fn from(record: DailyRecord) -> Self {
        let day_label = crate::calendar::day_label(record.record_date);
        let marketing_event = crate::calendar::marketing_event(record.record_date);
        Self { record, day_label, marketing_event }
    }
}
