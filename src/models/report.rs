use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::numeric::lenient_f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Pdf,
    Excel,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Pdf
    }
}

/// One aggregated row of the sales report (per product or per invoice,
/// depending on how the caller grouped the data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRow {
    pub label: String,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub taxable_amount: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub gst_amount: f64,
}

impl SalesRow {
    pub fn total(&self) -> f64 {
        self.taxable_amount + self.gst_amount
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReportRequest {
    pub title: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub rows: Vec<SalesRow>,
    #[serde(default)]
    pub format: OutputFormat,
}
