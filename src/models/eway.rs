use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::InvoiceRequest;
use crate::billing::numeric::lenient_f64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportDetail {
    #[serde(default)]
    pub transporter_name: Option<String>,
    #[serde(default)]
    pub transporter_id: Option<String>,
    pub vehicle_number: String,
    /// Approximate distance in km, used for e-way bill validity.
    #[serde(deserialize_with = "lenient_f64", default)]
    pub distance_km: f64,
    #[serde(default)]
    pub mode: Option<String>,
}

/// An e-way bill wraps the invoice payload with movement-of-goods detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwayBillRequest {
    #[serde(flatten)]
    pub invoice: InvoiceRequest,
    pub eway_bill_number: String,
    pub eway_bill_date: NaiveDate,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    pub transport: TransportDetail,
}
