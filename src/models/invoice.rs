use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CompanyProfile, CustomerInfo, RenderOptions};
use crate::billing::{numeric::lenient_f64, InvoiceDiscount, LineItem, PaymentState};

/// Whether the document renders as a GST tax invoice or a plain bill.
/// Resolved once per request; layout code branches on this value and never
/// re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    TaxInvoice,
    Bill,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::TaxInvoice => "Tax Invoice",
            DocumentKind::Bill => "Bill",
        }
    }
}

impl Default for DocumentKind {
    fn default() -> Self {
        DocumentKind::TaxInvoice
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceInfo {
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Invoice Reference Number issued by the e-invoicing system; opaque
    /// passthrough.
    #[serde(default)]
    pub irn: Option<String>,
    #[serde(default)]
    pub ack_number: Option<String>,
    #[serde(default)]
    pub ack_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    #[serde(default)]
    pub kind: DocumentKind,
    pub invoice: InvoiceInfo,
    pub customer: CustomerInfo,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Option<InvoiceDiscount>,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub transport_amount: f64,
    #[serde(default)]
    pub payment: Option<PaymentState>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Overrides the tenant profile fetched from the backend; used by
    /// previews drafted before the profile exists.
    #[serde(default)]
    pub company: Option<CompanyProfile>,
    #[serde(default)]
    pub options: Option<RenderOptions>,
}

impl InvoiceRequest {
    pub fn advance_amount(&self) -> f64 {
        self.payment.as_ref().map(|p| p.advance_amount).unwrap_or(0.0)
    }
}
