pub mod api;
pub mod billing;
pub mod clients;
pub mod core;
pub mod excel;
pub mod models;
pub mod pdf;
pub mod templates;

// Re-export commonly used types
pub use billing::{amount_in_words, calculate, InvoiceDiscount, InvoiceSummary, LineItem};
pub use excel::ExcelGenerator;
pub use models::{DocumentKind, EwayBillRequest, InvoiceRequest, SalesReportRequest};
pub use pdf::PdfGenerator;
pub use templates::TemplateEngine;
