pub mod common;
pub mod eway;
pub mod invoice;
pub mod report;

pub use common::{Address, BankDetails, CompanyProfile, CustomerInfo, RenderOptions};
pub use eway::{EwayBillRequest, TransportDetail};
pub use invoice::{DocumentKind, InvoiceInfo, InvoiceRequest};
pub use report::{OutputFormat, SalesReportRequest, SalesRow};
