pub mod calculator;
pub mod numeric;
pub mod words;

pub use calculator::{
    calculate, InvoiceDiscount, InvoiceSummary, LineAmounts, LineItem, PaymentState,
    PaymentStatus, PaymentType,
};
pub use words::amount_in_words;
