use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use super::numeric::{lenient_f64, sanitize};

/// A single invoice line as entered on the billing form.
///
/// `gst_percent` is accepted over the full range the form allows ([0, 300]);
/// no validation narrows it here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_name: String,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    /// Price per unit.
    #[serde(deserialize_with = "lenient_f64", default)]
    pub rate: f64,
    /// Line-level discount, percent of quantity × rate.
    #[serde(deserialize_with = "lenient_f64", default)]
    pub discount_percent: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub gst_percent: f64,
}

impl LineItem {
    /// Post line-discount, pre-GST amount.
    pub fn base_amount(&self) -> f64 {
        let quantity = sanitize(self.quantity);
        let rate = sanitize(self.rate);
        let discount = sanitize(self.discount_percent);
        quantity * rate * (1.0 - discount / 100.0)
    }

    pub fn gst_amount(&self) -> f64 {
        self.base_amount() * sanitize(self.gst_percent) / 100.0
    }

    pub fn line_total(&self) -> f64 {
        self.base_amount() + self.gst_amount()
    }

    /// Intra-state split: CGST and SGST each carry half the GST rate.
    pub fn cgst_percent(&self) -> f64 {
        sanitize(self.gst_percent) / 2.0
    }

    pub fn sgst_percent(&self) -> f64 {
        sanitize(self.gst_percent) / 2.0
    }
}

/// Invoice-level discount applied on top of the line amounts. The two modes
/// are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum InvoiceDiscount {
    /// Percent of the subtotal.
    Percent(f64),
    /// Absolute currency value.
    Flat(f64),
}

impl InvoiceDiscount {
    fn currency_value(&self, subtotal: f64) -> f64 {
        match *self {
            InvoiceDiscount::Percent(p) => subtotal * sanitize(p) / 100.0,
            InvoiceDiscount::Flat(v) => sanitize(v),
        }
    }
}

/// Per-line derived amounts, kept alongside the totals so document layout
/// never recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAmounts {
    pub base_amount: f64,
    pub gst_amount: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    /// Sum of per-line base amounts (post line discount, pre invoice
    /// discount, pre GST).
    pub subtotal: f64,
    /// Invoice-level discount in currency.
    pub discount_value: f64,
    pub transport_amount: f64,
    pub cgst_cost: f64,
    pub sgst_cost: f64,
    pub gst_cost: f64,
    /// subtotal − discount_value + transport_amount + gst_cost. Not clamped:
    /// a discount larger than the subtotal surfaces as a negative total so
    /// the data-entry mistake stays visible.
    pub total: f64,
    pub advance_amount: f64,
    pub balance_due: f64,
    pub lines: Vec<LineAmounts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Card,
    Upi,
    Cheque,
    NetBanking,
}

impl PaymentType {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Card => "Card",
            PaymentType::Upi => "UPI",
            PaymentType::Cheque => "Cheque",
            PaymentType::NetBanking => "Net Banking",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Partial,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Partial => "Partial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentState {
    pub payment_type: PaymentType,
    pub payment_status: PaymentStatus,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub advance_amount: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Derives an [`InvoiceSummary`] from the line items and invoice-level
/// modifiers.
///
/// Pure and idempotent: identical input yields bit-identical output. No
/// intermediate rounding is performed; callers round to 2 decimals at
/// display time only.
pub fn calculate(
    items: &[LineItem],
    discount: Option<InvoiceDiscount>,
    transport_amount: f64,
    advance_amount: f64,
) -> InvoiceSummary {
    let transport_amount = sanitize(transport_amount);
    let advance_amount = sanitize(advance_amount);

    let mut subtotal = 0.0;
    let mut gst_cost = 0.0;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let base_amount = item.base_amount();
        let gst_amount = item.gst_amount();

        subtotal += base_amount;
        gst_cost += gst_amount;

        lines.push(LineAmounts {
            base_amount,
            gst_amount,
            cgst_amount: gst_amount / 2.0,
            sgst_amount: gst_amount / 2.0,
            line_total: base_amount + gst_amount,
        });
    }

    let discount_value = discount
        .map(|d| d.currency_value(subtotal))
        .unwrap_or(0.0);

    // Halving is exact in binary floating point, so the split never drifts
    // from the aggregate.
    let cgst_cost = gst_cost / 2.0;
    let sgst_cost = gst_cost / 2.0;

    let total = subtotal - discount_value + transport_amount + gst_cost;

    InvoiceSummary {
        subtotal,
        discount_value,
        transport_amount,
        cgst_cost,
        sgst_cost,
        gst_cost,
        total,
        advance_amount,
        balance_due: total - advance_amount,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, rate: f64, discount_percent: f64, gst_percent: f64) -> LineItem {
        LineItem {
            product_name: "Cement 50kg".to_string(),
            hsn_code: Some("2523".to_string()),
            quantity,
            unit: Some("bag".to_string()),
            rate,
            discount_percent,
            gst_percent,
        }
    }

    #[test]
    fn line_amounts_worked_example() {
        // 2 units at 100, 10% line discount, 18% GST
        let line = item(2.0, 100.0, 10.0, 18.0);
        assert!((line.base_amount() - 180.0).abs() < 1e-9);
        assert!((line.gst_amount() - 32.4).abs() < 1e-9);
        assert!((line.line_total() - 212.4).abs() < 1e-9);
        assert_eq!(line.cgst_percent(), 9.0);
        assert_eq!(line.sgst_percent(), 9.0);
    }

    #[test]
    fn zero_quantity_yields_zero_base() {
        for (rate, discount) in [(0.0, 0.0), (500.0, 0.0), (500.0, 50.0), (1.0, 100.0)] {
            let line = item(0.0, rate, discount, 18.0);
            assert_eq!(line.base_amount(), 0.0);
            assert_eq!(line.line_total(), 0.0);
        }
    }

    #[test]
    fn base_amount_non_increasing_in_discount() {
        let mut previous = f64::INFINITY;
        for d in 0..=100 {
            let line = item(3.0, 99.99, d as f64, 18.0);
            let base = line.base_amount();
            assert!(base <= previous, "base rose at discount {}%", d);
            assert!(base >= 0.0);
            previous = base;
        }
    }

    #[test]
    fn summary_worked_example() {
        // subtotal 1000, 10% invoice discount, transport 50, GST 10% blended
        let items = vec![item(10.0, 100.0, 0.0, 10.0)];
        let summary = calculate(&items, Some(InvoiceDiscount::Percent(10.0)), 50.0, 0.0);

        assert!((summary.subtotal - 1000.0).abs() < 1e-9);
        assert!((summary.discount_value - 100.0).abs() < 1e-9);
        assert!((summary.gst_cost - 100.0).abs() < 1e-9);
        assert!((summary.cgst_cost - 50.0).abs() < 1e-9);
        assert!((summary.sgst_cost - 50.0).abs() < 1e-9);
        assert!((summary.total - 1050.0).abs() < 1e-9);
    }

    #[test]
    fn advance_reduces_balance() {
        let items = vec![item(10.0, 100.0, 0.0, 10.0)];
        let summary = calculate(&items, Some(InvoiceDiscount::Percent(10.0)), 50.0, 300.0);
        assert!((summary.total - 1050.0).abs() < 1e-9);
        assert!((summary.balance_due - 750.0).abs() < 1e-9);
    }

    #[test]
    fn gst_split_has_no_drift() {
        let items = vec![
            item(3.0, 33.33, 0.0, 18.0),
            item(7.0, 19.99, 5.0, 12.0),
            item(1.0, 4999.0, 2.5, 28.0),
        ];
        let summary = calculate(&items, None, 0.0, 0.0);
        // Exact equality, not approximate: the even split must not drift.
        assert_eq!(summary.cgst_cost + summary.sgst_cost, summary.gst_cost);
        for line in &summary.lines {
            assert_eq!(line.cgst_amount + line.sgst_amount, line.gst_amount);
        }
    }

    #[test]
    fn flat_discount_used_verbatim() {
        let items = vec![item(1.0, 500.0, 0.0, 0.0)];
        let summary = calculate(&items, Some(InvoiceDiscount::Flat(75.0)), 0.0, 0.0);
        assert_eq!(summary.discount_value, 75.0);
        assert!((summary.total - 425.0).abs() < 1e-9);
    }

    #[test]
    fn zero_gst_is_valid() {
        let items = vec![item(4.0, 25.0, 0.0, 0.0)];
        let summary = calculate(&items, None, 0.0, 0.0);
        assert_eq!(summary.gst_cost, 0.0);
        assert_eq!(summary.cgst_cost, 0.0);
        assert_eq!(summary.sgst_cost, 0.0);
        assert!((summary.total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_items_total_is_transport_minus_discount() {
        let summary = calculate(&[], Some(InvoiceDiscount::Flat(80.0)), 50.0, 0.0);
        assert_eq!(summary.subtotal, 0.0);
        assert_eq!(summary.gst_cost, 0.0);
        // Negative totals are surfaced, not clamped.
        assert!((summary.total - -30.0).abs() < 1e-9);
        assert!(summary.total < 0.0);
    }

    #[test]
    fn percent_discount_on_empty_subtotal_is_zero() {
        let summary = calculate(&[], Some(InvoiceDiscount::Percent(10.0)), 50.0, 0.0);
        assert_eq!(summary.discount_value, 0.0);
        assert!((summary.total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn overpayment_surfaces_negative_balance() {
        let items = vec![item(1.0, 100.0, 0.0, 0.0)];
        let summary = calculate(&items, None, 0.0, 150.0);
        assert!((summary.balance_due - -50.0).abs() < 1e-9);
    }

    #[test]
    fn idempotent_on_identical_input() {
        let items = vec![
            item(2.5, 147.13, 7.5, 18.0),
            item(11.0, 9.09, 0.0, 5.0),
        ];
        let first = calculate(&items, Some(InvoiceDiscount::Percent(3.0)), 120.0, 99.99);
        let second = calculate(&items, Some(InvoiceDiscount::Percent(3.0)), 120.0, 99.99);
        // Bit-identical, field by field.
        assert_eq!(first, second);
        assert_eq!(first.total.to_bits(), second.total.to_bits());
        assert_eq!(first.balance_due.to_bits(), second.balance_due.to_bits());
    }

    #[test]
    fn non_finite_modifiers_are_sanitized() {
        let items = vec![item(1.0, 100.0, 0.0, 0.0)];
        let summary = calculate(&items, None, f64::NAN, f64::INFINITY);
        assert_eq!(summary.transport_amount, 0.0);
        assert_eq!(summary.advance_amount, 0.0);
        assert!((summary.total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn wide_gst_percent_range_is_accepted() {
        let line = item(1.0, 100.0, 0.0, 300.0);
        assert!((line.gst_amount() - 300.0).abs() < 1e-9);
        assert!((line.line_total() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn line_items_deserialize_leniently() {
        let json = r#"{
            "product_name": "Paint",
            "quantity": "3",
            "rate": "abc",
            "discount_percent": null,
            "gst_percent": 18
        }"#;
        let line: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(line.quantity, 3.0);
        assert_eq!(line.rate, 0.0);
        assert_eq!(line.discount_percent, 0.0);
        assert_eq!(line.gst_percent, 18.0);
        assert_eq!(line.base_amount(), 0.0);
    }
}
