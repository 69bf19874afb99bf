use minijinja::{Environment, Value};
use serde_json::json;

use crate::billing::{self, InvoiceSummary};
use crate::core::{DocumentResult, PageSetup};
use crate::models::{CompanyProfile, EwayBillRequest, InvoiceRequest, SalesReportRequest};

use super::helpers;

/// A file written next to the Typst source before compilation (logo, QR).
#[derive(Debug, Clone)]
pub struct Asset {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Rendered Typst source plus the assets it references by relative path.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub typst_source: String,
    pub assets: Vec<Asset>,
}

/// Renders the embedded document templates. Totals always flow through
/// [`billing::calculate`]; templates only format, never recompute.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> DocumentResult<Self> {
        let mut env = Environment::new();

        env.add_filter("money", helpers::money_filter);
        env.add_filter("in_words", helpers::in_words_filter);
        env.add_filter("percentage", helpers::percentage_filter);
        env.add_filter("qty", helpers::quantity_filter);
        env.add_filter("date", helpers::date_filter);
        env.add_filter("escape_typst", helpers::escape_typst_filter);

        env.add_template("tax_invoice", include_str!("typ/tax_invoice.typ.j2"))?;
        env.add_template("eway_bill", include_str!("typ/eway_bill.typ.j2"))?;
        env.add_template("sales_report", include_str!("typ/sales_report.typ.j2"))?;

        Ok(TemplateEngine { env })
    }

    /// Computes the invoice summary exactly as the preview endpoint does.
    pub fn summarize(request: &InvoiceRequest) -> InvoiceSummary {
        billing::calculate(
            &request.items,
            request.discount,
            request.transport_amount,
            request.advance_amount(),
        )
    }

    pub fn render_invoice(
        &self,
        request: &InvoiceRequest,
        company: &CompanyProfile,
        logo: Option<Vec<u8>>,
    ) -> DocumentResult<RenderedDocument> {
        let summary = Self::summarize(request);
        let options = request.options.clone().unwrap_or_default();
        let mut assets = Vec::new();

        let logo_file = logo.map(|bytes| {
            assets.push(Asset {
                file_name: "logo.png".to_string(),
                bytes,
            });
            "logo.png".to_string()
        });

        let qr_file = match (&request.invoice.irn, options.include_qr) {
            (Some(irn), true) => {
                let payload = format!(
                    "IRN:{}|GSTIN:{}|DOC:{}|AMT:{:.2}",
                    irn, company.gstin, request.invoice.number, summary.total
                );
                let bytes = helpers::qr_png_bytes(&payload)
                    .map_err(|e| crate::core::DocumentError::Generation(e.to_string()))?;
                assets.push(Asset {
                    file_name: "qr_irn.png".to_string(),
                    bytes,
                });
                Some("qr_irn.png".to_string())
            }
            _ => None,
        };

        let payment = request.payment.as_ref().map(|p| {
            json!({
                "type_label": p.payment_type.label(),
                "status_label": p.payment_status.label(),
            })
        });

        let context = json!({
            "page_header": PageSetup::default().to_typst_header(),
            "title": request.kind.title(),
            "company": company,
            "company_address": address_lines(Some(&company.address)),
            "customer": &request.customer,
            "customer_address": address_lines(request.customer.address.as_ref()),
            "invoice": &request.invoice,
            "items": line_rows(request),
            "summary": summary,
            "payment": payment,
            "bank": &company.bank_details,
            "notes": &request.notes,
            "watermark": options.watermark,
            "logo_file": logo_file,
            "qr_file": qr_file,
        });

        let typst_source = self
            .env
            .get_template("tax_invoice")?
            .render(Value::from_serialize(&context))?;

        Ok(RenderedDocument {
            typst_source,
            assets,
        })
    }

    pub fn render_eway_bill(
        &self,
        request: &EwayBillRequest,
        company: &CompanyProfile,
    ) -> DocumentResult<RenderedDocument> {
        let invoice = &request.invoice;
        let summary = Self::summarize(invoice);
        let options = invoice.options.clone().unwrap_or_default();
        let mut assets = Vec::new();

        let qr_file = if options.include_qr {
            let payload = format!(
                "EWB:{}|GSTIN:{}|VEH:{}|DOC:{}",
                request.eway_bill_number,
                company.gstin,
                request.transport.vehicle_number,
                invoice.invoice.number
            );
            let bytes = helpers::qr_png_bytes(&payload)
                .map_err(|e| crate::core::DocumentError::Generation(e.to_string()))?;
            assets.push(Asset {
                file_name: "qr_ewb.png".to_string(),
                bytes,
            });
            Some("qr_ewb.png".to_string())
        } else {
            None
        };

        let context = json!({
            "page_header": PageSetup::default().to_typst_header(),
            "title": invoice.kind.title(),
            "company": company,
            "company_address": address_lines(Some(&company.address)),
            "customer": &invoice.customer,
            "customer_address": address_lines(invoice.customer.address.as_ref()),
            "invoice": &invoice.invoice,
            "eway": {
                "number": &request.eway_bill_number,
                "date": request.eway_bill_date,
                "valid_until": request.valid_until,
            },
            "transport": &request.transport,
            "items": line_rows(invoice),
            "summary": summary,
            "qr_file": qr_file,
        });

        let typst_source = self
            .env
            .get_template("eway_bill")?
            .render(Value::from_serialize(&context))?;

        Ok(RenderedDocument {
            typst_source,
            assets,
        })
    }

    pub fn render_sales_report(
        &self,
        request: &SalesReportRequest,
        company: &CompanyProfile,
    ) -> DocumentResult<RenderedDocument> {
        let taxable: f64 = request.rows.iter().map(|r| r.taxable_amount).sum();
        let gst: f64 = request.rows.iter().map(|r| r.gst_amount).sum();

        let rows: Vec<_> = request
            .rows
            .iter()
            .map(|r| {
                json!({
                    "label": r.label,
                    "hsn_code": r.hsn_code.clone().unwrap_or_default(),
                    "quantity": r.quantity,
                    "taxable_amount": r.taxable_amount,
                    "gst_amount": r.gst_amount,
                    "total": r.total(),
                })
            })
            .collect();

        let context = json!({
            "page_header": PageSetup::landscape().to_typst_header(),
            "title": request.title,
            "company": company,
            "from_date": request.from_date,
            "to_date": request.to_date,
            "rows": rows,
            "totals": {
                "taxable_amount": taxable,
                "cgst": gst / 2.0,
                "sgst": gst / 2.0,
                "total": taxable + gst,
            },
        });

        let typst_source = self
            .env
            .get_template("sales_report")?
            .render(Value::from_serialize(&context))?;

        Ok(RenderedDocument {
            typst_source,
            assets: Vec::new(),
        })
    }
}

fn address_lines(address: Option<&crate::models::Address>) -> Vec<String> {
    address
        .map(|a| a.format_multiline().lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Per-line rows with the derived amounts attached, so templates never do
/// arithmetic.
fn line_rows(request: &InvoiceRequest) -> Vec<serde_json::Value> {
    request
        .items
        .iter()
        .map(|item| {
            json!({
                "product_name": item.product_name,
                "hsn_code": item.hsn_code.clone().unwrap_or_default(),
                "quantity": item.quantity,
                "unit": item.unit.clone().unwrap_or_default(),
                "rate": item.rate,
                "discount_percent": item.discount_percent,
                "gst_percent": item.gst_percent,
                "base_amount": item.base_amount(),
                "line_total": item.line_total(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{InvoiceDiscount, LineItem};
    use crate::models::{Address, CustomerInfo, DocumentKind, InvoiceInfo};
    use chrono::NaiveDate;

    fn company() -> CompanyProfile {
        CompanyProfile {
            name: "Sharma Traders".to_string(),
            gstin: "27AAPFU0939F1ZV".to_string(),
            address: Address {
                line1: "14 MG Road".to_string(),
                line2: None,
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                pincode: Some("411001".to_string()),
            },
            phone: Some("+91 98200 00000".to_string()),
            email: None,
            bank_details: None,
            logo_url: None,
        }
    }

    fn request() -> InvoiceRequest {
        InvoiceRequest {
            kind: DocumentKind::TaxInvoice,
            invoice: InvoiceInfo {
                number: "INV-2026-042".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
                due_date: None,
                irn: None,
                ack_number: None,
                ack_date: None,
            },
            customer: CustomerInfo {
                name: "Patel Hardware".to_string(),
                gstin: None,
                address: None,
                phone: None,
                email: None,
            },
            items: vec![LineItem {
                product_name: "Cement 50kg".to_string(),
                hsn_code: Some("2523".to_string()),
                quantity: 2.0,
                unit: Some("bag".to_string()),
                rate: 100.0,
                discount_percent: 10.0,
                gst_percent: 18.0,
            }],
            discount: None,
            transport_amount: 0.0,
            payment: None,
            notes: None,
            company: None,
            options: None,
        }
    }

    #[test]
    fn invoice_template_renders_totals_and_words() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_invoice(&request(), &company(), None).unwrap();

        let source = &rendered.typst_source;
        assert!(source.contains("Tax Invoice"));
        assert!(source.contains("INV-2026-042"));
        assert!(source.contains("Rs. 212.40"));
        assert!(source.contains("Two Hundred Twelve Rupees and Forty Paise Only"));
        assert!(source.contains("31/03/2026"));
        assert!(rendered.assets.is_empty());
    }

    #[test]
    fn bill_kind_changes_the_title() {
        let engine = TemplateEngine::new().unwrap();
        let mut req = request();
        req.kind = DocumentKind::Bill;
        let rendered = engine.render_invoice(&req, &company(), None).unwrap();
        assert!(rendered.typst_source.contains("Bill No: INV-2026-042"));
        assert!(!rendered.typst_source.contains("Tax Invoice No:"));
    }

    #[test]
    fn irn_produces_a_qr_asset() {
        let engine = TemplateEngine::new().unwrap();
        let mut req = request();
        req.invoice.irn = Some("a1b2c3".to_string());
        let rendered = engine.render_invoice(&req, &company(), None).unwrap();
        assert_eq!(rendered.assets.len(), 1);
        assert_eq!(rendered.assets[0].file_name, "qr_irn.png");
        assert!(rendered.typst_source.contains("qr_irn.png"));
    }

    #[test]
    fn discount_example_matches_summary() {
        let mut req = request();
        req.items = vec![LineItem {
            product_name: "Bricks".to_string(),
            hsn_code: None,
            quantity: 10.0,
            unit: None,
            rate: 100.0,
            discount_percent: 0.0,
            gst_percent: 10.0,
        }];
        req.discount = Some(InvoiceDiscount::Percent(10.0));
        req.transport_amount = 50.0;

        let summary = TemplateEngine::summarize(&req);
        assert!((summary.total - 1050.0).abs() < 1e-9);

        let engine = TemplateEngine::new().unwrap();
        let rendered = engine.render_invoice(&req, &company(), None).unwrap();
        assert!(rendered.typst_source.contains("Rs. 1,050.00"));
        assert!(rendered
            .typst_source
            .contains("One Thousand Fifty Rupees Only"));
    }
}
