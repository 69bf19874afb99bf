use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use crate::core::DocumentResult;
use crate::models::SalesReportRequest;

/// Sales report as an xlsx workbook, for tenants that post-process the
/// figures instead of filing the PDF.
pub struct ExcelGenerator;

impl ExcelGenerator {
    pub fn new() -> Self {
        ExcelGenerator
    }

    pub fn generate(&self, request: &SalesReportRequest) -> DocumentResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Sales Report")?;

        let title_format = Format::new().set_bold().set_font_size(14);
        let header_format = Format::new()
            .set_bold()
            .set_background_color(0xF0F0F0)
            .set_align(FormatAlign::Center);
        let money_format = Format::new().set_num_format("#,##0.00");
        let totals_format = Format::new().set_bold().set_num_format("#,##0.00");
        let bold = Format::new().set_bold();

        worksheet.write_with_format(0, 0, request.title.as_str(), &title_format)?;
        worksheet.write(
            1,
            0,
            format!(
                "Period: {} to {}",
                request.from_date.format("%d/%m/%Y"),
                request.to_date.format("%d/%m/%Y")
            ),
        )?;

        let headers = [
            "#",
            "Particulars",
            "HSN",
            "Qty",
            "Taxable Amount",
            "GST",
            "Total",
        ];
        let header_row = 3;
        for (col, header) in headers.iter().enumerate() {
            worksheet.write_with_format(header_row, col as u16, *header, &header_format)?;
        }

        let mut taxable_total = 0.0;
        let mut gst_total = 0.0;

        for (i, row) in request.rows.iter().enumerate() {
            let r = header_row + 1 + i as u32;
            worksheet.write(r, 0, (i + 1) as u32)?;
            worksheet.write(r, 1, row.label.as_str())?;
            worksheet.write(r, 2, row.hsn_code.as_deref().unwrap_or(""))?;
            worksheet.write(r, 3, row.quantity)?;
            worksheet.write_with_format(r, 4, row.taxable_amount, &money_format)?;
            worksheet.write_with_format(r, 5, row.gst_amount, &money_format)?;
            worksheet.write_with_format(r, 6, row.total(), &money_format)?;

            taxable_total += row.taxable_amount;
            gst_total += row.gst_amount;
        }

        let totals_row = header_row + 1 + request.rows.len() as u32;
        worksheet.write_with_format(totals_row, 1, "Total", &bold)?;
        worksheet.write_with_format(totals_row, 4, taxable_total, &totals_format)?;
        worksheet.write_with_format(totals_row, 5, gst_total, &totals_format)?;
        worksheet.write_with_format(totals_row, 6, taxable_total + gst_total, &totals_format)?;

        worksheet.set_column_width(1, 36)?;
        worksheet.set_column_width(4, 16)?;
        worksheet.set_column_width(5, 14)?;
        worksheet.set_column_width(6, 16)?;

        Ok(workbook.save_to_buffer()?)
    }
}

impl Default for ExcelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputFormat, SalesRow};
    use chrono::NaiveDate;

    #[test]
    fn workbook_bytes_are_a_zip_container() {
        let request = SalesReportRequest {
            title: "GST Sales Summary".to_string(),
            from_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            rows: vec![SalesRow {
                label: "Cement 50kg".to_string(),
                hsn_code: Some("2523".to_string()),
                quantity: 40.0,
                taxable_amount: 7200.0,
                gst_amount: 1296.0,
            }],
            format: OutputFormat::Excel,
        };

        let bytes = ExcelGenerator::new().generate(&request).unwrap();
        // xlsx is a zip archive: PK magic.
        assert_eq!(&bytes[0..2], b"PK");
    }
}
