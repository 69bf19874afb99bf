use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::models::{
    CompanyProfile, EwayBillRequest, InvoiceRequest, OutputFormat, SalesReportRequest,
};
use crate::templates::TemplateEngine;

use super::error::ApiResult;
use super::metrics::{DOCUMENTS_GENERATED, GENERATION_SECONDS};
use super::middleware::auth::extract_auth_info;
use super::state::ApiState;

/// Computes the invoice summary without rendering anything. Backs the live
/// form preview, so it must stay cheap and side-effect free.
pub async fn preview_invoice(
    req: HttpRequest,
    data: web::Json<InvoiceRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    if let Some(response) = check_rate_limit(&req, &state) {
        return Ok(response);
    }

    let summary = TemplateEngine::summarize(&data);
    Ok(HttpResponse::Ok().json(summary))
}

pub async fn render_invoice(
    req: HttpRequest,
    data: web::Json<InvoiceRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    if let Some(response) = check_rate_limit(&req, &state) {
        return Ok(response);
    }

    let request = data.into_inner();
    let tenant_id = extract_auth_info(&req).tenant_id;
    let company = resolve_company(&request.company, tenant_id, &state).await;
    let logo = state.company_client.fetch_logo(&company).await;

    let timer = GENERATION_SECONDS
        .with_label_values(&["invoice"])
        .start_timer();
    let result = async {
        let rendered = state.engine.render_invoice(&request, &company, logo)?;
        state.pdf.generate(&rendered).await
    }
    .await;
    timer.observe_duration();

    match result {
        Ok(pdf_bytes) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["invoice", "ok"])
                .inc();
            Ok(pdf_response(pdf_bytes, &request.invoice.number))
        }
        Err(e) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["invoice", "error"])
                .inc();
            tracing::error!(error = %e, "invoice generation failed");
            Err(e.into())
        }
    }
}

pub async fn render_eway_bill(
    req: HttpRequest,
    data: web::Json<EwayBillRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    if let Some(response) = check_rate_limit(&req, &state) {
        return Ok(response);
    }

    let request = data.into_inner();
    let tenant_id = extract_auth_info(&req).tenant_id;
    let company = resolve_company(&request.invoice.company, tenant_id, &state).await;

    let timer = GENERATION_SECONDS
        .with_label_values(&["eway_bill"])
        .start_timer();
    let result = async {
        let rendered = state.engine.render_eway_bill(&request, &company)?;
        state.pdf.generate(&rendered).await
    }
    .await;
    timer.observe_duration();

    match result {
        Ok(pdf_bytes) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["eway_bill", "ok"])
                .inc();
            Ok(pdf_response(pdf_bytes, &request.eway_bill_number))
        }
        Err(e) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["eway_bill", "error"])
                .inc();
            tracing::error!(error = %e, "e-way bill generation failed");
            Err(e.into())
        }
    }
}

pub async fn render_report(
    req: HttpRequest,
    data: web::Json<SalesReportRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    if let Some(response) = check_rate_limit(&req, &state) {
        return Ok(response);
    }

    let request = data.into_inner();
    let tenant_id = extract_auth_info(&req).tenant_id;
    let company = resolve_company(&None, tenant_id, &state).await;

    let timer = GENERATION_SECONDS
        .with_label_values(&["report"])
        .start_timer();
    let result = match request.format {
        OutputFormat::Pdf => {
            match state.engine.render_sales_report(&request, &company) {
                Ok(rendered) => state.pdf.generate(&rendered).await.map(|bytes| {
                    (bytes, "application/pdf", "pdf")
                }),
                Err(e) => Err(e),
            }
        }
        OutputFormat::Excel => state.excel.generate(&request).map(|bytes| {
            (
                bytes,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "xlsx",
            )
        }),
    };
    timer.observe_duration();

    match result {
        Ok((bytes, content_type, extension)) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["report", "ok"])
                .inc();
            let filename = format!("{}.{}", safe_filename(&request.title), extension);
            Ok(HttpResponse::Ok()
                .content_type(content_type)
                .append_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", filename),
                ))
                .body(bytes))
        }
        Err(e) => {
            DOCUMENTS_GENERATED
                .with_label_values(&["report", "error"])
                .inc();
            tracing::error!(error = %e, "report generation failed");
            Err(e.into())
        }
    }
}

// Helper functions

/// Company header resolution order: request override, then the tenant
/// profile service, then the degraded placeholder. Document generation
/// never fails on a missing profile.
async fn resolve_company(
    company_override: &Option<CompanyProfile>,
    tenant_id: i64,
    state: &ApiState,
) -> CompanyProfile {
    if let Some(company) = company_override {
        return company.clone();
    }

    match state.company_client.fetch_profile(tenant_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => CompanyProfile::unavailable(),
        Err(e) => {
            tracing::warn!(tenant_id, error = %e, "profile lookup errored");
            CompanyProfile::unavailable()
        }
    }
}

fn check_rate_limit(req: &HttpRequest, state: &ApiState) -> Option<HttpResponse> {
    let auth = extract_auth_info(req);
    let key = format!("{}:{}", auth.tenant_id, auth.user_id);

    if state.rate_limiter.check_key(&key).is_err() {
        return Some(HttpResponse::TooManyRequests().json(json!({
            "error": "Rate limit exceeded",
            "retry_after": 60
        })));
    }

    None
}

fn pdf_response(bytes: Vec<u8>, document_number: &str) -> HttpResponse {
    let filename = format!("{}.pdf", safe_filename(document_number));
    HttpResponse::Ok()
        .content_type("application/pdf")
        .append_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

/// Invoice numbers like `INV/2026/042` must not smuggle path separators or
/// quotes into the header.
fn safe_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(safe_filename("INV/2026/042"), "INV-2026-042");
        assert_eq!(safe_filename("plain-042"), "plain-042");
        assert_eq!(safe_filename(""), "document");
        assert_eq!(safe_filename("a\"b"), "a-b");
    }
}
