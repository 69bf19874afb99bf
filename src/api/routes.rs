use actix_cors::Cors;
use actix_web::{web, HttpResponse};

use super::handlers;
use super::middleware::auth::create_auth_middleware;
use super::state::ApiState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check))
        .route("/metrics", web::get().to(metrics_endpoint))
        .service(
            web::scope("/api/v1")
                .wrap(create_auth_middleware())
                .wrap(cors_policy())
                .service(
                    web::scope("/invoices")
                        .route("/preview", web::post().to(handlers::preview_invoice))
                        .route("/render", web::post().to(handlers::render_invoice)),
                )
                .service(
                    web::scope("/eway-bills")
                        .route("/render", web::post().to(handlers::render_eway_bill)),
                )
                .service(
                    web::scope("/reports")
                        .route("/render", web::post().to(handlers::render_report)),
                ),
        );
}

/// Local dev frontends plus any TLS origin; the gateway narrows this further
/// in production.
fn cors_policy() -> Cors {
    Cors::default()
        .allowed_origin_fn(|origin, _req_head| {
            let bytes = origin.as_bytes();
            bytes.starts_with(b"http://localhost") || bytes.starts_with(b"https://")
        })
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            "Content-Type",
            "Authorization",
            "X-Tenant-Id",
            "X-User-Id",
        ])
        .max_age(3600)
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}

/// Ready only when the Typst binary is callable; without it every render
/// endpoint would 500.
async fn readiness_check(state: web::Data<ApiState>) -> HttpResponse {
    let pdf = state.pdf.clone();
    let typst_ok = tokio::task::spawn_blocking(move || pdf.is_available())
        .await
        .unwrap_or(false);

    if typst_ok {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "checks": { "typst": "ok" }
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "not_ready",
            "checks": { "typst": "failed" }
        }))
    }
}

async fn metrics_endpoint() -> HttpResponse {
    use prometheus::{Encoder, TextEncoder};

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&prometheus::gather(), &mut buffer) {
        return HttpResponse::InternalServerError().body(e.to_string());
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}
