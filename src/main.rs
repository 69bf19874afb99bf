use std::env;
use std::path::PathBuf;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use gst_billing::api::{configure_routes, ApiState, AppConfig};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    prometheus::default_registry().register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    let state = web::Data::new(ApiState::new(config_from_env()?)?);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;
    tracing::info!(%host, port, "gst billing document service listening");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

fn config_from_env() -> Result<AppConfig> {
    let defaults = AppConfig::default();

    Ok(AppConfig {
        profile_base_url: env::var("PROFILE_BASE_URL").unwrap_or(defaults.profile_base_url),
        profile_cache_secs: env_parsed("PROFILE_CACHE_SECS", defaults.profile_cache_secs)?,
        rate_limit_per_minute: env_parsed(
            "RATE_LIMIT_PER_MINUTE",
            defaults.rate_limit_per_minute,
        )?,
        rate_limit_burst: env_parsed("RATE_LIMIT_BURST", defaults.rate_limit_burst)?,
        typst_bin: env::var("TYPST_BIN").unwrap_or(defaults.typst_bin),
        temp_dir: env::var("TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.temp_dir),
    })
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(default),
    }
}
