use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use governor::{clock::DefaultClock, state::keyed::DashMapStateStore, Quota, RateLimiter};

use crate::clients::CompanyClient;
use crate::excel::ExcelGenerator;
use crate::pdf::PdfGenerator;
use crate::templates::TemplateEngine;

pub type KeyedRateLimiter = Arc<RateLimiter<String, DashMapStateStore<String>, DefaultClock>>;

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<TemplateEngine>,
    pub pdf: Arc<PdfGenerator>,
    pub excel: Arc<ExcelGenerator>,
    pub company_client: Arc<CompanyClient>,
    pub rate_limiter: KeyedRateLimiter,
    pub config: Arc<AppConfig>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub profile_base_url: String,
    pub profile_cache_secs: u64,
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    pub typst_bin: String,
    pub temp_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_base_url: "http://localhost:3000".to_string(),
            profile_cache_secs: 300,
            rate_limit_per_minute: 100,
            rate_limit_burst: 20,
            typst_bin: "typst".to_string(),
            temp_dir: PathBuf::from("/tmp"),
        }
    }
}

impl ApiState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let engine = Arc::new(TemplateEngine::new()?);

        let pdf = Arc::new(PdfGenerator::new(
            config.typst_bin.clone(),
            config.temp_dir.clone(),
        ));

        let company_client = Arc::new(CompanyClient::new(
            config.profile_base_url.clone(),
            Duration::from_secs(config.profile_cache_secs),
        ));

        let quota = Quota::per_minute(
            std::num::NonZeroU32::new(config.rate_limit_per_minute.max(1)).expect("nonzero"),
        )
        .allow_burst(std::num::NonZeroU32::new(config.rate_limit_burst.max(1)).expect("nonzero"));
        let rate_limiter = Arc::new(RateLimiter::dashmap_with_clock(
            quota,
            &DefaultClock::default(),
        ));

        Ok(ApiState {
            engine,
            pdf,
            excel: Arc::new(ExcelGenerator::new()),
            company_client,
            rate_limiter,
            config: Arc::new(config),
        })
    }
}
