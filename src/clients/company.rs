use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::core::DocumentResult;
use crate::models::CompanyProfile;

/// Client for the backend profile endpoint that owns company master data
/// (name, address, GSTIN, bank details, logo). Profiles are cached per
/// tenant with a TTL; a cold fetch failure degrades to a profile-less
/// header instead of failing the document.
pub struct CompanyClient {
    http: reqwest::Client,
    base_url: String,
    cache_ttl: Duration,
    cache: RwLock<HashMap<i64, (Instant, CompanyProfile)>>,
}

impl CompanyClient {
    pub fn new(base_url: String, cache_ttl: Duration) -> Self {
        CompanyClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_ttl,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn fetch_profile(&self, tenant_id: i64) -> DocumentResult<Option<CompanyProfile>> {
        {
            let cache = self.cache.read().await;
            if let Some((fetched_at, profile)) = cache.get(&tenant_id) {
                if fetched_at.elapsed() < self.cache_ttl {
                    return Ok(Some(profile.clone()));
                }
            }
        }

        let url = format!("{}/api/v1/tenants/{}/profile", self.base_url, tenant_id);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(tenant_id, error = %e, "company profile fetch failed");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            tracing::warn!(tenant_id, status = %response.status(), "company profile unavailable");
            return Ok(None);
        }

        let profile: CompanyProfile = response.json().await?;

        let mut cache = self.cache.write().await;
        cache.insert(tenant_id, (Instant::now(), profile.clone()));

        Ok(Some(profile))
    }

    /// Downloads the logo referenced by the profile. Best effort: a missing
    /// or broken logo renders as an invoice without one.
    pub async fn fetch_logo(&self, profile: &CompanyProfile) -> Option<Vec<u8>> {
        let url = profile.logo_url.as_ref()?;

        let response = match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "logo fetch rejected");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "logo fetch failed");
                return None;
            }
        };

        match response.bytes().await {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::warn!(error = %e, "logo body read failed");
                None
            }
        }
    }
}
