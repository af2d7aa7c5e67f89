//! deps.dev package-version lookups

use crate::client::HttpClient;
use crate::error::{Error, Result};
use async_trait::async_trait;
use depdiff_core::{ChangeKind, DependencyChangeRecord, KnownInsights};
use reqwest::StatusCode;
use std::collections::HashSet;
use url::Url;

const DEPS_DEV_API_URL: &str = "https://api.deps.dev/v3/";

/// Answers whether a registry knows a package version
#[async_trait]
pub trait PackageExistence: Send + Sync {
    async fn entry_exists(&self, system: &str, name: &str, version: &str) -> Result<bool>;
}

/// Client for the deps.dev v3 API
#[derive(Debug, Clone)]
pub struct DepsDevClient {
    client: HttpClient,
    base_url: Url,
}

impl DepsDevClient {
    /// Create a client against the public API, rate limited to 10 requests/second
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_rate_limit(10)?,
            base_url: Url::parse(DEPS_DEV_API_URL)?,
        })
    }

    /// Create a client against another deployment (or a mock server)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
            base_url: Url::parse(base_url)?,
        })
    }

    /// `GetVersion` endpoint URL for a package version
    pub fn version_url(&self, system: &str, name: &str, version: &str) -> Result<Url> {
        let system = system.to_lowercase();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::other(format!("deps.dev base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["systems", system.as_str(), "packages", name, "versions", version]);
        Ok(url)
    }
}

#[async_trait]
impl PackageExistence for DepsDevClient {
    /// 200 means known, 404 means unknown; anything else is an error
    async fn entry_exists(&self, system: &str, name: &str, version: &str) -> Result<bool> {
        let url = self.version_url(system, name, version)?;
        let status = self.client.get_status(url.as_str()).await?;
        tracing::debug!(system, name, version, status = status.as_u16(), "deps.dev lookup");

        match status {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(Error::Status {
                status: s.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

/// Resolve deps.dev existence for every added dependency ahead of rendering
///
/// Only records tagged `Added` with both an ecosystem and a version are
/// looked up, each distinct package version once. Any failed lookup fails
/// the whole prefetch.
pub async fn prefetch_insights<L>(lookup: &L, records: &[DependencyChangeRecord]) -> Result<KnownInsights>
where
    L: PackageExistence + ?Sized,
{
    let mut known = KnownInsights::new();
    let mut seen = HashSet::new();

    for record in records {
        if record.change_kind != Some(ChangeKind::Added) {
            continue;
        }
        let (Some(ecosystem), Some(version)) = (&record.ecosystem, &record.version) else {
            continue;
        };
        if !seen.insert((ecosystem.to_lowercase(), record.name.to_lowercase(), version.clone())) {
            continue;
        }

        let exists = lookup
            .entry_exists(ecosystem, &record.name, version)
            .await
            .map_err(|source| Error::Lookup {
                dependency: record.name.clone(),
                source: Box::new(source),
            })?;
        if exists {
            known.insert(ecosystem, &record.name, version);
        }
    }

    tracing::debug!(known = known.len(), looked_up = seen.len(), "prefetched deps.dev insights");
    Ok(known)
}
