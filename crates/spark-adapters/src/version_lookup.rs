//! Latest-version lookup for the SPARK library.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use spark_core::{
    application::{ApplicationError, ports::VersionLookup},
    error::SparkResult,
    rules::build_descriptor::SPARK_GROUP_ID,
};

pub const DEFAULT_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Asks the Maven Central search API for the newest release of an artifact.
#[derive(Debug, Clone)]
pub struct MavenCentralLookup {
    client: Client,
    search_url: String,
}

impl MavenCentralLookup {
    pub fn new(search_url: impl Into<String>, timeout: Duration) -> SparkResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spark/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApplicationError::VersionLookup {
                artifact: SPARK_GROUP_ID.to_string(),
                reason: format!("failed to build http client: {e}"),
            })?;
        Ok(Self {
            client,
            search_url: search_url.into(),
        })
    }
}

impl VersionLookup for MavenCentralLookup {
    #[instrument(skip(self), fields(url = %self.search_url))]
    fn latest(&self, artifact: &str) -> SparkResult<String> {
        let fail = |reason: String| ApplicationError::VersionLookup {
            artifact: format!("{SPARK_GROUP_ID}:{artifact}"),
            reason,
        };

        let query = format!("g:\"{SPARK_GROUP_ID}\" AND a:\"{artifact}\"");
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("q", query.as_str()), ("rows", "1"), ("wt", "json")])
            .send()
            .map_err(|e| fail(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(fail(format!("status {}", response.status().as_u16())).into());
        }

        let payload = response
            .json::<Value>()
            .map_err(|e| fail(format!("failed to parse response json: {e}")))?;
        let version = latest_from_search(&payload)
            .ok_or_else(|| fail("artifact not found in search results".into()))?;

        debug!(%version, "found latest version");
        Ok(version)
    }
}

/// `response.docs[0].latestVersion` of a search API answer.
fn latest_from_search(payload: &Value) -> Option<String> {
    payload
        .pointer("/response/docs/0/latestVersion")
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}

/// Never touches the network; every lookup fails so the caller falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl VersionLookup for OfflineLookup {
    fn latest(&self, artifact: &str) -> SparkResult<String> {
        Err(ApplicationError::VersionLookup {
            artifact: artifact.to_string(),
            reason: "offline mode".into(),
        }
        .into())
    }
}

/// Always answers with the same version.
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionLookup for FixedVersion {
    fn latest(&self, _artifact: &str) -> SparkResult<String> {
        Ok(self.0.clone())
    }
}
