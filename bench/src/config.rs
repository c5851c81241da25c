use crate::args::defaults::*;
use crate::error::BenchError;
use reqwest::Url;
use std::time::Duration;

/// Everything a sweep needs to know about its targets and pacing.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Record counts to compare, in order
    pub sizes: Vec<u64>,
    /// Pause between two consecutive sizes
    pub cooldown: Duration,
    /// Base URL of the payload source that negotiates `Content-Encoding`
    pub encoded_base_url: String,
    /// Base URL of the payload source that serves zipped attachments
    pub archive_base_url: String,
    /// Per-request deadline, `None` waits forever
    pub request_timeout: Option<Duration>,
}

impl Default for BenchConfig {
    fn default() -> BenchConfig {
        BenchConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            cooldown: DEFAULT_COOLDOWN_DURATION,
            encoded_base_url: DEFAULT_ENCODED_BASE_URL.to_string(),
            archive_base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT_DURATION),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        for url in [&self.encoded_base_url, &self.archive_base_url] {
            let parsed = Url::parse(url)
                .map_err(|e| BenchError::InvalidConfiguration(format!("{url}: {e}")))?;
            if parsed.cannot_be_a_base() {
                return Err(BenchError::InvalidConfiguration(format!(
                    "{url} cannot be used as a base URL"
                )));
            }
        }

        Ok(())
    }
}

/// Builds `{base}/data/{size}`, tolerating a base URL with or without a trailing slash.
pub fn data_url(base_url: &str, size: u64) -> Option<Url> {
    let mut base = Url::parse(base_url).ok()?;
    if base.cannot_be_a_base() {
        return None;
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("data/{size}")).ok()
}
