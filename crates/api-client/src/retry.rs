use std::time::Duration;

use tracing::warn;

use promptshare_api::StoredFile;

use crate::client::ApiClient;
use crate::error::ApiError;

/// Configuration for retry behaviour on upload requests.
pub struct RetryConfig {
    pub max_retries: usize,
    pub delays: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delays: vec![1, 2, 4],
        }
    }
}

/// Upload a file with exponential backoff.
///
/// Retries on network errors and 5xx responses. Returns immediately on
/// success or any non-transient failure. The multipart form is rebuilt from
/// `bytes` on every attempt.
pub async fn upload_with_retry(
    client: &ApiClient,
    file_name: &str,
    bytes: &[u8],
    mime: &str,
    config: &RetryConfig,
) -> Result<StoredFile, ApiError> {
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        match client.upload_file(file_name, bytes.to_vec(), mime).await {
            Err(err) if err.is_transient() && attempt < config.delays.len() => {
                warn!(
                    "upload attempt {}/{} failed ({}), retrying in {}s…",
                    attempt + 1,
                    max_attempts,
                    err,
                    config.delays[attempt],
                );
                tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
            }
            other => return other,
        }
    }

    unreachable!()
}
