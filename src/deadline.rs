//! Deadlines for external calls.

use std::future::Future;
use std::time::Duration;

use crate::error::{RefinrError, Result};

/// Run `fut` with a deadline; expiry becomes [`RefinrError::Timeout`] naming `stage`.
pub async fn with_timeout<T, E, F>(after: Duration, stage: &str, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Into<RefinrError>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::warn!(stage = stage, after_ms = after.as_millis() as u64, "External call timed out");
            Err(RefinrError::Timeout {
                stage: stage.to_string(),
                after,
            })
        }
    }
}
