//! Service Module
//!
//! Orchestration between the HTTP layer and the stores. Every store call runs
//! under a fixed deadline; running out of time is reported as
//! [`BannerError::Timeout`], separately from other failures.

mod accounts;
mod banners;

use std::future::Future;
use std::time::Duration;

use tracing::error;

use crate::error::{BannerError, Result};
use crate::store::{StoreError, StoreResult};

pub use accounts::AccountService;
pub use banners::BannerService;

/// Default deadline for a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

// == Store Deadline ==
/// Runs a store call under `timeout` and maps its outcome to a service error.
pub(crate) async fn with_deadline<T, F>(
    timeout: Duration,
    operation: &'static str,
    call: F,
) -> Result<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(StoreError::NotFound(id))) => Err(BannerError::BannerNotFound(id)),
        Ok(Err(StoreError::Conflict(message))) => Err(BannerError::Conflict(message)),
        Ok(Err(StoreError::Backend(message))) => {
            error!(operation, "store call failed: {}", message);
            Err(BannerError::Internal(message))
        }
        Err(_) => {
            error!(
                operation,
                "store call exceeded {}s deadline",
                timeout.as_secs()
            );
            Err(BannerError::Timeout)
        }
    }
}
