use std::future::Future;

use serde::Serialize;

use super::UpstreamError;

/// Which service produced an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome<T> {
    /// The remote advisory service answered in time.
    Primary(T),
    /// Locally computed, conservative answer.
    Fallback(T),
}

impl<T> ServiceOutcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ServiceOutcome::Fallback(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            ServiceOutcome::Primary(v) | ServiceOutcome::Fallback(v) => v,
        }
    }
}

/// Response wrapper. `service_status` is only present when the answer
/// came from the fallback path, so clients can surface a degraded-mode
/// notice.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_status: Option<&'static str>,
}

impl<T> Envelope<T> {
    /// Wrap a locally computed answer with no degradation marker.
    pub fn ok(data: T) -> Self {
        Envelope {
            success: true,
            data,
            service_status: None,
        }
    }
}

impl<T> From<ServiceOutcome<T>> for Envelope<T> {
    fn from(outcome: ServiceOutcome<T>) -> Self {
        let fallback = outcome.is_fallback();
        Envelope {
            success: true,
            data: outcome.into_inner(),
            service_status: fallback.then_some("fallback"),
        }
    }
}

/// Try the primary service once, then fall back. `primary` is `None`
/// when no advisory service is configured. Any primary error (timeout
/// included) is logged and absorbed; only fallback errors propagate.
pub async fn select<T, E, Fut, F>(primary: Option<Fut>, fallback: F) -> Result<ServiceOutcome<T>, E>
where
    Fut: Future<Output = Result<T, UpstreamError>>,
    F: FnOnce() -> Result<T, E>,
{
    if let Some(fut) = primary {
        match fut.await {
            Ok(value) => return Ok(ServiceOutcome::Primary(value)),
            Err(err) => {
                tracing::warn!(error = %err, "advisory service unavailable, serving fallback");
            }
        }
    }
    fallback().map(ServiceOutcome::Fallback)
}
