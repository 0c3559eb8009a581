use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::advisor::interactions::InteractionReport;
use crate::advisor::risk::RiskAssessment;
use crate::advisor::schedule::{RefillReport, ReminderReport};
use crate::advisor::trends::TrendSummary;
use crate::models::{HealthProfile, MedicationRecord, VitalSignReading};

/// Errors from calls to the remote advisory service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Cannot reach advisory service at {0}")]
    Connection(String),

    #[error("Advisory request timed out after {0}s")]
    Timeout(u64),

    #[error("Advisory service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// HTTP client for the remote advisory service.
pub struct AdvisorClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl AdvisorClient {
    /// Build a client with a hard per-request timeout. There is no
    /// retry: a slow or dead service means the caller falls back.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| UpstreamError::HttpClient(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body`, decode the response into `T`. A 2xx body that does
    /// not decode as `T` is treated the same as an unreachable service.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, UpstreamError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    UpstreamError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    UpstreamError::Timeout(self.timeout_secs)
                } else {
                    UpstreamError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| UpstreamError::HttpClient(e.to_string()))
    }

    pub async fn check_interactions(
        &self,
        medications: &[MedicationRecord],
    ) -> Result<InteractionReport, UpstreamError> {
        self.post_json(
            "/medications/interactions",
            &json!({ "medications": medications }),
        )
        .await
    }

    pub async fn dose_reminders(
        &self,
        medications: &[MedicationRecord],
        days: u32,
    ) -> Result<ReminderReport, UpstreamError> {
        self.post_json(
            "/medications/reminders",
            &json!({ "medications": medications, "days": days }),
        )
        .await
    }

    pub async fn refill_alerts(
        &self,
        medications: &[MedicationRecord],
    ) -> Result<RefillReport, UpstreamError> {
        self.post_json(
            "/medications/refill-alerts",
            &json!({ "medications": medications }),
        )
        .await
    }

    pub async fn analyze_vitals(
        &self,
        history: &[VitalSignReading],
    ) -> Result<TrendSummary, UpstreamError> {
        self.post_json("/vitals/analyze", &json!({ "history": history }))
            .await
    }

    pub async fn assess_risk(&self, profile: &HealthProfile) -> Result<RiskAssessment, UpstreamError> {
        self.post_json("/health/assess", &json!({ "profile": profile }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = AdvisorClient::new("http://localhost:5001/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5001");
    }

    #[tokio::test]
    async fn unreachable_service_is_connection_error() {
        // Port 1 is never listening.
        let client = AdvisorClient::new("http://127.0.0.1:1", 1).unwrap();
        let result = client.check_interactions(&[]).await;
        assert!(matches!(
            result,
            Err(UpstreamError::Connection(_)) | Err(UpstreamError::HttpClient(_))
        ));
    }
}
