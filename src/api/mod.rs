//! HTTP client for the remote fleet induction API.
//!
//! One method per remote operation, each a single synchronous round trip
//! via `ureq`. Failures are terminal for that call — no retries, no
//! backoff. Non-success responses carrying a JSON `{"error": ...}` body
//! surface the server's message; anything else surfaces the HTTP status.

pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use types::{Analysis, OptimizationResult, RankedTrain, Schedule, Train};

// ---------------------------------------------------------------------------
// Trait seam
// ---------------------------------------------------------------------------

/// The remote operations the dashboard consumes.
///
/// The controller is generic over this trait so its behavior (validation
/// short-circuits, fallbacks, modal composition) can be tested against a
/// stub without a server.
pub trait FleetApi {
    fn list_trains(&self) -> Result<Vec<Train>>;
    fn list_schedules(&self) -> Result<Vec<Schedule>>;
    fn create_schedule(&self, request: &ScheduleRequest) -> Result<Schedule>;
    fn optimize(&self, date: &str) -> Result<OptimizationResult>;
    fn train_details(&self, train_id: &str) -> Result<Train>;
    fn compute_analysis(&self, train_id: &str) -> Result<Analysis>;
    fn rank_trains(&self) -> Result<Vec<RankedTrain>>;
}

/// Request body for `POST /schedule`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub train_id: String,
    pub station: String,
    pub route: String,
    pub date: String,
    pub time: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous HTTP client bound to one resolved API base URL.
///
/// Built from the startup-resolved [`ApiConfig`] and reused for the
/// lifetime of the invocation.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client from the resolved config.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    /// The base URL this client was resolved against, for display.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Cheap reachability probe for health checks: `GET /trains` with a
    /// short timeout, success meaning any well-formed response.
    pub fn is_reachable(&self) -> bool {
        let url = format!("{}/trains", self.base_url);
        ureq::get(&url)
            .timeout(Duration::from_secs(5))
            .call()
            .is_ok()
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = ureq::get(&url)
            .timeout(self.timeout)
            .call()
            .map_err(unwrap_server_error)
            .with_context(|| format!("GET {path} failed"))?;

        response
            .into_json()
            .with_context(|| format!("GET {path} returned a malformed body"))
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = ureq::post(&url)
            .timeout(self.timeout)
            .send_json(body)
            .map_err(unwrap_server_error)
            .with_context(|| format!("POST {path} failed"))?;

        response
            .into_json()
            .with_context(|| format!("POST {path} returned a malformed body"))
    }
}

/// Convert a `ureq` error into one carrying the server's `{"error"}` message
/// when a non-success response included one.
fn unwrap_server_error(err: ureq::Error) -> anyhow::Error {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match err {
        ureq::Error::Status(code, response) => match response.into_json::<ErrorBody>() {
            Ok(body) => anyhow::anyhow!(body.error),
            Err(_) => anyhow::anyhow!("HTTP {code}"),
        },
        other => anyhow::Error::new(other),
    }
}

impl FleetApi for ApiClient {
    fn list_trains(&self) -> Result<Vec<Train>> {
        self.get_json("/trains")
    }

    fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.get_json("/schedules")
    }

    fn create_schedule(&self, request: &ScheduleRequest) -> Result<Schedule> {
        self.post_json("/schedule", request)
    }

    fn optimize(&self, date: &str) -> Result<OptimizationResult> {
        self.post_json("/ai/optimize", &serde_json::json!({ "date": date }))
    }

    fn train_details(&self, train_id: &str) -> Result<Train> {
        self.get_json(&format!("/trains/{train_id}/details"))
    }

    fn compute_analysis(&self, train_id: &str) -> Result<Analysis> {
        self.post_json("/compute", &serde_json::json!({ "trainId": train_id }))
    }

    fn rank_trains(&self) -> Result<Vec<RankedTrain>> {
        self.post_json("/rank", &serde_json::json!({}))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FleetboardConfig;

    #[test]
    fn client_from_resolved_config() {
        let config = FleetboardConfig::default().resolve_api("localhost");
        let client = ApiClient::new(&config);
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn client_strips_trailing_slash() {
        let mut config = FleetboardConfig::default().resolve_api("localhost");
        config.base_url.push('/');
        let client = ApiClient::new(&config);
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn schedule_request_serializes_camel_case() {
        let request = ScheduleRequest {
            train_id: "KMTR-045".to_string(),
            station: "Aluva".to_string(),
            route: "Blue Line".to_string(),
            date: "2024-12-20".to_string(),
            time: "06:00".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["trainId"], "KMTR-045");
        assert_eq!(json["station"], "Aluva");
    }
}
