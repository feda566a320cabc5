//! Wire types for the remote fleet induction API.
//!
//! Every record here is produced by the server and merely displayed by this
//! client. Field names follow the API's camelCase JSON; maps use `BTreeMap`
//! so rendered output is stable across calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trains
// ---------------------------------------------------------------------------

/// A train set as reported by `GET /trains` and `GET /trains/{id}/details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    pub train_id: String,
    /// In the Inspection Bay Line — unavailable for service.
    #[serde(rename = "inIBL", default)]
    pub in_ibl: bool,
    /// Certificate type → expiry date (`YYYY-MM-DD`).
    pub fitness_certs: BTreeMap<String, String>,
    pub open_job_cards: u32,
    pub last_cleaning: String,
    pub stabling_bay: String,
    /// Kilometres.
    pub last_mileage: i64,
    /// Kilometres.
    pub mileage_target: i64,
    pub branding_contract: BrandingContract,
    /// Cars per set. Not rendered by the dashboard.
    #[serde(default)]
    pub set_size: Option<u32>,
    /// Open job card identifiers. Not rendered; `open_job_cards` carries the
    /// displayed count.
    #[serde(default)]
    pub job_cards: Vec<String>,
}

/// Advertising contract attached to a train.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingContract {
    pub advertiser: String,
    #[serde(default)]
    pub hours_required: u32,
    #[serde(default)]
    pub hours_completed: u32,
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// A scheduled induction as reported by `GET /schedules` and returned by
/// `POST /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub id: Option<String>,
    pub train_id: String,
    pub station: String,
    pub route: String,
    pub date: String,
    pub time: String,
    /// 0–100, computed server-side.
    pub score: u8,
    pub recommendation: String,
    /// Factor name → contribution percentage.
    #[serde(default)]
    pub breakdown: BTreeMap<String, u8>,
    /// Conflict descriptions; empty means clean.
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// AI optimization
// ---------------------------------------------------------------------------

/// Result of `POST /ai/optimize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub date: String,
    pub total_trains: u32,
    pub available_trains: u32,
    pub summary: OptimizationSummary,
    /// Already ranked by the server; displayed in order, never re-sorted.
    pub recommendations: Vec<TrainRecommendation>,
}

/// Tier counts within an optimization result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub optimal: u32,
    pub good: u32,
    #[serde(default)]
    pub caution: u32,
    #[serde(default)]
    pub avoid: u32,
}

/// One per-train entry in an optimization result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRecommendation {
    pub train_id: String,
    pub score: u8,
    pub recommendation: String,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

/// Result of `POST /compute` for a single train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub score: u8,
    pub recommendation: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, u8>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

/// One element of the `POST /rank` response: a train scored in fleet-wide
/// rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTrain {
    pub train_id: String,
    pub score: u8,
    pub recommendation: String,
    #[serde(default)]
    pub breakdown: BTreeMap<String, u8>,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(rename = "inIBL", default)]
    pub in_ibl: bool,
}

// ---------------------------------------------------------------------------
// Score classification
// ---------------------------------------------------------------------------

/// Display tier for an AI score.
///
/// The score itself is opaque to this client; the only interpretation it is
/// ever given is this four-tier classification, with closed lower bounds:
/// ≥80 Optimal, ≥60 Good, ≥40 Caution, below that Avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Good,
    Caution,
    Avoid,
}

impl Status {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Optimal
        } else if score >= 60 {
            Self::Good
        } else if score >= 40 {
            Self::Caution
        } else {
            Self::Avoid
        }
    }

    /// Human-readable tier name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Good => "Good",
            Self::Caution => "Caution",
            Self::Avoid => "Avoid",
        }
    }

    /// CSS class used by the HTML renderers.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Optimal => "status-optimal",
            Self::Good => "status-good",
            Self::Caution => "status-caution",
            Self::Avoid => "status-avoid",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tier_boundaries() {
        assert_eq!(Status::from_score(100), Status::Optimal);
        assert_eq!(Status::from_score(80), Status::Optimal);
        assert_eq!(Status::from_score(79), Status::Good);
        assert_eq!(Status::from_score(60), Status::Good);
        assert_eq!(Status::from_score(59), Status::Caution);
        assert_eq!(Status::from_score(40), Status::Caution);
        assert_eq!(Status::from_score(39), Status::Avoid);
        assert_eq!(Status::from_score(0), Status::Avoid);
    }

    #[test]
    fn train_deserializes_from_api_shape() {
        let json = r#"{
            "trainId": "KMTR-045", "setSize": 4, "lastMileage": 1200, "inIBL": false,
            "fitnessCerts": {"rolling": "2024-12-25", "signalling": "2024-12-20"},
            "jobCards": ["JC-001", "JC-045"], "openJobCards": 2,
            "brandingContract": {"advertiser": "Coca-Cola", "hoursRequired": 8, "hoursCompleted": 3},
            "mileageTarget": 1500, "lastCleaning": "2024-12-15", "stablingBay": "A1"
        }"#;
        let train: Train = serde_json::from_str(json).unwrap();
        assert_eq!(train.train_id, "KMTR-045");
        assert!(!train.in_ibl);
        assert_eq!(train.open_job_cards, 2);
        assert_eq!(train.fitness_certs.len(), 2);
        assert_eq!(train.branding_contract.advertiser, "Coca-Cola");
        assert_eq!(train.set_size, Some(4));
    }

    #[test]
    fn schedule_tolerates_missing_optional_fields() {
        let json = r#"{
            "trainId": "KMTR-102", "station": "Aluva", "route": "Blue Line",
            "date": "2024-12-20", "time": "06:00",
            "score": 85, "recommendation": "PRIORITY - Optimal for immediate induction"
        }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert!(schedule.conflicts.is_empty());
        assert!(schedule.breakdown.is_empty());
        assert!(schedule.id.is_none());
    }

    #[test]
    fn schedule_missing_score_is_a_shape_violation() {
        let json = r#"{"trainId": "KMTR-102", "station": "Aluva", "route": "Blue Line",
                       "date": "2024-12-20", "time": "06:00"}"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }

    #[test]
    fn optimization_result_deserializes() {
        let json = r#"{
            "date": "2024-12-20", "totalTrains": 5, "availableTrains": 4,
            "summary": {"optimal": 2, "good": 1, "caution": 1, "avoid": 0},
            "recommendations": [
                {"trainId": "KMTR-102", "score": 91, "recommendation": "PRIORITY", "conflicts": []}
            ]
        }"#;
        let result: OptimizationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.summary.optimal, 2);
        assert_eq!(result.recommendations[0].score, 91);
    }
}
