//! Pure aggregation over API records for the analytics panels.
//!
//! Nothing here talks to the network — each struct is derived from a slice
//! of already-fetched records, then handed to a renderer or CLI printer.
//! All percentages are rounded to the nearest integer before display.

use crate::api::types::{Schedule, Train};

// ---------------------------------------------------------------------------
// Fleet metrics
// ---------------------------------------------------------------------------

/// Fleet availability summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetMetrics {
    pub total: usize,
    pub available: usize,
    pub in_ibl: usize,
    /// `round(available / total × 100)`; 0 for an empty fleet.
    pub utilization_pct: u32,
}

impl FleetMetrics {
    pub fn from_trains(trains: &[Train]) -> Self {
        let total = trains.len();
        let available = trains.iter().filter(|t| !t.in_ibl).count();
        Self {
            total,
            available,
            in_ibl: total - available,
            utilization_pct: pct(available, total),
        }
    }
}

// ---------------------------------------------------------------------------
// AI score metrics
// ---------------------------------------------------------------------------

/// Aggregate AI score summary over the current schedules.
///
/// `from_schedules` returns `None` for an empty input; the renderers show a
/// "no schedules yet" marker instead of zeroed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMetrics {
    pub total: usize,
    /// `round(mean(score))`.
    pub avg_score: u32,
    pub optimal: usize,
    pub good: usize,
}

impl AiMetrics {
    pub fn from_schedules(schedules: &[Schedule]) -> Option<Self> {
        if schedules.is_empty() {
            return None;
        }

        let sum: u32 = schedules.iter().map(|s| u32::from(s.score)).sum();
        let avg_score = (f64::from(sum) / schedules.len() as f64).round() as u32;
        let optimal = schedules.iter().filter(|s| s.score >= 80).count();
        let good = schedules
            .iter()
            .filter(|s| s.score >= 60 && s.score < 80)
            .count();

        Some(Self {
            total: schedules.len(),
            avg_score,
            optimal,
            good,
        })
    }
}

// ---------------------------------------------------------------------------
// Conflict metrics
// ---------------------------------------------------------------------------

/// Conflict summary over the current schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMetrics {
    pub total_conflicts: usize,
    pub affected_schedules: usize,
    /// `round(affected / total × 100)`; defined as 0 when there are no
    /// schedules at all.
    pub rate_pct: u32,
}

impl ConflictMetrics {
    pub fn from_schedules(schedules: &[Schedule]) -> Self {
        let total_conflicts = schedules.iter().map(|s| s.conflicts.len()).sum();
        let affected_schedules = schedules.iter().filter(|s| !s.conflicts.is_empty()).count();
        Self {
            total_conflicts,
            affected_schedules,
            rate_pct: pct(affected_schedules, schedules.len()),
        }
    }
}

/// Integer-rounded percentage with a zero-total guard.
fn pct(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
