//! Pure HTML-fragment renderers for the web dashboard.
//!
//! Each function maps already-fetched API records to a markup fragment for
//! one page region. No I/O, no state — the controller decides what to fetch
//! and where the fragment lands. All dynamic text is HTML-escaped; all
//! percentages arrive pre-rounded from [`crate::metrics`] or the API.

use std::fmt::Write;

use crate::api::types::{
    Analysis, OptimizationResult, RankedTrain, Schedule, Status, Train,
};
use crate::metrics::{AiMetrics, ConflictMetrics, FleetMetrics};

// ---------------------------------------------------------------------------
// Train selector
// ---------------------------------------------------------------------------

/// Fallback train identifiers used when the train-list call fails, so the
/// schedule form stays usable offline. `true` marks the set parked in the
/// inspection bay line.
pub const FALLBACK_TRAINS: [(&str, bool); 5] = [
    ("KMTR-045", false),
    ("KMTR-102", false),
    ("KMTR-221", false),
    ("KMTR-310", true),
    ("KMTR-412", false),
];

/// Option list for the train selector, built from live API records.
///
/// Always starts with a blank "Select Train" placeholder; sets in the IBL
/// get an " (IBL)" suffix but stay selectable.
pub fn train_options(trains: &[Train]) -> String {
    let mut html = String::from(r#"<option value="">Select Train</option>"#);
    for train in trains {
        push_option(&mut html, &train.train_id, train.in_ibl);
    }
    html
}

/// Hard-coded option list used before the network answers and whenever the
/// train-list call fails.
pub fn fallback_train_options() -> String {
    let mut html = String::from(r#"<option value="">Select Train</option>"#);
    for (id, in_ibl) in FALLBACK_TRAINS {
        push_option(&mut html, id, in_ibl);
    }
    html
}

fn push_option(html: &mut String, id: &str, in_ibl: bool) {
    let suffix = if in_ibl { " (IBL)" } else { "" };
    let id = escape(id);
    let _ = write!(html, r#"<option value="{id}">{id}{suffix}</option>"#);
}

// ---------------------------------------------------------------------------
// Schedule table
// ---------------------------------------------------------------------------

/// Table rows for the schedule list (`<tbody>` content).
pub fn schedule_table(schedules: &[Schedule]) -> String {
    let mut html = String::new();
    for schedule in schedules {
        let status = Status::from_score(schedule.score);
        let status_text = if schedule.recommendation.is_empty() {
            status.label()
        } else {
            schedule.recommendation.as_str()
        };
        let conflict_badge = if schedule.conflicts.is_empty() {
            String::new()
        } else {
            format!(
                r#" <span class="conflict-badge">{} conflicts</span>"#,
                schedule.conflicts.len()
            )
        };

        let _ = write!(
            html,
            "<tr>\
             <td>{train}</td><td>{station}</td><td>{route}</td>\
             <td>{date}</td><td>{time}</td>\
             <td class=\"{class}\">{score}%</td>\
             <td>{status_text}{conflict_badge}</td>\
             <td><button class=\"btn-small\" data-train=\"{train}\">Details</button></td>\
             </tr>",
            train = escape(&schedule.train_id),
            station = escape(&schedule.station),
            route = escape(&schedule.route),
            date = escape(&schedule.date),
            time = escape(&schedule.time),
            class = status.css_class(),
            score = schedule.score,
            status_text = escape(status_text),
        );
    }
    html
}

// ---------------------------------------------------------------------------
// Schedule result card
// ---------------------------------------------------------------------------

/// Result card shown after a schedule is created.
pub fn schedule_result(schedule: &Schedule) -> String {
    let status = Status::from_score(schedule.score);

    let mut breakdown = String::new();
    for (factor, value) in &schedule.breakdown {
        let _ = write!(
            breakdown,
            r#"<span class="breakdown-item">{}: {}%</span>"#,
            escape(factor),
            value
        );
    }

    format!(
        r#"<div class="result-card">
  <div class="result-header">
    <h4>{train} - {station}</h4>
    <div class="ai-score {class}">AI Score: {score}%</div>
  </div>
  <div class="result-details">
    <p><strong>Route:</strong> {route}</p>
    <p><strong>Date:</strong> {date} at {time}</p>
    <p><strong>Recommendation:</strong> {recommendation}</p>
    <div class="breakdown">{breakdown}</div>
  </div>
  {conflicts}
</div>"#,
        train = escape(&schedule.train_id),
        station = escape(&schedule.station),
        class = status.css_class(),
        score = schedule.score,
        route = escape(&schedule.route),
        date = escape(&schedule.date),
        time = escape(&schedule.time),
        recommendation = escape(&schedule.recommendation),
        breakdown = breakdown,
        conflicts = conflicts_section(&schedule.conflicts),
    )
}

/// Conflicts list, or the explicit no-conflicts marker.
fn conflicts_section(conflicts: &[String]) -> String {
    if conflicts.is_empty() {
        return r#"<div class="no-conflicts">No conflicts detected</div>"#.to_string();
    }

    let items: String = conflicts
        .iter()
        .map(|c| format!("<li>{}</li>", escape(c)))
        .collect();
    format!(
        r#"<div class="conflicts-section"><h4>Conflicts Detected</h4><ul>{items}</ul></div>"#
    )
}

// ---------------------------------------------------------------------------
// Fleet optimization
// ---------------------------------------------------------------------------

/// Summary statistics plus the ranked recommendation list.
///
/// Rank is the 1-based position in the server's response — the server
/// already ordered the list and this layer never re-sorts it.
pub fn optimization_results(result: &OptimizationResult) -> String {
    let mut html = format!(
        r#"<div class="optimization-summary">
  <h3>AI Fleet Optimization Results for {date}</h3>
  <div class="summary-stats">
    <div class="stat"><span class="stat-number">{total}</span><span class="stat-label">Total Trains</span></div>
    <div class="stat"><span class="stat-number">{available}</span><span class="stat-label">Available</span></div>
    <div class="stat"><span class="stat-number">{optimal}</span><span class="stat-label">Optimal</span></div>
    <div class="stat"><span class="stat-number">{good}</span><span class="stat-label">Good</span></div>
  </div>
</div>
<div class="recommendations">"#,
        date = escape(&result.date),
        total = result.total_trains,
        available = result.available_trains,
        optimal = result.summary.optimal,
        good = result.summary.good,
    );

    for (index, rec) in result.recommendations.iter().enumerate() {
        let conflicts = if rec.conflicts.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="conflicts">{}</div>"#,
                escape(&rec.conflicts.join(", "))
            )
        };
        let _ = write!(
            html,
            r#"<div class="recommendation-item {class}">
  <div class="rank">#{rank}</div>
  <div class="train-info"><strong>{train}</strong><span class="score">{score}%</span></div>
  <div class="recommendation">{recommendation}</div>
  {conflicts}
</div>"#,
            class = Status::from_score(rec.score).css_class(),
            rank = index + 1,
            train = escape(&rec.train_id),
            score = rec.score,
            recommendation = escape(&rec.recommendation),
            conflicts = conflicts,
        );
    }

    html.push_str("</div>");
    html
}

/// Fleet-wide rank list from `POST /rank`, displayed in server order.
pub fn ranked_trains(ranked: &[RankedTrain]) -> String {
    let mut html = String::from(r#"<div class="recommendations">"#);
    for (index, entry) in ranked.iter().enumerate() {
        let ibl = if entry.in_ibl { " (IBL)" } else { "" };
        let conflicts = if entry.conflicts.is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="conflicts">{}</div>"#,
                escape(&entry.conflicts.join(", "))
            )
        };
        let _ = write!(
            html,
            r#"<div class="recommendation-item {class}">
  <div class="rank">#{rank}</div>
  <div class="train-info"><strong>{train}{ibl}</strong><span class="score">{score}%</span></div>
  <div class="recommendation">{recommendation}</div>
  {conflicts}
</div>"#,
            class = Status::from_score(entry.score).css_class(),
            rank = index + 1,
            train = escape(&entry.train_id),
            ibl = ibl,
            score = entry.score,
            recommendation = escape(&entry.recommendation),
            conflicts = conflicts,
        );
    }
    html.push_str("</div>");
    html
}

// ---------------------------------------------------------------------------
// Analytics panels
// ---------------------------------------------------------------------------

/// Fleet availability metric block.
pub fn fleet_metrics(metrics: &FleetMetrics) -> String {
    format!(
        r#"<div class="metric">Total Trains: <strong>{}</strong></div>
<div class="metric">Available: <strong>{}</strong></div>
<div class="metric">In IBL: <strong>{}</strong></div>
<div class="metric">Utilization: <strong>{}%</strong></div>"#,
        metrics.total, metrics.available, metrics.in_ibl, metrics.utilization_pct
    )
}

/// AI score metric block; `None` means there are no schedules yet.
pub fn ai_metrics(metrics: Option<&AiMetrics>) -> String {
    let Some(metrics) = metrics else {
        return r#"<div class="metric">No schedules yet</div>"#.to_string();
    };

    format!(
        r#"<div class="metric">Avg AI Score: <strong>{}%</strong></div>
<div class="metric">Optimal: <strong>{}</strong></div>
<div class="metric">Good: <strong>{}</strong></div>
<div class="metric">Total Scheduled: <strong>{}</strong></div>"#,
        metrics.avg_score, metrics.optimal, metrics.good, metrics.total
    )
}

/// Conflict metric block.
pub fn conflict_metrics(metrics: &ConflictMetrics) -> String {
    format!(
        r#"<div class="metric">Total Conflicts: <strong>{}</strong></div>
<div class="metric">Affected Schedules: <strong>{}</strong></div>
<div class="metric">Conflict Rate: <strong>{}%</strong></div>"#,
        metrics.total_conflicts, metrics.affected_schedules, metrics.rate_pct
    )
}

/// The whole analytics tab: three titled metric cards.
pub fn analytics_panel(
    fleet: &FleetMetrics,
    ai: Option<&AiMetrics>,
    conflicts: &ConflictMetrics,
) -> String {
    format!(
        r#"<div class="metric-card"><h3>Fleet Status</h3>{}</div>
<div class="metric-card"><h3>AI Performance</h3>{}</div>
<div class="metric-card"><h3>Conflicts</h3>{}</div>"#,
        fleet_metrics(fleet),
        ai_metrics(ai),
        conflict_metrics(conflicts),
    )
}

// ---------------------------------------------------------------------------
// Train detail modal
// ---------------------------------------------------------------------------

/// Modal body for one train: operational details plus the AI analysis.
///
/// Rendered only after *both* the detail fetch and the analysis fetch have
/// succeeded — the controller never calls this with partial data.
pub fn train_detail_modal(train: &Train, analysis: &Analysis) -> String {
    let mut certs = String::new();
    for (cert_type, expiry) in &train.fitness_certs {
        let _ = write!(certs, "<li>{}: {}</li>", escape(cert_type), escape(expiry));
    }

    let mut bars = String::new();
    for (factor, value) in &analysis.breakdown {
        let _ = write!(
            bars,
            r#"<div class="breakdown-bar"><span>{factor}</span><div class="bar"><div class="fill" style="width: {value}%"></div></div><span>{value}%</span></div>"#,
            factor = escape(factor),
            value = value,
        );
    }

    let conflicts = if analysis.conflicts.is_empty() {
        String::new()
    } else {
        let items: String = analysis
            .conflicts
            .iter()
            .map(|c| format!("<li>{}</li>", escape(c)))
            .collect();
        format!(r#"<div class="conflicts"><strong>Conflicts:</strong><ul>{items}</ul></div>"#)
    };

    format!(
        r#"<div class="train-overview">
  <h3>{train} - {availability}</h3>
  <div class="ai-score {class}">AI Score: {score}%</div>
</div>
<div class="details-grid">
  <div class="detail-section">
    <h4>Fitness Certificates</h4>
    <ul>{certs}</ul>
  </div>
  <div class="detail-section">
    <h4>Maintenance</h4>
    <p>Open Job Cards: {job_cards}</p>
    <p>Last Cleaning: {cleaning}</p>
    <p>Stabling Bay: {bay}</p>
  </div>
  <div class="detail-section">
    <h4>Mileage &amp; Branding</h4>
    <p>Current: {mileage} km</p>
    <p>Target: {target} km</p>
    <p>Advertiser: {advertiser}</p>
  </div>
</div>
<div class="ai-breakdown">
  <h4>AI Analysis Breakdown</h4>
  {bars}
</div>
<div class="recommendation">
  <h4>AI Recommendation</h4>
  <p>{recommendation}</p>
  {conflicts}
</div>"#,
        train = escape(&train.train_id),
        availability = if train.in_ibl { "In IBL" } else { "Available" },
        class = Status::from_score(analysis.score).css_class(),
        score = analysis.score,
        certs = certs,
        job_cards = train.open_job_cards,
        cleaning = escape(&train.last_cleaning),
        bay = escape(&train.stabling_bay),
        mileage = train.last_mileage,
        target = train.mileage_target,
        advertiser = escape(&train.branding_contract.advertiser),
        bars = bars,
        recommendation = escape(&analysis.recommendation),
        conflicts = conflicts,
    )
}

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Minimal HTML escaping for text interpolated into fragments.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_options_are_five_plus_placeholder() {
        let html = fallback_train_options();
        assert_eq!(html.matches("<option").count(), 6);
        assert!(html.starts_with(r#"<option value="">Select Train</option>"#));
        assert!(html.contains(r#"<option value="KMTR-310">KMTR-310 (IBL)</option>"#));
        // Every fallback value is non-empty and selectable.
        for (id, _) in FALLBACK_TRAINS {
            assert!(html.contains(&format!(r#"value="{id}""#)));
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>"a" & 'b'</script>"#),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn no_conflicts_marker_when_list_is_empty() {
        assert!(conflicts_section(&[]).contains("No conflicts detected"));
        let listed = conflicts_section(&["Train in IBL - maintenance required".to_string()]);
        assert!(listed.contains("<li>Train in IBL - maintenance required</li>"));
    }
}
