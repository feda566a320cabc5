//! CLI command implementations for the fleetboard terminal surface.
//!
//! Provides subcommand handlers for:
//! - `fleetboard trains` — fleet roster
//! - `fleetboard schedules` — current induction schedules
//! - `fleetboard schedule` — create a schedule and show its AI result
//! - `fleetboard optimize` — fleet-wide AI optimization for a date
//! - `fleetboard rank` — fleet-wide train ranking
//! - `fleetboard details <train>` — one train's record plus AI analysis
//! - `fleetboard analytics` — fleet/AI/conflict metric summary
//! - `fleetboard health` — config and API reachability check
//!
//! Every command is user-initiated, so failures surface directly instead of
//! being swallowed into a log line.

use anyhow::Result;
use colored::Colorize;

use crate::api::types::{RankedTrain, Schedule, Status};
use crate::api::{ApiClient, FleetApi};
use crate::config::{self, Environment, FleetboardConfig};
use crate::controller::ScheduleForm;
use crate::metrics::{AiMetrics, ConflictMetrics, FleetMetrics};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// fleetboard trains
// ---------------------------------------------------------------------------

/// List the fleet roster.
pub fn run_trains(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let trains = client.list_trains()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&trains)?);
        return Ok(());
    }

    println!("{}", "Fleet Roster".bold().cyan());
    println!("{}", "=".repeat(72));
    println!(
        "  {:<10} {:<10} {:>9} {:>9} {:>9} {:<6} Advertiser",
        "Train", "Status", "Open Jobs", "Mileage", "Target", "Bay"
    );
    println!("  {}", "-".repeat(70));

    for train in &trains {
        let status = if train.in_ibl {
            "IBL".yellow()
        } else {
            "Available".green()
        };
        println!(
            "  {:<10} {:<10} {:>9} {:>9} {:>9} {:<6} {}",
            train.train_id,
            status,
            train.open_job_cards,
            train.last_mileage,
            train.mileage_target,
            train.stabling_bay,
            train.branding_contract.advertiser,
        );
    }

    println!();
    let metrics = FleetMetrics::from_trains(&trains);
    println!(
        "  {} available of {} ({}% utilization)",
        metrics.available, metrics.total, metrics.utilization_pct
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// fleetboard schedules
// ---------------------------------------------------------------------------

/// List the current induction schedules.
pub fn run_schedules(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let schedules = client.list_schedules()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&schedules)?);
        return Ok(());
    }

    if schedules.is_empty() {
        println!("{}", "No schedules yet.".yellow());
        return Ok(());
    }

    print_schedule_table(&schedules);
    Ok(())
}

fn print_schedule_table(schedules: &[Schedule]) {
    println!("{}", "Induction Schedules".bold().cyan());
    println!("{}", "=".repeat(78));
    println!(
        "  {:<10} {:<14} {:<12} {:<12} {:<7} {:>6} Status",
        "Train", "Station", "Route", "Date", "Time", "Score"
    );
    println!("  {}", "-".repeat(76));

    for schedule in schedules {
        let status_text = if schedule.recommendation.is_empty() {
            Status::from_score(schedule.score).label().to_string()
        } else {
            schedule.recommendation.clone()
        };
        let conflicts = if schedule.conflicts.is_empty() {
            String::new()
        } else {
            format!(" [{} conflicts]", schedule.conflicts.len())
        };
        println!(
            "  {:<10} {:<14} {:<12} {:<12} {:<7} {:>5}% {}{}",
            schedule.train_id,
            schedule.station,
            schedule.route,
            schedule.date,
            schedule.time,
            colorize_score(schedule.score),
            status_text,
            conflicts.yellow(),
        );
    }
}

// ---------------------------------------------------------------------------
// fleetboard schedule
// ---------------------------------------------------------------------------

/// Create a schedule, then show the AI result card and the refreshed table.
pub fn run_schedule(client: &ApiClient, form: &ScheduleForm) -> Result<()> {
    if let Err(message) = form.validate() {
        println!("{}", message.yellow());
        return Ok(());
    }

    let schedule = client.create_schedule(&form.to_request())?;

    println!("{}", "Schedule Created".bold().cyan());
    println!("{}", "=".repeat(50));
    println!(
        "  {} {} - {}",
        "Train:         ".bold(),
        schedule.train_id,
        schedule.station
    );
    println!("  {} {}", "Route:         ".bold(), schedule.route);
    println!(
        "  {} {} at {}",
        "Date:          ".bold(),
        schedule.date,
        schedule.time
    );
    println!(
        "  {} {}% ({})",
        "AI Score:      ".bold(),
        colorize_score(schedule.score),
        Status::from_score(schedule.score).label(),
    );
    println!(
        "  {} {}",
        "Recommendation:".bold(),
        schedule.recommendation
    );
    if !schedule.breakdown.is_empty() {
        let factors: Vec<String> = schedule
            .breakdown
            .iter()
            .map(|(factor, value)| format!("{factor}: {value}%"))
            .collect();
        println!("  {} {}", "Breakdown:     ".bold(), factors.join("  "));
    }
    print_conflicts(&schedule.conflicts);

    // Mirror the dashboard flow: a successful submit re-renders the table.
    println!();
    match client.list_schedules() {
        Ok(schedules) => print_schedule_table(&schedules),
        Err(err) => log::warn!("failed to refresh schedules: {err:#}"),
    }

    Ok(())
}

fn print_conflicts(conflicts: &[String]) {
    if conflicts.is_empty() {
        println!("  {} {}", "Conflicts:     ".bold(), "none".green());
    } else {
        println!("  {}", "Conflicts:".bold());
        for conflict in conflicts {
            println!("    {} {}", "!".red().bold(), conflict);
        }
    }
}

// ---------------------------------------------------------------------------
// fleetboard optimize
// ---------------------------------------------------------------------------

/// Run fleet-wide AI optimization for a target date.
pub fn run_optimize(client: &ApiClient, date: &str, format: OutputFormat) -> Result<()> {
    let result = client.optimize(date)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("AI Fleet Optimization — {}", result.date)
            .bold()
            .cyan()
    );
    println!("{}", "=".repeat(60));
    println!(
        "  Total: {}  Available: {}  Optimal: {}  Good: {}",
        result.total_trains,
        result.available_trains,
        result.summary.optimal.to_string().green(),
        result.summary.good,
    );
    println!();

    for (index, rec) in result.recommendations.iter().enumerate() {
        println!(
            "  #{:<3} {:<10} {:>5}%  {}",
            index + 1,
            rec.train_id,
            colorize_score(rec.score),
            rec.recommendation,
        );
        if !rec.conflicts.is_empty() {
            println!("       {}", rec.conflicts.join(", ").yellow());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// fleetboard rank
// ---------------------------------------------------------------------------

/// Show the fleet-wide train ranking.
pub fn run_rank(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let ranked = client.rank_trains()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    println!("{}", "Fleet Ranking".bold().cyan());
    println!("{}", "=".repeat(60));
    for (index, entry) in ranked.iter().enumerate() {
        print_ranked_train(index, entry);
    }

    Ok(())
}

fn print_ranked_train(index: usize, entry: &RankedTrain) {
    let ibl = if entry.in_ibl { " (IBL)" } else { "" };
    println!(
        "  #{:<3} {:<16} {:>5}%  {}",
        index + 1,
        format!("{}{}", entry.train_id, ibl),
        colorize_score(entry.score),
        entry.recommendation,
    );
    if !entry.conflicts.is_empty() {
        println!("       {}", entry.conflicts.join(", ").yellow());
    }
}

// ---------------------------------------------------------------------------
// fleetboard details
// ---------------------------------------------------------------------------

/// Show one train's record plus its AI analysis.
///
/// Both round trips must succeed before anything is printed — matching the
/// dashboard modal, which never opens on partial data.
pub fn run_details(client: &ApiClient, train_id: &str) -> Result<()> {
    let train = client.train_details(train_id)?;
    let analysis = client.compute_analysis(train_id)?;

    let availability = if train.in_ibl {
        "In IBL".yellow()
    } else {
        "Available".green()
    };
    println!(
        "{} — {}",
        train.train_id.bold().cyan(),
        availability
    );
    println!("{}", "=".repeat(50));
    println!(
        "  {} {}% ({})",
        "AI Score:    ".bold(),
        colorize_score(analysis.score),
        Status::from_score(analysis.score).label(),
    );

    println!("  {}", "Fitness Certificates:".bold());
    for (cert_type, expiry) in &train.fitness_certs {
        println!("    {cert_type}: {expiry}");
    }

    println!("  {}", "Maintenance:".bold());
    println!("    Open job cards: {}", train.open_job_cards);
    println!("    Last cleaning:  {}", train.last_cleaning);
    println!("    Stabling bay:   {}", train.stabling_bay);

    println!("  {}", "Mileage & Branding:".bold());
    println!("    Current: {} km", train.last_mileage);
    println!("    Target:  {} km", train.mileage_target);
    println!("    Advertiser: {}", train.branding_contract.advertiser);

    println!("  {}", "AI Breakdown:".bold());
    for (factor, value) in &analysis.breakdown {
        println!("    {:<10} {:>3}%  {}", factor, value, bar(*value));
    }

    println!(
        "  {} {}",
        "Recommendation:".bold(),
        analysis.recommendation
    );
    print_conflicts(&analysis.conflicts);

    Ok(())
}

/// Ten-segment bar for a 0–100 percentage.
fn bar(value: u8) -> String {
    let filled = (usize::from(value) + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)))
}

// ---------------------------------------------------------------------------
// fleetboard analytics
// ---------------------------------------------------------------------------

/// Show the fleet/AI/conflict metric summary.
pub fn run_analytics(client: &ApiClient) -> Result<()> {
    let trains = client.list_trains()?;
    let schedules = client.list_schedules()?;

    let fleet = FleetMetrics::from_trains(&trains);
    let ai = AiMetrics::from_schedules(&schedules);
    let conflicts = ConflictMetrics::from_schedules(&schedules);

    println!("{}", "Fleet Analytics".bold().cyan());
    println!("{}", "=".repeat(40));

    println!("  {}", "Fleet Status".bold());
    println!("    Total trains: {}", fleet.total);
    println!("    Available:    {}", fleet.available);
    println!("    In IBL:       {}", fleet.in_ibl);
    println!("    Utilization:  {}%", fleet.utilization_pct);

    println!("  {}", "AI Performance".bold());
    match ai {
        Some(ai) => {
            println!("    Avg AI score: {}%", ai.avg_score);
            println!("    Optimal:      {}", ai.optimal);
            println!("    Good:         {}", ai.good);
            println!("    Scheduled:    {}", ai.total);
        }
        None => println!("    {}", "No schedules yet".yellow()),
    }

    println!("  {}", "Conflicts".bold());
    println!("    Total conflicts:    {}", conflicts.total_conflicts);
    println!("    Affected schedules: {}", conflicts.affected_schedules);
    println!("    Conflict rate:      {}%", conflicts.rate_pct);

    Ok(())
}

// ---------------------------------------------------------------------------
// fleetboard health
// ---------------------------------------------------------------------------

/// Check configuration and API reachability.
pub fn run_health(config: &FleetboardConfig, client: &ApiClient) -> Result<()> {
    println!("{}", "Fleetboard Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.fleetboard/config.toml found"
        } else {
            "not found (defaults apply)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".fleetboard.toml found"
        } else {
            "none (optional)"
        },
    );

    let environment = Environment::detect(&config.web.host);
    let overridden = config.api.base.is_some();
    print_health_item(
        "Environment",
        true,
        &if overridden {
            format!("{environment} (explicit api.base override)")
        } else {
            environment.to_string()
        },
    );
    print_health_item("API base", true, client.base_url());

    let reachable = client.is_reachable();
    print_health_item(
        "Fleet API",
        reachable,
        if reachable {
            "reachable"
        } else {
            "not reachable — is the server running?"
        },
    );

    print_health_item("Dashboard", true, &config.web.addr());

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Colorize a score by its display tier.
fn colorize_score(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    match Status::from_score(score) {
        Status::Optimal => text.green(),
        Status::Good => text.cyan(),
        Status::Caution => text.yellow(),
        Status::Avoid => text.red(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
