use anyhow::Result;
use clap::{Parser, Subcommand};

use fleetboard::api::ApiClient;
use fleetboard::cli::{self, OutputFormat};
use fleetboard::config;
use fleetboard::controller::{ScheduleForm, today};
use fleetboard::web;

#[derive(Debug, Parser)]
#[command(name = "fleetboard")]
#[command(about = "Terminal and web dashboard for the train fleet induction API")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the fleet roster
    Trains {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List the current induction schedules
    Schedules {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Create an induction schedule and show its AI result
    Schedule {
        /// Train identifier (e.g. KMTR-045)
        #[arg(long)]
        train: String,
        /// Origin station
        #[arg(long)]
        station: String,
        /// Route name
        #[arg(long)]
        route: String,
        /// Service date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Departure time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Run fleet-wide AI optimization for a date
    Optimize {
        /// Target date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the fleet-wide train ranking
    Rank {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show one train's record plus its AI analysis
    Details {
        /// Train identifier (e.g. KMTR-045)
        train: String,
    },
    /// Show fleet, AI, and conflict metrics
    Analytics,
    /// Check configuration and API reachability
    Health,
    /// Serve the embedded web dashboard
    Web,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = config::load();
    // Environment resolution happens once, against the dashboard host, and
    // the result is injected everywhere a request is made.
    let api_config = config.resolve_api(&config.web.host);
    let client = ApiClient::new(&api_config);

    let app = App::parse();

    match app.command {
        Commands::Trains { format } => {
            cli::run_trains(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Schedules { format } => {
            cli::run_schedules(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Schedule {
            train,
            station,
            route,
            date,
            time,
        } => {
            let form = ScheduleForm {
                train_id: train,
                station,
                route,
                date: date.unwrap_or_else(today),
                time,
            };
            cli::run_schedule(&client, &form)
        }
        Commands::Optimize { date, format } => cli::run_optimize(
            &client,
            &date.unwrap_or_else(today),
            OutputFormat::from_str_opt(Some(&format)),
        ),
        Commands::Rank { format } => {
            cli::run_rank(&client, OutputFormat::from_str_opt(Some(&format)))
        }
        Commands::Details { train } => cli::run_details(&client, &train),
        Commands::Analytics => cli::run_analytics(&client),
        Commands::Health => cli::run_health(&config, &client),
        Commands::Web => web::serve(&config),
    }
}
