// Batting viewer entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Resolve the base directory (config/, defaults/, logs/)
// 3. Initialize tracing (log to file, not terminal)
// 4. Load config and dataset
// 5. Print a report, or run the dashboard until the user quits

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use batview_tui::app::{self, AppState};
use batview_tui::cli::{Cli, Commands};
use batview_tui::report;
use batview_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Resolve base directory
    let base_dir = app::resolve_base_dir(cli.config_dir.clone())?;

    // 3. Initialize tracing
    init_tracing(&base_dir)?;
    info!("Batting viewer starting up in {}", base_dir.display());

    // 4. Load config and dataset
    let app = AppState::load(&base_dir)?;

    // 5. Dispatch
    let outcome = match cli.command {
        Some(Commands::Report {
            stat,
            month,
            format,
        }) => {
            let stat = stat.unwrap_or(app.config.dashboard.default_stat);
            let month = month.unwrap_or(app.config.dashboard.default_month);
            info!("Report: {} through month {} as {:?}", stat.key(), month, format);
            app.query(stat, month)
                .map_err(anyhow::Error::from)
                .and_then(|result| {
                    let stdout = std::io::stdout();
                    report::write_report(stdout.lock(), &result, format)
                })
        }
        None => tui::run(app).await,
    };

    if let Err(ref e) = outcome {
        error!("Exiting with error: {:#}", e);
    } else {
        info!("Batting viewer shut down cleanly");
    }
    outcome
}

/// Initialize the tracing subscriber to log to `<base>/logs/batview.log`.
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("batview.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("batview_tui=info,batview_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
