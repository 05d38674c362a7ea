// Command-line interface: interactive dashboard by default, or a one-shot
// ranking report.

use std::path::PathBuf;

use batview_core::stats::StatisticKind;
use clap::{Parser, Subcommand};

use crate::report::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "batview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monthly batting leaderboards in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config/ and defaults/ (default: current directory,
    /// then the per-user config directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the ranking for one statistic and cutoff month, then exit
    Report {
        /// Statistic: hits, home_runs, rbi, batting_average, stolen_bases, walks_hbp
        #[arg(short, long, value_parser = parse_stat)]
        stat: Option<StatisticKind>,
        /// Last month included, 4 (Mar/Apr) through 9 (Sep)
        #[arg(short, long)]
        month: Option<u32>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
}

fn parse_stat(s: &str) -> Result<StatisticKind, String> {
    StatisticKind::from_key(s).ok_or_else(|| {
        let keys: Vec<&str> = StatisticKind::ALL.iter().map(|k| k.key()).collect();
        format!("unknown statistic `{s}` (expected one of: {})", keys.join(", "))
    })
}
