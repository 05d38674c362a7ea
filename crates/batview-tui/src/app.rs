// Application state shared by the dashboard and the report printer:
// resolved configuration plus an engine over the configured dataset.

use std::path::{Path, PathBuf};

use anyhow::Context;
use batview_core::config::{self, Config};
use batview_core::dataset;
use batview_core::engine::{AggregateResult, Engine, EngineError};
use batview_core::stats::{StatStore, StatisticKind};
use directories::ProjectDirs;
use tracing::info;

pub struct AppState {
    pub config: Config,
    pub engine: Engine,
}

impl AppState {
    pub fn new(config: Config, store: StatStore) -> Self {
        let engine = Engine::new(store, config.estimator(), config.dashboard.top_n);
        AppState { config, engine }
    }

    /// Load `config/viewer.toml` (copying defaults if needed) and the
    /// configured dataset from `base_dir`.
    pub fn load(base_dir: &Path) -> anyhow::Result<Self> {
        let config = config::load_config(base_dir).context("failed to load configuration")?;
        info!(
            "Config loaded: {} roster players, default {} through month {}",
            config.roster.len(),
            config.dashboard.default_stat.key(),
            config.dashboard.default_month
        );

        let store = dataset::load_configured_store(&config, base_dir)
            .context("failed to load dataset")?;

        Ok(AppState::new(config, store))
    }

    /// Rank the configured roster (plus any extra contributors) by `stat`.
    pub fn query(&self, stat: StatisticKind, cutoff_month: u32) -> Result<AggregateResult, EngineError> {
        self.engine.aggregate(stat, cutoff_month, &self.config.roster)
    }
}

/// Pick the directory holding `config/` and `defaults/`.
///
/// Order: an explicit `--config-dir`, then the current directory when it has
/// either subdirectory, then the per-user config directory (seeded with the
/// built-in viewer.toml).
pub fn resolve_base_dir(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return Ok(cwd);
    }

    let dirs = ProjectDirs::from("", "", "batview")
        .context("no home directory available for per-user config")?;
    let base = dirs.config_dir().to_path_buf();
    config::write_builtin_defaults(&base).context("failed to seed per-user config")?;
    Ok(base)
}
