// Configuration loading and parsing (viewer.toml).

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::{
    AverageEstimator, DEFAULT_AVERAGE_DIVISOR, DEFAULT_CUTOFF_MONTH, DEFAULT_TOP_N,
    MAX_CUTOFF_MONTH, MIN_CUTOFF_MONTH,
};
use crate::stats::StatisticKind;

/// File name of the viewer settings inside `config/` and `defaults/`.
pub const VIEWER_FILE: &str = "viewer.toml";

/// The shipped `defaults/viewer.toml`, for bootstrapping a config directory
/// that has no `defaults/` next to it. Embedded from the workspace root, so
/// the crate builds only inside this workspace (`publish = false`).
pub const DEFAULT_VIEWER_TOML: &str = include_str!("../../../defaults/viewer.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub roster: Vec<String>,
    pub batting_average: BattingAverageConfig,
    pub dashboard: DashboardConfig,
    pub data: DataConfig,
}

impl Config {
    /// Estimator built from the `[batting_average]` section.
    pub fn estimator(&self) -> AverageEstimator {
        AverageEstimator::new(
            self.batting_average.default_divisor,
            self.batting_average.overrides.clone(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert("Nishikawa Shisho".to_string(), 0.281);
        Config {
            roster: crate::stats::builtin_roster(),
            batting_average: BattingAverageConfig {
                default_divisor: DEFAULT_AVERAGE_DIVISOR,
                overrides,
            },
            dashboard: DashboardConfig {
                title: default_title(),
                caption: String::new(),
                default_stat: StatisticKind::Hits,
                default_month: DEFAULT_CUTOFF_MONTH,
                top_n: DEFAULT_TOP_N,
            },
            data: DataConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// viewer.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire viewer.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ViewerFile {
    roster: RosterSection,
    batting_average: BattingAverageConfig,
    dashboard: DashboardSection,
    #[serde(default)]
    data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterSection {
    players: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DashboardSection {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    caption: String,
    default_stat: String,
    #[serde(default = "default_month")]
    default_month: u32,
    #[serde(default = "default_top_n")]
    top_n: usize,
}

fn default_title() -> String {
    "Batting Viewer".to_string()
}

fn default_month() -> u32 {
    DEFAULT_CUTOFF_MONTH
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Batting-average estimator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BattingAverageConfig {
    pub default_divisor: f64,
    /// Player name -> known average used as that player's divisor.
    #[serde(default)]
    pub overrides: HashMap<String, f64>,
}

/// Dashboard presentation settings, with the statistic key already parsed.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    pub caption: String,
    pub default_stat: StatisticKind,
    pub default_month: u32,
    pub top_n: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Optional CSV dataset. `None` selects the built-in dataset.
    #[serde(default)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/viewer.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` which does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(VIEWER_FILE);
    let text = read_file(&path)?;
    let file: ViewerFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let default_stat = StatisticKind::from_key(&file.dashboard.default_stat).ok_or_else(|| {
        ConfigError::ValidationError {
            field: "dashboard.default_stat".into(),
            message: format!("unknown statistic `{}`", file.dashboard.default_stat),
        }
    })?;

    // Override keys are matched against trimmed roster and dataset names.
    let mut overrides = HashMap::new();
    for (player, avg) in file.batting_average.overrides {
        let trimmed = player.trim().to_string();
        if trimmed.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "batting_average.overrides".into(),
                message: "player names must not be empty".into(),
            });
        }
        if overrides.insert(trimmed, avg).is_some() {
            return Err(ConfigError::ValidationError {
                field: "batting_average.overrides".into(),
                message: format!("duplicate player `{}`", player.trim()),
            });
        }
    }

    let config = Config {
        roster: file
            .roster
            .players
            .into_iter()
            .map(|p| p.trim().to_string())
            .collect(),
        batting_average: BattingAverageConfig {
            default_divisor: file.batting_average.default_divisor,
            overrides,
        },
        dashboard: DashboardConfig {
            title: file.dashboard.title,
            caption: file.dashboard.caption,
            default_stat,
            default_month: file.dashboard.default_month,
            top_n: file.dashboard.top_n,
        },
        data: file.data,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or pass --config-dir",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);
        let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        if write_if_missing(&target, &content)? {
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Write the built-in viewer.toml into `base_dir/config/` if it is missing.
/// Used for per-user config directories that have no `defaults/` alongside.
pub fn write_builtin_defaults(base_dir: &Path) -> Result<bool, ConfigError> {
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    write_if_missing(&config_dir.join(VIEWER_FILE), DEFAULT_VIEWER_TOML.as_bytes())
}

/// Convenience wrapper: copies defaults, then loads config from `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Create `target` with `content` unless it already exists. Returns whether
/// the file was written.
fn write_if_missing(target: &Path, content: &[u8]) -> Result<bool, ConfigError> {
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.roster.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.players".into(),
            message: "must list at least one player".into(),
        });
    }

    let mut seen = HashSet::new();
    for player in &config.roster {
        if player.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "roster.players".into(),
                message: "player names must not be empty".into(),
            });
        }
        if !seen.insert(player.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "roster.players".into(),
                message: format!("duplicate player `{player}`"),
            });
        }
    }

    let divisor = config.batting_average.default_divisor;
    if !(divisor > 0.0 && divisor <= 1.0) {
        return Err(ConfigError::ValidationError {
            field: "batting_average.default_divisor".into(),
            message: format!("must be in (0.0, 1.0], got {divisor}"),
        });
    }

    for (player, avg) in &config.batting_average.overrides {
        if !(*avg > 0.0 && *avg <= 1.0) {
            return Err(ConfigError::ValidationError {
                field: format!("batting_average.overrides.{player}"),
                message: format!("must be in (0.0, 1.0], got {avg}"),
            });
        }
    }

    let month = config.dashboard.default_month;
    if !(MIN_CUTOFF_MONTH..=MAX_CUTOFF_MONTH).contains(&month) {
        return Err(ConfigError::ValidationError {
            field: "dashboard.default_month".into(),
            message: format!(
                "must be between {MIN_CUTOFF_MONTH} and {MAX_CUTOFF_MONTH} inclusive, got {month}"
            ),
        });
    }

    if config.dashboard.top_n == 0 {
        return Err(ConfigError::ValidationError {
            field: "dashboard.top_n".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
