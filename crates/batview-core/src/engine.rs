// Aggregation engine: turns (statistic, cutoff month) into a ranked,
// zero-filtered table of player values.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::stats::{StatStore, StatisticKind, BUCKET_COUNT};

/// Earliest selectable cutoff month (April; covers the Mar/Apr bucket).
pub const MIN_CUTOFF_MONTH: u32 = 4;
/// Latest selectable cutoff month (September).
pub const MAX_CUTOFF_MONTH: u32 = 9;
/// Cutoff month used when nothing else is configured.
pub const DEFAULT_CUTOFF_MONTH: u32 = 9;
/// Maximum number of ranked rows returned.
pub const DEFAULT_TOP_N: usize = 15;

/// Divisor used to back-solve at-bats when a player has no override.
pub const DEFAULT_AVERAGE_DIVISOR: f64 = 0.275;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(
        "invalid argument: cutoff month {month} is outside {}..={}",
        MIN_CUTOFF_MONTH,
        MAX_CUTOFF_MONTH
    )]
    InvalidArgument { month: u32 },
}

// ---------------------------------------------------------------------------
// Month -> bucket mapping
// ---------------------------------------------------------------------------

/// Number of monthly buckets covered by `cutoff_month`.
///
/// April (and anything earlier, were it allowed) covers only the Mar/Apr
/// bucket; each later month adds one bucket, so September covers all six.
pub fn bucket_count(cutoff_month: u32) -> Result<usize, EngineError> {
    if !(MIN_CUTOFF_MONTH..=MAX_CUTOFF_MONTH).contains(&cutoff_month) {
        return Err(EngineError::InvalidArgument {
            month: cutoff_month,
        });
    }
    let idx = if cutoff_month <= 4 {
        1
    } else {
        (cutoff_month - 3) as usize
    };
    Ok(idx.min(BUCKET_COUNT))
}

// ---------------------------------------------------------------------------
// Batting average estimator
// ---------------------------------------------------------------------------

/// Rough batting-average estimator.
///
/// No at-bat data exists in the dataset, so at-bats are back-solved from hits
/// with a fixed divisor: `ab = h / divisor`. Players with a known season
/// average use it as their divisor; everyone else uses the default. The
/// result is an approximation for display, not a statistic of record.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageEstimator {
    default_divisor: f64,
    overrides: HashMap<String, f64>,
}

impl Default for AverageEstimator {
    fn default() -> Self {
        let mut overrides = HashMap::new();
        overrides.insert("Nishikawa Shisho".to_string(), 0.281);
        AverageEstimator {
            default_divisor: DEFAULT_AVERAGE_DIVISOR,
            overrides,
        }
    }
}

impl AverageEstimator {
    pub fn new(default_divisor: f64, overrides: HashMap<String, f64>) -> Self {
        AverageEstimator {
            default_divisor,
            overrides,
        }
    }

    pub fn default_divisor(&self) -> f64 {
        self.default_divisor
    }

    /// Divisor applied to `player`'s hits.
    pub fn divisor_for(&self, player: &str) -> f64 {
        self.overrides
            .get(player)
            .copied()
            .unwrap_or(self.default_divisor)
    }

    /// Estimated at-bats for `hits`. Zero hits map to a sentinel of one
    /// at-bat so the ratio stays defined.
    pub fn estimated_at_bats(&self, player: &str, hits: u64) -> f64 {
        if hits == 0 {
            return 1.0;
        }
        hits as f64 / self.divisor_for(player)
    }

    /// Estimated average rounded to three decimals; zero when there are no hits.
    pub fn estimate(&self, player: &str, hits: u64) -> f64 {
        if hits == 0 {
            return 0.0;
        }
        let ab = self.estimated_at_bats(player, hits);
        round3(hits as f64 / ab)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One ranked player and their aggregate value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub player: String,
    pub value: f64,
}

/// Ranked rows for a single (statistic, cutoff) query, sorted descending,
/// zero rows removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub stat: StatisticKind,
    pub cutoff_month: u32,
    pub rows: Vec<RankedRow>,
}

impl AggregateResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value for `player`, if ranked.
    pub fn value_of(&self, player: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.player == player)
            .map(|row| row.value)
    }

    pub fn max_value(&self) -> Option<f64> {
        self.rows.first().map(|row| row.value)
    }

    pub fn min_value(&self) -> Option<f64> {
        self.rows.last().map(|row| row.value)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Pure aggregation over an injected, immutable `StatStore`.
#[derive(Debug, Clone)]
pub struct Engine {
    store: StatStore,
    estimator: AverageEstimator,
    top_n: usize,
}

impl Engine {
    pub fn new(store: StatStore, estimator: AverageEstimator, top_n: usize) -> Self {
        Engine {
            store,
            estimator,
            top_n,
        }
    }

    /// Engine over the built-in dataset with default estimator and row limit.
    pub fn builtin() -> Self {
        Engine::new(
            StatStore::builtin(),
            AverageEstimator::default(),
            DEFAULT_TOP_N,
        )
    }

    pub fn store(&self) -> &StatStore {
        &self.store
    }

    pub fn estimator(&self) -> &AverageEstimator {
        &self.estimator
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank players by `stat` over the buckets covered by `cutoff_month`.
    ///
    /// Candidates are `roster` followed by any other player holding data for
    /// the statistic (hits for batting average). Zero aggregates are dropped,
    /// ties keep candidate order, and at most `top_n` rows are returned.
    pub fn aggregate(
        &self,
        stat: StatisticKind,
        cutoff_month: u32,
        roster: &[String],
    ) -> Result<AggregateResult, EngineError> {
        let idx = bucket_count(cutoff_month)?;

        let mut rows: Vec<RankedRow> = self
            .candidates(stat, roster)
            .into_iter()
            .map(|player| {
                let value = self.player_value(stat, player, idx);
                RankedRow {
                    player: player.to_string(),
                    value,
                }
            })
            .filter(|row| row.value > 0.0)
            .collect();

        // `sort_by` is stable, so equal values keep candidate order.
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows.truncate(self.top_n);

        debug!(
            "aggregated {} through month {} (buckets={}): {} rows",
            stat.key(),
            cutoff_month,
            idx,
            rows.len()
        );

        Ok(AggregateResult {
            stat,
            cutoff_month,
            rows,
        })
    }

    /// Roster first, then data keys of the statistic's source table, deduplicated.
    fn candidates<'a>(&'a self, stat: StatisticKind, roster: &'a [String]) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        roster
            .iter()
            .map(String::as_str)
            .chain(self.store.players(stat.source()))
            .filter(|player| seen.insert(*player))
            .collect()
    }

    fn player_value(&self, stat: StatisticKind, player: &str, idx: usize) -> f64 {
        match stat {
            StatisticKind::BattingAverage => {
                let hits = self
                    .store
                    .lookup(StatisticKind::Hits, player)
                    .prefix_sum(idx);
                self.estimator.estimate(player, hits)
            }
            counting => self.store.lookup(counting, player).prefix_sum(idx) as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
