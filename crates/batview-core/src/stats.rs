// Stat store: statistic kinds, monthly records, and the immutable
// statistic -> player -> monthly-record table.
//
// The built-in dataset is the 2025 Chiba Lotte Marines position players,
// bucketed as Mar/Apr, May, Jun, Jul, Aug, Sep.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Number of monthly buckets in a season record.
pub const BUCKET_COUNT: usize = 6;

/// Display labels for the six buckets, in record order.
pub const BUCKET_LABELS: [&str; BUCKET_COUNT] = ["Mar/Apr", "May", "Jun", "Jul", "Aug", "Sep"];

// ---------------------------------------------------------------------------
// StatisticKind
// ---------------------------------------------------------------------------

/// A statistic the dashboard can rank players by.
///
/// `BattingAverage` is derived from hits and never stored in a `StatStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticKind {
    Hits,
    HomeRuns,
    Rbi,
    BattingAverage,
    StolenBases,
    #[serde(rename = "walks_hbp")]
    WalksAndHitByPitch,
}

impl StatisticKind {
    /// All statistics in selection-list order.
    pub const ALL: [StatisticKind; 6] = [
        StatisticKind::Hits,
        StatisticKind::HomeRuns,
        StatisticKind::Rbi,
        StatisticKind::BattingAverage,
        StatisticKind::StolenBases,
        StatisticKind::WalksAndHitByPitch,
    ];

    /// Parse a statistic key ("hits", "home_runs", "rbi", "batting_average",
    /// "stolen_bases", "walks_hbp"). Matching is case-insensitive and also
    /// accepts the common abbreviations H, HR, AVG, SB, BB.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hits" | "h" => Some(StatisticKind::Hits),
            "home_runs" | "hr" => Some(StatisticKind::HomeRuns),
            "rbi" => Some(StatisticKind::Rbi),
            "batting_average" | "avg" | "ba" => Some(StatisticKind::BattingAverage),
            "stolen_bases" | "sb" => Some(StatisticKind::StolenBases),
            "walks_hbp" | "bb" => Some(StatisticKind::WalksAndHitByPitch),
            _ => None,
        }
    }

    /// Machine key, as used in config files and the CSV `stat` column.
    pub fn key(self) -> &'static str {
        match self {
            StatisticKind::Hits => "hits",
            StatisticKind::HomeRuns => "home_runs",
            StatisticKind::Rbi => "rbi",
            StatisticKind::BattingAverage => "batting_average",
            StatisticKind::StolenBases => "stolen_bases",
            StatisticKind::WalksAndHitByPitch => "walks_hbp",
        }
    }

    /// Human-readable label for the selection list.
    pub fn label(self) -> &'static str {
        match self {
            StatisticKind::Hits => "Hits",
            StatisticKind::HomeRuns => "Home Runs",
            StatisticKind::Rbi => "RBI",
            StatisticKind::BattingAverage => "Batting Average",
            StatisticKind::StolenBases => "Stolen Bases",
            StatisticKind::WalksAndHitByPitch => "Walks/HBP",
        }
    }

    /// Label for the value axis and the table's value column.
    pub fn axis_label(self) -> String {
        match self {
            StatisticKind::BattingAverage => "Batting Average".to_string(),
            other => format!("Total {}", other.label()),
        }
    }

    /// True for statistics computed from other statistics rather than stored.
    pub fn is_derived(self) -> bool {
        matches!(self, StatisticKind::BattingAverage)
    }

    /// The stored statistic whose data keys feed this statistic's candidate set.
    pub fn source(self) -> StatisticKind {
        match self {
            StatisticKind::BattingAverage => StatisticKind::Hits,
            other => other,
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MonthlyRecord
// ---------------------------------------------------------------------------

/// Per-bucket values for one player and one statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlyRecord([u32; BUCKET_COUNT]);

impl MonthlyRecord {
    pub const ZERO: MonthlyRecord = MonthlyRecord([0; BUCKET_COUNT]);

    pub fn new(values: [u32; BUCKET_COUNT]) -> Self {
        MonthlyRecord(values)
    }

    pub fn values(&self) -> &[u32; BUCKET_COUNT] {
        &self.0
    }

    /// Sum of the first `buckets` values, widened so six maximal buckets
    /// cannot overflow. Counts above `BUCKET_COUNT` are clamped so the prefix
    /// never runs past the record.
    pub fn prefix_sum(&self, buckets: usize) -> u64 {
        self.0[..buckets.min(BUCKET_COUNT)]
            .iter()
            .map(|&v| u64::from(v))
            .sum()
    }

    pub fn total(&self) -> u64 {
        self.prefix_sum(BUCKET_COUNT)
    }
}

// ---------------------------------------------------------------------------
// StatStore
// ---------------------------------------------------------------------------

/// Immutable statistic -> player -> record table.
///
/// Players keep the order in which they were first inserted, so candidate
/// sets built from a statistic's data keys are deterministic.
#[derive(Debug, Clone, Default)]
pub struct StatStore {
    tables: HashMap<StatisticKind, Vec<(String, MonthlyRecord)>>,
}

impl StatStore {
    /// Build a store from `(stat, player, record)` entries.
    ///
    /// Entries for derived statistics are skipped. A repeated (stat, player)
    /// pair replaces the earlier record but keeps its original position.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StatisticKind, S, MonthlyRecord)>,
        S: Into<String>,
    {
        let mut tables: HashMap<StatisticKind, Vec<(String, MonthlyRecord)>> = HashMap::new();
        for (stat, player, record) in entries {
            let player = player.into();
            if stat.is_derived() {
                warn!("ignoring stored values for derived statistic {} ({})", stat.key(), player);
                continue;
            }
            let table = tables.entry(stat).or_default();
            match table.iter_mut().find(|(name, _)| *name == player) {
                Some(existing) => {
                    warn!("duplicate {} entry for '{}', using latest record", stat.key(), player);
                    existing.1 = record;
                }
                None => table.push((player, record)),
            }
        }
        StatStore { tables }
    }

    /// The built-in 2025 dataset.
    pub fn builtin() -> Self {
        let sections: [(StatisticKind, &[(&str, [u32; BUCKET_COUNT])]); 5] = [
            (StatisticKind::Hits, BUILTIN_HITS),
            (StatisticKind::HomeRuns, BUILTIN_HOME_RUNS),
            (StatisticKind::Rbi, BUILTIN_RBI),
            (StatisticKind::StolenBases, BUILTIN_STOLEN_BASES),
            (StatisticKind::WalksAndHitByPitch, BUILTIN_WALKS_HBP),
        ];
        StatStore::from_entries(sections.into_iter().flat_map(|(stat, rows)| {
            rows.iter()
                .map(move |(name, values)| (stat, *name, MonthlyRecord::new(*values)))
        }))
    }

    /// Record for `player` under `stat`, or an all-zero record when absent.
    pub fn lookup(&self, stat: StatisticKind, player: &str) -> MonthlyRecord {
        self.tables
            .get(&stat)
            .and_then(|table| table.iter().find(|(name, _)| name == player))
            .map(|(_, record)| *record)
            .unwrap_or(MonthlyRecord::ZERO)
    }

    /// Players with stored values for `stat`, in dataset order.
    pub fn players(&self, stat: StatisticKind) -> impl Iterator<Item = &str> {
        self.tables
            .get(&stat)
            .into_iter()
            .flat_map(|table| table.iter().map(|(name, _)| name.as_str()))
    }

    /// Number of (stat, player) records held.
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Built-in dataset
// ---------------------------------------------------------------------------

/// Primary roster used for the counting-stat views, in display order.
pub const BUILTIN_ROSTER: [&str; 15] = [
    "Nishikawa Shisho",
    "Fujiwara Kyota",
    "Terachi Ryusei",
    "Sato Toshiya",
    "Takabe Akito",
    "Yasuda Hisanori",
    "Soto",
    "Ueda Kiyuto",
    "Tomosugi Atsuki",
    "Oka Hiromi",
    "Polanco",
    "Yamaguchi Koki",
    "Ogawa Ryusei",
    "Chatani Kenta",
    "Nakamura Shogo",
];

/// The built-in roster as owned names.
pub fn builtin_roster() -> Vec<String> {
    BUILTIN_ROSTER.iter().map(|s| s.to_string()).collect()
}

const BUILTIN_HITS: &[(&str, [u32; BUCKET_COUNT])] = &[
    ("Nishikawa Shisho", [18, 22, 21, 19, 23, 14]),
    ("Fujiwara Kyota", [14, 20, 18, 21, 15, 12]),
    ("Terachi Ryusei", [11, 15, 18, 16, 17, 14]),
    ("Sato Toshiya", [16, 15, 17, 18, 14, 13]),
    ("Takabe Akito", [16, 20, 18, 21, 14, 13]),
    ("Yasuda Hisanori", [10, 14, 12, 16, 15, 10]),
    ("Soto", [12, 14, 15, 11, 13, 9]),
    ("Polanco", [10, 12, 14, 13, 12, 8]),
];

const BUILTIN_HOME_RUNS: &[(&str, [u32; BUCKET_COUNT])] = &[
    ("Soto", [3, 4, 5, 3, 4, 2]),
    ("Polanco", [2, 5, 4, 4, 3, 2]),
    ("Yamaguchi Koki", [1, 3, 4, 2, 4, 2]),
    ("Nishikawa Shisho", [1, 2, 2, 2, 3, 1]),
    ("Yasuda Hisanori", [1, 1, 2, 1, 2, 1]),
];

const BUILTIN_RBI: &[(&str, [u32; BUCKET_COUNT])] = &[
    ("Soto", [12, 18, 20, 14, 16, 10]),
    ("Polanco", [10, 15, 14, 15, 12, 8]),
    ("Yamaguchi Koki", [8, 14, 16, 11, 15, 9]),
    ("Nishikawa Shisho", [6, 11, 13, 10, 12, 8]),
];

const BUILTIN_STOLEN_BASES: &[(&str, [u32; BUCKET_COUNT])] = &[
    ("Ogawa Ryusei", [4, 5, 6, 7, 5, 3]),
    ("Takabe Akito", [3, 4, 5, 6, 4, 2]),
    ("Fujiwara Kyota", [2, 3, 4, 4, 3, 2]),
    ("Wada Koshiro", [5, 7, 6, 8, 9, 5]),
];

const BUILTIN_WALKS_HBP: &[(&str, [u32; BUCKET_COUNT])] = &[
    ("Yasuda Hisanori", [6, 8, 9, 7, 8, 5]),
    ("Soto", [9, 7, 8, 6, 7, 4]),
    ("Nakamura Shogo", [4, 5, 6, 5, 6, 4]),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
