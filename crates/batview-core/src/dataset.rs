// Monthly dataset loading from CSV.
//
// One row per (stat, player):
//
//   stat,player,mar_apr,may,jun,jul,aug,sep
//   hits,Nishikawa Shisho,18,22,21,19,23,14

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::stats::{MonthlyRecord, StatStore, StatisticKind};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawMonthlyRow {
    stat: String,
    player: String,
    #[serde(alias = "mar", alias = "apr")]
    mar_apr: u32,
    may: u32,
    jun: u32,
    jul: u32,
    aug: u32,
    sep: u32,
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_entries_from_reader<R: Read>(
    rdr: R,
) -> Result<Vec<(StatisticKind, String, MonthlyRecord)>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut entries = Vec::new();
    for result in reader.deserialize::<RawMonthlyRow>() {
        match result {
            Ok(raw) => {
                let Some(stat) = StatisticKind::from_key(&raw.stat) else {
                    warn!("skipping row for '{}': unknown stat '{}'", raw.player, raw.stat);
                    continue;
                };
                if stat.is_derived() {
                    warn!(
                        "skipping row for '{}': {} is derived, not stored",
                        raw.player,
                        stat.key()
                    );
                    continue;
                }
                let player = raw.player.trim().to_string();
                if player.is_empty() {
                    warn!("skipping {} row with empty player name", stat.key());
                    continue;
                }
                let record =
                    MonthlyRecord::new([raw.mar_apr, raw.may, raw.jun, raw.jul, raw.aug, raw.sep]);
                entries.push((stat, player, record));
            }
            Err(e) => {
                warn!("skipping malformed dataset row: {}", e);
            }
        }
    }
    Ok(entries)
}

/// Build a store from CSV read out of `rdr`. Zero valid rows is an error.
pub fn load_store_from_reader<R: Read>(rdr: R) -> Result<StatStore, DatasetError> {
    let entries = load_entries_from_reader(rdr).map_err(|e| DatasetError::Csv {
        path: "<reader>".into(),
        source: e,
    })?;
    store_from_entries(entries)
}

/// Build a store from a CSV file.
pub fn load_store(path: &Path) -> Result<StatStore, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let entries = load_entries_from_reader(file).map_err(|e| DatasetError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    store_from_entries(entries)
}

/// Resolve the configured dataset: the CSV at `data.path` (relative paths
/// are taken from `base_dir`), or the built-in dataset when unset.
pub fn load_configured_store(config: &Config, base_dir: &Path) -> Result<StatStore, DatasetError> {
    match &config.data.path {
        Some(path) => {
            let full = base_dir.join(path);
            let store = load_store(&full)?;
            info!("Loaded {} records from {}", store.len(), full.display());
            Ok(store)
        }
        None => {
            let store = StatStore::builtin();
            info!("Using built-in dataset ({} records)", store.len());
            Ok(store)
        }
    }
}

fn store_from_entries(
    entries: Vec<(StatisticKind, String, MonthlyRecord)>,
) -> Result<StatStore, DatasetError> {
    if entries.is_empty() {
        return Err(DatasetError::Validation(
            "dataset CSV produced zero valid rows".into(),
        ));
    }
    Ok(StatStore::from_entries(entries))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "stat,player,mar_apr,may,jun,jul,aug,sep";

    #[test]
    fn loads_rows_into_store() {
        let csv_data = format!(
            "{HEADER}\n\
             hits,Nishikawa Shisho,18,22,21,19,23,14\n\
             stolen_bases,Wada Koshiro,5,7,6,8,9,5"
        );
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.lookup(StatisticKind::Hits, "Nishikawa Shisho").total(),
            117
        );
        assert_eq!(
            store.lookup(StatisticKind::StolenBases, "Wada Koshiro").total(),
            40
        );
    }

    #[test]
    fn stat_column_accepts_abbreviations() {
        let csv_data = format!("{HEADER}\nHR,Soto,3,4,5,3,4,2");
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.lookup(StatisticKind::HomeRuns, "Soto").total(), 21);
    }

    #[test]
    fn names_and_fields_trimmed() {
        let csv_data = format!("{HEADER}\n rbi ,  Polanco  , 10,15,14,15,12,8");
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.lookup(StatisticKind::Rbi, "Polanco").total(), 74);
    }

    #[test]
    fn maximal_bucket_values_load_and_total() {
        let csv_data = format!("{HEADER}\nhits,Big,4294967295,1,0,0,0,0");
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        let record = store.lookup(StatisticKind::Hits, "Big");
        assert_eq!(record.prefix_sum(2), 4_294_967_296);
        assert_eq!(record.total(), 4_294_967_296);
    }

    #[test]
    fn unknown_and_derived_stats_skipped() {
        let csv_data = format!(
            "{HEADER}\n\
             era,Somebody,1,1,1,1,1,1\n\
             batting_average,Somebody,1,1,1,1,1,1\n\
             hits,Soto,12,14,15,11,13,9"
        );
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn malformed_rows_skipped() {
        let csv_data = format!(
            "{HEADER}\n\
             hits,Valid,1,2,3,4,5,6\n\
             hits,Negative,-1,2,3,4,5,6\n\
             hits,Text,one,2,3,4,5,6\n\
             hits,Short,1,2,3"
        );
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        let players: Vec<&str> = store.players(StatisticKind::Hits).collect();
        assert_eq!(players, vec!["Valid"]);
    }

    #[test]
    fn duplicate_rows_keep_latest() {
        let csv_data = format!(
            "{HEADER}\n\
             hits,Soto,1,1,1,1,1,1\n\
             hits,Soto,2,2,2,2,2,2"
        );
        let store = load_store_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(store.lookup(StatisticKind::Hits, "Soto").total(), 12);
    }

    #[test]
    fn empty_dataset_is_validation_error() {
        let err = load_store_from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Validation(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_store(Path::new("/definitely/not/here.csv")).unwrap_err();
        match err {
            DatasetError::Io { path, .. } => assert!(path.ends_with("here.csv")),
            other => panic!("expected Io, got: {other}"),
        }
    }
}
