// Integration tests for the batting viewer.
//
// These drive the library crate's public API the way the binary does:
// config resolution and loading, key handling feeding the dashboard state,
// full-frame rendering, and the one-shot report path.

use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use batview_core::config;
use batview_core::stats::StatisticKind;
use batview_tui::app::{self, AppState};
use batview_tui::cli::{Cli, Commands};
use batview_tui::report::{self, ReportFormat};
use batview_tui::tui::input::{handle_key, UserCommand};
use batview_tui::tui::{render_frame, ViewState};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fresh base directory seeded with the built-in viewer.toml.
fn seeded_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("batview_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    config::write_builtin_defaults(&dir).unwrap();
    dir
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

// ===========================================================================
// Dashboard flow
// ===========================================================================

#[test]
fn keys_drive_requeries() {
    let dir = seeded_dir("keys");
    let app = AppState::load(&dir).unwrap();
    let mut view = ViewState::new(&app);
    view.refresh(&app);
    assert_eq!(view.title, "2025 Chiba Lotte Marines Batting Viewer");
    assert_eq!(view.result.as_ref().unwrap().stat, StatisticKind::Hits);

    // Batting average through April.
    for code in [KeyCode::Char('4'), KeyCode::Home] {
        assert_eq!(handle_key(press(code), &mut view), Some(UserCommand::Requery));
        view.refresh(&app);
    }
    let result = view.result.as_ref().unwrap();
    assert_eq!(result.stat, StatisticKind::BattingAverage);
    assert_eq!(result.cutoff_month, 4);
    assert_eq!(result.rows[0].player, "Nishikawa Shisho");
    assert_eq!(result.rows[0].value, 0.281);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn full_frame_shows_ranking() {
    let dir = seeded_dir("frame");
    let app = AppState::load(&dir).unwrap();
    let mut view = ViewState::new(&app);
    view.selected = 4;
    view.refresh(&app);

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|frame| render_frame(frame, &view)).unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains("Stolen Bases ranking through month 9"));
    assert!(text.contains("Wada Koshiro"));
    assert!(text.contains("Total Stolen Bases"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn configured_csv_dataset_is_used() {
    let dir = seeded_dir("csv");
    let config_path = dir.join("config").join(config::VIEWER_FILE);
    let toml = std::fs::read_to_string(&config_path)
        .unwrap()
        .replace("# path = \"data/monthly.csv\"", "path = \"stats.csv\"");
    std::fs::write(&config_path, toml).unwrap();
    std::fs::write(
        dir.join("stats.csv"),
        "stat,player,mar_apr,may,jun,jul,aug,sep\n\
         home_runs,Soto,1,2,3,4,5,6\n\
         home_runs,Newcomer,10,0,0,0,0,0\n",
    )
    .unwrap();

    let app = AppState::load(&dir).unwrap();
    let result = app.query(StatisticKind::HomeRuns, 4).unwrap();
    let players: Vec<&str> = result.rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, ["Newcomer", "Soto"]);

    let _ = std::fs::remove_dir_all(&dir);
}

// ===========================================================================
// Report path
// ===========================================================================

#[test]
fn report_command_end_to_end() {
    let dir = seeded_dir("report");
    let cli = Cli::try_parse_from([
        "batview",
        "report",
        "--stat",
        "avg",
        "--month",
        "4",
        "--format",
        "csv",
        "--config-dir",
        dir.to_str().unwrap(),
    ])
    .unwrap();

    let base = app::resolve_base_dir(cli.config_dir).unwrap();
    let app = AppState::load(&base).unwrap();
    let Some(Commands::Report {
        stat,
        month,
        format,
    }) = cli.command
    else {
        panic!("expected report subcommand");
    };
    let result = app
        .query(stat.unwrap(), month.unwrap())
        .unwrap();

    let mut buf = Vec::new();
    report::write_report(&mut buf, &result, format).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("rank,player,value"));
    assert_eq!(lines.next(), Some("1,Nishikawa Shisho,0.281"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn report_rejects_out_of_range_month() {
    let dir = seeded_dir("bad_month");
    let app = AppState::load(&dir).unwrap();
    let err = app.query(StatisticKind::Rbi, 10).unwrap_err();
    assert!(err.to_string().contains("cutoff month 10"));

    let mut view = ViewState::new(&app);
    view.cutoff_month = 10;
    view.refresh(&app);
    assert!(view.result.is_none());
    assert!(view.error.is_some());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn json_report_uses_config_defaults() {
    let dir = seeded_dir("json");
    let app = AppState::load(&dir).unwrap();
    let result = app
        .query(app.config.dashboard.default_stat, app.config.dashboard.default_month)
        .unwrap();

    let mut buf = Vec::new();
    report::write_report(&mut buf, &result, ReportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["stat"], "hits");
    assert_eq!(value["rows"].as_array().unwrap().len(), result.len());

    let _ = std::fs::remove_dir_all(&dir);
}
