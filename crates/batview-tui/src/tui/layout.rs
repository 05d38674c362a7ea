// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Title Bar (1 row)                                 |
// +--------------+-----------------------------------+
// | Sidebar (28) | Chart (60%)                        |
// | +- Stats ---+|                                    |
// | +- Month ---+|-----------------------------------|
// | +- Notes ---+| Table (40%)                        |
// +--------------+-----------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use batview_core::stats::StatisticKind;

/// Fixed sidebar width in columns.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: dashboard title and caption.
    pub title_bar: Rect,
    /// Sidebar top: statistic selection list.
    pub stat_list: Rect,
    /// Sidebar middle: cutoff-month gauge.
    pub month_gauge: Rect,
    /// Sidebar bottom: notes about the selected statistic.
    pub notes: Rect,
    /// Main panel top: bar chart.
    pub chart: Rect,
    /// Main panel bottom: ranking table.
    pub table: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the dashboard layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: title(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let title_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(middle);

    let sidebar = horizontal[0];
    let main_panel = horizontal[1];

    // Stat list: one row per statistic plus borders.
    let list_height = StatisticKind::ALL.len() as u16 + 2;
    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(list_height),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(sidebar);

    let main_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_panel);

    AppLayout {
        title_bar,
        stat_list: sidebar_sections[0],
        month_gauge: sidebar_sections[1],
        notes: sidebar_sections[2],
        chart: main_sections[0],
        table: main_sections[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
