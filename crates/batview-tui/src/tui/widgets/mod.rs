// TUI widget modules for each dashboard panel.

pub mod chart;
pub mod ranking_table;
pub mod sidebar;
pub mod title_bar;
