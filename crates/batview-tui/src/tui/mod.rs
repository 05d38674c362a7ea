// Terminal dashboard: view state, frame rendering, and the event loop.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{info, warn};

use batview_core::config::Config;
use batview_core::engine::{AggregateResult, MAX_CUTOFF_MONTH, MIN_CUTOFF_MONTH};
use batview_core::stats::{StatStore, StatisticKind};

use crate::app::AppState;
use input::UserCommand;
use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Everything the dashboard needs to draw one frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub title: String,
    pub caption: String,
    /// Index into `StatisticKind::ALL`.
    pub selected: usize,
    pub cutoff_month: u32,
    /// Shown in the notes panel for batting average.
    pub default_divisor: f64,
    /// Row limit applied by the engine.
    pub top_n: usize,
    /// Latest ranking, `None` until the first query or after an error.
    pub result: Option<AggregateResult>,
    pub error: Option<String>,
}

impl ViewState {
    /// Initial selection and labels from the `[dashboard]` config section;
    /// estimator and row limit as the engine applies them.
    pub fn new(app: &AppState) -> Self {
        let dashboard = &app.config.dashboard;
        let selected = StatisticKind::ALL
            .iter()
            .position(|s| *s == dashboard.default_stat)
            .unwrap_or(0);
        ViewState {
            title: dashboard.title.clone(),
            caption: dashboard.caption.clone(),
            selected,
            cutoff_month: dashboard
                .default_month
                .clamp(MIN_CUTOFF_MONTH, MAX_CUTOFF_MONTH),
            default_divisor: app.engine.estimator().default_divisor(),
            top_n: app.engine.top_n(),
            result: None,
            error: None,
        }
    }

    pub fn selected_stat(&self) -> StatisticKind {
        StatisticKind::ALL[self.selected.min(StatisticKind::ALL.len() - 1)]
    }

    /// Re-run the aggregation for the current selection.
    pub fn refresh(&mut self, app: &AppState) {
        match app.query(self.selected_stat(), self.cutoff_month) {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                warn!("Query failed: {}", e);
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(&AppState::new(Config::default(), StatStore::builtin()))
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::title_bar::render(frame, layout.title_bar, state);
    widgets::sidebar::render_stat_list(frame, layout.stat_list, state);
    widgets::sidebar::render_month_gauge(frame, layout.month_gauge, state);
    widgets::sidebar::render_notes(frame, layout.notes, state);
    widgets::chart::render(frame, layout.chart, state);
    widgets::ranking_table::render(frame, layout.table, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let help = " q:Quit | ↑↓/jk/1-6:Stat | ←→/hl:Month | Home/End:First/Last month";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help,
        Style::default().fg(Color::DarkGray),
    )]));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop over keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(app: AppState) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Panic hook, chained before the original
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 3. Initial view
    let mut view_state = ViewState::new(&app);
    view_state.refresh(&app);

    // 4. Keyboard input stream
    let mut event_stream = EventStream::new();

    // 5. Render interval (~30fps)
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 6. Main loop
    let outcome = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => break Ok(()),
                            Some(UserCommand::Requery) => view_state.refresh(&app),
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and mouse events are picked up by the next draw
                    }
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    // 7. Restore terminal
    ratatui::restore();
    info!("Dashboard closed");

    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
