// Ranking chart widget: one horizontal bar per ranked player.
//
// Bars are scaled against the chart bounds from the core chart model and
// shaded along a colour ramp from the lowest to the highest value.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use batview_core::chart::{chart_title, format_value, y_bounds, ChartBounds};
use batview_core::engine::AggregateResult;
use batview_core::stats::StatisticKind;

use crate::tui::ViewState;

/// Width reserved for the player name column.
const NAME_WIDTH: usize = 18;
/// Width reserved for the value label after each bar.
const VALUE_WIDTH: usize = 7;

/// Ramp endpoints (light to dark) for batting average.
const RATE_RAMP: [(u8, u8, u8); 2] = [(0xa1, 0xd9, 0x9b), (0x23, 0x8b, 0x45)];
/// Ramp endpoints (light to dark) for counting statistics.
const COUNT_RAMP: [(u8, u8, u8); 2] = [(0xfe, 0xb2, 0x4c), (0xe3, 0x1a, 0x1c)];

/// Render the ranking chart into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = chart_title(state.selected_stat(), state.cutoff_month);
    let block = Block::default().borders(Borders::ALL).title(title);

    let lines = match (&state.error, &state.result) {
        (Some(message), _) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        (None, Some(result)) => {
            let inner_width = area.width.saturating_sub(2) as usize;
            chart_lines(result, inner_width)
        }
        (None, None) => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Build one line per ranked row. Empty results get a placeholder line.
pub fn chart_lines(result: &AggregateResult, width: usize) -> Vec<Line<'static>> {
    let Some(bounds) = y_bounds(result) else {
        return vec![Line::from(Span::styled(
            "No players with nonzero values for this selection.",
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let bar_width = width.saturating_sub(NAME_WIDTH + VALUE_WIDTH + 2);
    let count = result.rows.len();

    result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let filled = bar_length(&bounds, row.value, bar_width);
            // Rows are sorted descending, so the top bar gets the darkest shade.
            let color = bar_color(result.stat, count - 1 - i, count);
            Line::from(vec![
                Span::styled(
                    format!("{:<w$} ", truncate(&row.player, NAME_WIDTH), w = NAME_WIDTH),
                    Style::default().fg(Color::White),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    format!(" {}", format_value(result.stat, row.value)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

/// Number of cells a bar for `value` fills out of `width`.
pub fn bar_length(bounds: &ChartBounds, value: f64, width: usize) -> usize {
    (bounds.fraction(value) * width as f64).round() as usize
}

/// Colour for the bar at `position` (0 = lowest) among `count` bars.
pub fn bar_color(stat: StatisticKind, position: usize, count: usize) -> Color {
    let [light, dark] = match stat {
        StatisticKind::BattingAverage => RATE_RAMP,
        _ => COUNT_RAMP,
    };
    let t = if count <= 1 {
        1.0
    } else {
        position as f64 / (count - 1) as f64
    };
    Color::Rgb(lerp(light.0, dark.0, t), lerp(light.1, dark.1, t), lerp(light.2, dark.2, t))
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
