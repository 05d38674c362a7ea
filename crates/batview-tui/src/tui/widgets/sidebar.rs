// Sidebar widgets: statistic selection list, cutoff-month gauge, and notes.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use batview_core::engine::{bucket_count, MAX_CUTOFF_MONTH, MIN_CUTOFF_MONTH};
use batview_core::stats::{StatisticKind, BUCKET_COUNT, BUCKET_LABELS};

use crate::tui::ViewState;

/// Render the statistic selection list.
pub fn render_stat_list(frame: &mut Frame, area: Rect, state: &ViewState) {
    let items: Vec<ListItem> = StatisticKind::ALL
        .iter()
        .enumerate()
        .map(|(i, stat)| stat_item(i, *stat, i == state.selected))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Statistic"),
    );
    frame.render_widget(list, area);
}

fn stat_item(index: usize, stat: StatisticKind, selected: bool) -> ListItem<'static> {
    let marker = if selected { ">" } else { " " };
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    ListItem::new(Line::from(vec![Span::styled(
        format!("{}{} {}", marker, index + 1, stat.label()),
        style,
    )]))
}

/// Render the cutoff-month gauge.
pub fn render_month_gauge(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = Line::from(vec![
        Span::styled(
            month_bar(state.cutoff_month),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
            month_label(state.cutoff_month),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Through month"),
    );
    frame.render_widget(paragraph, area);
}

/// One cell per monthly bucket, filled up to the cutoff, e.g. `[###---]`.
pub fn month_bar(month: u32) -> String {
    let clamped = month.clamp(MIN_CUTOFF_MONTH, MAX_CUTOFF_MONTH);
    let filled = bucket_count(clamped).unwrap_or(BUCKET_COUNT);
    let empty = BUCKET_COUNT - filled;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(empty))
}

/// Month number and the last bucket it covers.
pub fn month_label(month: u32) -> String {
    match bucket_count(month) {
        Ok(buckets) => format!("{} (to {})", month, BUCKET_LABELS[buckets - 1]),
        Err(_) => format!("{} (invalid)", month),
    }
}

/// Render notes about the selected statistic.
pub fn render_notes(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(notes_lines(state))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Notes"));
    frame.render_widget(paragraph, area);
}

fn notes_lines(state: &ViewState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let stat = state.selected_stat();
    if stat.is_derived() {
        lines.push(Line::from(Span::styled(
            "Estimated: at-bats are back-solved from hits with a fixed divisor.",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(format!(
            "Default divisor {:.3}.",
            state.default_divisor
        )));
    } else {
        lines.push(Line::from("Cumulative total over the selected months."));
    }
    if let Some(result) = &state.result {
        lines.push(Line::from(Span::styled(
            format!("{} players ranked (top {}).", result.len(), state.top_n),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bar_fills_one_cell_per_bucket() {
        assert_eq!(month_bar(4), "[#-----]");
        assert_eq!(month_bar(6), "[###---]");
        assert_eq!(month_bar(9), "[######]");
        assert_eq!(month_bar(2), "[#-----]");
        assert_eq!(month_bar(12), "[######]");
    }

    #[test]
    fn month_labels_name_last_bucket() {
        assert_eq!(month_label(4), "4 (to Mar/Apr)");
        assert_eq!(month_label(5), "5 (to May)");
        assert_eq!(month_label(9), "9 (to Sep)");
        assert_eq!(month_label(11), "11 (invalid)");
    }

    #[test]
    fn selected_item_is_marked() {
        let item = stat_item(0, StatisticKind::Hits, true);
        // ListItem has no public accessor for its content; height is enough
        // to prove it built a single line.
        assert_eq!(item.height(), 1);
    }

    #[test]
    fn batting_average_notes_mention_estimate() {
        let mut state = ViewState::default();
        state.selected = 3;
        let text: String = notes_lines(&state)
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Estimated"));
        assert!(text.contains("0.275"));
    }

    #[test]
    fn notes_report_ranked_count_against_row_limit() {
        let mut state = ViewState::default();
        state.top_n = 10;
        state.result = Some(batview_core::engine::AggregateResult {
            stat: StatisticKind::Hits,
            cutoff_month: 9,
            rows: Vec::new(),
        });
        let text: String = notes_lines(&state)
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("0 players ranked (top 10)."));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(28, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_stat_list(frame, Rect::new(0, 0, area.width, 8), &state);
                render_month_gauge(frame, Rect::new(0, 8, area.width, 3), &state);
                render_notes(frame, Rect::new(0, 11, area.width, 9), &state);
            })
            .unwrap();
    }
}
