// Ranking table widget: rank, player, and value for the current result.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use batview_core::chart::format_value;
use batview_core::engine::AggregateResult;

use crate::tui::ViewState;

/// Render the ranking table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Ranking");

    let Some(result) = &state.result else {
        frame.render_widget(block, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Player"),
        Cell::from(Line::from(result.stat.axis_label()).right_aligned()),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Length(18),
    ];

    let table = Table::new(table_rows(result), widths)
        .header(header)
        .block(block);
    frame.render_widget(table, area);
}

fn table_rows(result: &AggregateResult) -> Vec<Row<'static>> {
    result
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(row.player.clone()),
                Cell::from(
                    Line::from(format_value(result.stat, row.value)).right_aligned(),
                ),
            ])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use batview_core::engine::RankedRow;
    use batview_core::stats::StatisticKind;

    fn sample() -> AggregateResult {
        AggregateResult {
            stat: StatisticKind::Rbi,
            cutoff_month: 5,
            rows: vec![
                RankedRow {
                    player: "Soto".into(),
                    value: 25.0,
                },
                RankedRow {
                    player: "Yamaguchi Koki".into(),
                    value: 20.0,
                },
            ],
        }
    }

    #[test]
    fn one_row_per_result() {
        assert_eq!(table_rows(&sample()).len(), 2);
    }

    #[test]
    fn render_shows_players_in_order() {
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.result = Some(sample());
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &state);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let soto = text.find("Soto").unwrap();
        let yamaguchi = text.find("Yamaguchi Koki").unwrap();
        assert!(soto < yamaguchi);
        assert!(text.contains("Total RBI"));
    }

    #[test]
    fn render_without_result_draws_empty_block() {
        let backend = ratatui::backend::TestBackend::new(40, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &state);
            })
            .unwrap();
    }
}
