// Title bar widget: dashboard title and caption.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the title bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(title_line(&state.title, &state.caption))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Title in bold, caption dimmed after a separator when present.
pub fn title_line(title: &str, caption: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if !caption.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            caption.to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_only() {
        let line = title_line("Viewer", "");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, " Viewer");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn title_with_caption() {
        let line = title_line("Viewer", "through September");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[2].content, "through September");
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
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
