//! Filters sidebar — market multi-select, result selector and series mode.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tradedash_core::ResultFilter;

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .title(" Filters ")
        .title_style(theme.title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!(
            "Markets ({}/{})",
            app.spec.markets.len(),
            app.markets.len()
        ),
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    )));

    // Rows left for the list after the header and the result/mode block.
    let visible = (inner.height as usize).saturating_sub(6).max(1);
    let start = app.cursor.saturating_sub(visible.saturating_sub(1));
    for (i, market) in app.markets.iter().enumerate().skip(start).take(visible) {
        let mark = if app.is_selected(market) { "[x]" } else { "[ ]" };
        let text = format!("{mark} {market}");
        let style = if i == app.cursor {
            theme.highlight()
        } else if app.is_selected(market) {
            Style::default().fg(theme.accent)
        } else {
            theme.muted_text()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Result",
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    )));
    let mut options = Vec::new();
    for (i, choice) in [ResultFilter::All, ResultFilter::Win, ResultFilter::Loss]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            options.push(Span::raw(" "));
        }
        let style = if choice == app.spec.result {
            theme.highlight()
        } else {
            theme.muted_text()
        };
        options.push(Span::styled(format!(" {} ", choice.label()), style));
    }
    lines.push(Line::from(options));
    lines.push(Line::from(Span::styled(
        format!("Series: {}", app.dashboard.options().series_mode.label()),
        Style::default().fg(theme.neutral),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use crate::test_helpers::test_app;
    use crate::ui::render_to_string;

    #[test]
    fn lists_markets_with_selection_marks() {
        let mut app = test_app();
        app.cursor_down();
        app.toggle_market_at_cursor();
        let screen = render_to_string(&app, 100, 30);
        assert!(screen.contains("Markets (2/3)"));
        assert!(screen.contains("[x] M1"));
        assert!(screen.contains("[ ] M2"));
        assert!(screen.contains("[x] M3"));
    }
}
