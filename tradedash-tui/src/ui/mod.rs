//! Top-level UI layout — title, metrics strip, sidebar + chart, status bar.

pub mod charts;
pub mod filters_panel;
pub mod metrics_bar;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};

const SIDEBAR_WIDTH: u16 = 28;

pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_title(f, rows[0], app);
    metrics_bar::render(f, rows[1], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[2]);

    filters_panel::render(f, body[0], app);
    charts::render(f, body[1], app);
    render_status(f, rows[3], app);
}

fn render_title(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let store = app.dashboard.store();
    let line = Line::from(vec![
        Span::styled(" Trading Performance Dashboard ", app.theme.title(true)),
        Span::styled(
            format!(
                " {} | {} trades",
                store.source().unwrap_or("sample data"),
                store.len()
            ),
            app.theme.muted_text(),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_status(f: &mut Frame, area: ratatui::layout::Rect, app: &AppState) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " [j/k]move [space]toggle [a]ll [d]clear [r]esult [m]ode [tab/1-5]chart [q]uit",
        theme.muted_text(),
    )];

    if let Some((msg, level)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => theme.accent,
            StatusLevel::Warning => theme.warning,
            StatusLevel::Error => theme.negative,
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            msg.as_str(),
            ratatui::style::Style::default().fg(color),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &AppState, width: u16, height: u16) -> String {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
