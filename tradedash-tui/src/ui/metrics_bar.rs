//! Key metrics strip — five boxes side by side.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use tradedash_report::{format_metric, format_percent};

use crate::app::AppState;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let s = &app.output.summary;

    let win_color = s
        .win_rate
        .map_or(theme.muted, |w| theme.win_rate_color(w));
    let dd_color = s
        .max_drawdown
        .map_or(theme.muted, |d| theme.drawdown_color(d));

    let cells: [(&str, String, Color); 5] = [
        ("Total Trades", s.total_trades.to_string(), theme.accent),
        ("Winrate", format_percent(s.win_rate), win_color),
        ("Final Balance", format_metric(s.final_balance), theme.text_primary),
        (
            "Most Traded",
            s.most_traded_market
                .clone()
                .unwrap_or_else(|| "no data".to_string()),
            theme.neutral,
        ),
        ("Max Drawdown", format_metric(s.max_drawdown), dd_color),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for ((title, value, color), chunk) in cells.into_iter().zip(chunks.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(false))
            .title(format!(" {title} "));
        let para = Paragraph::new(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .block(block);
        f.render_widget(para, *chunk);
    }
}
