//! Chart area — one chart at a time, selected by `ChartTab`.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

use tradedash_core::MarketBreakdown;

use crate::app::{AppState, ChartTab};
use crate::theme::Theme;

const DISTRIBUTION_BAR: &str = "█";

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", app.chart.label()),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}/{}] ", app.chart.index() + 1, ChartTab::COUNT),
            theme.muted_text(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.output.view.is_empty() {
        let msg = Paragraph::new(Span::styled(
            "No data for the current filter",
            Style::default().fg(theme.warning),
        ))
        .alignment(Alignment::Center);
        f.render_widget(msg, inner);
        return;
    }

    match app.chart {
        ChartTab::Equity => render_equity(f, inner, app),
        ChartTab::Winrate => render_winrate(f, inner, app),
        ChartTab::TradesPerMarket => render_trades_per_market(f, inner, app),
        ChartTab::WinratePerMarket => render_winrate_per_market(f, inner, app),
        ChartTab::Distribution => render_distribution(f, inner, app),
    }
}

/// Min/max of `values` with 5% padding. Flat series get a fixed pad.
fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let range = hi - lo;
    let pad = if range > 0.0 { range * 0.05 } else { 1.0 };
    [lo - pad, hi + pad]
}

fn x_axis<'a>(theme: &Theme, first: f64, last: f64) -> Axis<'a> {
    let upper = if last > first { last } else { first + 1.0 };
    Axis::default()
        .title("Trade #")
        .style(Style::default().fg(theme.text_secondary))
        .bounds([first, upper])
        .labels(vec![
            Span::raw(format!("{}", first as usize)),
            Span::raw(format!("{}", ((first + upper) / 2.0) as usize)),
            Span::raw(format!("{}", upper as usize)),
        ])
}

fn x_range(app: &AppState) -> (f64, f64) {
    let rows = &app.output.view.rows;
    let first = rows.first().map_or(0.0, |r| r.trade_number as f64);
    let last = rows.last().map_or(0.0, |r| r.trade_number as f64);
    (first, last)
}

fn render_equity(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let view = &app.output.view;
    let balance = view.points(|r| r.record.balance_after);
    let peak = view.points(|r| r.derived.running_max);

    let [y_lo, y_hi] = padded_bounds(balance.iter().chain(peak.iter()).map(|&(_, y)| y));
    let (first, last) = x_range(app);

    let datasets = vec![
        Dataset::default()
            .name("Balance")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.accent))
            .data(&balance),
        Dataset::default()
            .name("Running Max")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.muted))
            .data(&peak),
    ];

    let chart = Chart::new(datasets)
        .x_axis(x_axis(theme, first, last))
        .y_axis(
            Axis::default()
                .title("Balance")
                .style(Style::default().fg(theme.text_secondary))
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::raw(format!("{y_lo:.0}")),
                    Span::raw(format!("{:.0}", (y_lo + y_hi) / 2.0)),
                    Span::raw(format!("{y_hi:.0}")),
                ]),
        );
    f.render_widget(chart, area);
}

fn render_winrate(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let points = app.output.view.points(|r| r.derived.running_winrate);
    let (first, last) = x_range(app);

    let datasets = vec![Dataset::default()
        .name("Winrate %")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.positive))
        .data(&points)];

    let chart = Chart::new(datasets)
        .x_axis(x_axis(theme, first, last))
        .y_axis(
            Axis::default()
                .title("%")
                .style(Style::default().fg(theme.text_secondary))
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );
    f.render_widget(chart, area);
}

fn bar_width(area: Rect, bars: usize) -> u16 {
    let bars = bars.max(1) as u16;
    (area.width.saturating_sub(bars) / bars).clamp(3, 12)
}

fn render_trades_per_market(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let per_market = &app.output.per_market;
    let bars: Vec<Bar> = per_market
        .iter()
        .map(|m| {
            Bar::default()
                .label(Line::from(m.market.clone()))
                .value(m.trades as u64)
                .style(Style::default().fg(theme.accent))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bars.len()))
        .bar_gap(1)
        .value_style(Style::default().fg(theme.background).bg(theme.accent));
    f.render_widget(chart, area);
}

fn render_winrate_per_market(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let rates = &app.output.market_win_rates;
    let bars: Vec<Bar> = rates
        .iter()
        .map(|m| {
            let color = theme.win_rate_color(m.win_rate);
            Bar::default()
                .label(Line::from(m.market.clone()))
                .value(m.win_rate.round() as u64)
                .text_value(format!("{:.1}", m.win_rate))
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bars.len()))
        .bar_gap(1)
        .max(100)
        .value_style(Style::default().fg(theme.background).bg(theme.positive));
    f.render_widget(chart, area);
}

/// Share of the view per market, one horizontal bar per line.
fn render_distribution(f: &mut Frame, area: Rect, app: &AppState) {
    let theme = &app.theme;
    let per_market = &app.output.per_market;
    let label_width = per_market
        .iter()
        .map(|m| m.market.len())
        .max()
        .unwrap_or(0);
    // label, space, bar, space, "100.0%"
    let bar_space = (area.width as usize).saturating_sub(label_width + 9);

    let lines: Vec<Line> = per_market
        .iter()
        .map(|m| distribution_line(m, label_width, bar_space, theme))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn distribution_line<'a>(
    m: &MarketBreakdown,
    label_width: usize,
    bar_space: usize,
    theme: &Theme,
) -> Line<'a> {
    let filled = ((m.share / 100.0) * bar_space as f64).round() as usize;
    Line::from(vec![
        Span::styled(
            format!("{:<width$} ", m.market, width = label_width),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(
            DISTRIBUTION_BAR.repeat(filled),
            Style::default().fg(theme.neutral),
        ),
        Span::styled(
            format!(" {:>5.1}%", m.share),
            Style::default().fg(theme.text_secondary),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app;
    use crate::ui::render_to_string;

    #[test]
    fn padded_bounds_handles_flat_and_empty() {
        assert_eq!(padded_bounds([5.0, 5.0].into_iter()), [4.0, 6.0]);
        assert_eq!(padded_bounds(std::iter::empty::<f64>()), [0.0, 1.0]);
        let [lo, hi] = padded_bounds([0.0, 100.0].into_iter());
        assert_eq!((lo, hi), (-5.0, 105.0));
    }

    #[test]
    fn every_tab_renders() {
        let mut app = test_app();
        for i in 0..ChartTab::COUNT {
            app.chart = ChartTab::from_index(i).unwrap();
            let screen = render_to_string(&app, 120, 32);
            assert!(screen.contains(app.chart.label()));
        }
    }

    #[test]
    fn distribution_lists_shares() {
        let mut app = test_app();
        app.chart = ChartTab::Distribution;
        let screen = render_to_string(&app, 120, 32);
        assert!(screen.contains("50.0%"));
        assert!(screen.contains("25.0%"));
    }

    #[test]
    fn empty_view_shows_message() {
        let mut app = test_app();
        app.clear_markets();
        let screen = render_to_string(&app, 120, 32);
        assert!(screen.contains("No data for the current filter"));
    }
}
