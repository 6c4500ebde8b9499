//! Keyboard input dispatch.
//!
//! | Key | Action |
//! | --- | --- |
//! | `j` / `k` / arrows | move the market cursor |
//! | `space` | toggle the market under the cursor |
//! | `a` / `d` | select all / clear markets |
//! | `r` | cycle result filter (All → WIN → LOSS) |
//! | `m` | toggle series mode |
//! | `tab` / `shift-tab` / `1`-`5` | switch chart |
//! | `q` / `esc` | quit |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, ChartTab};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Windows sends both Press and Release.
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_market_at_cursor(),
        KeyCode::Char('a') => app.select_all_markets(),
        KeyCode::Char('d') => app.clear_markets(),
        KeyCode::Char('r') => app.cycle_result(),
        KeyCode::Char('m') => app.toggle_series_mode(),
        KeyCode::Tab => {
            app.chart = if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.chart.prev()
            } else {
                app.chart.next()
            }
        }
        KeyCode::BackTab => app.chart = app.chart.prev(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(tab) = c
                .to_digit(10)
                .and_then(|d| ChartTab::from_index(d as usize - 1))
            {
                app.chart = tab;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_app;
    use crossterm::event::KeyEventState;
    use proptest::prelude::*;
    use tradedash_core::ResultFilter;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = test_app();
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
    }

    #[test]
    fn space_toggles_market_under_cursor() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert!(!app.is_selected("M2"));
        assert!(app.is_selected("M1"));
        assert_eq!(app.output.summary.total_trades, 3);
    }

    #[test]
    fn r_cycles_result_filter() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.spec.result, ResultFilter::Win);
    }

    #[test]
    fn number_keys_select_chart() {
        let mut app = test_app();
        handle_key(&mut app, press(KeyCode::Char('4')));
        assert_eq!(app.chart, ChartTab::WinratePerMarket);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.chart, ChartTab::Distribution);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.chart, ChartTab::WinratePerMarket);
    }

    fn key_strategy() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            Just(KeyCode::Char('j')),
            Just(KeyCode::Char('k')),
            Just(KeyCode::Char(' ')),
            Just(KeyCode::Char('a')),
            Just(KeyCode::Char('d')),
            Just(KeyCode::Char('r')),
            Just(KeyCode::Char('m')),
            Just(KeyCode::Tab),
            (1u32..=5).prop_map(|d| KeyCode::Char(char::from_digit(d, 10).unwrap_or('1'))),
        ]
    }

    proptest! {
        /// Any key sequence keeps the cached output in step with the filter.
        #[test]
        fn output_tracks_filter(keys in prop::collection::vec(key_strategy(), 0..40)) {
            let mut app = test_app();
            for code in keys {
                handle_key(&mut app, press(code));
            }
            prop_assert!(app.running);
            prop_assert!(app.cursor < app.markets.len());
            prop_assert_eq!(&app.output.spec, &app.spec);
            prop_assert_eq!(app.output.view.mode, app.dashboard.options().series_mode);
            for row in &app.output.view.rows {
                prop_assert!(app.spec.matches(&row.record));
            }
            let expected = app
                .dashboard
                .store()
                .records()
                .iter()
                .filter(|t| app.spec.matches(t))
                .count();
            prop_assert_eq!(app.output.summary.total_trades, expected);
        }
    }
}
