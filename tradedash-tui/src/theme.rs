//! Parrot/neon theme tokens.
//!
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (focus, primary series)
//! - **Positive**: neon green (wins, balance above start)
//! - **Negative**: hot pink (losses, drawdown)
//! - **Warning**: neon orange
//! - **Neutral**: cool purple (secondary series)
//! - **Muted**: steel blue (hints, unselected items)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Drawdown color: zero is at the peak, anything below is pink.
    pub fn drawdown_color(&self, drawdown: f64) -> Color {
        if drawdown < 0.0 {
            self.negative
        } else {
            self.positive
        }
    }

    /// Color for a win rate in percent.
    pub fn win_rate_color(&self, win_rate: f64) -> Color {
        match win_rate {
            w if w >= 70.0 => self.positive,
            w if w >= 50.0 => self.accent,
            w if w >= 40.0 => self.neutral,
            _ => self.warning,
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn title(&self, focused: bool) -> Style {
        let style = Style::default().fg(self.text_primary);
        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn muted_text(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
