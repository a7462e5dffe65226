//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::types::{AccountStatus, BookingStatus};

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, interactive elements)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Section headings and popup borders
    pub fn heading(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Peso amounts and scores
    pub fn money(self) -> Color {
        match self {
            Self::Dark => Color::Magenta,
            Self::Light => Color::Indexed(90), // dark magenta (ANSI 256)
        }
    }

    /// Approved / positive indicator color
    pub fn success(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    pub fn account_status(self, status: &AccountStatus) -> Color {
        match status {
            AccountStatus::Approved => self.success(),
            AccountStatus::Pending => self.heading(),
            AccountStatus::Other(_) => self.muted(),
        }
    }

    pub fn booking_status(self, status: &BookingStatus) -> Color {
        match status {
            BookingStatus::Pending => self.heading(),
            BookingStatus::Cancelled => self.error(),
            BookingStatus::Other(_) => self.muted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.heading(), Color::Yellow);
        assert_eq!(t.money(), Color::Magenta);
        assert_eq!(t.success(), Color::Green);
        assert_eq!(t.error(), Color::Red);
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.heading(), Color::Indexed(130));
        assert_eq!(t.money(), Color::Indexed(90));
        assert_eq!(t.success(), Color::Indexed(22));
        assert_eq!(t.error(), Color::Indexed(124));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_status_colors() {
        let t = Theme::Dark;
        assert_eq!(t.account_status(&AccountStatus::Approved), t.success());
        assert_eq!(t.account_status(&AccountStatus::Pending), t.heading());
        assert_eq!(t.booking_status(&BookingStatus::Cancelled), t.error());
        assert_eq!(
            t.booking_status(&BookingStatus::Other("Done".into())),
            t.muted()
        );
    }
}
