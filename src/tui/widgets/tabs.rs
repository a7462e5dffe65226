//! Tab bar widget for view navigation

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Admin views, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Suppliers,
    Bookings,
    Payments,
    Ratings,
    Clients,
}

impl Tab {
    /// Get the display label for this tab
    pub fn label(self) -> &'static str {
        match self {
            Self::Suppliers => "Suppliers",
            Self::Bookings => "Bookings",
            Self::Payments => "Payments",
            Self::Ratings => "Ratings",
            Self::Clients => "Clients",
        }
    }

    /// Get all tabs in order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Suppliers,
            Tab::Bookings,
            Tab::Payments,
            Tab::Ratings,
            Tab::Clients,
        ]
    }

    /// Position in [`Tab::all`]
    pub fn index(self) -> usize {
        match self {
            Self::Suppliers => 0,
            Self::Bookings => 1,
            Self::Payments => 2,
            Self::Ratings => 3,
            Self::Clients => 4,
        }
    }

    /// Get the next tab (wrapping)
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Get the previous tab (wrapping)
    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Get tab from number key (1-5)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=5 => Some(Self::all()[(n - 1) as usize]),
            _ => None,
        }
    }
}

/// Tab bar widget showing available views
pub struct TabBar {
    selected: Tab,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Tab, theme: Theme) -> Self {
        Self { selected, theme }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let labels: Vec<String> = Tab::all()
            .iter()
            .map(|tab| {
                if *tab == self.selected {
                    format!("[{}]", tab.label())
                } else {
                    tab.label().to_string()
                }
            })
            .collect();

        // Centered, two spaces between labels
        let total_width: u16 = labels
            .iter()
            .map(|l| l.len() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);
        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for (tab, display) in Tab::all().iter().zip(&labels) {
            let display_len = display.len() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if *tab == self.selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, display, style);
            x += display_len + 2;
        }
    }
}
