//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;

/// Sections of (key, description) pairs
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("Tab / Shift+Tab", "Switch view"),
            ("1-5", "Jump to view"),
            ("Up/Down or j/k", "Select row / scroll"),
            ("Enter / v", "View details"),
        ],
    ),
    (
        "Actions",
        &[
            ("a", "Approve supplier"),
            ("d", "Delete supplier / client"),
            ("c", "Cancel booking"),
            ("s", "Cycle rating sort"),
            ("r", "Refresh"),
        ],
    ),
    (
        "General",
        &[
            ("L", "Log out"),
            ("q / Esc", "Quit"),
            ("Ctrl+C", "Quit now"),
            ("?", "Toggle help"),
        ],
    ),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn content_height() -> u16 {
        // padding + per section (header + separator + rows + padding) + hint
        let rows: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 3).sum();
        (rows + 2) as u16
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let height = Self::content_height() + 2;
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: height.min(area.height),
        }
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" eventease-admin v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let header_style = Style::default()
            .fg(self.theme.heading())
            .add_modifier(Modifier::BOLD);
        let sep = "─".repeat(inner.width as usize);

        let mut lines = vec![Line::default()];
        for (title, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(*title, header_style)));
            lines.push(Line::from(Span::styled(
                sep.clone(),
                Style::default().fg(self.theme.muted()),
            )));
            for (key, desc) in keys.iter() {
                lines.push(keybinding_line(key, desc, self.theme));
            }
            lines.push(Line::default());
        }
        lines.push(
            Line::from(Span::styled(
                "Press ? to close",
                Style::default().fg(self.theme.muted()),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Render a single keybinding line
fn keybinding_line(key: &str, desc: &str, theme: Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), Style::default().fg(theme.accent())),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup_area = HelpPopup::centered_area(area);
        let height = HelpPopup::content_height() + 2;

        assert_eq!(popup_area.width, POPUP_WIDTH);
        assert_eq!(popup_area.height, height);
        assert_eq!(popup_area.x, (100 - POPUP_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - height) / 2);
    }

    #[test]
    fn test_help_popup_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let popup_area = HelpPopup::centered_area(area);
        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }

    #[test]
    fn test_help_popup_lists_actions() {
        let area = Rect::new(0, 0, 80, 40);
        let popup_area = HelpPopup::centered_area(area);
        let mut buf = Buffer::empty(area);
        HelpPopup::new(Theme::Dark).render(popup_area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Approve supplier"));
        assert!(content.contains("Cancel booking"));
    }
}
