//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// App branding
const APP_NAME: &str = "EventEase Admin";
const TAGLINE: &str = "Marketplace administration";
const MESSAGE: &str = "Loading marketplace records...";

/// Loading spinner widget
pub struct Spinner {
    frame: usize,
    theme: Theme,
}

impl Spinner {
    pub fn new(frame: usize, theme: Theme) -> Self {
        Self { frame, theme }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 5 || area.width < 35 {
            return;
        }

        // 4 lines: name, tagline, empty, spinner
        let center_y = area.y + area.height / 2;
        let centered_x = |text: &str| {
            area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2
        };

        let name_y = center_y.saturating_sub(2);
        buf.set_string(
            centered_x(APP_NAME),
            name_y,
            APP_NAME,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        let tag_y = name_y + 1;
        buf.set_string(
            centered_x(TAGLINE),
            tag_y,
            TAGLINE,
            Style::default().fg(self.theme.muted()),
        );

        let spinner_text = format!("{} {}", self.current_char(), MESSAGE);
        buf.set_string(
            centered_x(&spinner_text),
            tag_y + 2,
            &spinner_text,
            Style::default().fg(self.theme.accent()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames() {
        assert_eq!(SPINNER_FRAMES.len(), 10);
    }

    #[test]
    fn test_spinner_current_char() {
        assert_eq!(Spinner::new(0, Theme::Dark).current_char(), '⠋');
        assert_eq!(Spinner::new(5, Theme::Dark).current_char(), '⠴');
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(Spinner::new(10, Theme::Dark).current_char(), '⠋');
    }

    #[test]
    fn test_next_frame() {
        assert_eq!(Spinner::next_frame(0), 1);
        assert_eq!(Spinner::next_frame(9), 0);
    }

    #[test]
    fn test_spinner_renders_message() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        Spinner::new(0, Theme::Dark).render(area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("EventEase Admin"));
        assert!(content.contains("Loading marketplace records..."));
    }
}
