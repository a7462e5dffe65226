//! Yes/No confirmation popup (quit, delete)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const POPUP_MIN_WIDTH: u16 = 36;
const POPUP_HEIGHT: u16 = 7;

/// Selection inside a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmState {
    /// 0 = Yes, 1 = No (default)
    pub selection: u8,
}

impl Default for ConfirmState {
    fn default() -> Self {
        Self { selection: 1 }
    }
}

impl ConfirmState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.selection = 1 - self.selection.min(1);
    }

    pub fn is_yes(self) -> bool {
        self.selection == 0
    }
}

/// Confirmation popup overlay
pub struct ConfirmPopup<'a> {
    title: &'a str,
    question: &'a str,
    state: ConfirmState,
    theme: Theme,
}

impl<'a> ConfirmPopup<'a> {
    pub fn new(title: &'a str, question: &'a str, state: ConfirmState, theme: Theme) -> Self {
        Self {
            title,
            question,
            state,
            theme,
        }
    }

    /// Centered area wide enough for the question
    pub fn centered_area(&self, area: Rect) -> Rect {
        let width = (self.question.chars().count() as u16 + 6).max(POPUP_MIN_WIDTH);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: width.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Widget for ConfirmPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.heading()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Question
            Constraint::Length(1), // [2] Padding
            Constraint::Length(1), // [3] Buttons
            Constraint::Length(1), // [4] Key hints
        ])
        .split(inner);

        Paragraph::new(Line::from(Span::styled(
            self.question,
            Style::default().fg(self.theme.text()),
        )))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let button = |selected: bool| {
            if selected {
                (
                    "▸ ",
                    Style::default()
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(self.theme.muted()))
            }
        };
        let (yes_marker, yes_style) = button(self.state.is_yes());
        let (no_marker, no_style) = button(!self.state.is_yes());

        let buttons_line = Line::from(vec![
            Span::styled(yes_marker, yes_style),
            Span::styled("Yes", yes_style),
            Span::styled("       ", Style::default()),
            Span::styled(no_marker, no_style),
            Span::styled("No", no_style),
        ]);
        Paragraph::new(buttons_line)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let key_style = Style::default()
            .fg(self.theme.muted())
            .add_modifier(Modifier::BOLD);
        let hint_line = Line::from(vec![
            Span::styled("←→", key_style),
            Span::styled(" Select  ", Style::default().fg(self.theme.muted())),
            Span::styled("Enter", key_style),
            Span::styled(" Confirm", Style::default().fg(self.theme.muted())),
        ]);
        Paragraph::new(hint_line)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_default_selection_is_no() {
        let state = ConfirmState::new();
        assert_eq!(state.selection, 1);
        assert!(!state.is_yes());
    }

    #[test]
    fn test_confirm_toggle() {
        let mut state = ConfirmState::new();
        state.toggle();
        assert!(state.is_yes());
        state.toggle();
        assert!(!state.is_yes());
    }

    #[test]
    fn test_confirm_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = ConfirmPopup::new("Quit?", "Are you sure you want to quit?", ConfirmState::new(), Theme::Dark);
        let popup_area = popup.centered_area(area);

        assert_eq!(popup_area.width, POPUP_MIN_WIDTH);
        assert_eq!(popup_area.height, POPUP_HEIGHT);
        assert_eq!(popup_area.x, (100 - POPUP_MIN_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - POPUP_HEIGHT) / 2);
    }

    #[test]
    fn test_confirm_widens_for_long_question() {
        let area = Rect::new(0, 0, 100, 50);
        let question = "Delete supplier Reyes Lights and Sound Rentals?";
        let popup = ConfirmPopup::new("Delete", question, ConfirmState::new(), Theme::Dark);
        assert_eq!(
            popup.centered_area(area).width,
            question.chars().count() as u16 + 6
        );
    }

    #[test]
    fn test_confirm_small_terminal() {
        let area = Rect::new(0, 0, 20, 4);
        let popup = ConfirmPopup::new("Quit?", "Quit?", ConfirmState::new(), Theme::Dark);
        let popup_area = popup.centered_area(area);
        assert_eq!(popup_area.width, 20);
        assert_eq!(popup_area.height, 4);
    }

    #[test]
    fn test_confirm_renders_yes_selected() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let popup = ConfirmPopup::new(
            "Quit?",
            "Are you sure you want to quit?",
            ConfirmState { selection: 0 },
            Theme::Dark,
        );
        let popup_area = popup.centered_area(area);
        popup.render(popup_area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Quit?"));
        assert!(content.contains("Yes"));
        assert!(content.contains("No"));
    }
}
