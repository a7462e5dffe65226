//! Record detail popup (the "view" modal)

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 16;
/// Spacer line plus the close hint
const HINT_ROWS: u16 = 2;

/// Label/value pairs shown in the popup
pub type DetailFields = Vec<(String, String)>;

pub struct DetailPopup<'a> {
    title: &'a str,
    fields: &'a [(String, String)],
    scroll: u16,
    theme: Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(title: &'a str, fields: &'a [(String, String)], theme: Theme) -> Self {
        Self {
            title,
            fields,
            scroll: 0,
            theme,
        }
    }

    /// First body line to show
    pub fn scroll(mut self, offset: u16) -> Self {
        self.scroll = offset;
        self
    }

    /// Largest useful scroll offset when centered in `area`
    pub fn max_scroll(&self, area: Rect) -> u16 {
        let popup = self.centered_area(area);
        body_len(self.fields).saturating_sub(body_rows(popup))
    }

    /// Centered area: one line per field plus border, padding and hint
    pub fn centered_area(&self, area: Rect) -> Rect {
        let height = self.fields.len() as u16 + 5;
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

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(area);
        block.render(area, buf);

        let label_style = Style::default()
            .fg(self.theme.heading())
            .add_modifier(Modifier::BOLD);
        let value_style = Style::default().fg(self.theme.text());

        let mut lines = vec![Line::default()];
        for (label, value) in self.fields {
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<width$}", label, width = LABEL_WIDTH), label_style),
                Span::styled(value.as_str(), value_style),
            ]));
        }

        let max_scroll = body_len(self.fields).saturating_sub(body_rows(area));
        let body = Rect {
            height: inner.height.saturating_sub(HINT_ROWS),
            ..inner
        };
        Paragraph::new(lines)
            .scroll((self.scroll.min(max_scroll), 0))
            .render(body, buf);

        if inner.height == 0 {
            return;
        }
        let hint = if max_scroll > 0 {
            "↑↓ scroll · Esc / Enter to close"
        } else {
            "Esc / Enter to close"
        };
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(
            Rect {
                y: inner.y + inner.height - 1,
                height: 1,
                ..inner
            },
            buf,
        );
    }
}

/// Leading blank line plus one line per field
fn body_len(fields: &[(String, String)]) -> u16 {
    fields.len() as u16 + 1
}

/// Rows left for fields inside a popup of this size (borders, spacer, hint)
fn body_rows(popup: Rect) -> u16 {
    popup.height.saturating_sub(2 + HINT_ROWS)
}
