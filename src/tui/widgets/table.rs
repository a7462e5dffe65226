//! Record table shared by every admin view
//!
//! Layout: tab bar, header, scrolling rows with a selection marker, and a
//! footer line (notice or key hints). Narrow terminals drop columns in each
//! column's `hide_rank` order.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;

/// Maximum content width (consistent across views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Width of the selection marker column ("▸ ")
const MARKER_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub width: u16,
    pub align: Align,
    /// Lower ranks are hidden first; `None` is always shown
    pub hide_rank: Option<u8>,
}

impl Column {
    pub const fn left(label: &'static str, width: u16) -> Self {
        Self {
            label,
            width,
            align: Align::Left,
            hide_rank: None,
        }
    }

    pub const fn right(label: &'static str, width: u16) -> Self {
        Self {
            label,
            width,
            align: Align::Right,
            hide_rank: None,
        }
    }

    pub const fn hide(mut self, rank: u8) -> Self {
        self.hide_rank = Some(rank);
        self
    }
}

/// One table cell; `color` overrides the default text color
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// Determine which columns fit in `width`
pub fn visible_columns(columns: &[Column], width: u16) -> Vec<usize> {
    let mut hide_order: Vec<(u8, usize)> = columns
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.hide_rank.map(|r| (r, i)))
        .collect();
    hide_order.sort();

    let mut visible: Vec<usize> = (0..columns.len()).collect();
    for (_, col_idx) in hide_order {
        if table_width_for(columns, &visible) <= width {
            return visible;
        }
        visible.retain(|&i| i != col_idx);
    }
    visible
}

fn table_width_for(columns: &[Column], visible: &[usize]) -> u16 {
    MARKER_WIDTH + visible.iter().map(|&i| columns[i].width).sum::<u16>()
}

/// First row to draw so that `selected` stays on screen
pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return selected;
    }
    selected.saturating_sub(visible_rows - 1)
}

/// Truncate a string to max chars, appending "…" if truncated
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars()
                .take(max_chars.saturating_sub(1))
                .collect::<String>()
        )
    }
}

/// Table body: rows, an error in place of rows, or an empty-state message
pub enum TableBody<'a> {
    Rows(&'a [Vec<Cell>]),
    Error(&'a str),
}

pub struct RecordTable<'a> {
    tab: Tab,
    columns: &'a [Column],
    body: TableBody<'a>,
    selected: usize,
    empty_message: &'a str,
    caption: Option<String>,
    footer: Line<'a>,
    theme: Theme,
}

impl<'a> RecordTable<'a> {
    pub fn new(tab: Tab, columns: &'a [Column], body: TableBody<'a>, theme: Theme) -> Self {
        Self {
            tab,
            columns,
            body,
            selected: 0,
            empty_message: "Nothing to show",
            caption: None,
            footer: Line::default(),
            theme,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Right-aligned caption on the header separator (counts, sort order)
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn footer(mut self, footer: Line<'a>) -> Self {
        self.footer = footer;
        self
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // 0: Top padding
            Constraint::Length(1), // 1: Tab bar
            Constraint::Length(1), // 2: Separator (+ caption)
            Constraint::Length(1), // 3: Header
            Constraint::Fill(1),   // 4: Rows
            Constraint::Length(1), // 5: Separator
            Constraint::Length(1), // 6: Footer
        ])
        .split(centered_area);

        TabBar::new(self.tab, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);
        if let Some(caption) = &self.caption {
            let text = format!(" {} ", caption);
            let x = chunks[2].x + chunks[2].width.saturating_sub(text.chars().count() as u16 + 2);
            buf.set_string(x, chunks[2].y, &text, Style::default().fg(self.theme.muted()));
        }

        let visible = visible_columns(self.columns, centered_area.width);
        let tw = table_width_for(self.columns, &visible).min(centered_area.width);
        let table_x = centered_area.x + centered_area.width.saturating_sub(tw) / 2;

        self.render_header(
            Rect {
                x: table_x,
                width: tw,
                ..chunks[3]
            },
            buf,
            &visible,
        );

        match &self.body {
            TableBody::Error(message) => self.render_message(
                chunks[4],
                buf,
                &format!("Failed to load: {}", message),
                self.theme.error(),
            ),
            TableBody::Rows([]) => {
                self.render_message(chunks[4], buf, self.empty_message, self.theme.muted())
            }
            TableBody::Rows(rows) => self.render_rows(
                Rect {
                    x: table_x,
                    width: tw,
                    ..chunks[4]
                },
                buf,
                rows,
                &visible,
            ),
        }

        render_separator(chunks[5], buf, self.theme);
        Paragraph::new(self.footer.clone())
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
    }
}

impl RecordTable<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer, visible: &[usize]) {
        let header_style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::raw(" ".repeat(MARKER_WIDTH as usize))];
        for &col in visible {
            let column = &self.columns[col];
            spans.push(Span::styled(pad(column.label, column), header_style));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer, rows: &[Vec<Cell>], visible: &[usize]) {
        let visible_rows = area.height as usize;
        let start = scroll_offset(self.selected, visible_rows);

        for (line, (idx, row)) in rows.iter().enumerate().skip(start).take(visible_rows).enumerate() {
            let is_selected = idx == self.selected;
            let marker_style = Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD);
            let mut spans = vec![Span::styled(
                if is_selected { "▸ " } else { "  " },
                marker_style,
            )];

            for &col in visible {
                let column = &self.columns[col];
                let cell = row.get(col);
                let text = cell.map(|c| c.text.as_str()).unwrap_or("");
                let color = cell.and_then(|c| c.color).unwrap_or(self.theme.text());
                let mut style = Style::default().fg(color);
                if is_selected {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                spans.push(Span::styled(pad(text, column), style));
            }

            Paragraph::new(Line::from(spans)).render(
                Rect {
                    y: area.y + line as u16,
                    height: 1,
                    ..area
                },
                buf,
            );
        }
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer, message: &str, color: Color) {
        if area.height == 0 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            truncate_str(message, area.width as usize),
            Style::default().fg(color),
        )))
        .alignment(Alignment::Center)
        .render(
            Rect {
                y: area.y + area.height / 3,
                height: 1,
                ..area
            },
            buf,
        );
    }
}

/// Fit text into a column, one trailing space as a gutter
fn pad(text: &str, column: &Column) -> String {
    let inner = column.width.saturating_sub(1) as usize;
    let text = truncate_str(text, inner);
    match column.align {
        Align::Left => format!("{:<inner$} ", text),
        Align::Right => format!("{:>inner$} ", text),
    }
}

fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Rows available for the table body at a given terminal height
pub fn table_visible_rows(terminal_height: u16) -> usize {
    // padding(1) + tabs(1) + sep(1) + header(1) + sep(1) + footer(1) = 6
    terminal_height.saturating_sub(6) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: [Column; 4] = [
        Column::left("Name", 20),
        Column::left("Email", 24).hide(1),
        Column::left("Location", 16).hide(0),
        Column::right("Price", 12),
    ];

    fn rows() -> Vec<Vec<Cell>> {
        (0..30)
            .map(|i| {
                vec![
                    Cell::plain(format!("Supplier {}", i)),
                    Cell::plain("a@example.com"),
                    Cell::plain("Cebu"),
                    Cell::plain("₱1,000.00"),
                ]
            })
            .collect()
    }

    fn render_to_string(table: RecordTable<'_>, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        table.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_visible_columns_full() {
        assert_eq!(visible_columns(&COLUMNS, 200), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_visible_columns_hide_lowest_rank_first() {
        // 2 + 20 + 24 + 16 + 12 = 74
        let cols = visible_columns(&COLUMNS, 73);
        assert_eq!(cols, vec![0, 1, 3]);
    }

    #[test]
    fn test_visible_columns_minimum() {
        let cols = visible_columns(&COLUMNS, 10);
        assert_eq!(cols, vec![0, 3]);
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(25, 10), 16);
        assert_eq!(scroll_offset(3, 0), 3);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello w…");
    }

    #[test]
    fn test_pad_alignment() {
        assert_eq!(pad("ab", &Column::left("x", 5)), "ab   ");
        assert_eq!(pad("ab", &Column::right("x", 5)), "  ab ");
        assert_eq!(pad("abcdefg", &Column::left("x", 5)), "abc… ");
    }

    #[test]
    fn test_table_visible_rows() {
        assert_eq!(table_visible_rows(24), 18);
        assert_eq!(table_visible_rows(4), 0);
    }

    #[test]
    fn test_render_scrolls_to_selected_row() {
        let rows = rows();
        let area = Rect::new(0, 0, 100, 16);
        let table = RecordTable::new(Tab::Suppliers, &COLUMNS, TableBody::Rows(&rows), Theme::Dark)
            .selected(25);
        let content = render_to_string(table, area);
        assert!(content.contains("Supplier 25"));
        assert!(!content.contains("Supplier 0 "));
    }

    #[test]
    fn test_render_empty_message() {
        let area = Rect::new(0, 0, 100, 16);
        let table = RecordTable::new(Tab::Clients, &COLUMNS, TableBody::Rows(&[]), Theme::Dark)
            .empty_message("No clients");
        assert!(render_to_string(table, area).contains("No clients"));
    }

    #[test]
    fn test_render_error_body() {
        let area = Rect::new(0, 0, 100, 16);
        let table = RecordTable::new(
            Tab::Ratings,
            &COLUMNS,
            TableBody::Error("store error: timeout"),
            Theme::Dark,
        );
        assert!(render_to_string(table, area).contains("Failed to load: store error: timeout"));
    }

    #[test]
    fn test_render_caption_and_footer() {
        let rows = rows();
        let area = Rect::new(0, 0, 100, 16);
        let table = RecordTable::new(Tab::Ratings, &COLUMNS, TableBody::Rows(&rows), Theme::Dark)
            .caption("Sort: Highest rated")
            .footer(Line::from("Supplier approved"));
        let content = render_to_string(table, area);
        assert!(content.contains("Sort: Highest rated"));
        assert!(content.contains("Supplier approved"));
    }
}
