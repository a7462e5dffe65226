//! Login screen: username and password form

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::tui::theme::Theme;

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 12;
const FIELD_WIDTH: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub show_password: bool,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit the form; Enter on the password field submits
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('t') {
                self.show_password = !self.show_password;
            }
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Enter => match self.focus {
                LoginField::Username => self.focus = LoginField::Password,
                LoginField::Password => return LoginAction::Submit,
            },
            KeyCode::Backspace => {
                self.active_mut().pop();
            }
            KeyCode::Char(c) => {
                self.active_mut().push(c);
                self.error = None;
            }
            _ => {}
        }
        LoginAction::None
    }

    /// Clear the password after a failed attempt
    pub fn reject(&mut self, message: impl Into<String>) {
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = Some(message.into());
    }

    fn active_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Password as displayed (masked unless revealed)
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }
}

pub struct LoginView<'a> {
    form: &'a LoginForm,
    theme: Theme,
}

impl<'a> LoginView<'a> {
    pub fn new(form: &'a LoginForm, theme: Theme) -> Self {
        Self { form, theme }
    }

    fn field_line(&self, label: &str, value: String, focused: bool) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted())
        };
        // Keep the tail visible while typing
        let shown: String = {
            let count = value.chars().count();
            value.chars().skip(count.saturating_sub(FIELD_WIDTH - 1)).collect()
        };
        let cursor = if focused { "▏" } else { " " };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), label_style),
            Span::styled(
                format!("{:<width$}", format!("{}{}", shown, cursor), width = FIELD_WIDTH),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ])
    }
}

impl Widget for LoginView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form_area = Rect {
            x: area.x + area.width.saturating_sub(FORM_WIDTH) / 2,
            y: area.y + area.height.saturating_sub(FORM_HEIGHT) / 2,
            width: FORM_WIDTH.min(area.width),
            height: FORM_HEIGHT.min(area.height),
        };

        let block = Block::default()
            .title(" EventEase Admin ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));
        let inner = block.inner(form_area);
        block.render(form_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Username
            Constraint::Length(1), // [2] Padding
            Constraint::Length(1), // [3] Password
            Constraint::Length(1), // [4] Padding
            Constraint::Length(1), // [5] Error
            Constraint::Length(1), // [6] Padding
            Constraint::Length(1), // [7] Hints
            Constraint::Min(0),
        ])
        .split(inner);

        let focus = self.form.focus;
        Paragraph::new(self.field_line(
            "Username",
            self.form.username.clone(),
            focus == LoginField::Username,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
        Paragraph::new(self.field_line(
            "Password",
            self.form.password_display(),
            focus == LoginField::Password,
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        if let Some(error) = &self.form.error {
            Paragraph::new(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(self.theme.error()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        let key_style = Style::default().fg(self.theme.accent());
        let hint_style = Style::default().fg(self.theme.muted());
        let toggle = if self.form.show_password {
            ": Hide  "
        } else {
            ": Show  "
        };
        Paragraph::new(Line::from(vec![
            Span::styled("Tab", key_style),
            Span::styled(": Field  ", hint_style),
            Span::styled("Ctrl+T", key_style),
            Span::styled(toggle, hint_style),
            Span::styled("Enter", key_style),
            Span::styled(": Login", hint_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut LoginForm, s: &str) {
        for c in s.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), LoginAction::None);
        assert_eq!(form.focus, LoginField::Password);
        type_str(&mut form, "pw1");
        form.handle_key(key(KeyCode::Backspace));

        assert_eq!(form.username, "admin");
        assert_eq!(form.password, "pw");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut form = LoginForm::new();
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, LoginField::Password);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, LoginField::Username);
    }

    #[test]
    fn test_password_masked_until_revealed() {
        let mut form = LoginForm::new();
        form.focus = LoginField::Password;
        type_str(&mut form, "secret");
        assert_eq!(form.password_display(), "••••••");

        form.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(form.show_password);
        assert_eq!(form.password_display(), "secret");
        // Control chords are not typed into the field
        assert_eq!(form.password, "secret");
    }

    #[test]
    fn test_reject_clears_password_and_sets_error() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        form.focus = LoginField::Password;
        type_str(&mut form, "wrong");
        form.reject("invalid username or password");

        assert!(form.password.is_empty());
        assert_eq!(form.username, "admin");
        assert_eq!(form.error.as_deref(), Some("invalid username or password"));

        type_str(&mut form, "x");
        assert!(form.error.is_none());
    }

    #[test]
    fn test_login_view_renders() {
        let mut form = LoginForm::new();
        type_str(&mut form, "admin");
        form.focus = LoginField::Password;
        type_str(&mut form, "hunter2");
        form.error = Some("invalid username or password".into());

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        LoginView::new(&form, Theme::Dark).render(area, &mut buf);
        let content: String = buf.content().iter().map(|c| c.symbol()).collect();

        assert!(content.contains("EventEase Admin"));
        assert!(content.contains("admin"));
        assert!(!content.contains("hunter2"));
        assert!(content.contains("invalid username or password"));
    }
}
