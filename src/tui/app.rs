//! Application state and event loop

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    DefaultTerminal, Frame,
};
use tracing::{info, warn};

use crate::services::{
    bookings, suppliers, BookingService, ClientService, DashboardData, DashboardLoader,
    RatingSort, Session, SupplierService,
};
use crate::store::RecordStore;
use crate::types::{remove_by_id, AccountStatus, RatingGroup};

use super::theme::Theme;
use super::widgets::{
    confirm::{ConfirmPopup, ConfirmState},
    detail::{DetailFields, DetailPopup},
    help::HelpPopup,
    login::{LoginAction, LoginForm, LoginView},
    spinner::Spinner,
    table::{Cell, Column, RecordTable, TableBody},
    tabs::Tab,
    views,
};

/// Application state
pub enum AppState {
    /// Waiting for credentials
    Login { form: LoginForm },
    /// First load in progress
    Loading { spinner_frame: usize },
    /// Records loaded (individual views may still carry load errors)
    Ready { data: Box<DashboardData> },
    /// Load could not complete
    Error { message: String },
}

/// Record a delete confirmation refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Supplier { id: String, name: String },
    Client { id: String, name: String },
}

impl DeleteTarget {
    fn question(&self) -> String {
        match self {
            Self::Supplier { name, .. } => format!("Delete supplier {}?", name),
            Self::Client { name, .. } => format!("Delete client {}?", name),
        }
    }
}

/// Modal interaction on the current view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    ConfirmingDelete {
        target: DeleteTarget,
        confirm: ConfirmState,
    },
    Viewing {
        index: usize,
        scroll: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Status-line message from the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    selections: [usize; 5],
    interaction: Interaction,
    quit_confirm: Option<ConfirmState>,
    show_help: bool,
    notice: Option<Notice>,
    rating_sort: RatingSort,
    session: Session,
    store: Arc<dyn RecordStore>,
    theme: Theme,
    refresh_interval: Option<Duration>,
    last_loaded: Option<Instant>,
    loader: Option<Receiver<DashboardData>>,
    /// Last drawn frame area, for popup scroll limits
    viewport: Rect,
}

impl App {
    /// Create the app: login screen unless the session is already authenticated
    pub fn new(
        session: Session,
        store: Arc<dyn RecordStore>,
        theme: Theme,
        refresh_interval: Option<Duration>,
    ) -> Self {
        let state = if session.is_authenticated() {
            AppState::Loading { spinner_frame: 0 }
        } else {
            AppState::Login {
                form: LoginForm::new(),
            }
        };
        Self {
            state,
            should_quit: false,
            current_tab: Tab::default(),
            selections: [0; 5],
            interaction: Interaction::Idle,
            quit_confirm: None,
            show_help: false,
            notice: None,
            rating_sort: RatingSort::default(),
            session,
            store,
            theme,
            refresh_interval,
            last_loaded: None,
            loader: None,
            viewport: Rect::new(0, 0, 80, 24),
        }
    }

    /// Spawn a background full load. Ready data stays on screen while refreshing.
    pub fn start_load(&mut self) {
        if self.loader.is_some() {
            return;
        }
        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(DashboardLoader::load(store.as_ref()));
        });
        self.loader = Some(rx);

        if !matches!(self.state, AppState::Ready { .. }) {
            self.state = AppState::Loading { spinner_frame: 0 };
        }
    }

    /// Check for a finished background load (non-blocking)
    pub fn poll_load(&mut self) {
        let Some(rx) = &self.loader else {
            return;
        };
        match rx.try_recv() {
            Ok(data) => {
                self.loader = None;
                self.apply_data(data);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.loader = None;
                warn!("loader thread exited without a result");
                if !matches!(self.state, AppState::Ready { .. }) {
                    self.state = AppState::Error {
                        message: "loading stopped unexpectedly".to_string(),
                    };
                }
            }
        }
    }

    /// Install freshly loaded records
    fn apply_data(&mut self, data: DashboardData) {
        // A logout while loading wins over late data
        if matches!(self.state, AppState::Login { .. }) {
            return;
        }
        let was_ready = matches!(self.state, AppState::Ready { .. });
        self.state = AppState::Ready {
            data: Box::new(data),
        };
        self.last_loaded = Some(Instant::now());
        self.interaction = Interaction::Idle;
        for tab in Tab::all() {
            self.clamp_selection(*tab);
        }
        if was_ready {
            self.set_notice(NoticeKind::Info, "Refreshed");
        }
    }

    fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Whether the periodic refresh should fire
    pub fn refresh_due(&self, now: Instant) -> bool {
        match (self.refresh_interval, self.last_loaded) {
            (Some(interval), Some(last)) => {
                !self.is_loading()
                    && matches!(self.state, AppState::Ready { .. })
                    && now.duration_since(last) >= interval
            }
            _ => false,
        }
    }

    fn set_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
        });
    }

    fn data(&self) -> Option<&DashboardData> {
        match &self.state {
            AppState::Ready { data } => Some(data.as_ref()),
            _ => None,
        }
    }

    fn data_mut(&mut self) -> Option<&mut DashboardData> {
        match &mut self.state {
            AppState::Ready { data } => Some(data.as_mut()),
            _ => None,
        }
    }

    fn row_count(&self, tab: Tab) -> usize {
        let Some(data) = self.data() else {
            return 0;
        };
        match tab {
            Tab::Suppliers => data.suppliers.as_ref().map_or(0, Vec::len),
            Tab::Bookings => data.bookings.as_ref().map_or(0, Vec::len),
            Tab::Payments => data.payments.as_ref().map_or(0, Vec::len),
            Tab::Ratings => data.ratings.as_ref().map_or(0, Vec::len),
            Tab::Clients => data.clients.as_ref().map_or(0, Vec::len),
        }
    }

    fn selected(&self) -> usize {
        self.selections[self.current_tab.index()]
    }

    fn clamp_selection(&mut self, tab: Tab) {
        let max = self.row_count(tab).saturating_sub(1);
        let slot = &mut self.selections[tab.index()];
        *slot = (*slot).min(max);
    }

    /// Rating groups in display order
    fn sorted_ratings(&self) -> Vec<&RatingGroup> {
        let mut groups: Vec<&RatingGroup> = match self.data().map(|d| &d.ratings) {
            Some(Ok(groups)) => groups.iter().collect(),
            _ => Vec::new(),
        };
        self.rating_sort.apply(&mut groups);
        groups
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.quit_confirm.is_some() {
            self.handle_quit_confirm_key(key);
            return;
        }

        if matches!(self.state, AppState::Login { .. }) {
            self.handle_login_key(key);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match self.interaction.clone() {
            Interaction::ConfirmingDelete { target, confirm } => {
                self.handle_delete_confirm_key(key, target, confirm)
            }
            Interaction::Viewing { index, scroll } => self.handle_viewing_key(key, index, scroll),
            Interaction::Idle => self.handle_idle_key(key),
        }
    }

    fn handle_viewing_key(&mut self, key: KeyEvent, index: usize, scroll: u16) {
        let scroll = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('v') | KeyCode::Char('q') => {
                self.interaction = Interaction::Idle;
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self
                    .detail_for(index)
                    .map(|(title, fields)| {
                        DetailPopup::new(title, &fields, self.theme).max_scroll(self.viewport)
                    })
                    .unwrap_or(0);
                (scroll + 1).min(max)
            }
            _ => return,
        };
        self.interaction = Interaction::Viewing { index, scroll };
    }

    /// Refuse mutations while a reload is in flight; its data predates them
    fn mutation_blocked(&mut self) -> bool {
        if self.is_loading() {
            self.set_notice(NoticeKind::Error, "Refresh in progress, try again when it finishes");
            true
        } else {
            false
        }
    }

    fn handle_quit_confirm_key(&mut self, key: KeyEvent) {
        let Some(confirm) = self.quit_confirm.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab => {
                confirm.toggle();
            }
            KeyCode::Enter => {
                if confirm.is_yes() {
                    self.should_quit = true;
                }
                self.quit_confirm = None;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.should_quit = true;
                self.quit_confirm = None;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
                self.quit_confirm = None;
            }
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.quit_confirm = Some(ConfirmState::new());
            return;
        }
        let AppState::Login { form } = &mut self.state else {
            return;
        };
        if form.handle_key(key) != LoginAction::Submit {
            return;
        }

        let username = form.username.trim().to_string();
        let password = form.password.clone();
        match self.session.login(&username, &password) {
            Ok(()) => {
                self.notice = None;
                self.start_load();
            }
            Err(e) => {
                if let AppState::Login { form } = &mut self.state {
                    form.reject(e.to_string());
                }
            }
        }
    }

    fn handle_idle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.quit_confirm = Some(ConfirmState::new());
            }
            KeyCode::Tab => self.current_tab = self.current_tab.next(),
            KeyCode::BackTab => self.current_tab = self.current_tab.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let slot = &mut self.selections[self.current_tab.index()];
                *slot = slot.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.row_count(self.current_tab).saturating_sub(1);
                let slot = &mut self.selections[self.current_tab.index()];
                *slot = (*slot + 1).min(max);
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => {
                if !matches!(self.state, AppState::Loading { .. }) {
                    self.set_notice(NoticeKind::Info, "Refreshing...");
                    self.start_load();
                }
            }
            KeyCode::Char('L') => self.logout(),
            KeyCode::Enter | KeyCode::Char('v') => {
                if self.row_count(self.current_tab) > 0 {
                    self.interaction = Interaction::Viewing {
                        index: self.selected(),
                        scroll: 0,
                    };
                }
            }
            KeyCode::Char('a') if self.current_tab == Tab::Suppliers => self.approve_selected(),
            KeyCode::Char('c') if self.current_tab == Tab::Bookings => self.cancel_selected(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('s') if self.current_tab == Tab::Ratings => {
                self.rating_sort = self.rating_sort.next();
                self.selections[Tab::Ratings.index()] = 0;
            }
            _ => {}
        }
    }

    fn logout(&mut self) {
        match self.session.logout() {
            Ok(()) => {
                self.state = AppState::Login {
                    form: LoginForm::new(),
                };
                self.loader = None;
                self.last_loaded = None;
                self.interaction = Interaction::Idle;
                self.selections = [0; 5];
                self.notice = None;
            }
            Err(e) => self.set_notice(NoticeKind::Error, format!("Logout failed: {}", e)),
        }
    }

    fn approve_selected(&mut self) {
        if self.mutation_blocked() {
            return;
        }
        let index = self.selected();
        let Some(Ok(list)) = self.data().map(|d| &d.suppliers) else {
            return;
        };
        let Some(supplier) = list.get(index) else {
            return;
        };
        let already = supplier.account_status == AccountStatus::Approved;
        let id = supplier.id.clone();
        let name = display_name(&supplier.supplier_name, &supplier.id);
        if already {
            self.set_notice(NoticeKind::Info, "Supplier is already approved");
            return;
        }

        match SupplierService::new(self.store.as_ref()).approve(&id) {
            Ok(()) => {
                if let Some(Ok(list)) = self.data_mut().map(|d| &mut d.suppliers) {
                    suppliers::mark_approved(list, &id);
                }
                self.set_notice(NoticeKind::Info, format!("Supplier {} approved", name));
            }
            Err(e) => {
                warn!(id = %id, error = %e, "approve failed");
                self.set_notice(NoticeKind::Error, format!("Approve failed: {}", e));
            }
        }
    }

    fn cancel_selected(&mut self) {
        if self.mutation_blocked() {
            return;
        }
        let index = self.selected();
        let Some(Ok(rows)) = self.data().map(|d| &d.bookings) else {
            return;
        };
        let Some(row) = rows.get(index) else {
            return;
        };
        let already = row.booking.is_cancelled();
        let id = row.booking.id.clone();
        if already {
            self.set_notice(NoticeKind::Info, "Booking is already cancelled");
            return;
        }

        match BookingService::new(self.store.as_ref()).cancel(&id) {
            Ok(()) => {
                if let Some(Ok(rows)) = self.data_mut().map(|d| &mut d.bookings) {
                    bookings::mark_cancelled(rows, &id);
                }
                self.set_notice(NoticeKind::Info, "Booking cancelled");
            }
            Err(e) => {
                warn!(id = %id, error = %e, "cancel failed");
                self.set_notice(NoticeKind::Error, format!("Cancel failed: {}", e));
            }
        }
    }

    fn request_delete(&mut self) {
        if self.mutation_blocked() {
            return;
        }
        let index = self.selected();
        let Some(data) = self.data() else {
            return;
        };
        let target = match self.current_tab {
            Tab::Suppliers => data.suppliers.as_ref().ok().and_then(|l| l.get(index)).map(|s| {
                DeleteTarget::Supplier {
                    id: s.id.clone(),
                    name: display_name(&s.supplier_name, &s.id),
                }
            }),
            Tab::Clients => data.clients.as_ref().ok().and_then(|l| l.get(index)).map(|c| {
                DeleteTarget::Client {
                    id: c.id.clone(),
                    name: display_name(&c.full_name, &c.id),
                }
            }),
            _ => None,
        };
        if let Some(target) = target {
            self.interaction = Interaction::ConfirmingDelete {
                target,
                confirm: ConfirmState::new(),
            };
        }
    }

    fn handle_delete_confirm_key(
        &mut self,
        key: KeyEvent,
        target: DeleteTarget,
        mut confirm: ConfirmState,
    ) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Tab => {
                confirm.toggle();
                self.interaction = Interaction::ConfirmingDelete { target, confirm };
            }
            KeyCode::Enter if confirm.is_yes() => {
                self.interaction = Interaction::Idle;
                self.execute_delete(target);
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.interaction = Interaction::Idle;
                self.execute_delete(target);
            }
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.interaction = Interaction::Idle;
            }
            _ => {}
        }
    }

    fn execute_delete(&mut self, target: DeleteTarget) {
        if self.mutation_blocked() {
            return;
        }
        let (result, label) = match &target {
            DeleteTarget::Supplier { id, name } => (
                SupplierService::new(self.store.as_ref()).delete(id),
                format!("Supplier {}", name),
            ),
            DeleteTarget::Client { id, name } => (
                ClientService::new(self.store.as_ref()).delete(id),
                format!("Client {}", name),
            ),
        };

        match result {
            Ok(()) => {
                if let Some(data) = self.data_mut() {
                    match &target {
                        DeleteTarget::Supplier { id, .. } => {
                            if let Ok(list) = &mut data.suppliers {
                                remove_by_id(list, id);
                            }
                        }
                        DeleteTarget::Client { id, .. } => {
                            if let Ok(list) = &mut data.clients {
                                remove_by_id(list, id);
                            }
                        }
                    }
                }
                self.clamp_selection(self.current_tab);
                info!(record = ?target, "deleted from TUI");
                self.set_notice(NoticeKind::Info, format!("{} deleted", label));
            }
            Err(e) => {
                warn!(record = ?target, error = %e, "delete failed");
                self.set_notice(NoticeKind::Error, format!("Delete failed: {}", e));
            }
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &self.state {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&mut self, frame: &mut Frame) {
        self.viewport = frame.area();
        frame.render_widget(&*self, frame.area());
    }

    /// Detail popup title and fields for the viewed row
    fn detail_for(&self, index: usize) -> Option<(&'static str, DetailFields)> {
        let data = self.data()?;
        match self.current_tab {
            Tab::Suppliers => data
                .suppliers
                .as_ref()
                .ok()?
                .get(index)
                .map(|s| ("Supplier", views::supplier_details(s))),
            Tab::Bookings => data
                .bookings
                .as_ref()
                .ok()?
                .get(index)
                .map(|b| ("Booking", views::booking_details(b))),
            Tab::Payments => data
                .payments
                .as_ref()
                .ok()?
                .get(index)
                .map(|p| ("Payment", views::payment_details(p))),
            Tab::Ratings => self
                .sorted_ratings()
                .get(index)
                .map(|g| ("Ratings", views::rating_details(g))),
            Tab::Clients => data
                .clients
                .as_ref()
                .ok()?
                .get(index)
                .map(|c| ("Client", views::client_details(c))),
        }
    }

    fn footer(&self) -> Line<'static> {
        if let Some(notice) = &self.notice {
            let color = match notice.kind {
                NoticeKind::Info => self.theme.success(),
                NoticeKind::Error => self.theme.error(),
            };
            return Line::from(Span::styled(notice.message.clone(), Style::default().fg(color)));
        }

        let mut hints: Vec<(&str, &str)> = vec![("↑↓", "Select"), ("Enter", "View")];
        match self.current_tab {
            Tab::Suppliers => hints.extend([("a", "Approve"), ("d", "Delete")]),
            Tab::Bookings => hints.push(("c", "Cancel")),
            Tab::Ratings => hints.push(("s", "Sort")),
            Tab::Clients => hints.push(("d", "Delete")),
            Tab::Payments => {}
        }
        hints.extend([("r", "Refresh"), ("?", "Help")]);

        let mut spans = Vec::new();
        for (i, (key, desc)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(self.theme.accent())));
            spans.push(Span::styled(
                format!(": {}", desc),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Line::from(spans)
    }

    fn render_ready(&self, data: &DashboardData, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let (columns, rows, empty, caption): (&[Column], Result<Vec<Vec<Cell>>, &str>, &str, String) =
            match self.current_tab {
                Tab::Suppliers => (
                    &views::SUPPLIER_COLUMNS[..],
                    section_rows(&data.suppliers, |s| views::supplier_cells(s, theme)),
                    "No suppliers",
                    count_caption(&data.suppliers, "supplier"),
                ),
                Tab::Bookings => (
                    &views::BOOKING_COLUMNS[..],
                    section_rows(&data.bookings, |b| views::booking_cells(b, theme)),
                    "No pending bookings",
                    count_caption(&data.bookings, "booking"),
                ),
                Tab::Payments => (
                    &views::PAYMENT_COLUMNS[..],
                    section_rows(&data.payments, |p| views::payment_cells(p, theme)),
                    "No payments",
                    count_caption(&data.payments, "payment"),
                ),
                Tab::Ratings => (
                    &views::RATING_COLUMNS[..],
                    match &data.ratings {
                        Ok(_) => Ok(self
                            .sorted_ratings()
                            .into_iter()
                            .map(|g| views::rating_cells(g, theme))
                            .collect()),
                        Err(e) => Err(e.as_str()),
                    },
                    "No ratings yet",
                    format!("Sort: {}", self.rating_sort.label()),
                ),
                Tab::Clients => (
                    &views::CLIENT_COLUMNS[..],
                    section_rows(&data.clients, |c| views::client_cells(c, theme)),
                    "No clients",
                    count_caption(&data.clients, "client"),
                ),
            };

        let caption = if self.is_loading() {
            format!("{} · refreshing", caption)
        } else {
            caption
        };
        let body = match &rows {
            Ok(rows) => TableBody::Rows(rows),
            Err(message) => TableBody::Error(message),
        };
        RecordTable::new(self.current_tab, columns, body, theme)
            .selected(self.selected())
            .empty_message(empty)
            .caption(caption)
            .footer(self.footer())
            .render(area, buf);

        match &self.interaction {
            Interaction::Viewing { index, scroll } => {
                if let Some((title, fields)) = self.detail_for(*index) {
                    let popup = DetailPopup::new(title, &fields, theme).scroll(*scroll);
                    let popup_area = popup.centered_area(area);
                    popup.render(popup_area, buf);
                }
            }
            Interaction::ConfirmingDelete { target, confirm } => {
                let question = target.question();
                let popup = ConfirmPopup::new("Delete?", &question, *confirm, theme);
                let popup_area = popup.centered_area(area);
                popup.render(popup_area, buf);
            }
            Interaction::Idle => {}
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(theme).render(popup_area, buf);
        }
    }

    fn render_centered_message(&self, area: Rect, buf: &mut Buffer, lines: &[(&str, Style)]) {
        let top = area.y + (area.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (text, style)) in lines.iter().enumerate() {
            let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
            let y = top + i as u16;
            if y < area.y + area.height {
                buf.set_string(x, y, text, *style);
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Login { form } => {
                LoginView::new(form, self.theme).render(area, buf);
            }
            AppState::Loading { spinner_frame } => {
                Spinner::new(*spinner_frame, self.theme).render(area, buf);
            }
            AppState::Ready { data } => self.render_ready(data, area, buf),
            AppState::Error { message } => {
                let text = format!("Error: {}", message);
                self.render_centered_message(
                    area,
                    buf,
                    &[
                        (text.as_str(), Style::default().fg(self.theme.error())),
                        ("r: Retry  L: Log out  q: Quit", Style::default().fg(self.theme.muted())),
                    ],
                );
            }
        }

        if let Some(confirm) = self.quit_confirm {
            let popup = ConfirmPopup::new(
                "Quit?",
                "Are you sure you want to quit?",
                confirm,
                self.theme,
            );
            let popup_area = popup.centered_area(area);
            popup.render(popup_area, buf);
        }
    }
}

fn section_rows<'a, T>(
    section: &'a Result<Vec<T>, String>,
    cells: impl Fn(&T) -> Vec<Cell>,
) -> Result<Vec<Vec<Cell>>, &'a str> {
    match section {
        Ok(items) => Ok(items.iter().map(cells).collect()),
        Err(e) => Err(e.as_str()),
    }
}

fn count_caption<T>(section: &Result<Vec<T>, String>, noun: &str) -> String {
    match section {
        Ok(items) if items.len() == 1 => format!("1 {}", noun),
        Ok(items) => format!("{} {}s", items.len(), noun),
        Err(_) => "unavailable".to_string(),
    }
}

fn display_name(name: &str, id: &str) -> String {
    if name.trim().is_empty() {
        id.to_string()
    } else {
        name.to_string()
    }
}

/// Run the TUI application
pub fn run(
    session: Session,
    store: Arc<dyn RecordStore>,
    refresh_interval: Option<Duration>,
) -> anyhow::Result<()> {
    // Detect before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(session, store, theme, refresh_interval));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    if matches!(app.state, AppState::Loading { .. }) {
        app.start_load();
    }

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        app.poll_load();
        if app.refresh_due(Instant::now()) {
            info!("periodic refresh");
            app.start_load();
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}
