//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        entry_form::{EntryForm, EntryFormState},
        help::HelpPopup,
        onboarding::Onboarding,
        products::ProductsChart,
        records::{RecordTable, RecordTableState},
        status::StatusLine,
        summary::SummaryView,
        tab_bar::TabBar,
    },
};
use campo_core::{
    config::Config,
    export::{export_to_path, ExportFormat},
    ingest::ingest_path,
    summary::Summary,
    CommitOutcome, LoadPolicy, Store,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dashboard,
    /// Manual entry popup is open.
    Form,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Resumen,
    Insumos,
    Datos,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Resumen, Tab::Insumos, Tab::Datos];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Resumen => "1:resumen",
            Tab::Insumos => "2:insumos",
            Tab::Datos => "3:datos",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Resumen => 0,
            Tab::Insumos => 1,
            Tab::Datos => 2,
        }
    }

    fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }
}

/// Feedback shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: Store,
    /// Recomputed from `store` after every mutation.
    pub summary: Summary,
    pub tab: Tab,
    pub focus: Focus,
    pub records: RecordTableState,
    pub form: EntryFormState,
    pub command_bar: CommandBarState,
    pub status: Option<Status>,
    /// Last file loaded, for a bare `:reload`.
    pub last_path: Option<PathBuf>,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(store: Store, config: Config, theme: Theme) -> Self {
        let summary = Summary::from_store(&store, config.ui.top_products);
        Self {
            store,
            summary,
            tab: Tab::Resumen,
            focus: Focus::Dashboard,
            records: RecordTableState::default(),
            form: EntryFormState::default(),
            command_bar: CommandBarState::default(),
            status: None,
            last_path: None,
            theme,
            config,
            show_help: false,
            quit: false,
        }
    }

    /// Recompute everything derived from the store.
    pub fn refresh(&mut self) {
        self.summary = Summary::from_store(&self.store, self.config.ui.top_products);
        self.records.clamp(self.store.len());
    }

    /// Ingest `path` and commit it under `policy`. A failure leaves the
    /// store untouched and is reported in the status line.
    pub fn load(&mut self, path: &Path, policy: LoadPolicy) {
        match ingest_path(path, &self.config.ingest.options()) {
            Ok(batch) => {
                let name = path.display();
                let message = match self.store.commit(batch, policy) {
                    CommitOutcome::Replaced(n) => format!("{n} records loaded from {name}"),
                    CommitOutcome::Appended(n) => format!("{n} records merged from {name}"),
                    CommitOutcome::Skipped => {
                        "data already loaded: use :reload to replace or :merge to append".to_string()
                    }
                };
                self.status = Some(Status::Info(message));
                self.last_path = Some(path.to_path_buf());
                self.refresh();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load failed");
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// Export the store; the format follows the file extension.
    pub fn export(&mut self, path: Option<PathBuf>) {
        let path = path.unwrap_or_else(|| PathBuf::from(&self.config.export.file_name));
        let format = ExportFormat::from_path(&path);
        self.status = Some(match export_to_path(&self.store, format, &path) {
            Ok(()) => Status::Info(format!("{} records exported to {}", self.store.len(), path.display())),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "export failed");
                Status::Error(format!("export failed: {e}"))
            }
        });
    }

    /// Validate the form; on success append and close it, otherwise keep it
    /// open with the error.
    pub fn submit_form(&mut self) {
        match self.form.to_entry().validate() {
            Ok(record) => {
                tracing::info!(date = ?record.date, category = %record.category, "manual entry appended");
                self.store.append(record);
                self.form.reset();
                self.focus = Focus::Dashboard;
                self.status = Some(Status::Info("record added".to_string()));
                self.refresh();
            }
            Err(e) => {
                tracing::debug!(error = %e, "manual entry rejected");
                self.form.error = Some(e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(store: Store, config: Config, theme: Theme) -> Self {
        App { state: AppState::new(store, config, theme) }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                s.show_help = false;
            }
            return;
        }

        match s.focus {
            Focus::Command => return handle_command_bar(s, event),
            Focus::Form => return handle_form(s, event),
            Focus::Dashboard => {}
        }

        match event {
            AppEvent::Char('?') => s.show_help = true,
            AppEvent::Char(':') => {
                tracing::debug!("entering command mode");
                s.command_bar.clear();
                s.focus = Focus::Command;
            }
            AppEvent::Char('a') => execute_command(s, Command::Add),
            AppEvent::Char(c @ '1'..='3') => {
                s.tab = Tab::from_index(c as usize - '1' as usize);
            }
            AppEvent::FocusNext => s.tab = s.tab.next(),
            AppEvent::FocusPrev => s.tab = s.tab.prev(),
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::Escape => s.status = None,
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            other => {
                if s.tab == Tab::Datos {
                    s.records.handle(&other, s.store.len());
                }
            }
        }
    }
}

fn handle_command_bar(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Escape => {
            s.command_bar.clear();
            s.focus = Focus::Dashboard;
        }
        AppEvent::Quit => s.quit = true,
        AppEvent::Enter => match Command::parse(&s.command_bar.input) {
            Ok(cmd) => {
                tracing::debug!(command = ?cmd, "executing command");
                s.command_bar.clear();
                s.focus = Focus::Dashboard;
                execute_command(s, cmd);
            }
            Err(msg) if msg.is_empty() => {
                s.command_bar.clear();
                s.focus = Focus::Dashboard;
            }
            // Bar stays open with the error
            Err(msg) => s.command_bar.error = Some(msg),
        },
        other => s.command_bar.handle(&other),
    }
}

fn handle_form(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Escape => {
            s.form.reset();
            s.focus = Focus::Dashboard;
        }
        AppEvent::Quit => s.quit = true,
        AppEvent::Enter => s.submit_form(),
        other => s.form.handle(&other),
    }
}

/// True when a text-input widget has focus, so letters type rather than
/// trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Form | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    let theme = &state.theme;
    frame.render_widget(TabBar::new(state.tab, state.store.len(), theme), vert[0]);

    if !state.store.is_ready() {
        frame.render_widget(Onboarding::new(&state.store, theme), vert[1]);
    } else {
        match state.tab {
            Tab::Resumen => frame.render_widget(
                SummaryView::new(&state.summary, state.config.ui.hectare_decimals, theme),
                vert[1],
            ),
            Tab::Insumos => {
                frame.render_widget(ProductsChart::new(&state.summary.top_products, theme), vert[1])
            }
            Tab::Datos => frame.render_widget(
                RecordTable::new(&state.store, &state.records, state.config.ui.hectare_decimals, theme),
                vert[1],
            ),
        }
    }

    frame.render_widget(StatusLine::new(state.status.as_ref(), theme), vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }

    match state.focus {
        Focus::Form => {
            let form = EntryForm::new(&state.form, theme);
            let cursor = form.cursor_position(area);
            frame.render_widget(form, area);
            frame.set_cursor_position(cursor);
        }
        // Command bar overlays the status row
        Focus::Command => {
            let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
            frame.render_widget(CommandBar::new(&state.command_bar, theme), cmd_area);
            let col = state.command_bar.cursor_col(cmd_area);
            frame.set_cursor_position((col, cmd_area.y));
        }
        Focus::Dashboard => {}
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
