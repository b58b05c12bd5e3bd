//! Panel state and event loop.
//!
//! Every action runs synchronously against the vault on the key press that
//! triggers it. A collapse freezes the panel behind a modal; the next key
//! press leaves the loop and the caller reports the event.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use quantumvault_core::{CollapseEvent, InventorySummary, Listing, Vault, VaultError};

use crate::commands::EVACUATION_NOTICE;

/// Oldest entries are dropped past this many.
pub const LOG_CAPACITY: usize = 500;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

type PanelTerminal = Terminal<CrosstermBackend<io::Stdout>>;

// ---------------------------------------------------------------------------
// Terminal setup
// ---------------------------------------------------------------------------

/// Raw mode and alternate screen, with a panic hook that undoes both first.
fn enter_terminal() -> io::Result<PanelTerminal> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut io::stdout());
        previous(info);
    }));
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn restore_terminal(terminal: &mut PanelTerminal) -> io::Result<()> {
    // Back to the default hook.
    drop(std::panic::take_hook());
    leave_screen(terminal.backend_mut())
}

fn leave_screen(out: &mut impl io::Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, crossterm::cursor::Show)
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Warn,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// What the next key press means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Keys go into the id field.
    EditingId,
    /// Waiting for y/n.
    ConfirmQuit,
    /// Terminal state; any key exits.
    Collapsed,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<R: Rng = StdRng> {
    vault: Vault<R>,
    id_input: String,
    log: VecDeque<LogEntry>,
    mode: Mode,
    running: bool,
    collapse: Option<CollapseEvent>,
}

impl<R: Rng> App<R> {
    pub fn new(vault: Vault<R>) -> Self {
        let mut app = Self {
            vault,
            id_input: String::new(),
            log: VecDeque::new(),
            mode: Mode::default(),
            running: true,
            collapse: None,
        };
        app.push(LogKind::Info, "System started. Waiting for commands...");
        app
    }

    /// Take over the terminal until the user quits or a collapse is
    /// acknowledged. The terminal is restored even when drawing fails.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = enter_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut PanelTerminal) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| super::ui::draw(f, self))?;
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::EditingId => self.handle_editing(key),
            Mode::ConfirmQuit => self.handle_confirm(key),
            Mode::Collapsed => self.running = false,
        }
    }

    fn handle_normal(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('a') => self.add_random(),
            KeyCode::Char('l') => self.list(),
            KeyCode::Char('z') => self.analyze(),
            KeyCode::Char('c') => self.cooldown(),
            KeyCode::Char('i') | KeyCode::Tab => self.mode = Mode::EditingId,
            KeyCode::Char('q') | KeyCode::Esc => self.mode = Mode::ConfirmQuit,
            _ => {}
        }
    }

    fn handle_editing(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => self.id_input.push(c),
            KeyCode::Backspace => {
                self.id_input.pop();
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
    }

    fn handle_confirm(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.push(LogKind::Info, "Exiting safely...");
                self.running = false;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {}
        }
    }

    fn add_random(&mut self) {
        let (kind, text) = match self.vault.add_random() {
            Ok(object) => (LogKind::Info, format!("Added -> {}", object.snapshot())),
            Err(e) => (LogKind::Warn, format!("Error: {e}")),
        };
        self.push(kind, text);
    }

    fn list(&mut self) {
        let lines: Vec<String> = match self.vault.list() {
            Listing::Empty => Vec::new(),
            Listing::Reports(_) => self
                .vault
                .inventory()
                .iter()
                .map(|o| {
                    let tag = if o.is_critical() { "[CRITICAL] " } else { "" };
                    format!("{tag}{} {}", o.status_report(), o.stability().gauge())
                })
                .collect(),
        };
        if lines.is_empty() {
            self.push(LogKind::Warn, "Inventory is empty.");
            return;
        }
        self.push(LogKind::Info, "--- Inventory ---");
        for line in lines {
            self.push(LogKind::Info, line);
        }
    }

    fn analyze(&mut self) {
        let Some(id) = self.target_id() else { return };
        match self.vault.analyze(&id) {
            Ok(report) => {
                self.push(LogKind::Info, report.outcome.message);
                let status = format!("Analysis complete. {}", report.object);
                self.push(LogKind::Info, status);
                if report.low_stability {
                    let warning = format!("WARNING! {id} is at critical level!");
                    self.push(LogKind::Warn, warning);
                }
            }
            Err(VaultError::Collapse(event)) => {
                self.push(LogKind::Alert, EVACUATION_NOTICE);
                self.push(LogKind::Alert, event.to_string());
                self.collapse = Some(event);
                self.mode = Mode::Collapsed;
            }
            Err(e) => self.lookup_error(&e),
        }
    }

    fn cooldown(&mut self) {
        let Some(id) = self.target_id() else { return };
        match self.vault.emergency_cooldown(&id) {
            Ok(report) => {
                let status = format!("Cooldown applied. {}", report.object);
                self.push(LogKind::Info, status);
            }
            Err(e) => self.lookup_error(&e),
        }
    }

    /// Trimmed id from the entry field; warns and yields `None` when blank.
    fn target_id(&mut self) -> Option<String> {
        let id = self.id_input.trim();
        if id.is_empty() {
            self.push(LogKind::Warn, "Enter an object ID first.");
            return None;
        }
        Some(id.to_string())
    }

    fn lookup_error(&mut self, err: &VaultError) {
        let text = match err {
            VaultError::EmptyId | VaultError::NotFound(_) => "Object not found.".to_string(),
            VaultError::NotCritical(_) => "This object cannot be cooled!".to_string(),
            other => format!("Error: {other}"),
        };
        self.push(LogKind::Warn, text);
    }

    fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            kind,
            text: text.into(),
        });
    }

    // -----------------------------------------------------------------------
    // Accessors for the UI
    // -----------------------------------------------------------------------

    pub fn vault(&self) -> &Vault<R> {
        &self.vault
    }
    pub fn id_input(&self) -> &str {
        &self.id_input
    }
    pub fn log(&self) -> &VecDeque<LogEntry> {
        &self.log
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn summary(&self) -> InventorySummary {
        self.vault.summary()
    }
    pub fn collapse(&self) -> Option<&CollapseEvent> {
        self.collapse.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantumvault_core::{Variant, VaultConfig, create};

    fn app() -> App {
        App::new(Vault::seeded(21, VaultConfig::default()))
    }

    fn type_id(app: &mut App, id: &str) {
        app.handle_key(KeyCode::Char('i'));
        for c in id.chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
    }

    fn last(app: &App) -> &LogEntry {
        app.log().back().unwrap()
    }

    #[test]
    fn starts_with_startup_entry() {
        let a = app();
        assert_eq!(a.log().len(), 1);
        assert!(a.log()[0].text.starts_with("System started"));
        assert_eq!(a.mode(), Mode::Normal);
    }

    #[test]
    fn add_key_spawns_object() {
        let mut a = app();
        a.handle_key(KeyCode::Char('a'));
        assert_eq!(a.vault().inventory().len(), 1);
        assert!(last(&a).text.starts_with("Added -> ID: N0001"));
        assert_eq!(a.summary().total, 1);
    }

    #[test]
    fn list_empty_warns() {
        let mut a = app();
        a.handle_key(KeyCode::Char('l'));
        assert_eq!(last(&a).kind, LogKind::Warn);
        assert_eq!(last(&a).text, "Inventory is empty.");
    }

    #[test]
    fn list_tags_critical_objects() {
        let mut a = app();
        let dark = create(Variant::DarkMatter, "D1", Some(50.0), 3).unwrap();
        a.vault.add(dark);
        let packet = create(Variant::DataPacket, "P1", Some(50.0), 3).unwrap();
        a.vault.add(packet);
        a.handle_key(KeyCode::Char('l'));
        let texts: Vec<&str> = a.log().iter().map(|e| e.text.as_str()).collect();
        assert!(texts.iter().any(|t| t.starts_with("[CRITICAL] ID: D1")));
        assert!(texts.iter().any(|t| t.starts_with("ID: P1")));
    }

    #[test]
    fn analyze_without_id_warns() {
        let mut a = app();
        a.handle_key(KeyCode::Char('z'));
        assert_eq!(last(&a).text, "Enter an object ID first.");
    }

    #[test]
    fn editing_id_captures_keys() {
        let mut a = app();
        a.handle_key(KeyCode::Tab);
        assert_eq!(a.mode(), Mode::EditingId);
        for c in "N0001x".chars() {
            a.handle_key(KeyCode::Char(c));
        }
        a.handle_key(KeyCode::Backspace);
        a.handle_key(KeyCode::Esc);
        assert_eq!(a.id_input(), "N0001");
        assert_eq!(a.mode(), Mode::Normal);
        // Letters typed into the field did not trigger actions.
        assert!(a.vault().inventory().is_empty());
    }

    #[test]
    fn analyze_and_cooldown_by_id() {
        let mut a = app();
        let dark = create(Variant::DarkMatter, "N0003", Some(60.0), 4).unwrap();
        a.vault.add(dark);
        type_id(&mut a, "N0003");
        a.handle_key(KeyCode::Char('z'));
        let expected = "Analysis complete. ID: N0003, Stability: 45.0, Danger: 4, Type: DarkMatter";
        assert!(a.log().iter().any(|e| e.text == expected));
        a.handle_key(KeyCode::Char('c'));
        assert_eq!(
            last(&a).text,
            "Cooldown applied. ID: N0003, Stability: 95.0, Danger: 4, Type: DarkMatter"
        );
    }

    #[test]
    fn cooldown_rejects_data_packet() {
        let mut a = app();
        let packet = create(Variant::DataPacket, "P", Some(30.0), 1).unwrap();
        a.vault.add(packet);
        type_id(&mut a, "P");
        a.handle_key(KeyCode::Char('c'));
        assert_eq!(last(&a).text, "This object cannot be cooled!");
    }

    #[test]
    fn unknown_id_not_found() {
        let mut a = app();
        type_id(&mut a, "N9999");
        a.handle_key(KeyCode::Char('z'));
        assert_eq!(last(&a).text, "Object not found.");
    }

    #[test]
    fn collapse_freezes_then_exits() {
        let mut a = app();
        let anti = create(Variant::AntiMatter, "N0002", Some(20.0), 9).unwrap();
        a.vault.add(anti);
        type_id(&mut a, "N0002");
        a.handle_key(KeyCode::Char('z'));
        assert_eq!(a.mode(), Mode::Collapsed);
        assert_eq!(a.collapse(), Some(&CollapseEvent::new("N0002")));
        assert_eq!(last(&a).kind, LogKind::Alert);
        // Actions no longer run; the next key leaves the loop.
        a.handle_key(KeyCode::Char('a'));
        assert!(!a.running);
        assert_eq!(a.vault().inventory().len(), 1);
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut a = app();
        a.handle_key(KeyCode::Char('q'));
        assert_eq!(a.mode(), Mode::ConfirmQuit);
        a.handle_key(KeyCode::Char('n'));
        assert_eq!(a.mode(), Mode::Normal);
        assert!(a.running);
        a.handle_key(KeyCode::Esc);
        a.handle_key(KeyCode::Char('y'));
        assert!(!a.running);
        assert_eq!(last(&a).text, "Exiting safely...");
    }

    #[test]
    fn log_is_bounded() {
        let mut a = app();
        for _ in 0..LOG_CAPACITY + 10 {
            a.handle_key(KeyCode::Char('z'));
        }
        assert_eq!(a.log().len(), LOG_CAPACITY);
    }
}
