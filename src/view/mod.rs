//! TUI rendering and terminal management (impure shell).
//!
//! Hosts a [`ChromeController`] over a scrollable passage. Key presses and
//! mouse-wheel movement become collaborator signals and scroll samples; the
//! event loop sizes its poll timeout by the controller's next deadline so
//! timers fire on time without busy-waiting.

pub mod chrome;
pub mod constants;
pub mod passage;
pub mod styles;

pub use chrome::{body_height, render_reader, ReaderView};
pub use passage::Passage;

use crate::clock::{Clock, SystemClock};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction};
use crate::preferences::{PreferenceSource, SharedPreferences};
use crate::state::ChromeController;
use constants::{LINE_HEIGHT_PX, MAX_POLL_INTERVAL, SCROLL_SETTLE, WHEEL_LINES};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(io) => AppError::Terminal(io),
        }
    }
}

/// Reader application: terminal, passage and chrome controller.
///
/// Generic over backend to support testing with `TestBackend`, and over the
/// clock so tests can step time.
pub struct ReaderApp<B, C = SystemClock>
where
    B: ratatui::backend::Backend,
    C: Clock + Clone + 'static,
{
    terminal: Terminal<B>,
    chrome: ChromeController<C>,
    preferences: SharedPreferences,
    clock: C,
    passage: Passage,
    scroll_line: usize,
    key_bindings: KeyBindings,
    /// When the most recent scroll input arrived, while a gesture is open
    last_scroll_at: Option<Instant>,
}

impl ReaderApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal in raw mode with alternate screen.
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, config, SystemClock))
    }

    /// Run the main event loop until the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.poll_timeout())? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            self.tick();
            self.draw()?;
        }
    }
}

impl<B, C> ReaderApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock + Clone + 'static,
{
    /// Build the app around an existing terminal.
    pub fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig, clock: C) -> Self {
        let preferences = SharedPreferences::new(config.preferences());
        let chrome = ChromeController::new(config.timings, preferences.clone(), clock.clone());

        Self {
            terminal,
            chrome,
            preferences,
            clock,
            passage: Passage::sample(),
            scroll_line: 0,
            key_bindings: KeyBindings::default(),
            last_scroll_at: None,
        }
    }

    /// The hosted controller.
    pub fn chrome(&self) -> &ChromeController<C> {
        &self.chrome
    }

    /// First visible passage row.
    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let view = ReaderView {
            passage: &self.passage,
            scroll_line: self.scroll_line,
            outputs: self.chrome.outputs(),
            snapshot: self.chrome.snapshot(),
            velocity: self.chrome.current_velocity(),
        };
        self.terminal.draw(|frame| render_reader(frame, &view))?;
        Ok(())
    }

    /// Close an open scroll gesture if it has gone quiet, then let the
    /// controller poll preferences and fire due timers.
    pub fn tick(&mut self) {
        if let Some(at) = self.last_scroll_at {
            if self.clock.now().saturating_duration_since(at) >= SCROLL_SETTLE {
                self.last_scroll_at = None;
                self.chrome.on_scroll_update(self.offset_px(), false);
            }
        }
        self.chrome.tick();
    }

    /// How long the event loop may block before the next timer or settle check.
    pub fn poll_timeout(&self) -> Duration {
        let now = self.clock.now();
        let settle = self
            .last_scroll_at
            .map(|at| (at + SCROLL_SETTLE).saturating_duration_since(now));
        let deadline = self
            .chrome
            .next_deadline()
            .map(|d| d.saturating_duration_since(now));

        [Some(MAX_POLL_INTERVAL), settle, deadline]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(MAX_POLL_INTERVAL)
    }

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.key_bindings.get(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    /// Apply a reader action. Returns true if the app should quit.
    pub fn handle_action(&mut self, action: KeyAction) -> bool {
        debug!(?action, scroll = action.is_scroll(), "key action");
        let page = self.page_height();

        match action {
            KeyAction::ScrollUp => self.scroll_to(self.scroll_line.saturating_sub(1)),
            KeyAction::ScrollDown => self.scroll_to(self.scroll_line.saturating_add(1)),
            KeyAction::PageUp => self.scroll_to(self.scroll_line.saturating_sub(page)),
            KeyAction::PageDown => self.scroll_to(self.scroll_line.saturating_add(page)),
            KeyAction::ScrollToTop => self.scroll_to(0),
            KeyAction::ScrollToBottom => self.scroll_to(usize::MAX),
            KeyAction::ToggleMenu => self.chrome.toggle_menu(),
            KeyAction::ToggleSelection => {
                if self.chrome.snapshot().has_selection {
                    self.chrome.clear_selection();
                } else {
                    self.chrome.start_selection();
                }
            }
            KeyAction::ToggleSearch => {
                if self.chrome.snapshot().is_search_active {
                    self.chrome.deactivate_search();
                } else {
                    self.chrome.activate_search();
                }
            }
            KeyAction::ToggleSettings => {
                if self.chrome.snapshot().is_sheet_presented {
                    self.chrome.close_sheet();
                } else {
                    self.chrome.open_sheet();
                }
            }
            KeyAction::TogglePin => {
                let pinned = !self.preferences.always_show_controls();
                self.preferences.set_always_show_controls(pinned);
                info!(pinned, "always-show-controls preference changed");
                self.chrome.refresh_preferences();
            }
            KeyAction::Dismiss => self.dismiss_topmost(),
            KeyAction::Quit => return true,
        }

        false
    }

    /// Mouse-wheel movement scrolls the passage.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_to(self.scroll_line.saturating_sub(WHEEL_LINES)),
            MouseEventKind::ScrollDown => {
                self.scroll_to(self.scroll_line.saturating_add(WHEEL_LINES))
            }
            _ => {}
        }
    }

    fn dismiss_topmost(&mut self) {
        let snapshot = self.chrome.snapshot();
        if snapshot.has_selection {
            self.chrome.clear_selection();
        } else if snapshot.is_sheet_presented {
            self.chrome.close_sheet();
        } else if snapshot.is_search_active {
            self.chrome.deactivate_search();
        } else if snapshot.is_menu_visible {
            self.chrome.hide_menu();
        }
    }

    fn scroll_to(&mut self, line: usize) {
        let target = line.min(self.passage.max_scroll(self.page_height()));
        if target == self.scroll_line {
            return;
        }
        self.scroll_line = target;
        self.last_scroll_at = Some(self.clock.now());
        self.chrome.on_scroll_update(self.offset_px(), true);
    }

    fn offset_px(&self) -> f64 {
        self.scroll_line as f64 * LINE_HEIGHT_PX
    }

    fn page_height(&self) -> usize {
        let height = self.terminal.size().map(|s| s.height).unwrap_or(24);
        body_height(height).max(1)
    }
}

/// Run the reader until the user quits.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = ReaderApp::new(config)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "reader_app_tests.rs"]
mod tests;
