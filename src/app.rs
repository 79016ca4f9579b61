use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::action::Action;
use crate::message::Message;
use crate::sampler::capacity::CapacitySample;
use crate::sampler::load::LoadSample;
use crate::system::process::Snapshot;

pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 24;

/// The fixed layout needs a minimum grid; anything smaller is fatal rather
/// than retried.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("terminal window cannot be less than 80x24 (cols x rows), you were {width}x{height}")]
pub struct TerminalSizeError {
    pub width: u16,
    pub height: u16,
}

pub fn check_terminal_size(width: u16, height: u16) -> Result<(), TerminalSizeError> {
    if width < MIN_COLS || height < MIN_ROWS {
        return Err(TerminalSizeError { width, height });
    }
    Ok(())
}

/// The renderer's only mutable store: the most recent sample of each kind.
/// Slots start empty and are overwritten independently; kinds never merge.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub tasklist: Option<Snapshot>,
    pub load: Option<LoadSample>,
    pub capacity: Option<CapacitySample>,
}

impl ViewState {
    /// Folds one mailbox message in. Last value per kind wins.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Tasklist(snapshot) => self.tasklist = Some(snapshot),
            Message::LoadPercentage(sample) => self.load = Some(sample),
            Message::MemoryCapacity(sample) => self.capacity = Some(sample),
        }
    }
}

pub struct App {
    pub running: bool,
    pub view: ViewState,
}

impl App {
    pub fn new() -> Self {
        App {
            running: true,
            view: ViewState::default(),
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::None => {}
        }
    }

    pub fn apply(&mut self, message: Message) {
        self.view.apply(message);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
