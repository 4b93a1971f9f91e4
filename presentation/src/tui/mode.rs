//! TUI mode system (vim-like mode switching)
//!
//! - Normal mode: scrolling, toggles and shortcuts
//! - Insert mode: typing into the focused field
//!
//! `Tab` cycles focus between the prompt and the two numeric fields in
//! either mode. `Enter` submits the prompt in either mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode (vim-like)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Navigation and shortcuts
    #[default]
    Normal,
    /// Text input into the focused field
    Insert,
}

impl InputMode {
    /// Get the mode indicator string for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }

    /// Get the mode color for status line
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Normal => Color::Blue,
            Self::Insert => Color::Green,
        }
    }
}

/// Which editable field receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Prompt,
    TokenLimit,
    Temperature,
}

impl Focus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::TokenLimit => "tokens",
            Self::Temperature => "temperature",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Prompt => Self::TokenLimit,
            Self::TokenLimit => Self::Temperature,
            Self::Temperature => Self::Prompt,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Prompt => Self::Temperature,
            Self::TokenLimit => Self::Prompt,
            Self::Temperature => Self::TokenLimit,
        }
    }
}

/// User action derived from key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    EnterInsert,
    ExitToNormal,
    /// Send the prompt (Enter)
    Submit,
    InsertChar(char),
    /// Backspace
    DeleteChar,
    /// Delete
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    NextField,
    PrevField,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    /// Flip the "show generation time" toggle
    ToggleTiming,
    /// Swap the version label for the cat
    ToggleVersion,
    ShowHelp,
    Quit,
    None,
}

/// Map a key event to an action based on the current mode
pub fn handle_key(mode: InputMode, key: KeyEvent) -> KeyAction {
    // Global keys
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return KeyAction::Quit,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => return KeyAction::ToggleTiming,
        (KeyCode::Enter, _) => return KeyAction::Submit,
        (KeyCode::Tab, _) => return KeyAction::NextField,
        (KeyCode::BackTab, _) => return KeyAction::PrevField,
        _ => {}
    }

    match mode {
        InputMode::Normal => handle_normal(key),
        InputMode::Insert => handle_insert(key),
    }
}

fn handle_normal(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Char('a'), KeyModifiers::NONE) => {
            KeyAction::EnterInsert
        }
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

        // Navigation
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => KeyAction::ScrollUp,
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => KeyAction::ScrollDown,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => KeyAction::ScrollTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => KeyAction::ScrollBottom,

        // Toggles
        (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTiming,
        (KeyCode::Char('v'), KeyModifiers::NONE) => KeyAction::ToggleVersion,

        (KeyCode::Char('?'), _) => KeyAction::ShowHelp,
        _ => KeyAction::None,
    }
}

fn handle_insert(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => KeyAction::ExitToNormal,

        // Editing
        (KeyCode::Backspace, _) => KeyAction::DeleteChar,
        (KeyCode::Delete, _) => KeyAction::DeleteForward,
        (KeyCode::Left, _) => KeyAction::CursorLeft,
        (KeyCode::Right, _) => KeyAction::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => KeyAction::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => KeyAction::CursorEnd,

        // Transcript stays scrollable while typing
        (KeyCode::Up, _) => KeyAction::ScrollUp,
        (KeyCode::Down, _) => KeyAction::ScrollDown,

        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => KeyAction::InsertChar(c),
        _ => KeyAction::None,
    }
}
