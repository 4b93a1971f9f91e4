//! TUI application state
//!
//! Everything the chat window renders apart from the transcript itself,
//! which the [`ChatSessionController`](orca_application::ChatSessionController)
//! owns. Mutated only by the `TuiApp` select! loop.

use super::field::TextField;
use super::mode::{Focus, InputMode};
use orca_domain::{EditKind, GenerationParams, NumericField};
use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Header label in the top-right corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionLabel {
    #[default]
    Version,
    Cat,
}

impl VersionLabel {
    pub fn text(&self) -> String {
        match self {
            Self::Version => format!("v{}", env!("CARGO_PKG_VERSION")),
            Self::Cat => "🐈".to_string(),
        }
    }
}

/// Central TUI state, owned by the TuiApp select! loop
pub struct TuiState {
    // -- Mode and focus --
    pub mode: InputMode,
    pub focus: Focus,

    // -- Editable fields --
    pub prompt: TextField,
    pub token_limit: TextField,
    pub temperature: TextField,

    // -- Session mirror (refreshed after every controller call) --
    pub model_name: String,
    pub generating: bool,
    pub show_timing: bool,

    // -- Transcript scrolling: offset counts lines up from the bottom --
    pub scroll_offset: usize,
    pub auto_scroll: bool,

    // -- Chrome --
    pub version_label: VersionLabel,
    pub spinner_frame: usize,
    pub show_help: bool,
    pub flash_message: Option<(String, Instant)>,

    // -- Lifecycle --
    pub should_quit: bool,
}

impl TuiState {
    pub fn new(model_name: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            mode: InputMode::Insert,
            focus: Focus::Prompt,
            prompt: TextField::default(),
            token_limit: TextField::new(params.max_tokens.to_string()),
            temperature: TextField::new(params.temperature.to_string()),
            model_name: model_name.into(),
            generating: false,
            show_timing: true,
            scroll_offset: 0,
            auto_scroll: true,
            version_label: VersionLabel::default(),
            spinner_frame: 0,
            show_help: false,
            flash_message: None,
            should_quit: false,
        }
    }

    // -- Field editing --

    pub fn focused_field(&self) -> &TextField {
        match self.focus {
            Focus::Prompt => &self.prompt,
            Focus::TokenLimit => &self.token_limit,
            Focus::Temperature => &self.temperature,
        }
    }

    fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Prompt => &mut self.prompt,
            Focus::TokenLimit => &mut self.token_limit,
            Focus::Temperature => &mut self.temperature,
        }
    }

    fn focused_numeric(&self) -> Option<NumericField> {
        match self.focus {
            Focus::Prompt => None,
            Focus::TokenLimit => Some(NumericField::TokenLimit),
            Focus::Temperature => Some(NumericField::Temperature),
        }
    }

    fn edit_allowed(&self, proposed: &str, kind: EditKind) -> bool {
        self.focused_numeric()
            .is_none_or(|field| field.accepts(proposed, kind))
    }

    /// Insert `s` into the focused field. Returns `false` when the field's
    /// validator rejected the edit and nothing changed.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let proposed = self.focused_field().with_inserted(s);
        if !self.edit_allowed(&proposed, EditKind::Insert) {
            return false;
        }
        self.focused_field_mut().insert_str(s);
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    pub fn delete_char(&mut self) -> bool {
        let Some(proposed) = self.focused_field().with_deleted_back() else {
            return false;
        };
        if !self.edit_allowed(&proposed, EditKind::Delete) {
            return false;
        }
        self.focused_field_mut().delete_back();
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        let Some(proposed) = self.focused_field().with_deleted_forward() else {
            return false;
        };
        if !self.edit_allowed(&proposed, EditKind::Delete) {
            return false;
        }
        self.focused_field_mut().delete_forward();
        true
    }

    pub fn cursor_left(&mut self) {
        self.focused_field_mut().cursor_left();
    }

    pub fn cursor_right(&mut self) {
        self.focused_field_mut().cursor_right();
    }

    pub fn cursor_home(&mut self) {
        self.focused_field_mut().cursor_home();
    }

    pub fn cursor_end(&mut self) {
        self.focused_field_mut().cursor_end();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    // -- Scrolling --

    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        } else {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = usize::MAX; // Will be clamped during render
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    /// A turn was appended: jump to it unless the user scrolled away.
    pub fn follow_transcript(&mut self) {
        if self.auto_scroll {
            self.scroll_offset = 0;
        }
    }

    // -- Chrome --

    pub fn toggle_version_label(&mut self) {
        self.version_label = match self.version_label {
            VersionLabel::Version => VersionLabel::Cat,
            VersionLabel::Cat => VersionLabel::Version,
        };
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Advance animations on each tick
    pub fn tick(&mut self) {
        if self.generating {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // -- Flash messages --

    pub fn set_flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }

    /// Clear flash if older than the given duration
    pub fn expire_flash(&mut self, max_age: Duration) {
        if let Some((_, created)) = &self.flash_message
            && created.elapsed() > max_age
        {
            self.flash_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TuiState {
        TuiState::new("test-model", GenerationParams::default())
    }

    #[test]
    fn test_initial_field_values() {
        let state = state();
        assert_eq!(state.token_limit.text(), "200");
        assert_eq!(state.temperature.text(), "0.7");
        assert!(state.prompt.is_empty());
        assert_eq!(state.mode, InputMode::Insert);
        assert_eq!(state.focus, Focus::Prompt);
    }

    #[test]
    fn test_prompt_accepts_anything() {
        let mut state = state();
        for c in "2a .?".chars() {
            assert!(state.insert_char(c));
        }
        assert_eq!(state.prompt.text(), "2a .?");
    }

    #[test]
    fn test_token_field_rejects_letter() {
        let mut state = state();
        state.focus = Focus::TokenLimit;
        state.token_limit = TextField::default();

        assert!(state.insert_char('2'));
        assert!(!state.insert_char('a'));
        assert_eq!(state.token_limit.text(), "2");
    }

    #[test]
    fn test_temperature_field_rejects_second_dot() {
        let mut state = state();
        state.focus = Focus::Temperature;
        state.temperature = TextField::default();

        assert!(state.insert_char('0'));
        assert!(state.insert_char('.'));
        assert!(!state.insert_char('.'));
        assert!(state.insert_char('7'));
        assert_eq!(state.temperature.text(), "0.7");
    }

    #[test]
    fn test_numeric_field_can_be_emptied() {
        let mut state = state();
        state.focus = Focus::TokenLimit;
        assert!(state.delete_char());
        assert!(state.delete_char());
        assert!(state.delete_char());
        assert!(!state.delete_char());
        assert!(state.token_limit.is_empty());
    }

    #[test]
    fn test_paste_into_token_field_is_validated_whole() {
        let mut state = state();
        state.focus = Focus::TokenLimit;
        assert!(!state.insert_str("5x"));
        assert_eq!(state.token_limit.text(), "200");
        assert!(state.insert_str("0"));
        assert_eq!(state.token_limit.text(), "2000");
    }

    #[test]
    fn test_scroll_disables_and_restores_auto_scroll() {
        let mut state = state();
        state.scroll_up();
        state.scroll_up();
        assert!(!state.auto_scroll);
        assert_eq!(state.scroll_offset, 2);

        state.follow_transcript();
        assert_eq!(state.scroll_offset, 2);

        state.scroll_down();
        state.scroll_down();
        state.scroll_down();
        assert!(state.auto_scroll);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_version_label_easter_egg() {
        let mut state = state();
        assert!(state.version_label.text().starts_with('v'));
        state.toggle_version_label();
        assert_eq!(state.version_label.text(), "🐈");
        state.toggle_version_label();
        assert_eq!(state.version_label, VersionLabel::Version);
    }

    #[test]
    fn test_spinner_only_moves_while_generating() {
        let mut state = state();
        state.tick();
        assert_eq!(state.spinner_frame, 0);
        state.generating = true;
        state.tick();
        assert_eq!(state.spinner_frame, 1);
    }

    #[test]
    fn test_flash_message() {
        let mut state = state();
        state.set_flash("test");
        assert!(state.flash_message.is_some());

        // Should not expire immediately
        state.expire_flash(Duration::from_secs(5));
        assert!(state.flash_message.is_some());
    }
}
