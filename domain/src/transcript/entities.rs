//! Transcript entities

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label written before the turn text
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User:",
            Role::Assistant => "AI:",
        }
    }
}

/// A single turn in the transcript (Entity)
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    /// Generation time, present only on assistant turns with timing shown
    pub elapsed: Option<Duration>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            elapsed: None,
        }
    }

    pub fn assistant(text: impl Into<String>, elapsed: Option<Duration>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            elapsed,
        }
    }

    /// `"(1.23 s)"` when timing was recorded
    pub fn elapsed_label(&self) -> Option<String> {
        self.elapsed
            .map(|d| format!("({:.2} s)", d.as_secs_f64()))
    }

    /// Transcript line(s) for this turn, newline-terminated.
    ///
    /// `User:\t{text}\n`, or `AI:\t{text}\n` with an optional
    /// `({secs} s)` line before the final newline.
    pub fn render(&self) -> String {
        match self.elapsed_label() {
            Some(label) => format!("{}\t{}\n{}\n", self.role.label(), self.text, label),
            None => format!("{}\t{}\n", self.role.label(), self.text),
        }
    }
}

/// Append-only ordered log of turns
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Whole transcript as the text view shows it
    pub fn render(&self) -> String {
        self.turns.iter().map(Turn::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_render() {
        assert_eq!(Turn::user("hi there").render(), "User:\thi there\n");
    }

    #[test]
    fn test_assistant_turn_render_without_timing() {
        assert_eq!(Turn::assistant("hello", None).render(), "AI:\thello\n");
    }

    #[test]
    fn test_assistant_turn_render_with_timing() {
        let turn = Turn::assistant("hello", Some(Duration::from_millis(1234)));
        let rendered = turn.render();
        assert_eq!(rendered, "AI:\thello\n(1.23 s)\n");
        assert!(rendered.trim_end().ends_with("(1.23 s)"));
    }

    #[test]
    fn test_elapsed_label_two_decimals() {
        let turn = Turn::assistant("x", Some(Duration::from_secs(3)));
        assert_eq!(turn.elapsed_label().as_deref(), Some("(3.00 s)"));
    }

    #[test]
    fn test_transcript_append_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Turn::user("q"));
        transcript.push(Turn::assistant("a", None));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].role, Role::User);
        assert_eq!(transcript.last().unwrap().role, Role::Assistant);
        assert_eq!(transcript.render(), "User:\tq\nAI:\ta\n");
    }
}
