//! ChatML prompt rendering and conversation history
//!
//! ```text
//! <|im_start|>system
//! {system_prompt}<|im_end|>
//! <|im_start|>user
//! {user}<|im_end|>
//! <|im_start|>assistant
//! {assistant}<|im_end|>
//! <|im_start|>user
//! {prompt}<|im_end|>
//! <|im_start|>assistant
//! ```

use std::fmt::Write;

pub const IM_START: &str = "<|im_start|>";
pub const IM_END: &str = "<|im_end|>";

/// One finished user/assistant round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// History replayed into every prompt while a chat scope is open.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    system_prompt: Option<String>,
    exchanges: Vec<Exchange>,
}

impl ChatHistory {
    pub fn new(system_prompt: Option<String>) -> Self {
        Self {
            system_prompt,
            exchanges: Vec::new(),
        }
    }

    pub fn push(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.exchanges.push(Exchange {
            user: user.into(),
            assistant: assistant.into(),
        });
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Render the whole history followed by `prompt`, ending with an open
    /// assistant turn.
    pub fn render(&self, prompt: &str) -> String {
        self.render_from(0, prompt)
    }

    /// Render like [`render`](Self::render), skipping the oldest exchanges
    /// until `count_tokens` reports at most `budget` tokens.
    ///
    /// Returns the prompt text and how many exchanges were skipped. When even
    /// the bare prompt exceeds the budget it is returned anyway.
    pub fn render_within(
        &self,
        prompt: &str,
        budget: usize,
        count_tokens: impl Fn(&str) -> usize,
    ) -> (String, usize) {
        for skip in 0..self.exchanges.len() {
            let text = self.render_from(skip, prompt);
            if count_tokens(&text) <= budget {
                return (text, skip);
            }
        }
        (
            self.render_from(self.exchanges.len(), prompt),
            self.exchanges.len(),
        )
    }

    fn render_from(&self, skip: usize, prompt: &str) -> String {
        let mut out = String::new();
        if let Some(system) = &self.system_prompt {
            push_message(&mut out, "system", system);
        }
        for exchange in self.exchanges.iter().skip(skip) {
            push_message(&mut out, "user", &exchange.user);
            push_message(&mut out, "assistant", &exchange.assistant);
        }
        push_message(&mut out, "user", prompt);
        let _ = writeln!(out, "{IM_START}assistant");
        out
    }
}

fn push_message(out: &mut String, role: &str, content: &str) {
    let _ = writeln!(out, "{IM_START}{role}\n{content}{IM_END}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_prompt() {
        let history = ChatHistory::new(None);
        assert_eq!(
            history.render("Hi"),
            "<|im_start|>user\nHi<|im_end|>\n<|im_start|>assistant\n"
        );
    }

    #[test]
    fn test_render_with_system_and_history() {
        let mut history = ChatHistory::new(Some("Be brief.".to_string()));
        history.push("What is 2+2?", "4");

        let expected = "<|im_start|>system\nBe brief.<|im_end|>\n\
                        <|im_start|>user\nWhat is 2+2?<|im_end|>\n\
                        <|im_start|>assistant\n4<|im_end|>\n\
                        <|im_start|>user\nAnd 3+3?<|im_end|>\n\
                        <|im_start|>assistant\n";
        assert_eq!(history.render("And 3+3?"), expected);
    }

    #[test]
    fn test_render_within_drops_oldest_first() {
        let mut history = ChatHistory::new(None);
        history.push("first question", "first answer");
        history.push("second question", "second answer");

        let full = history.render("third").len();
        let without_first = history.render_from(1, "third").len();

        // Character count stands in for a tokenizer.
        let (text, skipped) = history.render_within("third", without_first, str::len);
        assert_eq!(skipped, 1);
        assert!(!text.contains("first question"));
        assert!(text.contains("second question"));

        let (text, skipped) = history.render_within("third", full, str::len);
        assert_eq!(skipped, 0);
        assert!(text.contains("first question"));
    }

    #[test]
    fn test_render_within_keeps_prompt_when_budget_too_small() {
        let mut history = ChatHistory::new(None);
        history.push("q", "a");

        let (text, skipped) = history.render_within("long prompt", 1, str::len);
        assert_eq!(skipped, 1);
        assert!(text.contains("long prompt"));
    }
}
