//! Prompt input widget with mode-aware cursor

use crate::tui::field::TextField;
use crate::tui::mode::{Focus, InputMode};
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct InputWidget<'a> {
    state: &'a TuiState,
}

impl<'a> InputWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

/// Spans for a field's text, with a block cursor when `active`.
pub(super) fn field_spans(field: &TextField, active: bool, color: Color) -> Vec<Span<'_>> {
    let text = field.text();
    if !active {
        return vec![Span::styled(text, Style::default().fg(color))];
    }

    let cursor_style = Style::default().fg(Color::Black).bg(color);
    let cursor = field.cursor();
    let before = &text[..cursor];
    let (under, after) = match text[cursor..].chars().next() {
        Some(c) => text[cursor..].split_at(c.len_utf8()),
        None => (" ", ""),
    };

    vec![
        Span::raw(before),
        Span::styled(under, cursor_style),
        Span::raw(after),
    ]
}

impl<'a> Widget for InputWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.state.focus == Focus::Prompt;
        let active = focused && self.state.mode == InputMode::Insert;
        let color = if active {
            Color::Green
        } else if focused {
            Color::White
        } else {
            Color::DarkGray
        };

        let mut spans = vec![Span::styled(
            "> ",
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )];
        spans.extend(field_spans(&self.state.prompt, active, color));

        let before_cursor = &self.state.prompt.text()[..self.state.prompt.cursor()];
        let scroll_x = horizontal_scroll(before_cursor, area.width.saturating_sub(2));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Prompt ")
            .style(Style::default().fg(color));

        Paragraph::new(Line::from(spans))
            .block(block)
            .scroll((0, scroll_x))
            .render(area, buf);
    }
}

/// Columns to scroll so the cursor cell stays inside `inner_width`.
///
/// Measured in display cells after the `"> "` marker, so wide characters
/// count twice.
fn horizontal_scroll(before_cursor: &str, inner_width: u16) -> u16 {
    let cursor_col = Span::raw(before_cursor).width() + 2;
    let scroll = (cursor_col + 1).saturating_sub(usize::from(inner_width));
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_field_is_one_span() {
        let field = TextField::new("abc");
        let spans = field_spans(&field, false, Color::White);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "abc");
    }

    #[test]
    fn test_cursor_at_end_renders_placeholder() {
        let field = TextField::new("abc");
        let spans = field_spans(&field, true, Color::Green);
        assert_eq!(spans[0].content, "abc");
        assert_eq!(spans[1].content, " ");
        assert_eq!(spans[2].content, "");
    }

    #[test]
    fn test_cursor_in_middle_highlights_char() {
        let mut field = TextField::new("añb");
        field.cursor_home();
        field.cursor_right();
        let spans = field_spans(&field, true, Color::Green);
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[1].content, "ñ");
        assert_eq!(spans[2].content, "b");
    }

    #[test]
    fn test_short_prompt_does_not_scroll() {
        assert_eq!(horizontal_scroll("hello", 20), 0);
    }

    #[test]
    fn test_scroll_counts_display_width() {
        // 4 cells of ascii + 2 marker + cursor cell
        assert_eq!(horizontal_scroll("abcd", 5), 2);
        // three characters, six cells
        assert_eq!(horizontal_scroll("日本語", 5), 4);
        assert_eq!(horizontal_scroll("🐈🐈", 4), 3);
    }
}
