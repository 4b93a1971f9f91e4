//! Settings widget: token limit, temperature, timing toggle and the
//! "Generating..." indicator

use super::input::field_spans;
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

pub struct SettingsWidget<'a> {
    state: &'a TuiState,
}

impl<'a> SettingsWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn field(&self, label: &'static str, field: &'a TextField, focus: Focus) -> Vec<Span<'a>> {
        let focused = self.state.focus == focus;
        let active = focused && self.state.mode == InputMode::Insert;
        let color = if active {
            Color::Green
        } else if focused {
            Color::White
        } else {
            Color::Gray
        };
        let label_style = if focused {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled(label, label_style), Span::raw("[")];
        spans.extend(field_spans(field, active, color));
        spans.push(Span::raw("] "));
        spans
    }
}

impl<'a> Widget for SettingsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = self.field("tok ", &self.state.token_limit, Focus::TokenLimit);
        spans.extend(self.field("temp ", &self.state.temperature, Focus::Temperature));

        let (mark, mark_color) = if self.state.show_timing {
            ("[x]", Color::Green)
        } else {
            ("[ ]", Color::DarkGray)
        };
        spans.push(Span::styled(mark, Style::default().fg(mark_color)));
        spans.push(Span::raw(" time "));

        if self.state.generating {
            spans.push(Span::styled(
                format!("{} Generating...", self.state.spinner()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let border = if self.state.focus == Focus::Prompt {
            Color::DarkGray
        } else {
            Color::White
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .style(Style::default().fg(border));

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}
