//! Status bar widget: mode indicator, focused field, key hints and flash
//! messages

use crate::tui::mode::InputMode;
use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static str {
        match self.state.mode {
            InputMode::Normal => "i:insert  Tab:field  j/k:scroll  t:timing  ?:help  q:quit",
            InputMode::Insert => "Enter:send  Tab:field  Esc:normal  Ctrl+C:quit",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let mode = self.state.mode;
        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(mode.color())
            .add_modifier(Modifier::BOLD);
        let left = Line::from(vec![
            Span::styled(format!(" {} ", mode.indicator()), mode_style),
            Span::styled(
                format!(" {} ", self.state.focus.label()),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
        ]);
        let left_width = left.width() as u16;
        buf.set_line(area.x, area.y, &left, left_width);

        // Flash message or key hints on the right
        let (right_text, right_style) = match &self.state.flash_message {
            Some((flash, _)) => (
                flash.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
            None => (
                self.hints(),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
        };

        let right_line = Line::from(Span::styled(right_text, right_style));
        let right_width = right_line.width() as u16;
        let right_x = area.right().saturating_sub(right_width + 1);
        if right_x > area.x + left_width {
            buf.set_line(right_x, area.y, &right_line, right_width + 1);
        }
    }
}
