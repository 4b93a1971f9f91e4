//! Header widget: model name, session status and version label

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct HeaderWidget<'a> {
    state: &'a TuiState,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (status_text, status_color) = if self.state.generating {
            ("Generating...", Color::Yellow)
        } else {
            ("Ready", Color::Green)
        };

        let line = Line::from(vec![
            Span::styled("◉ ", Style::default().fg(status_color)),
            Span::styled(
                self.state.model_name.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]);

        let version = Line::from(format!(" {} ", self.state.version_label.text()))
            .alignment(Alignment::Right);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Orca Chat ")
            .title_top(version)
            .style(Style::default().fg(Color::White));

        Paragraph::new(line).block(block).render(area, buf);
    }
}
