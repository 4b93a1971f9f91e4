//! Conversation widget: the transcript, newest turn at the bottom

use crate::tui::state::TuiState;
use orca_domain::{Role, Transcript};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ConversationWidget<'a> {
    state: &'a TuiState,
    transcript: &'a Transcript,
}

impl<'a> ConversationWidget<'a> {
    pub fn new(state: &'a TuiState, transcript: &'a Transcript) -> Self {
        Self { state, transcript }
    }

    fn role_color(role: Role) -> Color {
        match role {
            Role::User => Color::Cyan,
            Role::Assistant => Color::Green,
        }
    }

    fn format_turns(&self) -> Text<'a> {
        let mut lines: Vec<Line> = Vec::new();

        for turn in self.transcript.turns() {
            let role_style = Style::default()
                .fg(Self::role_color(turn.role))
                .add_modifier(Modifier::BOLD);
            lines.push(Line::from(Span::styled(turn.role.label(), role_style)));

            for content_line in turn.text.lines() {
                lines.push(Line::from(format!("  {}", content_line)));
            }
            if let Some(elapsed) = turn.elapsed_label() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", elapsed),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
        }

        if self.state.generating {
            lines.push(Line::from(vec![
                Span::styled(
                    Role::Assistant.label(),
                    Style::default()
                        .fg(Self::role_color(Role::Assistant))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", self.state.spinner()),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        Text::from(lines)
    }
}

impl<'a> Widget for ConversationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.format_turns();
        let visible_height = area.height.saturating_sub(2); // borders
        let content_width = area.width.saturating_sub(2); // borders

        // Paragraph::line_count wraps exactly as rendering does.
        // Built without block so line_count returns pure content lines.
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let total_lines = wrapped_rows(&paragraph, content_width);

        // Calculate scroll: scroll_offset=0 means "show bottom"
        let scroll = if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            let offset = self.state.scroll_offset.min(max_scroll as usize) as u16;
            max_scroll - offset
        } else {
            0
        };

        let title = if self.state.auto_scroll {
            " Conversation ".to_string()
        } else {
            format!(" Conversation [+{}] ", self.state.scroll_offset.min(total_lines as usize))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::White));

        paragraph.block(block).scroll((scroll, 0)).render(area, buf);
    }
}

/// Wrapped row count, saturating at what a `u16` scroll offset can address.
fn wrapped_rows(paragraph: &Paragraph<'_>, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width)).unwrap_or(u16::MAX)
}
