//! Help overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Widget for rendering help overlay
pub struct HelpWidget;

impl HelpWidget {
    fn section(title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn binding(keys: &'static str, what: &'static str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), Style::default().fg(Color::Yellow)),
            Span::raw(what),
        ])
    }

    fn build_help_text() -> Vec<Line<'static>> {
        vec![
            Self::section("Anywhere"),
            Self::binding("Enter", "Send the prompt"),
            Self::binding("Tab", "Next field (prompt, tokens, temperature)"),
            Self::binding("Shift+Tab", "Previous field"),
            Self::binding("Ctrl+T", "Toggle generation time"),
            Self::binding("Ctrl+C", "Quit"),
            Line::from(""),
            Self::section("Normal Mode"),
            Self::binding("i/a", "Enter Insert mode"),
            Self::binding("j/k", "Scroll down/up"),
            Self::binding("g/G", "Scroll to top/bottom"),
            Self::binding("t", "Toggle generation time"),
            Self::binding("v", "Toggle version label"),
            Self::binding("?", "Toggle this help"),
            Self::binding("q", "Quit"),
            Line::from(""),
            Self::section("Insert Mode"),
            Self::binding("Esc", "Return to Normal"),
            Self::binding("←/→", "Move cursor"),
            Self::binding("Home/End", "Start/end of field"),
            Line::from(""),
            Line::from(Span::styled(
                "The token field accepts digits only, the temperature field a decimal number.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Press ? or Esc to close",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().fg(Color::Cyan));

        Paragraph::new(Self::build_help_text())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
