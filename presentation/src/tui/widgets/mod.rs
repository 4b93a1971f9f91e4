//! TUI widgets: ratatui components for the chat window
//!
//! Layout:
//! ┌── Header (3) ─────────────────────────────────────┐
//! ├── Conversation (flex) ────────────────────────────┤
//! ├── Prompt (3) ─────────────┬── Settings (3) ───────┤
//! └── StatusBar (1) ──────────────────────────────────┘

pub mod conversation;
pub mod header;
pub mod help;
pub mod input;
pub mod settings;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

const SETTINGS_WIDTH: u16 = 52;

/// Compute the main layout regions from a terminal area
pub struct MainLayout {
    pub header: Rect,
    pub conversation: Rect,
    pub input: Rect,
    pub settings: Rect,
    pub status_bar: Rect,
}

impl MainLayout {
    pub fn compute(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        // Narrow terminals give the prompt at least half the row
        let settings_width = SETTINGS_WIDTH.min(area.width / 2);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(settings_width)])
            .split(vertical[2]);

        Self {
            header: vertical[0],
            conversation: vertical[1],
            input: bottom[0],
            settings: bottom[1],
            status_bar: vertical[3],
        }
    }

    /// Create a centered overlay area (for help)
    pub fn centered_overlay(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vert[1])[1]
    }
}
