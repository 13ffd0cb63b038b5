//! One-line status bar under the scene.

use crate::model::Zone;
use crate::view_state::HudEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Snapshot of what the status bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBar {
    /// Current offset.
    pub scroll_y: i32,
    /// Zone of the current offset.
    pub zone: Zone,
    /// Last listener notification.
    pub last_event: HudEvent,
    /// Finished gestures.
    pub gestures: u32,
}

impl StatusBar {
    fn zone_style(&self) -> Style {
        let color = match self.zone {
            Zone::Reveal => Color::LightBlue,
            Zone::Peek => Color::Yellow,
            Zone::Content => Color::Green,
        };
        Style::default().fg(color)
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::raw(format!(" offset {}", self.scroll_y)),
            Span::styled(" | ", dim),
            Span::styled(format!("zone {}", self.zone.label()), self.zone_style()),
            Span::styled(" | ", dim),
            Span::raw(format!("last {}", self.last_event.label())),
            Span::styled(" | ", dim),
            Span::raw(format!("gestures {}", self.gestures)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
