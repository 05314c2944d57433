use crate::constants::{SPINNER_FRAMES, WAITING_STATUS};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spinner row shown between the message list and the input row while a
/// send is in flight.
#[derive(Debug)]
pub struct StatusIndicator {
    busy: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            busy: false,
            spinner_idx: 0,
        }
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (spinner, status_text) = if self.busy {
            (SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()], WAITING_STATUS)
        } else {
            (" ", "")
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}
