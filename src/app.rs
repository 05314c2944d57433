use crate::models::Message;
use crate::status_indicator::StatusIndicator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub messages: Vec<Message>,
    pub chat_input: String,
    pub chat_scroll: u16,
    pub status_indicator: StatusIndicator,
}

impl App {
    pub fn new() -> App {
        App {
            state: AppState::Chat,
            messages: Vec::new(),
            chat_input: String::new(),
            chat_scroll: 0,
            status_indicator: StatusIndicator::new(),
        }
    }

    /// Replaces the rendered snapshot with the latest one from the store
    /// and jumps to the bottom. The draw pass clamps the scroll value to
    /// whatever the real maximum turns out to be.
    pub fn apply_snapshot(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.chat_scroll = u16::MAX;
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
