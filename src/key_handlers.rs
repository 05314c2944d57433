use crate::app::{App, AppState};
use crate::chat::ChatService;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

pub fn handle_chat_input(key: KeyEvent, app: &mut App, service: &Arc<ChatService>) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Enter => {
            // Input is disabled while a send is in flight.
            if service.is_busy() {
                return;
            }
            let user_message = app.chat_input.drain(..).collect::<String>();
            if !user_message.trim().is_empty() {
                let service = service.clone();
                tokio::spawn(async move {
                    service.send(&user_message).await;
                });
            }
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            if !service.is_busy() {
                app.chat_input.pop();
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else if !service.is_busy() {
                app.chat_input.push(c);
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
