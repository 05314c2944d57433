use crate::app::{App, AppState};
use crate::chat_message::ChatMessage;
use crate::constants::INPUT_PROMPT;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let size = f.area();

    if app.state == AppState::QuitConfirm {
        draw_quit_confirm(f, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .margin(1)
        .split(size);

    draw_messages(f, app, chunks[0]);

    app.status_indicator.update_spinner();
    app.status_indicator.render(f, chunks[1]);

    draw_input(f, app, chunks[2]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.messages.iter() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(ChatMessage::from(message).render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let input = Line::from(vec![
        Span::styled(INPUT_PROMPT, Style::default().fg(Color::DarkGray)),
        Span::styled(&app.chat_input, Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = app.chat_input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_quit_confirm(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm Quit")
        .style(Style::default().fg(Color::LightYellow).bg(Color::Black));

    f.render_widget(block, area);

    let quit_text = "Quit the chat?\n\nPress 'y' to quit or 'n' to keep talking.";

    let paragraph = Paragraph::new(quit_text)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
