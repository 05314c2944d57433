use crate::models::{Message, Sender};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// A message prepared for terminal rendering: a bubble with a timestamp
/// header, wrapped body lines, and a footer.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    content: String,
    from_user: bool,
    timestamp: DateTime<Local>,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            content: message.content.clone(),
            from_user: message.sender == Sender::User,
            timestamp: message.timestamp.with_timezone(&Local),
        }
    }
}

impl ChatMessage {
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.get_base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn get_base_style(&self) -> Style {
        Style::default().fg(if self.from_user {
            Color::Rgb(255, 223, 128)
        } else {
            Color::Rgb(144, 238, 144)
        })
    }

    fn indent(&self) -> &'static str {
        if self.from_user {
            "  "
        } else {
            ""
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let author = if self.from_user { "you" } else { "bot" };

        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(" ".to_string(), style),
            Span::styled(author.to_string(), style.add_modifier(Modifier::DIM)),
        ]));
    }

    // Bot replies are markdown-ish, so fenced code lines get their own
    // styling; user text is rendered plain.
    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let mut in_code_block = false;
        let mut code_buffer = String::new();
        let mut text_buffer = String::new();

        for line in self.content.lines() {
            if !self.from_user && line.trim().starts_with("```") {
                self.flush_text_buffer(lines, &text_buffer, area, style);
                self.flush_code_buffer(lines, &code_buffer, style);
                text_buffer.clear();
                code_buffer.clear();
                in_code_block = !in_code_block;
                continue;
            }

            if in_code_block {
                code_buffer.push_str(line);
                code_buffer.push('\n');
            } else {
                text_buffer.push_str(line);
                text_buffer.push('\n');
            }
        }

        self.flush_text_buffer(lines, &text_buffer, area, style);
        self.flush_code_buffer(lines, &code_buffer, style);
    }

    fn flush_text_buffer(
        &self,
        lines: &mut Vec<Line<'static>>,
        buffer: &str,
        area: Rect,
        style: Style,
    ) {
        if buffer.trim().is_empty() {
            return;
        }

        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for wrapped_line in wrap(buffer.trim_end(), wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(self.indent().to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }

    fn flush_code_buffer(&self, lines: &mut Vec<Line<'static>>, buffer: &str, style: Style) {
        if buffer.is_empty() {
            return;
        }

        let code_style = Style::default()
            .fg(Color::Rgb(209, 154, 102))
            .add_modifier(Modifier::BOLD);

        for code_line in buffer.lines() {
            lines.push(Line::from(vec![
                Span::styled(self.indent().to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
                Span::styled(format!(" {}", code_line), code_style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_long_user_text() {
        let message = Message::user("a ".repeat(100));
        let bubble = ChatMessage::from(&message);
        let area = Rect::new(0, 0, 40, 20);

        let lines = bubble.render(area);
        // header + at least two wrapped lines + footer
        assert!(lines.len() >= 4);
    }

    #[test]
    fn test_render_bot_code_fence_produces_code_lines() {
        let message = Message::bot("look:\n```\nlet x = 1;\n```\ndone");
        let bubble = ChatMessage::from(&message);
        let area = Rect::new(0, 0, 60, 20);

        let lines = bubble.render(area);
        let has_code_marker = lines
            .iter()
            .any(|line| line.spans.iter().any(|span| span.content.contains('▎')));
        assert!(has_code_marker);
        // The fence itself is never rendered.
        let has_fence = lines
            .iter()
            .any(|line| line.spans.iter().any(|span| span.content.contains("```")));
        assert!(!has_fence);
    }
}
