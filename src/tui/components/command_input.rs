//! # CommandInput Component
//!
//! Single-line, bordered command field at the bottom of the screen.
//!
//! The buffer and cursor are internal state; the title is a prop so the same
//! box doubles as the search and calculator prompt. Submitting always emits,
//! even with an empty buffer, because Enter on an empty line means "open the
//! highlighted entry".

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const DEFAULT_TITLE: &str = "Type your choice";

/// High-level events emitted by the CommandInput
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Submit(String),
    ContentChanged,
}

pub struct CommandInput {
    pub buffer: String,
    /// Border title (prop)
    pub title: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pos: usize,
}

impl Default for CommandInput {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: DEFAULT_TITLE.to_string(),
            pos: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pos = 0;
    }

    fn take(&mut self) -> String {
        self.pos = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Text to draw and the cursor column within it, scrolled so the cursor
    /// stays inside `width` columns.
    fn visible(&self, width: usize) -> (&str, u16) {
        let mut start = 0;
        let mut cursor_col = self.buffer[..self.pos].width();
        while width > 0 && cursor_col >= width && start < self.pos {
            let next = next_char_boundary(&self.buffer, start);
            cursor_col -= self.buffer[start..next].width();
            start = next;
        }
        (&self.buffer[start..], cursor_col as u16)
    }
}

impl Component for CommandInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);

        let (text, cursor_col) = self.visible(inner.width as usize);
        let input = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        frame.set_cursor_position((inner.x + cursor_col, inner.y));
    }
}

impl EventHandler for CommandInput {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.pos, text);
                self.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.pos);
                self.buffer.drain(self.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.pos > 0).then(|| {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.pos < self.buffer.len()).then(|| {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::Home => (self.pos != 0).then(|| {
                self.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::End => (self.pos != self.buffer.len()).then(|| {
                self.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(self.take())),
            _ => None,
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
