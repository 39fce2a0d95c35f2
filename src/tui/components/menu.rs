//! # Menu Component
//!
//! Numbered folder listing with a movable highlight.
//!
//! Persistent state + transient wrapper:
//! - `MenuState` lives in `TuiState` and survives between frames
//! - `MenuView` is built each frame around the current screen's entries

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph};

use crate::core::content::{Entry, EntryKind};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct MenuState {
    pub list_state: ListState,
    len: usize,
}

impl MenuState {
    /// Point the highlight at the first of `len` fresh entries.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.list_state = ListState::default();
        if len > 0 {
            self.list_state.select(Some(0));
        }
    }

    /// 1-based number of the highlighted entry.
    pub fn highlighted(&self) -> Option<usize> {
        self.list_state.selected().map(|i| i + 1)
    }

    /// Move the highlight. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        if self.len == 0 {
            return false;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = match event {
            TuiEvent::CursorUp => current.saturating_sub(1),
            TuiEvent::CursorDown => (current + 1).min(self.len - 1),
            TuiEvent::PageUp => 0,
            TuiEvent::PageDown => self.len - 1,
            _ => return false,
        };
        self.list_state.select(Some(next));
        true
    }
}

pub struct MenuView<'a> {
    title: &'a str,
    entries: &'a [Entry],
    state: &'a mut MenuState,
}

impl<'a> MenuView<'a> {
    pub fn new(title: &'a str, entries: &'a [Entry], state: &'a mut MenuState) -> Self {
        Self {
            title,
            entries,
            state,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let empty = Paragraph::new("(empty folder)")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let number_width = self.entries.len().to_string().len();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let number = format!("{:>width$}) ", i + 1, width = number_width);
                let mut spans = vec![
                    Span::styled(number, Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.label.as_str()),
                ];
                if entry.kind == EntryKind::Folder {
                    spans.push(Span::styled("/", Style::default().fg(Color::Cyan)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
