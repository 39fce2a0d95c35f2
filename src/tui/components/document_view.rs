//! # DocumentView Component
//!
//! Scrollable, markdown-rendered note.
//!
//! The rendered `Text` is cached in `DocumentState` when the note screen is
//! entered, so scrolling doesn't re-read the file or re-run the highlighter.

use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Text};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::content::read_document;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

#[derive(Default)]
pub struct DocumentState {
    path: Option<PathBuf>,
    pub text: Text<'static>,
    pub scroll_state: ScrollViewState,
}

impl DocumentState {
    /// Read and render `path`, scrolled to the top.
    pub fn load(&mut self, path: &Path) {
        self.text = match read_document(path) {
            Ok(content) => markdown::render(&content, Color::White),
            Err(e) => {
                warn!("Failed to render {}: {}", path.display(), e);
                Text::styled(e.to_string(), Style::default().fg(Color::Red))
            }
        };
        self.path = Some(path.to_path_buf());
        self.scroll_state = ScrollViewState::default();
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Scroll. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            _ => return false,
        }
        true
    }
}

pub struct DocumentView<'a> {
    title: &'a str,
    state: &'a mut DocumentState,
}

impl<'a> DocumentView<'a> {
    pub fn new(title: &'a str, state: &'a mut DocumentState) -> Self {
        Self { title, state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.state.text.clone()).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ContentFixture;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_load_renders_markdown() {
        let fx = ContentFixture::new();
        let path = fx.file("rsa.md", "# RSA\n\nUse **OAEP**.\n");
        let mut state = DocumentState::default();
        state.load(&path);
        assert_eq!(state.path(), Some(path.as_path()));

        let backend = TestBackend::new(40, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DocumentView::new("RSA", &mut state).render(f, f.area()))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("RSA"));
        assert!(text.contains("Use OAEP."));
    }

    #[test]
    fn test_load_missing_file_shows_error() {
        let fx = ContentFixture::new();
        let mut state = DocumentState::default();
        state.load(&fx.path("gone.md"));
        let rendered: String = state.text.lines[0]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(rendered.contains("gone.md"), "{rendered}");
    }

    #[test]
    fn test_scroll_moves_offset() {
        let fx = ContentFixture::new();
        let body: String = (1..=50).map(|i| format!("line {i}\n\n")).collect();
        let path = fx.file("long.md", &body);
        let mut state = DocumentState::default();
        state.load(&path);

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DocumentView::new("Long", &mut state).render(f, f.area()))
            .unwrap();

        assert!(state.handle_event(&TuiEvent::CursorDown));
        assert!(state.handle_event(&TuiEvent::CursorDown));
        assert_eq!(state.scroll_state.offset().y, 2);
        assert!(state.handle_event(&TuiEvent::CursorUp));
        assert_eq!(state.scroll_state.offset().y, 1);
        assert!(!state.handle_event(&TuiEvent::Submit));
    }

    #[test]
    fn test_reload_resets_scroll() {
        let fx = ContentFixture::new();
        let path = fx.file("a.md", "a\n");
        let mut state = DocumentState::default();
        state.load(&path);
        state.handle_event(&TuiEvent::CursorDown);
        state.load(&path);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
