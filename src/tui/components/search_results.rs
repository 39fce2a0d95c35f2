//! # SearchResults Component
//!
//! Overlay listing ranked hits for the last query. Shown while
//! `App::search_results` is `Some`; the command input stays live underneath
//! so a result can be opened by number as well as by highlight.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchResultsState` lives in `TuiState`
//! - `SearchResults` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::search::SearchResult;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct SearchResultsState {
    pub list_state: ListState,
    len: usize,
}

impl SearchResultsState {
    /// Track a (possibly new) result list, keeping the highlight in range.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        let selected = match (self.list_state.selected(), len) {
            (_, 0) => None,
            (Some(i), _) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.list_state = ListState::default();
    }

    /// 1-based number of the highlighted result.
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
            _ => return false,
        };
        self.list_state.select(Some(next));
        true
    }
}

/// Transient render wrapper for the results overlay.
pub struct SearchResults<'a> {
    query: &'a str,
    results: &'a [SearchResult],
    state: &'a mut SearchResultsState,
}

impl<'a> SearchResults<'a> {
    pub fn new(query: &'a str, results: &'a [SearchResult], state: &'a mut SearchResultsState) -> Self {
        Self {
            query,
            results,
            state,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Results for '{}' ", self.query))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Move  Enter Open  # + Enter Open by number  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        // borders + padding + highlight symbol
        let inner_width = overlay.width.saturating_sub(6) as usize;
        let number_width = self.results.len().to_string().len();

        let items: Vec<ListItem> = self
            .results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let number = format!("{:>width$}) ", i + 1, width = number_width);
                let path = format!("  {}", result.rel_path);
                let title_width = inner_width
                    .saturating_sub(number.width())
                    .saturating_sub(path.width());
                ListItem::new(Line::from(vec![
                    Span::styled(number, Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        truncate_to_width(&result.title, title_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(path, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("› ");

        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate to at most `max_width` display columns, ending in "…" when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn results() -> Vec<SearchResult> {
        vec![
            SearchResult {
                title: "SQL Injection".into(),
                rel_path: "web/sqli.md".into(),
                score: 12,
            },
            SearchResult {
                title: "XSS".into(),
                rel_path: "web/xss.md".into(),
                score: 5,
            },
        ]
    }

    #[test]
    fn test_sync_selects_first_and_clamps() {
        let mut state = SearchResultsState::default();
        state.sync(3);
        assert_eq!(state.highlighted(), Some(1));
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.highlighted(), Some(3));
        state.sync(2);
        assert_eq!(state.highlighted(), Some(2));
        state.clear();
        assert_eq!(state.highlighted(), None);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Kerberoasting", 20), "Kerberoasting");
        assert_eq!(truncate_to_width("Kerberoasting", 6), "Kerbe…");
        assert_eq!(truncate_to_width("漢字漢字", 5), "漢字…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_render_lists_hits() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let results = results();
        let mut state = SearchResultsState::default();
        state.sync(results.len());

        terminal
            .draw(|f| SearchResults::new("inject", &results, &mut state).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Results for 'inject'"));
        assert!(text.contains("1) SQL Injection"));
        assert!(text.contains("web/xss.md"));
    }
}
