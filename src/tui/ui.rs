use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::action::FOOTER_KEYS;
use crate::core::navigation::Screen;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DocumentView, MenuView, NoticePopup, SearchResults, TitleBar};

/// ```text
/// ┌ title bar: breadcrumb ............ repo status ┐
/// │ menu or document                              │
/// │   (search results overlay)                    │
/// │        (notice overlay, topmost)              │
/// ├ footer keys                                   ┤
/// └ command input / prompt                        ┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, footer_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(1), Length(3)]).areas(frame.area());

    let healthy = app.repo_status.as_ref().is_none_or(|s| s.ok);
    TitleBar::new(app.nav.breadcrumb(), app.status_line(), healthy).render(frame, title_area);

    match app.nav.current() {
        Screen::Menu { title, entries, .. } => {
            MenuView::new(title, entries, &mut tui.menu).render(frame, main_area)
        }
        Screen::Document { title, .. } => {
            DocumentView::new(title, &mut tui.document).render(frame, main_area)
        }
    }

    frame.render_widget(
        Paragraph::new(FOOTER_KEYS).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );

    tui.input.render(frame, input_area);

    if let Some(results) = &app.search_results {
        SearchResults::new(&app.last_query, results, &mut tui.results).render(frame, main_area);
    }

    if let Some(notice) = &app.notice {
        NoticePopup::new(notice).render(frame, frame.area());
    }
}
