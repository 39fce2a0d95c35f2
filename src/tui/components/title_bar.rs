//! # TitleBar Component
//!
//! One-line header: breadcrumb on the left, repository status on the right.
//!
//! Stateless. Both props come from core state:
//! - `breadcrumb`: `Navigator::breadcrumb()`, e.g. `"Main > Notes > Web"`
//! - `status`: `App::status_line()`, empty when git probing is off
//!
//! When the terminal is too narrow for both, the status gives way: the
//! breadcrumb is the only place the user learns where they are.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub struct TitleBar {
    pub breadcrumb: String,
    pub status: String,
    /// Colors the status red when false.
    pub healthy: bool,
}

impl TitleBar {
    pub fn new(breadcrumb: String, status: String, healthy: bool) -> Self {
        Self {
            breadcrumb,
            status,
            healthy,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let crumb_width = self.breadcrumb.width() as u16;
        let status_width = self.status.width() as u16;
        let show_status =
            !self.status.is_empty() && crumb_width + status_width + 2 <= area.width;

        let [crumb_area, status_area] = if show_status {
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area)
        } else {
            [area, Rect::default()]
        };

        frame.render_widget(
            Span::styled(
                self.breadcrumb.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            crumb_area,
        );

        if show_status {
            let color = if self.healthy { Color::Green } else { Color::Red };
            frame.render_widget(
                Span::styled(self.status.as_str(), Style::default().fg(color)),
                status_area,
            );
        }
    }
}
