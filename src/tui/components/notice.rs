//! # NoticePopup Component
//!
//! Centered message box for help, git status, calculator output and errors.
//! Stateless; any key dismissal is handled by the event loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::Notice;
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct NoticePopup<'a> {
    pub notice: &'a Notice,
}

impl<'a> NoticePopup<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    /// Errors get a red frame, everything else magenta.
    fn accent(&self) -> Color {
        match self.notice.title.as_str() {
            "Configuration" | "Not Found" | "Read Error" | "Input" => Color::Red,
            _ => Color::Magenta,
        }
    }
}

impl Component for NoticePopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 50, area);
        frame.render_widget(Clear, overlay);

        let accent = self.accent();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", self.notice.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Enter/Esc Close ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.notice.body.as_str())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(body, overlay);
    }
}
