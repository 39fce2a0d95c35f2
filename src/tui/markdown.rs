//! Markdown → ratatui `Text` for the note view.
//!
//! Walks `pulldown_cmark` events and builds styled lines: headings with an
//! underline rule, emphasis, inline code, fenced code (syntect), nested
//! lists, block quotes, links, task markers and pipe tables.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const BULLETS: [&str; 3] = ["•", "◦", "▪"];
const RULE_WIDTH: usize = 40;

/// Render a note. Output is owned so the caller can cache it per screen.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_TABLES);

    let mut renderer = Renderer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        renderer.event(event);
    }
    renderer.finish()
}

enum Container {
    Quote,
    /// `None` = bulleted, `Some(n)` = next ordinal.
    List(Option<u64>),
}

#[derive(Default)]
struct Table {
    rows: Vec<Vec<String>>,
    header_rows: usize,
    row: Vec<String>,
    cell: String,
}

struct Renderer {
    lines: Vec<Line<'static>>,
    /// Spans of the line under construction.
    pending: Vec<Span<'static>>,
    base: Style,
    inline: Vec<Style>,
    containers: Vec<Container>,
    /// `Some` inside a fenced/indented block; inner `None` = no highlighting.
    code: Option<Option<HighlightLines<'static>>>,
    table: Option<Table>,
    link: Option<String>,
    gap_before_next_block: bool,
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            pending: Vec::new(),
            base: Style::default().fg(base_fg),
            inline: Vec::new(),
            containers: Vec::new(),
            code: None,
            table: None,
            link: None,
            gap_before_next_block: false,
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        Text::from(self.lines)
    }

    fn style(&self) -> Style {
        self.inline.last().copied().unwrap_or(self.base)
    }

    fn push_style(&mut self, overlay: Style) {
        let composed = self.style().patch(overlay);
        self.inline.push(composed);
    }

    fn list_depth(&self) -> usize {
        self.containers
            .iter()
            .filter(|c| matches!(c, Container::List(_)))
            .count()
    }

    /// Quote bars and nested-list indentation for a fresh line.
    fn prefix(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut lists_seen = 0;
        for container in &self.containers {
            match container {
                Container::Quote => {
                    spans.push(Span::styled("▌ ", Style::default().fg(Color::DarkGray)))
                }
                Container::List(_) => {
                    lists_seen += 1;
                    if lists_seen > 1 {
                        spans.push(Span::raw("  "));
                    }
                }
            }
        }
        spans
    }

    fn emit(&mut self, spans: Vec<Span<'static>>) {
        let mut line = self.prefix();
        line.extend(spans);
        self.lines.push(Line::from(line));
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let spans = std::mem::take(&mut self.pending);
            self.emit(spans);
        }
    }

    fn start_block(&mut self) {
        if self.gap_before_next_block && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.gap_before_next_block = false;
    }

    fn end_block(&mut self) {
        self.flush();
        self.gap_before_next_block = true;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.start_block();
                self.emit(vec![Span::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::default().fg(Color::DarkGray),
                )]);
                self.gap_before_next_block = true;
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "☑ " } else { "☐ " };
                self.pending.push(Span::styled(marker, self.style()));
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Inside a list item the marker is already pending; keep it on this line.
                if self.pending.is_empty() {
                    self.start_block();
                }
            }
            Tag::Heading { level, .. } => {
                self.flush();
                self.start_block();
                self.push_style(heading_style(level));
                if level > HeadingLevel::H2 {
                    let hashes = "#".repeat(level as usize);
                    self.pending
                        .push(Span::styled(format!("{hashes} "), Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.start_block();
                self.containers.push(Container::Quote);
                self.push_style(Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.split_whitespace().next().unwrap_or("").to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let frame = Style::default().fg(Color::DarkGray);
                let header = if lang.is_empty() {
                    "┌─".to_string()
                } else {
                    format!("┌─ {lang}")
                };
                self.emit(vec![Span::styled(header, frame)]);

                let highlighter = SYNTAXES
                    .find_syntax_by_token(&lang)
                    .filter(|_| !lang.is_empty())
                    .map(|syntax| HighlightLines::new(syntax, &THEMES.themes[CODE_THEME]));
                self.code = Some(highlighter);
            }
            Tag::List(start) => {
                self.flush();
                if self.list_depth() == 0 {
                    self.start_block();
                }
                self.containers.push(Container::List(start));
            }
            Tag::Item => {
                self.flush();
                let depth = self.list_depth().saturating_sub(1);
                let marker = match self.containers.iter_mut().rev().find_map(|c| match c {
                    Container::List(n) => Some(n),
                    Container::Quote => None,
                }) {
                    Some(Some(n)) => {
                        let m = format!("{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{} ", BULLETS[depth % BULLETS.len()]),
                };
                self.pending
                    .push(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Table(_) => {
                self.flush();
                self.start_block();
                self.table = Some(Table::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.push_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.list_depth() > 0 {
                    self.flush();
                } else {
                    self.end_block();
                }
            }
            TagEnd::Heading(level) => {
                self.inline.pop();
                let width: usize = self.pending.iter().map(|s| s.content.width()).sum();
                self.flush();
                let rule = match level {
                    HeadingLevel::H1 => Some("═"),
                    HeadingLevel::H2 => Some("─"),
                    _ => None,
                };
                if let Some(ch) = rule {
                    self.emit(vec![Span::styled(
                        ch.repeat(width.max(1)),
                        Style::default().fg(Color::DarkGray),
                    )]);
                }
                self.gap_before_next_block = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.containers.pop();
                self.inline.pop();
                self.gap_before_next_block = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.emit(vec![Span::styled("└─", Style::default().fg(Color::DarkGray))]);
                self.gap_before_next_block = true;
            }
            TagEnd::List(_) => {
                self.flush();
                self.containers.pop();
                if self.list_depth() == 0 {
                    self.gap_before_next_block = true;
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                    table.header_rows += 1;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.emit_table(table);
                }
                self.gap_before_next_block = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.link.take() {
                    self.pending.push(Span::styled(
                        format!(" <{url}>"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        let text = raw.replace('\t', "    ");

        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&text);
            return;
        }

        if let Some(highlighter) = self.code.as_mut() {
            let frame = Span::styled("│ ", Style::default().fg(Color::DarkGray));
            let mut rendered = Vec::new();
            for line in LinesWithEndings::from(&text) {
                let mut spans = vec![frame.clone()];
                match highlighter {
                    Some(hl) => {
                        if let Ok(ranges) = hl.highlight_line(line, &SYNTAXES) {
                            spans.extend(ranges.into_iter().filter_map(|(style, piece)| {
                                let piece = piece.trim_end_matches(['\n', '\r']);
                                (!piece.is_empty()).then(|| {
                                    let fg = Color::Rgb(
                                        style.foreground.r,
                                        style.foreground.g,
                                        style.foreground.b,
                                    );
                                    Span::styled(piece.to_string(), Style::default().fg(fg))
                                })
                            }));
                        }
                    }
                    None => spans.push(Span::styled(
                        line.trim_end_matches(['\n', '\r']).to_string(),
                        Style::default().fg(Color::White),
                    )),
                }
                rendered.push(spans);
            }
            for spans in rendered {
                self.emit(spans);
            }
            return;
        }

        let style = self.style();
        self.pending.push(Span::styled(text, style));
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(code);
            return;
        }
        self.pending.push(Span::styled(
            code.to_string(),
            Style::default().fg(Color::Yellow).bg(Color::Black),
        ));
    }

    fn emit_table(&mut self, table: Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.width())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = Style::default().fg(Color::DarkGray);
        for (i, row) in table.rows.iter().enumerate() {
            let is_header = i < table.header_rows;
            let cell_style = if is_header {
                self.base.add_modifier(Modifier::BOLD)
            } else {
                self.base
            };
            let mut spans = Vec::new();
            for (col, width) in widths.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::styled(" │ ", border));
                }
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                let padding = width.saturating_sub(cell.width());
                spans.push(Span::styled(format!("{cell}{}", " ".repeat(padding)), cell_style));
            }
            self.emit(spans);

            if is_header && i + 1 == table.header_rows {
                let separator = widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("─┼─");
                self.emit(vec![Span::styled(separator, border)]);
            }
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        HeadingLevel::H2 => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}
