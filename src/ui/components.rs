//! UI Components for the terminal interface

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
};
use ratatui::Frame;

use super::input::Focus;
use super::Phase;
use crate::filter::FilterState;
use crate::schema::{DisplayRow, Sheet};
use crate::view::Section;

const BORDER: Color = Color::Blue;
const FOCUSED: Color = Color::Yellow;
const MAX_COLUMN_WIDTH: usize = 40;

fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
    let color = if focused { FOCUSED } else { BORDER };
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title.into()))
        .border_style(Style::default().fg(color))
}

/// Status line showing the load phase and workbook path
pub struct StatusPanel {
    phase: Phase,
    info: String,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::Opening,
            info: String::new(),
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let phase_style = match self.phase {
            Phase::Ready => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            _ => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        };

        let phase_indicator = match self.phase {
            Phase::Opening => "◐",
            Phase::Reading => "⚙",
            Phase::Ready => "✓",
        };

        let line = Line::from(vec![
            Span::styled(format!(" {} ", phase_indicator), phase_style),
            Span::styled(self.phase.to_string(), phase_style),
            Span::raw("  "),
            Span::styled(&self.info, Style::default().fg(Color::Gray)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Crafting Explorer ")
            .border_style(Style::default().fg(BORDER));

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

/// Activity panel showing recent notices
pub struct LogPanel {
    entries: Vec<String>,
    max_entries: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 100,
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize; // -2 for borders
        let start = self.entries.len().saturating_sub(visible_height);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.entries.len() - start - 1 {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Span::styled(format!(" {}", entry), style))
            })
            .collect();

        frame.render_widget(List::new(items).block(panel("Activity", false)), area);
    }
}

pub fn render_logo(frame: &mut Frame, area: Rect, logo: &str) {
    let paragraph = Paragraph::new(logo.to_string())
        .style(Style::default().fg(Color::Magenta))
        .block(Block::default().borders(Borders::NONE));
    frame.render_widget(paragraph, area);
}

pub fn render_search(frame: &mut Frame, area: Rect, state: &FilterState, focus: Focus) {
    let focused = focus == Focus::Search;
    let text = if state.search_text.is_empty() && !focused {
        Line::from(Span::styled(
            "e.g., Flame Tongue",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let cursor = if focused { "▏" } else { "" };
        Line::from(format!("{}{}", state.search_text, cursor))
    };

    let title = format!("Search by {}", state.mode);
    frame.render_widget(Paragraph::new(text).block(panel(title, focused)), area);
}

pub fn render_creature_types(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    selected: usize,
    focus: Focus,
) {
    let items: Vec<ListItem> = options.iter().map(|o| ListItem::new(o.as_str())).collect();
    let list = List::new(items)
        .block(panel("Creature Type", focus == Focus::CreatureType))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_help(frame: &mut Frame, area: Rect, state: &FilterState) {
    let toggle = if state.show_harvest { "[x]" } else { "[ ]" };
    let key = Style::default().fg(Color::Cyan);
    let lines = vec![
        Line::from(vec![Span::raw(format!(" {} Show Harvest Table", toggle))]),
        Line::from(""),
        Line::from(vec![Span::styled(" F2 ", key), Span::raw("harvest table")]),
        Line::from(vec![Span::styled(" F3 ", key), Span::raw("search mode")]),
        Line::from(vec![Span::styled(" F5 ", key), Span::raw("reset filters")]),
        Line::from(vec![Span::styled(" F6 ", key), Span::raw("clear results")]),
        Line::from(vec![Span::styled(" Tab", key), Span::raw(" focus  "), Span::styled("Esc", key), Span::raw(" quit")]),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel("Filters", false)), area);
}

/// Render an unfiltered sheet
pub fn render_sheet<R: DisplayRow>(frame: &mut Frame, area: Rect, title: &str, sheet: &Sheet<R>) {
    let rows: Vec<&R> = sheet.rows.iter().collect();
    let table = build_table(&sheet.headers, &rows, |_| None);
    frame.render_widget(table.block(panel(title, false)), area);
}

/// Render a filtered section, or its notice when nothing matched
pub fn render_section<R: DisplayRow>(
    frame: &mut Frame,
    area: Rect,
    section: &Section<'_, R>,
    scroll: usize,
    focused: bool,
) {
    let block = panel(&section.title, focused);

    if let Some(notice) = section.notice() {
        render_notice(frame, area, block, notice);
        return;
    }

    let rows = section.rows();
    let table = build_table(section.headers, rows, |col| section.needle_for(col));
    let mut state = TableState::default().with_offset(scroll.min(rows.len().saturating_sub(1)));
    frame.render_stateful_widget(table.block(block), area, &mut state);
}

pub fn render_notice(frame: &mut Frame, area: Rect, block: Block<'_>, notice: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        format!(" ℹ {}", notice),
        Style::default().fg(Color::Cyan),
    )))
    .wrap(Wrap { trim: false })
    .block(block);
    frame.render_widget(paragraph, area);
}

pub fn render_cleared(frame: &mut Frame, area: Rect, notice: &str) {
    render_notice(frame, area, panel("No results shown", false), notice);
}

fn build_table<'a, R: DisplayRow>(
    headers: &'a [String],
    rows: &[&'a R],
    needle_for: impl Fn(usize) -> Option<&'a str>,
) -> Table<'a> {
    let widths: Vec<Constraint> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let longest = rows
                .iter()
                .filter_map(|r| r.cells().get(i).and_then(|c| c.as_deref()))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0);
            Constraint::Length(longest.max(h.chars().count()).min(MAX_COLUMN_WIDTH) as u16)
        })
        .collect();

    let header = Row::new(headers.iter().map(|h| Cell::from(h.as_str())))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = rows
        .iter()
        .map(|r| {
            Row::new(r.cells().iter().enumerate().map(|(i, cell)| {
                let text = cell.as_deref().unwrap_or("");
                match needle_for(i) {
                    Some(needle) => Cell::from(highlight_line(text, needle)),
                    None => Cell::from(text),
                }
            }))
        })
        .collect();

    Table::new(body, widths).header(header).column_spacing(2)
}

/// Split `text` into spans with every case-insensitive match of `needle`
/// emphasized.
///
/// Matching folds one char at a time so span bounds always sit on char
/// boundaries of `text`, whatever lowercasing does to byte lengths.
pub fn highlight_line<'a>(text: &'a str, needle: &str) -> Line<'a> {
    let style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let needle = needle.to_lowercase();
    if needle.is_empty() {
        return Line::from(text);
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut pos = 0;
    let mut i = 0;
    while i < chars.len() {
        let Some(len) = match_len(&chars[i..], &needle) else {
            i += 1;
            continue;
        };
        let start = chars[i].0;
        let end = chars.get(i + len).map_or(text.len(), |(b, _)| *b);
        if start > pos {
            spans.push(Span::raw(&text[pos..start]));
        }
        spans.push(Span::styled(&text[start..end], style));
        pos = end;
        i += len;
    }

    if spans.is_empty() {
        return Line::from(text);
    }
    if pos < text.len() {
        spans.push(Span::raw(&text[pos..]));
    }
    Line::from(spans)
}

/// Number of chars at the front of `chars` whose lowercase spells `needle`
fn match_len(chars: &[(usize, char)], needle: &str) -> Option<usize> {
    let mut folded = String::new();
    for (n, (_, c)) in chars.iter().enumerate() {
        folded.extend(c.to_lowercase());
        if !needle.starts_with(folded.as_str()) {
            return None;
        }
        if folded.len() == needle.len() {
            return Some(n + 1);
        }
    }
    None
}
