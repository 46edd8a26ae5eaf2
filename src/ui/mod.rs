//! Terminal UI module using ratatui
//!
//! Provides two things:
//! - a small reporting API used while the workbook loads (phase, info, activity log)
//! - the interactive browser: filters on the left, filtered sheets on the right

mod components;
pub mod input;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;
use ratatui::Terminal;
use std::io::{self, Stdout};

use components::{LogPanel, StatusPanel};
use input::{map_key, scrolled, Action, Focus};

use crate::session::Session;
use crate::view::{View, RESULTS_CLEARED};

/// Startup phases shown in the status panel
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Opening,
    Reading,
    Ready,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Opening => write!(f, "Opening workbook"),
            Phase::Reading => write!(f, "Reading sheets"),
            Phase::Ready => write!(f, "Ready"),
        }
    }
}

/// Trait for UI implementations - allows both real TUI and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn log(&mut self, message: impl Into<String>);
}

/// Interactive browser - full TUI implementation
pub struct Browser {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: StatusPanel,
    log: LogPanel,
    logo: Option<String>,
    focus: Focus,
    results_scroll: usize,
    sources_scroll: usize,
}

impl Browser {
    /// Create the browser and enter the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            status: StatusPanel::new(),
            log: LogPanel::new(),
            logo: None,
            focus: Focus::default(),
            results_scroll: 0,
            sources_scroll: 0,
        })
    }

    pub fn set_logo(&mut self, logo: Option<String>) {
        self.logo = logo;
    }

    /// Event loop: one key, one event, one render
    pub fn run(mut self, session: &mut Session<'_>) -> Result<()> {
        let mut view = session.render();

        loop {
            self.draw(session, &view)?;

            let key = match event::read()? {
                CrosstermEvent::Key(key) => key,
                _ => continue,
            };

            match map_key(key, self.focus) {
                Action::Quit => break,
                Action::Ignore => {}
                Action::FocusNext => self.focus = self.focus.next(),
                Action::Scroll(delta) => self.scroll(delta, &view),
                Action::Session(event) => {
                    if let Err(e) = session.apply(event) {
                        tracing::warn!(error = %e, "event rejected");
                        self.log.add(e.to_string());
                    }
                    self.results_scroll = 0;
                    self.sources_scroll = 0;
                    view = session.render();
                    self.log_view(&view);
                }
            }
        }

        self.restore()
    }

    fn scroll(&mut self, delta: i32, view: &View<'_>) {
        let (results, sources) = match view {
            View::Cleared => (0, 0),
            View::Harvest(section) => (section.rows().len(), 0),
            View::Recipes { recipes, sources } => (
                recipes.rows().len(),
                sources.as_ref().map_or(0, |s| s.rows().len()),
            ),
        };
        match self.focus {
            Focus::Sources => self.sources_scroll = scrolled(self.sources_scroll, delta, sources),
            _ => self.results_scroll = scrolled(self.results_scroll, delta, results),
        }
    }

    fn log_view(&mut self, view: &View<'_>) {
        let summary = match view {
            View::Cleared => RESULTS_CLEARED.to_string(),
            View::Harvest(section) => format!("{}: {} rows", section.title, section.rows().len()),
            View::Recipes { recipes, sources } => match sources {
                Some(s) => format!(
                    "{}: {} items, {} harvest sources",
                    recipes.title,
                    recipes.rows().len(),
                    s.rows().len()
                ),
                None => format!("{}: {} items", recipes.title, recipes.rows().len()),
            },
        };
        tracing::debug!(%summary, "render");
        self.log.add(summary);
    }

    fn draw(&mut self, session: &Session<'_>, view: &View<'_>) -> Result<()> {
        let status = &self.status;
        let log = &self.log;
        let logo = self.logo.as_deref();
        let focus = self.focus;
        let scrolls = (self.results_scroll, self.sources_scroll);

        self.terminal.draw(|frame| {
            let outer = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(10)])
                .split(frame.area());
            status.render(frame, outer[0]);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(40)])
                .split(outer[1]);

            draw_sidebar(frame, columns[0], session, logo, focus);
            draw_main(frame, columns[1], session, view, log, focus, scrolls);
        })?;

        Ok(())
    }

    /// Restore the terminal
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Show the loading screen
    fn draw_loading(&mut self) -> Result<()> {
        let status = &self.status;
        let log = &self.log;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(frame.area());

            status.render(frame, chunks[0]);
            log.render(frame, chunks[1]);
        })?;

        Ok(())
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, session: &Session<'_>, logo: Option<&str>, focus: Focus) {
    let logo_height = logo.map_or(0, |l| l.lines().count() as u16 + 1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(logo_height),
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Creature types
            Constraint::Length(9), // Toggle and keys
        ])
        .split(area);

    if let Some(logo) = logo {
        components::render_logo(frame, chunks[0], logo);
    }
    components::render_search(frame, chunks[1], session.state(), focus);
    components::render_creature_types(
        frame,
        chunks[2],
        session.options(),
        session.selected_index(),
        focus,
    );
    components::render_help(frame, chunks[3], session.state());
}

fn draw_main(
    frame: &mut Frame,
    area: Rect,
    session: &Session<'_>,
    view: &View<'_>,
    log: &LogPanel,
    focus: Focus,
    (results_scroll, sources_scroll): (usize, usize),
) {
    let essence = &session.data().essence;
    let essence_height = (essence.len() as u16 + 3).min(10);
    let has_sources = matches!(view, View::Recipes { sources: Some(_), .. });

    let mut constraints = vec![Constraint::Length(essence_height), Constraint::Min(6)];
    if has_sources {
        constraints.push(Constraint::Percentage(35));
    }
    constraints.push(Constraint::Length(5)); // Activity

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    components::render_sheet(frame, chunks[0], "Essence Table", essence);

    match view {
        View::Cleared => components::render_cleared(frame, chunks[1], RESULTS_CLEARED),
        View::Harvest(section) => components::render_section(
            frame,
            chunks[1],
            section,
            results_scroll,
            focus == Focus::Results,
        ),
        View::Recipes { recipes, sources } => {
            components::render_section(
                frame,
                chunks[1],
                recipes,
                results_scroll,
                focus == Focus::Results,
            );
            if let Some(sources) = sources {
                components::render_section(
                    frame,
                    chunks[2],
                    sources,
                    sources_scroll,
                    focus == Focus::Sources,
                );
            }
        }
    }

    log.render(frame, chunks[chunks.len() - 1]);
}

impl Ui for Browser {
    fn set_phase(&mut self, phase: Phase) {
        self.status.set_phase(phase);
        self.draw_loading().ok();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.status.set_info(info);
        self.draw_loading().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.log.add(message);
        self.draw_loading().ok();
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
