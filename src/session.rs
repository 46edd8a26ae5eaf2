//! Session state and event dispatch. The presentation layer turns user input
//! into [`Event`]s; each event updates the [`FilterState`] and the next
//! [`Session::render`] recomputes the view.

use thiserror::Error;

use crate::filter::{creature_type_options, evaluate, CreatureFilter, FilterState, SearchMode};
use crate::schema::Dataset;
use crate::view::View;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetSearch(String),
    PushSearchChar(char),
    PopSearchChar,
    SetCreatureType(String),
    SelectNextCreatureType,
    SelectPreviousCreatureType,
    ToggleHarvest,
    SetMode(SearchMode),
    CycleMode,
    /// Restore search text and creature type to their defaults
    Reset,
    /// Show the neutral view for the next render only
    Clear,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown creature type: {0}")]
    UnknownCreatureType(String),
}

pub struct Session<'a> {
    data: &'a Dataset,
    state: FilterState,
    options: Vec<String>,
    clear_pending: bool,
}

impl<'a> Session<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self {
            data,
            state: FilterState::default(),
            options: creature_type_options(&data.recipes),
            clear_pending: false,
        }
    }

    pub fn data(&self) -> &'a Dataset {
        self.data
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Creature type options, `(Any)` first
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Position of the current creature type in [`Session::options`]
    pub fn selected_index(&self) -> usize {
        let label = self.state.creature_type.label();
        self.options.iter().position(|o| o == label).unwrap_or(0)
    }

    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }

    pub fn apply(&mut self, event: Event) -> Result<(), SessionError> {
        tracing::debug!(?event, "apply");

        match event {
            Event::SetSearch(text) => self.state.search_text = text,
            Event::PushSearchChar(c) => self.state.search_text.push(c),
            Event::PopSearchChar => {
                self.state.search_text.pop();
            }
            Event::SetCreatureType(value) => {
                if !self.options.contains(&value) {
                    return Err(SessionError::UnknownCreatureType(value));
                }
                self.state.creature_type = CreatureFilter::from(value);
            }
            Event::SelectNextCreatureType => {
                let next = (self.selected_index() + 1).min(self.options.len().saturating_sub(1));
                self.select_option(next);
            }
            Event::SelectPreviousCreatureType => {
                let prev = self.selected_index().saturating_sub(1);
                self.select_option(prev);
            }
            Event::ToggleHarvest => self.state.show_harvest = !self.state.show_harvest,
            Event::SetMode(mode) => self.state.mode = mode,
            Event::CycleMode => self.state.mode = self.state.mode.next(),
            Event::Reset => {
                // Harvest toggle and search mode survive a reset
                self.state.search_text.clear();
                self.state.creature_type = CreatureFilter::Any;
            }
            Event::Clear => self.clear_pending = true,
        }

        Ok(())
    }

    fn select_option(&mut self, index: usize) {
        if let Some(value) = self.options.get(index) {
            self.state.creature_type = CreatureFilter::from(value.clone());
        }
    }

    /// Compute the view for this render, consuming a pending clear
    pub fn render(&mut self) -> View<'a> {
        if std::mem::take(&mut self.clear_pending) {
            return View::Cleared;
        }
        evaluate(self.data, &self.state)
    }
}
