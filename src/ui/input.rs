use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::session::Event;

/// Which widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    CreatureType,
    Results,
    Sources,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::CreatureType,
            Focus::CreatureType => Focus::Results,
            Focus::Results => Focus::Sources,
            Focus::Sources => Focus::Search,
        }
    }
}

/// What a keypress asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Session(Event),
    FocusNext,
    Scroll(i32),
    Quit,
    Ignore,
}

const PAGE: i32 = 10;

pub fn map_key(key: KeyEvent, focus: Focus) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::F(2) => Action::Session(Event::ToggleHarvest),
        KeyCode::F(3) => Action::Session(Event::CycleMode),
        KeyCode::F(5) => Action::Session(Event::Reset),
        KeyCode::F(6) => Action::Session(Event::Clear),
        code => match focus {
            Focus::Search => match code {
                KeyCode::Char(c) => Action::Session(Event::PushSearchChar(c)),
                KeyCode::Backspace => Action::Session(Event::PopSearchChar),
                _ => Action::Ignore,
            },
            Focus::CreatureType => match code {
                KeyCode::Up => Action::Session(Event::SelectPreviousCreatureType),
                KeyCode::Down => Action::Session(Event::SelectNextCreatureType),
                _ => Action::Ignore,
            },
            Focus::Results | Focus::Sources => match code {
                KeyCode::Up => Action::Scroll(-1),
                KeyCode::Down => Action::Scroll(1),
                KeyCode::PageUp => Action::Scroll(-PAGE),
                KeyCode::PageDown => Action::Scroll(PAGE),
                KeyCode::Home => Action::Scroll(i32::MIN),
                _ => Action::Ignore,
            },
        },
    }
}

/// Move a table offset by `delta`, kept within the first `len` rows
pub fn scrolled(offset: usize, delta: i32, len: usize) -> usize {
    let moved = if delta < 0 {
        offset.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        offset.saturating_add(delta as usize)
    };
    moved.min(len.saturating_sub(1))
}
