mod keyboard;
mod line_editor;
mod menu;
mod screens;

use crossterm::event::KeyEvent;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub use line_editor::LineEditor;
pub use menu::*;
pub use screens::*;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste, delivered as one event.
    Paste(String),
    Resize { width: u16, height: u16 },
    Tick,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand<T> {
    None,
    Exit(T),
}

/// A full-screen state machine driven by the event loop until it yields an
/// output document.
pub trait Screen: Sized {
    type Output: Serialize;

    fn update(self, event: AppEvent) -> (Self, AppCommand<Self::Output>);

    fn tick_interval(&self) -> Option<Duration> {
        None
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GhostDisplay {
    Animated,
    Static,
    None,
}

impl GhostDisplay {
    pub const ALL: [GhostDisplay; 3] = [Self::Animated, Self::Static, Self::None];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Animated => "animated",
            Self::Static => "static",
            Self::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Animated => "Animated",
            Self::Static => "Static",
            Self::None => "Hidden",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TabTitle {
    Full,
    Project,
}

impl TabTitle {
    pub const ALL: [TabTitle; 2] = [Self::Full, Self::Project];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.token() == token)
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Project => "project",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Project and tool",
            Self::Project => "Project only",
        }
    }
}

/// Steps through `all` from `current`, wrapping at both ends.
pub(crate) fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let Some(index) = all.iter().position(|item| *item == current) else {
        return current;
    };
    let next = if forward {
        (index + 1) % all.len()
    } else {
        (index + all.len() - 1) % all.len()
    };
    all[next]
}
