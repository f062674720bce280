//! Notifications published by the entry panel.

use std::fmt;

use crate::domain::Entry;

/// One message on the notification bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A different entry became the selection
    SelectionChanged(Entry),
    /// Human readable status line
    StatusText(String),
    /// Dependent views should show this entry
    DataLoaded(Entry),
    /// Dependent views should clear, the shown entry is gone
    DisableView,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectionChanged(_) => "selection-changed",
            Event::StatusText(_) => "status-text",
            Event::DataLoaded(_) => "data-loaded",
            Event::DisableView => "disable-view",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SelectionChanged(entry) | Event::DataLoaded(entry) => {
                write!(f, "{}({})", self.name(), entry)
            }
            Event::StatusText(text) => write!(f, "{}({})", self.name(), text),
            Event::DisableView => write!(f, "{}()", self.name()),
        }
    }
}
