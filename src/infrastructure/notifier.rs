//! Notifier implementations.

use std::sync::Mutex;

use tracing::debug;

use crate::application::Event;
use crate::infrastructure::traits::Notifier;

/// Notifier that traces and keeps every published event.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Event>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the events published so far.
    pub fn take(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Status texts published so far, without draining.
    pub fn status_texts(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter_map(|event| match event {
                        Event::StatusText(text) => Some(text.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, event: Event) {
        debug!("publish {}", event);
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
