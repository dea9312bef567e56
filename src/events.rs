//! Event reporting for block assembly
//!
//! The core only ever reports two things: a transaction that was dropped
//! because its hash did not authenticate (`Warning`) and a fatal error that is
//! about to be returned (`Error`). Sinks are fire-and-forget.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLevel {
    Warning,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventLevel::Warning => write!(f, "WARNING"),
            EventLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single reported event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub level: EventLevel,
    pub operation: String,
    pub message: String,
}

pub trait EventSink {
    fn emit(&self, level: EventLevel, operation: &str, message: &str);

    fn warning(&self, operation: &str, message: &str) {
        self.emit(EventLevel::Warning, operation, message);
    }

    fn error(&self, operation: &str, message: &str) {
        self.emit(EventLevel::Error, operation, message);
    }
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, level: EventLevel, operation: &str, message: &str) {
        (**self).emit(level, operation, message)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&self, level: EventLevel, operation: &str, message: &str) {
        (**self).emit(level, operation, message)
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, level: EventLevel, operation: &str, message: &str) {
        (**self).emit(level, operation, message)
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, level: EventLevel, operation: &str, message: &str) {
        match level {
            EventLevel::Warning => tracing::warn!(operation, "{}", message),
            EventLevel::Error => tracing::error!(operation, "{}", message),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn count(&self, level: EventLevel) -> usize {
        self.events.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, level: EventLevel, operation: &str, message: &str) {
        self.events.lock().push(Event {
            level,
            operation: operation.to_string(),
            message: message.to_string(),
        });
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _level: EventLevel, _operation: &str, _message: &str) {}
}

/// Install a `fmt` subscriber at the given level. Later calls are no-ops.
pub fn init_tracing(level: &str) {
    let level = level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
