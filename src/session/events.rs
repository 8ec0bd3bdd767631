//! # Session Events
//!
//! Notifications published on every state transition so presentation code
//! can re-render without polling the session.

use parking_lot::RwLock;

use crate::analysis::AnalysisResult;
use crate::gateway::ErrorKind;

/// Events emitted when a session changes state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A dispatch entered `Pending`
    Started { generation: u64 },

    /// The current dispatch succeeded
    Succeeded {
        generation: u64,
        result: Box<AnalysisResult>,
    },

    /// The current dispatch failed
    Failed {
        generation: u64,
        kind: ErrorKind,
        message: String,
    },

    /// A dispatch resolved after a newer one started; its outcome was dropped
    Discarded { generation: u64, current: u64 },
}

impl SessionEvent {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Started { generation }
            | Self::Succeeded { generation, .. }
            | Self::Failed { generation, .. }
            | Self::Discarded { generation, .. } => *generation,
        }
    }
}

/// Type alias for session event handlers
pub type SessionEventHandler = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Event bus for decoupled communication between a session and its observers
pub trait EventBus: Send + Sync {
    fn publish(&self, event: &SessionEvent);

    fn subscribe(&self, handler: SessionEventHandler);
}

/// Simple in-memory event bus implementation
#[derive(Default)]
pub struct SimpleEventBus {
    handlers: RwLock<Vec<SessionEventHandler>>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl EventBus for SimpleEventBus {
    fn publish(&self, event: &SessionEvent) {
        for handler in self.handlers.read().iter() {
            handler(event);
        }
    }

    fn subscribe(&self, handler: SessionEventHandler) {
        self.handlers.write().push(handler);
    }
}

impl std::fmt::Debug for SimpleEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleEventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
