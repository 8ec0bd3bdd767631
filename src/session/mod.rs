//! # Async Request State Machine
//!
//! Exposes the lifecycle of analysis dispatches to presentation code and
//! guards against out-of-order completion with request generations.

pub mod events;
pub mod machine;
pub mod state;

pub use events::{EventBus, SessionEvent, SessionEventHandler, SimpleEventBus};
pub use machine::{AnalysisSession, RequestTicket};
pub use state::{RequestStatus, RequestTiming, SessionError, SessionSnapshot};
