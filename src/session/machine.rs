//! # Analysis Session
//!
//! Per-session request lifecycle: `Idle -> Pending -> Succeeded | Failed`.
//!
//! Every dispatch takes a generation number when it starts. When it
//! resolves, its outcome is applied only if no newer dispatch has started
//! since; otherwise it is discarded. Concurrent dispatches therefore settle
//! on the newest request, not the slowest one.
//!
//! The session never writes history. Callers feed successful results into
//! the history cache themselves.

use parking_lot::Mutex;
use std::future::Future;

use super::events::{EventBus, SessionEvent, SessionEventHandler, SimpleEventBus};
use super::state::{RequestStatus, RequestTiming, SessionError, SessionSnapshot};
use crate::analysis::{AnalysisError, AnalysisRequest, AnalysisResult, Dispatcher};

/// Proof that a dispatch was started, used to resolve it later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a started dispatch must be resolved"]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct SessionState {
    status: RequestStatus,
    result: Option<AnalysisResult>,
    error: Option<SessionError>,
    generation: u64,
    timing: RequestTiming,
}

/// One logical analysis session bound to an explicitly supplied dispatcher
#[derive(Debug)]
pub struct AnalysisSession {
    dispatcher: Dispatcher,
    state: Mutex<SessionState>,
    events: SimpleEventBus,
}

impl AnalysisSession {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            state: Mutex::new(SessionState::default()),
            events: SimpleEventBus::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Register an observer for state transitions
    pub fn subscribe(&self, handler: SessionEventHandler) {
        self.events.subscribe(handler);
    }

    /// Enter `Pending` for a new dispatch, superseding any in flight
    pub fn begin(&self) -> RequestTicket {
        let generation = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.status = RequestStatus::Pending;
            state.error = None;
            state.timing.start();
            state.generation
        };

        tracing::debug!("Session dispatch {generation} pending");
        self.events.publish(&SessionEvent::Started { generation });
        RequestTicket { generation }
    }

    /// Apply the outcome of a dispatch.
    ///
    /// Returns the result when it was applied and successful. Outcomes of
    /// superseded dispatches are dropped and leave the state untouched.
    pub fn resolve(
        &self,
        ticket: RequestTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Option<AnalysisResult> {
        let generation = ticket.generation;
        let mut state = self.state.lock();

        if generation != state.generation {
            let current = state.generation;
            drop(state);
            tracing::warn!("Discarding stale dispatch {generation} (current is {current})");
            self.events
                .publish(&SessionEvent::Discarded { generation, current });
            return None;
        }

        state.timing.finish();
        match outcome {
            Ok(result) => {
                state.status = RequestStatus::Succeeded;
                state.result = Some(result.clone());
                state.error = None;
                drop(state);

                tracing::debug!("Session dispatch {generation} succeeded");
                self.events.publish(&SessionEvent::Succeeded {
                    generation,
                    result: Box::new(result.clone()),
                });
                Some(result)
            }
            Err(error) => {
                let error = SessionError::from(&error);
                state.status = RequestStatus::Failed;
                state.error = Some(error.clone());
                drop(state);

                tracing::error!("Analysis failed [{}]: {}", error.kind, error.message);
                self.events.publish(&SessionEvent::Failed {
                    generation,
                    kind: error.kind,
                    message: error.message,
                });
                None
            }
        }
    }

    /// Dispatch a request through this session.
    ///
    /// The session is `Pending` as soon as this returns, before the future
    /// is first polled. The future never fails: errors are stored on the
    /// session. It yields the result only if this dispatch was still the
    /// current one when it succeeded.
    pub fn analyze<'a>(
        &'a self,
        request: &'a AnalysisRequest,
    ) -> impl Future<Output = Option<AnalysisResult>> + 'a {
        let ticket = self.begin();
        async move {
            let outcome = self.dispatcher.analyze(request).await;
            self.resolve(ticket, outcome)
        }
    }

    /// Return to `Idle`, superseding any dispatch still in flight
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let generation = state.generation + 1;
        *state = SessionState {
            generation,
            ..SessionState::default()
        };
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            status: state.status,
            result: state.result.clone(),
            error: state.error.clone(),
            generation: state.generation,
            duration_ms: state.timing.duration_ms(),
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.state.lock().status
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_loading()
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.state.lock().result.clone()
    }

    pub fn error(&self) -> Option<SessionError> {
        self.state.lock().error.clone()
    }
}
