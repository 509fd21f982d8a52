//! Results Store
//!
//! One slot holding the latest `AnalysisResult`, a loading flag and the error
//! notice. Readers share `ResultsStore` handles; the slot itself can only be
//! overwritten through the single `ResultsWriter`, which the upload orchestrator owns.

use std::sync::Arc;

use parking_lot::RwLock;

use super::stats::Summary;
use super::types::AnalysisResult;
use crate::logic::events::{DashboardEvent, EventBus};
use crate::logic::notify::Notifier;

#[derive(Debug, Default)]
struct StoreState {
    result: Option<Arc<AnalysisResult>>,
    loading: bool,
    generation: u64,
}

/// Read handle (clone freely)
#[derive(Debug, Clone)]
pub struct ResultsStore {
    state: Arc<RwLock<StoreState>>,
    notices: Notifier,
    events: EventBus,
}

/// Write role for the result slot. Deliberately not `Clone`.
#[derive(Debug)]
pub struct ResultsWriter {
    store: ResultsStore,
}

impl ResultsStore {
    /// Create an empty store and its writer
    pub fn new(notices: Notifier, events: EventBus) -> (ResultsStore, ResultsWriter) {
        let store = ResultsStore {
            state: Arc::new(RwLock::new(StoreState::default())),
            notices,
            events,
        };
        let writer = ResultsWriter { store: store.clone() };
        (store, writer)
    }

    /// Current result, taken as a whole
    pub fn current(&self) -> Option<Arc<AnalysisResult>> {
        self.state.read().result.clone()
    }

    pub fn has_results(&self) -> bool {
        self.state.read().result.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Number of times the slot has been overwritten
    pub fn generation(&self) -> u64 {
        self.state.read().generation
    }

    /// Counts of the current result, derived on read
    pub fn summary(&self) -> Option<Summary> {
        self.current().map(|r| Summary::of(&r))
    }

    pub fn notices(&self) -> &Notifier {
        &self.notices
    }

    /// Visible error message, if any
    pub fn error(&self) -> Option<String> {
        self.notices.current_error()
    }

    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Surfacing error: {}", message);
        self.notices.error(message);
    }

    pub fn clear_error(&self) {
        self.notices.clear_error();
    }
}

impl ResultsWriter {
    /// Replace the stored result in one step
    pub fn replace(&self, result: AnalysisResult) -> Arc<AnalysisResult> {
        let session_id = result.session_id();
        let total_rows = result.total_rows();
        let result = Arc::new(result);

        {
            let mut state = self.store.state.write();
            state.result = Some(result.clone());
            state.loading = false;
            state.generation += 1;
        }

        log::info!("Results replaced: session {} ({} rows)", session_id, total_rows);
        self.store.events.emit(DashboardEvent::ResultsReplaced { session_id, total_rows });
        result
    }

    pub fn set_loading(&self, loading: bool) {
        self.store.state.write().loading = loading;
    }

    /// Read handle on the same slot
    pub fn reader(&self) -> ResultsStore {
        self.store.clone()
    }
}
