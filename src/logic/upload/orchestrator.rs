//! Upload Orchestrator
//!
//! Turns a staged local file into one classification request, reports progress,
//! maps failures to user-facing messages and hands the parsed result to the
//! Results Store.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::session::{LocalFile, UploadPhase, UploadSession, UploadTiming};
use crate::error::{DashboardError, DashboardResult};
use crate::logic::events::{DashboardEvent, EventBus};
use crate::logic::models::ModelCatalog;
use crate::logic::results::{AnalysisResult, ResultsStore, ResultsWriter};
use crate::logic::service::{ClassifierClient, UploadResponse};

#[derive(Debug)]
struct SessionState {
    phase: UploadPhase,
    staged: Option<LocalFile>,
    model: String,
    progress: u8,
    message: Option<String>,
}

pub struct UploadOrchestrator {
    client: ClassifierClient,
    writer: ResultsWriter,
    catalog: ModelCatalog,
    events: EventBus,
    timing: UploadTiming,
    state: Mutex<SessionState>,
}

impl UploadOrchestrator {
    pub fn new(
        client: ClassifierClient,
        writer: ResultsWriter,
        catalog: ModelCatalog,
        events: EventBus,
        timing: UploadTiming,
    ) -> Self {
        let model = catalog.default_model();
        Self {
            client,
            writer,
            catalog,
            events,
            timing,
            state: Mutex::new(SessionState {
                phase: UploadPhase::Idle,
                staged: None,
                model,
                progress: 0,
                message: None,
            }),
        }
    }

    pub fn store(&self) -> ResultsStore {
        self.writer.reader()
    }

    pub fn session(&self) -> UploadSession {
        let s = self.state.lock();
        UploadSession {
            phase: s.phase,
            file_name: s.staged.as_ref().map(|f| f.name().to_string()),
            file_size: s.staged.as_ref().map(|f| f.size()),
            selected_model: s.model.clone(),
            progress_percent: s.progress,
            message: s.message.clone(),
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.state.lock().phase
    }

    // ========================================================================
    // SELECTION
    // ========================================================================

    /// Stage a file. A valid file replaces any previous selection; an invalid
    /// one leaves nothing staged.
    pub fn select_file(&self, file: LocalFile) -> DashboardResult<()> {
        let store = self.store();
        let mut s = self.state.lock();
        if s.phase == UploadPhase::Uploading {
            return Err(DashboardError::Busy);
        }

        self.set_phase(&mut s, UploadPhase::Validating);

        if !file.is_csv() {
            log::warn!("Rejected file '{}' (mime: {:?})", file.name(), file.declared_mime());
            let err = DashboardError::invalid_file();
            s.staged = None;
            s.progress = 0;
            s.message = Some(err.user_message());
            self.set_phase(&mut s, UploadPhase::Invalid);
            store.set_error(err.user_message());
            return Err(err);
        }

        log::debug!("Staged '{}' ({} bytes)", file.name(), file.size());
        s.staged = Some(file);
        s.progress = 0;
        s.message = None;
        self.set_phase(&mut s, UploadPhase::Ready);
        store.clear_error();
        Ok(())
    }

    /// Drop the staged file
    pub fn clear_file(&self) -> DashboardResult<()> {
        let mut s = self.state.lock();
        if s.phase == UploadPhase::Uploading {
            return Err(DashboardError::Busy);
        }
        s.staged = None;
        s.progress = 0;
        s.message = None;
        self.set_phase(&mut s, UploadPhase::Idle);
        Ok(())
    }

    pub fn select_model(&self, name: &str) -> DashboardResult<()> {
        let model = self.catalog.validate(name)?;
        let mut s = self.state.lock();
        if s.phase == UploadPhase::Uploading {
            return Err(DashboardError::Busy);
        }
        s.model = model;
        Ok(())
    }

    // ========================================================================
    // UPLOAD
    // ========================================================================

    /// Issue exactly one request for the staged file.
    ///
    /// On success progress is forced to 100, held for the grace period, the
    /// result is written to the store and the session resets to `Idle`.
    /// On failure progress drops to 0 and the phase becomes `Failed`; the file
    /// stays staged so the analyst can re-trigger.
    pub async fn start(&self) -> DashboardResult<Arc<AnalysisResult>> {
        let store = self.store();

        let (file, model) = match self.begin() {
            Ok(staged) => staged,
            Err(DashboardError::Busy) => {
                log::debug!("Start ignored, an upload is already running");
                return Err(DashboardError::Busy);
            }
            Err(err) => {
                log::warn!("Upload not started: {}", err);
                store.set_error(err.user_message());
                return Err(err);
            }
        };

        let mut guard = InFlight::arm(self);
        self.writer.set_loading(true);
        store.clear_error();
        log::info!("Uploading '{}' ({} bytes) with model '{}'", file.name(), file.size(), model);

        match self.send(&file, &model).await {
            Ok(response) => {
                self.set_progress(100);
                let result = AnalysisResult::from_response(response, &model);
                log::info!(
                    "Analysis complete: {} rows ({} benign, {} attack, {} anomalous)",
                    result.total_rows(), result.benign_count(),
                    result.attack_count(), result.anomaly_count()
                );

                tokio::time::sleep(self.timing.success_grace).await;

                {
                    let mut s = self.state.lock();
                    self.set_phase(&mut s, UploadPhase::Succeeded);
                }
                let stored = self.writer.replace(result);

                {
                    let mut s = self.state.lock();
                    s.staged = None;
                    s.progress = 0;
                    self.set_phase(&mut s, UploadPhase::Idle);
                }
                guard.disarm();
                Ok(stored)
            }
            Err(err) => {
                log::error!("Upload of '{}' failed: {}", file.name(), err);
                let message = err.user_message();
                {
                    let mut s = self.state.lock();
                    s.progress = 0;
                    s.message = Some(message.clone());
                    self.events.emit(DashboardEvent::UploadProgress { percent: 0 });
                    self.set_phase(&mut s, UploadPhase::Failed);
                }
                self.writer.set_loading(false);
                guard.disarm();
                store.set_error(message);
                Err(err)
            }
        }
    }

    /// `Ready | Failed → Uploading` under the session lock
    fn begin(&self) -> DashboardResult<(LocalFile, String)> {
        let mut s = self.state.lock();
        if s.phase == UploadPhase::Uploading {
            return Err(DashboardError::Busy);
        }
        if !s.phase.can_start() {
            return Err(DashboardError::NotReady);
        }
        let file = s.staged.clone().ok_or(DashboardError::NotReady)?;
        self.resolve_model(&mut s);
        let model = self.catalog.validate(&s.model)?;

        s.progress = 0;
        s.message = None;
        self.set_phase(&mut s, UploadPhase::Uploading);
        self.events.emit(DashboardEvent::UploadProgress { percent: 0 });
        Ok((file, model))
    }

    /// Re-seed the selection with the catalog default once the chosen model
    /// is no longer listed
    pub fn sync_model(&self) {
        let mut s = self.state.lock();
        if s.phase != UploadPhase::Uploading {
            self.resolve_model(&mut s);
        }
    }

    fn resolve_model(&self, s: &mut SessionState) {
        if !self.catalog.contains(&s.model) {
            let fallback = self.catalog.default_model();
            log::info!("Model '{}' no longer offered, selecting '{}'", s.model, fallback);
            s.model = fallback;
        }
    }

    /// Cleanup for a `start` future dropped while uploading
    fn abandon(&self) {
        {
            let mut s = self.state.lock();
            if s.phase != UploadPhase::Uploading {
                return;
            }
            log::warn!("Upload abandoned before completion");
            s.progress = 0;
            s.message = Some(crate::error::UPLOAD_FAILED_MESSAGE.to_string());
            self.events.emit(DashboardEvent::UploadProgress { percent: 0 });
            self.set_phase(&mut s, UploadPhase::Failed);
        }
        self.writer.set_loading(false);
    }

    /// Await the request while the progress ticker runs. The ticker is owned by
    /// this future, so it stops on every exit path.
    async fn send(&self, file: &LocalFile, model: &str) -> DashboardResult<UploadResponse> {
        let content = file
            .read()
            .await
            .map_err(|e| DashboardError::Transport(format!("cannot read '{}': {}", file.name(), e)))?;

        let request = self.client.upload(file.name(), content, model);
        tokio::pin!(request);

        let mut ticker = interval_at(Instant::now() + self.timing.tick, self.timing.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                outcome = &mut request => return outcome.map_err(DashboardError::from),
                _ = ticker.tick() => self.advance_progress(),
            }
        }
    }

    /// One simulated step, capped below 100
    fn advance_progress(&self) {
        let mut s = self.state.lock();
        if s.phase != UploadPhase::Uploading {
            return;
        }
        let ceiling = self.timing.ceiling();
        let next = s.progress.saturating_add(self.timing.step).min(ceiling);
        if next > s.progress {
            s.progress = next;
            self.events.emit(DashboardEvent::UploadProgress { percent: next });
        }
    }

    fn set_progress(&self, percent: u8) {
        let mut s = self.state.lock();
        let percent = percent.min(100).max(s.progress);
        s.progress = percent;
        self.events.emit(DashboardEvent::UploadProgress { percent });
    }

    fn set_phase(&self, s: &mut SessionState, phase: UploadPhase) {
        s.phase = phase;
        self.events.emit(DashboardEvent::UploadPhase { phase });
    }
}

/// Armed while a request is in flight. Dropping it armed means the `start`
/// future went away mid-upload; the session then falls back to `Failed`.
struct InFlight<'a> {
    orchestrator: &'a UploadOrchestrator,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn arm(orchestrator: &'a UploadOrchestrator) -> Self {
        Self { orchestrator, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.orchestrator.abandon();
        }
    }
}
