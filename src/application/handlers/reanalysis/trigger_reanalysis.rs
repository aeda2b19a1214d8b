//! ReanalysisTrigger - Command handler for re-running a document's analysis.
//!
//! One trigger instance backs one re-analysis control. Each invocation:
//! 1. Ignores blank document ids
//! 2. Refuses to start while a request is in flight or a refresh is pending
//! 3. Reads the bearer token from the credential store
//! 4. Sends exactly one re-analysis request
//! 5. On success, hands the payload to the completion callback and schedules
//!    a view refresh; on failure, schedules a reset back to `Idle`
//!
//! Failures never surface as `Err`; they become the `Error` status and are
//! reported in the returned [`TriggerOutcome`].
//!
//! The trigger owns its timers. Starting a new attempt, calling
//! [`ReanalysisTrigger::shutdown`], or dropping the trigger aborts whichever
//! timer is pending.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use secrecy::Secret;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::foundation::{DocumentId, StateMachine};
use crate::domain::reanalysis::{ReanalysisError, ReanalysisStatus};
use crate::ports::{is_empty_payload, KeyValueStore, ReanalysisApi, ViewRefresher};

/// Called once with the new result payload after a successful re-analysis.
pub type CompletionCallback = Box<dyn FnOnce(&Value) + Send>;

/// Timing and credential settings for the trigger.
#[derive(Debug, Clone)]
pub struct ReanalysisTriggerConfig {
    /// Key the bearer token is stored under.
    pub auth_token_key: String,

    /// Delay between a successful re-analysis and the view refresh.
    ///
    /// Default: 2 seconds
    pub success_refresh_delay: Duration,

    /// Delay before an `Error` status returns to `Idle`.
    ///
    /// Default: 5 seconds
    pub error_reset_delay: Duration,
}

impl Default for ReanalysisTriggerConfig {
    fn default() -> Self {
        Self {
            auth_token_key: "auth_token".to_string(),
            success_refresh_delay: Duration::from_millis(2000),
            error_reset_delay: Duration::from_millis(5000),
        }
    }
}

impl ReanalysisTriggerConfig {
    pub fn with_auth_token_key(mut self, key: impl Into<String>) -> Self {
        self.auth_token_key = key.into();
        self
    }

    pub fn with_success_refresh_delay(mut self, delay: Duration) -> Self {
        self.success_refresh_delay = delay;
        self
    }

    pub fn with_error_reset_delay(mut self, delay: Duration) -> Self {
        self.error_reset_delay = delay;
        self
    }
}

/// Command to re-run analysis for a document.
///
/// The id is taken raw; a blank id makes the command a no-op.
#[derive(Debug, Clone)]
pub struct TriggerReanalysisCommand {
    pub document_id: String,
}

impl TriggerReanalysisCommand {
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
        }
    }
}

/// What a trigger invocation did.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// Blank document id; nothing happened.
    Skipped,

    /// The control was disabled (request in flight or refresh pending).
    Busy,

    /// The service returned this payload.
    Completed(Value),

    /// The attempt failed; the status is now `Error`.
    Failed(ReanalysisError),
}

impl TriggerOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TriggerOutcome::Completed(_))
    }
}

/// Handler behind one re-analysis control.
pub struct ReanalysisTrigger {
    api: Arc<dyn ReanalysisApi>,
    credentials: Arc<dyn KeyValueStore>,
    refresher: Arc<dyn ViewRefresher>,
    config: ReanalysisTriggerConfig,
    status: Arc<watch::Sender<ReanalysisStatus>>,
    pending_timer: Mutex<Option<JoinHandle<()>>>,
}

impl ReanalysisTrigger {
    /// Creates a trigger with default timings.
    pub fn new(
        api: Arc<dyn ReanalysisApi>,
        credentials: Arc<dyn KeyValueStore>,
        refresher: Arc<dyn ViewRefresher>,
    ) -> Self {
        Self::with_config(api, credentials, refresher, ReanalysisTriggerConfig::default())
    }

    /// Creates a trigger with custom configuration.
    pub fn with_config(
        api: Arc<dyn ReanalysisApi>,
        credentials: Arc<dyn KeyValueStore>,
        refresher: Arc<dyn ViewRefresher>,
        config: ReanalysisTriggerConfig,
    ) -> Self {
        let (status, _) = watch::channel(ReanalysisStatus::Idle);
        Self {
            api,
            credentials,
            refresher,
            config,
            status: Arc::new(status),
            pending_timer: Mutex::new(None),
        }
    }

    /// Current status.
    pub fn status(&self) -> ReanalysisStatus {
        *self.status.borrow()
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<ReanalysisStatus> {
        self.status.subscribe()
    }

    /// Whether the control accepts a trigger right now.
    pub fn is_interactive(&self) -> bool {
        self.status().accepts_trigger()
    }

    /// Runs one re-analysis attempt.
    pub async fn trigger(
        &self,
        cmd: TriggerReanalysisCommand,
        on_complete: Option<CompletionCallback>,
    ) -> TriggerOutcome {
        let document_id = match DocumentId::new(cmd.document_id) {
            Ok(id) => id,
            Err(_) => {
                debug!("Re-analysis skipped: no document id");
                return TriggerOutcome::Skipped;
            }
        };

        // Check-and-set in one step so two callers cannot both start.
        let started = self.status.send_if_modified(|status| {
            if status.accepts_trigger() {
                *status = ReanalysisStatus::InProgress;
                true
            } else {
                false
            }
        });
        if !started {
            debug!(document_id = %document_id, status = %self.status(), "Re-analysis control is busy");
            return TriggerOutcome::Busy;
        }

        self.cancel_pending_timer();

        let attempt_id = Uuid::new_v4();
        info!(document_id = %document_id, attempt_id = %attempt_id, "Re-analysis started");

        match self.request(&document_id).await {
            Ok(payload) => {
                self.transition(ReanalysisStatus::Success);
                info!(document_id = %document_id, attempt_id = %attempt_id, "Re-analysis completed");

                if let Some(callback) = on_complete {
                    callback(&payload);
                }
                self.schedule_refresh(document_id);

                TriggerOutcome::Completed(payload)
            }
            Err(error) => {
                self.transition(ReanalysisStatus::Error);
                warn!(
                    document_id = %document_id,
                    attempt_id = %attempt_id,
                    error = %error,
                    "Re-analysis failed"
                );
                self.schedule_reset();

                TriggerOutcome::Failed(error)
            }
        }
    }

    /// Aborts any pending refresh or reset timer.
    pub fn shutdown(&self) {
        self.cancel_pending_timer();
    }

    async fn request(&self, document_id: &DocumentId) -> Result<Value, ReanalysisError> {
        let token = self.read_token().await?;

        let payload = self
            .api
            .reanalyze(document_id, &token)
            .await
            .map_err(ReanalysisError::request_failed)?;

        if is_empty_payload(&payload) {
            return Err(ReanalysisError::request_failed("Response carried no payload"));
        }
        Ok(payload)
    }

    async fn read_token(&self) -> Result<Secret<String>, ReanalysisError> {
        match self.credentials.get(&self.config.auth_token_key).await {
            Ok(Some(token)) if !token.is_empty() => Ok(Secret::new(token)),
            Ok(_) => Err(ReanalysisError::AuthenticationRequired),
            Err(e) => {
                warn!(error = %e, "Credential store unreadable");
                Err(ReanalysisError::AuthenticationRequired)
            }
        }
    }

    fn transition(&self, target: ReanalysisStatus) {
        transition_status(&self.status, |_| true, target);
    }

    fn schedule_refresh(&self, document_id: DocumentId) {
        let status = self.status.clone();
        let refresher = self.refresher.clone();
        let delay = self.config.success_refresh_delay;

        self.schedule(async move {
            tokio::time::sleep(delay).await;

            if let Err(e) = refresher.refresh(&document_id).await {
                warn!(document_id = %document_id, error = %e, "View refresh failed");
            }
            transition_status(
                &status,
                |s| s == ReanalysisStatus::Success,
                ReanalysisStatus::Idle,
            );
        });
    }

    fn schedule_reset(&self) {
        let status = self.status.clone();
        let delay = self.config.error_reset_delay;

        self.schedule(async move {
            tokio::time::sleep(delay).await;
            transition_status(
                &status,
                |s| s == ReanalysisStatus::Error,
                ReanalysisStatus::Idle,
            );
        });
    }

    fn schedule<F>(&self, timer: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(timer);
        let previous = self
            .pending_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_pending_timer(&self) {
        let pending = self
            .pending_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

impl Drop for ReanalysisTrigger {
    fn drop(&mut self) {
        self.cancel_pending_timer();
    }
}

/// Moves the status to `target` if `guard` holds and the move is legal.
fn transition_status(
    status: &watch::Sender<ReanalysisStatus>,
    guard: impl Fn(ReanalysisStatus) -> bool,
    target: ReanalysisStatus,
) {
    status.send_if_modified(|current| {
        if !guard(*current) {
            return false;
        }
        match current.transition_to(target) {
            Ok(next) => {
                *current = next;
                true
            }
            Err(e) => {
                warn!(error = %e, "Ignored re-analysis status change");
                false
            }
        }
    });
}
