// ── Poll coordinator ──
//
// Owns the published player state. Polls the backend on a fixed
// interval, flattens each status into a `PlayerState`, and publishes it
// by replacement. Actions are routed to the backend without touching the
// poll lock.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use panactl_api::PlayerClient;

use crate::action::{Action, ActionResult, MAX_REPEATS, SentCommand};
use crate::backend::PlayerBackend;
use crate::config::DeviceConfig;
use crate::error::CoreError;
use crate::state::PlayerState;
use crate::stream::StateStream;

// ── Availability ─────────────────────────────────────────────────

/// Whether the last poll cycle produced a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// The last cycle read a full status.
    Available,
    /// No cycle has succeeded yet, or the last one returned no status or
    /// failed outright.
    Degraded,
}

// ── Coordinator ──────────────────────────────────────────────────

/// Polling coordinator for one player.
///
/// Cheaply cloneable via `Arc`. Cycles are serialized: a manual
/// [`refresh`](Self::refresh) and the background tick never overlap.
pub struct Coordinator<B: PlayerBackend = PlayerClient> {
    inner: Arc<CoordinatorInner<B>>,
}

impl<B: PlayerBackend> Clone for Coordinator<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct CoordinatorInner<B> {
    backend: B,
    name: String,
    scan_interval: Duration,
    state: watch::Sender<Arc<PlayerState>>,
    availability: watch::Sender<Availability>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
    cycle: Mutex<()>,
    cancel: CancellationToken,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Coordinator<PlayerClient> {
    /// Validate `config` and build a coordinator around a real client.
    pub fn from_config(config: &DeviceConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let client = PlayerClient::new(&config.host, &config.transport())?;
        Ok(Self::new(client, config.name.clone(), config.scan_interval))
    }
}

impl<B: PlayerBackend> Coordinator<B> {
    /// Create a coordinator. Does NOT poll: call [`start`](Self::start)
    /// or [`refresh`](Self::refresh).
    pub fn new(backend: B, name: impl Into<String>, scan_interval: Duration) -> Self {
        let (state, _) = watch::channel(Arc::new(PlayerState::unknown()));
        let (availability, _) = watch::channel(Availability::Degraded);
        let (last_refresh, _) = watch::channel(None);

        Self {
            inner: Arc::new(CoordinatorInner {
                backend,
                name: name.into(),
                scan_interval,
                state,
                availability,
                last_refresh,
                cycle: Mutex::new(()),
                cancel: CancellationToken::new(),
                task_handle: Mutex::new(None),
            }),
        }
    }

    /// Display name of the player.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The backend this coordinator drives.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// The poll interval.
    pub fn scan_interval(&self) -> Duration {
        self.inner.scan_interval
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Run the first cycle, then spawn the periodic poll task.
    ///
    /// A failing first cycle is returned and no task is spawned. Calling
    /// `start` on a running coordinator only refreshes.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.refresh().await?;

        let mut handle = self.inner.task_handle.lock().await;
        if handle.is_none() && !self.inner.cancel.is_cancelled() {
            let coordinator = self.clone();
            let cancel = self.inner.cancel.clone();
            let interval = self.inner.scan_interval;
            *handle = Some(tokio::spawn(refresh_task(coordinator, interval, cancel)));
            info!(interval_secs = interval.as_secs(), "polling started");
        }
        Ok(())
    }

    /// Cancel the poll task and wait for it to finish. The coordinator
    /// cannot be restarted afterwards.
    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.task_handle.lock().await.take() {
            let _ = handle.await;
        }
        info!("polling stopped");
    }

    // ── Poll cycle ───────────────────────────────────────────────

    /// Run one poll cycle and return the state it published.
    ///
    /// An absent status publishes the unknown sentinel. A failing backend
    /// publishes nothing and leaves the previous state in place.
    pub async fn refresh(&self) -> Result<Arc<PlayerState>, CoreError> {
        let _cycle = self.inner.cycle.lock().await;
        let now = Utc::now();

        let result = self.inner.backend.fetch_status().await;
        self.inner.last_refresh.send_replace(Some(now));

        match result {
            Ok(Some(status)) => {
                let state = Arc::new(PlayerState::from_status(&status, now));
                self.publish(Arc::clone(&state), Availability::Available);
                debug!(
                    state = ?state.state,
                    device_mode = %status.device_mode,
                    position = status.position_seconds,
                    "status refreshed"
                );
                Ok(state)
            }
            Ok(None) => {
                let state = Arc::new(PlayerState::unknown());
                self.publish(Arc::clone(&state), Availability::Degraded);
                debug!("status unavailable, published unknown state");
                Ok(state)
            }
            Err(e) => {
                self.inner.availability.send_replace(Availability::Degraded);
                debug!(error = %e, "poll cycle failed");
                Err(CoreError::UpdateFailed {
                    message: e.to_string(),
                })
            }
        }
    }

    fn publish(&self, state: Arc<PlayerState>, availability: Availability) {
        self.inner.state.send_replace(state);
        self.inner.availability.send_replace(availability);
    }

    // ── Actions ──────────────────────────────────────────────────

    /// Execute an action against the player.
    ///
    /// `PowerOff` is skipped when the published state is already off;
    /// `PowerOn` is skipped when the published state is known and not
    /// off. Rejected commands are reported in the result, not as errors.
    pub async fn execute(&self, action: Action) -> Result<ActionResult, CoreError> {
        let current = self.state();

        match &action {
            Action::PowerOff if current.is_off() == Some(true) => {
                return Ok(skipped("player is already in standby"));
            }
            Action::PowerOn if current.is_off() == Some(false) => {
                return Ok(skipped("player is already on"));
            }
            Action::Send {
                commands,
                repeats,
                delay,
            } => return self.send_sequence(commands, *repeats, *delay).await,
            _ => {}
        }

        let command = action.command().ok_or_else(|| {
            CoreError::Internal(format!("action {action:?} has no command"))
        })?;
        let outcome = self.inner.backend.send_command(command).await;
        debug!(?action, command, success = outcome.success, "action executed");

        Ok(ActionResult::Sent {
            command: command.to_owned(),
            outcome,
        })
    }

    async fn send_sequence(
        &self,
        commands: &[String],
        repeats: usize,
        delay: Duration,
    ) -> Result<ActionResult, CoreError> {
        if commands.is_empty() {
            return Err(CoreError::Validation {
                message: "at least one command is required".into(),
            });
        }
        if !(1..=MAX_REPEATS).contains(&repeats) {
            return Err(CoreError::Validation {
                message: format!(
                    "repeat count must be between 1 and {MAX_REPEATS}, got {repeats}"
                ),
            });
        }

        let outcomes = self
            .inner
            .backend
            .send_commands(commands, repeats, delay)
            .await
            .into_iter()
            .map(|(command, outcome)| {
                debug!(
                    command = %command,
                    success = outcome.success,
                    code = outcome.response_code.as_deref().unwrap_or("-"),
                    "send_command"
                );
                SentCommand { command, outcome }
            })
            .collect();

        Ok(ActionResult::Sequence { outcomes })
    }

    // ── State observation ────────────────────────────────────────

    /// The latest published state.
    pub fn state(&self) -> Arc<PlayerState> {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to published state.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Current availability.
    pub fn availability(&self) -> Availability {
        *self.inner.availability.borrow()
    }

    /// Subscribe to availability changes.
    pub fn availability_changes(&self) -> watch::Receiver<Availability> {
        self.inner.availability.subscribe()
    }

    /// Whether the last cycle produced a status.
    pub fn last_update_success(&self) -> bool {
        self.availability() == Availability::Available
    }

    /// When the last cycle ran, whatever its outcome.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.inner.last_refresh.borrow()
    }
}

fn skipped(reason: &str) -> ActionResult {
    ActionResult::Skipped {
        reason: reason.to_owned(),
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Poll the player every `interval` until cancelled.
async fn refresh_task<B: PlayerBackend>(
    coordinator: Coordinator<B>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = coordinator.refresh().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}
