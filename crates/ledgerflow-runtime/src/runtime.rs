//! The public workflow runtime.
//!
//! One instance per mode. The runtime owns the observable state, rejects
//! concurrent starts, and guarantees that `reset()` takes effect
//! immediately: in-flight drivers belong to a generation, and a driver
//! whose generation is stale can no longer mutate anything.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ledgerflow_config::{Mode, ModeDef, StartParams};
use ledgerflow_workflow::{RunContext, WorkflowState, summary};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::driver::RunDriver;
use crate::error::RuntimeError;
use crate::notify::{NoopNotifier, RunEvent, RunNotifier};
use crate::reducer::{self, Action};

/// How long a clipboard acknowledgement stays visible.
const COPY_ACK_MS: u64 = 2000;

pub(crate) struct Shared {
  pub state: WorkflowState,
  /// Bumped on every start and reset; stale drivers see a mismatch and stop.
  pub generation: u64,
  /// Cancellation for the current run's delays.
  pub cancel: CancellationToken,
}

/// Handle to a started run.
///
/// Starting is fire-and-forget - callers observe progress through
/// `snapshot`/`subscribe` - but `settled()` can be awaited when the caller
/// wants the terminal result.
pub struct RunHandle {
  run_id: String,
  join: JoinHandle<Result<(), RuntimeError>>,
}

impl RunHandle {
  pub fn run_id(&self) -> &str {
    &self.run_id
  }

  /// Wait for the run to settle, fail, or be cancelled.
  pub async fn settled(self) -> Result<(), RuntimeError> {
    match self.join.await {
      Ok(result) => result,
      Err(e) if e.is_cancelled() => Err(RuntimeError::Cancelled),
      Err(e) => Err(RuntimeError::DriverFailed {
        message: e.to_string(),
      }),
    }
  }
}

/// The workflow runtime for one sharing mode.
///
/// Generic over `N: RunNotifier` to allow different notification strategies.
/// Use `WorkflowRuntime::new()` for a runtime with no-op notifications, or
/// `WorkflowRuntime::with_notifier()` to observe run events.
pub struct WorkflowRuntime<N: RunNotifier = NoopNotifier> {
  def: ModeDef,
  notifier: Arc<N>,
  shared: Arc<Mutex<Shared>>,
  watch_tx: watch::Sender<WorkflowState>,
  // Kept so the watch channel stays open with no external subscribers.
  _watch_rx: watch::Receiver<WorkflowState>,
  copy_seq: Arc<AtomicU64>,
}

impl WorkflowRuntime<NoopNotifier> {
  /// Create a runtime with no-op notifications.
  pub fn new(mode: Mode) -> Self {
    Self::with_notifier(mode, NoopNotifier)
  }
}

impl<N: RunNotifier + 'static> WorkflowRuntime<N> {
  /// Create a runtime with a custom notifier.
  pub fn with_notifier(mode: Mode, notifier: N) -> Self {
    let (watch_tx, watch_rx) = watch::channel(WorkflowState::idle());
    Self {
      def: ModeDef::for_mode(mode),
      notifier: Arc::new(notifier),
      shared: Arc::new(Mutex::new(Shared {
        state: WorkflowState::idle(),
        generation: 0,
        cancel: CancellationToken::new(),
      })),
      watch_tx,
      _watch_rx: watch_rx,
      copy_seq: Arc::new(AtomicU64::new(0)),
    }
  }

  pub fn mode(&self) -> Mode {
    self.def.mode
  }

  /// Begin a new run.
  ///
  /// Validates parameters, synthesizes the run's identifiers and pending
  /// event list, opens the progress drawer, and spawns the driver. Rejects
  /// the call if a run is already active on this instance.
  pub async fn start(&self, params: StartParams) -> Result<RunHandle, RuntimeError> {
    if params.mode() != self.def.mode {
      return Err(RuntimeError::ModeMismatch {
        expected: self.def.mode,
        got: params.mode(),
      });
    }

    let (identifiers, events) = ledgerflow_chain::prepare_run(&self.def, &params)?;
    let run = RunContext {
      run_id: uuid::Uuid::new_v4().to_string(),
      mode: self.def.mode,
      params,
      identifiers,
    };
    let run_id = run.run_id.clone();

    let (generation, cancel) = {
      let mut shared = self.shared.lock().await;
      if shared.state.is_active {
        return Err(RuntimeError::AlreadyRunning);
      }
      shared.generation += 1;
      shared.cancel = CancellationToken::new();
      reducer::apply(&mut shared.state, Action::RunStarted { run, events })?;
      self.watch_tx.send_replace(shared.state.clone());
      (shared.generation, shared.cancel.clone())
    };

    info!(run_id = %run_id, mode = %self.def.mode, "run_started");
    self.notifier.notify(RunEvent::RunStarted {
      run_id: run_id.clone(),
      mode: self.def.mode,
    });

    let driver = RunDriver {
      def: self.def.clone(),
      run_id: run_id.clone(),
      generation,
      cancel,
      shared: self.shared.clone(),
      watch_tx: self.watch_tx.clone(),
      notifier: self.notifier.clone(),
    };
    let join = tokio::spawn(driver.run());

    Ok(RunHandle { run_id, join })
  }

  /// Discard the current run and return to idle, immediately.
  ///
  /// Cancels the in-flight driver and bumps the generation; no further
  /// mutation from the abandoned run is observable afterwards.
  pub async fn reset(&self) {
    let mut shared = self.shared.lock().await;
    shared.cancel.cancel();
    shared.generation += 1;
    shared.state = WorkflowState::idle();
    self.watch_tx.send_replace(shared.state.clone());
    info!(mode = %self.def.mode, "runtime reset to idle");
  }

  /// A read-only copy of the current state.
  pub fn snapshot(&self) -> WorkflowState {
    self.watch_tx.borrow().clone()
  }

  /// Subscribe to state changes. Every mutation publishes a fresh snapshot.
  pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
    self.watch_tx.subscribe()
  }

  /// The mode-specific summary document as pretty JSON.
  ///
  /// Empty until a run has produced its identifiers.
  pub fn summary_json(&self) -> String {
    let state = self.snapshot();
    summary(&state)
      .and_then(|doc| serde_json::to_string_pretty(&doc).ok())
      .unwrap_or_default()
  }

  /// Route `text` to the clipboard (via the notifier) and record `tag` for
  /// a transient acknowledgement. Last write wins; the acknowledgement
  /// clears itself after two seconds.
  pub async fn copy_to_clipboard(&self, text: impl Into<String>, tag: impl Into<String>) {
    let text = text.into();
    let tag = tag.into();
    let seq = self.copy_seq.fetch_add(1, Ordering::Relaxed) + 1;

    {
      let mut shared = self.shared.lock().await;
      // Infallible by construction, but keep the reducer as the only writer.
      if reducer::apply(
        &mut shared.state,
        Action::CopyAcknowledged {
          tag: tag.clone(),
          seq,
        },
      )
      .is_ok()
      {
        self.watch_tx.send_replace(shared.state.clone());
      }
    }

    self
      .notifier
      .notify(RunEvent::ClipboardCopy { tag, text });

    let shared = self.shared.clone();
    let watch_tx = self.watch_tx.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(COPY_ACK_MS)).await;
      let mut shared = shared.lock().await;
      // A newer copy (or a reset) makes this a no-op.
      if reducer::apply(&mut shared.state, Action::CopyCleared { seq }).is_ok() {
        watch_tx.send_replace(shared.state.clone());
      }
    });
  }
}
