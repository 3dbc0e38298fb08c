//! The async run driver.
//!
//! Steps the run's events in strict array order: dispatch, randomized delay,
//! complete, optional toast. Exactly one event is ever mid-flight. Every
//! state mutation re-validates the driver's generation under the state lock,
//! so a driver whose run was reset can never mutate observable state again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ledgerflow_config::{EventName, ModeDef};
use ledgerflow_workflow::WorkflowState;
use rand::Rng;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::error::RuntimeError;
use crate::notify::{RunEvent, RunNotifier};
use crate::reducer::{self, Action};
use crate::runtime::Shared;

pub(crate) struct RunDriver<N> {
  pub def: ModeDef,
  pub run_id: String,
  pub generation: u64,
  pub cancel: CancellationToken,
  pub shared: Arc<Mutex<Shared>>,
  pub watch_tx: watch::Sender<WorkflowState>,
  pub notifier: Arc<N>,
}

impl<N: RunNotifier> RunDriver<N> {
  /// Drive the run to settlement (or cancellation/failure).
  #[instrument(
    name = "run_drive",
    skip(self),
    fields(run_id = %self.run_id, mode = %self.def.mode)
  )]
  pub async fn run(self) -> Result<(), RuntimeError> {
    let result = self.drive().await;

    match &result {
      Ok(()) => {
        info!(run_id = %self.run_id, "run_settled");
      }
      Err(RuntimeError::Cancelled) => {
        info!(run_id = %self.run_id, "run_cancelled");
      }
      Err(e) => {
        error!(run_id = %self.run_id, error = %e, "run_failed");
        // Halt in place: mark the in-flight event, keep completed ones.
        let failed = self
          .apply(Action::EventFailed {
            message: e.to_string(),
          })
          .await;
        if failed.is_ok() {
          self.notifier.notify(RunEvent::RunFailed {
            run_id: self.run_id.clone(),
            error: e.to_string(),
          });
        }
      }
    }

    result
  }

  async fn drive(&self) -> Result<(), RuntimeError> {
    for (index, name) in self.def.event_names.iter().enumerate() {
      let id = index as u32 + 1;

      self
        .apply(Action::EventProcessing {
          id,
          timestamp: Utc::now(),
        })
        .await?;
      self.notifier.notify(RunEvent::EventProcessing {
        run_id: self.run_id.clone(),
        id,
        name: *name,
      });
      info!(run_id = %self.run_id, id, event = %name, "event_processing");

      self.pause(self.delay_for(*name)).await?;

      self
        .apply(Action::EventCompleted {
          id,
          timestamp: Utc::now(),
        })
        .await?;
      self.notifier.notify(RunEvent::EventCompleted {
        run_id: self.run_id.clone(),
        id,
        name: *name,
      });
      info!(run_id = %self.run_id, id, event = %name, "event_completed");

      if self.def.is_notable(*name) {
        self.notifier.notify(RunEvent::Toast {
          title: name.title().to_string(),
          description: self.event_message(id).await,
        });
      }
    }

    self.apply(Action::RunSettled).await?;
    self.notifier.notify(RunEvent::RunSettled {
      run_id: self.run_id.clone(),
    });

    // Short beat before revealing the completion dialog.
    self
      .pause(Duration::from_millis(self.def.settle_delay_ms))
      .await?;
    self.apply(Action::SummaryRevealed).await?;
    self.notifier.notify(RunEvent::SummaryReady {
      run_id: self.run_id.clone(),
    });

    Ok(())
  }

  /// Apply an action iff this driver's run is still the current one.
  async fn apply(&self, action: Action) -> Result<(), RuntimeError> {
    let mut shared = self.shared.lock().await;
    if shared.generation != self.generation {
      return Err(RuntimeError::Cancelled);
    }
    reducer::apply(&mut shared.state, action)?;
    self.watch_tx.send_replace(shared.state.clone());
    Ok(())
  }

  /// Sleep for `duration`, waking early (with an error) on cancellation.
  async fn pause(&self, duration: Duration) -> Result<(), RuntimeError> {
    tokio::select! {
      _ = tokio::time::sleep(duration) => Ok(()),
      _ = self.cancel.cancelled() => {
        warn!(run_id = %self.run_id, "run cancelled during delay");
        Err(RuntimeError::Cancelled)
      }
    }
  }

  fn delay_for(&self, name: EventName) -> Duration {
    let (min, max) = self.def.delay_range_ms(name);
    // Scoped so the thread-local rng is dropped before any await point.
    let ms = {
      let mut rng = rand::rng();
      rng.random_range(min..=max)
    };
    Duration::from_millis(ms)
  }

  /// The completed event's display message, for toast descriptions.
  async fn event_message(&self, id: u32) -> String {
    let shared = self.shared.lock().await;
    shared
      .state
      .event(id)
      .and_then(|e| e.details.get("message"))
      .cloned()
      .unwrap_or_default()
  }
}
