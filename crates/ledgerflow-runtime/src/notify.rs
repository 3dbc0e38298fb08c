//! Run events and notifiers for observability.
//!
//! Events are emitted while a run is driven so consumers can observe
//! progress, surface toast notifications, or stream updates to a UI.

use ledgerflow_config::{EventName, Mode};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted while a run is driven.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEvent {
  /// A run has started.
  RunStarted { run_id: String, mode: Mode },

  /// An event was dispatched (entered processing).
  EventProcessing {
    run_id: String,
    id: u32,
    name: EventName,
  },

  /// An event completed.
  EventCompleted {
    run_id: String,
    id: u32,
    name: EventName,
  },

  /// The run halted on a failed event.
  RunFailed { run_id: String, error: String },

  /// All events completed; the run settled.
  RunSettled { run_id: String },

  /// The completion summary is ready to reveal.
  SummaryReady { run_id: String },

  /// A user-visible transient notification for a notable event.
  Toast { title: String, description: String },

  /// Text was copied for the caller to place on the clipboard.
  ClipboardCopy { tag: String, text: String },
}

/// Trait for receiving run events.
///
/// The runtime calls `notify` for each event - implementations decide what
/// to do with them (render, persist, log, ignore, etc.).
pub trait RunNotifier: Send + Sync {
  /// Called when a run event occurs.
  fn notify(&self, event: RunEvent);
}

/// A no-op notifier that discards all events.
///
/// Useful for tests or when event observation is not needed.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl RunNotifier for NoopNotifier {
  fn notify(&self, _event: RunEvent) {
    // Intentionally empty
  }
}

/// A notifier that sends events to an unbounded channel.
///
/// Use this when you need to consume events asynchronously (stream to a UI,
/// print progress from a CLI, assert sequences in tests).
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // NOTE: unbounded to avoid blocking the driver if the consumer is slow.
  // Event volume is low (a handful per run), so memory growth is unlikely
  // in practice. If this becomes a concern, switch to a bounded channel and
  // accept backpressure, or try_send and drop.
  sender: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelNotifier {
  /// Create a new channel notifier.
  pub fn new(sender: mpsc::UnboundedSender<RunEvent>) -> Self {
    Self { sender }
  }
}

impl RunNotifier for ChannelNotifier {
  fn notify(&self, event: RunEvent) {
    // Ignore send errors - receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_channel_notifier_forwards_events() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let notifier = ChannelNotifier::new(tx);

    notifier.notify(RunEvent::RunSettled {
      run_id: "run-1".to_string(),
    });

    let received = rx.recv().await.unwrap();
    assert!(matches!(received, RunEvent::RunSettled { run_id } if run_id == "run-1"));
  }

  #[test]
  fn test_notify_survives_dropped_receiver() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let notifier = ChannelNotifier::new(tx);
    notifier.notify(RunEvent::SummaryReady {
      run_id: "run-1".to_string(),
    });
  }
}
