use ledgerflow_config::{Mode, StartParams};
use serde::{Deserialize, Serialize};

use crate::event::{EventStatus, LedgerEvent};

/// Identifiers synthesized for one run - the bag of values a real backend
/// would return after registering the document on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIdentifiers {
  pub dataset_id: String,
  /// The mode's primary identifier (invitation, offer, firm or listing id).
  pub reference_id: String,
  pub tx_hash: String,
  pub contract_address: String,
  pub issuer_address: String,
  pub explorer_url: String,
}

/// Everything captured at run start: run id, mode, the caller's parameters
/// and the synthesized identifiers. Immutable for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
  pub run_id: String,
  pub mode: Mode,
  pub params: StartParams,
  pub identifiers: ChainIdentifiers,
}

/// UI-trigger flags co-located with the run state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
  /// Progress drawer, opened at run start.
  pub show_drawer: bool,
  /// Completion dialog, opened shortly after settlement.
  pub show_dialog: bool,
  /// Tag of the last copied value, for a transient acknowledgement.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub copied_tag: Option<String>,
  /// Monotonic copy counter; a clear only applies to its own copy.
  #[serde(skip)]
  pub copy_seq: u64,
}

/// Observable state of one workflow instance.
///
/// Created idle, reset to a fresh run by a start call, mutated event-by-event
/// by the driver, and terminal once every event completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
  /// True exactly while the driver loop is executing.
  pub is_active: bool,
  /// True only after the last event completed.
  pub is_complete: bool,
  /// Count of events that have been dispatched (entered processing).
  pub current_step: u32,
  pub events: Vec<LedgerEvent>,
  /// Set when a run halts on a failed event; distinct from completion.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub run: Option<RunContext>,
  pub ui: UiState,
}

impl WorkflowState {
  /// An idle instance with no run observed yet.
  pub fn idle() -> Self {
    Self::default()
  }

  pub fn is_idle(&self) -> bool {
    !self.is_active && self.run.is_none()
  }

  pub fn completed_count(&self) -> usize {
    self.events.iter().filter(|e| e.is_completed()).count()
  }

  pub fn processing_count(&self) -> usize {
    self
      .events
      .iter()
      .filter(|e| e.status == EventStatus::Processing)
      .count()
  }

  /// Count of events that have entered processing at least once.
  pub fn dispatched_count(&self) -> usize {
    self
      .events
      .iter()
      .filter(|e| e.status != EventStatus::Pending)
      .count()
  }

  /// Completed events in run order, for the activity list view.
  pub fn completed_events(&self) -> impl Iterator<Item = &LedgerEvent> {
    self.events.iter().filter(|e| e.is_completed())
  }

  pub fn event(&self, id: u32) -> Option<&LedgerEvent> {
    self.events.iter().find(|e| e.id == id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_state_is_idle() {
    let state = WorkflowState::idle();
    assert!(state.is_idle());
    assert!(!state.is_active);
    assert!(!state.is_complete);
    assert_eq!(state.current_step, 0);
    assert!(state.events.is_empty());
    assert!(!state.ui.show_drawer);
  }

  #[test]
  fn test_idle_state_serializes_without_run() {
    let json = serde_json::to_value(WorkflowState::idle()).unwrap();
    assert!(json.get("run").is_none());
    assert!(json.get("failure").is_none());
    assert_eq!(json["is_active"], false);
  }
}
