use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ledgerflow_config::EventName;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Lifecycle status of a single ledger event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
  Pending,
  Processing,
  Completed,
  Error,
}

/// A single named step in a simulated run - the analog of a blockchain or
/// backend event the UI is pretending to observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
  /// Sequence position, contiguous `1..=N` within a run.
  pub id: u32,
  pub name: EventName,
  pub status: EventStatus,
  /// Stamped when the event enters `processing`, overwritten on completion.
  /// Absent while pending.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<DateTime<Utc>>,
  /// Displayable key/value details, fixed at event construction.
  pub details: BTreeMap<String, String>,
}

impl LedgerEvent {
  /// Construct an event in its initial pending state.
  pub fn pending(id: u32, name: EventName, details: BTreeMap<String, String>) -> Self {
    Self {
      id,
      name,
      status: EventStatus::Pending,
      timestamp: None,
      details,
    }
  }

  pub fn is_completed(&self) -> bool {
    self.status == EventStatus::Completed
  }
}

/// Check the ordering invariants over an event list.
///
/// Valid at any observable instant of a run, not just at the terminal state.
pub fn validate_events(events: &[LedgerEvent]) -> Result<(), WorkflowError> {
  if events.is_empty() {
    return Err(WorkflowError::EmptyRun);
  }

  for (index, event) in events.iter().enumerate() {
    let expected = index as u32 + 1;
    if event.id != expected {
      return Err(WorkflowError::NonContiguousIds {
        expected,
        got: event.id,
      });
    }
  }

  let processing = events
    .iter()
    .filter(|e| e.status == EventStatus::Processing)
    .count();
  if processing > 1 {
    return Err(WorkflowError::MultipleProcessing { count: processing });
  }

  // No event may leave pending before every lower-id event completed.
  for pair in events.windows(2) {
    let (earlier, later) = (&pair[0], &pair[1]);
    if later.status != EventStatus::Pending && !earlier.is_completed() {
      return Err(WorkflowError::OutOfOrderProgress { id: later.id });
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use ledgerflow_config::EventName::*;

  fn event(id: u32, status: EventStatus) -> LedgerEvent {
    let mut e = LedgerEvent::pending(id, ShareInvitationCreated, BTreeMap::new());
    e.status = status;
    if status != EventStatus::Pending {
      e.timestamp = Some(Utc::now());
    }
    e
  }

  #[test]
  fn test_validate_accepts_in_order_progress() {
    let events = vec![
      event(1, EventStatus::Completed),
      event(2, EventStatus::Processing),
      event(3, EventStatus::Pending),
    ];
    assert!(validate_events(&events).is_ok());
  }

  #[test]
  fn test_validate_rejects_gap_in_ids() {
    let events = vec![event(1, EventStatus::Pending), event(3, EventStatus::Pending)];
    assert_eq!(
      validate_events(&events),
      Err(WorkflowError::NonContiguousIds {
        expected: 2,
        got: 3
      })
    );
  }

  #[test]
  fn test_validate_rejects_two_processing() {
    let events = vec![
      event(1, EventStatus::Processing),
      event(2, EventStatus::Processing),
    ];
    assert!(matches!(
      validate_events(&events),
      Err(WorkflowError::MultipleProcessing { count: 2 })
    ));
  }

  #[test]
  fn test_validate_rejects_skipped_event() {
    let events = vec![
      event(1, EventStatus::Processing),
      event(2, EventStatus::Completed),
    ];
    assert_eq!(
      validate_events(&events),
      Err(WorkflowError::OutOfOrderProgress { id: 2 })
    );
  }

  #[test]
  fn test_status_serializes_lowercase() {
    let json = serde_json::to_string(&EventStatus::Processing).unwrap();
    assert_eq!(json, r#""processing""#);
  }
}
