//! Pure state machine for a workflow run.
//!
//! Every mutation of a `WorkflowState` goes through [`apply`], which either
//! performs the transition or rejects it. The ordering invariants (ids
//! dispatched in array order, at most one event processing, completion only
//! in increasing id order) are enforced here, independently of any timer.

use chrono::{DateTime, Utc};
use ledgerflow_workflow::{EventStatus, LedgerEvent, RunContext, UiState, WorkflowState};

use crate::error::RuntimeError;

/// An atomic transition of the run state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  /// Begin a fresh run: captured context plus the full pending event list.
  RunStarted {
    run: RunContext,
    events: Vec<LedgerEvent>,
  },
  /// Dispatch event `id` (pending → processing).
  EventProcessing { id: u32, timestamp: DateTime<Utc> },
  /// Complete event `id` (processing → completed).
  EventCompleted { id: u32, timestamp: DateTime<Utc> },
  /// Halt the run: the in-flight event becomes `error`, completed events
  /// keep their status.
  EventFailed { message: String },
  /// All events completed; the run leaves the active state.
  RunSettled,
  /// Reveal the completion summary view.
  SummaryRevealed,
  /// Record a clipboard copy acknowledgement (last write wins).
  CopyAcknowledged { tag: String, seq: u64 },
  /// Clear an acknowledgement, only if it is still the latest one.
  CopyCleared { seq: u64 },
  /// Discard the run and return to idle.
  Reset,
}

/// Apply one action to the state, rejecting invalid transitions.
pub fn apply(state: &mut WorkflowState, action: Action) -> Result<(), RuntimeError> {
  match action {
    Action::RunStarted { run, events } => {
      if state.is_active {
        return Err(RuntimeError::AlreadyRunning);
      }
      if events.is_empty() {
        return Err(RuntimeError::transition("run has no events"));
      }
      *state = WorkflowState {
        is_active: true,
        events,
        run: Some(run),
        ui: UiState {
          show_drawer: true,
          ..UiState::default()
        },
        ..WorkflowState::default()
      };
      Ok(())
    }

    Action::EventProcessing { id, timestamp } => {
      if !state.is_active {
        return Err(RuntimeError::transition("no active run"));
      }
      if id != state.current_step + 1 {
        return Err(RuntimeError::transition(format!(
          "event {id} dispatched out of order (next is {})",
          state.current_step + 1
        )));
      }
      if state.processing_count() > 0 {
        return Err(RuntimeError::transition(format!(
          "event {id} dispatched while another event is processing"
        )));
      }
      let event = event_mut(state, id)?;
      if event.status != EventStatus::Pending {
        return Err(RuntimeError::transition(format!(
          "event {id} is not pending"
        )));
      }
      event.status = EventStatus::Processing;
      event.timestamp = Some(timestamp);
      state.current_step = id;
      Ok(())
    }

    Action::EventCompleted { id, timestamp } => {
      if !state.is_active {
        return Err(RuntimeError::transition("no active run"));
      }
      let event = event_mut(state, id)?;
      if event.status != EventStatus::Processing {
        return Err(RuntimeError::transition(format!(
          "event {id} is not processing"
        )));
      }
      event.status = EventStatus::Completed;
      event.timestamp = Some(timestamp);
      Ok(())
    }

    Action::EventFailed { message } => {
      if !state.is_active {
        return Err(RuntimeError::transition("no active run"));
      }
      if let Some(event) = state
        .events
        .iter_mut()
        .find(|e| e.status == EventStatus::Processing)
      {
        event.status = EventStatus::Error;
      }
      state.is_active = false;
      state.failure = Some(message);
      Ok(())
    }

    Action::RunSettled => {
      if !state.is_active {
        return Err(RuntimeError::transition("no active run"));
      }
      if state.completed_count() != state.events.len() {
        return Err(RuntimeError::transition(format!(
          "run settled with {} of {} events completed",
          state.completed_count(),
          state.events.len()
        )));
      }
      state.is_active = false;
      state.is_complete = true;
      Ok(())
    }

    Action::SummaryRevealed => {
      if !state.is_complete {
        return Err(RuntimeError::transition("run is not complete"));
      }
      state.ui.show_dialog = true;
      Ok(())
    }

    Action::CopyAcknowledged { tag, seq } => {
      state.ui.copied_tag = Some(tag);
      state.ui.copy_seq = seq;
      Ok(())
    }

    Action::CopyCleared { seq } => {
      if state.ui.copy_seq == seq {
        state.ui.copied_tag = None;
      }
      Ok(())
    }

    Action::Reset => {
      *state = WorkflowState::idle();
      Ok(())
    }
  }
}

fn event_mut(state: &mut WorkflowState, id: u32) -> Result<&mut LedgerEvent, RuntimeError> {
  state
    .events
    .iter_mut()
    .find(|e| e.id == id)
    .ok_or_else(|| RuntimeError::transition(format!("no event with id {id}")))
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use ledgerflow_config::EventName::*;
  use ledgerflow_config::{Mode, StartParams};
  use ledgerflow_workflow::{ChainIdentifiers, validate_events};

  use super::*;

  fn test_run() -> (RunContext, Vec<LedgerEvent>) {
    let run = RunContext {
      run_id: "run-1".to_string(),
      mode: Mode::Share,
      params: StartParams::Share {
        shared_emails: vec!["a@x.com".to_string()],
      },
      identifiers: ChainIdentifiers {
        dataset_id: "ds-1".to_string(),
        reference_id: "inv-1".to_string(),
        tx_hash: "0x1".to_string(),
        contract_address: "0x2".to_string(),
        issuer_address: "0x3".to_string(),
        explorer_url: "https://explorer.ledgerflow.dev/tx/0x1".to_string(),
      },
    };
    let events = vec![
      LedgerEvent::pending(1, ShareInvitationCreated, BTreeMap::new()),
      LedgerEvent::pending(2, InvitationEmailSent, BTreeMap::new()),
    ];
    (run, events)
  }

  fn started_state() -> WorkflowState {
    let mut state = WorkflowState::idle();
    let (run, events) = test_run();
    apply(&mut state, Action::RunStarted { run, events }).unwrap();
    state
  }

  #[test]
  fn test_full_run_sequence() {
    let mut state = started_state();
    assert!(state.is_active);
    assert!(state.ui.show_drawer);
    assert_eq!(state.current_step, 0);

    for id in 1..=2 {
      apply(
        &mut state,
        Action::EventProcessing {
          id,
          timestamp: Utc::now(),
        },
      )
      .unwrap();
      assert_eq!(state.current_step, id);
      assert_eq!(state.processing_count(), 1);
      validate_events(&state.events).unwrap();

      apply(
        &mut state,
        Action::EventCompleted {
          id,
          timestamp: Utc::now(),
        },
      )
      .unwrap();
      validate_events(&state.events).unwrap();
    }

    apply(&mut state, Action::RunSettled).unwrap();
    assert!(!state.is_active);
    assert!(state.is_complete);
    assert_eq!(state.completed_count(), 2);

    apply(&mut state, Action::SummaryRevealed).unwrap();
    assert!(state.ui.show_dialog);
  }

  #[test]
  fn test_out_of_order_dispatch_rejected() {
    let mut state = started_state();
    let result = apply(
      &mut state,
      Action::EventProcessing {
        id: 2,
        timestamp: Utc::now(),
      },
    );
    assert!(matches!(
      result,
      Err(RuntimeError::InvalidTransition { .. })
    ));
    // State untouched by the rejected action.
    assert_eq!(state.current_step, 0);
    assert_eq!(state.dispatched_count(), 0);
  }

  #[test]
  fn test_second_dispatch_requires_first_completion() {
    let mut state = started_state();
    apply(
      &mut state,
      Action::EventProcessing {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();

    let result = apply(
      &mut state,
      Action::EventProcessing {
        id: 2,
        timestamp: Utc::now(),
      },
    );
    assert!(matches!(
      result,
      Err(RuntimeError::InvalidTransition { .. })
    ));
    assert_eq!(state.processing_count(), 1);
  }

  #[test]
  fn test_settle_requires_every_event_completed() {
    let mut state = started_state();
    apply(
      &mut state,
      Action::EventProcessing {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();
    apply(
      &mut state,
      Action::EventCompleted {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();

    assert!(apply(&mut state, Action::RunSettled).is_err());
    assert!(!state.is_complete);
  }

  #[test]
  fn test_failure_preserves_completed_events() {
    let mut state = started_state();
    for action in [
      Action::EventProcessing {
        id: 1,
        timestamp: Utc::now(),
      },
      Action::EventCompleted {
        id: 1,
        timestamp: Utc::now(),
      },
      Action::EventProcessing {
        id: 2,
        timestamp: Utc::now(),
      },
    ] {
      apply(&mut state, action).unwrap();
    }

    apply(
      &mut state,
      Action::EventFailed {
        message: "simulated backend outage".to_string(),
      },
    )
    .unwrap();

    assert!(!state.is_active);
    assert!(!state.is_complete);
    assert_eq!(state.failure.as_deref(), Some("simulated backend outage"));
    assert_eq!(state.events[0].status, EventStatus::Completed);
    assert_eq!(state.events[1].status, EventStatus::Error);
  }

  #[test]
  fn test_start_rejected_while_active() {
    let mut state = started_state();
    let (run, events) = test_run();
    let result = apply(&mut state, Action::RunStarted { run, events });
    assert!(matches!(result, Err(RuntimeError::AlreadyRunning)));
  }

  #[test]
  fn test_reset_returns_to_idle_from_anywhere() {
    let mut state = started_state();
    apply(
      &mut state,
      Action::EventProcessing {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();

    apply(&mut state, Action::Reset).unwrap();
    assert_eq!(state, WorkflowState::idle());
  }

  #[test]
  fn test_copy_clear_only_applies_to_latest() {
    let mut state = WorkflowState::idle();
    apply(
      &mut state,
      Action::CopyAcknowledged {
        tag: "tx_hash".to_string(),
        seq: 1,
      },
    )
    .unwrap();
    apply(
      &mut state,
      Action::CopyAcknowledged {
        tag: "summary".to_string(),
        seq: 2,
      },
    )
    .unwrap();

    // The first copy's timer fires late; it must not clear the newer tag.
    apply(&mut state, Action::CopyCleared { seq: 1 }).unwrap();
    assert_eq!(state.ui.copied_tag.as_deref(), Some("summary"));

    apply(&mut state, Action::CopyCleared { seq: 2 }).unwrap();
    assert!(state.ui.copied_tag.is_none());
  }

  #[test]
  fn test_current_step_tracks_dispatch_count() {
    let mut state = started_state();
    assert_eq!(state.current_step as usize, state.dispatched_count());

    apply(
      &mut state,
      Action::EventProcessing {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();
    assert_eq!(state.current_step as usize, state.dispatched_count());

    apply(
      &mut state,
      Action::EventCompleted {
        id: 1,
        timestamp: Utc::now(),
      },
    )
    .unwrap();
    assert_eq!(state.current_step as usize, state.dispatched_count());
  }
}
