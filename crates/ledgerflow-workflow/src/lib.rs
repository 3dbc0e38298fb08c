//! Ledgerflow Workflow
//!
//! This crate provides the run-state representation for ledgerflow: the
//! ordered ledger of discrete named events a run steps through, the state
//! object observed by callers, and the ordering invariants that hold for
//! every run:
//!
//! - event ids are contiguous `1..=N` in array order
//! - at most one event is `processing` at any instant
//! - events complete in strictly increasing id order
//! - `is_complete` holds exactly when all events are completed, and an
//!   active run is never complete

mod error;
mod event;
mod state;
mod summary;

pub use error::WorkflowError;
pub use event::{EventStatus, LedgerEvent, validate_events};
pub use state::{ChainIdentifiers, RunContext, UiState, WorkflowState};
pub use summary::summary;
