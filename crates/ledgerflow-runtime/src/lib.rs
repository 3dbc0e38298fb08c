//! Ledgerflow Runtime
//!
//! The engine that drives a simulated ledger run. One `WorkflowRuntime`
//! instance per mode owns its observable `WorkflowState` and steps the run's
//! events from `pending` through `processing` to `completed`, sequentially,
//! with randomized per-event delays.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WorkflowRuntime                        │
//! │  - start(params) → RunHandle (rejects concurrent starts)    │
//! │  - reset() cancels the in-flight run immediately            │
//! │  - snapshot()/subscribe() expose every intermediate state   │
//! │  - summary_json(), copy_to_clipboard() derived helpers      │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RunDriver                            │
//! │  - one event mid-flight at a time, strict array order       │
//! │  - generation-guarded mutations (stale drivers are inert)   │
//! │  - randomized delay per event from the mode's profile       │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     reducer::apply                          │
//! │  - pure state machine, enforces the ordering invariants     │
//! │  - testable with no timers at all                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers receive `RunEvent`s through a [`RunNotifier`] and full state
//! snapshots through a `tokio::sync::watch` channel.

mod driver;
mod error;
mod notify;
pub mod reducer;
mod runtime;

pub use error::RuntimeError;
pub use notify::{ChannelNotifier, NoopNotifier, RunEvent, RunNotifier};
pub use reducer::Action;
pub use runtime::{RunHandle, WorkflowRuntime};
