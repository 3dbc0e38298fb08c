use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
  #[error("event ids are not contiguous: expected {expected}, got {got}")]
  NonContiguousIds { expected: u32, got: u32 },

  #[error("{count} events are processing at once (at most one is allowed)")]
  MultipleProcessing { count: usize },

  #[error("event {id} progressed before all earlier events completed")]
  OutOfOrderProgress { id: u32 },

  #[error("run has no events")]
  EmptyRun,
}
