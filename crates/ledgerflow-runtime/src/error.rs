//! Runtime errors.

use ledgerflow_config::{Mode, ParamError};

/// Errors that can occur while starting or driving a run.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// A start call arrived while a run was still active.
  #[error("a run is already active on this instance")]
  AlreadyRunning,

  /// Start parameters belong to a different mode.
  #[error("parameters are for mode '{got}' but this instance drives '{expected}'")]
  ModeMismatch { expected: Mode, got: Mode },

  /// Start parameters failed validation.
  #[error("invalid start parameters: {0}")]
  InvalidParams(#[from] ParamError),

  /// An action was rejected by the state machine.
  #[error("invalid transition: {message}")]
  InvalidTransition { message: String },

  /// The run was cancelled by a reset.
  #[error("run cancelled")]
  Cancelled,

  /// The driver task ended abnormally.
  #[error("run driver failed: {message}")]
  DriverFailed { message: String },
}

impl RuntimeError {
  pub(crate) fn transition(message: impl Into<String>) -> Self {
    RuntimeError::InvalidTransition {
      message: message.into(),
    }
  }
}
