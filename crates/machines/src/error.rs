//! Error types for machine operations.

use thiserror::Error;

/// Errors that can occur when driving or replaying machines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    /// A replayed machine produced a different output than the transcript
    /// recorded.
    #[error("replay diverged from the recorded transcript at step {step}")]
    ReplayMismatch { step: usize },
}
