//! # Error Types
//!
//! All operations in this crate are total over law-abiding inputs; the only
//! runtime failures are alignment mismatches (two layers that cannot be
//! paired child-for-child) and an optional interpreter depth limit. Both are
//! "non-composable" situations, not bugs: pairing a two-child program layer
//! with a three-child environment layer is simply undefined.

use thiserror::Error;

/// Errors from aligning and interpreting program/environment trees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Two layers could not be paired child-for-child.
    #[error("alignment mismatch: left layer has {left} children, right layer has {right}")]
    AlignMismatch { left: usize, right: usize },

    /// The interpreter hit an explicitly configured depth limit.
    #[error("depth limit {limit} exceeded while interpreting a program")]
    DepthLimit { limit: usize },
}
