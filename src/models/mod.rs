//! Shared types used across all modules.
//!
//! This module defines the canonical diff model and the review output
//! types. Other modules import from here rather than reaching into each
//! other's internals.

pub mod diff;
pub mod review;

pub use diff::{CanonicalDiff, DiffLine, DiffLineKind, FileDiff, Hunk, DEV_NULL};
pub use review::{DiffStats, PrMetadata, RenderedReview, ReviewPrompt};
