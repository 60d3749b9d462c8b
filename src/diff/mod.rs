//! Diff engine: unified text parsing, hosted/legacy format conversion, and
//! change statistics.
//!
//! Each converter produces the canonical model in `crate::models::diff`;
//! the pipeline in `crate::pipeline` decides which converter applies.

pub mod hosted;
pub mod legacy;
pub mod parser;
pub mod stats;

use thiserror::Error;

/// Errors from the diff engine.
///
/// Malformed *content* inside a recognized shape never errors — missing
/// collections are treated as empty. Only an unparseable unified-diff hunk
/// header surfaces here, and the pipeline absorbs it as "no changes from
/// this strategy".
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("diff parse error: {0}")]
    ParseError(String),
}
