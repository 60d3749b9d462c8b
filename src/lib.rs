//! diffprep — diff normalization and review-prompt assembly (library crate).
//!
//! Ingests a pull request's changes in any of the shapes a code-hosting API
//! returns (hosted structured diff, legacy structured diff, unified-diff
//! text, or an opaque payload), normalizes them into one canonical model,
//! and assembles the text artifact handed to a content-generation step.
//!
//! The pipeline is synchronous, stateless, and infallible: unrecognized
//! input ends in a diagnostic fallback, never an error.

pub mod diff;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod prompt;

pub use models::{CanonicalDiff, DiffStats, PrMetadata, RenderedReview, ReviewPrompt};
pub use pipeline::{detect, normalize, normalize_as, PayloadKind};
pub use prompt::{assemble_review_prompt, build_review_prompt};
