//! Output renderers for the canonical diff model.

pub mod markdown;
