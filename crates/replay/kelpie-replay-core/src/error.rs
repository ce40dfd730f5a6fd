#![allow(dead_code)]
//! Error type shared across dataset construction and playback.

use thiserror::Error;

/// Errors produced while building a scenario or driving playback.
///
/// Dataset problems (`EmptyScenario`, `DuplicateNode`, `DuplicateStep`,
/// `UnknownNode`, `Parse`) surface at construction time only; a constructed
/// engine never runs over an inconsistent dataset. `OutOfRange` and
/// `InvalidSpeed` are the runtime rejections: fatal to the calling operation,
/// recoverable for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("step index {index} out of range (scenario has {len} steps)")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid playback speed {ms} ms (must be > 0)")]
    InvalidSpeed { ms: u32 },

    #[error("scenario has no steps")]
    EmptyScenario,

    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: String },

    #[error("duplicate step id '{id}'")]
    DuplicateStep { id: String },

    #[error("step '{step}' references unknown node '{node}'")]
    UnknownNode { step: String, node: String },

    #[error("scenario json parse error: {0}")]
    Parse(String),
}
