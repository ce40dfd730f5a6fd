#![allow(dead_code)]
//! Playback state: the engine's single mutable entity.

use serde::{Deserialize, Serialize};

/// Playback mode. Paused is represented as `Idle` with `current_step > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Not advancing; either untouched or paused partway.
    Idle,
    /// Auto-play countdown armed.
    Playing,
    /// Every step revealed; nothing left to advance.
    Complete,
}

impl Mode {
    /// Get the name of this mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Complete => "complete",
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Observable playback state. Owned and mutated exclusively by the engine;
/// hosts read it through `Engine::state()` and the scalar accessors.
///
/// Invariant: `0 <= current_step <= N` where N is the scenario step count;
/// `current_step == N` if and only if `mode == Complete`. `speed_ms` is
/// always > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Number of steps revealed so far; 0 means nothing revealed.
    pub current_step: usize,
    pub mode: Mode,
    /// Inter-step delay for auto-play, independent of mode.
    pub speed_ms: u32,
}
