#![allow(dead_code)]
//! Input contracts for the core engine.
//!
//! Hosts (wasm/native) collect control-surface commands and pass them into
//! `Engine::update()` each tick. Commands apply in order, before time
//! advances.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Playback commands applied before the countdowns tick.
    #[serde(default)]
    pub commands: Vec<PlaybackCommand>,
}

impl Inputs {
    /// Convenience for driving the engine with a single command.
    pub fn one(command: PlaybackCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

/// The entire control surface. Anything a host UI can do is one of these.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PlaybackCommand {
    /// Reveal the next step, if any.
    Step,
    /// Start auto-play; from a completed state this resets first.
    Play,
    /// Stop auto-play, retaining position.
    Pause,
    /// Back to nothing revealed, mode Idle.
    Reset,
    /// Reset, then reveal every step on a staggered schedule.
    ShowAll,
    /// Change the auto-play interval; applies from the next re-arm.
    SetSpeed { ms: u32 },
}
