#![allow(dead_code)]
//! Output contracts from the core engine.
//!
//! Outputs carry the ordered render commands for the collaborator that owns
//! the actual graph view, and a separate list of semantic events for the host
//! UI. Both are per-tick: `Engine::update()` clears and refills them.

use serde::{Deserialize, Serialize};

use crate::scenario::NodeId;

/// One instruction to the rendering collaborator. Order within a tick is
/// significant; the collaborator applies commands in sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Make a step's edge visible. Idempotent on the collaborator side:
    /// re-revealing is a no-op or overwrite, never a duplicate.
    RevealEdge {
        step_id: String,
        source: NodeId,
        target: NodeId,
        label: String,
    },
    /// Set exactly one (or zero) highlighted edges.
    SetHighlight { step_id: Option<String> },
    /// Remove every revealed edge.
    ClearAllEdges,
    /// Advisory viewport re-fit after structural changes.
    FitView,
}

/// Discrete semantic signals emitted during stepping. No-op operations emit
/// nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackEvent {
    Started { at_step: usize },
    Paused { at_step: usize },
    Reset,
    StepRevealed { index: usize, step_id: String },
    SpeedChanged { ms: u32 },
    Completed { steps: usize },
    Error { message: String },
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub commands: Vec<RenderCommand>,
    #[serde(default)]
    pub events: Vec<PlaybackEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_command(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn push_event(&mut self, event: PlaybackEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.events.is_empty()
    }
}
