#![allow(dead_code)]
//! Kelpie Replay Core (renderer-agnostic)
//!
//! Stepwise graph-reveal playback engine: an immutable ordered step dataset,
//! a playback state machine (idle/playing/complete), and the countdown-based
//! timing policy for auto-play and staggered show-all. Hosts drive
//! `Engine::update(dt_ms, inputs)` each tick and forward the returned render
//! commands to whatever owns the actual graph view.

pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod outputs;
pub mod scenario;
pub mod state;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use engine::Engine;
pub use error::ReplayError;
pub use inputs::{Inputs, PlaybackCommand};
pub use outputs::{Outputs, PlaybackEvent, RenderCommand};
pub use scenario::{parse_scenario_json, NodeId, Scenario, StepSpec};
pub use state::{Mode, PlaybackState};
