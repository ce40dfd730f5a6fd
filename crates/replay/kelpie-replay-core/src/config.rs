#![allow(dead_code)]
//! Core configuration for kelpie-replay-core.

use serde::{Deserialize, Serialize};

/// Engine construction parameters.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Inter-step delay for auto-play, in milliseconds. Must be > 0;
    /// `Engine::new` rejects a zero value.
    pub default_speed_ms: u32,

    /// Delay between consecutive reveals of a show-all pass, in milliseconds.
    /// Zero collapses show-all into a single-tick reveal (still in order).
    pub show_all_stagger_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_speed_ms: 1000,
            show_all_stagger_ms: 120,
        }
    }
}
