#![allow(dead_code)]
//! Compiled-in reference dataset: the flash-loan attack walkthrough.
//!
//! Sixteen ordered interactions between six fixed participants. This is the
//! default scenario when a host supplies none; it also anchors the examples
//! and the integration tests.

use crate::scenario::{Scenario, StepSpec};

fn step(id: &str, source: &str, target: &str, label: &str) -> StepSpec {
    StepSpec {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        label: label.to_string(),
    }
}

/// The 16-step walkthrough: probe, flash loan, spoofed relay, drain, repay,
/// sweep, exit. Construction is literal; `Engine::new` re-validates whatever
/// scenario it receives, this one included.
pub fn exploit_walkthrough() -> Scenario {
    let nodes = ["player", "tool", "forwarder", "pool", "receiver", "weth"]
        .into_iter()
        .map(str::to_string)
        .collect();

    let steps = vec![
        step("s1", "player", "tool", "Deploy exploit contract"),
        step("s2", "tool", "pool", "Probe reserves and fee math"),
        step("s3", "tool", "pool", "Request flash loan"),
        step("s4", "pool", "receiver", "Deliver loan via callback"),
        step("s5", "receiver", "forwarder", "Relay crafted meta-transaction"),
        step("s6", "forwarder", "pool", "Replay call with spoofed sender"),
        step("s7", "pool", "weth", "Grant unlimited WETH allowance"),
        step("s8", "tool", "pool", "Skew spot price with dust swap"),
        step("s9", "tool", "pool", "Drain WETH at the skewed rate"),
        step("s10", "pool", "weth", "Move WETH into the exploit contract"),
        step("s11", "receiver", "pool", "Repay flash loan principal"),
        step("s12", "pool", "receiver", "Settle callback and release lock"),
        step("s13", "tool", "weth", "Sweep residual WETH balance"),
        step("s14", "tool", "player", "Forward proceeds to attacker wallet"),
        step("s15", "player", "tool", "Self-destruct exploit contract"),
        step("s16", "player", "weth", "Unwrap WETH and exit"),
    ];

    Scenario {
        name: "flash-loan walkthrough".to_string(),
        nodes,
        steps,
    }
}
