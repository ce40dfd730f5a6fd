#![allow(dead_code)]
//! Scenario data model: the immutable, ordered step dataset.
//!
//! A scenario is pure data. It is validated once at construction (unique ids,
//! every step endpoint named in the node list) and never mutated afterwards;
//! playback order is the vector order of `steps`.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// Stable string key for a node in the external topology. The collaborator
/// owns node identity; the engine only checks referential consistency.
pub type NodeId = String;

/// One ordered unit of the narrative: a labeled directed edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepSpec {
    /// Unique, stable, opaque identifier (e.g. "s7").
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    /// Display label for the revealed edge.
    pub label: String,
}

/// An immutable ordered step dataset over a fixed node set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub nodes: Vec<NodeId>,
    pub steps: Vec<StepSpec>,
}

impl Scenario {
    /// Build a scenario, rejecting inconsistent data up front.
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<NodeId>,
        steps: Vec<StepSpec>,
    ) -> Result<Self, ReplayError> {
        let scenario = Self {
            name: name.into(),
            nodes,
            steps,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check dataset consistency: non-empty, unique node ids, unique step
    /// ids, and every step endpoint present in `nodes`.
    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.steps.is_empty() || self.nodes.is_empty() {
            return Err(ReplayError::EmptyScenario);
        }

        let mut nodes: HashSet<&str> = HashSet::with_capacity(self.nodes.len());
        for id in &self.nodes {
            if !nodes.insert(id.as_str()) {
                return Err(ReplayError::DuplicateNode { id: id.clone() });
            }
        }

        let mut ids: HashSet<&str> = HashSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if !ids.insert(step.id.as_str()) {
                return Err(ReplayError::DuplicateStep {
                    id: step.id.clone(),
                });
            }
            for node in [&step.source, &step.target] {
                if !nodes.contains(node.as_str()) {
                    return Err(ReplayError::UnknownNode {
                        step: step.id.clone(),
                        node: node.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The i-th step, failing with `OutOfRange` outside `[0, len)`.
    /// Never clamps.
    pub fn step(&self, index: usize) -> Result<&StepSpec, ReplayError> {
        self.steps.get(index).ok_or(ReplayError::OutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Parse a scenario from JSON and validate it. This is the entry point the
/// wasm adapter uses for host-supplied datasets; the reference walkthrough in
/// `demo` stays compiled in.
pub fn parse_scenario_json(s: &str) -> Result<Scenario, ReplayError> {
    let scenario: Scenario =
        serde_json::from_str(s).map_err(|e| ReplayError::Parse(e.to_string()))?;
    scenario.validate()?;
    Ok(scenario)
}
