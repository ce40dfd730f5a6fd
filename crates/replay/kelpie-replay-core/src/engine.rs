#![allow(dead_code)]
//! Engine: playback state ownership and the public tick API.
//!
//! One call drives everything: `update(dt_ms, inputs)` applies control
//! commands in order, advances the auto-play countdown and the staggered
//! show-all schedule, and returns this tick's ordered render commands and
//! events.

use log::{debug, warn};

use crate::config::Config;
use crate::error::ReplayError;
use crate::inputs::{Inputs, PlaybackCommand};
use crate::outputs::{Outputs, PlaybackEvent, RenderCommand};
use crate::scenario::Scenario;
use crate::state::{Mode, PlaybackState};

/// Countdown to the next auto-play reveal. At most one live token at a time,
/// engine-exclusive; dropping it cancels the schedule.
#[derive(Clone, Copy, Debug)]
struct AutoTick {
    remaining_ms: f32,
}

/// One not-yet-fired reveal of a show-all pass.
#[derive(Clone, Copy, Debug)]
struct PendingReveal {
    remaining_ms: f32,
}

/// Playback engine over an immutable scenario.
///
/// The engine is the sole owner of `PlaybackState`; hosts mutate it only by
/// passing commands into [`Engine::update`] and observe it only through the
/// read-only accessors.
#[derive(Debug)]
pub struct Engine {
    // Owned data
    cfg: Config,
    scenario: Scenario,
    state: PlaybackState,

    // Scheduled work. Single-threaded: cleared atomically, never raced.
    auto: Option<AutoTick>,
    pending: Vec<PendingReveal>,

    // Per-tick outputs
    outputs: Outputs,
}

impl Engine {
    /// Create a new engine. The scenario is (re-)validated here, so a
    /// constructed engine never runs over an inconsistent dataset;
    /// `default_speed_ms` must be > 0.
    pub fn new(scenario: Scenario, cfg: Config) -> Result<Self, ReplayError> {
        scenario.validate()?;
        if cfg.default_speed_ms == 0 {
            return Err(ReplayError::InvalidSpeed { ms: 0 });
        }
        Ok(Self {
            state: PlaybackState {
                current_step: 0,
                mode: Mode::Idle,
                speed_ms: cfg.default_speed_ms,
            },
            cfg,
            scenario,
            auto: None,
            pending: Vec::new(),
            outputs: Outputs::default(),
        })
    }

    /// Step the engine by `dt_ms` milliseconds with the given inputs,
    /// producing this tick's outputs. Commands apply in order before time
    /// advances; a `dt_ms` spanning several intervals reveals several steps.
    pub fn update(&mut self, dt_ms: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        let dt_ms = dt_ms.max(0.0);

        // 1) Apply control commands in order
        self.apply_inputs(inputs);

        // 2) Advance the auto-play countdown
        self.tick_auto(dt_ms);

        // 3) Drain due show-all reveals
        self.tick_pending(dt_ms);

        // 4) One viewport fit per tick that changed structure
        let structural = self.outputs.commands.iter().any(|c| {
            matches!(
                c,
                RenderCommand::RevealEdge { .. } | RenderCommand::ClearAllEdges
            )
        });
        if structural {
            self.outputs.push_command(RenderCommand::FitView);
        }

        &self.outputs
    }

    fn apply_inputs(&mut self, inputs: Inputs) {
        for command in inputs.commands {
            match command {
                PlaybackCommand::Step => self.handle_step(),
                PlaybackCommand::Play => self.handle_play(),
                PlaybackCommand::Pause => self.handle_pause(),
                PlaybackCommand::Reset => self.handle_reset(),
                PlaybackCommand::ShowAll => self.handle_show_all(),
                PlaybackCommand::SetSpeed { ms } => self.handle_set_speed(ms),
            }
        }
    }

    /// Manual advance. At `N` this is a no-op, not an error: the control
    /// surface is UI-facing and favors idempotent operations.
    fn handle_step(&mut self) {
        if self.state.current_step >= self.scenario.len() {
            return;
        }
        self.advance();
    }

    fn handle_play(&mut self) {
        if self.state.mode.is_playing() {
            return;
        }
        // Cancels a partially drained show-all pass.
        self.pending.clear();
        if self.state.current_step == self.scenario.len() {
            // Completed: start over rather than refuse.
            self.reset_internal();
        }
        self.state.mode = Mode::Playing;
        self.auto = Some(AutoTick {
            remaining_ms: self.state.speed_ms as f32,
        });
        debug!(
            "auto-play started at step {}/{} ({} ms)",
            self.state.current_step,
            self.scenario.len(),
            self.state.speed_ms
        );
        self.outputs.push_event(PlaybackEvent::Started {
            at_step: self.state.current_step,
        });
    }

    fn handle_pause(&mut self) {
        // Cancels a partially drained show-all pass even when already idle.
        self.pending.clear();
        if !self.state.mode.is_playing() {
            return;
        }
        self.auto = None;
        self.state.mode = Mode::Idle;
        debug!("auto-play paused at step {}", self.state.current_step);
        self.outputs.push_event(PlaybackEvent::Paused {
            at_step: self.state.current_step,
        });
    }

    fn handle_reset(&mut self) {
        self.reset_internal();
        self.outputs.push_event(PlaybackEvent::Reset);
    }

    fn handle_show_all(&mut self) {
        self.reset_internal();
        let stagger = self.cfg.show_all_stagger_ms as f32;
        for index in 0..self.scenario.len() {
            self.pending.push(PendingReveal {
                remaining_ms: index as f32 * stagger,
            });
        }
        debug!(
            "show-all scheduled: {} reveals every {} ms",
            self.scenario.len(),
            self.cfg.show_all_stagger_ms
        );
    }

    fn handle_set_speed(&mut self, ms: u32) {
        if ms == 0 {
            let err = ReplayError::InvalidSpeed { ms };
            warn!("{err}");
            self.outputs.push_event(PlaybackEvent::Error {
                message: err.to_string(),
            });
            return;
        }
        self.state.speed_ms = ms;
        // An armed countdown keeps its due time; the new interval applies
        // from the next re-arm.
        self.outputs.push_event(PlaybackEvent::SpeedChanged { ms });
    }

    /// Shared reset routine: cancel all scheduled work, zero the position,
    /// emit the clearing commands. `Reset` adds its event on top; `ShowAll`
    /// follows with a fresh schedule.
    fn reset_internal(&mut self) {
        self.auto = None;
        self.pending.clear();
        self.state.current_step = 0;
        self.state.mode = Mode::Idle;
        self.outputs.push_command(RenderCommand::ClearAllEdges);
        self.outputs
            .push_command(RenderCommand::SetHighlight { step_id: None });
    }

    /// Reveal the step at `current_step` and advance. The single mutation
    /// path shared by manual stepping, auto-play, and the show-all drain:
    /// reveal, exclusive highlight, increment, completion check. The reveal
    /// and its highlight are adjacent in the tick's ordered output, so the
    /// collaborator never observes zero or two highlighted edges.
    fn advance(&mut self) {
        let index = self.state.current_step;
        let Some(spec) = self.scenario.steps.get(index) else {
            // Surplus schedule entries after completion land here.
            return;
        };
        let step_id = spec.id.clone();
        self.outputs.push_command(RenderCommand::RevealEdge {
            step_id: step_id.clone(),
            source: spec.source.clone(),
            target: spec.target.clone(),
            label: spec.label.clone(),
        });
        self.outputs.push_command(RenderCommand::SetHighlight {
            step_id: Some(step_id.clone()),
        });
        self.state.current_step = index + 1;
        self.outputs
            .push_event(PlaybackEvent::StepRevealed { index, step_id });

        if self.state.current_step == self.scenario.len() {
            self.state.mode = Mode::Complete;
            self.auto = None;
            self.pending.clear();
            self.outputs.push_event(PlaybackEvent::Completed {
                steps: self.scenario.len(),
            });
            debug!("playback complete after {} steps", self.scenario.len());
        }
    }

    /// Advance the auto-play countdown, revealing once per expired interval.
    /// Each re-arm draws the then-current `speed_ms`, which is what makes
    /// speed changes non-retroactive.
    fn tick_auto(&mut self, dt_ms: f32) {
        let Some(mut auto) = self.auto.take() else {
            return;
        };
        auto.remaining_ms -= dt_ms;
        while auto.remaining_ms <= 0.0 {
            self.advance();
            if !self.state.mode.is_playing() {
                // Completed during this tick; token stays dropped.
                return;
            }
            auto.remaining_ms += self.state.speed_ms as f32;
        }
        self.auto = Some(auto);
    }

    /// Drain show-all entries that fell due. Entries are scheduled at
    /// `index * stagger`, so the front of the list is always the next due.
    fn tick_pending(&mut self, dt_ms: f32) {
        if self.pending.is_empty() {
            return;
        }
        for entry in &mut self.pending {
            entry.remaining_ms -= dt_ms;
        }
        while self
            .pending
            .first()
            .map_or(false, |entry| entry.remaining_ms <= 0.0)
        {
            self.pending.remove(0);
            self.advance();
        }
    }

    /// Read-only snapshot of the playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[inline]
    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    #[inline]
    pub fn step_count(&self) -> usize {
        self.scenario.len()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    #[inline]
    pub fn speed_ms(&self) -> u32 {
        self.state.speed_ms
    }

    /// Fraction of the scenario revealed, in `0.0..=1.0`. The scenario is
    /// never empty, so this is always well-defined.
    pub fn progress(&self) -> f32 {
        self.state.current_step as f32 / self.scenario.len() as f32
    }

    /// Outstanding show-all reveals (useful for tests and tooling).
    pub fn pending_reveals(&self) -> usize {
        self.pending.len()
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }
}
