use kelpie_replay_core::{
    config::Config,
    demo,
    engine::Engine,
    inputs::{Inputs, PlaybackCommand},
    outputs::{Outputs, PlaybackEvent, RenderCommand},
    state::Mode,
};
use serde_json::json;

fn mk_engine() -> Engine {
    Engine::new(demo::exploit_walkthrough(), Config::default()).expect("engine")
}

fn mk_engine_with(default_speed_ms: u32, show_all_stagger_ms: u32) -> Engine {
    let cfg = Config {
        default_speed_ms,
        show_all_stagger_ms,
    };
    Engine::new(demo::exploit_walkthrough(), cfg).expect("engine")
}

/// Apply one command with no elapsed time, cloning this tick's outputs.
fn apply(engine: &mut Engine, command: PlaybackCommand) -> Outputs {
    engine.update(0.0, Inputs::one(command)).clone()
}

/// Let time pass with no commands, cloning this tick's outputs.
fn tick(engine: &mut Engine, dt_ms: f32) -> Outputs {
    engine.update(dt_ms, Inputs::default()).clone()
}

fn revealed_ids(out: &Outputs) -> Vec<String> {
    out.commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::RevealEdge { step_id, .. } => Some(step_id.clone()),
            _ => None,
        })
        .collect()
}

fn highlights(out: &Outputs) -> Vec<Option<String>> {
    out.commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::SetHighlight { step_id } => Some(step_id.clone()),
            _ => None,
        })
        .collect()
}

/// it should start idle at step zero with the configured speed
#[test]
fn initial_state_is_idle_at_zero() {
    let engine = mk_engine();
    assert_eq!(engine.current_step(), 0);
    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.speed_ms(), 1000);
    assert_eq!(engine.step_count(), 16);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.pending_reveals(), 0);
}

/// it should advance one step per Step command and never exceed the step count
#[test]
fn manual_step_monotonic_and_bounded() {
    let mut engine = mk_engine();
    let mut last = 0;
    for _ in 0..20 {
        apply(&mut engine, PlaybackCommand::Step);
        let current = engine.current_step();
        assert!(current >= last);
        assert!(current <= engine.step_count());
        last = current;
    }
    assert_eq!(engine.current_step(), 16);
    assert_eq!(engine.mode(), Mode::Complete);
}

/// it should emit reveal then exclusive highlight as adjacent commands
#[test]
fn step_emits_reveal_then_highlight() {
    let mut engine = mk_engine();
    let out = apply(&mut engine, PlaybackCommand::Step);
    let j = serde_json::to_value(&out.commands).unwrap();
    assert_eq!(
        j,
        json!([
            {
                "RevealEdge": {
                    "step_id": "s1",
                    "source": "player",
                    "target": "tool",
                    "label": "Deploy exploit contract"
                }
            },
            { "SetHighlight": { "step_id": "s1" } },
            "FitView"
        ])
    );
}

/// it should treat Step at the end as a no-op with no output
#[test]
fn step_at_end_is_noop() {
    let mut engine = mk_engine();
    for _ in 0..16 {
        apply(&mut engine, PlaybackCommand::Step);
    }
    assert_eq!(engine.current_step(), 16);

    let out = apply(&mut engine, PlaybackCommand::Step);
    assert!(out.is_empty());
    assert_eq!(engine.current_step(), 16);
    assert_eq!(engine.mode(), Mode::Complete);
}

/// it should highlight only the newest step after each advance
#[test]
fn single_highlight_tracks_newest() {
    let mut engine = mk_engine();
    for k in 1..=3 {
        let out = apply(&mut engine, PlaybackCommand::Step);
        let hs = highlights(&out);
        assert_eq!(hs.len(), 1);
        assert_eq!(hs[0], Some(format!("s{k}")));
    }
}

/// it should transition to Complete exactly at the final step
#[test]
fn completion_on_final_step() {
    let mut engine = mk_engine();
    for _ in 0..15 {
        apply(&mut engine, PlaybackCommand::Step);
    }
    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.current_step(), 15);

    let out = apply(&mut engine, PlaybackCommand::Step);
    assert_eq!(engine.mode(), Mode::Complete);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Completed { steps: 16 })));
}

/// it should reset to zero revealed from any mode and stay there when repeated
#[test]
fn reset_is_idempotent() {
    let mut engine = mk_engine();
    for _ in 0..5 {
        apply(&mut engine, PlaybackCommand::Step);
    }
    apply(&mut engine, PlaybackCommand::Play);
    tick(&mut engine, 500.0);

    let first = apply(&mut engine, PlaybackCommand::Reset);
    assert!(first
        .commands
        .iter()
        .any(|c| matches!(c, RenderCommand::ClearAllEdges)));
    assert_eq!(highlights(&first), vec![None]);
    let snap1 = serde_json::to_value(engine.state()).unwrap();

    let second = apply(&mut engine, PlaybackCommand::Reset);
    let snap2 = serde_json::to_value(engine.state()).unwrap();
    assert_eq!(snap1, snap2);
    assert_eq!(snap1["current_step"], 0);
    assert_eq!(snap1["mode"], "Idle");
    assert!(second
        .commands
        .iter()
        .any(|c| matches!(c, RenderCommand::ClearAllEdges)));

    // The recurring schedule is gone: nothing fires however long we wait.
    let later = tick(&mut engine, 10_000.0);
    assert!(later.is_empty());
}

/// it should run the scripted walkthrough: two manual steps, three timed reveals, reset
#[test]
fn walkthrough_manual_then_auto_then_reset() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Reset);

    let s1 = apply(&mut engine, PlaybackCommand::Step);
    let s2 = apply(&mut engine, PlaybackCommand::Step);
    assert_eq!(engine.current_step(), 2);
    assert_eq!(revealed_ids(&s1), vec!["s1"]);
    assert_eq!(revealed_ids(&s2), vec!["s2"]);
    assert_eq!(highlights(&s2), vec![Some("s2".to_string())]);

    apply(&mut engine, PlaybackCommand::Play);
    assert_eq!(engine.mode(), Mode::Playing);
    tick(&mut engine, 1000.0);
    tick(&mut engine, 1000.0);
    let third = tick(&mut engine, 1000.0);
    assert_eq!(engine.current_step(), 5);
    assert_eq!(revealed_ids(&third), vec!["s5"]);
    assert_eq!(highlights(&third), vec![Some("s5".to_string())]);

    apply(&mut engine, PlaybackCommand::Reset);
    assert_eq!(engine.current_step(), 0);
    assert_eq!(engine.mode(), Mode::Idle);
}

/// it should pause retaining position and ignore Pause when already idle
#[test]
fn pause_retains_position_and_idle_pause_is_noop() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Play);
    tick(&mut engine, 2500.0);
    assert_eq!(engine.current_step(), 2);

    let out = apply(&mut engine, PlaybackCommand::Pause);
    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.current_step(), 2);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Paused { at_step: 2 })));

    // Paused: time passing reveals nothing.
    assert!(tick(&mut engine, 5000.0).is_empty());

    // Already idle: a second Pause emits nothing at all.
    let again = apply(&mut engine, PlaybackCommand::Pause);
    assert!(again.is_empty());
}

/// it should not shorten an armed countdown when speed changes
#[test]
fn speed_change_is_not_retroactive() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::SetSpeed { ms: 2000 });
    apply(&mut engine, PlaybackCommand::Play);

    assert!(tick(&mut engine, 1999.0).is_empty());
    let changed = apply(&mut engine, PlaybackCommand::SetSpeed { ms: 500 });
    assert!(changed
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::SpeedChanged { ms: 500 })));
    assert_eq!(engine.current_step(), 0);

    // The pending reveal still lands on the original 2000 ms boundary...
    let fired = tick(&mut engine, 1.0);
    assert_eq!(revealed_ids(&fired), vec!["s1"]);

    // ...and only the next interval uses the new speed.
    assert!(tick(&mut engine, 499.0).is_empty());
    let next = tick(&mut engine, 1.0);
    assert_eq!(revealed_ids(&next), vec!["s2"]);
}

/// it should reject a zero speed, leaving state untouched
#[test]
fn zero_speed_is_rejected() {
    let mut engine = mk_engine();
    let out = apply(&mut engine, PlaybackCommand::SetSpeed { ms: 0 });
    assert_eq!(engine.speed_ms(), 1000);
    assert!(out.commands.is_empty());
    assert!(out.events.iter().any(
        |e| matches!(e, PlaybackEvent::Error { message } if message.contains("invalid playback speed"))
    ));
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::SpeedChanged { .. })));
}

/// it should auto-reset when Play arrives in the completed state
#[test]
fn play_from_complete_auto_resets() {
    let mut engine = mk_engine();
    for _ in 0..16 {
        apply(&mut engine, PlaybackCommand::Step);
    }
    assert_eq!(engine.mode(), Mode::Complete);

    let out = apply(&mut engine, PlaybackCommand::Play);
    assert_eq!(engine.current_step(), 0);
    assert_eq!(engine.mode(), Mode::Playing);
    assert!(out
        .commands
        .iter()
        .any(|c| matches!(c, RenderCommand::ClearAllEdges)));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Started { at_step: 0 })));

    let first = tick(&mut engine, 1000.0);
    assert_eq!(revealed_ids(&first), vec!["s1"]);
}

/// it should ignore Play while already playing without disturbing the countdown
#[test]
fn play_while_playing_is_noop() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Play);
    tick(&mut engine, 500.0);

    let out = apply(&mut engine, PlaybackCommand::Play);
    assert!(out.is_empty());

    // The original schedule holds: the reveal lands 1000 ms after the first Play.
    let fired = tick(&mut engine, 500.0);
    assert_eq!(revealed_ids(&fired), vec!["s1"]);
}

/// it should reveal several steps in one update when dt spans multiple intervals
#[test]
fn large_dt_reveals_multiple_steps() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Play);
    let out = tick(&mut engine, 3500.0);
    assert_eq!(engine.current_step(), 3);
    assert_eq!(revealed_ids(&out), vec!["s1", "s2", "s3"]);
    let hs = highlights(&out);
    assert_eq!(hs.last(), Some(&Some("s3".to_string())));
    assert!(matches!(out.commands.last(), Some(RenderCommand::FitView)));
}

/// it should finish auto-play in Complete with no further ticks scheduled
#[test]
fn autoplay_runs_to_completion() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Play);
    let out = tick(&mut engine, 16_000.0);
    assert_eq!(engine.current_step(), 16);
    assert_eq!(engine.mode(), Mode::Complete);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, PlaybackEvent::Completed { steps: 16 })));

    assert!(tick(&mut engine, 5000.0).is_empty());
}

/// it should emit FitView once per structural tick and never otherwise
#[test]
fn fitview_only_on_structural_ticks() {
    let mut engine = mk_engine();

    let step = apply(&mut engine, PlaybackCommand::Step);
    let fits = step
        .commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::FitView))
        .count();
    assert_eq!(fits, 1);
    assert!(matches!(step.commands.last(), Some(RenderCommand::FitView)));

    assert!(tick(&mut engine, 0.0).commands.is_empty());

    let speed = apply(&mut engine, PlaybackCommand::SetSpeed { ms: 800 });
    assert!(speed.commands.is_empty());

    let reset = apply(&mut engine, PlaybackCommand::Reset);
    let fits = reset
        .commands
        .iter()
        .filter(|c| matches!(c, RenderCommand::FitView))
        .count();
    assert_eq!(fits, 1);
}

/// it should order events as Started before the reveals of the same tick
#[test]
fn events_ordered_within_tick() {
    let mut engine = mk_engine();
    let out = engine
        .update(1000.0, Inputs::one(PlaybackCommand::Play))
        .clone();
    let j = serde_json::to_value(&out.events).unwrap();
    assert_eq!(
        j,
        json!([
            { "Started": { "at_step": 0 } },
            { "StepRevealed": { "index": 0, "step_id": "s1" } }
        ])
    );
}

/// it should produce identical outputs for identical command and dt sequences
#[test]
fn determinism_same_sequence_same_outputs() {
    let mut e1 = mk_engine_with(1000, 120);
    let mut e2 = mk_engine_with(1000, 120);

    let script: Vec<(f32, Inputs)> = vec![
        (0.0, Inputs::one(PlaybackCommand::Step)),
        (0.0, Inputs::one(PlaybackCommand::Play)),
        (650.0, Inputs::default()),
        (350.0, Inputs::default()),
        (0.0, Inputs::one(PlaybackCommand::SetSpeed { ms: 250 })),
        (1000.0, Inputs::default()),
        (0.0, Inputs::one(PlaybackCommand::ShowAll)),
        (120.0, Inputs::default()),
        (0.0, Inputs::one(PlaybackCommand::Reset)),
    ];
    for (dt, inputs) in script {
        let j1 = serde_json::to_string(e1.update(dt, inputs.clone())).unwrap();
        let j2 = serde_json::to_string(e2.update(dt, inputs)).unwrap();
        assert_eq!(j1, j2);
    }
}

/// it should treat negative dt as no elapsed time
#[test]
fn negative_dt_is_clamped() {
    let mut engine = mk_engine();
    apply(&mut engine, PlaybackCommand::Play);
    tick(&mut engine, 900.0);
    assert!(tick(&mut engine, -5000.0).is_empty());
    let fired = tick(&mut engine, 100.0);
    assert_eq!(revealed_ids(&fired), vec!["s1"]);
}
