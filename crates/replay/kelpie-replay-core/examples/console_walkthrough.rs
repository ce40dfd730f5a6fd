//! Drive the compiled-in walkthrough from a terminal: two manual steps,
//! auto-play to the end, then a reset. Render commands print as text in
//! place of a graph view.

use kelpie_replay_core::{Config, Engine, Inputs, PlaybackCommand, RenderCommand};

fn print_commands(commands: &[RenderCommand]) {
    for command in commands {
        match command {
            RenderCommand::RevealEdge {
                step_id,
                source,
                target,
                label,
            } => println!("  + [{step_id}] {source} -> {target}: {label}"),
            RenderCommand::SetHighlight { step_id: Some(id) } => {
                println!("  * highlight {id}")
            }
            RenderCommand::SetHighlight { step_id: None } => println!("  * highlight cleared"),
            RenderCommand::ClearAllEdges => println!("  - all edges cleared"),
            RenderCommand::FitView => println!("  ~ fit view"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let scenario = kelpie_replay_core::demo::exploit_walkthrough();
    let mut engine = Engine::new(scenario, Config::default())?;
    println!(
        "scenario '{}': {} steps over {} nodes",
        engine.scenario().name,
        engine.step_count(),
        engine.scenario().nodes.len()
    );

    println!("\ntwo manual steps:");
    for _ in 0..2 {
        let out = engine.update(0.0, Inputs::one(PlaybackCommand::Step));
        print_commands(&out.commands);
    }
    println!(
        "step {}/{} ({})",
        engine.current_step(),
        engine.step_count(),
        engine.mode().name()
    );

    println!("\nauto-play at 250 ms:");
    engine.update(0.0, Inputs::one(PlaybackCommand::SetSpeed { ms: 250 }));
    engine.update(0.0, Inputs::one(PlaybackCommand::Play));
    while !engine.mode().is_complete() {
        let out = engine.update(250.0, Inputs::default()).clone();
        print_commands(&out.commands);
    }
    println!(
        "step {}/{} ({})",
        engine.current_step(),
        engine.step_count(),
        engine.mode().name()
    );

    println!("\nreset:");
    let out = engine.update(0.0, Inputs::one(PlaybackCommand::Reset)).clone();
    print_commands(&out.commands);
    println!(
        "step {}/{} ({})",
        engine.current_step(),
        engine.step_count(),
        engine.mode().name()
    );

    Ok(())
}
