use clap::Subcommand;
use quizdeck_core::storage::StateStore;
use quizdeck_core::CountdownEngine;

const ENGINE_KEY: &str = "countdown_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a countdown
    Start {
        /// Duration in seconds
        secs: u64,
    },
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Stop and reset to the full duration
    Stop,
    /// Recompute remaining time and print the current snapshot
    Status,
}

fn load_engine(store: &StateStore) -> CountdownEngine {
    if let Ok(Some(json)) = store.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<CountdownEngine>(&json) {
            return engine;
        }
    }
    CountdownEngine::new()
}

fn save_engine(
    store: &StateStore,
    engine: &CountdownEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    store.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let mut engine = load_engine(&store);

    let event = match action {
        TimerAction::Start { secs } => engine.start(secs.saturating_mul(1000)),
        TimerAction::Pause => {
            // Flush remaining first so an already-expired countdown
            // finishes instead of pausing at zero.
            engine.tick();
            engine.pause()
        }
        TimerAction::Resume => engine.resume(),
        TimerAction::Stop => engine.stop(),
        TimerAction::Status => {
            engine.tick();
            None
        }
    };

    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }

    save_engine(&store, &engine)?;
    Ok(())
}
