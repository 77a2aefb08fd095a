use std::path::{Path, PathBuf};

use clap::Subcommand;
use quizdeck_core::storage::{Config, StateStore};
use quizdeck_core::{
    CountdownStatus, DeckLocation, Pack, PresentationSession, SessionOptions,
};

#[derive(Subcommand)]
pub enum PresentAction {
    /// Open (or resume) a session and print its snapshot
    Start {
        /// Path to the pack JSON
        pack: PathBuf,
        /// Ignore any saved position and start from the top
        #[arg(long)]
        from_top: bool,
    },
    /// Advance to the next deck item
    Next { pack: PathBuf },
    /// Go back to the previous deck item
    Prev { pack: PathBuf },
    /// Jump to a location key
    Goto { pack: PathBuf, key: String },
    /// Print the session snapshot
    Status { pack: PathBuf },
    /// Run the current question's countdown to completion
    Run { pack: PathBuf },
    /// Forget the saved position
    Clear { pack: PathBuf },
}

fn open_session(
    pack_path: &Path,
    from_top: bool,
    store: &StateStore,
) -> Result<PresentationSession, Box<dyn std::error::Error>> {
    let pack = Pack::load(pack_path)?;
    let config = Config::load();
    let options = SessionOptions {
        timer_loop_url: config.audio.timer_loop_url.clone(),
        volume: config.volume_level(),
    };
    let saved = if from_top {
        None
    } else {
        store.position_get(&pack.id)?.map(|p| p.location)
    };
    Ok(PresentationSession::resume(pack, options, saved.as_deref()))
}

fn save_position(
    store: &StateStore,
    session: &PresentationSession,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(key) = session.location_key() {
        store.position_set(&session.pack().id, &key)?;
    }
    Ok(())
}

pub fn run(action: PresentAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    match action {
        PresentAction::Start { pack, from_top } => {
            let session = open_session(&pack, from_top, &store)?;
            save_position(&store, &session)?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        PresentAction::Next { pack } => {
            let mut session = open_session(&pack, false, &store)?;
            match session.next() {
                Some(event) => {
                    save_position(&store, &session)?;
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                None => eprintln!("already at the end of the deck"),
            }
        }
        PresentAction::Prev { pack } => {
            let mut session = open_session(&pack, false, &store)?;
            match session.prev() {
                Some(event) => {
                    save_position(&store, &session)?;
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                None => eprintln!("already at the start of the deck"),
            }
        }
        PresentAction::Goto { pack, key } => {
            let mut session = open_session(&pack, false, &store)?;
            let location = DeckLocation::deserialize(Some(&key));
            let event = location.and_then(|location| session.jump(&location));
            match event {
                Some(event) => {
                    save_position(&store, &session)?;
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                None => {
                    eprintln!("no deck item matches '{key}'");
                    std::process::exit(1);
                }
            }
        }
        PresentAction::Status { pack } => {
            let session = open_session(&pack, false, &store)?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        PresentAction::Run { pack } => {
            let session = open_session(&pack, false, &store)?;
            run_live(session, &store)?;
        }
        PresentAction::Clear { pack } => {
            let pack = Pack::load(&pack)?;
            store.position_clear(&pack.id)?;
            println!("saved position cleared");
        }
    }
    Ok(())
}

/// Tick the countdown at the configured cadence until it finishes or the
/// presenter interrupts. The session, not this loop, decides what each
/// tick means.
fn run_live(
    mut session: PresentationSession,
    store: &StateStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let interval = std::time::Duration::from_millis(config.countdown.tick_interval_ms.max(50));

    let started = session.begin_question();
    if started.events.is_empty() {
        eprintln!("current item is not a runnable question");
        return Ok(());
    }
    for event in &started.events {
        println!("{}", serde_json::to_string(event)?);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut ticker = tokio::time::interval(interval);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    for event in session.tick() {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                    if session.countdown().status() == CountdownStatus::Finished {
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    for event in session.stop() {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                    break;
                }
            }
        }
        Ok::<(), serde_json::Error>(())
    })?;

    save_position(store, &session)?;
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}
