use std::path::PathBuf;

use clap::Subcommand;
use quizdeck_core::{location_of, resolve, DeckLocation, Media, Pack, Question, Round};

#[derive(Subcommand)]
pub enum DeckAction {
    /// Write a starter pack document
    Init {
        /// Output path for the pack JSON
        path: PathBuf,
    },
    /// List deck items with indices and location keys
    List {
        /// Path to the pack JSON
        pack: PathBuf,
    },
    /// Resolve a location key to a deck index
    Locate {
        /// Path to the pack JSON
        pack: PathBuf,
        /// Location key, e.g. "audio|r1|q3"
        key: String,
    },
}

pub fn run(action: DeckAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DeckAction::Init { path } => {
            let pack = starter_pack();
            std::fs::write(&path, serde_json::to_string_pretty(&pack)?)?;
            println!("pack written to {}", path.display());
        }
        DeckAction::List { pack } => {
            let pack = Pack::load(&pack)?;
            for (index, item) in pack.deck().iter().enumerate() {
                let key = location_of(item).serialize();
                println!("{index:3}  {key}");
            }
        }
        DeckAction::Locate { pack, key } => {
            let pack = Pack::load(&pack)?;
            let deck = pack.deck();
            let index = DeckLocation::deserialize(Some(&key))
                .and_then(|location| resolve(&deck, &location));
            match index {
                Some(index) => println!("{index}"),
                None => {
                    eprintln!("no deck item matches '{key}'");
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}

fn starter_pack() -> Pack {
    let round_id = uuid::Uuid::new_v4().to_string();
    Pack {
        id: uuid::Uuid::new_v4().to_string(),
        title: "New Quiz".to_string(),
        rounds: vec![Round {
            id: round_id,
            title: "Round 1".to_string(),
            questions: vec![
                Question {
                    id: uuid::Uuid::new_v4().to_string(),
                    prompt: "First question".to_string(),
                    duration_secs: 60,
                    media: None,
                },
                Question {
                    id: uuid::Uuid::new_v4().to_string(),
                    prompt: "Name that tune".to_string(),
                    duration_secs: 30,
                    media: Some(Media {
                        url: "https://example.com/clip.mp3".to_string(),
                        mime: "audio/mpeg".to_string(),
                    }),
                },
            ],
        }],
    }
}
