//! Read-only pack content: the deck content provider contract.
//!
//! A pack document is fetched once per session and never mutated by the
//! runtime. Authoring, CRUD and media upload live in the wider application;
//! here a pack only exists to be flattened into a deck and queried for a
//! question's thinking time and media URL.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::deck::{DeckItem, QuestionKind};
use crate::error::PackError;

/// A playable media asset with a resolved URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    /// MIME type as stored with the asset ("audio/mpeg", "video/mp4", ...).
    pub mime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    /// Thinking time for the countdown, in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default)]
    pub media: Option<Media>,
}

fn default_duration_secs() -> u64 {
    60
}

impl Question {
    /// Question type tag; media questions derive theirs from the MIME type.
    pub fn kind(&self) -> QuestionKind {
        self.media
            .as_ref()
            .and_then(|media| QuestionKind::from_mime(&media.mime))
            .unwrap_or(QuestionKind::Text)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_secs.saturating_mul(1000)
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media.as_ref().map(|media| media.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Pack {
    /// Parse a pack document and validate its media URLs.
    pub fn from_json(json: &str) -> Result<Self, PackError> {
        let pack: Pack =
            serde_json::from_str(json).map_err(|e| PackError::ParseFailed(e.to_string()))?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn load(path: &Path) -> Result<Self, PackError> {
        let json = std::fs::read_to_string(path).map_err(|e| PackError::ReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), PackError> {
        for round in &self.rounds {
            for question in &round.questions {
                if let Some(media) = &question.media {
                    Url::parse(&media.url).map_err(|e| PackError::InvalidMediaUrl {
                        question_id: question.id.clone(),
                        url: media.url.clone(),
                        message: e.to_string(),
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Flatten into the ordered deck: a round marker, then that round's
    /// questions, for each round in pack order.
    pub fn deck(&self) -> Vec<DeckItem> {
        let mut deck = Vec::new();
        for round in &self.rounds {
            deck.push(DeckItem::Round {
                round_id: round.id.clone(),
            });
            for question in &round.questions {
                deck.push(DeckItem::Question {
                    kind: question.kind(),
                    round_id: round.id.clone(),
                    question_id: question.id.clone(),
                });
            }
        }
        deck
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.rounds
            .iter()
            .flat_map(|round| round.questions.iter())
            .find(|question| question.id == question_id)
    }
}
