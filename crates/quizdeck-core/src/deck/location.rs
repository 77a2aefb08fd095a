//! Serializable addressing into an ordered deck.
//!
//! A location is persisted as a pipe-delimited `kind|round|question` key so
//! it can cross a durability boundary (URL query, storage entry) and be
//! resolved back to a deck index after a reload. The key format is the
//! stable artifact; keep it backward compatible.

use super::item::{DeckItem, ItemKind};

/// A minimal addressable reference to a deck item.
///
/// Two locations are equal iff `kind` matches and, when present,
/// `round_id`/`question_id` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLocation {
    pub kind: ItemKind,
    pub round_id: Option<String>,
    pub question_id: Option<String>,
}

impl DeckLocation {
    /// Serialize to the persistent `kind|round|question` key.
    /// Absent fields become empty segments.
    pub fn serialize(&self) -> String {
        format!(
            "{}|{}|{}",
            self.kind.as_str(),
            self.round_id.as_deref().unwrap_or(""),
            self.question_id.as_deref().unwrap_or("")
        )
    }

    /// Reconstruct a location from a stored key.
    ///
    /// Returns `None` for missing, empty or malformed input (an empty or
    /// unknown kind tag); empty segments are absent fields. Left-inverse of
    /// [`DeckLocation::serialize`] for every location this module produces.
    pub fn deserialize(raw: Option<&str>) -> Option<DeckLocation> {
        let raw = raw?;
        if raw.is_empty() {
            return None;
        }
        let mut segments = raw.split('|');
        let kind = ItemKind::parse(segments.next()?)?;
        let round_id = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let question_id = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Some(DeckLocation {
            kind,
            round_id,
            question_id,
        })
    }

    /// Whether this location addresses `item`.
    ///
    /// A location carrying a `question_id` only ever addresses a question
    /// slide; a round marker never matches it, whatever its kind tag says.
    pub fn matches(&self, item: &DeckItem) -> bool {
        if self.kind != item.kind() {
            return false;
        }
        if let Some(round_id) = &self.round_id {
            if item.round_id() != round_id {
                return false;
            }
        }
        if let Some(question_id) = &self.question_id {
            match item.question_id() {
                Some(id) if id == question_id => {}
                _ => return false,
            }
        }
        true
    }
}

/// Project the location of a deck item. Always succeeds.
pub fn location_of(item: &DeckItem) -> DeckLocation {
    match item {
        DeckItem::Round { round_id } => DeckLocation {
            kind: ItemKind::Round,
            round_id: Some(round_id.clone()),
            question_id: None,
        },
        DeckItem::Question {
            kind,
            round_id,
            question_id,
        } => DeckLocation {
            kind: ItemKind::Question(*kind),
            round_id: Some(round_id.clone()),
            question_id: Some(question_id.clone()),
        },
    }
}

/// First index in `deck` addressed by `location`, or `None`.
/// Linear in deck size; decks are small.
pub fn resolve(deck: &[DeckItem], location: &DeckLocation) -> Option<usize> {
    deck.iter().position(|item| location.matches(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::QuestionKind;

    fn sample_deck() -> Vec<DeckItem> {
        vec![
            DeckItem::Round { round_id: "r1".into() },
            DeckItem::Question {
                kind: QuestionKind::Text,
                round_id: "r1".into(),
                question_id: "q1".into(),
            },
            DeckItem::Question {
                kind: QuestionKind::Audio,
                round_id: "r1".into(),
                question_id: "q2".into(),
            },
            DeckItem::Round { round_id: "r2".into() },
            DeckItem::Question {
                kind: QuestionKind::Video,
                round_id: "r2".into(),
                question_id: "q3".into(),
            },
        ]
    }

    #[test]
    fn serializes_with_empty_placeholders() {
        let location = DeckLocation {
            kind: ItemKind::Round,
            round_id: Some("r2".into()),
            question_id: None,
        };
        assert_eq!(location.serialize(), "round|r2|");
    }

    #[test]
    fn round_trips_every_deck_item() {
        for item in &sample_deck() {
            let location = location_of(item);
            let key = location.serialize();
            assert_eq!(DeckLocation::deserialize(Some(&key)), Some(location));
        }
    }

    #[test]
    fn deserialize_rejects_degenerate_input() {
        assert_eq!(DeckLocation::deserialize(None), None);
        assert_eq!(DeckLocation::deserialize(Some("")), None);
        assert_eq!(DeckLocation::deserialize(Some("|r1|q1")), None);
        assert_eq!(DeckLocation::deserialize(Some("slide|r1|q1")), None);
    }

    #[test]
    fn deserialize_tolerates_missing_trailing_segments() {
        let location = DeckLocation::deserialize(Some("audio|r1")).unwrap();
        assert_eq!(location.kind, ItemKind::Question(QuestionKind::Audio));
        assert_eq!(location.round_id.as_deref(), Some("r1"));
        assert_eq!(location.question_id, None);

        let bare = DeckLocation::deserialize(Some("round")).unwrap();
        assert_eq!(bare.kind, ItemKind::Round);
        assert_eq!(bare.round_id, None);
    }

    #[test]
    fn resolve_finds_first_matching_index() {
        let deck = sample_deck();
        for (index, item) in deck.iter().enumerate() {
            assert_eq!(resolve(&deck, &location_of(item)), Some(index));
        }
    }

    #[test]
    fn resolve_on_empty_deck_is_none() {
        let location = location_of(&sample_deck()[1]);
        assert_eq!(resolve(&[], &location), None);
    }

    #[test]
    fn unresolvable_location_is_none() {
        let deck = sample_deck();
        let location = DeckLocation {
            kind: ItemKind::Question(QuestionKind::Text),
            round_id: Some("r1".into()),
            question_id: Some("deleted".into()),
        };
        assert_eq!(resolve(&deck, &location), None);
    }

    #[test]
    fn question_id_never_matches_a_round_marker() {
        let deck = vec![DeckItem::Round { round_id: "r1".into() }];
        let location = DeckLocation {
            kind: ItemKind::Round,
            round_id: Some("r1".into()),
            question_id: Some("q9".into()),
        };
        assert_eq!(resolve(&deck, &location), None);
    }

    #[test]
    fn partial_location_matches_by_round_only() {
        let deck = sample_deck();
        let location = DeckLocation {
            kind: ItemKind::Round,
            round_id: Some("r2".into()),
            question_id: None,
        };
        assert_eq!(resolve(&deck, &location), Some(3));
    }
}
