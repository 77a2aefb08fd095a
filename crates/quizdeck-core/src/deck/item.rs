use serde::{Deserialize, Serialize};
use std::fmt;

/// Question type tag. Media questions derive theirs from the asset's MIME
/// type; questions without media are plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Image,
    Video,
    Audio,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }

    /// Whether questions of this kind play a clip when they start.
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Video | Self::Audio)
    }

    /// Derive a media question kind from a MIME type ("video/mp4" -> Video).
    pub fn from_mime(mime: &str) -> Option<QuestionKind> {
        match mime.split('/').next() {
            Some("image") => Some(Self::Image),
            Some("video") => Some(Self::Video),
            Some("audio") => Some(Self::Audio),
            _ => None,
        }
    }
}

/// Kind tag carried by deck items and locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Round,
    Question(QuestionKind),
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Round => "round",
            ItemKind::Question(kind) => kind.as_str(),
        }
    }

    /// Parse a kind tag. Unknown tags are malformed input, not a new kind.
    pub fn parse(tag: &str) -> Option<ItemKind> {
        match tag {
            "round" => Some(ItemKind::Round),
            "text" => Some(ItemKind::Question(QuestionKind::Text)),
            "image" => Some(ItemKind::Question(QuestionKind::Image)),
            "video" => Some(ItemKind::Question(QuestionKind::Video)),
            "audio" => Some(ItemKind::Question(QuestionKind::Audio)),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the ordered presentation deck.
///
/// The order is significant and stable for the duration of a session.
/// Items are unique per (kind, round id, question id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckItem {
    /// Title slide introducing a round.
    Round { round_id: String },
    /// A question slide.
    Question {
        kind: QuestionKind,
        round_id: String,
        question_id: String,
    },
}

impl DeckItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            DeckItem::Round { .. } => ItemKind::Round,
            DeckItem::Question { kind, .. } => ItemKind::Question(*kind),
        }
    }

    pub fn round_id(&self) -> &str {
        match self {
            DeckItem::Round { round_id } => round_id,
            DeckItem::Question { round_id, .. } => round_id,
        }
    }

    /// Present iff the item is a question slide.
    pub fn question_id(&self) -> Option<&str> {
        match self {
            DeckItem::Round { .. } => None,
            DeckItem::Question { question_id, .. } => Some(question_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for tag in ["round", "text", "image", "video", "audio"] {
            let kind = ItemKind::parse(tag).unwrap();
            assert_eq!(kind.as_str(), tag);
        }
        assert_eq!(ItemKind::parse("slide"), None);
        assert_eq!(ItemKind::parse(""), None);
    }

    #[test]
    fn question_kind_from_mime() {
        assert_eq!(QuestionKind::from_mime("audio/mpeg"), Some(QuestionKind::Audio));
        assert_eq!(QuestionKind::from_mime("video/mp4"), Some(QuestionKind::Video));
        assert_eq!(QuestionKind::from_mime("image/png"), Some(QuestionKind::Image));
        assert_eq!(QuestionKind::from_mime("application/pdf"), None);
    }

    #[test]
    fn question_id_presence_tracks_variant() {
        let round = DeckItem::Round { round_id: "r1".into() };
        assert_eq!(round.question_id(), None);

        let question = DeckItem::Question {
            kind: QuestionKind::Text,
            round_id: "r1".into(),
            question_id: "q1".into(),
        };
        assert_eq!(question.question_id(), Some("q1"));
    }
}
