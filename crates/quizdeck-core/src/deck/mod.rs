//! Deck items and serializable deck positions.
//!
//! A deck is the ordered sequence of round markers and questions making up
//! one presentation session. Positions within it are addressed by
//! [`DeckLocation`], which serializes to a compact key a shell can persist
//! and resolve again after a reload.

mod item;
mod location;

pub use item::{DeckItem, ItemKind, QuestionKind};
pub use location::{location_of, resolve, DeckLocation};
