//! Drafting agent for Postcraft.
//!
//! This crate holds everything between the user and the model:
//! - [`Draft`]: the post under construction
//! - [`Generator`]: one operation per generation stage, each a single model call
//! - [`next_followup`]: the clarifying question to ask next
//! - [`HistoryStore`]: saved posts and their analytics
//! - [`Session`]: per-conversation state driving all of the above

pub mod cleanup;
pub mod draft;
pub mod followup;
pub mod generator;
pub mod history;
pub mod score;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use draft::{Draft, ExtractedTone};
pub use followup::{next_followup, Followup};
pub use generator::{Generator, StageSettings};
pub use history::{Analytics, HistoryRecord, HistoryStore};
pub use session::{ChatMessage, Role, Session, Step};
