//! Persisted chat transcripts for Zeitfaden role-play conversations.
//!
//! A transcript is an append-only, per-conversation message log with stable
//! chronological ordering, idempotent persistence keyed by message id, and
//! newest-first pagination. Alongside it lives a small last-write-wins
//! bookmark store recording where each user left off in each story. Both sit
//! on one embedded [sled](https://docs.rs/sled) database.

pub mod error;
pub mod message;
pub mod pager;
pub mod progress;
pub mod store;

pub use error::{TranscriptError, TranscriptResult};
pub use message::{ChatMessage, ConversationKey};
pub use pager::{ConversationPager, PageLoad};
pub use progress::{ProgressStore, StoryProgress};
pub use store::{Database, PAGE_SIZE, TranscriptStore};
