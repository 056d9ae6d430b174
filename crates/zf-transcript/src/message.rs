//! Chat message and conversation identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The composite identity scoping one chat transcript: which story, which
/// chapter of it, and which user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    /// Story identifier.
    pub story_id: String,
    /// Chapter identifier within the story.
    pub chapter_id: String,
    /// User identifier.
    pub user_id: String,
}

impl ConversationKey {
    /// Create a key from its three parts.
    pub fn new(
        story_id: impl Into<String>,
        chapter_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            story_id: story_id.into(),
            chapter_id: chapter_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Stable byte encoding used as the store's index prefix.
    ///
    /// Each part is length-prefixed so no id can collide with a neighboring
    /// key by containing a separator byte.
    pub fn prefix(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for part in [&self.story_id, &self.chapter_id, &self.user_id] {
            out.extend_from_slice(&(part.len() as u32).to_be_bytes());
            out.extend_from_slice(part.as_bytes());
        }
        out
    }

    /// Index key for one message within this conversation.
    pub fn index_key(&self, message_id: &str) -> Vec<u8> {
        let mut key = self.prefix();
        key.extend_from_slice(message_id.as_bytes());
        key
    }
}

impl std::fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.story_id, self.chapter_id, self.user_id)
    }
}

/// One persisted chat message.
///
/// Messages are created on send (user) or on a successful AI reply
/// (assistant), persisted immediately, and never mutated afterwards. The id
/// is globally unique; re-saving the same id overwrites rather than
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Globally unique message id (the persistence primary key).
    pub id: String,
    /// Which transcript this message belongs to.
    pub conversation: ConversationKey,
    /// Message body.
    pub content: String,
    /// True for player-authored messages, false for AI or tip messages.
    pub is_from_user: bool,
    /// Display name of the sender; empty marks a synthetic tip message.
    pub sender_name: String,
    /// Avatar asset reference for the sender.
    pub sender_avatar: String,
    /// When the message was created; orders the transcript.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn fresh(
        conversation: ConversationKey,
        content: String,
        is_from_user: bool,
        sender_name: String,
        sender_avatar: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation,
            content,
            is_from_user,
            sender_name,
            sender_avatar,
            timestamp: Utc::now(),
        }
    }

    /// A message the player sent.
    pub fn user(
        conversation: ConversationKey,
        content: impl Into<String>,
        sender_name: impl Into<String>,
        sender_avatar: impl Into<String>,
    ) -> Self {
        Self::fresh(
            conversation,
            content.into(),
            true,
            sender_name.into(),
            sender_avatar.into(),
        )
    }

    /// A reply from the AI character.
    pub fn assistant(
        conversation: ConversationKey,
        content: impl Into<String>,
        sender_name: impl Into<String>,
        sender_avatar: impl Into<String>,
    ) -> Self {
        Self::fresh(
            conversation,
            content.into(),
            false,
            sender_name.into(),
            sender_avatar.into(),
        )
    }

    /// A synthetic introductory tip, inserted by the caller once per
    /// conversation when history is exhausted. Marked by the empty sender
    /// name.
    pub fn tip(conversation: ConversationKey, content: impl Into<String>) -> Self {
        Self::fresh(conversation, content.into(), false, String::new(), String::new())
    }

    /// Whether this is a synthetic tip message.
    pub fn is_tip(&self) -> bool {
        self.sender_name.is_empty() && !self.is_from_user
    }

    /// Override the id (mainly for deterministic tests and re-saves).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Override the timestamp (mainly for deterministic tests).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
