//! Sled-backed transcript storage.
//!
//! Two trees: `messages` maps message id to the JSON record (the primary
//! key, giving idempotent upserts), and `by_conversation` maps the
//! conversation prefix plus message id back to the id (the range-scan
//! index). Ordering is resolved at read time from the stored timestamps.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::error::TranscriptResult;
use crate::message::{ChatMessage, ConversationKey};

/// Messages per transcript page.
pub const PAGE_SIZE: usize = 20;

/// Handle to the embedded database shared by the stores in this crate.
#[derive(Debug, Clone)]
pub struct Database {
    db: sled::Db,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> TranscriptResult<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Open a throwaway database backed by a temp location. For tests.
    pub fn temporary() -> TranscriptResult<Self> {
        Ok(Self {
            db: sled::Config::new().temporary(true).open()?,
        })
    }

    /// Open the transcript store on this database.
    pub fn transcripts(&self) -> TranscriptResult<TranscriptStore> {
        TranscriptStore::new(&self.db)
    }

    /// Open the story-progress store on this database.
    pub fn progress(&self) -> TranscriptResult<crate::progress::ProgressStore> {
        crate::progress::ProgressStore::new(&self.db)
    }
}

/// The per-conversation chat message log.
///
/// Writes are serialized through a single mutex; reads go straight to sled,
/// so paginating one conversation never blocks on appends to another.
#[derive(Debug)]
pub struct TranscriptStore {
    messages: sled::Tree,
    by_conversation: sled::Tree,
    write_lock: Mutex<()>,
}

impl TranscriptStore {
    fn new(db: &sled::Db) -> TranscriptResult<Self> {
        Ok(Self {
            messages: db.open_tree("messages")?,
            by_conversation: db.open_tree("by_conversation")?,
            write_lock: Mutex::new(()),
        })
    }

    /// Idempotent upsert keyed by message id.
    ///
    /// Re-saving an existing id overwrites the record — never a duplicate —
    /// and repairs the conversation index if the key changed between saves.
    pub fn append(&self, message: &ChatMessage) -> TranscriptResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let value = serde_json::to_vec(message)?;

        if let Some(raw) = self.messages.get(message.id.as_bytes())? {
            let previous: ChatMessage = serde_json::from_slice(&raw)?;
            if previous.conversation != message.conversation {
                self.by_conversation
                    .remove(previous.conversation.index_key(&previous.id))?;
            }
        }

        self.messages.insert(message.id.as_bytes(), value)?;
        self.by_conversation.insert(
            message.conversation.index_key(&message.id),
            message.id.as_bytes(),
        )?;

        tracing::debug!(id = %message.id, conversation = %message.conversation, "appended message");
        Ok(())
    }

    /// Load one page of a conversation, newest first.
    ///
    /// Page 0 is the most recent [`PAGE_SIZE`] messages; higher indices walk
    /// further into the past. Returns an empty vec once past the end.
    pub fn page(&self, key: &ConversationKey, page: usize) -> TranscriptResult<Vec<ChatMessage>> {
        self.page_with_size(key, page, PAGE_SIZE)
    }

    /// [`page`](Self::page) with an explicit page size.
    pub fn page_with_size(
        &self,
        key: &ConversationKey,
        page: usize,
        size: usize,
    ) -> TranscriptResult<Vec<ChatMessage>> {
        let all = self.conversation_messages(key)?;
        let start = page.saturating_mul(size);
        if start >= all.len() {
            return Ok(Vec::new());
        }
        let end = (start + size).min(all.len());
        Ok(all[start..end].to_vec())
    }

    /// Number of messages stored for a conversation.
    pub fn count(&self, key: &ConversationKey) -> TranscriptResult<usize> {
        let mut count = 0;
        for item in self.by_conversation.scan_prefix(key.prefix()) {
            item?;
            count += 1;
        }
        Ok(count)
    }

    /// Remove every message in a conversation (account-level wipe).
    pub fn clear(&self, key: &ConversationKey) -> TranscriptResult<usize> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let entries: Vec<_> = self
            .by_conversation
            .scan_prefix(key.prefix())
            .collect::<Result<_, _>>()?;

        let mut removed = 0;
        for (index_key, id) in entries {
            self.messages.remove(&id)?;
            self.by_conversation.remove(index_key)?;
            removed += 1;
        }

        tracing::debug!(conversation = %key, removed, "cleared conversation");
        Ok(removed)
    }

    /// All messages of a conversation sorted newest first, id as tiebreak
    /// so page boundaries stay stable across calls.
    fn conversation_messages(&self, key: &ConversationKey) -> TranscriptResult<Vec<ChatMessage>> {
        let mut out = Vec::new();
        for item in self.by_conversation.scan_prefix(key.prefix()) {
            let (_, id) = item?;
            if let Some(raw) = self.messages.get(&id)? {
                out.push(serde_json::from_slice::<ChatMessage>(&raw)?);
            }
        }
        out.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn key() -> ConversationKey {
        ConversationKey::new("story-1", "act-1", "user-1")
    }

    fn other_key() -> ConversationKey {
        ConversationKey::new("story-2", "act-1", "user-1")
    }

    fn store() -> TranscriptStore {
        Database::temporary().unwrap().transcripts().unwrap()
    }

    /// n messages with ascending timestamps and predictable ids, namespaced
    /// per conversation so seeding two conversations never collides.
    fn seed_messages(store: &TranscriptStore, key: &ConversationKey, n: usize) {
        let base = Utc::now();
        for i in 0..n {
            let msg = ChatMessage::user(key.clone(), format!("message {i}"), "Player", "")
                .with_id(format!("{key}-msg-{i:04}"))
                .with_timestamp(base + Duration::seconds(i as i64));
            store.append(&msg).unwrap();
        }
    }

    #[test]
    fn append_and_count() {
        let store = store();
        seed_messages(&store, &key(), 3);
        assert_eq!(store.count(&key()).unwrap(), 3);
        assert_eq!(store.count(&other_key()).unwrap(), 0);
    }

    #[test]
    fn upsert_same_id_overwrites() {
        let store = store();
        let first = ChatMessage::user(key(), "original", "Player", "").with_id("dup");
        store.append(&first).unwrap();

        let second = ChatMessage::user(key(), "rewritten", "Player", "")
            .with_id("dup")
            .with_timestamp(first.timestamp);
        store.append(&second).unwrap();

        assert_eq!(store.count(&key()).unwrap(), 1);
        let page = store.page(&key(), 0).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].content, "rewritten");
    }

    #[test]
    fn upsert_with_moved_conversation_repairs_index() {
        let store = store();
        let msg = ChatMessage::user(key(), "hello", "Player", "").with_id("moved");
        store.append(&msg).unwrap();

        let mut moved = msg.clone();
        moved.conversation = other_key();
        store.append(&moved).unwrap();

        assert_eq!(store.count(&key()).unwrap(), 0);
        assert_eq!(store.count(&other_key()).unwrap(), 1);
    }

    #[test]
    fn page_zero_is_most_recent() {
        let store = store();
        seed_messages(&store, &key(), 25);

        let page = store.page(&key(), 0).unwrap();
        assert_eq!(page.len(), PAGE_SIZE);
        // Newest first.
        assert_eq!(page[0].content, "message 24");
        assert_eq!(page[PAGE_SIZE - 1].content, "message 5");
    }

    #[test]
    fn deeper_pages_walk_into_the_past() {
        let store = store();
        seed_messages(&store, &key(), 25);

        let page = store.page(&key(), 1).unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].content, "message 4");
        assert_eq!(page[4].content, "message 0");
    }

    #[test]
    fn page_past_end_is_empty() {
        let store = store();
        seed_messages(&store, &key(), 5);
        assert!(store.page(&key(), 1).unwrap().is_empty());
        assert!(store.page(&key(), 100).unwrap().is_empty());
    }

    #[test]
    fn empty_conversation_pages_empty() {
        let store = store();
        assert!(store.page(&key(), 0).unwrap().is_empty());
        assert_eq!(store.count(&key()).unwrap(), 0);
    }

    #[test]
    fn conversations_are_isolated() {
        let store = store();
        seed_messages(&store, &key(), 4);
        seed_messages(&store, &other_key(), 2);

        assert_eq!(store.count(&key()).unwrap(), 4);
        assert_eq!(store.count(&other_key()).unwrap(), 2);
        let page = store.page(&other_key(), 0).unwrap();
        assert!(page.iter().all(|m| m.conversation == other_key()));
    }

    #[test]
    fn equal_timestamps_order_stably_by_id() {
        let store = store();
        let ts = Utc::now();
        for id in ["b", "a", "c"] {
            let msg = ChatMessage::user(key(), id, "Player", "")
                .with_id(id)
                .with_timestamp(ts);
            store.append(&msg).unwrap();
        }
        let page = store.page(&key(), 0).unwrap();
        let ids: Vec<&str> = page.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn clear_removes_only_that_conversation() {
        let store = store();
        seed_messages(&store, &key(), 3);
        seed_messages(&store, &other_key(), 2);

        assert_eq!(store.clear(&key()).unwrap(), 3);
        assert_eq!(store.count(&key()).unwrap(), 0);
        assert_eq!(store.count(&other_key()).unwrap(), 2);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts");
        {
            let db = Database::open(&path).unwrap();
            let store = db.transcripts().unwrap();
            seed_messages(&store, &key(), 2);
        }
        let db = Database::open(&path).unwrap();
        let store = db.transcripts().unwrap();
        assert_eq!(store.count(&key()).unwrap(), 2);
    }
}
