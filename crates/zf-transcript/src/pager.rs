//! Caller-side history walk over a transcript.
//!
//! The store hands out pages newest-first; display wants each page oldest
//! first, prepended above what is already on screen. The pager tracks the
//! walk, flips each page to ascending order, and detects the end of history
//! — the point where the caller gets its one chance to insert the synthetic
//! introductory tip messages.

use crate::error::TranscriptResult;
use crate::message::{ChatMessage, ConversationKey};
use crate::store::{PAGE_SIZE, TranscriptStore};

/// One loaded page, ready for display.
#[derive(Debug, Clone)]
pub struct PageLoad {
    /// The page's messages re-sorted ascending (oldest first).
    pub messages: Vec<ChatMessage>,
    /// True once there is no further history beyond this page.
    pub end_of_history: bool,
}

/// Walks a conversation's history page by page, most recent first.
#[derive(Debug)]
pub struct ConversationPager {
    key: ConversationKey,
    next_page: usize,
    exhausted: bool,
    tip_taken: bool,
}

impl ConversationPager {
    /// Start a walk at page 0 of the given conversation.
    pub fn new(key: ConversationKey) -> Self {
        Self {
            key,
            next_page: 0,
            exhausted: false,
            tip_taken: false,
        }
    }

    /// The conversation being walked.
    pub fn key(&self) -> &ConversationKey {
        &self.key
    }

    /// Whether the walk has reached the oldest message.
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    /// Load the next page into the past.
    ///
    /// A short or empty page marks the end of history; further calls return
    /// empty pages without touching the store.
    pub fn load_next(&mut self, store: &TranscriptStore) -> TranscriptResult<PageLoad> {
        if self.exhausted {
            return Ok(PageLoad {
                messages: Vec::new(),
                end_of_history: true,
            });
        }

        let mut messages = store.page(&self.key, self.next_page)?;
        self.next_page += 1;
        if messages.len() < PAGE_SIZE {
            self.exhausted = true;
        }

        // Store order is strictly newest-first, so a reverse gives the
        // ascending order the display expects.
        messages.reverse();

        Ok(PageLoad {
            messages,
            end_of_history: self.exhausted,
        })
    }

    /// Claim the tip slot: `true` exactly once per pager, and only after
    /// history is exhausted. The caller inserts its synthetic introductory
    /// messages when this returns `true`.
    pub fn take_tip_slot(&mut self) -> bool {
        if self.exhausted && !self.tip_taken {
            self.tip_taken = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;
    use chrono::{Duration, Utc};

    fn key() -> ConversationKey {
        ConversationKey::new("s", "a", "u")
    }

    fn store_with(n: usize) -> TranscriptStore {
        let store = Database::temporary().unwrap().transcripts().unwrap();
        let base = Utc::now();
        for i in 0..n {
            let msg = ChatMessage::user(key(), format!("m{i}"), "Player", "")
                .with_id(format!("id-{i:04}"))
                .with_timestamp(base + Duration::seconds(i as i64));
            store.append(&msg).unwrap();
        }
        store
    }

    #[test]
    fn pages_come_back_ascending() {
        let store = store_with(25);
        let mut pager = ConversationPager::new(key());

        let first = pager.load_next(&store).unwrap();
        assert_eq!(first.messages.len(), PAGE_SIZE);
        assert!(!first.end_of_history);
        assert_eq!(first.messages[0].content, "m5");
        assert_eq!(first.messages[PAGE_SIZE - 1].content, "m24");
    }

    #[test]
    fn short_page_marks_end_of_history() {
        let store = store_with(25);
        let mut pager = ConversationPager::new(key());

        pager.load_next(&store).unwrap();
        let second = pager.load_next(&store).unwrap();
        assert_eq!(second.messages.len(), 5);
        assert!(second.end_of_history);
        assert!(pager.exhausted());
    }

    #[test]
    fn empty_conversation_exhausts_immediately() {
        let store = store_with(0);
        let mut pager = ConversationPager::new(key());
        let page = pager.load_next(&store).unwrap();
        assert!(page.messages.is_empty());
        assert!(page.end_of_history);
    }

    #[test]
    fn loads_after_exhaustion_stay_empty() {
        let store = store_with(3);
        let mut pager = ConversationPager::new(key());
        pager.load_next(&store).unwrap();
        let again = pager.load_next(&store).unwrap();
        assert!(again.messages.is_empty());
        assert!(again.end_of_history);
    }

    #[test]
    fn tip_slot_requires_exhaustion_and_fires_once() {
        let store = store_with(25);
        let mut pager = ConversationPager::new(key());

        pager.load_next(&store).unwrap();
        assert!(!pager.take_tip_slot()); // still more history

        pager.load_next(&store).unwrap();
        assert!(pager.take_tip_slot());
        assert!(!pager.take_tip_slot()); // only once
    }

    #[test]
    fn full_walk_covers_every_message_in_order() {
        // Pagination coverage: walking all pages and concatenating the
        // ascending pages front-most-last yields all messages exactly once,
        // globally ordered oldest to newest.
        let total = 53;
        let store = store_with(total);
        let mut pager = ConversationPager::new(key());

        let mut history: Vec<ChatMessage> = Vec::new();
        loop {
            let page = pager.load_next(&store).unwrap();
            let mut combined = page.messages;
            combined.extend(history);
            history = combined;
            if page.end_of_history {
                break;
            }
        }

        assert_eq!(history.len(), total);
        let mut seen = std::collections::HashSet::new();
        for pair in history.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for msg in &history {
            assert!(seen.insert(msg.id.clone()), "duplicate id {}", msg.id);
        }
    }
}
