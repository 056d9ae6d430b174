//! Last-write-wins story progress bookmarks.
//!
//! Records where each user left off in each story, by chapter title. Simple
//! keyed storage: saving again for the same (user, story) pair replaces the
//! previous bookmark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TranscriptResult;

/// One user's bookmark into one story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryProgress {
    /// User identifier.
    pub user_id: String,
    /// Story identifier.
    pub story_id: String,
    /// Title of the chapter the user last reached.
    pub chapter_title: String,
    /// When the bookmark was last written.
    pub updated_at: DateTime<Utc>,
}

impl StoryProgress {
    /// Create a bookmark stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        story_id: impl Into<String>,
        chapter_title: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            story_id: story_id.into(),
            chapter_title: chapter_title.into(),
            updated_at: Utc::now(),
        }
    }
}

fn user_prefix(user_id: &str) -> Vec<u8> {
    let mut key = Vec::new();
    key.extend_from_slice(&(user_id.len() as u32).to_be_bytes());
    key.extend_from_slice(user_id.as_bytes());
    key
}

fn bookmark_key(user_id: &str, story_id: &str) -> Vec<u8> {
    let mut key = user_prefix(user_id);
    key.extend_from_slice(story_id.as_bytes());
    key
}

/// Keyed bookmark storage over a dedicated sled tree.
#[derive(Debug)]
pub struct ProgressStore {
    tree: sled::Tree,
}

impl ProgressStore {
    pub(crate) fn new(db: &sled::Db) -> TranscriptResult<Self> {
        Ok(Self {
            tree: db.open_tree("progress")?,
        })
    }

    /// Save or replace the bookmark for (user, story). Last write wins.
    pub fn save(&self, progress: &StoryProgress) -> TranscriptResult<()> {
        let key = bookmark_key(&progress.user_id, &progress.story_id);
        self.tree.insert(key, serde_json::to_vec(progress)?)?;
        tracing::debug!(
            user = %progress.user_id,
            story = %progress.story_id,
            chapter = %progress.chapter_title,
            "saved progress"
        );
        Ok(())
    }

    /// Look up a user's bookmark for one story.
    pub fn get(&self, user_id: &str, story_id: &str) -> TranscriptResult<Option<StoryProgress>> {
        match self.tree.get(bookmark_key(user_id, story_id))? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    /// All of one user's bookmarks.
    pub fn user_progress(&self, user_id: &str) -> TranscriptResult<Vec<StoryProgress>> {
        let mut out = Vec::new();
        for item in self.tree.scan_prefix(user_prefix(user_id)) {
            let (_, raw) = item?;
            out.push(serde_json::from_slice(&raw)?);
        }
        Ok(out)
    }

    /// Remove the bookmark for (user, story), if any.
    pub fn delete(&self, user_id: &str, story_id: &str) -> TranscriptResult<()> {
        self.tree.remove(bookmark_key(user_id, story_id))?;
        Ok(())
    }

    /// Remove every bookmark belonging to a user.
    pub fn clear_user(&self, user_id: &str) -> TranscriptResult<usize> {
        let keys: Vec<_> = self
            .tree
            .scan_prefix(user_prefix(user_id))
            .map(|item| item.map(|(key, _)| key))
            .collect::<Result<_, _>>()?;

        let removed = keys.len();
        for key in keys {
            self.tree.remove(key)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn store() -> ProgressStore {
        Database::temporary().unwrap().progress().unwrap()
    }

    #[test]
    fn save_and_get() {
        let store = store();
        store
            .save(&StoryProgress::new("u1", "story-1", "Chapter One"))
            .unwrap();

        let found = store.get("u1", "story-1").unwrap().unwrap();
        assert_eq!(found.chapter_title, "Chapter One");
        assert!(store.get("u1", "story-2").unwrap().is_none());
    }

    #[test]
    fn last_write_wins() {
        let store = store();
        store
            .save(&StoryProgress::new("u1", "story-1", "Chapter One"))
            .unwrap();
        store
            .save(&StoryProgress::new("u1", "story-1", "Chapter Three"))
            .unwrap();

        let found = store.get("u1", "story-1").unwrap().unwrap();
        assert_eq!(found.chapter_title, "Chapter Three");
        assert_eq!(store.user_progress("u1").unwrap().len(), 1);
    }

    #[test]
    fn user_progress_lists_only_that_user() {
        let store = store();
        store
            .save(&StoryProgress::new("u1", "story-1", "A"))
            .unwrap();
        store
            .save(&StoryProgress::new("u1", "story-2", "B"))
            .unwrap();
        store
            .save(&StoryProgress::new("u2", "story-1", "C"))
            .unwrap();

        assert_eq!(store.user_progress("u1").unwrap().len(), 2);
        assert_eq!(store.user_progress("u2").unwrap().len(), 1);
    }

    #[test]
    fn delete_and_clear() {
        let store = store();
        store
            .save(&StoryProgress::new("u1", "story-1", "A"))
            .unwrap();
        store
            .save(&StoryProgress::new("u1", "story-2", "B"))
            .unwrap();

        store.delete("u1", "story-1").unwrap();
        assert!(store.get("u1", "story-1").unwrap().is_none());

        assert_eq!(store.clear_user("u1").unwrap(), 1);
        assert!(store.user_progress("u1").unwrap().is_empty());
    }
}
