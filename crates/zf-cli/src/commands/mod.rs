pub mod chat;
pub mod play;
pub mod scenarios;
pub mod transcript;

use zf_transcript::{ConversationKey, Database};

use crate::ConversationArgs;

/// Open the embedded database named by the CLI arguments.
pub fn open_database(args: &ConversationArgs) -> Result<Database, String> {
    Database::open(&args.db).map_err(|e| format!("failed to open database: {e}"))
}

/// Build the conversation key from the CLI arguments.
pub fn conversation_key(args: &ConversationArgs) -> ConversationKey {
    ConversationKey::new(&args.story, &args.chapter, &args.user)
}
