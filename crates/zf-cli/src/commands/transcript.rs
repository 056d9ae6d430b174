use comfy_table::{ContentArrangement, Table};

use crate::ConversationArgs;

pub fn show(args: &ConversationArgs, page: usize) -> Result<(), String> {
    let store = super::open_database(args)?
        .transcripts()
        .map_err(|e| format!("failed to open transcript store: {e}"))?;
    let key = super::conversation_key(args);

    let messages = store
        .page(&key, page)
        .map_err(|e| format!("failed to load page: {e}"))?;

    if messages.is_empty() {
        println!("  No messages on page {page} of {key}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Sender", "Content"]);

    for message in &messages {
        let sender = if message.is_tip() {
            "(tip)".to_string()
        } else if message.is_from_user {
            format!("{} (you)", message.sender_name)
        } else {
            message.sender_name.clone()
        };
        let content = if message.content.chars().count() > 60 {
            let cut: String = message.content.chars().take(57).collect();
            format!("{cut}...")
        } else {
            message.content.clone()
        };
        table.add_row(vec![
            message.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            sender,
            content,
        ]);
    }

    println!("{table}");
    println!();
    println!("  page {page} of {key}, newest first");

    Ok(())
}

pub fn count(args: &ConversationArgs) -> Result<(), String> {
    let store = super::open_database(args)?
        .transcripts()
        .map_err(|e| format!("failed to open transcript store: {e}"))?;
    let key = super::conversation_key(args);

    let total = store
        .count(&key)
        .map_err(|e| format!("failed to count messages: {e}"))?;
    println!(
        "  {total} message{} in {key}",
        if total == 1 { "" } else { "s" }
    );

    Ok(())
}

pub fn clear(args: &ConversationArgs) -> Result<(), String> {
    let store = super::open_database(args)?
        .transcripts()
        .map_err(|e| format!("failed to open transcript store: {e}"))?;
    let key = super::conversation_key(args);

    let removed = store
        .clear(&key)
        .map_err(|e| format!("failed to clear transcript: {e}"))?;
    println!(
        "  Removed {removed} message{} from {key}",
        if removed == 1 { "" } else { "s" }
    );

    Ok(())
}
