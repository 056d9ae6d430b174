use std::env;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use zf_chat::{role_prompt, ChatClient};
use zf_transcript::{ChatMessage, ConversationPager, StoryProgress};

use crate::ConversationArgs;

const API_KEY_VAR: &str = "ZF_API_KEY";

pub fn run(
    args: &ConversationArgs,
    character: &str,
    intro: &str,
    background: &str,
    base_url: &str,
    model: &str,
) -> Result<(), String> {
    let api_key = env::var(API_KEY_VAR)
        .map_err(|_| format!("{API_KEY_VAR} is not set; export an API key to chat"))?;

    let database = super::open_database(args)?;
    let store = database
        .transcripts()
        .map_err(|e| format!("failed to open transcript store: {e}"))?;
    let progress = database
        .progress()
        .map_err(|e| format!("failed to open progress store: {e}"))?;

    let key = super::conversation_key(args);
    let mut pager = ConversationPager::new(key.clone());
    let recent = pager
        .load_next(&store)
        .map_err(|e| format!("failed to load history: {e}"))?;

    let has_tip = recent.messages.iter().any(ChatMessage::is_tip);
    if recent.end_of_history && !has_tip && pager.take_tip_slot() {
        let tip = ChatMessage::tip(key.clone(), intro);
        store
            .append(&tip)
            .map_err(|e| format!("failed to save tip: {e}"))?;
        print_message(&tip, character);
    }
    for message in &recent.messages {
        print_message(message, character);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;

    let client = ChatClient::new(base_url, api_key).with_model(model);
    let prompt = role_prompt(character, intro, background);

    println!(
        "  {} with {} ({})",
        "Chatting".bold(),
        character.bold(),
        key
    );
    println!("  Type 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        // The player's message is persisted before the request goes out, so
        // a failed completion never loses what they typed.
        let sent = ChatMessage::user(key.clone(), input, &args.user, "");
        store
            .append(&sent)
            .map_err(|e| format!("failed to save message: {e}"))?;

        match runtime.block_on(client.complete(input, &prompt)) {
            Ok(reply) => {
                let answer = ChatMessage::assistant(key.clone(), &reply, character, "");
                store
                    .append(&answer)
                    .map_err(|e| format!("failed to save reply: {e}"))?;
                println!("{} {reply}\n", format!("{character}:").cyan().bold());

                let bookmark = StoryProgress::new(&args.user, &args.story, &args.chapter);
                progress
                    .save(&bookmark)
                    .map_err(|e| format!("failed to save progress: {e}"))?;
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

fn print_message(message: &ChatMessage, character: &str) {
    if message.is_tip() {
        println!("{} {}\n", "tip:".dimmed(), message.content.dimmed());
    } else if message.is_from_user {
        println!("{} {}\n", "you:".bold(), message.content);
    } else {
        println!(
            "{} {}\n",
            format!("{character}:").cyan().bold(),
            message.content
        );
    }
}
