//! CLI frontend for the Zeitfaden branching narrative engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "zf",
    about = "Zeitfaden — a branching time-travel narrative engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments identifying one conversation transcript.
#[derive(Args)]
struct ConversationArgs {
    /// Story identifier
    #[arg(long)]
    story: String,

    /// Chapter identifier within the story
    #[arg(long)]
    chapter: String,

    /// User identifier
    #[arg(long, default_value = "local")]
    user: String,

    /// Path to the embedded database
    #[arg(long, default_value = "zeitfaden-db")]
    db: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List the scenarios in the built-in catalog
    Scenarios,

    /// Play a branching time-travel scenario interactively
    Play {
        /// RNG seed for reproducible outcome resolution
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Scenario id to play (default: random pick from the catalog)
        #[arg(long)]
        scenario: Option<u32>,
    },

    /// Chat with an AI character, with persisted history
    Chat {
        #[command(flatten)]
        conversation: ConversationArgs,

        /// Character display name
        #[arg(long, default_value = "Narrator")]
        character: String,

        /// Character introduction (used in the system prompt and the tip)
        #[arg(long, default_value = "A wry, well-read storyteller.")]
        intro: String,

        /// Scene background for the system prompt
        #[arg(long, default_value = "")]
        background: String,

        /// Completion endpoint base URL
        #[arg(long, default_value = zf_chat::DEFAULT_BASE_URL)]
        base_url: String,

        /// Completion model name
        #[arg(long, default_value = zf_chat::DEFAULT_MODEL)]
        model: String,
    },

    /// Inspect stored transcripts
    Transcript {
        #[command(subcommand)]
        action: TranscriptAction,
    },
}

#[derive(Subcommand)]
enum TranscriptAction {
    /// Show one page of a conversation (page 0 = most recent)
    Show {
        #[command(flatten)]
        conversation: ConversationArgs,

        /// Page index to show
        #[arg(short, long, default_value = "0")]
        page: usize,
    },

    /// Count the messages in a conversation
    Count {
        #[command(flatten)]
        conversation: ConversationArgs,
    },

    /// Delete every message in a conversation
    Clear {
        #[command(flatten)]
        conversation: ConversationArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scenarios => commands::scenarios::run(),
        Commands::Play { seed, scenario } => commands::play::run(seed, scenario),
        Commands::Chat {
            conversation,
            character,
            intro,
            background,
            base_url,
            model,
        } => commands::chat::run(
            &conversation,
            &character,
            &intro,
            &background,
            &base_url,
            &model,
        ),
        Commands::Transcript { action } => match action {
            TranscriptAction::Show { conversation, page } => {
                commands::transcript::show(&conversation, page)
            }
            TranscriptAction::Count { conversation } => commands::transcript::count(&conversation),
            TranscriptAction::Clear { conversation } => commands::transcript::clear(&conversation),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
