//! Terminal front-end for the writing coach API.

use clap::{Parser, Subcommand};
use coach_client::{CoachClient, CoachSession};
use coach_types::{Feature, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "English writing feedback, daily tasks and vocabulary.")]
struct CommandLine {
    /// Base URL of the API (default: $COACH_API_URL or http://localhost:8000)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Target level: B1, B2 or C1
    #[arg(short, long, global = true, default_value_t = Level::C1)]
    level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct a piece of writing and list the changes
    #[command(alias = "f")]
    Feedback {
        text: String,
        /// What the text is for, e.g. "email to a client"
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Get today's writing task
    #[command(alias = "t")]
    DailyTask {
        #[arg(short, long)]
        context: Option<String>,
    },
    /// Get a vocabulary list
    #[command(alias = "v")]
    Vocabulary {
        #[arg(short, long)]
        topic: Option<String>,
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CommandLine::parse();
    let client = match cli.api_url {
        Some(url) => CoachClient::new(url),
        None => CoachClient::from_env(),
    };

    let mut session = CoachSession::new();
    session.level = cli.level;
    match cli.command {
        Commands::Feedback { text, context } => {
            session.select_feature(Feature::Feedback);
            session.text = text;
            session.context = context.unwrap_or_default();
            if !session.can_submit() {
                anyhow::bail!("text cannot be empty");
            }
        }
        Commands::DailyTask { context } => {
            session.select_feature(Feature::DailyTask);
            session.context = context.unwrap_or_default();
        }
        Commands::Vocabulary { topic, count } => {
            session.select_feature(Feature::Vocabulary);
            session.topic = topic.unwrap_or_default();
            session.count = count;
        }
    }

    if !session.submit(&client).await {
        anyhow::bail!(session.error().unwrap_or("request was not sent").to_string());
    }
    print_results(&session);
    Ok(())
}

fn print_results(session: &CoachSession) {
    if let Some(fb) = session.feedback() {
        println!("Corrected text (original: {} words):", session.word_count());
        println!("{}\n", fb.corrected_text);
        println!("Changes:");
        for change in &fb.changes_list {
            println!("- {}", change);
        }
    }
    if let Some(task) = session.daily_task() {
        println!("Today's task:\n{}", task.task);
    }
    if let Some(vocab) = session.vocabulary() {
        for entry in &vocab.vocabulary {
            println!("{}: {}", entry.word, entry.definition);
            if !entry.example.is_empty() {
                println!("    e.g. {}", entry.example);
            }
        }
    }
}
