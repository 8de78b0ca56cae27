// src/main.rs

use clap::{Parser, Subcommand};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use studyhall::content::{fuzzy, knowledge, notes, vocab};
use studyhall::{
    fetch_content_tree, render_blocks, AppConfig, AppError, BlockId, NotionHttpClient, QueryParams,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("studyhall.log");

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Study-content viewer backend over Notion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a page's block tree as an HTML fragment
    Render {
        /// Notion page URL or ID
        page: String,

        /// Maximum nesting depth to fetch (0 = top-level blocks only)
        #[arg(long, default_value_t = 2)]
        depth: u8,
    },
    /// List knowledge cards as JSON
    Knowledge {
        /// Restrict to these subjects (repeatable)
        #[arg(short, long)]
        subject: Vec<String>,

        /// Substring match against card titles
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Continuation cursor from a previous listing
        #[arg(long)]
        cursor: Option<String>,

        /// Pick one card at random instead of listing
        #[arg(long, default_value_t = false)]
        random: bool,

        /// Re-rank the fetched batch by fuzzy title score against --query
        #[arg(long, default_value_t = false)]
        rank: bool,
    },
    /// List vocabulary entries as JSON
    Vocab {
        /// Substring match against words
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[arg(long)]
        cursor: Option<String>,

        /// Pick one entry at random instead of listing
        #[arg(long, default_value_t = false)]
        random: bool,
    },
    /// List notes (with rendered page bodies) as JSON
    Notes {
        /// Restrict to these subjects (repeatable)
        #[arg(short, long)]
        subject: Vec<String>,

        /// Substring match against note titles
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[arg(long)]
        cursor: Option<String>,
    },
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let client = NotionHttpClient::new(&config.api_key)?;

    match cli.command {
        Command::Render { page, depth } => {
            let root = BlockId::parse(&page)?;
            let blocks = fetch_content_tree(&client, &root, depth).await?;
            println!("{}", render_blocks(&blocks));
        }
        Command::Knowledge {
            subject,
            query,
            limit,
            cursor,
            random,
            rank,
        } => {
            let database = config.require_knowledge_db()?;
            if random {
                let card = knowledge::random_knowledge(&client, database, subject).await?;
                print_json(&card)?;
                return Ok(());
            }
            let params = QueryParams {
                subjects: subject,
                q: query.clone(),
                limit,
                cursor,
            };
            let mut listing = knowledge::query_knowledge(&client, database, &params).await?;
            if rank {
                if let Some(q) = query.as_deref() {
                    listing.items = fuzzy::rank(listing.items, q, |card| &card.title);
                }
            }
            print_json(&listing)?;
        }
        Command::Vocab {
            query,
            limit,
            cursor,
            random,
        } => {
            let Some(database) = config.vocab_db.as_ref() else {
                print_json(&studyhall::Listing::<vocab::VocabEntry>::empty())?;
                return Ok(());
            };
            if random {
                let entry = vocab::random_vocab(&client, database).await?;
                print_json(&entry)?;
                return Ok(());
            }
            let params = QueryParams {
                q: query,
                limit,
                cursor,
                ..Default::default()
            };
            let listing = vocab::query_vocab(&client, database, &params).await?;
            print_json(&listing)?;
        }
        Command::Notes {
            subject,
            query,
            limit,
            cursor,
        } => {
            let Some(database) = config.notes_db.as_ref() else {
                print_json(&studyhall::Listing::<notes::Note>::empty())?;
                return Ok(());
            };
            let params = QueryParams {
                subjects: subject,
                q: query,
                limit,
                cursor,
            };
            let listing = notes::query_notes(&client, database, &params).await?;
            print_json(&listing)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
