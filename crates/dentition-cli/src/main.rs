//! dentition CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "dentition",
    version,
    about = "Tooth reference, dental development timeline and flashcards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the tooth catalog
    Search {
        /// Search text (all teeth when omitted)
        query: Option<String>,

        /// Matching policy: tokenized, fuzzy, exact
        #[arg(long)]
        mode: Option<String>,

        /// Restrict to one dentition: primary, permanent
        #[arg(long = "type")]
        tooth_type: Option<String>,

        /// Sort by column: crown, eruption, shedding, root, fdi, universal
        #[arg(long)]
        sort: Option<String>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show one tooth by id or FDI code
    Show {
        /// Record id (e.g. "permanent-36") or FDI code (e.g. "36")
        key: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the dental arches in chart order
    Chart {
        /// Restrict to one dentition: primary, permanent
        #[arg(long = "type")]
        tooth_type: Option<String>,
    },

    /// Inspect the development timeline
    Timeline {
        /// Step to show (0 is birth)
        #[arg(long, default_value = "0")]
        step: usize,

        /// List every step instead
        #[arg(long)]
        list: bool,

        /// Include primary tooth shedding events
        #[arg(long)]
        shedding: bool,
    },

    /// Walk the timeline step by step
    TimelinePlay {
        /// First step
        #[arg(long, default_value = "0")]
        from: usize,

        /// Last step (end of the timeline when omitted)
        #[arg(long)]
        to: Option<usize>,

        /// Pause between steps in milliseconds (config value when omitted)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Navigation keys to apply instead of autoplay, comma separated
        /// (next, back, home, end, goto N, wait)
        #[arg(long)]
        keys: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Flashcard study mode
    Study {
        #[command(subcommand)]
        action: StudyAction,

        /// Directory holding saved study state
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long, global = true)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

#[derive(Subcommand, Clone, Debug)]
pub enum StudyAction {
    /// Start a new shuffled session
    Start,
    /// Show the current card
    Show,
    /// Mark the current card answered correctly
    Correct,
    /// Mark the current card answered incorrectly
    Incorrect,
    /// Skip the current card
    Skip,
    /// Move to the next card
    Next,
    /// Move to the previous card
    Previous,
    /// Show best score and recent sessions
    Stats,
    /// Change what the cards ask about
    Mode {
        /// eruption, notation or mixed
        study_type: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dentition=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            mode,
            tooth_type,
            sort,
            json,
            config,
        } => commands::search::execute(query, mode, tooth_type, sort, json, config),
        Commands::Show { key, json } => commands::show::execute(key, json),
        Commands::Chart { tooth_type } => commands::chart::execute(tooth_type),
        Commands::Timeline {
            step,
            list,
            shedding,
        } => commands::timeline::execute(step, list, shedding),
        Commands::TimelinePlay {
            from,
            to,
            delay_ms,
            keys,
            config,
        } => commands::play::execute(from, to, delay_ms, keys, config).await,
        Commands::Study {
            action,
            data_dir,
            config,
        } => commands::study::execute(action, data_dir, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
