use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "edunarrator",
    version,
    about = "Turn documents into narrated audio, flashcards and quizzes",
    after_help = "Provider keys are read from GEMINI_API_KEY and MURF_API_KEY. \
                  Settings are read from ./edunarrator.toml unless --config is given."
)]
pub struct Cli {
    /// Settings file (default: ./edunarrator.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (`POST /process`, `GET /health`, `GET /voices`).
    Serve {
        /// Bind address (overrides settings)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Process a document and print the flashcards, audio and quiz as JSON
    Process {
        /// Document path (.pdf, .docx or .txt)
        path: PathBuf,
        /// Voice tone label (see `voices`)
        #[arg(short, long)]
        tone: Option<String>,
    },

    /// Print the plain text extracted from a document
    Extract {
        /// Document path (.pdf, .docx or .txt)
        path: PathBuf,
        /// Collapse whitespace and strip unusual symbols
        #[arg(long)]
        clean: bool,
    },

    /// Narrate a whole document in provider-sized chunks and print the audio URLs
    Narrate {
        /// Document path (.pdf, .docx or .txt)
        path: PathBuf,
        /// Voice tone label (see `voices`)
        #[arg(short, long)]
        tone: Option<String>,
    },

    /// List available voice tones
    Voices,

    /// Write the default settings file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
