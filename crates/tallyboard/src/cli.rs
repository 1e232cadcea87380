//! Command-line interface for tallyboard.

use tallyboard::Builtin;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tallyboard - place numbered tokens so every zone hits its target
#[derive(Parser, Debug)]
#[command(name = "tallyboard")]
#[command(about = "Number-placement puzzle driver", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which puzzle to load.
#[derive(Args, Debug, Clone)]
pub struct PuzzleArgs {
    /// Puzzle fixture file (TOML). Overrides --builtin.
    #[arg(short, long)]
    pub puzzle: Option<PathBuf>,

    /// Builtin puzzle to use when no file is given
    #[arg(short, long, value_enum, default_value_t = Builtin::Freeform)]
    pub builtin: Builtin,

    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the starting state of a puzzle
    Show {
        /// Puzzle selection
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },

    /// Replay a gesture script against a puzzle and print the result
    Play {
        /// Puzzle selection
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Gesture script file (TOML, `[[gesture]]` tables)
        #[arg(short, long)]
        script: PathBuf,

        /// Exit with an error unless every zone is complete
        #[arg(long)]
        require_complete: bool,
    },

    /// Print a JSON schema
    Schema {
        /// Print the puzzle fixture schema instead of the snapshot schema
        #[arg(long)]
        fixture: bool,
    },
}
