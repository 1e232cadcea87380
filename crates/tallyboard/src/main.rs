//! Tallyboard - unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command, PuzzleArgs};
use tallyboard::{load_script, render_json, render_text, replay, resolve_puzzle};
use tallyboard_core::{AnySnapshot, PuzzleFixture, Session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Show { puzzle } => run_show(puzzle),
        Command::Play {
            puzzle,
            script,
            require_complete,
        } => run_play(puzzle, script, require_complete),
        Command::Schema { fixture } => run_schema(fixture),
    }
}

/// Print the starting state of a puzzle
#[instrument]
fn run_show(args: PuzzleArgs) -> Result<()> {
    let session = open_session(&args)?;
    print_snapshot(&session.snapshot(), args.json)
}

/// Replay a script and print the final state
#[instrument]
fn run_play(args: PuzzleArgs, script: std::path::PathBuf, require_complete: bool) -> Result<()> {
    let mut session = open_session(&args)?;
    let script = load_script(&script)?;
    replay(&mut session, &script);
    print_snapshot(&session.snapshot(), args.json)?;

    if require_complete && !session.all_complete() {
        bail!("puzzle is not complete");
    }
    Ok(())
}

/// Print the JSON schema of snapshots or fixtures
fn run_schema(fixture: bool) -> Result<()> {
    let schema = if fixture {
        schemars::schema_for!(PuzzleFixture)
    } else {
        schemars::schema_for!(AnySnapshot)
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn open_session(args: &PuzzleArgs) -> Result<Session> {
    let fixture = resolve_puzzle(args.puzzle.as_deref(), args.builtin)?;
    let session = Session::new(fixture)?;
    info!("Session ready");
    Ok(session)
}

fn print_snapshot(snapshot: &AnySnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(snapshot)?);
    } else {
        print!("{}", render_text(snapshot));
    }
    Ok(())
}
