//! Loading puzzle fixtures and gesture scripts from TOML files.

use clap::ValueEnum;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tallyboard_core::{FreeformFixture, Gesture, GridFixture, PuzzleFixture};
use tracing::{debug, info, instrument};

/// File loading error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Load error: {} at {}:{}", message, file, line)]
pub struct LoadError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LoadError {
    /// Creates a new load error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LoadError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for LoadError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("TOML error: {}", err))
    }
}

impl From<tallyboard_core::FixtureError> for LoadError {
    #[track_caller]
    fn from(err: tallyboard_core::FixtureError) -> Self {
        Self::new(format!("Invalid puzzle: {}", err.message))
    }
}

/// Puzzles shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Builtin {
    /// Nine tokens, six overlapping circles.
    #[default]
    Freeform,
    /// Six tokens on a 5x5 grid.
    Grid,
}

impl Builtin {
    /// The fixture for this builtin.
    pub fn fixture(self) -> PuzzleFixture {
        match self {
            Builtin::Freeform => PuzzleFixture::Freeform(FreeformFixture::classic()),
            Builtin::Grid => PuzzleFixture::Grid(GridFixture::sampler()),
        }
    }
}

/// Loads and validates a puzzle fixture from a TOML file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_puzzle(path: impl AsRef<Path>) -> Result<PuzzleFixture, LoadError> {
    debug!("Loading puzzle from file");
    let content = std::fs::read_to_string(path.as_ref())?;
    let fixture: PuzzleFixture = toml::from_str(&content)?;
    fixture.validate()?;
    info!("Puzzle loaded successfully");
    Ok(fixture)
}

/// Picks the puzzle file if one was given, otherwise the builtin.
pub fn resolve_puzzle(
    path: Option<&Path>,
    builtin: Builtin,
) -> Result<PuzzleFixture, LoadError> {
    match path {
        Some(path) => load_puzzle(path),
        None => Ok(builtin.fixture()),
    }
}

/// A recorded sequence of gestures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    /// Gestures in the order they are applied.
    #[serde(rename = "gesture", default)]
    pub gestures: Vec<Gesture>,
}

/// Loads a gesture script from a TOML file of `[[gesture]]` tables.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_script(path: impl AsRef<Path>) -> Result<Script, LoadError> {
    debug!("Loading script from file");
    let content = std::fs::read_to_string(path.as_ref())?;
    let script: Script = toml::from_str(&content)?;
    info!(gestures = script.gestures.len(), "Script loaded successfully");
    Ok(script)
}
