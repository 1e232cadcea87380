//! Tallyboard - command-line driver for number-placement puzzles
//!
//! Loads puzzle fixtures and gesture scripts from TOML, replays the
//! gestures through a [`tallyboard_core::Session`] and reports the
//! resulting snapshot as text or JSON.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod report;

pub use config::{Builtin, LoadError, Script, load_puzzle, load_script, resolve_puzzle};
pub use report::{render_json, render_text};

use tallyboard_core::Session;
use tracing::{info, instrument};

/// Applies every gesture of a script to a session, in order.
#[instrument(skip_all, fields(gestures = script.gestures.len()))]
pub fn replay(session: &mut Session, script: &Script) {
    for gesture in &script.gestures {
        session.apply(gesture);
    }
    info!(complete = session.all_complete(), "Script replayed");
}
