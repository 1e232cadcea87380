//! Plain-text and JSON rendering of snapshots.

use std::fmt::Write;
use tallyboard_core::{AnySnapshot, Interaction};

/// Renders a snapshot as a human-readable scoreboard.
pub fn render_text(snapshot: &AnySnapshot) -> String {
    let mut out = String::new();
    let (kind, tokens) = match snapshot {
        AnySnapshot::Freeform(s) => ("Freeform", s.tokens().len()),
        AnySnapshot::Grid(s) => ("Grid", s.tokens().len()),
    };
    let zones = snapshot.zones();
    let _ = writeln!(out, "{} puzzle: {} tokens, {} zones", kind, tokens, zones.len());

    let width = zones
        .iter()
        .map(|zone| zone.id().as_str().len())
        .max()
        .unwrap_or(0);
    for zone in zones {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>4} / {:<4} {}",
            zone.id().as_str(),
            zone.sum(),
            zone.target(),
            zone.progress(),
        );
    }

    match snapshot {
        AnySnapshot::Freeform(s) => {
            for token in s.tokens() {
                let _ = writeln!(
                    out,
                    "  {} ({}) at {}",
                    token.id, token.value, token.position
                );
            }
        }
        AnySnapshot::Grid(s) => {
            for token in s.tokens() {
                let _ = writeln!(
                    out,
                    "  {} ({}) on {}",
                    token.id, token.value, token.position
                );
            }
        }
    }

    match snapshot.interaction() {
        Interaction::Idle => {}
        Interaction::Selected(token) => {
            let _ = writeln!(out, "Selected: {}", token);
        }
        Interaction::Dragging { token, .. } => {
            let _ = writeln!(out, "Dragging: {}", token);
        }
    }

    if snapshot.all_complete() {
        out.push_str("Puzzle complete!\n");
    } else {
        let done = zones.iter().filter(|zone| *zone.complete()).count();
        let _ = writeln!(out, "{} of {} zones complete", done, zones.len());
    }
    out
}

/// Renders a snapshot as pretty JSON.
pub fn render_json(snapshot: &AnySnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallyboard_core::{CellSlot, GridFixture, GridSession};

    #[test]
    fn test_text_lists_every_zone() {
        let session = GridSession::new(GridFixture::sampler()).unwrap();
        let text = render_text(&AnySnapshot::Grid(session.snapshot()));
        assert!(text.starts_with("Grid puzzle: 6 tokens, 4 zones"));
        for id in ["north", "east", "centre", "diagonal"] {
            assert!(text.contains(id), "missing {id} in:\n{text}");
        }
        assert!(text.contains("0 of 4 zones complete"));
    }

    #[test]
    fn test_text_reports_completion() {
        let mut session = GridSession::new(GridFixture::sampler()).unwrap();
        for (token, cell) in [("a", 4), ("b", 7), ("c", 0), ("d", 1), ("e", 3), ("f", 12)] {
            session.drop_token(&token.into(), CellSlot::At(cell));
        }
        let text = render_text(&AnySnapshot::Grid(session.snapshot()));
        assert!(text.ends_with("Puzzle complete!\n"));
    }

    #[test]
    fn test_json_has_zone_statuses() {
        let session = GridSession::new(GridFixture::sampler()).unwrap();
        let json = render_json(&AnySnapshot::Grid(session.snapshot())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["zones"][0]["id"], "north");
        assert_eq!(value["zones"][0]["progress"], "under");
    }
}
