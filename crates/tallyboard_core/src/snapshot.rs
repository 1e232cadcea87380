//! Read-only views handed to the presentation layer.

use super::interaction::Interaction;
use super::placement::Placement;
use super::types::{CellSlot, Point, Token};
use super::zone::{self, Zone, ZoneStatus};
use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything a renderer needs: tokens, per-zone scoring and gesture state.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct Snapshot<P> {
    tokens: Vec<Token<P>>,
    zones: Vec<ZoneStatus>,
    all_complete: bool,
    interaction: Interaction,
}

impl<P: Clone> Snapshot<P> {
    /// Captures the current state.
    pub fn capture<Z: Zone<Position = P>>(
        placement: &Placement<P>,
        zones: &[Z],
        interaction: &Interaction,
    ) -> Self {
        let tokens = placement.tokens();
        Self {
            tokens: tokens.to_vec(),
            zones: zones
                .iter()
                .map(|zone| ZoneStatus::measure(tokens, zone))
                .collect(),
            all_complete: zone::all_complete(tokens, zones),
            interaction: interaction.clone(),
        }
    }
}

/// Snapshot of either variant, tagged by `variant` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum AnySnapshot {
    /// Freeform board.
    Freeform(Snapshot<Point>),
    /// Grid board.
    Grid(Snapshot<CellSlot>),
}

impl AnySnapshot {
    /// Per-zone scoring.
    pub fn zones(&self) -> &[ZoneStatus] {
        match self {
            AnySnapshot::Freeform(snapshot) => snapshot.zones(),
            AnySnapshot::Grid(snapshot) => snapshot.zones(),
        }
    }

    /// Returns true if every zone is complete.
    pub fn all_complete(&self) -> bool {
        match self {
            AnySnapshot::Freeform(snapshot) => *snapshot.all_complete(),
            AnySnapshot::Grid(snapshot) => *snapshot.all_complete(),
        }
    }

    /// Gesture state.
    pub fn interaction(&self) -> &Interaction {
        match self {
            AnySnapshot::Freeform(snapshot) => snapshot.interaction(),
            AnySnapshot::Grid(snapshot) => snapshot.interaction(),
        }
    }
}
