//! Scoring zones and the membership-and-scoring engine.
//!
//! A zone is anything that can say whether a token position counts toward
//! it. Circles test distance, cell areas test set membership; every scoring
//! function below is written once against the [`Zone`] trait and recomputes
//! from the live token collection on every call.

use super::types::{CellSlot, Point, Token, ZoneId};
use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// A static scoring zone with a target sum.
pub trait Zone {
    /// Position type of the tokens this zone scores.
    type Position;

    /// Zone identifier.
    fn id(&self) -> &ZoneId;

    /// Sum the member tokens must reach exactly.
    fn target(&self) -> i64;

    /// Returns true if a token at `position` counts toward this zone.
    fn contains(&self, position: &Self::Position) -> bool;
}

// ─────────────────────────────────────────────────────────────
//  Concrete zones
// ─────────────────────────────────────────────────────────────

/// Circular region on the freeform board.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct CircleRegion {
    #[getter(skip)]
    id: ZoneId,
    center: Point,
    radius: f64,
    #[getter(skip)]
    target: i64,
}

impl CircleRegion {
    /// Creates a region. The radius is validated by the fixture loader.
    pub fn new(id: impl Into<ZoneId>, center: Point, radius: f64, target: i64) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
            target,
        }
    }
}

impl Zone for CircleRegion {
    type Position = Point;

    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn target(&self) -> i64 {
        self.target
    }

    // Boundary inclusive.
    fn contains(&self, position: &Point) -> bool {
        position.distance(&self.center) <= self.radius
    }
}

/// Explicit set of grid cells; sets of different areas may overlap.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct CellArea {
    #[getter(skip)]
    id: ZoneId,
    cells: BTreeSet<usize>,
    #[getter(skip)]
    target: i64,
}

impl CellArea {
    /// Creates an area.
    pub fn new(
        id: impl Into<ZoneId>,
        cells: impl IntoIterator<Item = usize>,
        target: i64,
    ) -> Self {
        Self {
            id: id.into(),
            cells: cells.into_iter().collect(),
            target,
        }
    }
}

impl Zone for CellArea {
    type Position = CellSlot;

    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn target(&self) -> i64 {
        self.target
    }

    fn contains(&self, position: &CellSlot) -> bool {
        position
            .index()
            .is_some_and(|index| self.cells.contains(&index))
    }
}

// ─────────────────────────────────────────────────────────────
//  Scoring
// ─────────────────────────────────────────────────────────────

/// Returns true if `token` counts toward `zone`.
pub fn is_member<Z: Zone>(token: &Token<Z::Position>, zone: &Z) -> bool {
    zone.contains(&token.position)
}

/// Tokens currently counting toward `zone`.
pub fn members<'a, Z: Zone>(
    tokens: &'a [Token<Z::Position>],
    zone: &'a Z,
) -> impl Iterator<Item = &'a Token<Z::Position>> + 'a {
    tokens.iter().filter(move |token| is_member(*token, zone))
}

/// Sum of the values of all member tokens; 0 when there are none.
///
/// Saturates at the bounds of `i64`.
#[instrument(level = "trace", skip_all, fields(zone = %zone.id()))]
pub fn zone_sum<Z: Zone>(tokens: &[Token<Z::Position>], zone: &Z) -> i64 {
    members(tokens, zone)
        .map(|token| token.value)
        .fold(0, i64::saturating_add)
}

/// Returns true if the member sum equals the target exactly.
pub fn is_complete<Z: Zone>(tokens: &[Token<Z::Position>], zone: &Z) -> bool {
    zone_sum(tokens, zone) == zone.target()
}

/// Returns true if every zone is complete; vacuously true for no zones.
#[instrument(level = "trace", skip_all, fields(zones = zones.len()))]
pub fn all_complete<Z: Zone>(tokens: &[Token<Z::Position>], zones: &[Z]) -> bool {
    zones.iter().all(|zone| is_complete(tokens, zone))
}

/// How a zone's sum compares to its target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Progress {
    /// Sum is below target.
    Under,
    /// Sum equals target.
    Complete,
    /// Sum exceeds target ("too high").
    Over,
}

impl Progress {
    /// Classifies a sum against a target.
    pub fn of(sum: i64, target: i64) -> Self {
        match sum.cmp(&target) {
            std::cmp::Ordering::Less => Progress::Under,
            std::cmp::Ordering::Equal => Progress::Complete,
            std::cmp::Ordering::Greater => Progress::Over,
        }
    }
}

/// Per-zone scoring readout handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct ZoneStatus {
    id: ZoneId,
    sum: i64,
    target: i64,
    complete: bool,
    progress: Progress,
}

impl ZoneStatus {
    /// Measures a zone against the current tokens.
    pub fn measure<Z: Zone>(tokens: &[Token<Z::Position>], zone: &Z) -> Self {
        let sum = zone_sum(tokens, zone);
        let target = zone.target();
        Self {
            id: zone.id().clone(),
            sum,
            target,
            complete: sum == target,
            progress: Progress::of(sum, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_a() -> CircleRegion {
        CircleRegion::new("A", Point::new(500.0, 300.0), 180.0, 20)
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let region = region_a();
        let on_edge = Token::new("t1", 1, Point::new(680.0, 300.0));
        let just_outside = Token::new("t2", 1, Point::new(680.001, 300.0));
        assert!(is_member(&on_edge, &region));
        assert!(!is_member(&just_outside, &region));
    }

    #[test]
    fn test_empty_zone_sums_to_zero() {
        let tokens = vec![Token::new("t1", 5, Point::new(0.0, 0.0))];
        assert_eq!(zone_sum(&tokens, &region_a()), 0);
    }

    #[test]
    fn test_unplaced_belongs_nowhere() {
        let area = CellArea::new("a", [0, 1, 5, 6], 7);
        let token = Token::new("t", 3, CellSlot::Unplaced);
        assert!(!is_member(&token, &area));
    }

    #[test]
    fn test_overlapping_areas_both_count() {
        let left = CellArea::new("left", [0, 1], 3);
        let right = CellArea::new("right", [1, 2], 3);
        let tokens = vec![Token::new("t", 3, CellSlot::At(1))];
        assert!(is_complete(&tokens, &left));
        assert!(is_complete(&tokens, &right));
    }

    #[test]
    fn test_overshoot_is_not_complete() {
        let area = CellArea::new("a", [0, 1], 5);
        let tokens = vec![
            Token::new("t1", 4, CellSlot::At(0)),
            Token::new("t2", 3, CellSlot::At(1)),
        ];
        let status = ZoneStatus::measure(&tokens, &area);
        assert_eq!(*status.sum(), 7);
        assert!(!*status.complete());
        assert_eq!(*status.progress(), Progress::Over);
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let area = CellArea::new("a", [0, 1], 5);
        let tokens = vec![
            Token::new("t1", i64::MAX, CellSlot::At(0)),
            Token::new("t2", i64::MAX, CellSlot::At(1)),
        ];
        assert_eq!(zone_sum(&tokens, &area), i64::MAX);
        assert_eq!(*ZoneStatus::measure(&tokens, &area).progress(), Progress::Over);
    }

    #[test]
    fn test_all_complete_vacuous() {
        let tokens: Vec<Token<CellSlot>> = Vec::new();
        let zones: Vec<CellArea> = Vec::new();
        assert!(all_complete(&tokens, &zones));
    }

    #[test]
    fn test_progress_display() {
        assert_eq!(Progress::Under.to_string(), "under");
        assert_eq!(Progress::of(3, 3), Progress::Complete);
        assert_eq!(Progress::of(4, 3), Progress::Over);
    }
}
