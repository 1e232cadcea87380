//! Core domain types: identifiers, coordinates, grid slots and tokens.

use derive_more::{Display, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Identifiers
// ─────────────────────────────────────────────────────────────

/// Stable identifier of a token, unique within a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, From, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a token id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Stable identifier of a region or area, unique within a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, From, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a zone id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ─────────────────────────────────────────────────────────────
//  Continuous coordinates
// ─────────────────────────────────────────────────────────────

/// A point on the freeform play surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Display, Serialize, Deserialize, JsonSchema)]
#[display("({x}, {y})")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset that carries `origin` onto `self`.
    pub fn offset_from(&self, origin: &Point) -> Offset {
        Offset {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }

    /// Moves the point backwards by `offset`.
    pub fn minus(&self, offset: Offset) -> Point {
        Point::new(self.x - offset.dx, self.y - offset.dy)
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Displacement between a pointer and the token it grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Offset {
    /// Horizontal displacement.
    pub dx: f64,
    /// Vertical displacement.
    pub dy: f64,
}

/// Axis-aligned rectangle that freeform tokens live in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayArea {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// Clamping bounds for token centres: the play area shrunk by one token radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    /// The play area rectangle.
    pub area: PlayArea,
    /// Radius of a rendered token.
    pub token_radius: f64,
}

impl Bounds {
    /// Creates bounds from a play area and token radius.
    pub const fn new(area: PlayArea, token_radius: f64) -> Self {
        Self { area, token_radius }
    }

    /// Smallest allowed centre.
    pub fn min(&self) -> Point {
        Point::new(
            self.area.x + self.token_radius,
            self.area.y + self.token_radius,
        )
    }

    /// Largest allowed centre.
    pub fn max(&self) -> Point {
        Point::new(
            self.area.x + self.area.width - self.token_radius,
            self.area.y + self.area.height - self.token_radius,
        )
    }

    /// Clamps each axis of `point` independently into the bounds.
    ///
    /// Never panics: NaN coordinates land on the lower bound.
    #[instrument(level = "trace")]
    pub fn clamp(&self, point: Point) -> Point {
        let (lo, hi) = (self.min(), self.max());
        Point::new(point.x.max(lo.x).min(hi.x), point.y.max(lo.y).min(hi.y))
    }

    /// Returns true if `point` already lies within the bounds.
    pub fn contains(&self, point: &Point) -> bool {
        let (lo, hi) = (self.min(), self.max());
        (lo.x..=hi.x).contains(&point.x) && (lo.y..=hi.y).contains(&point.y)
    }
}

// ─────────────────────────────────────────────────────────────
//  Discrete grid
// ─────────────────────────────────────────────────────────────

/// Where a grid token sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CellSlot {
    /// Not on the grid (in the tray).
    #[default]
    Unplaced,
    /// On the cell with this row-major index.
    At(usize),
}

impl CellSlot {
    /// Returns the cell index, if placed.
    pub fn index(self) -> Option<usize> {
        match self {
            CellSlot::At(index) => Some(index),
            CellSlot::Unplaced => None,
        }
    }

    /// Returns true if the slot is on the grid.
    pub fn is_placed(self) -> bool {
        matches!(self, CellSlot::At(_))
    }
}

impl From<Option<usize>> for CellSlot {
    fn from(cell: Option<usize>) -> Self {
        cell.map_or(CellSlot::Unplaced, CellSlot::At)
    }
}

impl std::fmt::Display for CellSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellSlot::Unplaced => write!(f, "tray"),
            CellSlot::At(index) => write!(f, "cell {}", index),
        }
    }
}

/// Fixed-size rectangular grid; cells are numbered row-major from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Grid {
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl Grid {
    /// Creates a grid.
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells; saturates for dimensions that overflow.
    pub fn cell_count(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    /// Total number of cells, or `None` if the dimensions overflow.
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.cols.checked_mul(self.rows)
    }

    /// Returns true if `index` names a cell of this grid.
    pub fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Returns true if the slot is unplaced or on this grid.
    pub fn accepts(&self, slot: CellSlot) -> bool {
        slot.index().is_none_or(|index| self.contains(index))
    }
}

// ─────────────────────────────────────────────────────────────
//  Tokens
// ─────────────────────────────────────────────────────────────

/// A placeable numbered token.
///
/// `P` is [`Point`] on a freeform board and [`CellSlot`] on a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Token<P> {
    /// Stable identifier.
    pub id: TokenId,
    /// Value contributed to every zone the token belongs to.
    pub value: i64,
    /// Current position.
    pub position: P,
}

impl<P> Token<P> {
    /// Creates a token.
    pub fn new(id: impl Into<TokenId>, value: i64, position: P) -> Self {
        Self {
            id: id.into(),
            value,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(
            PlayArea {
                x: 80.0,
                y: 80.0,
                width: 1200.0,
                height: 700.0,
            },
            25.0,
        )
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_clamp_inside_is_identity() {
        let p = Point::new(500.0, 300.0);
        assert_eq!(bounds().clamp(p), p);
    }

    #[test]
    fn test_clamp_each_axis_independently() {
        let clamped = bounds().clamp(Point::new(-1e9, 400.0));
        assert_eq!(clamped, Point::new(105.0, 400.0));

        let clamped = bounds().clamp(Point::new(2000.0, 2000.0));
        assert_eq!(clamped, Point::new(1255.0, 755.0));
    }

    #[test]
    fn test_clamp_nan_lands_on_lower_bound() {
        let clamped = bounds().clamp(Point::new(f64::NAN, f64::NAN));
        assert_eq!(clamped, bounds().min());
    }

    #[test]
    fn test_grid_accepts() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.cell_count(), 25);
        assert!(grid.accepts(CellSlot::Unplaced));
        assert!(grid.accepts(CellSlot::At(24)));
        assert!(!grid.accepts(CellSlot::At(25)));
    }

    #[test]
    fn test_cell_slot_from_option() {
        assert_eq!(CellSlot::from(Some(3)), CellSlot::At(3));
        assert_eq!(CellSlot::from(None), CellSlot::Unplaced);
    }
}
