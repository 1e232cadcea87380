//! Grid occupancy invariants.

use super::Invariant;
use crate::session::GridSession;
use std::collections::HashSet;

/// Invariant: no two tokens share a cell.
pub struct SingleOccupancy;

impl Invariant<GridSession> for SingleOccupancy {
    fn holds(session: &GridSession) -> bool {
        let mut seen = HashSet::new();
        session
            .placement()
            .tokens()
            .iter()
            .filter_map(|token| token.position.index())
            .all(|cell| seen.insert(cell))
    }

    fn description() -> &'static str {
        "At most one token occupies each cell"
    }
}

/// Invariant: every placed token sits on a cell of the grid.
pub struct CellsOnGrid;

impl Invariant<GridSession> for CellsOnGrid {
    fn holds(session: &GridSession) -> bool {
        let grid = session.grid();
        session
            .placement()
            .tokens()
            .iter()
            .all(|token| grid.accepts(token.position))
    }

    fn description() -> &'static str {
        "Placed tokens stay on the grid"
    }
}
