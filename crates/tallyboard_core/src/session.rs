//! Puzzle sessions: one owned state object per running puzzle.
//!
//! A session owns the placement state, the immutable zone fixtures and the
//! controller for its variant. All mutation goes through its gesture
//! methods; everything else is read-only.

use super::fixture::{FixtureError, FreeformFixture, GridFixture, PuzzleFixture};
use super::gesture::Gesture;
use super::interaction::{FreeDrag, Interaction, PickAndPlace};
use super::invariants::{FreeformInvariants, GridInvariants, InvariantSet};
use super::placement::{PlaceOutcome, Placement};
use super::snapshot::{AnySnapshot, Snapshot};
use super::types::{Bounds, CellSlot, Grid, Point, Token, TokenId};
use super::zone::{self, CellArea, CircleRegion, ZoneStatus};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Freeform
// ─────────────────────────────────────────────────────────────

/// Running freeform puzzle.
#[derive(Debug, Clone)]
pub struct FreeformSession {
    placement: Placement<Point>,
    regions: Vec<CircleRegion>,
    bounds: Bounds,
    drag: FreeDrag,
}

impl FreeformSession {
    /// Validates a fixture and builds a session from it.
    ///
    /// Starting positions outside the play area are clamped in.
    #[instrument(skip(fixture))]
    pub fn new(fixture: FreeformFixture) -> Result<Self, FixtureError> {
        fixture.validate()?;
        let bounds = Bounds::new(fixture.play_area, fixture.token_radius);
        let tokens = fixture
            .tokens
            .into_iter()
            .map(|spec| {
                let start = bounds.clamp(Point::new(spec.x, spec.y));
                Token::new(spec.id, spec.value, start)
            })
            .collect();
        let regions = fixture
            .regions
            .into_iter()
            .map(|spec| {
                let center = Point::new(spec.x, spec.y);
                CircleRegion::new(spec.id, center, spec.radius, spec.target)
            })
            .collect::<Vec<_>>();
        let session = Self {
            placement: Placement::new(tokens),
            regions,
            bounds,
            drag: FreeDrag::new(),
        };
        info!(
            tokens = session.placement.len(),
            regions = session.regions.len(),
            "Freeform session created"
        );
        Ok(session)
    }

    /// Token collection.
    pub fn placement(&self) -> &Placement<Point> {
        &self.placement
    }

    /// Scoring regions.
    pub fn regions(&self) -> &[CircleRegion] {
        &self.regions
    }

    /// Clamping bounds.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Current gesture state.
    pub fn interaction(&self) -> &Interaction {
        self.drag.state()
    }

    /// Grabs a token. Ignored while another drag is active or for unknown ids.
    pub fn drag_start(&mut self, token: TokenId, pointer: Point) -> bool {
        self.drag.drag_start(&self.placement, token, pointer)
    }

    /// Follows the pointer with the dragged token.
    pub fn drag_move(&mut self, pointer: Point) -> bool {
        self.drag.drag_move(&mut self.placement, pointer, &self.bounds)
    }

    /// Releases the dragged token.
    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    /// Drops any drag and returns every token to its starting position.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.drag.drag_end();
        self.placement.reset_all();
        info!("Freeform session reset");
    }

    /// Applies one gesture; grid-only gestures are ignored.
    #[instrument(skip(self))]
    pub fn apply(&mut self, gesture: &Gesture) {
        if gesture.is_grid() {
            debug!("Ignoring grid gesture on freeform board");
            return;
        }
        let was_complete = self.all_complete();
        match (gesture, gesture.pointer()) {
            (Gesture::DragStart { token, .. }, Some(pointer)) => {
                self.drag_start(token.clone(), pointer);
            }
            (Gesture::DragMove { .. }, Some(pointer)) => {
                self.drag_move(pointer);
            }
            (Gesture::Reset, _) => self.reset(),
            // DragEnd and Cancel
            _ => self.drag_end(),
        }
        self.assert_invariants();
        announce_completion(was_complete, self.all_complete());
    }

    /// Per-region scoring.
    pub fn statuses(&self) -> Vec<ZoneStatus> {
        let tokens = self.placement.tokens();
        self.regions
            .iter()
            .map(|region| ZoneStatus::measure(tokens, region))
            .collect()
    }

    /// Returns true if every region is complete.
    pub fn all_complete(&self) -> bool {
        zone::all_complete(self.placement.tokens(), &self.regions)
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self) -> Snapshot<Point> {
        Snapshot::capture(&self.placement, &self.regions, self.drag.state())
    }

    fn assert_invariants(&self) {
        let result = FreeformInvariants::check_all(self);
        if let Err(violations) = &result {
            warn!(?violations, "Freeform invariants violated");
        }
        debug_assert!(result.is_ok(), "Freeform invariants violated: {:?}", result);
    }

    #[cfg(test)]
    pub(crate) fn placement_mut_for_tests(&mut self) -> &mut Placement<Point> {
        &mut self.placement
    }
}

// ─────────────────────────────────────────────────────────────
//  Grid
// ─────────────────────────────────────────────────────────────

/// Running grid puzzle.
#[derive(Debug, Clone)]
pub struct GridSession {
    placement: Placement<CellSlot>,
    areas: Vec<CellArea>,
    grid: Grid,
    pick: PickAndPlace,
}

impl GridSession {
    /// Validates a fixture and builds a session with every token unplaced.
    #[instrument(skip(fixture))]
    pub fn new(fixture: GridFixture) -> Result<Self, FixtureError> {
        fixture.validate()?;
        let placement = Placement::unplaced(
            fixture
                .tokens
                .into_iter()
                .map(|spec| (spec.id, spec.value)),
        );
        let areas = fixture
            .areas
            .into_iter()
            .map(|spec| CellArea::new(spec.id, spec.cells, spec.target))
            .collect::<Vec<_>>();
        let session = Self {
            placement,
            areas,
            grid: fixture.grid,
            pick: PickAndPlace::new(),
        };
        info!(
            tokens = session.placement.len(),
            areas = session.areas.len(),
            cells = session.grid.cell_count(),
            "Grid session created"
        );
        Ok(session)
    }

    /// Token collection.
    pub fn placement(&self) -> &Placement<CellSlot> {
        &self.placement
    }

    /// Scoring areas.
    pub fn areas(&self) -> &[CellArea] {
        &self.areas
    }

    /// Grid dimensions.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current gesture state.
    pub fn interaction(&self) -> &Interaction {
        self.pick.state()
    }

    /// Selects a token, replacing any earlier selection.
    pub fn select(&mut self, token: TokenId) -> bool {
        self.pick.select(&self.placement, token)
    }

    /// Clicks a cell: selects its occupant, deselects, or places the selection.
    pub fn click_cell(&mut self, cell: usize) -> Option<PlaceOutcome> {
        self.pick.click_cell(&mut self.placement, cell, &self.grid)
    }

    /// Clicks the tray: unplaces the selected token.
    pub fn click_tray(&mut self) -> Option<PlaceOutcome> {
        self.pick.click_tray(&mut self.placement, &self.grid)
    }

    /// Drops a token straight onto a slot.
    pub fn drop_token(&mut self, token: &TokenId, to: CellSlot) -> PlaceOutcome {
        self.pick.drop_token(&mut self.placement, token, to, &self.grid)
    }

    /// Clears the selection and sends every token back to the tray.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.pick.cancel();
        self.placement.reset_all();
        info!("Grid session reset");
    }

    /// Applies one gesture; freeform-only gestures are ignored.
    #[instrument(skip(self))]
    pub fn apply(&mut self, gesture: &Gesture) {
        if gesture.is_freeform() {
            debug!("Ignoring freeform gesture on grid");
            return;
        }
        let was_complete = self.all_complete();
        match (gesture, gesture.drop_slot()) {
            (Gesture::Drop { token, .. }, Some(to)) => {
                self.drop_token(token, to);
            }
            (Gesture::Select { token }, _) => {
                self.select(token.clone());
            }
            (Gesture::ClickCell { cell }, _) => {
                self.click_cell(*cell);
            }
            (Gesture::ClickTray, _) => {
                self.click_tray();
            }
            (Gesture::Reset, _) => self.reset(),
            // Cancel
            _ => self.pick.cancel(),
        }
        self.assert_invariants();
        announce_completion(was_complete, self.all_complete());
    }

    /// Per-area scoring.
    pub fn statuses(&self) -> Vec<ZoneStatus> {
        let tokens = self.placement.tokens();
        self.areas
            .iter()
            .map(|area| ZoneStatus::measure(tokens, area))
            .collect()
    }

    /// Returns true if every area is complete.
    pub fn all_complete(&self) -> bool {
        zone::all_complete(self.placement.tokens(), &self.areas)
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self) -> Snapshot<CellSlot> {
        Snapshot::capture(&self.placement, &self.areas, self.pick.state())
    }

    fn assert_invariants(&self) {
        let result = GridInvariants::check_all(self);
        if let Err(violations) = &result {
            warn!(?violations, "Grid invariants violated");
        }
        debug_assert!(result.is_ok(), "Grid invariants violated: {:?}", result);
    }

    #[cfg(test)]
    pub(crate) fn placement_mut_for_tests(&mut self) -> &mut Placement<CellSlot> {
        &mut self.placement
    }
}

fn announce_completion(was_complete: bool, is_complete: bool) {
    if is_complete && !was_complete {
        info!("Puzzle complete");
    } else if was_complete && !is_complete {
        debug!("Puzzle no longer complete");
    }
}

// ─────────────────────────────────────────────────────────────
//  Either variant
// ─────────────────────────────────────────────────────────────

/// A session of either variant, for callers that load arbitrary fixtures.
#[derive(Debug, Clone)]
pub enum Session {
    /// Freeform board.
    Freeform(FreeformSession),
    /// Grid board.
    Grid(GridSession),
}

impl Session {
    /// Builds a session from a fixture of either variant.
    pub fn new(fixture: PuzzleFixture) -> Result<Self, FixtureError> {
        match fixture {
            PuzzleFixture::Freeform(fixture) => {
                FreeformSession::new(fixture).map(Session::Freeform)
            }
            PuzzleFixture::Grid(fixture) => GridSession::new(fixture).map(Session::Grid),
        }
    }

    /// Applies one gesture.
    pub fn apply(&mut self, gesture: &Gesture) {
        match self {
            Session::Freeform(session) => session.apply(gesture),
            Session::Grid(session) => session.apply(gesture),
        }
    }

    /// Resets every token.
    pub fn reset(&mut self) {
        match self {
            Session::Freeform(session) => session.reset(),
            Session::Grid(session) => session.reset(),
        }
    }

    /// Per-zone scoring.
    pub fn statuses(&self) -> Vec<ZoneStatus> {
        match self {
            Session::Freeform(session) => session.statuses(),
            Session::Grid(session) => session.statuses(),
        }
    }

    /// Returns true if every zone is complete.
    pub fn all_complete(&self) -> bool {
        match self {
            Session::Freeform(session) => session.all_complete(),
            Session::Grid(session) => session.all_complete(),
        }
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self) -> AnySnapshot {
        match self {
            Session::Freeform(session) => AnySnapshot::Freeform(session.snapshot()),
            Session::Grid(session) => AnySnapshot::Grid(session.snapshot()),
        }
    }
}

impl From<FreeformSession> for Session {
    fn from(session: FreeformSession) -> Self {
        Session::Freeform(session)
    }
}

impl From<GridSession> for Session {
    fn from(session: GridSession) -> Self {
        Session::Grid(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_solution_completes() {
        let mut session = GridSession::new(GridFixture::sampler()).unwrap();
        assert!(!session.all_complete());
        for (token, cell) in [("a", 4), ("b", 7), ("c", 0), ("d", 1), ("e", 3), ("f", 12)] {
            session.apply(&Gesture::Drop {
                token: token.into(),
                cell: Some(cell),
            });
        }
        assert!(session.all_complete());
        assert!(session.statuses().iter().all(|status| *status.complete()));

        session.apply(&Gesture::Reset);
        assert!(!session.all_complete());
    }

    #[test]
    fn test_grid_ignores_freeform_gestures() {
        let mut session = GridSession::new(GridFixture::sampler()).unwrap();
        let before = session.snapshot();
        session.apply(&Gesture::DragStart {
            token: "a".into(),
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_freeform_ignores_grid_gestures() {
        let mut session = FreeformSession::new(FreeformFixture::classic()).unwrap();
        let before = session.snapshot();
        session.apply(&Gesture::ClickCell { cell: 0 });
        session.apply(&Gesture::Drop {
            token: "t1".into(),
            cell: Some(0),
        });
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_cancel_gesture_clears_interaction() {
        let mut freeform = FreeformSession::new(FreeformFixture::classic()).unwrap();
        freeform.apply(&Gesture::DragStart {
            token: "t2".into(),
            x: 150.0,
            y: 210.0,
        });
        assert!(!freeform.interaction().is_idle());
        freeform.apply(&Gesture::Cancel);
        assert!(freeform.interaction().is_idle());

        let mut grid = GridSession::new(GridFixture::sampler()).unwrap();
        grid.apply(&Gesture::Select { token: "a".into() });
        assert!(!grid.interaction().is_idle());
        grid.apply(&Gesture::Cancel);
        assert!(grid.interaction().is_idle());
    }

    #[test]
    fn test_reset_cancels_drag() {
        let mut session = FreeformSession::new(FreeformFixture::classic()).unwrap();
        session.drag_start("t3".into(), Point::new(150.0, 270.0));
        session.drag_move(Point::new(500.0, 300.0));
        session.reset();
        assert!(session.interaction().is_idle());
        assert_eq!(
            session.placement().position(&"t3".into()),
            Some(&Point::new(150.0, 270.0))
        );
    }

    #[test]
    fn test_freeform_start_positions_are_clamped() {
        let mut fixture = FreeformFixture::classic();
        fixture.tokens[0].x = -100.0;
        let session = FreeformSession::new(fixture).unwrap();
        assert_eq!(
            session.placement().position(&"t1".into()),
            Some(&Point::new(105.0, 150.0))
        );
    }

    #[test]
    fn test_session_from_tagged_fixture() {
        let session = Session::new(PuzzleFixture::Grid(GridFixture::sampler())).unwrap();
        assert!(matches!(session, Session::Grid(_)));
        assert_eq!(session.statuses().len(), 4);
    }
}
