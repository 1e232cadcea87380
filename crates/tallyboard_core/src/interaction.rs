//! Interaction controllers: turn pointer gestures into placement mutations.
//!
//! Transient gesture state lives in one small state machine,
//! [`Interaction`]. Each controller only ever enters the states its variant
//! uses: free dragging moves through `Idle -> Dragging -> Idle`, pick and
//! place through `Idle -> Selected -> Idle`.

use super::placement::{PlaceOutcome, Placement};
use super::types::{Bounds, CellSlot, Grid, Offset, Point, TokenId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Transient gesture state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Nothing held or selected.
    #[default]
    Idle,
    /// A grid token is selected and waits for a destination.
    Selected(TokenId),
    /// A freeform token follows the pointer.
    Dragging {
        /// Token being dragged.
        token: TokenId,
        /// Pointer position minus token position at grab time.
        grab: Offset,
    },
}

impl Interaction {
    /// Token currently held or selected.
    pub fn active_token(&self) -> Option<&TokenId> {
        match self {
            Interaction::Idle => None,
            Interaction::Selected(token) => Some(token),
            Interaction::Dragging { token, .. } => Some(token),
        }
    }

    /// Returns true if nothing is held or selected.
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

// ─────────────────────────────────────────────────────────────
//  Free drag (freeform board)
// ─────────────────────────────────────────────────────────────

/// Drag controller for the freeform board.
///
/// At most one token is dragged at a time; a second `drag_start` before
/// `drag_end` is ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreeDrag {
    state: Interaction,
}

impl FreeDrag {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Token being dragged, if any.
    pub fn dragging(&self) -> Option<&TokenId> {
        match &self.state {
            Interaction::Dragging { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Grabs a token at `pointer`. Returns true if the drag started.
    #[instrument(skip(self, placement), fields(token = %token, pointer = %pointer))]
    pub fn drag_start(
        &mut self,
        placement: &Placement<Point>,
        token: TokenId,
        pointer: Point,
    ) -> bool {
        if !self.state.is_idle() {
            debug!(active = ?self.state.active_token(), "Drag already in progress");
            return false;
        }
        let Some(position) = placement.position(&token) else {
            debug!("Ignoring drag of unknown token");
            return false;
        };
        let grab = pointer.offset_from(position);
        self.state = Interaction::Dragging { token, grab };
        true
    }

    /// Moves the dragged token so it keeps its grab offset under `pointer`.
    ///
    /// Does nothing when no drag is active.
    #[instrument(level = "trace", skip(self, placement, bounds), fields(pointer = %pointer))]
    pub fn drag_move(
        &mut self,
        placement: &mut Placement<Point>,
        pointer: Point,
        bounds: &Bounds,
    ) -> bool {
        let Interaction::Dragging { token, grab } = &self.state else {
            return false;
        };
        placement.move_token(token, pointer.minus(*grab), bounds)
    }

    /// Releases the dragged token.
    #[instrument(skip(self))]
    pub fn drag_end(&mut self) {
        if let Interaction::Dragging { token, .. } = &self.state {
            debug!(token = %token, "Drag ended");
        }
        self.state = Interaction::Idle;
    }
}

// ─────────────────────────────────────────────────────────────
//  Pick and place (grid)
// ─────────────────────────────────────────────────────────────

/// Selection controller for the grid.
///
/// Supports click-to-select then click-to-place, and direct drop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PickAndPlace {
    state: Interaction,
}

impl PickAndPlace {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> &Interaction {
        &self.state
    }

    /// Selected token, if any.
    pub fn selected(&self) -> Option<&TokenId> {
        match &self.state {
            Interaction::Selected(token) => Some(token),
            _ => None,
        }
    }

    /// Selects a token directly, replacing any prior selection.
    ///
    /// Unknown ids leave the state untouched.
    #[instrument(skip(self, placement), fields(token = %token))]
    pub fn select(&mut self, placement: &Placement<CellSlot>, token: TokenId) -> bool {
        if placement.token(&token).is_none() {
            debug!("Ignoring selection of unknown token");
            return false;
        }
        self.state = Interaction::Selected(token);
        true
    }

    /// Handles a click on a grid cell.
    ///
    /// Idle: selects the occupant, if any. Selected: clicking the selected
    /// token's own cell deselects, any other cell places the token there.
    #[instrument(skip(self, placement, grid))]
    pub fn click_cell(
        &mut self,
        placement: &mut Placement<CellSlot>,
        cell: usize,
        grid: &Grid,
    ) -> Option<PlaceOutcome> {
        match std::mem::take(&mut self.state) {
            Interaction::Selected(token) => {
                if placement.position(&token) == Some(&CellSlot::At(cell)) {
                    debug!(token = %token, "Deselected");
                    return None;
                }
                Some(placement.place_token(&token, CellSlot::At(cell), grid))
            }
            other => {
                self.state = other;
                if let Some(occupant) = placement.occupant(cell) {
                    self.state = Interaction::Selected(occupant.clone());
                }
                None
            }
        }
    }

    /// Sends the selected token back to the tray.
    #[instrument(skip(self, placement, grid))]
    pub fn click_tray(
        &mut self,
        placement: &mut Placement<CellSlot>,
        grid: &Grid,
    ) -> Option<PlaceOutcome> {
        match std::mem::take(&mut self.state) {
            Interaction::Selected(token) => {
                Some(placement.place_token(&token, CellSlot::Unplaced, grid))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drops a dragged token straight onto a slot, clearing any selection.
    #[instrument(skip(self, placement, grid), fields(token = %token, to = %to))]
    pub fn drop_token(
        &mut self,
        placement: &mut Placement<CellSlot>,
        token: &TokenId,
        to: CellSlot,
        grid: &Grid,
    ) -> PlaceOutcome {
        self.state = Interaction::Idle;
        placement.place_token(token, to, grid)
    }

    /// Clears the selection.
    pub fn cancel(&mut self) {
        self.state = Interaction::Idle;
    }
}
