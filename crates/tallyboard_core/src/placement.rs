//! Placement state: the authoritative token collection for a session.
//!
//! `Placement` is the single writer of token positions. Reads go through
//! slices so the scoring engine always sees the live state.

use super::types::{Bounds, CellSlot, Grid, Point, Token, TokenId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Owned token collection plus the positions it was created with.
///
/// The token set is fixed for the lifetime of the value; only positions
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<P> {
    tokens: Vec<Token<P>>,
    initial: Vec<P>,
}

impl<P: Clone> Placement<P> {
    /// Creates a placement whose current positions are also its reset positions.
    pub fn new(tokens: Vec<Token<P>>) -> Self {
        let initial = tokens.iter().map(|token| token.position.clone()).collect();
        Self { tokens, initial }
    }

    /// All tokens in fixture order.
    pub fn tokens(&self) -> &[Token<P>] {
        &self.tokens
    }

    /// Looks up a token by id.
    pub fn token(&self, id: &TokenId) -> Option<&Token<P>> {
        self.tokens.iter().find(|token| &token.id == id)
    }

    /// Current position of a token.
    pub fn position(&self, id: &TokenId) -> Option<&P> {
        self.token(id).map(|token| &token.position)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Restores every token to its initial position. Idempotent.
    #[instrument(skip(self), fields(tokens = self.tokens.len()))]
    pub fn reset_all(&mut self) {
        for (token, initial) in self.tokens.iter_mut().zip(&self.initial) {
            token.position = initial.clone();
        }
        debug!("Placement reset");
    }

    fn index_of(&self, id: &TokenId) -> Option<usize> {
        self.tokens.iter().position(|token| &token.id == id)
    }

    #[cfg(test)]
    pub(crate) fn tokens_mut(&mut self) -> &mut [Token<P>] {
        &mut self.tokens
    }
}

// ─────────────────────────────────────────────────────────────
//  Freeform placement
// ─────────────────────────────────────────────────────────────

impl Placement<Point> {
    /// Moves a token to `to`, clamped into `bounds`.
    ///
    /// Returns false (and changes nothing) if the id is unknown.
    #[instrument(skip(self, bounds), fields(token = %id))]
    pub fn move_token(&mut self, id: &TokenId, to: Point, bounds: &Bounds) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("Ignoring move of unknown token");
            return false;
        };
        self.tokens[index].position = bounds.clamp(to);
        true
    }
}

// ─────────────────────────────────────────────────────────────
//  Grid placement
// ─────────────────────────────────────────────────────────────

/// Why a grid placement was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// No token has the given id.
    #[display("unknown token")]
    UnknownToken,
    /// The cell index is outside the grid.
    #[display("cell {} is off the grid", _0)]
    OffGrid(usize),
}

/// What a grid placement did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceOutcome {
    /// The token moved to an empty cell or to the tray.
    Moved,
    /// The target was occupied; the occupant took the mover's old slot.
    Swapped {
        /// Token that was pushed out of the target cell.
        displaced: TokenId,
    },
    /// The token was already there.
    Unchanged,
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl PlaceOutcome {
    /// Returns true if any token position changed.
    pub fn changed(&self) -> bool {
        matches!(self, PlaceOutcome::Moved | PlaceOutcome::Swapped { .. })
    }
}

impl Placement<CellSlot> {
    /// Creates a grid placement with every token unplaced.
    pub fn unplaced(tokens: impl IntoIterator<Item = (TokenId, i64)>) -> Self {
        Self::new(
            tokens
                .into_iter()
                .map(|(id, value)| Token::new(id, value, CellSlot::Unplaced))
                .collect(),
        )
    }

    /// Token occupying a cell, if any.
    pub fn occupant(&self, cell: usize) -> Option<&TokenId> {
        self.tokens
            .iter()
            .find(|token| token.position == CellSlot::At(cell))
            .map(|token| &token.id)
    }

    /// Places a token on a cell or back in the tray.
    ///
    /// If another token holds the target cell the two swap slots in a single
    /// step, so no two tokens ever share a cell.
    #[instrument(skip(self, grid), fields(token = %id, to = %to))]
    pub fn place_token(&mut self, id: &TokenId, to: CellSlot, grid: &Grid) -> PlaceOutcome {
        let Some(mover) = self.index_of(id) else {
            debug!("Ignoring placement of unknown token");
            return PlaceOutcome::Ignored(IgnoreReason::UnknownToken);
        };
        if let CellSlot::At(cell) = to
            && !grid.contains(cell)
        {
            debug!(cell, "Ignoring placement off the grid");
            return PlaceOutcome::Ignored(IgnoreReason::OffGrid(cell));
        }

        let from = self.tokens[mover].position;
        if from == to {
            return PlaceOutcome::Unchanged;
        }

        let occupant = match to {
            CellSlot::At(cell) => self
                .tokens
                .iter()
                .position(|token| token.position == CellSlot::At(cell)),
            CellSlot::Unplaced => None,
        };

        self.tokens[mover].position = to;
        match occupant {
            Some(other) => {
                self.tokens[other].position = from;
                let displaced = self.tokens[other].id.clone();
                debug!(displaced = %displaced, "Swapped tokens");
                PlaceOutcome::Swapped { displaced }
            }
            None => PlaceOutcome::Moved,
        }
    }
}
