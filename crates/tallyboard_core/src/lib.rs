//! Tallyboard core - number-placement puzzle logic
//!
//! Tokens carrying integer values are placed on a play surface; every
//! scoring zone must sum exactly to its target. Two variants share one
//! engine:
//!
//! - **Freeform**: tokens move freely inside a play area and regions are
//!   circles ([`CircleRegion`]).
//! - **Grid**: tokens sit on at most one cell each and areas are cell sets
//!   ([`CellArea`]).
//!
//! # Architecture
//!
//! - **Zone**: the membership capability and pure scoring functions
//! - **Placement**: the owned token collection and its mutation entry points
//! - **Interaction**: gesture state machine driving placement
//! - **Session**: fixture + placement + controller for one running puzzle
//!
//! # Example
//!
//! ```
//! use tallyboard_core::{CellSlot, GridFixture, GridSession};
//!
//! let mut session = GridSession::new(GridFixture::sampler()).unwrap();
//! session.drop_token(&"c".into(), CellSlot::At(0));
//! session.drop_token(&"d".into(), CellSlot::At(1));
//! let north = &session.statuses()[0];
//! assert_eq!(*north.sum(), 7);
//! assert!(*north.complete());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod fixture;
mod gesture;
mod interaction;
mod invariants;
mod placement;
mod session;
mod snapshot;
mod types;
mod zone;

// Crate-level exports - Domain types
pub use types::{Bounds, CellSlot, Grid, Offset, PlayArea, Point, Token, TokenId, ZoneId};

// Crate-level exports - Scoring engine
pub use zone::{
    CellArea, CircleRegion, Progress, Zone, ZoneStatus, all_complete, is_complete, is_member,
    members, zone_sum,
};

// Crate-level exports - Placement state
pub use placement::{IgnoreReason, PlaceOutcome, Placement};

// Crate-level exports - Interaction
pub use gesture::Gesture;
pub use interaction::{FreeDrag, Interaction, PickAndPlace};

// Crate-level exports - Invariants
pub use invariants::{
    CellsOnGrid, FreeformInvariants, GridInvariants, Invariant, InvariantSet, InvariantViolation,
    SingleOccupancy, TokensInBounds, UniqueTokenIds,
};

// Crate-level exports - Fixtures and sessions
pub use fixture::{
    AreaSpec, FixtureError, FreeformFixture, GridFixture, PlacedTokenSpec, PuzzleFixture,
    RegionSpec, TokenSpec,
};
pub use session::{FreeformSession, GridSession, Session};
pub use snapshot::{AnySnapshot, Snapshot};
