//! Token identity invariant.

use super::Invariant;
use crate::placement::Placement;
use crate::session::{FreeformSession, GridSession};
use std::collections::HashSet;

/// Invariant: token ids are unique within the session.
pub struct UniqueTokenIds;

fn unique<P: Clone>(placement: &Placement<P>) -> bool {
    let mut seen = HashSet::new();
    placement.tokens().iter().all(|token| seen.insert(&token.id))
}

impl Invariant<FreeformSession> for UniqueTokenIds {
    fn holds(session: &FreeformSession) -> bool {
        unique(session.placement())
    }

    fn description() -> &'static str {
        "Token ids are unique"
    }
}

impl Invariant<GridSession> for UniqueTokenIds {
    fn holds(session: &GridSession) -> bool {
        unique(session.placement())
    }

    fn description() -> &'static str {
        "Token ids are unique"
    }
}
