//! Freeform bounds invariant.

use super::Invariant;
use crate::session::FreeformSession;

/// Invariant: every token centre lies within the clamped play area.
pub struct TokensInBounds;

impl Invariant<FreeformSession> for TokensInBounds {
    fn holds(session: &FreeformSession) -> bool {
        let bounds = session.bounds();
        session
            .placement()
            .tokens()
            .iter()
            .all(|token| bounds.contains(&token.position))
    }

    fn description() -> &'static str {
        "Token centres stay inside the play area"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FreeformFixture, Point};

    #[test]
    fn test_classic_layout_holds() {
        let session = FreeformSession::new(FreeformFixture::classic()).unwrap();
        assert!(TokensInBounds::holds(&session));
    }

    #[test]
    fn test_detects_escaped_token() {
        let mut session = FreeformSession::new(FreeformFixture::classic()).unwrap();
        session.placement_mut_for_tests().tokens_mut()[0].position = Point::new(0.0, 0.0);
        assert!(!TokensInBounds::holds(&session));
    }
}
