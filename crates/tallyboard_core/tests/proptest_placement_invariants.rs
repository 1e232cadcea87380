//! Property-based tests for placement and membership.
//!
//! 1. Freeform moves always land inside the clamped bounds
//! 2. Circle membership is exactly the inclusive distance test
//! 3. Grid placements never put two tokens on one cell
//! 4. A swap exchanges exactly two slots
//! 5. Reset is idempotent

use proptest::prelude::*;
use tallyboard_core::{
    Bounds, CellSlot, CircleRegion, Grid, Placement, PlayArea, Point, Token, TokenId, is_member,
};

// ── Strategies ──────────────────────────────────────────────────────────

const TOKENS: usize = 6;

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

fn grid() -> Grid {
    Grid::new(4, 4)
}

fn grid_placement() -> Placement<CellSlot> {
    Placement::unplaced((0..TOKENS).map(|i| (TokenId::new(format!("t{i}")), i as i64 + 1)))
}

fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e12f64..1e12,
        -2000.0f64..2000.0,
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

fn slot_strategy() -> impl Strategy<Value = CellSlot> {
    prop_oneof![
        1 => Just(CellSlot::Unplaced),
        6 => (0usize..20).prop_map(CellSlot::At),
    ]
}

fn op_strategy() -> impl Strategy<Value = (usize, CellSlot)> {
    (0..TOKENS + 1, slot_strategy())
}

fn occupied_cells(placement: &Placement<CellSlot>) -> Vec<usize> {
    placement
        .tokens()
        .iter()
        .filter_map(|token| token.position.index())
        .collect()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn move_token_stays_in_bounds(x in coordinate(), y in coordinate()) {
        let b = bounds();
        let mut placement = Placement::new(vec![Token::new("t", 1, Point::new(500.0, 300.0))]);
        prop_assert!(placement.move_token(&"t".into(), Point::new(x, y), &b));
        let p = placement.position(&"t".into()).copied().unwrap();
        prop_assert!(p.x >= 80.0 + 25.0 && p.x <= 80.0 + 1200.0 - 25.0);
        prop_assert!(p.y >= 80.0 + 25.0 && p.y <= 80.0 + 700.0 - 25.0);
    }

    #[test]
    fn circle_membership_is_distance_test(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        radius in 1.0f64..500.0,
    ) {
        let region = CircleRegion::new("r", Point::new(0.0, 0.0), radius, 0);
        let token = Token::new("t", 1, Point::new(x, y));
        let distance = (x * x + y * y).sqrt();
        prop_assert_eq!(is_member(&token, &region), distance <= radius);
    }

    #[test]
    fn grid_never_shares_a_cell(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut placement = grid_placement();
        for (index, slot) in ops {
            // Index TOKENS names no token.
            let id = TokenId::new(format!("t{index}"));
            placement.place_token(&id, slot, &grid());

            let mut cells = occupied_cells(&placement);
            let placed = cells.len();
            cells.sort_unstable();
            cells.dedup();
            prop_assert_eq!(cells.len(), placed);
            prop_assert!(cells.iter().all(|cell| grid().contains(*cell)));
        }
    }

    #[test]
    fn swap_touches_only_two_tokens(
        first in 0usize..16,
        second in 0usize..16,
        bystander in 0usize..16,
    ) {
        prop_assume!(first != second && first != bystander && second != bystander);
        let mut placement = grid_placement();
        let g = grid();
        placement.place_token(&"t0".into(), CellSlot::At(first), &g);
        placement.place_token(&"t1".into(), CellSlot::At(second), &g);
        placement.place_token(&"t2".into(), CellSlot::At(bystander), &g);

        placement.place_token(&"t0".into(), CellSlot::At(second), &g);
        prop_assert_eq!(placement.position(&"t0".into()), Some(&CellSlot::At(second)));
        prop_assert_eq!(placement.position(&"t1".into()), Some(&CellSlot::At(first)));
        prop_assert_eq!(placement.position(&"t2".into()), Some(&CellSlot::At(bystander)));
        for i in 3..TOKENS {
            let id = TokenId::new(format!("t{i}"));
            prop_assert_eq!(placement.position(&id), Some(&CellSlot::Unplaced));
        }
    }

    #[test]
    fn reset_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let mut placement = grid_placement();
        for (index, slot) in ops {
            placement.place_token(&TokenId::new(format!("t{index}")), slot, &grid());
        }
        placement.reset_all();
        let once = placement.clone();
        placement.reset_all();
        prop_assert_eq!(&placement, &once);
        prop_assert!(occupied_cells(&once).is_empty());
    }
}
