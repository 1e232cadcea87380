//! Aggregate completion across zones.

use tallyboard_core::{
    CellArea, CellSlot, CircleRegion, Point, Token, all_complete, is_complete, zone_sum,
};

#[test]
fn test_all_complete_is_vacuously_true() {
    let tokens = vec![Token::new("t", 4, Point::new(0.0, 0.0))];
    let regions: Vec<CircleRegion> = Vec::new();
    assert!(all_complete(&tokens, &regions));
}

#[test]
fn test_all_complete_requires_every_zone() {
    let tokens = vec![
        Token::new("a", 3, CellSlot::At(0)),
        Token::new("b", 4, CellSlot::At(1)),
        Token::new("c", 2, CellSlot::Unplaced),
    ];
    let done = CellArea::new("done", [0, 1], 7);
    let open = CellArea::new("open", [2, 3], 2);
    assert!(is_complete(&tokens, &done));
    assert!(!is_complete(&tokens, &open));
    assert!(!all_complete(&tokens, &[done.clone(), open]));
    assert!(all_complete(&tokens, &[done]));
}

#[test]
fn test_sum_counts_exactly_the_members() {
    let region = CircleRegion::new("r", Point::new(0.0, 0.0), 10.0, 0);
    let tokens = vec![
        Token::new("in", 5, Point::new(6.0, 8.0)),
        Token::new("edge", 7, Point::new(0.0, -10.0)),
        Token::new("out", 100, Point::new(7.1, 7.1)),
    ];
    assert_eq!(zone_sum(&tokens, &region), 12);
}
