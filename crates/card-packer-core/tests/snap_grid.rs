use card_packer_core::prelude::*;

fn space_with_grid(grid: Option<f64>) -> SpaceConfig {
    SpaceConfig {
        width: 500.0,
        top_padding: 45.0, // deliberately off-grid
        side_padding: 15.0,
        snap_grid: grid,
        ..Default::default()
    }
}

fn off_grid_cards() -> Vec<Card> {
    vec![
        Card::new("a".to_string(), 93.0, 47.0, 3.0).unwrap(),
        Card::new("b".to_string(), 61.0, 33.0, 0.0).unwrap(),
        Card::new("c".to_string(), 121.0, 59.0, 7.0).unwrap(),
    ]
}

fn is_multiple_of(v: f64, grid: f64) -> bool {
    let r = (v / grid).round() * grid;
    (v - r).abs() < 1e-9
}

#[test]
fn movables_land_on_grid_multiples() {
    let layout = place_cards(off_grid_cards(), vec![], &space_with_grid(Some(20.0))).unwrap();
    for p in &layout.placed {
        assert!(
            is_multiple_of(p.pos.x, 20.0) && is_multiple_of(p.pos.y, 20.0),
            "{} not snapped: ({}, {})",
            p.card.key(),
            p.pos.x,
            p.pos.y
        );
    }
}

#[test]
fn pinned_cards_are_never_snapped() {
    let pinned = PinnedCard::new(
        Card::new("F".to_string(), 80.0, 40.0, 0.0).unwrap(),
        Point::new(33.0, 57.0), // off-grid on purpose
    );
    let layout =
        place_cards(off_grid_cards(), vec![pinned], &space_with_grid(Some(20.0))).unwrap();
    assert_eq!(layout.placed[0].pos, Point::new(33.0, 57.0));
}

#[test]
fn extent_is_recomputed_after_snapping() {
    let layout = place_cards(off_grid_cards(), vec![], &space_with_grid(Some(20.0))).unwrap();
    let expected = layout
        .placed
        .iter()
        .map(|p| p.effective_region().bottom())
        .fold(layout.space.top_bound(), f64::max);
    assert!((layout.extent - expected).abs() < 1e-9);
}

#[test]
fn no_grid_means_no_snapping() {
    let with = place_cards(off_grid_cards(), vec![], &space_with_grid(None)).unwrap();
    // bottom-left seats the first (tallest) card at the exact corner
    assert_eq!(with.placed[0].card.key(), "c");
    assert_eq!(with.placed[0].pos, Point::new(22.0, 52.0));
}
