use card_packer_core::geom::{EPSILON, Point, Region, from_effective, to_effective};

#[test]
fn separated_boxes_do_not_overlap() {
    let a = Region::new(0.0, 0.0, 10.0, 10.0);
    let b = Region::new(20.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
    assert!(!b.overlaps(&a));

    let below = Region::new(0.0, 15.0, 10.0, 10.0);
    assert!(!a.overlaps(&below));
}

#[test]
fn overlapping_boxes_overlap() {
    let a = Region::new(0.0, 0.0, 10.0, 10.0);
    let b = Region::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn containment_counts_as_overlap() {
    let outer = Region::new(0.0, 0.0, 100.0, 100.0);
    let inner = Region::new(40.0, 40.0, 10.0, 10.0);
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn touching_edges_do_not_overlap() {
    let a = Region::new(0.0, 0.0, 10.0, 10.0);
    // shares the x=10 edge
    let right = Region::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&right));
    assert!(!right.overlaps(&a));
    // shares the y=10 edge
    let below = Region::new(0.0, 10.0, 10.0, 10.0);
    assert!(!a.overlaps(&below));
    assert!(!below.overlaps(&a));
    // shares only the corner at (10, 10)
    let corner = Region::new(10.0, 10.0, 10.0, 10.0);
    assert!(!a.overlaps(&corner));
}

#[test]
fn sub_tolerance_penetration_is_not_an_overlap() {
    let a = Region::new(0.0, 0.0, 10.0, 10.0);
    let b = Region::new(10.0 - EPSILON / 2.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn past_tolerance_penetration_is_an_overlap() {
    let a = Region::new(0.0, 0.0, 10.0, 10.0);
    let b = Region::new(10.0 - 1e-6, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
}

#[test]
fn effective_transforms_are_inverse() {
    let pos = Point::new(75.0, 60.0);
    let eff = to_effective(pos, 5.0);
    assert_eq!(eff, Point::new(70.0, 55.0));
    let back = from_effective(eff, 5.0);
    assert_eq!(back, pos);

    // zero padding is the identity
    let same = to_effective(pos, 0.0);
    assert_eq!(same, pos);
}
