use card_packer_core::prelude::*;
use rand::{Rng, SeedableRng};

fn cards(seed: u64) -> Vec<Card> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..80)
        .map(|i| {
            let w = rng.gen_range(10..=140) as f64;
            let h = rng.gen_range(10..=110) as f64;
            Card::new(format!("c{}", i), w, h, 3.0).unwrap()
        })
        .collect()
}

fn space(strategy: Strategy) -> SpaceConfig {
    SpaceConfig {
        width: 420.0,
        top_padding: 30.0,
        side_padding: 10.0,
        strategy,
        ..Default::default()
    }
}

#[test]
fn identical_inputs_give_identical_layouts() {
    for strategy in [Strategy::BottomLeft, Strategy::TopRight] {
        let l1 = place_cards(cards(99), vec![], &space(strategy.clone())).unwrap();
        let l2 = place_cards(cards(99), vec![], &space(strategy)).unwrap();

        assert_eq!(l1.placed.len(), l2.placed.len());
        assert_eq!(l1.extent, l2.extent);
        for (a, b) in l1.placed.iter().zip(l2.placed.iter()) {
            assert_eq!(a.card.key(), b.card.key());
            assert_eq!(a.pos, b.pos);
        }
        let u1: Vec<_> = l1.unplaced.iter().map(|c| c.key().clone()).collect();
        let u2: Vec<_> = l2.unplaced.iter().map(|c| c.key().clone()).collect();
        assert_eq!(u1, u2);
    }
}

/// Equal-sized cards keep their input order (the sort is stable).
#[test]
fn ties_keep_input_order() {
    let movable: Vec<Card> = (0..6)
        .map(|i| Card::new(format!("t{}", i), 50.0, 50.0, 0.0).unwrap())
        .collect();
    let layout = place_cards(movable, vec![], &space(Strategy::BottomLeft)).unwrap();

    let keys: Vec<&String> = layout.placed.iter().map(|p| p.card.key()).collect();
    assert_eq!(keys, ["t0", "t1", "t2", "t3", "t4", "t5"]);
}
