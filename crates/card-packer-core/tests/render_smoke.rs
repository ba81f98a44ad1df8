use card_packer_core::prelude::*;
use image::Rgba;

fn space() -> SpaceConfig {
    SpaceConfig {
        width: 500.0,
        top_padding: 50.0,
        side_padding: 20.0,
        ..Default::default()
    }
}

#[test]
fn canvas_matches_layout_dimensions() {
    let cards = vec![Card::new("a".to_string(), 100.0, 60.0, 5.0).unwrap()];
    let layout = place_cards(cards, vec![], &space()).unwrap();

    let opts = RenderOptions {
        scale: 2.0,
        ..Default::default()
    };
    let img = render_layout(&layout, &opts);
    assert_eq!(img.width(), 1000);
    assert_eq!(img.height(), ((layout.extent + 50.0) * 2.0).ceil() as u32);
}

#[test]
fn card_interior_differs_from_background() {
    let cards = vec![Card::new("a".to_string(), 100.0, 60.0, 0.0).unwrap()];
    let layout = place_cards(cards, vec![], &space()).unwrap();

    let opts = RenderOptions::default();
    let img = render_layout(&layout, &opts);

    let p = layout.placed[0].pos;
    let inside = img.get_pixel((p.x + 50.0) as u32, (p.y + 30.0) as u32);
    assert_ne!(*inside, Rgba(opts.background));

    // a corner of the canvas stays background
    let corner = img.get_pixel(1, img.height() - 1);
    assert_eq!(*corner, Rgba(opts.background));
}

#[test]
fn pinned_cards_render_black() {
    let pinned = PinnedCard::new(
        Card::new("F".to_string(), 80.0, 40.0, 0.0).unwrap(),
        Point::new(100.0, 100.0),
    );
    let layout = place_cards(vec![], vec![pinned], &space()).unwrap();

    let img = render_layout(&layout, &RenderOptions::default());
    let inside = img.get_pixel(140, 120);
    assert_eq!(*inside, Rgba([20, 20, 20, 255]));
}
