use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::fmt::Display;
use tracing::{debug, instrument, warn};

use crate::config::SpaceConfig;
use crate::error::{PackError, Result};
use crate::geom::{EPSILON, Region, from_effective};
use crate::model::{Card, Layout, PinnedCard, PlacedCard};
use crate::packer::StripPacker;

#[instrument(skip_all, fields(movable = movable.len(), pinned = pinned.len()))]
/// Places `movable` cards into the strip described by `space`, around any
/// `pinned` cards, and returns the resulting [`Layout`].
///
/// Notes:
/// - Pinned cards are bounds-validated up front; a violation aborts the whole
///   call. A card that cannot be placed is not an error: it lands in
///   `Layout::unplaced` and processing continues.
/// - Movables are seated tallest-first (width as tiebreak); the sort is
///   stable, so equal-sized cards keep their input order and results are
///   deterministic.
/// - In the returned layout, pinned cards come first, then placed movables in
///   processing order.
pub fn place_cards<K: Display>(
    movable: Vec<Card<K>>,
    pinned: Vec<PinnedCard<K>>,
    space: &SpaceConfig,
) -> Result<Layout<K>> {
    space.validate()?;

    let mut packer = StripPacker::new(space.clone());
    let mut placed: Vec<PlacedCard<K>> = Vec::with_capacity(pinned.len() + movable.len());

    for pin in pinned {
        let region = pin.effective_region();
        validate_pinned(&pin, &region, space)?;
        packer.commit(region);
        placed.push(pin.into_placed());
    }

    let mut queue = movable;
    queue.sort_by_key(|c| Reverse((OrderedFloat(c.height()), OrderedFloat(c.width()))));

    let mut unplaced = Vec::new();
    for card in queue {
        let (eff_w, eff_h) = (card.eff_width(), card.eff_height());
        if !packer.can_fit(eff_w) {
            warn!(key = %card.key(), eff_width = eff_w, "card wider than usable space");
            unplaced.push(card);
            continue;
        }
        match packer.find(eff_w, eff_h) {
            Some(eff) => {
                packer.commit(Region::new(eff.x, eff.y, eff_w, eff_h));
                let pos = from_effective(eff, card.padding());
                debug!(key = %card.key(), x = pos.x, y = pos.y, "placed");
                placed.push(PlacedCard {
                    card,
                    pos,
                    pinned: false,
                });
            }
            None => {
                warn!(key = %card.key(), "no feasible slot found");
                unplaced.push(card);
            }
        }
    }

    if let Some(grid) = space.snap_grid {
        snap_to_grid(&mut placed, grid);
    }

    // Recomputed from final positions so the extent stays exact after
    // snapping.
    let extent = placed
        .iter()
        .map(|p| p.effective_region().bottom())
        .fold(space.top_bound(), f64::max);

    Ok(Layout {
        placed,
        extent,
        unplaced,
        space: space.clone(),
    })
}

fn validate_pinned<K: Display>(
    pin: &PinnedCard<K>,
    region: &Region,
    space: &SpaceConfig,
) -> Result<()> {
    let out_of_bounds = region.x < space.left_bound() - EPSILON
        || region.y < space.top_bound() - EPSILON
        || region.right() > space.right_bound() + EPSILON;
    if out_of_bounds {
        return Err(PackError::PinnedOutOfBounds {
            key: pin.card().key().to_string(),
            x: region.x,
            y: region.y,
            w: region.w,
            h: region.h,
            left: space.left_bound(),
            right: space.right_bound(),
            top: space.top_bound(),
        });
    }
    Ok(())
}

/// Rounds the actual position of placed movables to the nearest grid
/// multiple. Pinned cards keep their caller-supplied position.
fn snap_to_grid<K>(placed: &mut [PlacedCard<K>], grid: f64) {
    for p in placed.iter_mut().filter(|p| !p.pinned) {
        p.pos.x = (p.pos.x / grid).round() * grid;
        p.pos.y = (p.pos.y / grid).round() * grid;
    }
}
