use serde::Serialize;
use std::fmt::Display;

use crate::config::SpaceConfig;
use crate::error::{PackError, Result};
use crate::geom::{Point, Region, to_effective};

/// Immutable card descriptor: what the caller wants placed.
///
/// `width`/`height` are the drawable size; `padding` is a uniform margin kept
/// clear on all four sides. The engine reasons about the *effective* box
/// (`eff_width` x `eff_height`). A `Card` carries no position; placement
/// output lives in [`PlacedCard`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card<K = String> {
    key: K,
    width: f64,
    height: f64,
    padding: f64,
}

impl<K> Card<K> {
    /// Validates and builds a card. Fails on non-positive dimensions or
    /// negative padding (NaN counts as a violation).
    pub fn new(key: K, width: f64, height: f64, padding: f64) -> Result<Self>
    where
        K: Display,
    {
        if !(width > 0.0 && height > 0.0) {
            return Err(PackError::InvalidDimensions {
                key: key.to_string(),
                width,
                height,
            });
        }
        if !(padding >= 0.0) {
            return Err(PackError::NegativePadding {
                key: key.to_string(),
                padding,
            });
        }
        Ok(Self {
            key,
            width,
            height,
            padding,
        })
    }

    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn width(&self) -> f64 {
        self.width
    }
    pub fn height(&self) -> f64 {
        self.height
    }
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Width including padding on both sides.
    pub fn eff_width(&self) -> f64 {
        self.width + 2.0 * self.padding
    }

    /// Height including padding on top and bottom.
    pub fn eff_height(&self) -> f64 {
        self.height + 2.0 * self.padding
    }
}

/// A card whose actual top-left corner is supplied by the caller and never
/// altered by the engine. The position is part of the type, so "pinned
/// without a position" cannot be constructed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PinnedCard<K = String> {
    card: Card<K>,
    pos: Point,
}

impl<K> PinnedCard<K> {
    pub fn new(card: Card<K>, pos: Point) -> Self {
        Self { card, pos }
    }

    pub fn card(&self) -> &Card<K> {
        &self.card
    }
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Effective (padded) bounding box at the pinned position.
    pub fn effective_region(&self) -> Region {
        let eff = to_effective(self.pos, self.card.padding());
        Region::new(eff.x, eff.y, self.card.eff_width(), self.card.eff_height())
    }

    pub(crate) fn into_placed(self) -> PlacedCard<K> {
        PlacedCard {
            card: self.card,
            pos: self.pos,
            pinned: true,
        }
    }
}

/// Placement result for one card: the descriptor plus its final actual
/// top-left corner.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlacedCard<K = String> {
    pub card: Card<K>,
    /// Actual top-left corner (padding excluded).
    pub pos: Point,
    /// True if the position came from the caller, not the search.
    pub pinned: bool,
}

impl<K> PlacedCard<K> {
    /// Effective (padded) top-left corner.
    pub fn effective_pos(&self) -> Point {
        to_effective(self.pos, self.card.padding())
    }

    /// Effective (padded) bounding box.
    pub fn effective_region(&self) -> Region {
        let eff = self.effective_pos();
        Region::new(eff.x, eff.y, self.card.eff_width(), self.card.eff_height())
    }
}

/// Outcome of a placement run: every input card ends up in exactly one of
/// `placed` (pinned cards first, then movables in processing order) or
/// `unplaced`.
#[derive(Debug, Clone, Serialize)]
pub struct Layout<K = String> {
    pub placed: Vec<PlacedCard<K>>,
    /// Greatest effective bottom edge across `placed`; equals the top bound
    /// when nothing is placed.
    pub extent: f64,
    /// Cards that were too wide for the strip or found no feasible slot.
    pub unplaced: Vec<Card<K>>,
    /// The space the layout was computed for.
    pub space: SpaceConfig,
}

/// Statistics about strip usage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LayoutStats {
    /// Cards placed, pinned ones included.
    pub num_placed: usize,
    pub num_pinned: usize,
    pub num_unplaced: usize,
    /// Greatest effective bottom edge.
    pub extent: f64,
    /// Sum of effective areas of placed cards.
    pub used_area: f64,
    /// Usable width times the occupied height span.
    pub strip_area: f64,
    /// used_area / strip_area (0.0 when the strip is empty).
    pub occupancy: f64,
}

impl<K> Layout<K> {
    pub fn stats(&self) -> LayoutStats {
        let num_placed = self.placed.len();
        let num_pinned = self.placed.iter().filter(|p| p.pinned).count();
        let used_area: f64 = self
            .placed
            .iter()
            .map(|p| p.card.eff_width() * p.card.eff_height())
            .sum();
        let strip_area = self.space.usable_width() * (self.extent - self.space.top_bound());
        let occupancy = if strip_area > 0.0 {
            used_area / strip_area
        } else {
            0.0
        };
        LayoutStats {
            num_placed,
            num_pinned,
            num_unplaced: self.unplaced.len(),
            extent: self.extent,
            used_area,
            strip_area,
            occupancy,
        }
    }
}

impl LayoutStats {
    /// Human-readable one-liner.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {} ({} pinned), Unplaced: {}, Extent: {:.1}, Occupancy: {:.2}%",
            self.num_placed,
            self.num_pinned,
            self.num_unplaced,
            self.extent,
            self.occupancy * 100.0,
        )
    }
}
