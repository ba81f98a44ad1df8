use tracing::warn;

use crate::config::{SpaceConfig, Strategy};
use crate::geom::{EPSILON, Point, Region};

/// Fallback advance used when an x-jump fails to clear an obstruction. The
/// jump normally lands exactly past an obstacle edge; this only fires on
/// tolerance-boundary geometry.
const STUCK_STEP: f64 = 1.0;

/// Incremental placement state for one strip: the committed effective boxes
/// plus the running extent. `find` probes for a position without mutating;
/// `commit` records one.
pub struct StripPacker {
    space: SpaceConfig,
    obstacles: Vec<Region>,
    max_y: f64,
}

impl StripPacker {
    pub fn new(space: SpaceConfig) -> Self {
        let max_y = space.top_bound();
        Self {
            space,
            obstacles: Vec::new(),
            max_y,
        }
    }

    /// Greatest effective bottom edge committed so far; starts at the top
    /// bound.
    pub fn extent(&self) -> f64 {
        self.max_y
    }

    pub fn obstacles(&self) -> &[Region] {
        &self.obstacles
    }

    /// True if a box of this effective width fits between the side bounds at
    /// all. Cards failing this are unplaceable without any search.
    pub fn can_fit(&self, eff_w: f64) -> bool {
        eff_w <= self.space.usable_width() + EPSILON
    }

    /// Marks an effective box as occupied.
    pub fn commit(&mut self, region: Region) {
        self.max_y = self.max_y.max(region.bottom());
        self.obstacles.push(region);
    }

    /// Searches for the effective top-left of a `eff_w` x `eff_h` box.
    ///
    /// Candidate rows are the top bound and the bottom edge of every
    /// committed box, scanned in ascending order; the first row with a
    /// feasible x wins, so the result has the lowest legal y. Within a row
    /// the strategy decides the x preference.
    pub fn find(&self, eff_w: f64, eff_h: f64) -> Option<Point> {
        if !self.can_fit(eff_w) {
            return None;
        }
        for y in self.candidate_ys() {
            let x = match self.space.strategy {
                Strategy::BottomLeft => self.scan_row_leftward(y, eff_w, eff_h),
                Strategy::TopRight => self.scan_row_rightward(y, eff_w, eff_h),
            };
            if let Some(x) = x {
                return Some(Point::new(x, y));
            }
        }
        None
    }

    /// Top bound plus every committed bottom edge, ascending, deduplicated.
    fn candidate_ys(&self) -> Vec<f64> {
        let mut ys = Vec::with_capacity(self.obstacles.len() + 1);
        ys.push(self.space.top_bound());
        ys.extend(self.obstacles.iter().map(Region::bottom));
        ys.sort_by(f64::total_cmp);
        ys.dedup();
        ys
    }

    /// Leftmost feasible x in this row, or None if the row is exhausted.
    /// On collision, x jumps to the greatest right edge among the obstacles
    /// overlapping the probe, skipping the obstruction in one step.
    fn scan_row_leftward(&self, y: f64, w: f64, h: f64) -> Option<f64> {
        let right = self.space.right_bound();
        let mut x = self.space.left_bound();
        while x + w <= right + EPSILON {
            let probe = Region::new(x, y, w, h);
            let mut blocked_until = f64::NEG_INFINITY;
            for r in &self.obstacles {
                if probe.overlaps(r) {
                    blocked_until = blocked_until.max(r.right());
                }
            }
            if blocked_until == f64::NEG_INFINITY {
                return Some(x);
            }
            if blocked_until > x + EPSILON {
                x = blocked_until;
            } else {
                warn!(x, y, "x-jump made no progress, stepping by {}", STUCK_STEP);
                x += STUCK_STEP;
            }
        }
        None
    }

    /// Rightmost feasible x in this row. Mirror of `scan_row_leftward`: the
    /// probe starts flush with the right bound and jumps left past the
    /// smallest left edge among overlapping obstacles.
    fn scan_row_rightward(&self, y: f64, w: f64, h: f64) -> Option<f64> {
        let left = self.space.left_bound();
        let mut x = self.space.right_bound() - w;
        while x >= left - EPSILON {
            let probe = Region::new(x, y, w, h);
            let mut blocked_from = f64::INFINITY;
            for r in &self.obstacles {
                if probe.overlaps(r) {
                    blocked_from = blocked_from.min(r.x);
                }
            }
            if blocked_from == f64::INFINITY {
                return Some(x);
            }
            let next = blocked_from - w;
            if next < x - EPSILON {
                x = next;
            } else {
                warn!(x, y, "x-jump made no progress, stepping by {}", STUCK_STEP);
                x -= STUCK_STEP;
            }
        }
        None
    }
}
