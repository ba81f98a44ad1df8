use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PackError, Result};

/// Placement strategies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Lowest candidate row first, leftmost feasible x within it.
    BottomLeft,
    /// Lowest candidate row first, rightmost feasible x within it.
    TopRight,
}

impl FromStr for Strategy {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "tr" | "topright" => Ok(Self::TopRight),
            _ => Err(()),
        }
    }
}

/// The strip cards are packed into: fixed total width, unbounded height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// Total strip width.
    pub width: f64,
    /// Clearance kept above the topmost effective box.
    pub top_padding: f64,
    /// Clearance kept inside each vertical edge of the strip.
    pub side_padding: f64,
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
    /// When set, placed movable cards have their actual position rounded to
    /// the nearest multiple of this grid after placement. Pinned cards are
    /// never moved. Snapping does not re-check overlap; displacements up to
    /// half a grid cell can close sub-grid gaps.
    #[serde(default)]
    pub snap_grid: Option<f64>,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            top_padding: 0.0,
            side_padding: 0.0,
            strategy: default_strategy(),
            snap_grid: None,
        }
    }
}

impl SpaceConfig {
    /// Leftmost legal effective x.
    pub fn left_bound(&self) -> f64 {
        self.side_padding
    }

    /// Rightmost legal effective right edge.
    pub fn right_bound(&self) -> f64 {
        self.width - self.side_padding
    }

    /// Topmost legal effective y.
    pub fn top_bound(&self) -> f64 {
        self.top_padding
    }

    /// Effective width available between the side bounds.
    pub fn usable_width(&self) -> f64 {
        self.right_bound() - self.left_bound()
    }

    /// Validates the space parameters.
    ///
    /// Returns an error if:
    /// - the width is not positive
    /// - a padding is negative
    /// - the side paddings leave no usable width
    /// - a snap grid is set but not positive
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0) {
            return Err(PackError::InvalidSpace(format!(
                "width must be positive (width={})",
                self.width
            )));
        }
        if !(self.top_padding >= 0.0) || !(self.side_padding >= 0.0) {
            return Err(PackError::InvalidSpace(format!(
                "paddings cannot be negative (top={}, side={})",
                self.top_padding, self.side_padding
            )));
        }
        if self.side_padding * 2.0 >= self.width {
            return Err(PackError::InvalidSpace(format!(
                "side_padding ({}) * 2 leaves no usable width (width={})",
                self.side_padding, self.width
            )));
        }
        if let Some(grid) = self.snap_grid {
            if !(grid > 0.0) {
                return Err(PackError::InvalidSpace(format!(
                    "snap_grid must be positive (snap_grid={grid})"
                )));
            }
        }
        Ok(())
    }
}

fn default_strategy() -> Strategy {
    Strategy::BottomLeft
}

/// Builder for `SpaceConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SpaceConfigBuilder {
    cfg: SpaceConfig,
}

impl SpaceConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SpaceConfig::default(),
        }
    }
    pub fn width(mut self, v: f64) -> Self {
        self.cfg.width = v;
        self
    }
    pub fn top_padding(mut self, v: f64) -> Self {
        self.cfg.top_padding = v;
        self
    }
    pub fn side_padding(mut self, v: f64) -> Self {
        self.cfg.side_padding = v;
        self
    }
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn snap_grid(mut self, v: Option<f64>) -> Self {
        self.cfg.snap_grid = v;
        self
    }
    pub fn build(self) -> SpaceConfig {
        self.cfg
    }
}

impl SpaceConfig {
    /// Create a fluent builder for `SpaceConfig`.
    pub fn builder() -> SpaceConfigBuilder {
        SpaceConfigBuilder::new()
    }
}
