//! Core library for packing padded cards into a fixed-width strip.
//!
//! - Algorithms: bottom-left (lowest row, leftmost x) and top-right (lowest
//!   row, rightmost x) greedy placement with per-card padding and pinned
//!   obstacles
//! - Pipeline: `place_cards` takes card descriptors and returns a `Layout`
//!   (placed positions + extent + unplaced leftovers)
//! - Data model is serde-serializable; JSON exporters and an RGBA preview
//!   renderer are provided.
//!
//! Quick example:
//! ```ignore
//! use card_packer_core::prelude::*;
//! # fn main() -> Result<(), card_packer_core::PackError> {
//! let cards = vec![
//!     Card::new("a".to_string(), 120.0, 90.0, 5.0)?,
//!     Card::new("b".to_string(), 80.0, 80.0, 5.0)?,
//! ];
//! let space = SpaceConfig { width: 500.0, top_padding: 50.0, side_padding: 20.0, ..Default::default() };
//! let layout = place_cards(cards, vec![], &space)?;
//! println!("extent: {}", layout.extent);
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod geom;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod render;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;
pub use render::*;

/// Convenience prelude for common types and functions.
/// Importing `card_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{SpaceConfig, SpaceConfigBuilder, Strategy};
    pub use crate::error::{PackError, Result};
    pub use crate::export::{to_json, to_json_hash};
    pub use crate::geom::{EPSILON, Point, Region};
    pub use crate::model::{Card, Layout, LayoutStats, PinnedCard, PlacedCard};
    pub use crate::pipeline::place_cards;
    pub use crate::render::{RenderOptions, render_layout};
}
