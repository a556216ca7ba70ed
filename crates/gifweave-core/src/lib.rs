//! gifweave Core - Basic data structures for GIF encoding
//!
//! This crate provides the data structures shared by the rest of the
//! gifweave workspace:
//!
//! - [`Color`] - RGB color with real-valued components
//! - [`ColorMultiset`] - Color population with per-color pixel counts
//! - [`Image`] - Immutable grid of pixel colors
//! - [`ColorTable`] - Palette mapping colors to dense indices

pub mod color;
pub mod color_table;
#[cfg(feature = "image")]
mod convert;
pub mod error;
pub mod image;
pub mod multiset;

pub use crate::color::Color;
pub use crate::color_table::ColorTable;
pub use crate::error::{Error, Result};
pub use crate::image::Image;
pub use crate::multiset::ColorMultiset;
