//! gifweave - Animated GIF encoder for Rust
//!
//! Encodes sequences of RGB images as a looping GIF89a animation. A GIF
//! frame can only address 256 colors, so frames with more are reduced
//! first: a quantizer picks a palette and a ditherer maps every pixel onto
//! it. Each frame is then written with its own color table and LZW
//! compressed pixel indices.
//!
//! - Core types: [`Color`], [`ColorMultiset`], [`Image`], [`ColorTable`]
//! - Quantizers and ditherers: [`color`]
//! - LZW, block writers and the [`io::GifEncoder`]: [`io`]
//!
//! # Example
//!
//! ```
//! use gifweave::Image;
//! use gifweave::color::{DitherMethod, QuantizeMethod};
//! use gifweave::io::{FrameOptions, GifEncoder};
//! use std::time::Duration;
//!
//! let mut encoder = GifEncoder::new(Vec::new(), 32, 32, 0).unwrap();
//! let options = FrameOptions::default()
//!     .with_quantizer(QuantizeMethod::Octree)
//!     .with_ditherer(DitherMethod::FloydSteinberg)
//!     .with_delay(Duration::from_millis(100));
//!
//! for shift in 0..4u32 {
//!     let rgb: Vec<u32> = (0..32 * 32u32)
//!         .map(|i| ((i * 8 + shift * 16) % 256) << 16 | (i / 4) % 256)
//!         .collect();
//!     let frame = Image::from_rgb(&rgb, 32).unwrap();
//!     encoder.add_image(&frame, &options).unwrap();
//! }
//!
//! let gif = encoder.finish().unwrap();
//! assert!(gif.starts_with(b"GIF89a"));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use gifweave_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use gifweave_color as color;
pub use gifweave_io as io;
