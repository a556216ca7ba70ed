//! gifweave-color - Palette reduction for GIF frames
//!
//! A GIF frame can address at most 256 colors. This crate provides the two
//! steps that fit an arbitrary image into that limit:
//!
//! - **Quantization** ([`quantize`]): pick representative colors for a
//!   weighted color population (median cut, k-means, octree, uniform grid)
//! - **Dithering** ([`dither`]): remap every pixel onto the chosen palette
//!   (Floyd-Steinberg error diffusion, nearest color)
//!
//! # Example
//!
//! ```
//! use gifweave_color::{ColorQuantizer, DitherMethod, Ditherer, QuantizeMethod};
//! use gifweave_core::Image;
//!
//! let image = Image::from_rgb(&[0xff0000, 0xfe0000, 0x0000ff, 0x0000fe], 2).unwrap();
//! let palette = QuantizeMethod::MedianCut.quantize(&image.colors(), 2).unwrap();
//! let reduced = DitherMethod::NearestColor.dither(&image, &palette).unwrap();
//! assert_eq!(reduced.colors().distinct_len(), 2);
//! ```

pub mod dither;
pub mod error;
pub mod quantize;

pub use gifweave_core;

pub use dither::{DitherMethod, Ditherer, FloydSteinbergDitherer, NearestColorDitherer};
pub use error::{ColorError, ColorResult};
pub use quantize::{
    ColorQuantizer, KMeansOptions, KMeansQuantizer, MedianCutQuantizer, OctreeQuantizer,
    QuantizeMethod, UniformQuantizer,
};
