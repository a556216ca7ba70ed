//! gifweave-test - Regression test framework for gifweave
//!
//! Supports three modes, selected with the `REGTEST_MODE` environment
//! variable:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run checks without file comparison
//!
//! Alongside [`RegParams`] the crate provides reference decoders for
//! encoder output and a handful of synthetic test images.
//!
//! # Usage
//!
//! ```ignore
//! use gifweave_test::RegParams;
//!
//! let mut rp = RegParams::new("lzw");
//! rp.compare_strings(&expected, &actual);
//! assert!(rp.cleanup());
//! ```

mod decode;
mod error;
mod params;

pub use decode::{DecodedFrame, DecodedGif, decode_gif, decode_lzw, graphics_control_fields};
pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use gifweave_core::Image;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    // crates/gifweave-test -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Directory holding committed golden files.
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests").join("golden")
}

/// Scratch directory for files written by regression tests.
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests").join("regout")
}

/// A smooth RGB gradient. Large images hold far more than 256 colors.
pub fn gradient_image(width: usize, height: usize) -> TestResult<Image> {
    let mut rgb = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1).max(1)) as u32;
            let g = (y * 255 / (height - 1).max(1)) as u32;
            let b = ((x + y) * 255 / (width + height)) as u32;
            rgb.push((r << 16) | (g << 8) | b);
        }
    }
    Ok(Image::from_rgb(&rgb, width)?)
}

/// Vertical stripes cycling through `colors`.
pub fn striped_image(width: usize, height: usize, colors: &[u32]) -> TestResult<Image> {
    let mut rgb = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            rgb.push(colors[x % colors.len()]);
        }
    }
    Ok(Image::from_rgb(&rgb, width)?)
}

/// A seeded generator, so synthetic data is identical on every run.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `len` random palette indices below `table_size`.
pub fn random_indices(len: usize, table_size: usize, seed: u64) -> Vec<usize> {
    let mut rng = seeded_rng(seed);
    (0..len).map(|_| rng.random_range(0..table_size)).collect()
}

/// Random pixels, with up to `width * height` distinct colors.
pub fn noise_image(width: usize, height: usize, seed: u64) -> TestResult<Image> {
    let mut rng = seeded_rng(seed);
    let rgb: Vec<u32> = (0..width * height)
        .map(|_| rng.random::<u32>() & 0xff_ffff)
        .collect();
    Ok(Image::from_rgb(&rgb, width)?)
}
