//! Color quantization
//!
//! Reduces an arbitrary color population to a bounded palette:
//! - Median cut ([`MedianCutQuantizer`])
//! - K-means ([`KMeansQuantizer`])
//! - Octree ([`OctreeQuantizer`])
//! - Uniform grid ([`UniformQuantizer`])
//!
//! Every strategy implements [`ColorQuantizer`]. [`QuantizeMethod`] selects
//! one at configuration time.

mod kmeans;
mod median_cut;
mod octree;
mod uniform;

pub use kmeans::{KMeansOptions, KMeansQuantizer};
pub use median_cut::MedianCutQuantizer;
pub use octree::OctreeQuantizer;
pub use uniform::UniformQuantizer;

use crate::{ColorError, ColorResult};
use gifweave_core::{Color, ColorMultiset};

/// Reduce a weighted color population to a few representative colors.
pub trait ColorQuantizer {
    /// Pick at most `max_colors` distinct colors representing `population`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidParameters`] if `max_colors` is zero.
    fn quantize(&self, population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>>;
}

/// Quantization strategy selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuantizeMethod {
    #[default]
    MedianCut,
    KMeans(KMeansOptions),
    Octree,
    Uniform,
}

impl ColorQuantizer for QuantizeMethod {
    fn quantize(&self, population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>> {
        match self {
            QuantizeMethod::MedianCut => MedianCutQuantizer.quantize(population, max_colors),
            QuantizeMethod::KMeans(options) => {
                KMeansQuantizer::new(options.clone()).quantize(population, max_colors)
            }
            QuantizeMethod::Octree => OctreeQuantizer.quantize(population, max_colors),
            QuantizeMethod::Uniform => UniformQuantizer.quantize(population, max_colors),
        }
    }
}

fn check_max_colors(max_colors: usize) -> ColorResult<()> {
    if max_colors == 0 {
        return Err(ColorError::InvalidParameters(
            "max_colors must be at least 1".to_string(),
        ));
    }
    Ok(())
}
