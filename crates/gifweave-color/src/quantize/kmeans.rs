//! K-means quantization
//!
//! Centroids start as a random sample of the distinct colors (Forgy
//! initialization). Each pass recomputes every centroid as the pixel-weighted
//! mean of its cluster and then reassigns every distinct color to its nearest
//! centroid, until a pass moves no color or the iteration cap is reached.

use super::{ColorQuantizer, check_max_colors};
use crate::ColorResult;
use gifweave_core::{Color, ColorMultiset};
use log::{trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::collections::HashSet;

/// Options for k-means quantization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMeansOptions {
    /// Seed for choosing the initial centroids
    pub seed: u64,
    /// Maximum number of recompute-and-reassign passes
    pub max_iterations: usize,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_iterations: 100,
        }
    }
}

impl KMeansOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// K-means quantizer
#[derive(Debug, Clone, Default)]
pub struct KMeansQuantizer {
    options: KMeansOptions,
}

impl KMeansQuantizer {
    pub fn new(options: KMeansOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &KMeansOptions {
        &self.options
    }

    /// Quantize using a caller-supplied generator for the initial centroids.
    pub fn quantize_with_rng(
        &self,
        population: &ColorMultiset,
        max_colors: usize,
        rng: &mut StdRng,
    ) -> ColorResult<Vec<Color>> {
        check_max_colors(max_colors)?;

        let colors: Vec<(Color, usize)> = population.iter().collect();
        let k = max_colors.min(colors.len());
        let mut centroids: Vec<Color> = index::sample(rng, colors.len(), k)
            .into_iter()
            .map(|i| colors[i].0)
            .collect();

        let mut assignments: Vec<usize> = colors
            .iter()
            .map(|(color, _)| nearest(color, &centroids))
            .collect();

        let mut converged = k == 0;
        for pass in 0..self.options.max_iterations {
            recompute_centroids(&colors, &assignments, &mut centroids);

            let mut moved = 0usize;
            for ((color, _), assignment) in colors.iter().zip(assignments.iter_mut()) {
                let nearest = nearest(color, &centroids);
                if nearest != *assignment {
                    *assignment = nearest;
                    moved += 1;
                }
            }
            trace!("k-means pass {}: {} colors moved", pass, moved);

            if moved == 0 {
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(
                "k-means stopped after {} passes without converging",
                self.options.max_iterations
            );
            recompute_centroids(&colors, &assignments, &mut centroids);
        }

        // Two clusters can settle on the same centroid
        let mut seen = HashSet::with_capacity(centroids.len());
        centroids.retain(|c| seen.insert(*c));
        Ok(centroids)
    }
}

impl ColorQuantizer for KMeansQuantizer {
    fn quantize(&self, population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>> {
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        self.quantize_with_rng(population, max_colors, &mut rng)
    }
}

fn nearest(color: &Color, centroids: &[Color]) -> usize {
    color.nearest_index_in(centroids).unwrap_or(0)
}

/// Replace each centroid with the weighted mean of its cluster.
///
/// Empty clusters keep their previous centroid.
fn recompute_centroids(colors: &[(Color, usize)], assignments: &[usize], centroids: &mut [Color]) {
    let mut members: Vec<Vec<(Color, usize)>> = vec![Vec::new(); centroids.len()];
    for (&entry, &cluster) in colors.iter().zip(assignments) {
        members[cluster].push(entry);
    }
    for (centroid, cluster) in centroids.iter_mut().zip(members) {
        if let Some(mean) = Color::weighted_mean(cluster) {
            *centroid = mean;
        }
    }
}
