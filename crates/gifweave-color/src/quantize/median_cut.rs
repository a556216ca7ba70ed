//! Median cut quantization
//!
//! Clusters of distinct colors are split along the channel with the largest
//! spread until there are enough clusters. The cut point is the middle of
//! the cluster by number of distinct colors, while each output color is the
//! pixel-weighted centroid of its cluster.

use super::{ColorQuantizer, check_max_colors};
use crate::ColorResult;
use gifweave_core::color::{BLUE, GREEN, RED};
use gifweave_core::{Color, ColorMultiset};
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Median cut quantizer
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCutQuantizer;

impl ColorQuantizer for MedianCutQuantizer {
    fn quantize(&self, population: &ColorMultiset, max_colors: usize) -> ColorResult<Vec<Color>> {
        check_max_colors(max_colors)?;
        if population.is_empty() {
            return Ok(Vec::new());
        }

        let mut next_seq = 0u64;
        let mut clusters = BinaryHeap::new();
        clusters.push(Cluster::new(population.iter().collect(), &mut next_seq));

        while clusters.len() < max_colors {
            let Some(cluster) = clusters.pop() else {
                break;
            };
            if cluster.colors.len() < 2 {
                // Largest spread is zero: every cluster is a single color
                clusters.push(cluster);
                break;
            }
            trace!(
                "median cut: splitting {} colors on channel {} (spread {})",
                cluster.colors.len(),
                cluster.channel,
                cluster.spread
            );
            let (lower, upper) = cluster.split(&mut next_seq);
            clusters.push(lower);
            clusters.push(upper);
        }

        let mut clusters = clusters.into_vec();
        clusters.sort_by_key(|c| c.seq);
        Ok(clusters
            .into_iter()
            .filter_map(|c| Color::weighted_mean(c.colors))
            .collect())
    }
}

/// A non-empty set of distinct colors with their pixel counts
#[derive(Debug)]
struct Cluster {
    colors: Vec<(Color, usize)>,
    spread: f64,
    channel: usize,
    /// Creation order, used only to break spread ties
    seq: u64,
}

impl Cluster {
    fn new(colors: Vec<(Color, usize)>, next_seq: &mut u64) -> Self {
        let mut spread = f64::NEG_INFINITY;
        let mut channel = RED;
        for c in [RED, GREEN, BLUE] {
            let (min, max) = colors.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), (color, _)| {
                    let v = color.components()[c];
                    (min.min(v), max.max(v))
                },
            );
            if max - min > spread {
                spread = max - min;
                channel = c;
            }
        }

        let seq = *next_seq;
        *next_seq += 1;
        Self {
            colors,
            spread,
            channel,
            seq,
        }
    }

    /// Bisect by distinct color count along the widest channel.
    fn split(mut self, next_seq: &mut u64) -> (Cluster, Cluster) {
        let channel = self.channel;
        self.colors
            .sort_by(|(a, _), (b, _)| a.components()[channel].total_cmp(&b.components()[channel]));
        let upper = self.colors.split_off(self.colors.len() / 2);
        (
            Cluster::new(self.colors, next_seq),
            Cluster::new(upper, next_seq),
        )
    }
}

impl PartialEq for Cluster {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cluster {}

impl Ord for Cluster {
    fn cmp(&self, other: &Self) -> Ordering {
        // Widest spread first, then the older cluster
        self.spread
            .total_cmp(&other.spread)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Cluster {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
