//! ColorMultiset - a counted bag of colors
//!
//! Represents the color population of an image without duplicating pixel
//! data: each distinct color is stored once alongside its pixel count.
//! Entries are dropped as soon as their count reaches zero, so every live
//! entry has a positive count.
//!
//! Iteration follows first-insertion order (a removal moves the last entry
//! into the vacated slot), which keeps every quantizer deterministic for a
//! given image.

use crate::color::Color;
use std::collections::HashMap;

/// A multiset of colors with positive integer multiplicities.
#[derive(Debug, Clone, Default)]
pub struct ColorMultiset {
    index: HashMap<Color, usize>,
    entries: Vec<(Color, usize)>,
    total: usize,
}

impl ColorMultiset {
    /// Create an empty multiset
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `color`. Adding zero occurrences is a no-op.
    pub fn add(&mut self, color: Color, n: usize) {
        if n == 0 {
            return;
        }
        match self.index.get(&color) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push((color, n));
            }
        }
        self.total += n;
    }

    /// Add a single occurrence of `color`.
    pub fn add_one(&mut self, color: Color) {
        self.add(color, 1);
    }

    /// Remove up to `n` occurrences of `color`.
    ///
    /// Returns the number actually removed, which is never more than the
    /// current count.
    pub fn remove(&mut self, color: &Color, n: usize) -> usize {
        let Some(&slot) = self.index.get(color) else {
            return 0;
        };
        let count = self.entries[slot].1;
        if n < count {
            self.entries[slot].1 -= n;
            self.total -= n;
            return n;
        }

        self.index.remove(color);
        self.entries.swap_remove(slot);
        if let Some(&(moved, _)) = self.entries.get(slot) {
            self.index.insert(moved, slot);
        }
        self.total -= count;
        count
    }

    /// Number of occurrences of `color` (zero if absent).
    pub fn count(&self, color: &Color) -> usize {
        self.index
            .get(color)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Whether `color` occurs at least once.
    pub fn contains(&self, color: &Color) -> bool {
        self.index.contains_key(color)
    }

    /// The distinct colors, in iteration order.
    pub fn distinct(&self) -> Vec<Color> {
        self.entries.iter().map(|&(c, _)| c).collect()
    }

    /// Number of distinct colors.
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of occurrences (sum of all counts).
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over `(color, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Color, usize)> + '_ {
        self.entries.iter().copied()
    }
}

impl FromIterator<Color> for ColorMultiset {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        let mut set = ColorMultiset::new();
        for color in iter {
            set.add_one(color);
        }
        set
    }
}

impl Extend<(Color, usize)> for ColorMultiset {
    fn extend<T: IntoIterator<Item = (Color, usize)>>(&mut self, iter: T) {
        for (color, n) in iter {
            self.add(color, n);
        }
    }
}
