//! Color multiset regression test
//!
//! Applies a long pseudo-random sequence of adds and removes and checks the
//! multiset against a plain map after every step.

use gifweave_core::{Color, ColorMultiset};
use gifweave_test::{RegParams, gradient_image, seeded_rng};
use rand::RngExt;
use std::collections::HashMap;

#[test]
fn multiset_reg() {
    let mut rp = RegParams::new("multiset");

    let palette: Vec<Color> = (0..16u32).map(|i| Color::from_rgb_int(i * 0x0f0f0f)).collect();
    let mut set = ColorMultiset::new();
    let mut reference: HashMap<Color, usize> = HashMap::new();

    let mut rng = seeded_rng(12345);
    let mut consistent = true;
    for _ in 0..5000 {
        let color = palette[rng.random_range(0..palette.len())];
        let n = rng.random_range(0..5);
        if rng.random_range(0..3) == 0 {
            let removed = set.remove(&color, n);
            let count = reference.entry(color).or_insert(0);
            consistent &= removed == n.min(*count);
            *count -= removed;
        } else {
            set.add(color, n);
            *reference.entry(color).or_insert(0) += n;
        }
        reference.retain(|_, count| *count > 0);

        consistent &= set.len() == reference.values().sum::<usize>();
        consistent &= set.distinct_len() == reference.len();
        consistent &= set.iter().all(|(c, n)| n > 0 && reference.get(&c) == Some(&n));
    }
    rp.compare_values(1.0, consistent as u8 as f64, 0.0);

    // An image population counts every pixel once
    let image = gradient_image(40, 10).unwrap();
    let population = image.colors();
    rp.compare_values(400.0, population.len() as f64, 0.0);
    let summed: usize = population.iter().map(|(_, n)| n).sum();
    rp.compare_values(400.0, summed as f64, 0.0);
    for color in population.distinct() {
        let pixels = image.pixels().iter().filter(|&&p| p == color).count();
        rp.compare_values(pixels as f64, population.count(&color) as f64, 0.0);
    }

    assert!(rp.cleanup(), "multiset regression test failed");
}
