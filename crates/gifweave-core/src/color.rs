//! Color - RGB color with real-valued components
//!
//! Components are nominally in `[0, 1]` but are never clamped, because the
//! same type carries signed error terms while dithering.
//!
//! Equality is exact, component by component. That makes `Color` usable as
//! a hash key for color populations and color tables, which only ever hold
//! values produced from 8-bit pixels or from the quantizers.

use crate::error::{Error, Result};
use crate::multiset::ColorMultiset;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Sub};

/// Red component index
pub const RED: usize = 0;
/// Green component index
pub const GREEN: usize = 1;
/// Blue component index
pub const BLUE: usize = 2;

/// An immutable RGB color.
#[derive(Debug, Clone, Copy, Default)]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    /// Create a color from raw components.
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Create a color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_rgb_int(rgb: u32) -> Self {
        Self::from_rgb8(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    #[inline]
    pub fn red(&self) -> f64 {
        self.red
    }

    #[inline]
    pub fn green(&self) -> f64 {
        self.green
    }

    #[inline]
    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Get a component by index (0 = red, 1 = green, 2 = blue).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ComponentIndex`] for any other index.
    pub fn component(&self, index: usize) -> Result<f64> {
        match index {
            RED => Ok(self.red),
            GREEN => Ok(self.green),
            BLUE => Ok(self.blue),
            _ => Err(Error::ComponentIndex(index)),
        }
    }

    /// Components as an array, in red, green, blue order.
    #[inline]
    pub fn components(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Multiply every component by `s`.
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.red * s, self.green * s, self.blue * s)
    }

    /// Euclidean distance between two colors.
    pub fn distance_to(&self, other: &Color) -> f64 {
        let d = *self - *other;
        (d.red * d.red + d.green * d.green + d.blue * d.blue).sqrt()
    }

    /// Index of the nearest color in `colors`.
    ///
    /// Ties go to the color seen first. Returns `None` for an empty slice.
    pub fn nearest_index_in(&self, colors: &[Color]) -> Option<usize> {
        let mut nearest = None;
        let mut nearest_distance = f64::INFINITY;
        for (i, color) in colors.iter().enumerate() {
            let distance = self.distance_to(color);
            if distance < nearest_distance {
                nearest = Some(i);
                nearest_distance = distance;
            }
        }
        nearest
    }

    /// Nearest color in `colors`, see [`Color::nearest_index_in`].
    pub fn nearest_in(&self, colors: &[Color]) -> Option<Color> {
        self.nearest_index_in(colors).map(|i| colors[i])
    }

    /// Convert to 8-bit channels, clamping to `[0, 1]` and rounding.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        )
    }

    /// Convert to a packed `0xRRGGBB` value.
    pub fn to_rgb_int(&self) -> u32 {
        let (r, g, b) = self.to_rgb8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Weighted mean of a color population.
    ///
    /// A population with a single distinct color yields exactly that color,
    /// so clusters of one color survive quantization bit-for-bit. Returns
    /// `None` for an empty population.
    pub fn centroid(colors: &ColorMultiset) -> Option<Color> {
        Self::weighted_mean(colors.iter())
    }

    /// Weighted mean over `(color, weight)` pairs, see [`Color::centroid`].
    pub fn weighted_mean<I>(weighted: I) -> Option<Color>
    where
        I: IntoIterator<Item = (Color, usize)>,
    {
        let mut sum = Color::BLACK;
        let mut total = 0usize;
        let mut only = None;
        let mut runs = 0usize;
        for (color, weight) in weighted {
            if weight == 0 {
                continue;
            }
            sum = sum + color.scale(weight as f64);
            total += weight;
            if only != Some(color) {
                runs += 1;
                only = Some(color);
            }
        }
        match (total, runs) {
            (0, _) => None,
            (_, 1) => only,
            _ => Some(sum.scale(1.0 / total as f64)),
        }
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.red + rhs.red, self.green + rhs.green, self.blue + rhs.blue)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(self.red - rhs.red, self.green - rhs.green, self.blue - rhs.blue)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        self.scale(rhs)
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.red == other.red && self.green == other.green && self.blue == other.blue
    }
}

// NaN components never reach a Color built by this crate.
impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // +0.0 folds -0.0 into 0.0 so equal colors hash alike
        for c in self.components() {
            (c + 0.0).to_bits().hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_arithmetic() {
        let a = Color::new(0.5, 0.25, 1.0);
        let b = Color::new(0.25, 0.25, 0.5);
        assert_eq!(a + b, Color::new(0.75, 0.5, 1.5));
        assert_eq!(a - b, Color::new(0.25, 0.0, 0.5));
        assert_eq!(a.scale(2.0), Color::new(1.0, 0.5, 2.0));
        assert_eq!(a * 0.5, Color::new(0.25, 0.125, 0.5));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Color::BLACK.distance_to(&Color::RED), 1.0);
        let d = Color::BLACK.distance_to(&Color::WHITE);
        assert!((d - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_component_out_of_range() {
        let c = Color::new(0.1, 0.2, 0.3);
        assert_eq!(c.component(GREEN).unwrap(), 0.2);
        assert!(matches!(c.component(3), Err(Error::ComponentIndex(3))));
    }

    #[test]
    fn test_rgb_int_round_trip() {
        for rgb in [0x000000, 0xffffff, 0x123456, 0x00ff80, 0x336699] {
            assert_eq!(Color::from_rgb_int(rgb).to_rgb_int(), rgb);
        }
        // Out-of-range components clamp
        assert_eq!(Color::new(1.5, -0.2, 0.5).to_rgb8(), (255, 0, 128));
    }

    #[test]
    fn test_nearest_first_seen_wins() {
        let palette = [Color::new(0.0, 0.0, 0.0), Color::new(1.0, 0.0, 0.0)];
        let mid = Color::new(0.5, 0.0, 0.0);
        assert_eq!(mid.nearest_index_in(&palette), Some(0));
        assert_eq!(Color::new(0.9, 0.0, 0.0).nearest_in(&palette), Some(Color::RED));
        assert_eq!(mid.nearest_in(&[]), None);
    }

    #[test]
    fn test_weighted_mean() {
        let mean = Color::weighted_mean([(Color::BLACK, 3), (Color::WHITE, 1)]).unwrap();
        assert_eq!(mean, Color::new(0.25, 0.25, 0.25));

        let odd = Color::new(0.1, 0.7, 0.3);
        assert_eq!(Color::weighted_mean([(odd, 3)]), Some(odd));
        assert_eq!(Color::weighted_mean(Vec::new()), None);
    }

    #[test]
    fn test_signed_zero_hash() {
        let mut set = HashSet::new();
        set.insert(Color::new(0.0, 0.0, 0.0));
        assert!(set.contains(&Color::new(-0.0, 0.0, -0.0)));
    }
}
