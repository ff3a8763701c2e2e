//! Body colors
//!
//! Every body gets a color that no other live body is using. White is
//! reserved for the arena background and is never issued.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u32(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Darker variant, each channel scaled by `factor` and truncated
    pub fn shade(self, factor: f64) -> Self {
        let scale = |c: u8| (c as f64 * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SimError;

    /// Parses `#RRGGBB` (leading `#` optional, case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SimError::invalid("color", format!("expected #RRGGBB, got {s:?}")));
        }
        u32::from_str_radix(hex, 16)
            .map(Color::from_u32)
            .map_err(|e| SimError::invalid("color", e.to_string()))
    }
}

/// Source of distinct body colors
pub trait ColorAllocator {
    /// A color not equal to any issued color that is still in use
    fn next_color(&mut self) -> Color;

    /// Mark a caller-chosen color as in use
    fn claim(&mut self, color: Color);

    /// Return a color to the pool
    fn release(&mut self, color: Color);

    /// Return every color to the pool
    fn release_all(&mut self);
}

/// Draws uniformly random colors, redrawing on a clash
#[derive(Debug, Clone)]
pub struct RandomColorAllocator {
    rng: Pcg32,
    in_use: HashSet<Color>,
}

impl RandomColorAllocator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            in_use: HashSet::new(),
        }
    }

    pub fn in_use(&self) -> usize {
        self.in_use.len()
    }

    fn is_taken(&self, color: Color) -> bool {
        color == Color::WHITE || self.in_use.contains(&color)
    }
}

impl ColorAllocator for RandomColorAllocator {
    fn next_color(&mut self) -> Color {
        loop {
            let color = Color::from_u32(self.rng.random_range(0..=0xFF_FFFF));
            if !self.is_taken(color) {
                self.in_use.insert(color);
                return color;
            }
        }
    }

    fn claim(&mut self, color: Color) {
        self.in_use.insert(color);
    }

    fn release(&mut self, color: Color) {
        self.in_use.remove(&color);
    }

    fn release_all(&mut self) {
        self.in_use.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_format_and_parse() {
        let c = Color::new(0x12, 0xAB, 0x0F);
        assert_eq!(c.to_string(), "#12AB0F");
        assert_eq!("#12ab0f".parse::<Color>().unwrap(), c);
        assert_eq!("12AB0F".parse::<Color>().unwrap(), c);
        assert!("#12AB".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
    }

    #[test]
    fn test_shade() {
        let c = Color::new(200, 100, 10).shade(0.6);
        assert_eq!(c, Color::new(120, 60, 6));
        assert_eq!(Color::WHITE.shade(1.0), Color::WHITE);
    }

    #[test]
    fn test_allocator_issues_distinct_colors() {
        let mut alloc = RandomColorAllocator::new(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let c = alloc.next_color();
            assert_ne!(c, Color::WHITE);
            assert!(seen.insert(c), "color {c} issued twice");
        }
        assert_eq!(alloc.in_use(), 500);
    }

    #[test]
    fn test_release_all() {
        let mut alloc = RandomColorAllocator::new(7);
        let c = alloc.next_color();
        alloc.claim(Color::new(1, 2, 3));
        assert_eq!(alloc.in_use(), 2);
        alloc.release(c);
        assert_eq!(alloc.in_use(), 1);
        alloc.release_all();
        assert_eq!(alloc.in_use(), 0);
    }
}
