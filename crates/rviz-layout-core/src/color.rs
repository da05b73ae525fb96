//! RGB color triplets as written in layout files (`"R; G; B"`).

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// An 8-bit-per-channel color as stored in a layout.
///
/// Components are kept as parsed so that out-of-range values (e.g. `300`)
/// survive parsing and are reported by validation instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: i64, g: i64, b: i64) -> Self {
        Self { r, g, b }
    }

    pub fn components(&self) -> [i64; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns true if every component lies in 0-255.
    pub fn is_valid(&self) -> bool {
        self.components().iter().all(|c| (0..=255).contains(c))
    }

    /// Returns the color as bytes, or `None` if a component is out of range.
    pub fn to_rgb8(&self) -> Option<[u8; 3]> {
        let [r, g, b] = self.components();
        Some([
            u8::try_from(r).ok()?,
            u8::try_from(g).ok()?,
            u8::try_from(b).ok()?,
        ])
    }

    /// Returns the color normalized to `[0, 1]` per channel.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r as f32, self.g as f32, self.b as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}; {}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a `R; G; B` triplet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedColor;

impl FromStr for Color {
    type Err = MalformedColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';').map(|p| p.trim().parse::<i64>());
        let (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MalformedColor);
        };
        Ok(Self::new(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_triplet() {
        let color: Color = "160; 160; 164".parse().unwrap();
        assert_eq!(color, Color::new(160, 160, 164));
        assert!(color.is_valid());
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let color: Color = "48;48 ;  48".parse().unwrap();
        assert_eq!(color, Color::new(48, 48, 48));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("red; 0; 0".parse::<Color>().is_err());
        assert!("1.5; 0; 0".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!("255; 255".parse::<Color>().is_err());
        assert!("1; 2; 3; 4".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_out_of_range_still_parses() {
        let color: Color = "300; -1; 0".parse().unwrap();
        assert!(!color.is_valid());
        assert_eq!(color.to_rgb8(), None);
    }

    #[test]
    fn test_display_matches_file_format() {
        assert_eq!(Color::new(255, 0, 10).to_string(), "255; 0; 10");
    }

    #[test]
    fn test_to_vec3() {
        assert_eq!(Color::WHITE.to_vec3(), Vec3::ONE);
        assert_eq!(Color::BLACK.to_vec3(), Vec3::ZERO);
    }

    proptest! {
        #[test]
        fn test_text_form_parses_back(r in 0i64..=255, g in 0i64..=255, b in 0i64..=255) {
            let color = Color::new(r, g, b);
            prop_assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
        }
    }
}
