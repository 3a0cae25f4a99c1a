//! Color handling for configurable colors.
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors that come from configuration (for example the
//! selection highlight) are written as CSS strings and converted into a
//! [`Pixel`] when drawn.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

use crate::surface::Pixel;

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string.
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use graintfa_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Converts this color to an 8-bit sRGB pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use graintfa_core::color::Color;
    ///
    /// let pixel = Color::new("#c6c6c6").unwrap().to_pixel();
    /// assert_eq!(pixel.0, [0xc6, 0xc6, 0xc6, 0xff]);
    /// ```
    pub fn to_pixel(self) -> Pixel {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        Pixel::from([rgba.r, rgba.g, rgba.b, rgba.a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}
