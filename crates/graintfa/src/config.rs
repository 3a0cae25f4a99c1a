//! Configuration types for Graintfa rendering and export.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command line front end.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and export settings.
//! - [`RenderConfig`] - Controls how the editor canvas is drawn.
//! - [`ExportConfig`] - Controls how finished textures are written.
//!
//! # Example
//!
//! ```
//! # use graintfa::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.render().highlight_color().is_ok());
//! assert_eq!(config.export().scale(), 1);
//! ```

use serde::Deserialize;

use graintfa_core::color::Color;

/// Highlight drawn around the selected element when none is configured.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#3fa9f5";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, export: ExportConfig) -> Self {
        Self { render, export }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Canvas drawing options.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfig {
    /// Selection highlight [`Color`], as a color string.
    #[serde(default)]
    highlight_color: Option<String>,
}

impl RenderConfig {
    pub fn new(highlight_color: Option<String>) -> Self {
        Self { highlight_color }
    }

    /// Returns the parsed highlight [`Color`], falling back to
    /// [`DEFAULT_HIGHLIGHT_COLOR`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn highlight_color(&self) -> Result<Color, String> {
        let color = self
            .highlight_color
            .as_deref()
            .unwrap_or(DEFAULT_HIGHLIGHT_COLOR);
        Color::new(color).map_err(|err| format!("Invalid highlight color in config: {err}"))
    }
}

/// Texture export options.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Integer upscale factor applied with nearest-neighbour sampling.
    #[serde(default = "default_scale")]
    scale: u32,
}

fn default_scale() -> u32 {
    1
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
        }
    }
}

impl ExportConfig {
    pub fn new(scale: u32) -> Self {
        Self { scale }
    }

    /// Returns the export scale factor.
    pub fn scale(&self) -> u32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_highlight_color() {
        let config = RenderConfig::default();
        assert_eq!(
            config.highlight_color().unwrap().to_pixel().0,
            [0x3f, 0xa9, 0xf5, 0xff]
        );
    }

    #[test]
    fn test_invalid_highlight_color() {
        let config = RenderConfig::new(Some("not-a-color".to_string()));
        let err = config.highlight_color().unwrap_err();
        assert!(err.contains("Invalid highlight color"));
    }

    #[test]
    fn test_export_scale() {
        assert_eq!(ExportConfig::default().scale(), 1);
        assert_eq!(ExportConfig::new(4).scale(), 4);
    }
}
