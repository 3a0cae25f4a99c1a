//! Graintfa - A canvas compositor for Minecraft GUI textures.
//!
//! Scenes are a background element plus placed foreground elements, each
//! drawn by an element registered in an [`ElementRegistry`]. This crate
//! loads scenes from JSON, composites them onto a pixel surface, edits them
//! through pointer-driven selection and dragging, and exports PNG textures.

pub mod commands;
pub mod compositor;
pub mod config;
pub mod editor;
pub mod export;
pub mod interaction;
pub mod scene;

mod error;

pub use graintfa_core::{
    color, element, geometry, identifier, registry, schema, surface, ElementError,
};

pub use error::GraintfaError;

use image::RgbaImage;
use log::{debug, info, trace, warn};

use config::AppConfig;
use editor::Editor;
use registry::ElementRegistry;
use scene::{ElementInstance, Scene, SceneDocument};

/// Builder for loading, rendering, and editing GUI scenes.
///
/// # Examples
///
/// ```rust
/// use graintfa::{GuiBuilder, config::AppConfig};
///
/// let source = r#"{
///     "elementIndexCounter": 1,
///     "elements": [
///         {"elementId": "empty_inventory", "dimensions": {"x": 0, "y": 0, "width": 176, "height": 166}},
///         {"elementId": "slot", "dimensions": {"x": 7, "y": 83, "width": 18, "height": 18}, "name": "field 1"}
///     ]
/// }"#;
///
/// let builder = GuiBuilder::new(AppConfig::default()).expect("built-in elements register");
/// let scene = builder.parse(source).expect("Failed to parse");
/// let png = builder.render_png(&scene).expect("Failed to render");
/// assert!(png.starts_with(b"\x89PNG"));
/// ```
#[derive(Debug)]
pub struct GuiBuilder {
    config: AppConfig,
    registry: ElementRegistry,
}

impl GuiBuilder {
    /// Create a new builder with the built-in elements registered.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Element`] if a built-in element fails to
    /// initialize.
    pub fn new(config: AppConfig) -> Result<Self, GraintfaError> {
        Ok(Self::with_registry(config, ElementRegistry::with_builtins()?))
    }

    /// Create a builder over an existing registry.
    pub fn with_registry(config: AppConfig, registry: ElementRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Mutable access for registering additional elements.
    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    /// Parse a JSON scene document.
    ///
    /// Instances of unregistered elements and config values that do not
    /// match their element's schema are kept and reported as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Document`] for malformed JSON or a document
    /// without a background.
    pub fn parse(&self, source: &str) -> Result<Scene, GraintfaError> {
        info!("Parsing scene document");
        let document = SceneDocument::from_json(source)?;
        let scene = Scene::from_document(document)?;

        std::iter::once(scene.background())
            .chain(scene.foreground())
            .for_each(|instance| self.check_instance(instance));

        debug!(foreground_count = scene.foreground().len(); "Scene parsed successfully");
        trace!(scene:?; "Parsed scene");
        Ok(scene)
    }

    /// Render `scene` at the configured export scale.
    ///
    /// # Errors
    ///
    /// See [`export::render_image`].
    pub fn render_image(&self, scene: &Scene) -> Result<RgbaImage, GraintfaError> {
        export::render_image(&self.registry, scene, self.config.export().scale())
    }

    /// Render `scene` at the configured export scale and encode it as PNG.
    ///
    /// # Errors
    ///
    /// See [`export::render_image`] and [`export::encode_png`].
    pub fn render_png(&self, scene: &Scene) -> Result<Vec<u8>, GraintfaError> {
        let image = self.render_image(scene)?;
        export::encode_png(&image)
    }

    /// Start an editing session on `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Config`] if the configured highlight color is
    /// invalid.
    pub fn editor(&self, scene: Scene) -> Result<Editor<'_>, GraintfaError> {
        let highlight = self
            .config
            .render()
            .highlight_color()
            .map_err(GraintfaError::Config)?;
        Ok(Editor::new(&self.registry, scene, highlight.to_pixel()))
    }

    fn check_instance(&self, instance: &ElementInstance) {
        let Some(element) = self.registry.get(instance.element_id()) else {
            warn!(element_id:% = instance.element_id(); "Scene refers to an unregistered element");
            return;
        };
        if let Err(err) = element.config_schema().check(instance.data()) {
            warn!(
                element_id:% = instance.element_id(),
                name = instance.name(),
                err:%;
                "Instance data does not match element schema"
            );
        }
    }
}
