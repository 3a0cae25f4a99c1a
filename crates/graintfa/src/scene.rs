//! The scene model and its persisted document form.
//!
//! A [`Scene`] is one background [`ElementInstance`] plus an ordered list
//! of foreground instances. Foreground order is render order: later
//! instances draw on top and win hit tests.
//!
//! Scenes are values. Editing operations (see [`crate::commands`] and
//! [`crate::interaction`]) take a scene by reference and return a new one.
//!
//! # Document format
//!
//! ```json
//! {
//!   "elementIndexCounter": 1,
//!   "elements": [
//!     { "elementId": "empty_inventory", "dimensions": {"x": 0, "y": 0, "width": 176, "height": 166}, "data": {}, "name": "" },
//!     { "elementId": "slot", "dimensions": {"x": 7, "y": 83, "width": 18, "height": 18}, "data": {}, "name": "field 1" }
//!   ]
//! }
//! ```
//!
//! The first element is the background.

use serde::{Deserialize, Serialize};

use graintfa_core::{
    geometry::{COORDINATE_LIMIT, Point, Rect, Size},
    identifier::ElementId,
    schema::ConfigValues,
};

use crate::GraintfaError;

/// Largest GUI width or height a scene can render.
pub const MAX_GUI_SIZE: i32 = 4096;

/// One placed occurrence of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInstance {
    element_id: ElementId,
    dimensions: Rect,
    #[serde(default)]
    data: ConfigValues,
    /// User-chosen label; empty means unnamed.
    #[serde(default)]
    name: String,
}

impl ElementInstance {
    pub fn new(element_id: ElementId, dimensions: Rect) -> Self {
        Self {
            element_id,
            dimensions,
            data: ConfigValues::new(),
            name: String::new(),
        }
    }

    /// Sets the configuration values (builder style).
    pub fn with_data(mut self, data: ConfigValues) -> Self {
        self.data = data;
        self
    }

    /// Sets the name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn dimensions(&self) -> Rect {
        self.dimensions
    }

    pub fn data(&self) -> &ConfigValues {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_dimensions(&mut self, dimensions: Rect) {
        self.dimensions = dimensions;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Which instance of a scene an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneTarget {
    Background,
    /// Index into [`Scene::foreground`].
    Foreground(usize),
}

/// The in-memory document: a background plus foreground instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    background: ElementInstance,
    foreground: Vec<ElementInstance>,
    element_index_counter: u32,
}

impl Scene {
    /// Creates a scene with only a background.
    pub fn new(background: ElementInstance) -> Self {
        Self {
            background,
            foreground: Vec::new(),
            element_index_counter: 0,
        }
    }

    /// Appends a foreground instance on top (builder style).
    pub fn with_instance(mut self, instance: ElementInstance) -> Self {
        self.foreground.push(instance);
        self
    }

    pub fn background(&self) -> &ElementInstance {
        &self.background
    }

    /// Foreground instances in render order.
    pub fn foreground(&self) -> &[ElementInstance] {
        &self.foreground
    }

    /// Number used to name the most recently added instance.
    pub fn element_index_counter(&self) -> u32 {
        self.element_index_counter
    }

    /// Resolves a target to an instance. Out-of-range indices yield `None`.
    pub fn instance(&self, target: SceneTarget) -> Option<&ElementInstance> {
        match target {
            SceneTarget::Background => Some(&self.background),
            SceneTarget::Foreground(index) => self.foreground.get(index),
        }
    }

    /// The size of GUI space: the bottom-right corner of the background,
    /// clamped to `0..=MAX_GUI_SIZE`.
    pub fn gui_size(&self) -> Size {
        let rect = self.background.dimensions();
        Size::new(
            rect.right().clamp(0, MAX_GUI_SIZE),
            rect.bottom().clamp(0, MAX_GUI_SIZE),
        )
    }

    /// Returns a copy with the foreground instance at `index` moved so its
    /// top-left corner is `origin`, or `None` if `index` is out of range.
    pub fn with_instance_moved(&self, index: usize, origin: Point) -> Option<Self> {
        let mut scene = self.clone();
        let instance = scene.foreground.get_mut(index)?;
        instance.set_dimensions(instance.dimensions().with_origin(origin));
        Some(scene)
    }

    pub(crate) fn instance_mut(&mut self, target: SceneTarget) -> Option<&mut ElementInstance> {
        match target {
            SceneTarget::Background => Some(&mut self.background),
            SceneTarget::Foreground(index) => self.foreground.get_mut(index),
        }
    }

    pub(crate) fn foreground_mut(&mut self) -> &mut Vec<ElementInstance> {
        &mut self.foreground
    }

    /// Advances the naming counter and returns the new value.
    pub(crate) fn next_index(&mut self) -> u32 {
        self.element_index_counter += 1;
        self.element_index_counter
    }

    /// Builds a scene from its persisted form.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Document`] if the document has no elements,
    /// if any dimension exceeds [`COORDINATE_LIMIT`], or if the background
    /// reaches past [`MAX_GUI_SIZE`].
    pub fn from_document(document: SceneDocument) -> Result<Self, GraintfaError> {
        if let Some((index, instance)) = document
            .elements
            .iter()
            .enumerate()
            .find(|(_, instance)| !instance.dimensions().is_bounded())
        {
            return Err(GraintfaError::Document(format!(
                "element {index} ({}) has dimensions beyond ±{COORDINATE_LIMIT}",
                instance.element_id()
            )));
        }

        let mut elements = document.elements.into_iter();
        let background = elements.next().ok_or_else(|| {
            GraintfaError::Document("scene has no elements; expected a background".to_string())
        })?;

        let extent = background.dimensions();
        if extent.right() > MAX_GUI_SIZE || extent.bottom() > MAX_GUI_SIZE {
            return Err(GraintfaError::Document(format!(
                "background extends to {}x{}; GUI textures are at most {MAX_GUI_SIZE}x{MAX_GUI_SIZE}",
                extent.right(),
                extent.bottom()
            )));
        }

        Ok(Self {
            background,
            foreground: elements.collect(),
            element_index_counter: document.element_index_counter,
        })
    }

    /// Converts the scene to its persisted form.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            element_index_counter: self.element_index_counter,
            elements: std::iter::once(&self.background)
                .chain(&self.foreground)
                .cloned()
                .collect(),
        }
    }
}

/// The persisted form of a [`Scene`]. `elements[0]` is the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default)]
    pub element_index_counter: u32,
    pub elements: Vec<ElementInstance>,
}

impl SceneDocument {
    /// Parses a JSON scene document.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Document`] for malformed JSON or missing fields.
    pub fn from_json(source: &str) -> Result<Self, GraintfaError> {
        serde_json::from_str(source).map_err(GraintfaError::from)
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::Document`] if serialization fails.
    pub fn to_json(&self) -> Result<String, GraintfaError> {
        serde_json::to_string_pretty(self).map_err(GraintfaError::from)
    }
}

#[cfg(test)]
mod tests {
    use graintfa_core::registry::{EMPTY_INVENTORY, SLOT};

    use super::*;

    fn sample_scene() -> Scene {
        Scene::new(ElementInstance::new(
            ElementId::new(EMPTY_INVENTORY),
            Rect::new(0, 0, 176, 166),
        ))
        .with_instance(
            ElementInstance::new(ElementId::new(SLOT), Rect::new(12, 17, 18, 18))
                .with_name("field 1"),
        )
    }

    #[test]
    fn test_gui_size_is_background_extent() {
        assert_eq!(sample_scene().gui_size(), Size::new(176, 166));

        let offset = Scene::new(ElementInstance::new(
            ElementId::new(EMPTY_INVENTORY),
            Rect::new(2, 3, 10, 10),
        ));
        assert_eq!(offset.gui_size(), Size::new(12, 13));
    }

    #[test]
    fn test_gui_size_is_clamped() {
        let huge = Scene::new(ElementInstance::new(
            ElementId::new(EMPTY_INVENTORY),
            Rect::new(0, 0, 2_000_000_000, 166),
        ));
        assert_eq!(huge.gui_size(), Size::new(MAX_GUI_SIZE, 166));
    }

    #[test]
    fn test_from_document_rejects_far_off_coordinates() {
        let document = SceneDocument::from_json(
            r#"{"elements": [
                {"elementId": "empty_inventory", "dimensions": {"x": 0, "y": 0, "width": 176, "height": 166}},
                {"elementId": "slot", "dimensions": {"x": 2147483000, "y": 0, "width": 1000, "height": 18}}
            ]}"#,
        )
        .unwrap();

        let err = Scene::from_document(document).unwrap_err();
        assert!(matches!(&err, GraintfaError::Document(message) if message.contains("element 1")));
    }

    #[test]
    fn test_from_document_rejects_oversized_background() {
        let document = SceneDocument {
            element_index_counter: 0,
            elements: vec![ElementInstance::new(
                ElementId::new(EMPTY_INVENTORY),
                Rect::new(0, 0, 5000, 166),
            )],
        };
        assert!(matches!(
            Scene::from_document(document),
            Err(GraintfaError::Document(_))
        ));

        let document = SceneDocument {
            element_index_counter: 0,
            elements: vec![ElementInstance::new(
                ElementId::new(EMPTY_INVENTORY),
                Rect::new(0, 0, 2_000_000_000, 166),
            )],
        };
        assert!(matches!(
            Scene::from_document(document),
            Err(GraintfaError::Document(_))
        ));
    }

    #[test]
    fn test_instance_lookup() {
        let scene = sample_scene();

        assert_eq!(
            scene.instance(SceneTarget::Background).map(|i| i.element_id()),
            Some(ElementId::new(EMPTY_INVENTORY))
        );
        assert_eq!(
            scene.instance(SceneTarget::Foreground(0)).map(|i| i.name()),
            Some("field 1")
        );
        assert!(scene.instance(SceneTarget::Foreground(1)).is_none());
    }

    #[test]
    fn test_with_instance_moved_copies() {
        let scene = sample_scene();
        let moved = scene.with_instance_moved(0, Point::new(30, 40)).unwrap();

        assert_eq!(scene.foreground()[0].dimensions(), Rect::new(12, 17, 18, 18));
        assert_eq!(moved.foreground()[0].dimensions(), Rect::new(30, 40, 18, 18));
        assert!(scene.with_instance_moved(3, Point::new(0, 0)).is_none());
    }

    #[test]
    fn test_document_round_trip_preserves_order() {
        let scene = sample_scene();
        let document = scene.to_document();

        assert_eq!(document.elements.len(), 2);
        assert_eq!(document.elements[0].element_id(), EMPTY_INVENTORY);

        let json = document.to_json().unwrap();
        assert!(json.contains("\"elementIndexCounter\""));
        assert!(json.contains("\"elementId\": \"slot\""));

        let parsed = Scene::from_document(SceneDocument::from_json(&json).unwrap()).unwrap();
        assert_eq!(parsed, scene);
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let document = SceneDocument {
            element_index_counter: 0,
            elements: Vec::new(),
        };
        assert!(matches!(
            Scene::from_document(document),
            Err(GraintfaError::Document(_))
        ));
    }

    #[test]
    fn test_missing_dimensions_is_rejected() {
        let err = SceneDocument::from_json(r#"{"elements": [{"elementId": "slot"}]}"#).unwrap_err();
        assert!(matches!(err, GraintfaError::Document(_)));
    }

    #[test]
    fn test_optional_fields_default() {
        let document = SceneDocument::from_json(
            r#"{"elements": [{"elementId": "plugin:unknown", "dimensions": {"x": 0, "y": 0, "width": 8, "height": 8}}]}"#,
        )
        .unwrap();

        assert_eq!(document.element_index_counter, 0);
        assert!(document.elements[0].data().is_empty());
        assert_eq!(document.elements[0].name(), "");
    }
}
