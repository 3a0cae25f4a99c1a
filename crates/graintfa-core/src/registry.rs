//! The element registry.
//!
//! An [`ElementRegistry`] maps [`ElementId`]s to element definitions. It is
//! filled once at startup (built-ins first, then anything a plugin loader
//! contributes) and is read-only afterwards. There is no global registry:
//! the application owns one and passes it by reference to whatever renders
//! or edits scenes, so tests can build a fresh one each time.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use graintfa_core::{
//!     element::SlotElement,
//!     identifier::ElementId,
//!     registry::{ElementRegistry, SLOT},
//! };
//!
//! let mut registry = ElementRegistry::with_builtins().unwrap();
//! assert!(registry.get(ElementId::new(SLOT)).is_some());
//! assert!(registry.get(ElementId::new("missing")).is_none());
//!
//! // Identifiers are unique
//! let again = registry.register(ElementId::new(SLOT), Rc::new(SlotElement::new()));
//! assert!(again.is_err());
//! ```

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    ElementError,
    element::{ElementDefinition, EmptyInventoryElement, SlotElement},
    identifier::ElementId,
};

/// Identifier of the built-in [`EmptyInventoryElement`].
pub const EMPTY_INVENTORY: &str = "empty_inventory";

/// Identifier of the built-in [`SlotElement`].
pub const SLOT: &str = "slot";

/// Name recorded for elements registered by the application itself.
pub const DEFAULT_REGISTERER: &str = "graintfa";

#[derive(Debug, Clone)]
struct Registration {
    definition: Rc<dyn ElementDefinition>,
    registerer: String,
}

/// A write-once-per-key map from [`ElementId`] to element definition.
///
/// Iteration follows registration order.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: IndexMap<ElementId, Registration>,
}

impl ElementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in elements.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementError`] if a built-in element fails to build,
    /// which indicates a bug in its glyph data.
    pub fn with_builtins() -> Result<Self, ElementError> {
        let mut registry = Self::new();
        registry.register_builtins()?;
        Ok(registry)
    }

    /// Registers the built-in elements.
    ///
    /// # Errors
    ///
    /// Returns an [`ElementError`] if a built-in element fails to build or
    /// one of their identifiers is already taken.
    pub fn register_builtins(&mut self) -> Result<(), ElementError> {
        self.register(
            ElementId::new(EMPTY_INVENTORY),
            Rc::new(EmptyInventoryElement::new()?),
        )?;
        self.register(ElementId::new(SLOT), Rc::new(SlotElement::new()))?;
        Ok(())
    }

    /// Registers an element on behalf of the application.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::DuplicateElement`] if `id` is already registered.
    pub fn register(
        &mut self,
        id: ElementId,
        definition: Rc<dyn ElementDefinition>,
    ) -> Result<(), ElementError> {
        self.register_as(id, definition, DEFAULT_REGISTERER)
    }

    /// Registers an element on behalf of `registerer`, typically a plugin name.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::DuplicateElement`] if `id` is already registered.
    /// The existing registration is left untouched.
    pub fn register_as(
        &mut self,
        id: ElementId,
        definition: Rc<dyn ElementDefinition>,
        registerer: &str,
    ) -> Result<(), ElementError> {
        if let Some(existing) = self.elements.get(&id) {
            debug!(
                element_id:% = id,
                registered_by = existing.registerer.as_str();
                "Element already registered"
            );
            return Err(ElementError::DuplicateElement {
                id,
                registerer: registerer.to_string(),
            });
        }

        info!(element_id:% = id, registerer; "Registering element");
        self.elements.insert(
            id,
            Registration {
                definition,
                registerer: registerer.to_string(),
            },
        );
        Ok(())
    }

    /// Looks up an element. Absence is an expected outcome.
    pub fn get(&self, id: ElementId) -> Option<&dyn ElementDefinition> {
        self.elements
            .get(&id)
            .map(|registration| registration.definition.as_ref())
    }

    /// Returns a shared handle to an element definition.
    pub fn get_shared(&self, id: ElementId) -> Option<Rc<dyn ElementDefinition>> {
        self.elements
            .get(&id)
            .map(|registration| Rc::clone(&registration.definition))
    }

    /// Returns who registered `id`.
    pub fn registerer(&self, id: ElementId) -> Option<&str> {
        self.elements
            .get(&id)
            .map(|registration| registration.registerer.as_str())
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }

    /// Iterates all registered elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &dyn ElementDefinition)> {
        self.elements
            .iter()
            .map(|(id, registration)| (*id, registration.definition.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{Rect, Size},
        schema::ConfigValues,
        surface::PixelSurface,
    };

    #[derive(Debug)]
    struct Marker;

    impl ElementDefinition for Marker {
        fn min_size(&self) -> Size {
            Size::new(1, 1)
        }

        fn render(&self, _surface: &mut dyn PixelSurface, _rect: Rect, _config: &ConfigValues) {}
    }

    #[test]
    fn test_builtins_in_registration_order() {
        let registry = ElementRegistry::with_builtins().unwrap();

        let ids: Vec<String> = registry.ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec![EMPTY_INVENTORY, SLOT]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_builtin_minimum_sizes() {
        let registry = ElementRegistry::with_builtins().unwrap();

        let frame = registry.get(ElementId::new(EMPTY_INVENTORY)).unwrap();
        let slot = registry.get(ElementId::new(SLOT)).unwrap();

        assert_eq!(frame.min_size(), Size::new(8, 8));
        assert_eq!(slot.min_size(), Size::new(2, 2));
        assert!(frame.config_schema().is_empty());
        assert!(slot.config_schema().is_empty());
    }

    #[test]
    fn test_lookup_missing() {
        let registry = ElementRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(ElementId::new(SLOT)).is_none());
        assert!(registry.registerer(ElementId::new(SLOT)).is_none());
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = ElementRegistry::new();
        let id = ElementId::new("marker");

        registry.register_as(id, Rc::new(Marker), "first-plugin").unwrap();
        let err = registry
            .register_as(id, Rc::new(SlotElement::new()), "second-plugin")
            .unwrap_err();

        assert_eq!(
            err,
            ElementError::DuplicateElement {
                id,
                registerer: "second-plugin".to_string()
            }
        );
        assert_eq!(registry.registerer(id), Some("first-plugin"));
        assert_eq!(registry.get(id).unwrap().min_size(), Size::new(1, 1));
    }

    #[test]
    fn test_builtins_twice_fails() {
        let mut registry = ElementRegistry::with_builtins().unwrap();
        assert!(matches!(
            registry.register_builtins(),
            Err(ElementError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn test_default_registerer() {
        let registry = ElementRegistry::with_builtins().unwrap();
        assert_eq!(
            registry.registerer(ElementId::new(SLOT)),
            Some(DEFAULT_REGISTERER)
        );
    }

    #[test]
    fn test_get_shared_outlives_borrow() {
        let shared = {
            let registry = ElementRegistry::with_builtins().unwrap();
            registry.get_shared(ElementId::new(SLOT)).unwrap()
        };
        assert_eq!(shared.min_size(), Size::new(2, 2));
    }
}
