//! An interactive editing session.
//!
//! [`Editor`] owns the current [`Scene`], the selection and the render
//! surface. Every change goes through a pure transition (a pointer event
//! or a command from [`crate::commands`]); when the scene or selection
//! changes, the surface is redrawn from scratch.

use log::debug;

use graintfa_core::{
    geometry::{Point, Size},
    identifier::ElementId,
    registry::ElementRegistry,
    surface::{ImageSurface, Pixel, PixelSurface},
};

use crate::{
    GraintfaError, commands,
    compositor::Compositor,
    interaction::{InteractionController, PointerEvent, Selection, SelectionState, ViewTransform},
    scene::{Scene, SceneTarget},
};

/// A scene being edited against a registry.
#[derive(Debug)]
pub struct Editor<'a> {
    compositor: Compositor<'a>,
    controller: InteractionController<'a>,
    scene: Scene,
    selection: SelectionState,
    view: ViewTransform,
    surface: ImageSurface,
}

impl<'a> Editor<'a> {
    /// Starts a session and renders the initial frame. The view maps
    /// display pixels one to one onto the surface.
    pub fn new(registry: &'a ElementRegistry, scene: Scene, highlight: Pixel) -> Self {
        let surface = Compositor::new_surface(&scene);
        let view = ViewTransform::identity((surface.width(), surface.height()));
        let mut editor = Self {
            compositor: Compositor::new(registry, highlight),
            controller: InteractionController::new(registry),
            scene,
            selection: None,
            view,
            surface,
        };
        editor.render();
        editor
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Replaces the display mapping, e.g. after the canvas was zoomed.
    pub fn set_view(&mut self, view: ViewTransform) {
        self.view = view;
    }

    /// Feeds one pointer event through the controller. Returns `true` if
    /// the scene or selection changed.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        let transition = self
            .controller
            .handle(&self.scene, &self.selection, &self.view, event);
        self.apply(transition.scene, transition.selection)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.handle(&PointerEvent::down(x, y))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, buttons: u32) -> bool {
        self.handle(&PointerEvent::moved(x, y, buttons))
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.handle(&PointerEvent::up(x, y))
    }

    /// Selects `target` directly, or clears the selection when it does not
    /// exist.
    pub fn select(&mut self, target: Option<SceneTarget>) -> bool {
        let selection = target
            .filter(|target| self.scene.instance(*target).is_some())
            .map(Selection::new);
        self.apply(None, selection)
    }

    /// Adds an instance of `element_id` at `position` and selects it.
    ///
    /// # Errors
    ///
    /// Returns [`GraintfaError::UnknownElement`] if the element is not registered.
    pub fn add_element(&mut self, element_id: ElementId, position: Point) -> Result<(), GraintfaError> {
        let (scene, index) =
            commands::add_element(&self.scene, self.compositor.registry(), element_id, position)?;
        self.apply(
            Some(scene),
            Some(Selection::new(SceneTarget::Foreground(index))),
        );
        Ok(())
    }

    /// Duplicates the selected foreground instance and selects the copy.
    pub fn duplicate_selected(&mut self) -> bool {
        let Some(index) = self.selected_foreground() else {
            return false;
        };
        let scene = commands::duplicate(&self.scene, index);
        let copy = scene.foreground().len().saturating_sub(1);
        self.apply(
            Some(scene),
            Some(Selection::new(SceneTarget::Foreground(copy))),
        )
    }

    /// Removes the selected foreground instance and clears the selection.
    pub fn remove_selected(&mut self) -> bool {
        let Some(index) = self.selected_foreground() else {
            return false;
        };
        let scene = commands::remove(&self.scene, index);
        self.apply(Some(scene), None)
    }

    /// Nudges the selected foreground instance.
    pub fn nudge_selected(&mut self, direction: commands::Direction, step: i32) -> bool {
        let Some(index) = self.selected_foreground() else {
            return false;
        };
        let scene = commands::nudge(&self.scene, index, direction, step);
        self.apply(Some(scene), self.selection)
    }

    /// Resizes the selected instance, background included.
    pub fn resize_selected(&mut self, size: Size) -> bool {
        let Some(target) = self.selection.map(|selection| selection.target()) else {
            return false;
        };
        let scene = commands::resize(&self.scene, self.compositor.registry(), target, size);
        self.apply(Some(scene), self.selection)
    }

    /// Renames the selected instance.
    pub fn rename_selected(&mut self, name: impl Into<String>) -> bool {
        let Some(target) = self.selection.map(|selection| selection.target()) else {
            return false;
        };
        let scene = commands::rename(&self.scene, target, name);
        self.apply(Some(scene), self.selection)
    }

    /// Consumes the session, returning the edited scene.
    pub fn into_scene(self) -> Scene {
        self.scene
    }

    fn selected_foreground(&self) -> Option<usize> {
        match self.selection?.target() {
            SceneTarget::Foreground(index) => Some(index),
            SceneTarget::Background => None,
        }
    }

    fn apply(&mut self, scene: Option<Scene>, selection: SelectionState) -> bool {
        let scene_changed = scene.as_ref().is_some_and(|scene| *scene != self.scene);
        let selection_changed = selection != self.selection;
        if !scene_changed && !selection_changed {
            return false;
        }

        if let Some(scene) = scene.filter(|_| scene_changed) {
            self.scene = scene;
        }
        self.selection = selection;
        self.render();
        true
    }

    fn render(&mut self) {
        let (width, height) = Compositor::surface_size(&self.scene);
        if (self.surface.width(), self.surface.height()) != (width, height) {
            debug!(width, height; "Resizing editor surface");
            self.surface = ImageSurface::new(width, height);
            self.view = ViewTransform::identity((width, height));
        }
        self.compositor
            .render(&mut self.surface, &self.scene, &self.selection);
    }
}

#[cfg(test)]
mod tests {
    use graintfa_core::{
        geometry::Rect,
        registry::{EMPTY_INVENTORY, SLOT},
    };

    use super::*;
    use crate::{commands::Direction, interaction::PRIMARY_BUTTON, scene::ElementInstance};

    const HIGHLIGHT: Pixel = image::Rgba([0x3f, 0xa9, 0xf5, 0xff]);

    fn scene() -> Scene {
        Scene::new(ElementInstance::new(
            ElementId::new(EMPTY_INVENTORY),
            Rect::new(0, 0, 176, 166),
        ))
        .with_instance(ElementInstance::new(
            ElementId::new(SLOT),
            Rect::new(12, 17, 18, 18),
        ))
    }

    #[test]
    fn test_initial_render() {
        let registry = ElementRegistry::with_builtins().unwrap();
        let editor = Editor::new(&registry, scene(), HIGHLIGHT);

        assert_eq!((editor.surface().width(), editor.surface().height()), (178, 168));
        assert_eq!(editor.surface().pixel(13, 18), Some(image::Rgba([0x37, 0x37, 0x37, 0xff])));
        assert_eq!(*editor.selection(), None);
    }

    #[test]
    fn test_drag_session() {
        let registry = ElementRegistry::with_builtins().unwrap();
        let mut editor = Editor::new(&registry, scene(), HIGHLIGHT);

        // Surface (15, 20) is GUI (14, 19), inside the slot.
        assert!(editor.pointer_down(15.5, 20.5));
        assert_eq!(editor.surface().pixel(12, 17), Some(HIGHLIGHT));

        assert!(editor.pointer_move(25.5, 40.5, PRIMARY_BUTTON));
        assert_eq!(
            editor.scene().foreground()[0].dimensions(),
            Rect::new(22, 37, 18, 18)
        );
        assert!(!editor.pointer_move(25.5, 40.5, PRIMARY_BUTTON));

        assert!(editor.pointer_up(25.5, 40.5));
        assert!(!editor.pointer_move(60.5, 60.5, PRIMARY_BUTTON));
        assert_eq!(
            editor.into_scene().foreground()[0].dimensions(),
            Rect::new(22, 37, 18, 18)
        );
    }

    #[test]
    fn test_commands_on_selection() {
        let registry = ElementRegistry::with_builtins().unwrap();
        let mut editor = Editor::new(&registry, scene(), HIGHLIGHT);

        assert!(!editor.duplicate_selected());
        assert!(editor.select(Some(SceneTarget::Foreground(0))));
        assert!(editor.duplicate_selected());
        assert_eq!(
            *editor.selection(),
            Some(Selection::new(SceneTarget::Foreground(1)))
        );

        assert!(editor.nudge_selected(Direction::Right, 10));
        assert_eq!(editor.scene().foreground()[1].dimensions().x(), 22);

        assert!(editor.rename_selected("output"));
        assert_eq!(editor.scene().foreground()[1].name(), "output");

        assert!(editor.remove_selected());
        assert_eq!(editor.scene().foreground().len(), 1);
        assert_eq!(*editor.selection(), None);
    }

    #[test]
    fn test_background_resize_reallocates_surface() {
        let registry = ElementRegistry::with_builtins().unwrap();
        let mut editor = Editor::new(&registry, scene(), HIGHLIGHT);

        assert!(editor.select(Some(SceneTarget::Background)));
        assert!(editor.resize_selected(Size::new(100, 50)));

        assert_eq!((editor.surface().width(), editor.surface().height()), (102, 52));
        assert_eq!(editor.view().native(), (102, 52));
    }

    #[test]
    fn test_add_element_selects_it() {
        let registry = ElementRegistry::with_builtins().unwrap();
        let mut editor = Editor::new(&registry, scene(), HIGHLIGHT);

        editor
            .add_element(ElementId::new(SLOT), Point::new(50, 50))
            .unwrap();
        assert_eq!(
            *editor.selection(),
            Some(Selection::new(SceneTarget::Foreground(1)))
        );
        assert!(editor.add_element(ElementId::new("nope"), Point::new(0, 0)).is_err());
    }
}
