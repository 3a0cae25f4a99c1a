//! Draws a [`Scene`] onto a [`PixelSurface`].
//!
//! The surface is one pixel larger than GUI space on every side. GUI
//! coordinate `(x, y)` lands on surface pixel `(x + 1, y + 1)`, which leaves
//! room for the selection ring around elements touching the GUI edge.

use log::{trace, warn};

use graintfa_core::{
    geometry::Rect,
    surface::{ImageSurface, Pixel, PixelSurface},
    registry::ElementRegistry,
};

use crate::{
    interaction::SelectionState,
    scene::{ElementInstance, Scene},
};

/// Width of the transparent border around GUI space, in pixels.
pub const MARGIN: i32 = 1;

/// Renders scenes using the elements of a registry.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    registry: &'a ElementRegistry,
    highlight: Pixel,
}

impl<'a> Compositor<'a> {
    pub fn new(registry: &'a ElementRegistry, highlight: Pixel) -> Self {
        Self {
            registry,
            highlight,
        }
    }

    pub fn registry(&self) -> &'a ElementRegistry {
        self.registry
    }

    /// Surface dimensions required for `scene`: GUI size plus the margin on
    /// both sides.
    pub fn surface_size(scene: &Scene) -> (u32, u32) {
        let gui = scene.gui_size();
        let width = gui.width() + 2 * MARGIN;
        let height = gui.height() + 2 * MARGIN;
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Allocates a transparent surface sized for `scene`.
    pub fn new_surface(scene: &Scene) -> ImageSurface {
        let (width, height) = Self::surface_size(scene);
        ImageSurface::new(width, height)
    }

    /// Renders `scene` from scratch, then outlines the selected instance.
    ///
    /// The background is drawn first, then every foreground instance in
    /// order. Instances whose element id is not registered are skipped, as
    /// are instances with dimensions beyond the GUI coordinate limit.
    pub fn render(
        &self,
        surface: &mut dyn PixelSurface,
        scene: &Scene,
        selection: &SelectionState,
    ) {
        surface.clear();
        surface.set_smoothing(false);

        self.render_instance(surface, scene.background());
        for instance in scene.foreground() {
            self.render_instance(surface, instance);
        }

        let selected = selection
            .as_ref()
            .and_then(|selection| scene.instance(selection.target()));
        if let Some(instance) = selected.filter(|instance| instance.dimensions().is_bounded()) {
            self.draw_highlight(surface, instance.dimensions());
        }
    }

    fn render_instance(&self, surface: &mut dyn PixelSurface, instance: &ElementInstance) {
        let Some(element) = self.registry.get(instance.element_id()) else {
            warn!(
                element_id:% = instance.element_id(),
                name = instance.name();
                "Skipping instance of unregistered element"
            );
            return;
        };

        if !instance.dimensions().is_bounded() {
            warn!(
                element_id:% = instance.element_id(),
                rect:? = instance.dimensions();
                "Skipping instance outside GUI coordinate range"
            );
            return;
        }

        let rect = instance.dimensions().translate(MARGIN, MARGIN);
        trace!(element_id:% = instance.element_id(), rect:?; "Rendering instance");
        element.render(surface, rect, instance.data());
    }

    /// Draws a one pixel ring just outside `rect`, given in GUI space.
    fn draw_highlight(&self, surface: &mut dyn PixelSurface, rect: Rect) {
        let ring = rect.translate(MARGIN, MARGIN);
        let (left, top) = (ring.x() - 1, ring.y() - 1);
        let (outer_width, outer_height) = (ring.width() + 2, ring.height() + 2);

        surface.fill_rect(Rect::new(left, top, outer_width, 1), self.highlight);
        surface.fill_rect(Rect::new(left, ring.bottom(), outer_width, 1), self.highlight);
        surface.fill_rect(Rect::new(left, ring.y(), 1, ring.height()), self.highlight);
        surface.fill_rect(Rect::new(ring.right(), ring.y(), 1, ring.height()), self.highlight);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use proptest::prelude::*;

    use graintfa_core::{
        element::ElementDefinition,
        geometry::Size,
        identifier::ElementId,
        registry::{EMPTY_INVENTORY, SLOT},
        schema::ConfigValues,
        surface::TRANSPARENT,
    };

    use super::*;
    use crate::{interaction::Selection, scene::SceneTarget};

    const HIGHLIGHT: Pixel = image::Rgba([0x3f, 0xa9, 0xf5, 0xff]);
    const RED: Pixel = image::Rgba([0xff, 0, 0, 0xff]);

    /// Fills its whole rect with a single color.
    #[derive(Debug)]
    struct Solid(Pixel);

    impl ElementDefinition for Solid {
        fn min_size(&self) -> Size {
            Size::new(1, 1)
        }

        fn render(&self, surface: &mut dyn PixelSurface, rect: Rect, _data: &ConfigValues) {
            surface.fill_rect(rect, self.0);
        }
    }

    fn registry() -> ElementRegistry {
        let mut registry = ElementRegistry::with_builtins().unwrap();
        registry
            .register(ElementId::new("test:red"), Rc::new(Solid(RED)))
            .unwrap();
        registry
    }

    fn inventory(width: i32, height: i32) -> ElementInstance {
        ElementInstance::new(
            ElementId::new(EMPTY_INVENTORY),
            Rect::new(0, 0, width, height),
        )
    }

    fn render(registry: &ElementRegistry, scene: &Scene, selection: SelectionState) -> ImageSurface {
        let compositor = Compositor::new(registry, HIGHLIGHT);
        let mut surface = Compositor::new_surface(scene);
        compositor.render(&mut surface, scene, &selection);
        surface
    }

    #[test]
    fn test_surface_size_includes_margin() {
        let scene = Scene::new(inventory(176, 166));
        assert_eq!(Compositor::surface_size(&scene), (178, 168));
    }

    #[test]
    fn test_slot_on_inventory() {
        let registry = registry();
        let scene = Scene::new(inventory(176, 166)).with_instance(ElementInstance::new(
            ElementId::new(SLOT),
            Rect::new(12, 17, 18, 18),
        ));

        let surface = render(&registry, &scene, None);

        assert_eq!(surface.pixel(0, 0), Some(TRANSPARENT));
        // Slot top-left is dark gray, offset by the margin.
        assert_eq!(surface.pixel(13, 18), Some(image::Rgba([0x37, 0x37, 0x37, 0xff])));
        // Inventory center stays gray.
        assert_eq!(surface.pixel(100, 100), Some(image::Rgba([0xc6, 0xc6, 0xc6, 0xff])));
    }

    #[test]
    fn test_foreground_draws_in_order() {
        let registry = registry();
        let scene = Scene::new(inventory(40, 40))
            .with_instance(ElementInstance::new(
                ElementId::new(SLOT),
                Rect::new(10, 10, 18, 18),
            ))
            .with_instance(ElementInstance::new(
                ElementId::new("test:red"),
                Rect::new(10, 10, 4, 4),
            ));

        let surface = render(&registry, &scene, None);
        assert_eq!(surface.pixel(11, 11), Some(RED));
    }

    #[test]
    fn test_unknown_element_is_skipped() {
        let registry = registry();
        let plain = Scene::new(inventory(40, 40));
        let with_unknown = plain.clone().with_instance(ElementInstance::new(
            ElementId::new("plugin:missing"),
            Rect::new(5, 5, 10, 10),
        ));

        assert_eq!(
            render(&registry, &plain, None),
            render(&registry, &with_unknown, None)
        );
    }

    #[test]
    fn test_highlight_ring_surrounds_selection() {
        let registry = registry();
        let scene = Scene::new(inventory(40, 40)).with_instance(ElementInstance::new(
            ElementId::new("test:red"),
            Rect::new(10, 10, 4, 4),
        ));
        let selection = Some(Selection::new(SceneTarget::Foreground(0)));

        let surface = render(&registry, &scene, selection);

        // Ring occupies surface x/y in 10..=15, the element 11..=14.
        for i in 10..=15 {
            assert_eq!(surface.pixel(i, 10), Some(HIGHLIGHT));
            assert_eq!(surface.pixel(i, 15), Some(HIGHLIGHT));
            assert_eq!(surface.pixel(10, i), Some(HIGHLIGHT));
            assert_eq!(surface.pixel(15, i), Some(HIGHLIGHT));
        }
        assert_eq!(surface.pixel(11, 11), Some(RED));
        assert_eq!(surface.pixel(14, 14), Some(RED));
    }

    #[test]
    fn test_background_highlight_uses_margin() {
        let registry = registry();
        let scene = Scene::new(inventory(20, 20));
        let selection = Some(Selection::new(SceneTarget::Background));

        let surface = render(&registry, &scene, selection);

        assert_eq!(surface.pixel(0, 0), Some(HIGHLIGHT));
        assert_eq!(surface.pixel(21, 21), Some(HIGHLIGHT));
        assert_eq!(surface.pixel(1, 1), render(&registry, &scene, None).pixel(1, 1));
    }

    #[test]
    fn test_out_of_range_selection_draws_no_ring() {
        let registry = registry();
        let scene = Scene::new(inventory(20, 20));
        let selection = Some(Selection::new(SceneTarget::Foreground(4)));

        assert_eq!(
            render(&registry, &scene, selection),
            render(&registry, &scene, None)
        );
    }

    #[test]
    fn test_far_off_instances_are_skipped() {
        let registry = registry();
        let plain = Scene::new(inventory(176, 166));
        let far_off = plain
            .clone()
            .with_instance(ElementInstance::new(
                ElementId::new(SLOT),
                Rect::new(i32::MAX, 5, 18, 18),
            ))
            .with_instance(ElementInstance::new(
                ElementId::new(SLOT),
                Rect::new(2_147_483_000, 0, 1000, 18),
            ))
            .with_instance(ElementInstance::new(
                ElementId::new("test:red"),
                Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX),
            ));
        let selection = Some(Selection::new(SceneTarget::Foreground(0)));

        assert_eq!(
            render(&registry, &far_off, selection),
            render(&registry, &plain, None)
        );
    }

    #[test]
    fn test_oversized_background_surface_is_capped() {
        let registry = registry();
        let scene = Scene::new(inventory(2_000_000_000, 20));

        assert_eq!(
            Compositor::surface_size(&scene),
            (crate::scene::MAX_GUI_SIZE as u32 + 2, 22)
        );
        // The background itself is out of range, so nothing is drawn.
        let surface = render(&registry, &scene, None);
        assert_eq!(surface.pixel(10, 10), Some(TRANSPARENT));
    }

    proptest! {
        #[test]
        fn prop_render_is_idempotent(
            slots in prop::collection::vec((-20i32..60, -20i32..60, 2i32..30, 2i32..30), 0..6),
            selected in prop::option::of(0usize..6),
        ) {
            let registry = registry();
            let scene = slots.into_iter().fold(Scene::new(inventory(48, 40)), |scene, (x, y, w, h)| {
                scene.with_instance(ElementInstance::new(ElementId::new(SLOT), Rect::new(x, y, w, h)))
            });
            let selection = selected.map(|index| Selection::new(SceneTarget::Foreground(index)));

            let compositor = Compositor::new(&registry, HIGHLIGHT);
            let mut surface = Compositor::new_surface(&scene);
            compositor.render(&mut surface, &scene, &selection);
            let first = surface.clone();
            compositor.render(&mut surface, &scene, &selection);

            prop_assert_eq!(first, surface);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let registry = registry();
        let scene = Scene::new(inventory(30, 30)).with_instance(ElementInstance::new(
            ElementId::new(SLOT),
            Rect::new(3, 3, 18, 18),
        ));
        let compositor = Compositor::new(&registry, HIGHLIGHT);
        let mut surface = Compositor::new_surface(&scene);

        compositor.render(&mut surface, &scene, &None);
        let first = surface.clone();
        compositor.render(&mut surface, &scene, &None);

        assert_eq!(first, surface);
    }
}
