//! Style, theme and painter helpers for controls.

use fudge_theme::id::ResourceId;
use fudge_theme::painter::{PainterMapping, PainterTag};
use fudge_theme::registry::ThemeRegistry;
use fudge_theme::resources::StyleResources;
use fudge_theme::style::StyleId;
use fudge_theme::theme::ThemeId;
use fudge_theme::value::ResourceEnum;

use crate::error::CoreResult;
use crate::layout::invalidation::DirtyFlags;
use crate::tree::{ControlId, UiTree};
use crate::widget::class_chain;

/// What [UiTree::create_style_painter] did with the control's painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainterOutcome {
    /// The style still names the type of the existing painter; it was kept.
    Kept,
    /// A painter was constructed where there was none.
    Created,
    /// The existing painter was dropped and a new one constructed.
    Replaced,
    /// The style names no usable painter; any existing one was dropped.
    Missing,
}

impl PainterOutcome {
    /// Whether the control holds a painter afterwards.
    pub fn has_painter(self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl UiTree {
    /// The styles resources of `id` are resolved against, in order.
    ///
    /// The control's own style comes first, then the first class along its class chain
    /// with a registered style, then the registry's default style.
    pub fn style_chain(&self, id: ControlId, registry: &ThemeRegistry) -> CoreResult<Vec<StyleId>> {
        let node = self.node(id)?;
        let mut chain = Vec::with_capacity(3);

        if let Some(style) = node.style {
            if registry.style(style).is_some() {
                chain.push(style);
            } else {
                log::debug!("Control '{}' refers to a released style", node.name);
            }
        }

        let class_style = class_chain(node.widget.as_ref())
            .into_iter()
            .find_map(|class| registry.style_by_name(class));
        for style in class_style.into_iter().chain(registry.default_style()) {
            if !chain.contains(&style) {
                chain.push(style);
            }
        }

        Ok(chain)
    }

    /// The theme of `id`: its own, else the nearest ancestor's, else the main theme.
    pub fn effective_theme(&self, id: ControlId, registry: &ThemeRegistry) -> Option<ThemeId> {
        let mut current = Some(id);
        while let Some(control) = current {
            let node = self.nodes.get(control)?;
            if let Some(theme) = node.theme {
                return Some(theme);
            }
            current = node.parent;
        }
        registry.main_theme()
    }

    /// Typed resource access over the style chain and theme of `id`.
    pub fn style_resources<'r>(&self, id: ControlId, registry: &'r ThemeRegistry) -> CoreResult<StyleResources<'r>> {
        let styles = self.style_chain(id, registry)?;
        Ok(registry.resources(styles, self.effective_theme(id, registry)))
    }

    /// The enum resource `resource` as seen by `id`.
    pub fn get_style_enum<T: ResourceEnum>(&self, id: ControlId, registry: &ThemeRegistry, resource: ResourceId) -> Option<T> {
        self.style_resources(id, registry).ok()?.get_enum(resource)
    }

    /// The first of `resources` that resolves to a `T`.
    ///
    /// Each id is resolved over the whole chain and the theme before the next id is
    /// tried. An id whose value has another type counts as not found.
    pub fn get_style_enum_any<T: ResourceEnum>(
        &self,
        id: ControlId,
        registry: &ThemeRegistry,
        resources: &[ResourceId],
    ) -> Option<T> {
        self.style_resources(id, registry).ok()?.get_enum_any(resources)
    }

    /// Set the theme of `id`, which its descendants inherit.
    pub fn set_theme(&mut self, id: ControlId, theme: Option<ThemeId>, registry: &ThemeRegistry) -> CoreResult<()> {
        self.node_mut(id)?.theme = theme;
        self.mark_dirty(id, DirtyFlags::MEASURE);
        self.refresh_all_painters(id, registry)
    }

    /// Set the style of `id`. A private style the control owned is released.
    pub fn set_style(&mut self, id: ControlId, style: Option<StyleId>, registry: &mut ThemeRegistry) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.private_style {
            if let Some(previous) = node.style {
                registry.release_private_style(previous);
            }
        }
        node.style = style;
        node.private_style = false;

        self.mark_dirty(id, DirtyFlags::MEASURE);
        self.refresh_painters(id, registry)
    }

    /// Give `id` a private style of its own, inheriting from its current style.
    ///
    /// A private style the control already owned is replaced; the new one inherits
    /// from the old one's parent.
    pub fn create_private_style(&mut self, id: ControlId, registry: &mut ThemeRegistry) -> CoreResult<StyleId> {
        let node = self.node(id)?;
        let parent = match node.style {
            Some(style) if node.private_style => registry.style(style).and_then(|style| style.parent()),
            Some(style) => Some(style),
            None => self.style_chain(id, registry)?.first().copied(),
        };

        let style = registry.create_private_style(parent)?;
        let node = self.node_mut(id)?;
        if node.private_style {
            if let Some(previous) = node.style {
                registry.release_private_style(previous);
            }
        }
        node.style = Some(style);
        node.private_style = true;

        self.mark_dirty(id, DirtyFlags::MEASURE);
        Ok(style)
    }

    /// Make the painter of `id` stored under `painter_id` match what the style names.
    ///
    /// If the resolved painter type is the type of the current painter, the painter is
    /// kept and re-initialized. Otherwise the current painter is dropped and, when the
    /// name resolves to a registered type deriving from `required_base`, a new one is
    /// constructed, initialized and stored.
    pub fn create_style_painter(
        &mut self,
        id: ControlId,
        registry: &ThemeRegistry,
        painter_id: ResourceId,
        required_base: PainterTag,
        mapping: &PainterMapping,
    ) -> CoreResult<PainterOutcome> {
        let resources = self.style_resources(id, registry)?;
        let name = resources.painter_name(painter_id);
        let node = self.node_mut(id)?;

        let current = node.painters.get(painter_id).map(|painter| painter.tag());
        if let (Some(current), Some(name)) = (current, name) {
            if current.name() == name {
                if let Some(painter) = node.painters.get_mut(painter_id) {
                    painter.initialize(&resources, mapping);
                    node.widget.configure_painter(painter_id, painter.as_mut());
                }
                return Ok(PainterOutcome::Kept);
            }
        }

        let had_painter = node.painters.remove(painter_id).is_some();
        let created = name.and_then(|name| registry.create_painter_named(name, required_base));
        let Some(mut painter) = created else {
            if had_painter {
                log::debug!("Control '{}' lost its painter {}", node.name, painter_id);
            }
            self.mark_dirty(id, DirtyFlags::MEASURE);
            return Ok(PainterOutcome::Missing);
        };

        painter.initialize(&resources, mapping);
        node.widget.configure_painter(painter_id, painter.as_mut());
        node.painters.insert(painter_id, painter);
        self.mark_dirty(id, DirtyFlags::MEASURE);

        Ok(if had_painter {
            PainterOutcome::Replaced
        } else {
            PainterOutcome::Created
        })
    }

    /// Run [create_style_painter](Self::create_style_painter) for every painter the
    /// widget of `id` requests.
    pub fn refresh_painters(&mut self, id: ControlId, registry: &ThemeRegistry) -> CoreResult<()> {
        let requests = self.node(id)?.widget.painter_requests();
        for request in requests {
            self.create_style_painter(id, registry, request.painter_id, request.required_base, &request.mapping)?;
        }
        Ok(())
    }

    /// Refresh the painters of `root` and everything below it.
    pub fn refresh_all_painters(&mut self, root: ControlId, registry: &ThemeRegistry) -> CoreResult<()> {
        self.refresh_painters(root, registry)?;
        let children = self.children(root).to_vec();
        for child in children {
            self.refresh_all_painters(child, registry)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{PainterRequest, Widget};
    use fudge_theme::align::HorizontalAlign;
    use fudge_theme::ids;
    use fudge_theme::painter::TextPainter;
    use fudge_theme::value::ResourceValue;
    use std::any::Any;

    #[derive(Debug, Default)]
    struct Fancy;

    impl Widget for Fancy {
        fn type_name(&self) -> &'static str {
            "Fancy"
        }

        fn base_classes(&self) -> &'static [&'static str] {
            &["Plain"]
        }

        fn painter_requests(&self) -> Vec<PainterRequest> {
            vec![PainterRequest::new(ids::LABEL_PAINTER, PainterTag::PART_PAINTER)]
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn registry() -> ThemeRegistry {
        let mut registry = ThemeRegistry::default();
        assert!(registry.initialize());
        registry
    }

    #[test]
    fn test_style_chain_order() {
        let mut registry = registry();
        let default = registry.default_style().unwrap();
        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");

        assert_eq!(tree.style_chain(id, &registry).unwrap(), vec![default]);

        let plain = registry.create_inherited_style(default, "Plain").unwrap();
        assert_eq!(tree.style_chain(id, &registry).unwrap(), vec![plain, default]);

        let fancy = registry.create_inherited_style(plain, "Fancy").unwrap();
        let own = registry.create_style("own").unwrap();
        tree.set_style(id, Some(own), &mut registry).unwrap();
        assert_eq!(tree.style_chain(id, &registry).unwrap(), vec![own, fancy, default]);
    }

    #[test]
    fn test_theme_is_inherited() {
        let mut registry = registry();
        let dark = registry.create_theme("dark").unwrap();

        let mut tree = UiTree::new();
        let root = tree.create(crate::widget::GuiRoot, "root");
        let child = tree.create(Fancy, "child");
        tree.add_child(root, child).unwrap();

        assert_eq!(tree.effective_theme(child, &registry), registry.main_theme());
        tree.set_theme(root, Some(dark), &registry).unwrap();
        assert_eq!(tree.effective_theme(child, &registry), Some(dark));
    }

    #[test]
    fn test_painter_outcomes() {
        let mut registry = registry();
        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");
        let mapping = PainterMapping::new();
        let base = PainterTag::PART_PAINTER;

        let outcome = tree.create_style_painter(id, &registry, ids::LABEL_PAINTER, base, &mapping);
        assert_eq!(outcome.unwrap(), PainterOutcome::Created);
        let outcome = tree.create_style_painter(id, &registry, ids::LABEL_PAINTER, base, &mapping);
        assert_eq!(outcome.unwrap(), PainterOutcome::Kept);
        assert!(tree.get(id).unwrap().painters().get_as::<TextPainter>(ids::LABEL_PAINTER).is_some());

        let style = tree.create_private_style(id, &mut registry).unwrap();
        registry
            .set_painter_override(style, ids::LABEL_PAINTER, "FramedFieldPainter")
            .unwrap();
        let outcome = tree.create_style_painter(id, &registry, ids::LABEL_PAINTER, base, &mapping);
        assert_eq!(outcome.unwrap(), PainterOutcome::Replaced);

        registry.set_painter_override(style, ids::LABEL_PAINTER, "NoSuchPainter").unwrap();
        let outcome = tree.create_style_painter(id, &registry, ids::LABEL_PAINTER, base, &mapping);
        assert_eq!(outcome.unwrap(), PainterOutcome::Missing);
        assert!(tree.get(id).unwrap().painters().is_empty());
    }

    #[test]
    fn test_painter_must_derive_from_base() {
        let registry = registry();
        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");

        let outcome = tree.create_style_painter(
            id,
            &registry,
            ids::LABEL_PAINTER,
            PainterTag::STATE_PAINTER,
            &PainterMapping::new(),
        );
        assert_eq!(outcome.unwrap(), PainterOutcome::Missing);
    }

    #[test]
    fn test_private_style_is_released() {
        let mut registry = registry();
        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");

        let first = tree.create_private_style(id, &mut registry).unwrap();
        let second = tree.create_private_style(id, &mut registry).unwrap();
        assert!(registry.style(first).is_none());
        assert_eq!(registry.style(second).unwrap().parent(), registry.default_style());

        tree.destroy(id, &mut registry).unwrap();
        assert!(registry.style(second).is_none());
    }

    #[test]
    fn test_own_style_value_of_other_type_hides_class_enum() {
        let mut registry = registry();
        let default = registry.default_style().unwrap();
        let class = registry.create_inherited_style(default, "Fancy").unwrap();
        let own = registry.create_style("own").unwrap();
        let align = ResourceId::new(500);
        registry.set_enum_override(class, align, HorizontalAlign::Center).unwrap();

        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");
        tree.set_style(id, Some(own), &mut registry).unwrap();
        assert_eq!(
            tree.get_style_enum::<HorizontalAlign>(id, &registry, align),
            Some(HorizontalAlign::Center)
        );

        registry.set_value_override(own, align, 7i64).unwrap();
        assert_eq!(tree.get_style_enum::<HorizontalAlign>(id, &registry, align), None);
    }

    #[test]
    fn test_style_enum_any_prefers_earlier_id_from_theme() {
        let mut registry = registry();
        let default = registry.default_style().unwrap();
        let main = registry.main_theme().unwrap();
        let (first, second) = (ResourceId::new(501), ResourceId::new(502));
        registry
            .theme_mut(main)
            .unwrap()
            .set(first, ResourceValue::enumeration(HorizontalAlign::Fill));
        registry.set_enum_override(default, second, HorizontalAlign::Center).unwrap();

        let mut tree = UiTree::new();
        let id = tree.create(Fancy, "fancy");
        assert_eq!(
            tree.get_style_enum_any::<HorizontalAlign>(id, &registry, &[first, second]),
            Some(HorizontalAlign::Fill)
        );

        // An id holding another type is skipped, not fatal.
        registry.set_value_override(default, first, 1i64).unwrap();
        assert_eq!(
            tree.get_style_enum_any::<HorizontalAlign>(id, &registry, &[first, second]),
            Some(HorizontalAlign::Center)
        );
    }
}
