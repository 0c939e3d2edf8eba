//! # Tree Snapshots
//!
//! A [WidgetDescriptor] holds everything needed to rebuild a control tree: type names,
//! control names, style names, child order, layout types and property bags. The
//! on-disk format belongs to the host; descriptors only promise serde support.

use serde::{Deserialize, Serialize};

use fudge_theme::registry::ThemeRegistry;

use crate::error::CoreResult;
use crate::factory::ControlFactory;
use crate::layout::Layout;
use crate::property::PropertyBag;
use crate::tree::{ControlId, UiTree};

const POSITION: &str = "position";
const HINT_POSITION: &str = "hint_position";
const HINT_SIZE: &str = "hint_size";
const MIN_SIZE: &str = "min_size";
const MAX_SIZE: &str = "max_size";

/// A serializable description of a control and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Control type name in the [ControlFactory].
    pub type_name: String,
    /// Control name.
    pub name: String,
    /// Name of the control's own style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Layout type name in the layout factory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Layout-wide settings.
    #[serde(default, skip_serializing_if = "PropertyBag::is_empty")]
    pub layout_properties: PropertyBag,
    /// Per-child layout settings, by child index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slot_properties: Vec<PropertyBag>,
    /// Geometry and widget settings.
    #[serde(default, skip_serializing_if = "PropertyBag::is_empty")]
    pub properties: PropertyBag,
    /// Children in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetDescriptor>,
}

impl WidgetDescriptor {
    /// Describe a control of type `type_name` called `name`.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder form setting the style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Builder form setting the layout type name.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// Builder form appending a child.
    pub fn with_child(mut self, child: WidgetDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Number of controls in the subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self, factory: &ControlFactory) -> CoreResult<()> {
        factory.create(&self.type_name)?;
        if let Some(layout) = &self.layout {
            factory.create_layout(layout)?;
        }
        self.children.iter().try_for_each(|child| child.validate(factory))
    }
}

impl UiTree {
    /// Describe `root` and its subtree.
    pub fn snapshot(&self, root: ControlId, registry: &ThemeRegistry) -> CoreResult<WidgetDescriptor> {
        let node = self.node(root)?;

        let style = node.style.and_then(|style| match registry.style(style).and_then(|s| s.name()) {
            Some(name) => Some(name.to_string()),
            None => {
                log::debug!("Style of control '{}' is private or released, not exported", node.name);
                None
            },
        });

        let mut properties = PropertyBag::new();
        properties.set(POSITION, node.position);
        properties.set(HINT_POSITION, node.hint_position);
        for (key, size) in [(HINT_SIZE, node.hint_size), (MIN_SIZE, node.min_size), (MAX_SIZE, node.max_size)] {
            if let Some(size) = size {
                properties.set(key, size);
            }
        }
        properties.extend(node.widget.properties());

        let (layout, layout_properties, slot_properties) = match node.layout.as_deref() {
            Some(layout) => {
                let slots: Vec<_> = (0..node.children.len()).map(|index| layout.slot_properties(index)).collect();
                let slots = if slots.iter().all(PropertyBag::is_empty) { Vec::new() } else { slots };
                (Some(layout.type_name().to_string()), layout.properties(), slots)
            },
            None => (None, PropertyBag::new(), Vec::new()),
        };

        let children = node
            .children
            .iter()
            .map(|child| self.snapshot(*child, registry))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(WidgetDescriptor {
            type_name: node.widget.type_name().to_string(),
            name: node.name.clone(),
            style,
            layout,
            layout_properties,
            slot_properties,
            properties,
            children,
        })
    }

    /// Build the tree `descriptor` describes and return its root.
    ///
    /// Every type name is checked before anything is created. If building still fails
    /// the partial tree is destroyed, so either the whole tree exists or nothing does.
    /// Painters are refreshed once the tree is complete.
    pub fn instantiate(
        &mut self,
        descriptor: &WidgetDescriptor,
        factory: &ControlFactory,
        registry: &mut ThemeRegistry,
    ) -> CoreResult<ControlId> {
        descriptor.validate(factory)?;
        let root = self.build(descriptor, factory, registry)?;
        self.refresh_all_painters(root, registry)?;

        log::debug!("Instantiated {} controls from '{}'", descriptor.count(), descriptor.name);
        Ok(root)
    }

    fn build(
        &mut self,
        descriptor: &WidgetDescriptor,
        factory: &ControlFactory,
        registry: &mut ThemeRegistry,
    ) -> CoreResult<ControlId> {
        let mut widget = factory.create(&descriptor.type_name)?;
        widget.apply_properties(&descriptor.properties);
        let id = self.create_boxed(widget, descriptor.name.clone());

        if let Err(err) = self.populate(id, descriptor, factory, registry) {
            if let Err(cleanup) = self.destroy(id, registry) {
                log::error!("Failed to clean up control '{}': {}", descriptor.name, cleanup);
            }
            return Err(err);
        }
        Ok(id)
    }

    fn populate(
        &mut self,
        id: ControlId,
        descriptor: &WidgetDescriptor,
        factory: &ControlFactory,
        registry: &mut ThemeRegistry,
    ) -> CoreResult<()> {
        let properties = &descriptor.properties;
        let node = self.node_mut(id)?;
        node.position = properties.get_vec2(POSITION).unwrap_or(node.position);
        node.hint_position = properties.get_vec2(HINT_POSITION).unwrap_or(node.hint_position);
        node.hint_size = properties.get_vec2(HINT_SIZE);
        node.min_size = properties.get_vec2(MIN_SIZE);
        node.max_size = properties.get_vec2(MAX_SIZE);

        if let Some(name) = &descriptor.style {
            match registry.style_by_name(name) {
                Some(style) => node.style = Some(style),
                None => log::warn!("Style '{}' of control '{}' not found", name, descriptor.name),
            }
        }

        if let Some(layout_name) = &descriptor.layout {
            let mut layout = factory.create_layout(layout_name)?;
            layout.apply_properties(&descriptor.layout_properties);
            self.set_layout(id, Some(layout))?;
        }

        for child_descriptor in &descriptor.children {
            let child = self.build(child_descriptor, factory, registry)?;
            if let Err(err) = self.add_child(id, child) {
                self.destroy(child, registry)?;
                return Err(err);
            }
        }

        if !descriptor.slot_properties.is_empty() {
            self.with_any_layout_mut(id, |layout: &mut dyn Layout| {
                for (index, slot) in descriptor.slot_properties.iter().enumerate() {
                    layout.apply_slot_properties(index, slot);
                }
            });
        }
        Ok(())
    }
}
