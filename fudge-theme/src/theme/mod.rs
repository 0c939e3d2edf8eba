//! # Themes
//!
//! A [Theme] is a flat store of typed resources keyed by [ResourceId]. Themes carry no
//! inheritance of their own; styles resolve against a theme as the last fallback.
//!
//! ```rust
//! use fudge_theme::theme::Theme;
//! use fudge_theme::ids;
//! use vello::peniko::Color;
//!
//! let mut theme = Theme::new("main");
//! theme.set(ids::TEXT_COLOR, Color::from_rgb8(0, 0, 0));
//! theme.set(ids::BORDER_WIDTH, 2.0f32);
//!
//! assert_eq!(theme.get_float(ids::BORDER_WIDTH), Some(2.0));
//! assert!(theme.get_float(ids::TEXT_COLOR).is_none());
//! ```

use indexmap::IndexMap;
use slotmap::new_key_type;
use vello::peniko::Color;

use crate::id::ResourceId;
use crate::value::{FontDescriptor, FromResource, ResourceEnum, ResourceValue};

/// Built-in default resources.
pub mod defaults;
/// Shared palette used by the defaults.
pub mod palette;

new_key_type! {
    /// Handle of a theme inside a registry.
    pub struct ThemeId;
}

/// A named store of typed resources.
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    resources: IndexMap<ResourceId, ResourceValue>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: IndexMap::new(),
        }
    }

    /// The theme name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Store a value, returning the previous one.
    pub fn set(&mut self, id: ResourceId, value: impl Into<ResourceValue>) -> Option<ResourceValue> {
        self.resources.insert(id, value.into())
    }

    /// Store an enum value.
    pub fn set_enum<T: ResourceEnum>(&mut self, id: ResourceId, value: T) -> Option<ResourceValue> {
        self.set(id, ResourceValue::enumeration(value))
    }

    /// Store a painter type name.
    pub fn set_painter(&mut self, id: ResourceId, painter: impl Into<String>) -> Option<ResourceValue> {
        self.set(id, ResourceValue::Painter(painter.into()))
    }

    /// Look up a raw value.
    pub fn get(&self, id: ResourceId) -> Option<&ResourceValue> {
        self.resources.get(&id)
    }

    /// Look up a value of type `T`.
    pub fn get_as<T: FromResource>(&self, id: ResourceId) -> Option<T> {
        self.get(id).and_then(T::from_resource)
    }

    /// Look up a color.
    pub fn get_color(&self, id: ResourceId) -> Option<Color> {
        self.get(id)?.as_color()
    }

    /// Look up a float.
    pub fn get_float(&self, id: ResourceId) -> Option<f32> {
        self.get(id)?.as_float()
    }

    /// Look up a font.
    pub fn get_font(&self, id: ResourceId) -> Option<&FontDescriptor> {
        self.get(id)?.as_font()
    }

    /// Look up an enum.
    pub fn get_enum<T: ResourceEnum>(&self, id: ResourceId) -> Option<T> {
        self.get(id)?.as_enum::<T>()
    }

    /// Remove a value.
    pub fn remove(&mut self, id: ResourceId) -> Option<ResourceValue> {
        self.resources.shift_remove(&id)
    }

    /// Whether the theme defines `id`.
    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Number of stored resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the theme is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &ResourceValue)> {
        self.resources.iter().map(|(id, value)| (*id, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::HorizontalAlign;
    use crate::ids;

    #[test]
    fn test_set_get_remove() {
        let mut theme = Theme::new("t");
        assert!(theme.set(ids::BORDER_WIDTH, 1.0f32).is_none());
        assert_eq!(theme.set(ids::BORDER_WIDTH, 2.0f32), Some(ResourceValue::Float(1.0)));
        assert!(theme.contains(ids::BORDER_WIDTH));
        assert_eq!(theme.remove(ids::BORDER_WIDTH), Some(ResourceValue::Float(2.0)));
        assert!(theme.is_empty());
    }

    #[test]
    fn test_typed_getters() {
        let mut theme = Theme::new("t");
        theme.set_enum(ids::TEXT_ALIGN, HorizontalAlign::Center);
        theme.set_painter(ids::BUTTON_PAINTER, "FramedFieldPainter");

        assert_eq!(theme.get_enum::<HorizontalAlign>(ids::TEXT_ALIGN), Some(HorizontalAlign::Center));
        assert_eq!(theme.get_as::<f32>(ids::TEXT_ALIGN), None);
        assert_eq!(
            theme.get(ids::BUTTON_PAINTER).and_then(|v| v.as_painter_name()),
            Some("FramedFieldPainter")
        );
    }
}
