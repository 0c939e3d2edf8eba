//! Typed resource access over an ordered chain of styles.

use vello::peniko::Color;

use crate::id::ResourceId;
use crate::registry::ThemeRegistry;
use crate::style::StyleId;
use crate::theme::{Theme, ThemeId};
use crate::value::{FontDescriptor, FromResource, Padding, ResourceEnum, ResourceValue, TextureHandle};

/// Resolves resources over a chain of styles, then a theme.
///
/// A control's chain is usually its own style followed by its class style. The first
/// style that resolves an id answers for it, and the theme only when no style does, see
/// [Resolver::resolve_chain](crate::resolver::Resolver::resolve_chain). A value of the
/// wrong type counts as not found.
#[derive(Debug, Clone)]
pub struct StyleResources<'a> {
    registry: &'a ThemeRegistry,
    styles: Vec<StyleId>,
    theme: Option<ThemeId>,
}

impl<'a> StyleResources<'a> {
    /// Create a view over `styles` and `theme`.
    pub fn new(registry: &'a ThemeRegistry, styles: Vec<StyleId>, theme: Option<ThemeId>) -> Self {
        Self {
            registry,
            styles,
            theme,
        }
    }

    /// The registry the view reads from.
    pub fn registry(&self) -> &'a ThemeRegistry {
        self.registry
    }

    /// The style chain.
    pub fn styles(&self) -> &[StyleId] {
        &self.styles
    }

    /// The theme.
    pub fn theme(&self) -> Option<ThemeId> {
        self.theme
    }

    fn theme_ref(&self) -> Option<&'a Theme> {
        self.theme.and_then(|theme| self.registry.theme(theme))
    }

    fn find<T>(&self, ids: &[ResourceId], accept: impl Fn(&'a ResourceValue) -> Option<T>) -> Option<T> {
        self.registry
            .resolver()
            .find_in_styles(&self.styles, ids, self.theme_ref(), accept)
            .ok()
            .flatten()
    }

    /// The raw value of `id`.
    pub fn value(&self, id: ResourceId) -> Option<&'a ResourceValue> {
        self.find(&[id], Some)
    }

    /// The value of `id` as a `T`.
    pub fn get<T: FromResource>(&self, id: ResourceId) -> Option<T> {
        self.find(&[id], T::from_resource)
    }

    /// Resolve a color.
    pub fn color(&self, id: ResourceId) -> Option<Color> {
        self.get(id)
    }

    /// Resolve a float.
    pub fn float(&self, id: ResourceId) -> Option<f32> {
        self.get(id)
    }

    /// Resolve an integer.
    pub fn int(&self, id: ResourceId) -> Option<i64> {
        self.get(id)
    }

    /// Resolve a flag.
    pub fn bool(&self, id: ResourceId) -> Option<bool> {
        self.get(id)
    }

    /// Resolve a font.
    pub fn font(&self, id: ResourceId) -> Option<FontDescriptor> {
        self.get(id)
    }

    /// Resolve a texture handle.
    pub fn texture(&self, id: ResourceId) -> Option<TextureHandle> {
        self.get(id)
    }

    /// Resolve padding.
    pub fn padding(&self, id: ResourceId) -> Option<Padding> {
        self.get(id)
    }

    /// Resolve a painter type name.
    pub fn painter_name(&self, id: ResourceId) -> Option<&'a str> {
        self.find(&[id], ResourceValue::as_painter_name)
    }

    /// Resolve an enum of type `T`.
    pub fn get_enum<T: ResourceEnum>(&self, id: ResourceId) -> Option<T> {
        self.get_enum_any(&[id])
    }

    /// Resolve the first of `ids` that resolves to an enum of type `T`.
    pub fn get_enum_any<T: ResourceEnum>(&self, ids: &[ResourceId]) -> Option<T> {
        self.find(ids, ResourceValue::as_enum::<T>)
    }
}
