//! # Resource Values
//!
//! Type-erased values stored in themes and style overrides. Values are checked
//! on read: every accessor returns `None` when the stored variant does not match
//! the requested type, so a mismatch behaves exactly like a missing resource.

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::painter::StateOrder;

/// An enum that can be stored as a resource.
///
/// Usually derived with `#[derive(ResourceEnum)]`, which maps each variant to its
/// discriminant. [TYPE_NAME](ResourceEnum::TYPE_NAME) is compared on read, so two
/// enums sharing raw values can never be confused with each other.
pub trait ResourceEnum: Sized + Copy {
    /// Unique name of the enum type.
    const TYPE_NAME: &'static str;

    /// Convert the variant into its raw value.
    fn to_raw(self) -> i64;

    /// Convert a raw value back, `None` if no variant matches.
    fn from_raw(raw: i64) -> Option<Self>;
}

/// A type-tagged enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// [ResourceEnum::TYPE_NAME] of the stored enum.
    pub type_name: &'static str,
    /// The raw variant value.
    pub raw: i64,
}

impl EnumValue {
    /// Wrap an enum variant.
    pub fn of<T: ResourceEnum>(value: T) -> Self {
        Self {
            type_name: T::TYPE_NAME,
            raw: value.to_raw(),
        }
    }

    /// Read back as `T`, `None` on a type mismatch or unknown variant.
    pub fn get<T: ResourceEnum>(&self) -> Option<T> {
        if self.type_name != T::TYPE_NAME {
            return None;
        }
        T::from_raw(self.raw)
    }
}

/// Describes a font; glyph loading is the host's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name.
    pub family: String,
    /// Size in continuous units.
    pub size: f32,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
    /// Italic style.
    #[serde(default)]
    pub italic: bool,
}

impl FontDescriptor {
    /// Create a regular font.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Make the font bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Height of a single line of text.
    pub fn line_height(&self) -> f32 {
        (self.size * 1.25).ceil()
    }

    /// Rough advance width of `text`, used where the host does not provide metrics.
    pub fn estimate_width(&self, text: &str) -> f32 {
        let factor = if self.bold { 0.6 } else { 0.55 };
        text.chars().count() as f32 * self.size * factor
    }
}

/// Opaque reference to a texture owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(pub String);

impl TextureHandle {
    /// Create a handle from an asset path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The asset path.
    pub fn path(&self) -> &str {
        &self.0
    }
}

/// Edge insets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    /// Left inset.
    pub left: f32,
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Create padding from explicit edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same inset on every edge.
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right.
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A typed resource value.
#[derive(Debug, Clone)]
pub enum ResourceValue {
    /// A color.
    Color(Color),
    /// A continuous number.
    Float(f32),
    /// An integer.
    Int(i64),
    /// A flag.
    Bool(bool),
    /// A string.
    String(String),
    /// A type-tagged enum.
    Enum(EnumValue),
    /// A font descriptor.
    Font(FontDescriptor),
    /// A texture handle.
    Texture(TextureHandle),
    /// Edge insets.
    Padding(Padding),
    /// The name of a painter type.
    Painter(String),
    /// The order a state painter checks states in.
    StateOrder(StateOrder),
}

impl PartialEq for ResourceValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Font(a), Self::Font(b)) => a == b,
            (Self::Texture(a), Self::Texture(b)) => a == b,
            (Self::Padding(a), Self::Padding(b)) => a == b,
            (Self::Painter(a), Self::Painter(b)) => a == b,
            (Self::StateOrder(a), Self::StateOrder(b)) => a == b,
            _ => false,
        }
    }
}

impl ResourceValue {
    /// Wrap an enum variant.
    pub fn enumeration<T: ResourceEnum>(value: T) -> Self {
        Self::Enum(EnumValue::of(value))
    }

    /// Name of the stored variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Enum(_) => "enum",
            Self::Font(_) => "font",
            Self::Texture(_) => "texture",
            Self::Padding(_) => "padding",
            Self::Painter(_) => "painter",
            Self::StateOrder(_) => "state_order",
        }
    }

    /// Get the value as a color.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Get the value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    /// Get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the value as a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get the value as enum `T`.
    pub fn as_enum<T: ResourceEnum>(&self) -> Option<T> {
        match self {
            Self::Enum(value) => value.get::<T>(),
            _ => None,
        }
    }

    /// Get the value as a font.
    pub fn as_font(&self) -> Option<&FontDescriptor> {
        match self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Get the value as a texture handle.
    pub fn as_texture(&self) -> Option<&TextureHandle> {
        match self {
            Self::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    /// Get the value as padding.
    pub fn as_padding(&self) -> Option<Padding> {
        match self {
            Self::Padding(padding) => Some(*padding),
            _ => None,
        }
    }

    /// Get the value as a painter type name.
    pub fn as_painter_name(&self) -> Option<&str> {
        match self {
            Self::Painter(name) => Some(name),
            _ => None,
        }
    }

    /// Get the value as a state order.
    pub fn as_state_order(&self) -> Option<&StateOrder> {
        match self {
            Self::StateOrder(order) => Some(order),
            _ => None,
        }
    }
}

impl From<Color> for ResourceValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<f32> for ResourceValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for ResourceValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ResourceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ResourceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ResourceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<FontDescriptor> for ResourceValue {
    fn from(value: FontDescriptor) -> Self {
        Self::Font(value)
    }
}

impl From<TextureHandle> for ResourceValue {
    fn from(value: TextureHandle) -> Self {
        Self::Texture(value)
    }
}

impl From<Padding> for ResourceValue {
    fn from(value: Padding) -> Self {
        Self::Padding(value)
    }
}

/// Types that can be read out of a [ResourceValue].
pub trait FromResource: Sized {
    /// Extract `Self`, `None` on a type mismatch.
    fn from_resource(value: &ResourceValue) -> Option<Self>;
}

impl FromResource for Color {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_color()
    }
}

impl FromResource for f32 {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_float()
    }
}

impl FromResource for i64 {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_int()
    }
}

impl FromResource for bool {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromResource for String {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromResource for FontDescriptor {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_font().cloned()
    }
}

impl FromResource for TextureHandle {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_texture().cloned()
    }
}

impl FromResource for Padding {
    fn from_resource(value: &ResourceValue) -> Option<Self> {
        value.as_padding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{HorizontalAlign, VerticalAlign};

    #[test]
    fn test_type_mismatch_is_none() {
        let value = ResourceValue::Int(3);
        assert_eq!(value.as_color().map(|c| c.components), None);
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_int(), Some(3));
        assert_eq!(value.as_float(), Some(3.0));
    }

    #[test]
    fn test_enum_type_is_checked() {
        let value = ResourceValue::enumeration(HorizontalAlign::End);
        assert_eq!(value.as_enum::<HorizontalAlign>(), Some(HorizontalAlign::End));
        assert_eq!(value.as_enum::<VerticalAlign>(), None);
    }

    #[test]
    fn test_enum_unknown_raw() {
        let value = ResourceValue::Enum(EnumValue {
            type_name: <HorizontalAlign as ResourceEnum>::TYPE_NAME,
            raw: 99,
        });
        assert_eq!(value.as_enum::<HorizontalAlign>(), None);
    }

    #[test]
    fn test_color_equality() {
        let a = ResourceValue::from(Color::from_rgb8(10, 20, 30));
        let b = ResourceValue::from(Color::from_rgb8(10, 20, 30));
        let c = ResourceValue::from(Color::from_rgb8(10, 20, 31));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ResourceValue::Int(0));
    }

    #[test]
    fn test_padding_sums() {
        let padding = Padding::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(padding.width(), 4.0);
        assert_eq!(padding.height(), 6.0);
    }
}
