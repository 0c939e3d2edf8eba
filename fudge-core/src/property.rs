//! Property bags: the per-control and per-layout settings an asset stores.

use indexmap::IndexMap;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use fudge_theme::value::{Padding, ResourceEnum};

/// A single serializable property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A flag.
    Bool(bool),
    /// An integer, also used for enums.
    Int(i64),
    /// A float.
    Float(f32),
    /// Text.
    String(String),
    /// A point or size.
    Vec2([f32; 2]),
    /// A color.
    Color(#[serde(with = "fudge_theme::serde_color")] Color),
    /// Edge insets.
    Padding(Padding),
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Vec2(a), Self::Vec2(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            (Self::Padding(a), Self::Padding(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vector2<f32>> for PropertyValue {
    fn from(value: Vector2<f32>) -> Self {
        Self::Vec2([value.x, value.y])
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Padding> for PropertyValue {
    fn from(value: Padding) -> Self {
        Self::Padding(value)
    }
}

/// Ordered name -> value map of properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    values: IndexMap<String, PropertyValue>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [set](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Store an enum by its raw value.
    pub fn set_enum<T: ResourceEnum>(&mut self, key: impl Into<String>, value: T) {
        self.set(key, value.to_raw());
    }

    /// The raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Whether `key` is set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// A flag.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// An integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// A float; integers are widened.
    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            PropertyValue::Float(value) => Some(*value),
            PropertyValue::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    /// Text.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// A point or size.
    pub fn get_vec2(&self, key: &str) -> Option<Vector2<f32>> {
        match self.get(key)? {
            PropertyValue::Vec2([x, y]) => Some(Vector2::new(*x, *y)),
            _ => None,
        }
    }

    /// A color.
    pub fn get_color(&self, key: &str) -> Option<Color> {
        match self.get(key)? {
            PropertyValue::Color(value) => Some(*value),
            _ => None,
        }
    }

    /// Edge insets.
    pub fn get_padding(&self, key: &str) -> Option<Padding> {
        match self.get(key)? {
            PropertyValue::Padding(value) => Some(*value),
            _ => None,
        }
    }

    /// An enum stored with [set_enum](Self::set_enum). Unknown raw values are `None`.
    pub fn get_enum<T: ResourceEnum>(&self, key: &str) -> Option<T> {
        self.get_int(key).and_then(T::from_raw)
    }

    /// Copy every entry of `other` into this bag.
    pub fn extend(&mut self, other: PropertyBag) {
        self.values.extend(other.values);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
