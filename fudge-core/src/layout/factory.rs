// SPDX-License-Identifier: MIT OR Apache-2.0

use indexmap::IndexMap;

use super::anchor::AnchorLayout;
use super::free::FreeLayout;
use super::list::{ListLayout, Orientation};
use super::proxy::ProxyLayout;
use super::stack::StackLayout;
use super::BoxedLayout;
use crate::error::{CoreError, CoreResult};

/// Builds a layout.
pub type LayoutConstructor = fn() -> BoxedLayout;

/// Maps layout type names to constructors.
#[derive(Debug, Clone, Default)]
pub struct LayoutFactory {
    constructors: IndexMap<&'static str, LayoutConstructor>,
}

impl LayoutFactory {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with every built-in layout registered.
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        factory.register(ListLayout::TYPE_NAME, || Box::new(ListLayout::default()));
        factory.register(ListLayout::PIXEL_TYPE_NAME, || {
            Box::new(ListLayout::pixel(Orientation::Horizontal))
        });
        factory.register(StackLayout::TYPE_NAME, || Box::new(StackLayout::new()));
        factory.register(AnchorLayout::TYPE_NAME, || Box::new(AnchorLayout::new()));
        factory.register(FreeLayout::TYPE_NAME, || Box::new(FreeLayout::new()));
        factory.register(ProxyLayout::TYPE_NAME, || Box::new(ProxyLayout::new()));
        factory
    }

    /// Register `constructor` under `name`, replacing any previous registration.
    pub fn register(&mut self, name: &'static str, constructor: LayoutConstructor) {
        if self.constructors.insert(name, constructor).is_some() {
            log::warn!("Layout type '{}' registered twice, keeping the latest", name);
        }
    }

    /// Construct the layout registered as `name`.
    pub fn create(&self, name: &str) -> CoreResult<BoxedLayout> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| CoreError::UnknownLayoutType(name.to_string()))
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }
}
