// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Layout Engine
//!
//! A container places its children through at most one [Layout]. Layouts work in two
//! passes:
//!
//! 1. **Measure** computes the container's requested sizes for a hypothetical
//!    available space. Children are measured but not moved.
//! 2. **Arrange** writes the final position and size of every child through
//!    [LayoutContext::set_control_dimensions].
//!
//! The tree caches the result of measure per container in a [MeasureCache] and
//! invalidates it whenever a child is added, removed or resized.
//!
//! Layouts keep one slot per child in a [Slots] list. The tree keeps the slot list in
//! lockstep with the children through the `child_*` hooks.

use std::any::Any;
use std::fmt;

use nalgebra::Vector2;

use fudge_theme::registry::ThemeRegistry;

use crate::property::PropertyBag;
use crate::tree::{ControlId, UiTree};

/// Contains the [anchor::AnchorLayout].
pub mod anchor;
/// Contains the [factory::LayoutFactory].
pub mod factory;
/// Contains the [free::FreeLayout].
pub mod free;
/// Contains dirty flags and layout metrics.
pub mod invalidation;
/// Contains the [list::ListLayout].
pub mod list;
/// Contains rounding helpers for pixel layouts.
pub mod pixel;
/// Contains the [proxy::ProxyLayout].
pub mod proxy;
/// Contains the [slots::Slots] list.
pub mod slots;
/// Contains the [stack::StackLayout].
pub mod stack;

pub use anchor::{AnchorLayout, AnchorSlot, HorizontalAnchor, VerticalAnchor};
pub use factory::LayoutFactory;
pub use free::FreeLayout;
pub use invalidation::{DirtyFlags, InvalidationMetrics};
pub use list::{ListLayout, ListSlot, Orientation};
pub use proxy::{ProxyController, ProxyLayout};
pub use slots::{Slot, Slots};
pub use stack::StackLayout;

/// Sizes beyond this are treated as unbounded.
pub const UNBOUNDED: f32 = f32::INFINITY;

/// The requested sizes of a control or layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// The size the control would have if nothing constrained it.
    pub size: Vector2<f32>,
    /// The smallest usable size.
    pub min: Vector2<f32>,
    /// The largest useful size. [UNBOUNDED] on an axis means no limit.
    pub max: Vector2<f32>,
    /// Whether the result changes with the available space.
    pub depends_on_space: bool,
}

impl Default for Measurement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Measurement {
    /// Zero size with no maximum.
    pub const ZERO: Self = Self {
        size: Vector2::new(0.0, 0.0),
        min: Vector2::new(0.0, 0.0),
        max: Vector2::new(UNBOUNDED, UNBOUNDED),
        depends_on_space: false,
    };

    /// Create a measurement.
    pub fn new(size: Vector2<f32>, min: Vector2<f32>, max: Vector2<f32>) -> Self {
        Self {
            size,
            min,
            max,
            depends_on_space: false,
        }
    }

    /// A measurement of `size` that can shrink to zero and grow without limit.
    pub fn flexible(size: Vector2<f32>) -> Self {
        Self {
            size,
            ..Self::ZERO
        }
    }

    /// A measurement that is exactly `size`.
    pub fn fixed(size: Vector2<f32>) -> Self {
        Self::new(size, size, size)
    }

    /// Mark the result as depending on the available space.
    pub fn space_dependent(mut self) -> Self {
        self.depends_on_space = true;
        self
    }

    /// Clamp the values into a consistent state.
    ///
    /// Negative minimums become zero, negative or NaN maximums become [UNBOUNDED], the
    /// maximum is at least the minimum and the size at least the minimum.
    pub fn normalized(mut self) -> Self {
        for axis in 0..2 {
            let min = self.min[axis];
            self.min[axis] = if min.is_nan() { 0.0 } else { min.max(0.0) };

            let max = self.max[axis];
            self.max[axis] = if max.is_nan() || max < 0.0 {
                UNBOUNDED
            } else {
                max.max(self.min[axis])
            };

            let size = self.size[axis];
            self.size[axis] = if size.is_nan() { self.min[axis] } else { size.max(self.min[axis]) };
        }
        self
    }
}

/// The coordinate family a layout computes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coordinates {
    /// Continuous floating point coordinates.
    #[default]
    Continuous,
    /// Whole pixels. See [pixel] for the rounding rules.
    Pixel,
}

/// The last measurement of a container, keyed by the space it was computed for.
#[derive(Debug, Clone, Default)]
pub struct MeasureCache {
    valid: bool,
    space: Vector2<f32>,
    measurement: Measurement,
    runs: usize,
}

impl MeasureCache {
    /// Create an invalid cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a measurement is stored.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The stored measurement if it answers a query for `space`.
    pub fn get(&self, space: Vector2<f32>) -> Option<Measurement> {
        if self.valid && (self.space == space || !self.measurement.depends_on_space) {
            Some(self.measurement)
        } else {
            None
        }
    }

    /// Store a freshly computed measurement.
    pub fn store(&mut self, space: Vector2<f32>, measurement: Measurement) {
        self.valid = true;
        self.space = space;
        self.measurement = measurement;
        self.runs += 1;
    }

    /// Drop the stored measurement.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// How many measurements were computed and stored.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

/// Places the children of a container.
///
/// Layouts never own controls. They read the children of their container and write
/// positions back through a [LayoutContext].
pub trait Layout: Any + fmt::Debug {
    /// The name the layout is registered under in the [LayoutFactory].
    fn type_name(&self) -> &'static str;

    /// The coordinate family. A layout must not change it after creation.
    fn coordinates(&self) -> Coordinates {
        Coordinates::Continuous
    }

    /// A child was inserted at `index`.
    fn child_added(&mut self, index: usize);

    /// The child at `index` was removed.
    fn child_removed(&mut self, index: usize);

    /// A child moved from `from` to `to`.
    fn child_moved(&mut self, from: usize, to: usize);

    /// Number of slots; always the container's child count.
    fn slot_count(&self) -> usize;

    /// Compute the container's requested sizes for `available` space.
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Vector2<f32>) -> Measurement;

    /// Place every child inside `space`, the container's final size.
    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, space: Vector2<f32>);

    /// Layout-wide settings.
    fn properties(&self) -> PropertyBag {
        PropertyBag::new()
    }

    /// Apply settings produced by [properties](Self::properties).
    fn apply_properties(&mut self, _properties: &PropertyBag) {}

    /// Settings of the slot at `index`.
    fn slot_properties(&self, _index: usize) -> PropertyBag {
        PropertyBag::new()
    }

    /// Apply settings produced by [slot_properties](Self::slot_properties).
    fn apply_slot_properties(&mut self, _index: usize, _properties: &PropertyBag) {}

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A boxed layout.
pub type BoxedLayout = Box<dyn Layout>;

/// What a layout can see and change while it runs.
pub struct LayoutContext<'a> {
    tree: &'a mut UiTree,
    registry: &'a ThemeRegistry,
    container: ControlId,
    coordinates: Coordinates,
}

impl<'a> LayoutContext<'a> {
    pub(crate) fn new(
        tree: &'a mut UiTree,
        registry: &'a ThemeRegistry,
        container: ControlId,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            tree,
            registry,
            container,
            coordinates,
        }
    }

    /// The container being laid out.
    pub fn container(&self) -> ControlId {
        self.container
    }

    /// The tree, read-only.
    pub fn tree(&self) -> &UiTree {
        self.tree
    }

    /// The theme registry.
    pub fn registry(&self) -> &ThemeRegistry {
        self.registry
    }

    /// The coordinate family of the running layout.
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Number of children of the container.
    pub fn child_count(&self) -> usize {
        self.tree.child_count(self.container)
    }

    /// The child at `index`.
    pub fn child(&self, index: usize) -> Option<ControlId> {
        self.tree.child_at(self.container, index)
    }

    /// The current size of the container.
    pub fn container_size(&self) -> Vector2<f32> {
        self.tree.size(self.container).unwrap_or_else(Vector2::zeros)
    }

    /// The hint position of the child at `index`.
    pub fn hint_position(&self, index: usize) -> Vector2<f32> {
        self.child(index)
            .and_then(|child| self.tree.hint_position(child))
            .unwrap_or_else(Vector2::zeros)
    }

    /// Measure the child at `index` for `available` space.
    pub fn measure_child(&mut self, index: usize, available: Vector2<f32>) -> Measurement {
        let Some(child) = self.child(index) else {
            log::warn!("Layout asked to measure missing child {} of {:?}", index, self.container);
            return Measurement::ZERO;
        };

        match self.tree.measure(child, self.registry, available) {
            Ok(measurement) => measurement,
            Err(err) => {
                log::warn!("Failed to measure child {} of {:?}: {}", index, self.container, err);
                Measurement::ZERO
            },
        }
    }

    /// Set the position and size of the child at `index`.
    ///
    /// This does not invalidate the container's own measurement.
    pub fn set_control_dimensions(&mut self, index: usize, position: Vector2<f32>, size: Vector2<f32>) {
        if let Err(err) = self
            .tree
            .place_child(self.container, index, position, size, self.coordinates)
        {
            log::warn!("Failed to place child {} of {:?}: {}", index, self.container, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps() {
        let measurement = Measurement::new(
            Vector2::new(5.0, f32::NAN),
            Vector2::new(-3.0, 10.0),
            Vector2::new(-1.0, 4.0),
        )
        .normalized();

        assert_eq!(measurement.min, Vector2::new(0.0, 10.0));
        assert_eq!(measurement.max, Vector2::new(UNBOUNDED, 10.0));
        assert_eq!(measurement.size, Vector2::new(5.0, 10.0));
    }

    #[test]
    fn test_cache_serves_same_space_only() {
        let mut cache = MeasureCache::new();
        let space = Vector2::new(100.0, 100.0);
        assert_eq!(cache.get(space), None);

        let measurement = Measurement::flexible(Vector2::new(10.0, 20.0)).space_dependent();
        cache.store(space, measurement);
        assert_eq!(cache.get(space), Some(measurement));
        assert_eq!(cache.get(Vector2::new(50.0, 100.0)), None);

        cache.invalidate();
        assert_eq!(cache.get(space), None);
        assert_eq!(cache.runs(), 1);
    }

    #[test]
    fn test_cache_serves_any_space_when_independent() {
        let mut cache = MeasureCache::new();
        let measurement = Measurement::flexible(Vector2::new(10.0, 20.0));
        cache.store(Vector2::new(100.0, 100.0), measurement);
        assert_eq!(cache.get(Vector2::new(1.0, 1.0)), Some(measurement));
    }
}
