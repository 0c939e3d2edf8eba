// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use fudge_theme::ResourceEnum;

use super::slots::Slots;
use super::{Layout, LayoutContext, Measurement};
use crate::property::PropertyBag;

/// What the left or right edge of a child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ResourceEnum, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    /// Not pinned.
    #[default]
    None,
    /// Pinned to a fraction of the width measured from the left.
    Left,
    /// Pinned to a fraction of the width measured from the right.
    Right,
}

/// What the top or bottom edge of a child is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ResourceEnum, Serialize, Deserialize)]
pub enum VerticalAnchor {
    /// Not pinned.
    #[default]
    None,
    /// Pinned to a fraction of the height measured from the top.
    Top,
    /// Pinned to a fraction of the height measured from the bottom.
    Bottom,
}

/// One edge: `None` when free, otherwise whether it is measured from the near side
/// and the fraction of the space.
type Edge = Option<(bool, f32)>;

fn edge_position(space: f32, (from_near, percent): (bool, f32)) -> f32 {
    if from_near {
        space * percent
    } else {
        space * (1.0 - percent)
    }
}

/// Position and length along one axis.
///
/// A child with no pinned edge is centered on the middle of its two fractions. One
/// pinned edge keeps the child's hint length. Two pinned edges stretch the child
/// between them, collapsing to zero length if they cross.
fn anchor_axis(space: f32, wanted: f32, start: Edge, end: Edge, start_percent: f32, end_percent: f32) -> (f32, f32) {
    let center = (start_percent + end_percent) * 0.5;
    match (start, end) {
        (None, None) => (space * center - wanted * 0.5, wanted),
        (Some(start), None) => (edge_position(space, start), wanted),
        (None, Some(end)) => (edge_position(space, end) - wanted, wanted),
        (Some(start), Some(end)) => {
            let first = edge_position(space, start);
            let last = edge_position(space, end);
            if first >= last {
                (space * center, 0.0)
            } else {
                (first, last - first)
            }
        },
    }
}

/// Placement data of one child in an [AnchorLayout].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorSlot {
    /// Anchor of the left edge.
    pub left: HorizontalAnchor,
    /// Anchor of the right edge.
    pub right: HorizontalAnchor,
    /// Anchor of the top edge.
    pub top: VerticalAnchor,
    /// Anchor of the bottom edge.
    pub bottom: VerticalAnchor,
    /// Fraction of the width for the left edge.
    pub left_percent: f32,
    /// Fraction of the width for the right edge.
    pub right_percent: f32,
    /// Fraction of the height for the top edge.
    pub top_percent: f32,
    /// Fraction of the height for the bottom edge.
    pub bottom_percent: f32,
}

impl AnchorSlot {
    /// Pin all four edges to the container's edges with fixed fractions.
    pub fn fill() -> Self {
        Self {
            left: HorizontalAnchor::Left,
            right: HorizontalAnchor::Right,
            top: VerticalAnchor::Top,
            bottom: VerticalAnchor::Bottom,
            ..Default::default()
        }
    }

    fn horizontal(anchor: HorizontalAnchor, percent: f32) -> Edge {
        match anchor {
            HorizontalAnchor::None => None,
            HorizontalAnchor::Left => Some((true, percent)),
            HorizontalAnchor::Right => Some((false, percent)),
        }
    }

    fn vertical(anchor: VerticalAnchor, percent: f32) -> Edge {
        match anchor {
            VerticalAnchor::None => None,
            VerticalAnchor::Top => Some((true, percent)),
            VerticalAnchor::Bottom => Some((false, percent)),
        }
    }

    /// Position and size of a child wanting `wanted` inside `space`.
    pub fn place(&self, space: Vector2<f32>, wanted: Vector2<f32>) -> (Vector2<f32>, Vector2<f32>) {
        let (x, width) = anchor_axis(
            space.x,
            wanted.x,
            Self::horizontal(self.left, self.left_percent),
            Self::horizontal(self.right, self.right_percent),
            self.left_percent,
            self.right_percent,
        );
        let (y, height) = anchor_axis(
            space.y,
            wanted.y,
            Self::vertical(self.top, self.top_percent),
            Self::vertical(self.bottom, self.bottom_percent),
            self.top_percent,
            self.bottom_percent,
        );
        (Vector2::new(x, y), Vector2::new(width, height))
    }
}

/// Pins child edges to fractions of the container.
///
/// The container's own requested size is zero; it takes whatever its parent gives it.
#[derive(Debug, Clone, Default)]
pub struct AnchorLayout {
    slots: Slots<AnchorSlot>,
}

impl AnchorLayout {
    /// Name in the layout factory.
    pub const TYPE_NAME: &'static str = "AnchorLayout";

    /// Create an anchor layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors of the child at `index`.
    pub fn slot(&self, index: usize) -> Option<&AnchorSlot> {
        self.slots.get(index).map(|slot| &slot.data)
    }

    /// Anchors of the child at `index`, mutably.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut AnchorSlot> {
        self.slots.get_mut(index).map(|slot| &mut slot.data)
    }
}

impl Layout for AnchorLayout {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn child_added(&mut self, index: usize) {
        self.slots.insert(index);
    }

    fn child_removed(&mut self, index: usize) {
        self.slots.remove(index);
    }

    fn child_moved(&mut self, from: usize, to: usize) {
        self.slots.move_slot(from, to);
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Vector2<f32>) -> Measurement {
        let mut result = Measurement::ZERO;
        for index in 0..ctx.child_count() {
            let measured = ctx.measure_child(index, available);
            if let Some(slot) = self.slots.get_mut(index) {
                slot.measurement = measured;
            }
            result.depends_on_space |= measured.depends_on_space;
        }
        result
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, space: Vector2<f32>) {
        for (index, slot) in self.slots.iter().enumerate() {
            let (position, size) = slot.data.place(space, slot.hint());
            ctx.set_control_dimensions(index, position, size);
        }
    }

    fn slot_properties(&self, index: usize) -> PropertyBag {
        let Some(slot) = self.slot(index) else {
            return PropertyBag::new();
        };
        let mut properties = PropertyBag::new();
        properties.set_enum("left", slot.left);
        properties.set_enum("right", slot.right);
        properties.set_enum("top", slot.top);
        properties.set_enum("bottom", slot.bottom);
        properties.set("left_percent", slot.left_percent);
        properties.set("right_percent", slot.right_percent);
        properties.set("top_percent", slot.top_percent);
        properties.set("bottom_percent", slot.bottom_percent);
        properties
    }

    fn apply_slot_properties(&mut self, index: usize, properties: &PropertyBag) {
        let Some(slot) = self.slot_mut(index) else {
            return;
        };
        if let Some(anchor) = properties.get_enum("left") {
            slot.left = anchor;
        }
        if let Some(anchor) = properties.get_enum("right") {
            slot.right = anchor;
        }
        if let Some(anchor) = properties.get_enum("top") {
            slot.top = anchor;
        }
        if let Some(anchor) = properties.get_enum("bottom") {
            slot.bottom = anchor;
        }
        for (key, target) in [
            ("left_percent", &mut slot.left_percent),
            ("right_percent", &mut slot.right_percent),
            ("top_percent", &mut slot.top_percent),
            ("bottom_percent", &mut slot.bottom_percent),
        ] {
            if let Some(value) = properties.get_float(key) {
                *target = value;
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
