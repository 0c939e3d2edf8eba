// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use fudge_theme::align::{HorizontalAlign, VerticalAlign};
use fudge_theme::value::Padding;
use fudge_theme::ResourceEnum;

use super::slots::{Slot, Slots};
use super::{Coordinates, Layout, LayoutContext, Measurement, UNBOUNDED};
use crate::property::PropertyBag;

/// Direction a [ListLayout] places its children in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ResourceEnum, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Orientation {
    fn main(self) -> usize {
        match self {
            Self::Horizontal => 0,
            Self::Vertical => 1,
        }
    }

    fn cross(self) -> usize {
        1 - self.main()
    }
}

/// Placement data of one child in a [ListLayout].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ListSlot {
    /// Space kept around the child.
    pub padding: Padding,
    /// Horizontal alignment, used when the list is vertical.
    pub h_align: HorizontalAlign,
    /// Vertical alignment, used when the list is horizontal.
    pub v_align: VerticalAlign,
    /// Keep the child within its min and max size while stretching.
    pub enforce_limits: bool,
}

impl ListSlot {
    fn before(&self, axis: usize) -> f32 {
        if axis == 0 {
            self.padding.left
        } else {
            self.padding.top
        }
    }

    fn total(&self, axis: usize) -> f32 {
        if axis == 0 {
            self.padding.width()
        } else {
            self.padding.height()
        }
    }

    fn fills_cross(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Horizontal => self.v_align == VerticalAlign::Fill,
            Orientation::Vertical => self.h_align == HorizontalAlign::Fill,
        }
    }

    fn cross_offset(&self, orientation: Orientation, size: f32, available: f32) -> f32 {
        let offset = match orientation {
            Orientation::Horizontal => self.v_align.offset(size as f64, available as f64),
            Orientation::Vertical => self.h_align.offset(size as f64, available as f64),
        };
        offset as f32
    }
}

fn add_limited(a: f32, b: f32) -> f32 {
    let sum = a + b;
    if sum.is_finite() {
        sum
    } else {
        UNBOUNDED
    }
}

/// Places children one after another along a single axis.
///
/// Without stretching every child gets its hint size. With stretching the children
/// share the whole main axis in proportion to their hint sizes; slots with
/// [enforce_limits](ListSlot::enforce_limits) stop growing at their maximum and stop
/// shrinking at their minimum, and the rest is shared among the others.
#[derive(Debug, Clone)]
pub struct ListLayout {
    orientation: Orientation,
    stretched: bool,
    spacing: f32,
    coordinates: Coordinates,
    slots: Slots<ListSlot>,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl ListLayout {
    /// Name in the layout factory.
    pub const TYPE_NAME: &'static str = "ListLayout";
    /// Name of the pixel variant in the layout factory.
    pub const PIXEL_TYPE_NAME: &'static str = "PixelListLayout";

    /// Create a continuous, non-stretched list.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            stretched: false,
            spacing: 0.0,
            coordinates: Coordinates::Continuous,
            slots: Slots::new(),
        }
    }

    /// Create a top to bottom list.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Create a left to right list.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Create a list that places children on whole pixels.
    pub fn pixel(orientation: Orientation) -> Self {
        Self {
            coordinates: Coordinates::Pixel,
            ..Self::new(orientation)
        }
    }

    /// Builder form of [set_stretched](Self::set_stretched).
    pub fn with_stretched(mut self, stretched: bool) -> Self {
        self.stretched = stretched;
        self
    }

    /// Builder form of [set_spacing](Self::set_spacing).
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// The direction children are placed in.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the direction children are placed in.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Whether children share the whole main axis.
    pub fn is_stretched(&self) -> bool {
        self.stretched
    }

    /// Share the whole main axis between the children.
    pub fn set_stretched(&mut self, stretched: bool) {
        self.stretched = stretched;
    }

    /// Gap between neighboring children.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Change the gap between neighboring children.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing.max(0.0);
    }

    /// Placement data of the child at `index`.
    pub fn slot(&self, index: usize) -> Option<&ListSlot> {
        self.slots.get(index).map(|slot| &slot.data)
    }

    /// Placement data of the child at `index`, mutably.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ListSlot> {
        self.slots.get_mut(index).map(|slot| &mut slot.data)
    }

    fn gaps(&self) -> f32 {
        self.spacing * self.slots.len().saturating_sub(1) as f32
    }

    /// Main axis sizes of a stretched arrangement over `space` units.
    fn stretched_sizes(&self, space: f32) -> Vec<f32> {
        let main = self.orientation.main();
        let count = self.slots.len();

        let hints: Vec<f32> = self.slots.iter().map(|slot| slot.hint()[main].max(0.0)).collect();
        let padding: f32 = self.slots.iter().map(|slot| slot.data.total(main)).sum();
        let wanted = hints.iter().sum::<f32>() + padding + self.gaps();
        let growing = wanted <= space;

        let mut sum: f32 = hints.iter().sum();
        let mut free = space - padding - self.gaps();
        let all_free = free;

        let mut limited: Vec<Option<f32>> = vec![None; count];
        let mut limited_count = 0;
        let mut changed = true;

        while changed && limited_count != count {
            changed = false;
            let open = (count - limited_count) as f32;
            let mut used_space = 0.0;
            let mut used_sum = 0.0;

            for (ix, slot) in self.slots.iter().enumerate() {
                if limited[ix].is_some() || !slot.data.enforce_limits {
                    continue;
                }

                let ratio = if sum > 0.0 { hints[ix] / sum } else { 1.0 / open };
                let size = ratio * free;
                let limit = if growing && slot.max()[main] < size {
                    Some(slot.max()[main])
                } else if !growing && slot.min()[main] > size {
                    Some(slot.min()[main])
                } else {
                    None
                };

                if let Some(limit) = limit {
                    limited[ix] = Some(limit);
                    used_space += limit;
                    used_sum += hints[ix];
                    changed = true;
                }
            }

            limited_count = limited.iter().filter(|size| size.is_some()).count();
            free -= used_space;
            sum -= used_sum;
        }

        if limited_count == count {
            // Every child sits at a limit: share all of the space by the limits' ratio.
            let total: f32 = limited.iter().flatten().sum();
            return limited
                .iter()
                .flatten()
                .map(|size| {
                    let ratio = if total > 0.0 { size / total } else { 1.0 / count as f32 };
                    (ratio * all_free).max(0.0)
                })
                .collect();
        }

        let open = (count - limited_count) as f32;
        limited
            .iter()
            .zip(&hints)
            .map(|(size, hint)| {
                size.unwrap_or_else(|| {
                    let ratio = if sum > 0.0 { hint / sum } else { 1.0 / open };
                    ratio * free
                })
                .max(0.0)
            })
            .collect()
    }

    fn place(&self, ctx: &mut LayoutContext<'_>, index: usize, slot: &Slot<ListSlot>, offset: f32, length: f32, space: Vector2<f32>) {
        let main = self.orientation.main();
        let cross = self.orientation.cross();

        let cross_space = (space[cross] - slot.data.total(cross)).max(0.0);
        let (cross_size, cross_offset) = if self.stretched || slot.data.fills_cross(self.orientation) {
            (cross_space, 0.0)
        } else {
            let size = slot.hint()[cross];
            (size, slot.data.cross_offset(self.orientation, size, cross_space))
        };

        let mut position = Vector2::zeros();
        position[main] = offset + slot.data.before(main);
        position[cross] = slot.data.before(cross) + cross_offset;

        let mut size = Vector2::zeros();
        size[main] = length;
        size[cross] = cross_size;

        ctx.set_control_dimensions(index, position, size);
    }
}

impl Layout for ListLayout {
    fn type_name(&self) -> &'static str {
        match self.coordinates {
            Coordinates::Continuous => Self::TYPE_NAME,
            Coordinates::Pixel => Self::PIXEL_TYPE_NAME,
        }
    }

    fn coordinates(&self) -> Coordinates {
        self.coordinates
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
        let count = ctx.child_count();
        if count == 0 {
            return Measurement::ZERO;
        }

        let main = self.orientation.main();
        let cross = self.orientation.cross();
        let gaps = self.gaps();

        let mut result = Measurement::new(Vector2::zeros(), Vector2::zeros(), Vector2::zeros());
        result.size[main] = gaps;
        result.min[main] = gaps;
        result.max[main] = gaps;

        for index in 0..count {
            let measured = ctx.measure_child(index, available);
            let Some(slot) = self.slots.get_mut(index) else {
                log::error!("List layout has {} slots for {} children", self.slots.len(), count);
                break;
            };
            slot.measurement = measured;

            let pad_main = slot.data.total(main);
            let pad_cross = slot.data.total(cross);

            result.size[main] += measured.size[main] + pad_main;
            result.min[main] += measured.min[main] + pad_main;
            result.max[main] = add_limited(result.max[main], measured.max[main] + pad_main);

            result.size[cross] = result.size[cross].max(measured.size[cross] + pad_cross);
            result.min[cross] = result.min[cross].max(measured.min[cross] + pad_cross);
            result.max[cross] = result.max[cross].max(add_limited(measured.max[cross], pad_cross));

            result.depends_on_space |= measured.depends_on_space;
        }

        result.normalized()
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, space: Vector2<f32>) {
        let main = self.orientation.main();
        let lengths: Vec<f32> = if self.stretched {
            self.stretched_sizes(space[main])
        } else {
            self.slots.iter().map(|slot| slot.hint()[main]).collect()
        };

        let mut offset = 0.0;
        for (index, (slot, length)) in self.slots.iter().zip(lengths).enumerate() {
            self.place(ctx, index, slot, offset, length, space);
            offset += slot.data.total(main) + length + self.spacing;
        }
    }

    fn properties(&self) -> PropertyBag {
        let mut properties = PropertyBag::new();
        properties.set_enum("orientation", self.orientation);
        properties.set("stretched", self.stretched);
        properties.set("spacing", self.spacing);
        properties
    }

    fn apply_properties(&mut self, properties: &PropertyBag) {
        if let Some(orientation) = properties.get_enum("orientation") {
            self.orientation = orientation;
        }
        if let Some(stretched) = properties.get_bool("stretched") {
            self.stretched = stretched;
        }
        if let Some(spacing) = properties.get_float("spacing") {
            self.set_spacing(spacing);
        }
    }

    fn slot_properties(&self, index: usize) -> PropertyBag {
        let Some(slot) = self.slot(index) else {
            return PropertyBag::new();
        };
        let mut properties = PropertyBag::new();
        properties.set("padding", slot.padding);
        properties.set_enum("h_align", slot.h_align);
        properties.set_enum("v_align", slot.v_align);
        properties.set("enforce_limits", slot.enforce_limits);
        properties
    }

    fn apply_slot_properties(&mut self, index: usize, properties: &PropertyBag) {
        let Some(slot) = self.slot_mut(index) else {
            return;
        };
        if let Some(padding) = properties.get_padding("padding") {
            slot.padding = padding;
        }
        if let Some(align) = properties.get_enum("h_align") {
            slot.h_align = align;
        }
        if let Some(align) = properties.get_enum("v_align") {
            slot.v_align = align;
        }
        if let Some(enforce) = properties.get_bool("enforce_limits") {
            slot.enforce_limits = enforce;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(hints: &[f32], enforce: bool, min: f32, max: f32) -> ListLayout {
        let mut list = ListLayout::horizontal().with_stretched(true);
        for (index, hint) in hints.iter().enumerate() {
            list.child_added(index);
            let slot = list.slots.get_mut(index).unwrap();
            slot.measurement = Measurement::new(
                Vector2::new(*hint, 10.0),
                Vector2::new(min, 0.0),
                Vector2::new(max, UNBOUNDED),
            );
            slot.data.enforce_limits = enforce;
        }
        list
    }

    #[test]
    fn test_stretch_keeps_hint_ratio() {
        let list = list_with(&[10.0, 30.0], false, 0.0, UNBOUNDED);
        assert_eq!(list.stretched_sizes(80.0), vec![20.0, 60.0]);
        assert_eq!(list.stretched_sizes(20.0), vec![5.0, 15.0]);
    }

    #[test]
    fn test_stretch_equal_shares_without_hints() {
        let list = list_with(&[0.0, 0.0, 0.0, 0.0], false, 0.0, UNBOUNDED);
        assert_eq!(list.stretched_sizes(40.0), vec![10.0; 4]);
    }

    #[test]
    fn test_stretch_stops_at_max() {
        let mut list = list_with(&[10.0, 10.0], false, 0.0, UNBOUNDED);
        let slot = list.slots.get_mut(0).unwrap();
        slot.data.enforce_limits = true;
        slot.measurement.max.x = 15.0;

        assert_eq!(list.stretched_sizes(100.0), vec![15.0, 85.0]);
    }

    #[test]
    fn test_shrink_stops_at_min() {
        let mut list = list_with(&[50.0, 50.0], false, 0.0, UNBOUNDED);
        let slot = list.slots.get_mut(1).unwrap();
        slot.data.enforce_limits = true;
        slot.measurement.min.x = 40.0;

        assert_eq!(list.stretched_sizes(60.0), vec![20.0, 40.0]);
    }

    #[test]
    fn test_all_limited_share_by_limit_ratio() {
        let list = list_with(&[10.0, 10.0], true, 0.0, 20.0);
        // Both stop at 20, the remaining 60 is shared by the 1:1 limit ratio.
        assert_eq!(list.stretched_sizes(100.0), vec![50.0, 50.0]);
    }

    #[test]
    fn test_padding_and_spacing_take_space() {
        let mut list = list_with(&[10.0, 10.0], false, 0.0, UNBOUNDED).with_spacing(10.0);
        list.slot_mut(0).unwrap().padding = Padding::new(5.0, 0.0, 5.0, 0.0);
        assert_eq!(list.stretched_sizes(100.0), vec![40.0, 40.0]);
    }

    #[test]
    fn test_properties_round_trip() {
        let mut list = ListLayout::vertical().with_spacing(3.0).with_stretched(true);
        list.child_added(0);
        list.slot_mut(0).unwrap().h_align = HorizontalAlign::Center;

        let mut other = ListLayout::default();
        other.child_added(0);
        other.apply_properties(&list.properties());
        other.apply_slot_properties(0, &list.slot_properties(0));

        assert_eq!(other.orientation(), Orientation::Vertical);
        assert!(other.is_stretched());
        assert_eq!(other.spacing(), 3.0);
        assert_eq!(other.slot(0), list.slot(0));
    }
}
