// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use nalgebra::Vector2;

use super::slots::Slots;
use super::{Layout, LayoutContext, Measurement};

/// Places every child at its hint position with its hint size.
///
/// The container asks for the bounding box of its children.
#[derive(Debug, Clone, Default)]
pub struct FreeLayout {
    slots: Slots<()>,
}

impl FreeLayout {
    /// Name in the layout factory.
    pub const TYPE_NAME: &'static str = "FreeLayout";

    /// Create a free layout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layout for FreeLayout {
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
            let extent = ctx.hint_position(index).sup(&Vector2::zeros()) + measured.size;
            if let Some(slot) = self.slots.get_mut(index) {
                slot.measurement = measured;
            }

            result.size = result.size.sup(&extent);
            result.depends_on_space |= measured.depends_on_space;
        }

        result
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, _space: Vector2<f32>) {
        for (index, slot) in self.slots.iter().enumerate() {
            let position = ctx.hint_position(index);
            ctx.set_control_dimensions(index, position, slot.hint());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
