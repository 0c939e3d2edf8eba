// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;

use nalgebra::Vector2;

use super::slots::Slots;
use super::{Layout, LayoutContext, Measurement, UNBOUNDED};

/// Places every child over the whole container.
///
/// The container asks for the largest hint and minimum of its children and for the
/// smallest of their maximums.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    slots: Slots<()>,
}

impl StackLayout {
    /// Name in the layout factory.
    pub const TYPE_NAME: &'static str = "StackLayout";

    /// Create a stack layout.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layout for StackLayout {
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
        let count = ctx.child_count();
        if count == 0 {
            return Measurement::ZERO;
        }

        let mut result = Measurement::new(
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::new(UNBOUNDED, UNBOUNDED),
        );

        for index in 0..count {
            let measured = ctx.measure_child(index, available);
            if let Some(slot) = self.slots.get_mut(index) {
                slot.measurement = measured;
            }

            result.size = result.size.sup(&measured.size);
            result.min = result.min.sup(&measured.min);
            result.max = result.max.inf(&measured.max);
            result.depends_on_space |= measured.depends_on_space;
        }

        result.normalized()
    }

    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, space: Vector2<f32>) {
        for index in 0..self.slots.len() {
            ctx.set_control_dimensions(index, Vector2::zeros(), space);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
