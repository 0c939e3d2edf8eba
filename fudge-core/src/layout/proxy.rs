// SPDX-License-Identifier: MIT OR Apache-2.0

use std::any::Any;
use std::fmt;

use nalgebra::Vector2;

use super::slots::Slots;
use super::{Layout, LayoutContext, Measurement};

/// Drives the placement of a container that uses a [ProxyLayout].
///
/// The controller writes child dimensions through
/// [LayoutContext::set_control_dimensions]; the layout keeps its slots in step with
/// the children either way.
pub trait ProxyController: fmt::Debug {
    /// Compute the container's requested sizes.
    fn measure(&mut self, ctx: &mut LayoutContext<'_>, available: Vector2<f32>) -> Measurement;

    /// Place the children inside `space`.
    fn arrange(&mut self, ctx: &mut LayoutContext<'_>, space: Vector2<f32>);
}

/// Hands measure and arrange to an external [ProxyController].
///
/// Without a controller the layout measures its children, requests nothing for the
/// container and leaves child placement to whoever calls
/// [UiTree::set_control_dimensions](crate::tree::UiTree::set_control_dimensions).
#[derive(Debug, Default)]
pub struct ProxyLayout {
    controller: Option<Box<dyn ProxyController>>,
    slots: Slots<()>,
}

impl ProxyLayout {
    /// Name in the layout factory.
    pub const TYPE_NAME: &'static str = "ProxyLayout";

    /// Create a proxy layout without a controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a proxy layout driven by `controller`.
    pub fn with_controller(controller: impl ProxyController + 'static) -> Self {
        Self {
            controller: Some(Box::new(controller)),
            slots: Slots::new(),
        }
    }

    /// Replace the controller, returning the previous one.
    pub fn set_controller(&mut self, controller: Option<Box<dyn ProxyController>>) -> Option<Box<dyn ProxyController>> {
        std::mem::replace(&mut self.controller, controller)
    }

    /// Whether a controller is attached.
    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }
}

impl Layout for ProxyLayout {
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
        if let Some(controller) = self.controller.as_mut() {
            return controller.measure(ctx, available);
        }

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
        if let Some(controller) = self.controller.as_mut() {
            controller.arrange(ctx, space);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
