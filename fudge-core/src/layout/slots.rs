// SPDX-License-Identifier: MIT OR Apache-2.0

use nalgebra::Vector2;

use super::Measurement;

/// Per-child data of a layout.
#[derive(Debug, Clone, Default)]
pub struct Slot<S> {
    /// The child's last measured sizes.
    pub measurement: Measurement,
    /// Layout-private placement data.
    pub data: S,
}

impl<S> Slot<S> {
    /// The child's hint size.
    pub fn hint(&self) -> Vector2<f32> {
        self.measurement.size
    }

    /// The child's minimum size.
    pub fn min(&self) -> Vector2<f32> {
        self.measurement.min
    }

    /// The child's maximum size.
    pub fn max(&self) -> Vector2<f32> {
        self.measurement.max
    }
}

/// The slot list a layout embeds, one slot per child of its container.
#[derive(Debug, Clone)]
pub struct Slots<S> {
    slots: Vec<Slot<S>>,
}

impl<S> Default for Slots<S> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<S: Default> Slots<S> {
    /// Create a slot for a child inserted at `index`.
    ///
    /// Indexes past the end append.
    pub fn insert(&mut self, index: usize) {
        let index = index.min(self.slots.len());
        self.slots.insert(
            index,
            Slot {
                measurement: Measurement::ZERO,
                data: S::default(),
            },
        );
    }
}

impl<S> Slots<S> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the slot of the child that was at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Slot<S>> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    /// Follow a child moving from `from` to `to`.
    pub fn move_slot(&mut self, from: usize, to: usize) {
        if from >= self.slots.len() || to >= self.slots.len() {
            return;
        }
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
    }

    /// The slot at `index`.
    pub fn get(&self, index: usize) -> Option<&Slot<S>> {
        self.slots.get(index)
    }

    /// The slot at `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<S>> {
        self.slots.get_mut(index)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate the slots in child order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot<S>> {
        self.slots.iter()
    }

    /// Iterate the slots mutably in child order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Slot<S>> {
        self.slots.iter_mut()
    }
}
