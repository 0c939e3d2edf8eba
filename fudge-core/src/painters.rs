//! The set of part painters a control owns.

use indexmap::IndexMap;

use fudge_theme::id::ResourceId;
use fudge_theme::painter::PartPainter;

/// Painters owned by one control, keyed by the resource id that selected them.
///
/// Dropping the set (or removing an entry) destroys the painters.
#[derive(Debug, Default)]
pub struct PainterSet {
    painters: IndexMap<ResourceId, Box<dyn PartPainter>>,
}

impl PainterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The painter selected by `id`.
    pub fn get(&self, id: ResourceId) -> Option<&dyn PartPainter> {
        self.painters.get(&id).map(|painter| painter.as_ref())
    }

    /// The painter selected by `id`, mutably.
    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut Box<dyn PartPainter>> {
        self.painters.get_mut(&id)
    }

    /// The painter selected by `id` if it is a `P`.
    pub fn get_as<P: PartPainter>(&self, id: ResourceId) -> Option<&P> {
        self.get(id).and_then(|painter| painter.as_any().downcast_ref())
    }

    /// The painter selected by `id` if it is a `P`, mutably.
    pub fn get_as_mut<P: PartPainter>(&mut self, id: ResourceId) -> Option<&mut P> {
        self.painters
            .get_mut(&id)
            .and_then(|painter| painter.as_any_mut().downcast_mut())
    }

    /// Store `painter` under `id`, returning the painter it replaces.
    pub fn insert(&mut self, id: ResourceId, painter: Box<dyn PartPainter>) -> Option<Box<dyn PartPainter>> {
        self.painters.insert(id, painter)
    }

    /// Take the painter stored under `id` out of the set.
    pub fn remove(&mut self, id: ResourceId) -> Option<Box<dyn PartPainter>> {
        self.painters.shift_remove(&id)
    }

    /// Whether a painter is stored under `id`.
    pub fn contains(&self, id: ResourceId) -> bool {
        self.painters.contains_key(&id)
    }

    /// Number of painters.
    pub fn len(&self) -> usize {
        self.painters.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.painters.is_empty()
    }

    /// Ids with a painter, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.painters.keys().copied()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (ResourceId, &mut dyn PartPainter)> + '_ {
        self.painters
            .iter_mut()
            .map(|(id, painter)| (*id, painter.as_mut() as &mut dyn PartPainter))
    }
}
