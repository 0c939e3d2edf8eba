//! # Control Tree
//!
//! Every control lives in one [UiTree] arena and is addressed by a [ControlId].
//! Ownership is single-parent: a container owns its children and its layout, a control
//! owns its painters and its private style. Destroying a control destroys everything
//! it owns.
//!
//! Any change that can alter requested sizes marks the control dirty and invalidates
//! the measurement cache of every container above it.

use nalgebra::Vector2;
use slotmap::{new_key_type, SlotMap};
use vello::kurbo::Rect;

use fudge_theme::painter::Canvas;
use fudge_theme::registry::ThemeRegistry;
use fudge_theme::style::StyleId;
use fudge_theme::theme::ThemeId;

use crate::error::{CoreError, CoreResult};
use crate::layout::invalidation::{DirtyFlags, InvalidationMetrics};
use crate::layout::{pixel, BoxedLayout, Coordinates, Layout, LayoutContext, MeasureCache, Measurement};
use crate::painters::PainterSet;
use crate::widget::{BoxedWidget, Widget, WidgetContext};

new_key_type! {
    /// Handle of a control in a [UiTree].
    pub struct ControlId;
}

/// A control: a widget plus the structure and geometry the tree keeps for it.
#[derive(Debug)]
pub struct ControlNode {
    pub(crate) widget: BoxedWidget,
    pub(crate) name: String,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) layout: Option<BoxedLayout>,
    pub(crate) cache: MeasureCache,
    pub(crate) style: Option<StyleId>,
    pub(crate) private_style: bool,
    pub(crate) theme: Option<ThemeId>,
    pub(crate) position: Vector2<f32>,
    pub(crate) size: Vector2<f32>,
    pub(crate) hint_position: Vector2<f32>,
    pub(crate) hint_size: Option<Vector2<f32>>,
    pub(crate) min_size: Option<Vector2<f32>>,
    pub(crate) max_size: Option<Vector2<f32>>,
    pub(crate) painters: PainterSet,
    pub(crate) dirty: DirtyFlags,
}

impl ControlNode {
    fn new(widget: BoxedWidget, name: String) -> Self {
        Self {
            widget,
            name,
            parent: None,
            children: Vec::new(),
            layout: None,
            cache: MeasureCache::new(),
            style: None,
            private_style: false,
            theme: None,
            position: Vector2::zeros(),
            size: Vector2::zeros(),
            hint_position: Vector2::zeros(),
            hint_size: None,
            min_size: None,
            max_size: None,
            painters: PainterSet::new(),
            dirty: DirtyFlags::ALL,
        }
    }

    /// The widget.
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// The control's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The container holding this control.
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Children in draw order.
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    /// The attached layout.
    pub fn layout(&self) -> Option<&dyn Layout> {
        self.layout.as_deref()
    }

    /// The style set on this control.
    pub fn style(&self) -> Option<StyleId> {
        self.style
    }

    /// Whether [style](Self::style) is a private style owned by this control.
    pub fn has_private_style(&self) -> bool {
        self.private_style
    }

    /// The theme set on this control.
    pub fn theme(&self) -> Option<ThemeId> {
        self.theme
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Vector2<f32> {
        self.position
    }

    /// Final size.
    pub fn size(&self) -> Vector2<f32> {
        self.size
    }

    /// Position used by layouts that place children freely.
    pub fn hint_position(&self) -> Vector2<f32> {
        self.hint_position
    }

    /// Explicit hint size, replacing the measured one.
    pub fn hint_size(&self) -> Option<Vector2<f32>> {
        self.hint_size
    }

    /// Explicit minimum size.
    pub fn min_size(&self) -> Option<Vector2<f32>> {
        self.min_size
    }

    /// Explicit maximum size.
    pub fn max_size(&self) -> Option<Vector2<f32>> {
        self.max_size
    }

    /// Painters owned by the control.
    pub fn painters(&self) -> &PainterSet {
        &self.painters
    }

    /// What changed since the last layout pass.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// The measurement cache of the control's layout.
    pub fn measure_cache(&self) -> &MeasureCache {
        &self.cache
    }

    fn apply_overrides(&self, mut measurement: Measurement) -> Measurement {
        if let Some(hint) = self.hint_size {
            measurement.size = hint;
        }
        if let Some(min) = self.min_size {
            measurement.min = min;
        }
        if let Some(max) = self.max_size {
            measurement.max = max;
        }
        measurement.normalized()
    }
}

/// The arena holding a forest of controls.
#[derive(Debug, Default)]
pub struct UiTree {
    pub(crate) nodes: SlotMap<ControlId, ControlNode>,
    metrics: InvalidationMetrics,
}

impl UiTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached control.
    pub fn create(&mut self, widget: impl Widget, name: impl Into<String>) -> ControlId {
        self.create_boxed(Box::new(widget), name)
    }

    /// Create a detached control from a boxed widget.
    pub fn create_boxed(&mut self, widget: BoxedWidget, name: impl Into<String>) -> ControlId {
        let name = name.into();
        log::debug!("Creating control '{}' of type '{}'", name, widget.type_name());
        self.nodes.insert(ControlNode::new(widget, name))
    }

    /// Whether `id` names a live control.
    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The control `id`.
    pub fn get(&self, id: ControlId) -> Option<&ControlNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node(&self, id: ControlId) -> CoreResult<&ControlNode> {
        self.nodes.get(id).ok_or(CoreError::ControlNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: ControlId) -> CoreResult<&mut ControlNode> {
        self.nodes.get_mut(id).ok_or(CoreError::ControlNotFound(id))
    }

    /// Number of live controls.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no controls.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The widget of `id` if it is a `W`.
    pub fn widget<W: Widget>(&self, id: ControlId) -> Option<&W> {
        self.nodes.get(id)?.widget.as_any().downcast_ref()
    }

    /// Change the widget of `id` if it is a `W`.
    ///
    /// Painters are re-configured from the widget afterwards and the control is
    /// marked for measuring.
    pub fn with_widget_mut<W: Widget, R>(&mut self, id: ControlId, f: impl FnOnce(&mut W) -> R) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let widget = node.widget.as_any_mut().downcast_mut::<W>()?;
        let result = f(widget);

        for (painter_id, painter) in node.painters.iter_mut() {
            node.widget.configure_painter(painter_id, painter);
        }
        self.mark_dirty(id, DirtyFlags::MEASURE);
        Some(result)
    }

    /// The control's name.
    pub fn name(&self, id: ControlId) -> Option<&str> {
        self.nodes.get(id).map(|node| node.name.as_str())
    }

    /// Rename the control.
    pub fn set_name(&mut self, id: ControlId, name: impl Into<String>) -> CoreResult<()> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Find the first control called `name` below (and including) `root`.
    pub fn find(&self, root: ControlId, name: &str) -> Option<ControlId> {
        let node = self.nodes.get(root)?;
        if node.name == name {
            return Some(root);
        }
        node.children.iter().find_map(|child| self.find(*child, name))
    }

    // Hierarchy

    /// The container holding `id`.
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(id)?.parent
    }

    /// Children of `id` in draw order.
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.nodes.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Number of children of `id`.
    pub fn child_count(&self, id: ControlId) -> usize {
        self.children(id).len()
    }

    /// The child of `id` at `index`.
    pub fn child_at(&self, id: ControlId, index: usize) -> Option<ControlId> {
        self.children(id).get(index).copied()
    }

    /// Position of `child` among the children of `parent`.
    pub fn index_of(&self, parent: ControlId, child: ControlId) -> Option<usize> {
        self.children(parent).iter().position(|id| *id == child)
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut current = Some(id);
        while let Some(control) = current {
            if control == ancestor {
                return true;
            }
            current = self.parent(control);
        }
        false
    }

    /// Append `child` to `parent`, returning its index.
    pub fn add_child(&mut self, parent: ControlId, child: ControlId) -> CoreResult<usize> {
        let index = self.node(parent)?.children.len();
        self.insert_child(parent, index, child)?;
        Ok(index)
    }

    /// Insert `child` into `parent` at `index`.
    ///
    /// Fails if `parent` is not a container, `child` already has a parent, or `child`
    /// is `parent` or one of its ancestors.
    pub fn insert_child(&mut self, parent: ControlId, index: usize, child: ControlId) -> CoreResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if !parent_node.widget.is_container() {
            return Err(CoreError::not_a_container(&parent_node.name));
        }
        if child_node.parent.is_some() {
            return Err(CoreError::child_has_parent(&child_node.name));
        }
        if self.is_ancestor(child, parent) {
            return Err(CoreError::would_create_cycle(&parent_node.name, &child_node.name));
        }
        let count = parent_node.children.len();
        if index > count {
            return Err(CoreError::index_out_of_range(index, count));
        }

        let parent_node = self.node_mut(parent)?;
        parent_node.children.insert(index, child);
        if let Some(layout) = parent_node.layout.as_mut() {
            layout.child_added(index);
        }
        self.node_mut(child)?.parent = Some(parent);

        self.mark_dirty(parent, DirtyFlags::CHILDREN);
        Ok(())
    }

    /// Detach the child at `index` from `parent`, returning it as a root.
    pub fn remove_child(&mut self, parent: ControlId, index: usize) -> CoreResult<ControlId> {
        let parent_node = self.node_mut(parent)?;
        let count = parent_node.children.len();
        if index >= count {
            return Err(CoreError::index_out_of_range(index, count));
        }

        let child = parent_node.children.remove(index);
        if let Some(layout) = parent_node.layout.as_mut() {
            layout.child_removed(index);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }

        self.mark_dirty(parent, DirtyFlags::CHILDREN);
        Ok(child)
    }

    /// Detach `id` from its parent, if it has one.
    pub fn detach(&mut self, id: ControlId) -> CoreResult<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        match self.index_of(parent, id) {
            Some(index) => self.remove_child(parent, index).map(|_| ()),
            None => {
                log::error!("Control {:?} is not among the children of its parent {:?}", id, parent);
                self.node_mut(id)?.parent = None;
                Ok(())
            },
        }
    }

    /// Move the child at `from` to `to` within `parent`.
    pub fn move_child(&mut self, parent: ControlId, from: usize, to: usize) -> CoreResult<()> {
        let parent_node = self.node_mut(parent)?;
        let count = parent_node.children.len();
        if from >= count {
            return Err(CoreError::index_out_of_range(from, count));
        }
        if to >= count {
            return Err(CoreError::index_out_of_range(to, count));
        }
        if from == to {
            return Ok(());
        }

        let child = parent_node.children.remove(from);
        parent_node.children.insert(to, child);
        if let Some(layout) = parent_node.layout.as_mut() {
            layout.child_moved(from, to);
        }

        self.mark_dirty(parent, DirtyFlags::CHILDREN);
        Ok(())
    }

    /// Destroy `id` and everything it owns.
    ///
    /// The control is detached from its parent first. Children, the layout and the
    /// painters are dropped with it and private styles are released from `registry`.
    pub fn destroy(&mut self, id: ControlId, registry: &mut ThemeRegistry) -> CoreResult<()> {
        self.detach(id)?;

        let mut pending = vec![id];
        let mut destroyed = 0;
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            pending.extend(node.children.iter().copied());
            if node.private_style {
                if let Some(style) = node.style {
                    registry.release_private_style(style);
                }
            }
            destroyed += 1;
        }

        log::debug!("Destroyed {} controls under {:?}", destroyed, id);
        Ok(())
    }

    // Layout

    /// Attach `layout` to `id`, replacing and returning the previous one.
    ///
    /// The new layout gets one fresh slot per existing child. Controls that do not
    /// accept layouts reject the request with [CoreError::LayoutRejected].
    pub fn set_layout(&mut self, id: ControlId, layout: Option<BoxedLayout>) -> CoreResult<Option<BoxedLayout>> {
        let node = self.node_mut(id)?;

        let mut layout = match layout {
            Some(layout) if !node.widget.accepts_layout() => {
                log::warn!(
                    "Control '{}' of type '{}' does not accept layouts, rejecting '{}'",
                    node.name,
                    node.widget.type_name(),
                    layout.type_name()
                );
                return Err(CoreError::LayoutRejected {
                    name: node.name.clone(),
                    type_name: node.widget.type_name(),
                });
            },
            layout => layout,
        };

        if let Some(layout) = layout.as_mut() {
            for index in (0..layout.slot_count()).rev() {
                layout.child_removed(index);
            }
            for index in 0..node.children.len() {
                layout.child_added(index);
            }
        }

        let previous = std::mem::replace(&mut node.layout, layout);
        node.cache = MeasureCache::new();
        self.mark_dirty(id, DirtyFlags::ALL);
        Ok(previous)
    }

    /// The layout attached to `id`.
    pub fn layout(&self, id: ControlId) -> Option<&dyn Layout> {
        self.nodes.get(id)?.layout.as_deref()
    }

    /// The layout attached to `id` if it is an `L`.
    pub fn layout_as<L: Layout>(&self, id: ControlId) -> Option<&L> {
        self.layout(id)?.as_any().downcast_ref()
    }

    /// Change the layout attached to `id` if it is an `L`, then mark `id` for measuring.
    pub fn with_layout_mut<L: Layout, R>(&mut self, id: ControlId, f: impl FnOnce(&mut L) -> R) -> Option<R> {
        let layout = self.nodes.get_mut(id)?.layout.as_mut()?;
        let result = f(layout.as_any_mut().downcast_mut::<L>()?);
        self.mark_dirty(id, DirtyFlags::MEASURE);
        Some(result)
    }

    /// Change the layout attached to `id` whatever its type, then mark `id` for measuring.
    pub fn with_any_layout_mut<R>(&mut self, id: ControlId, f: impl FnOnce(&mut dyn Layout) -> R) -> Option<R> {
        let layout = self.nodes.get_mut(id)?.layout.as_mut()?;
        let result = f(&mut **layout);
        self.mark_dirty(id, DirtyFlags::MEASURE);
        Some(result)
    }

    // Geometry

    /// Position relative to the parent.
    pub fn position(&self, id: ControlId) -> Option<Vector2<f32>> {
        self.nodes.get(id).map(|node| node.position)
    }

    /// Final size.
    pub fn size(&self, id: ControlId) -> Option<Vector2<f32>> {
        self.nodes.get(id).map(|node| node.size)
    }

    /// Position used by free placement.
    pub fn hint_position(&self, id: ControlId) -> Option<Vector2<f32>> {
        self.nodes.get(id).map(|node| node.hint_position)
    }

    /// Move the control without changing any requested size.
    pub fn set_position(&mut self, id: ControlId, position: Vector2<f32>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.position != position {
            node.position = position;
            node.dirty |= DirtyFlags::ARRANGE;
        }
        Ok(())
    }

    /// Set the final size directly, as a root or an external controller would.
    pub fn set_size(&mut self, id: ControlId, size: Vector2<f32>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        let size = size.sup(&Vector2::zeros());
        if node.size != size {
            node.size = size;
            node.dirty |= DirtyFlags::ARRANGE;
        }
        Ok(())
    }

    /// Set the position used by free placement.
    pub fn set_hint_position(&mut self, id: ControlId, position: Vector2<f32>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.hint_position != position {
            node.hint_position = position;
            self.mark_dirty(id, DirtyFlags::MEASURE);
        }
        Ok(())
    }

    /// Set or clear the explicit hint size.
    pub fn set_hint_size(&mut self, id: ControlId, size: Option<Vector2<f32>>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.hint_size != size {
            node.hint_size = size;
            self.mark_dirty(id, DirtyFlags::MEASURE);
        }
        Ok(())
    }

    /// Set or clear the explicit minimum size.
    pub fn set_min_size(&mut self, id: ControlId, size: Option<Vector2<f32>>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.min_size != size {
            node.min_size = size;
            self.mark_dirty(id, DirtyFlags::MEASURE);
        }
        Ok(())
    }

    /// Set or clear the explicit maximum size.
    pub fn set_max_size(&mut self, id: ControlId, size: Option<Vector2<f32>>) -> CoreResult<()> {
        let node = self.node_mut(id)?;
        if node.max_size != size {
            node.max_size = size;
            self.mark_dirty(id, DirtyFlags::MEASURE);
        }
        Ok(())
    }

    /// Set the position and size of the child at `index` of `container`.
    ///
    /// This is the single write-back path for child geometry. It rounds to whole
    /// pixels when the container's layout does and never invalidates the container's
    /// own measurement, so external controllers can drive placement directly.
    pub fn set_control_dimensions(
        &mut self,
        container: ControlId,
        index: usize,
        position: Vector2<f32>,
        size: Vector2<f32>,
    ) -> CoreResult<()> {
        let coordinates = self
            .node(container)?
            .layout
            .as_ref()
            .map(|layout| layout.coordinates())
            .unwrap_or_default();
        self.place_child(container, index, position, size, coordinates)
    }

    pub(crate) fn place_child(
        &mut self,
        container: ControlId,
        index: usize,
        position: Vector2<f32>,
        size: Vector2<f32>,
        coordinates: Coordinates,
    ) -> CoreResult<()> {
        let count = self.node(container)?.children.len();
        let child = self
            .child_at(container, index)
            .ok_or_else(|| CoreError::index_out_of_range(index, count))?;

        let (position, size) = match coordinates {
            Coordinates::Continuous => (position, size.sup(&Vector2::zeros())),
            Coordinates::Pixel => pixel::snap_rect(position, size),
        };

        let node = self.node_mut(child)?;
        if node.position != position || node.size != size {
            node.position = position;
            node.size = size;
            node.dirty |= DirtyFlags::ARRANGE;
        }
        Ok(())
    }

    // Invalidation

    /// Mark `id` as changed and propagate to every ancestor.
    ///
    /// Measurement caches are dropped on `id` (when `flags` touch sizes or children)
    /// and on every ancestor whose requested size may follow.
    pub fn mark_dirty(&mut self, id: ControlId, flags: DirtyFlags) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.dirty |= flags;
        if flags.intersects(DirtyFlags::MEASURE | DirtyFlags::CHILDREN) {
            node.cache.invalidate();
        }
        self.metrics.controls_invalidated += 1;

        let propagated = flags.propagated();
        let mut current = node.parent;
        while let Some(ancestor) = current {
            let Some(node) = self.nodes.get_mut(ancestor) else {
                break;
            };
            node.dirty |= propagated;
            if propagated.contains(DirtyFlags::MEASURE) {
                node.cache.invalidate();
            }
            self.metrics.controls_invalidated += 1;
            current = node.parent;
        }
    }

    /// What changed on `id` since its last layout pass.
    pub fn dirty_flags(&self, id: ControlId) -> DirtyFlags {
        self.nodes.get(id).map(|node| node.dirty).unwrap_or_else(DirtyFlags::empty)
    }

    /// Layout counters of the whole tree.
    pub fn metrics(&self) -> &InvalidationMetrics {
        &self.metrics
    }

    /// Reset the layout counters.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// How many times the layout of `id` really computed a measurement.
    pub fn measure_runs(&self, id: ControlId) -> usize {
        self.nodes.get(id).map(|node| node.cache.runs()).unwrap_or(0)
    }

    // Passes

    /// The requested sizes of `id` for `available` space.
    ///
    /// Containers with a layout are served from their cache when it is valid and
    /// either computed for the same space or independent of it. Explicit hint, min
    /// and max sizes replace the measured ones.
    pub fn measure(&mut self, id: ControlId, registry: &ThemeRegistry, available: Vector2<f32>) -> CoreResult<Measurement> {
        let node = self.node(id)?;

        let measured = if node.layout.is_some() {
            match node.cache.get(available) {
                Some(cached) => {
                    self.metrics.cache_hits += 1;
                    cached
                },
                None => self.measure_layout(id, registry, available)?,
            }
        } else {
            let resources = self.style_resources(id, registry)?;
            let ctx = WidgetContext::new(resources, &node.painters, node.widget.paint_state());
            node.widget.measure(&ctx, available)
        };

        let node = self.node_mut(id)?;
        node.dirty.remove(DirtyFlags::MEASURE);
        Ok(node.apply_overrides(measured))
    }

    fn measure_layout(&mut self, id: ControlId, registry: &ThemeRegistry, available: Vector2<f32>) -> CoreResult<Measurement> {
        let Some(mut layout) = self.node_mut(id)?.layout.take() else {
            return Ok(Measurement::ZERO);
        };

        let coordinates = layout.coordinates();
        let measured = {
            let mut ctx = LayoutContext::new(self, registry, id, coordinates);
            layout.measure(&mut ctx, available)
        };
        let measured = match coordinates {
            Coordinates::Continuous => measured.normalized(),
            Coordinates::Pixel => pixel::snap_measurement(measured),
        };
        self.metrics.measure_runs += 1;

        let node = self.node_mut(id)?;
        node.layout = Some(layout);
        node.cache.store(available, measured);
        Ok(measured)
    }

    /// Place the children of `id` and of every container below it.
    ///
    /// Uses the control's current size as the space. The layout is measured first
    /// (usually a cache hit) so its slots hold current child sizes.
    pub fn arrange(&mut self, id: ControlId, registry: &ThemeRegistry) -> CoreResult<()> {
        let node = self.node(id)?;
        let space = node.size;

        if node.layout.is_some() {
            self.measure(id, registry, space)?;
            if let Some(mut layout) = self.node_mut(id)?.layout.take() {
                let coordinates = layout.coordinates();
                {
                    let mut ctx = LayoutContext::new(self, registry, id, coordinates);
                    layout.arrange(&mut ctx, space);
                }
                self.metrics.arrange_runs += 1;
                self.node_mut(id)?.layout = Some(layout);
            }
        }

        let node = self.node_mut(id)?;
        node.dirty.remove(DirtyFlags::ARRANGE | DirtyFlags::CHILDREN);
        let children = node.children.clone();
        for child in children {
            self.arrange(child, registry)?;
        }
        Ok(())
    }

    /// Give `root` the size `space` and lay out everything below it.
    pub fn update_layout(&mut self, root: ControlId, registry: &ThemeRegistry, space: Vector2<f32>) -> CoreResult<()> {
        self.set_size(root, space)?;
        self.arrange(root, registry)
    }

    /// Paint `root` and everything below it, parents before children.
    pub fn paint(&self, root: ControlId, registry: &ThemeRegistry, canvas: &mut dyn Canvas) -> CoreResult<()> {
        let origin = self
            .parent(root)
            .map(|parent| self.absolute_position(parent))
            .unwrap_or_else(Vector2::zeros);
        self.paint_at(root, registry, canvas, origin)
    }

    fn paint_at(&self, id: ControlId, registry: &ThemeRegistry, canvas: &mut dyn Canvas, origin: Vector2<f32>) -> CoreResult<()> {
        let node = self.node(id)?;
        let top_left = origin + node.position;
        let rect = Rect::new(
            top_left.x as f64,
            top_left.y as f64,
            (top_left.x + node.size.x) as f64,
            (top_left.y + node.size.y) as f64,
        );

        let resources = self.style_resources(id, registry)?;
        let ctx = WidgetContext::new(resources, &node.painters, node.widget.paint_state());
        node.widget.paint(&ctx, canvas, rect);

        for child in &node.children {
            self.paint_at(*child, registry, canvas, top_left)?;
        }
        Ok(())
    }

    /// Position of `id` relative to its root.
    pub fn absolute_position(&self, id: ControlId) -> Vector2<f32> {
        let mut position = Vector2::zeros();
        let mut current = Some(id);
        while let Some(control) = current {
            let Some(node) = self.nodes.get(control) else {
                break;
            };
            position += node.position;
            current = node.parent;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ListLayout;
    use crate::widget::GuiRoot;
    use std::any::Any;

    #[derive(Debug, Default)]
    struct Boxy {
        container: bool,
    }

    impl Widget for Boxy {
        fn type_name(&self) -> &'static str {
            "Boxy"
        }

        fn is_container(&self) -> bool {
            self.container
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn container(tree: &mut UiTree, name: &str) -> ControlId {
        tree.create(Boxy { container: true }, name)
    }

    fn leaf(tree: &mut UiTree, name: &str) -> ControlId {
        tree.create(Boxy::default(), name)
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut tree = UiTree::new();
        let parent = container(&mut tree, "parent");
        let a = leaf(&mut tree, "a");
        let b = leaf(&mut tree, "b");

        assert_eq!(tree.add_child(parent, a).unwrap(), 0);
        tree.insert_child(parent, 0, b).unwrap();
        assert_eq!(tree.children(parent), &[b, a]);
        assert_eq!(tree.parent(a), Some(parent));

        assert_eq!(tree.remove_child(parent, 1).unwrap(), a);
        assert_eq!(tree.parent(a), None);
        assert!(tree.contains(a));
        assert_eq!(tree.index_of(parent, b), Some(0));
    }

    #[test]
    fn test_add_rejects_bad_requests() {
        let mut tree = UiTree::new();
        let outer = container(&mut tree, "outer");
        let inner = container(&mut tree, "inner");
        let a = leaf(&mut tree, "a");

        tree.add_child(outer, inner).unwrap();
        assert!(matches!(tree.add_child(a, outer), Err(CoreError::NotAContainer { .. })));
        assert!(matches!(tree.add_child(outer, inner), Err(CoreError::ChildHasParent { .. })));
        assert!(matches!(tree.add_child(inner, outer), Err(CoreError::WouldCreateCycle { .. })));
        assert!(matches!(tree.add_child(inner, inner), Err(CoreError::WouldCreateCycle { .. })));
        assert!(matches!(
            tree.insert_child(inner, 3, a),
            Err(CoreError::IndexOutOfRange { index: 3, count: 0 })
        ));
    }

    #[test]
    fn test_move_child_keeps_slots_in_step() {
        let mut tree = UiTree::new();
        let parent = container(&mut tree, "parent");
        tree.set_layout(parent, Some(Box::new(ListLayout::vertical()))).unwrap();
        let ids: Vec<_> = (0..3).map(|i| leaf(&mut tree, &format!("c{}", i))).collect();
        for id in &ids {
            tree.add_child(parent, *id).unwrap();
        }
        tree.with_layout_mut::<ListLayout, _>(parent, |list| list.slot_mut(0).unwrap().enforce_limits = true);

        tree.move_child(parent, 0, 2).unwrap();
        assert_eq!(tree.children(parent), &[ids[1], ids[2], ids[0]]);

        let list = tree.layout_as::<ListLayout>(parent).unwrap();
        assert!(list.slot(2).unwrap().enforce_limits);
        assert!(!list.slot(0).unwrap().enforce_limits);
    }

    #[test]
    fn test_destroy_cascades() {
        let mut registry = ThemeRegistry::default();
        registry.initialize();

        let mut tree = UiTree::new();
        let root = tree.create(GuiRoot, "root");
        let panel = container(&mut tree, "panel");
        let a = leaf(&mut tree, "a");
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, a).unwrap();

        tree.destroy(panel, &mut registry).unwrap();
        assert!(!tree.contains(panel));
        assert!(!tree.contains(a));
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_root_rejects_layout() {
        let mut tree = UiTree::new();
        let root = tree.create(GuiRoot, "root");
        let err = tree
            .set_layout(root, Some(Box::new(ListLayout::vertical())))
            .unwrap_err();
        assert!(matches!(err, CoreError::LayoutRejected { type_name: "GuiRoot", .. }));
        assert!(tree.layout(root).is_none());
    }

    #[test]
    fn test_set_layout_returns_previous() {
        let mut tree = UiTree::new();
        let parent = container(&mut tree, "parent");
        let a = leaf(&mut tree, "a");
        tree.add_child(parent, a).unwrap();

        assert!(tree.set_layout(parent, Some(Box::new(ListLayout::vertical()))).unwrap().is_none());
        let previous = tree
            .set_layout(parent, Some(Box::new(ListLayout::horizontal())))
            .unwrap()
            .unwrap();
        assert_eq!(previous.type_name(), ListLayout::TYPE_NAME);
        assert_eq!(tree.layout(parent).unwrap().slot_count(), 1);
    }

    #[test]
    fn test_mark_dirty_reaches_ancestors() {
        let mut tree = UiTree::new();
        let outer = container(&mut tree, "outer");
        let inner = container(&mut tree, "inner");
        let a = leaf(&mut tree, "a");
        tree.add_child(outer, inner).unwrap();
        tree.add_child(inner, a).unwrap();

        for id in [outer, inner, a] {
            tree.node_mut(id).unwrap().dirty = DirtyFlags::empty();
        }
        tree.set_position(a, Vector2::new(1.0, 1.0)).unwrap();
        assert_eq!(tree.dirty_flags(outer), DirtyFlags::empty());

        tree.set_hint_size(a, Some(Vector2::new(5.0, 5.0))).unwrap();
        assert!(tree.dirty_flags(a).contains(DirtyFlags::MEASURE));
        assert!(tree.dirty_flags(inner).contains(DirtyFlags::MEASURE | DirtyFlags::ARRANGE));
        assert!(tree.dirty_flags(outer).contains(DirtyFlags::MEASURE | DirtyFlags::ARRANGE));
    }

    #[test]
    fn test_find_by_name() {
        let mut tree = UiTree::new();
        let root = tree.create(GuiRoot, "root");
        let panel = container(&mut tree, "panel");
        let a = leaf(&mut tree, "ok");
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, a).unwrap();

        assert_eq!(tree.find(root, "ok"), Some(a));
        assert_eq!(tree.find(root, "missing"), None);
    }
}
