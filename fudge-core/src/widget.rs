use std::any::Any;
use std::fmt;

use nalgebra::Vector2;
use vello::kurbo::Rect;

use fudge_theme::id::ResourceId;
use fudge_theme::painter::{Canvas, PaintState, PainterMapping, PainterTag, PartPainter};
use fudge_theme::resources::StyleResources;
use fudge_theme::value::Padding;

use crate::layout::Measurement;
use crate::painters::PainterSet;
use crate::property::PropertyBag;

/// A boxed widget.
pub type BoxedWidget = Box<dyn Widget>;

/// A part painter a widget wants the tree to keep for it.
#[derive(Debug, Clone)]
pub struct PainterRequest {
    /// The resource id naming the painter type in the style.
    pub painter_id: ResourceId,
    /// The painter type the widget can work with.
    pub required_base: PainterTag,
    /// Id indirections handed to the painter on initialization.
    pub mapping: PainterMapping,
}

impl PainterRequest {
    /// Request the painter named by `painter_id`, which must derive from `required_base`.
    pub fn new(painter_id: ResourceId, required_base: PainterTag) -> Self {
        Self {
            painter_id,
            required_base,
            mapping: PainterMapping::new(),
        }
    }

    /// Builder form adding an id indirection.
    pub fn map(mut self, from: ResourceId, to: ResourceId) -> Self {
        self.mapping.insert(from, to);
        self
    }
}

/// What a widget sees while it measures or paints.
pub struct WidgetContext<'a> {
    resources: StyleResources<'a>,
    painters: &'a PainterSet,
    state: PaintState,
}

impl<'a> WidgetContext<'a> {
    pub(crate) fn new(resources: StyleResources<'a>, painters: &'a PainterSet, state: PaintState) -> Self {
        Self {
            resources,
            painters,
            state,
        }
    }

    /// Resources resolved over the control's style chain and theme.
    pub fn resources(&self) -> &StyleResources<'a> {
        &self.resources
    }

    /// The painters the control owns.
    pub fn painters(&self) -> &'a PainterSet {
        self.painters
    }

    /// The state painters should draw.
    pub fn state(&self) -> PaintState {
        self.state
    }

    /// Draw the painter stored under `id`, if any, and return its content padding.
    pub fn draw_painter(&self, id: ResourceId, canvas: &mut dyn Canvas, rect: Rect) -> Option<Padding> {
        let painter = self.painters.get(id)?;
        painter.draw(canvas, rect, self.state);
        Some(painter.content_padding())
    }
}

/// The behavior of a control.
///
/// The tree owns the structural data of a control (name, parent, children, style,
/// geometry and painters); a widget only adds what is specific to its type.
///
/// # Class chain
///
/// [type_name](Widget::type_name) followed by [base_classes](Widget::base_classes)
/// forms the class chain. The first class with a registered style of the same name is
/// the control's class style.
pub trait Widget: Any + fmt::Debug {
    /// The name the type is registered under in the control factory.
    fn type_name(&self) -> &'static str;

    /// Names of the base classes, nearest first.
    fn base_classes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether the control can hold children.
    fn is_container(&self) -> bool {
        false
    }

    /// Whether a layout may be attached. Defaults to [is_container](Widget::is_container).
    fn accepts_layout(&self) -> bool {
        self.is_container()
    }

    /// The requested sizes of a control without a layout.
    fn measure(&self, _ctx: &WidgetContext<'_>, _available: Vector2<f32>) -> Measurement {
        Measurement::ZERO
    }

    /// The painters the control draws with.
    fn painter_requests(&self) -> Vec<PainterRequest> {
        Vec::new()
    }

    /// Push widget data into a painter after it was initialized from the style.
    fn configure_painter(&self, _painter_id: ResourceId, _painter: &mut dyn PartPainter) {}

    /// The state painters should draw.
    fn paint_state(&self) -> PaintState {
        PaintState::empty()
    }

    /// Draw the control into `rect`, its absolute bounds. Children are drawn afterwards.
    fn paint(&self, _ctx: &WidgetContext<'_>, _canvas: &mut dyn Canvas, _rect: Rect) {}

    /// Widget-specific settings for the asset boundary.
    fn properties(&self) -> PropertyBag {
        PropertyBag::new()
    }

    /// Apply settings produced by [properties](Widget::properties).
    fn apply_properties(&mut self, _properties: &PropertyBag) {}

    /// Upcast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The full class chain of `widget`: its type, then its base classes.
pub fn class_chain(widget: &dyn Widget) -> Vec<&'static str> {
    std::iter::once(widget.type_name())
        .chain(widget.base_classes().iter().copied())
        .collect()
}

/// A constructible widget type.
pub trait WidgetKind: Widget + Default {
    /// The name the type registers under.
    const TYPE_NAME: &'static str;
}

/// The top of a control tree.
///
/// Holds children at the positions they are given and never accepts a layout.
#[derive(Debug, Clone, Default)]
pub struct GuiRoot;

impl WidgetKind for GuiRoot {
    const TYPE_NAME: &'static str = "GuiRoot";
}

impl Widget for GuiRoot {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn is_container(&self) -> bool {
        true
    }

    fn accepts_layout(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
