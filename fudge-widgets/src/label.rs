use std::any::Any;

use nalgebra::Vector2;
use vello::kurbo::Rect;

use fudge_core::layout::{Measurement, UNBOUNDED};
use fudge_core::property::PropertyBag;
use fudge_core::widget::{PainterRequest, Widget, WidgetContext, WidgetKind};
use fudge_theme::id::ResourceId;
use fudge_theme::ids;
use fudge_theme::painter::{Canvas, PainterTag, PartPainter, TextPainter};
use fudge_theme::theme::defaults::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use fudge_theme::value::FontDescriptor;

/// Displays a single line of text.
///
/// The requested size follows the font the style resolves for `TEXT_FONT` and does not
/// depend on the available space.
///
/// ### Theming
/// - `LABEL_PAINTER` - The painter drawing the text, usually a [TextPainter].
/// - `TEXT_FONT` - The font, used for measuring and drawing.
/// - `TEXT_COLOR`, `TEXT_ALIGN`, `TEXT_VALIGN` - Read by the text painter.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    /// Create a new label with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl WidgetKind for Label {
    const TYPE_NAME: &'static str = "Label";
}

impl Widget for Label {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn measure(&self, ctx: &WidgetContext<'_>, _available: Vector2<f32>) -> Measurement {
        let font = ctx
            .resources()
            .font(ids::TEXT_FONT)
            .unwrap_or_else(|| FontDescriptor::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE));
        let size = Vector2::new(font.estimate_width(&self.text), font.line_height());
        Measurement::new(size, size, Vector2::new(UNBOUNDED, UNBOUNDED))
    }

    fn painter_requests(&self) -> Vec<PainterRequest> {
        vec![PainterRequest::new(ids::LABEL_PAINTER, PainterTag::PART_PAINTER)]
    }

    fn configure_painter(&self, painter_id: ResourceId, painter: &mut dyn PartPainter) {
        if painter_id != ids::LABEL_PAINTER {
            return;
        }
        if let Some(text) = painter.as_any_mut().downcast_mut::<TextPainter>() {
            text.set_text(self.text.as_str());
        }
    }

    fn paint(&self, ctx: &WidgetContext<'_>, canvas: &mut dyn Canvas, rect: Rect) {
        ctx.draw_painter(ids::LABEL_PAINTER, canvas, rect);
    }

    fn properties(&self) -> PropertyBag {
        PropertyBag::new().with("text", self.text.as_str())
    }

    fn apply_properties(&mut self, properties: &PropertyBag) {
        if let Some(text) = properties.get_str("text") {
            self.text = text.to_string();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
