use std::any::Any;

use nalgebra::Vector2;
use vello::kurbo::Rect;

use fudge_core::layout::{Measurement, UNBOUNDED};
use fudge_core::property::PropertyBag;
use fudge_core::widget::{PainterRequest, Widget, WidgetContext, WidgetKind};
use fudge_theme::id::ResourceId;
use fudge_theme::ids;
use fudge_theme::painter::{Canvas, PaintState, PainterTag, PartPainter, TextPainter};
use fudge_theme::theme::defaults::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use fudge_theme::value::{FontDescriptor, Padding};

/// A framed area with an optional caption that reacts to the pointer.
///
/// The host feeds pointer state in through [Button::set_state]; the state is handed to
/// the painters when drawing.
///
/// ### Theming
/// - `BUTTON_PAINTER` - The background painter. Must be a state painter, usually a
///   [FramedFieldPainter](fudge_theme::painter::FramedFieldPainter).
/// - `LABEL_PAINTER` - The caption painter. Its text color is read from `BUTTON_TEXT_COLOR`.
/// - `TEXT_FONT` - The caption font.
/// - `INNER_PADDING`, `BORDER_WIDTH` - Space around the caption when no painter exists yet.
#[derive(Debug, Clone, Default)]
pub struct Button {
    text: Option<String>,
    state: ButtonState,
    disabled: bool,
    focused: bool,
}

impl Button {
    /// Create a new button without a caption.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the caption.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set whether the button is disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The caption.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set or clear the caption.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// The pointer state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Set the pointer state.
    pub fn set_state(&mut self, state: ButtonState) {
        self.state = state;
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Set whether the button is disabled.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set whether the button has keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn padding(ctx: &WidgetContext<'_>) -> Padding {
        if let Some(painter) = ctx.painters().get(ids::BUTTON_PAINTER) {
            return painter.content_padding();
        }

        let resources = ctx.resources();
        let border = resources.float(ids::BORDER_WIDTH).unwrap_or(0.0).max(0.0);
        let inner = resources.padding(ids::INNER_PADDING).unwrap_or(Padding::ZERO);
        Padding::new(
            inner.left + border,
            inner.top + border,
            inner.right + border,
            inner.bottom + border,
        )
    }
}

impl WidgetKind for Button {
    const TYPE_NAME: &'static str = "Button";
}

impl Widget for Button {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn base_classes(&self) -> &'static [&'static str] {
        &["BaseButton"]
    }

    fn measure(&self, ctx: &WidgetContext<'_>, _available: Vector2<f32>) -> Measurement {
        let padding = Self::padding(ctx);
        let mut size = Vector2::new(padding.width(), padding.height());

        if let Some(text) = &self.text {
            let font = ctx
                .resources()
                .font(ids::TEXT_FONT)
                .unwrap_or_else(|| FontDescriptor::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE));
            size += Vector2::new(font.estimate_width(text), font.line_height());
        }

        Measurement::new(size, size, Vector2::new(UNBOUNDED, UNBOUNDED))
    }

    fn painter_requests(&self) -> Vec<PainterRequest> {
        vec![
            PainterRequest::new(ids::BUTTON_PAINTER, PainterTag::STATE_PAINTER),
            PainterRequest::new(ids::LABEL_PAINTER, PainterTag::PART_PAINTER)
                .map(ids::TEXT_COLOR, ids::BUTTON_TEXT_COLOR),
        ]
    }

    fn configure_painter(&self, painter_id: ResourceId, painter: &mut dyn PartPainter) {
        if painter_id != ids::LABEL_PAINTER {
            return;
        }
        if let Some(caption) = painter.as_any_mut().downcast_mut::<TextPainter>() {
            caption.set_text(self.text.clone().unwrap_or_default());
        }
    }

    fn paint_state(&self) -> PaintState {
        let mut state = self.state.paint_state();
        state.set(PaintState::DISABLED, self.disabled);
        state.set(PaintState::FOCUSED, self.focused);
        state
    }

    fn paint(&self, ctx: &WidgetContext<'_>, canvas: &mut dyn Canvas, rect: Rect) {
        let padding = ctx
            .draw_painter(ids::BUTTON_PAINTER, canvas, rect)
            .unwrap_or(Padding::ZERO);

        if self.text.is_some() {
            let inner = Rect::new(
                rect.x0 + padding.left as f64,
                rect.y0 + padding.top as f64,
                (rect.x1 - padding.right as f64).max(rect.x0),
                (rect.y1 - padding.bottom as f64).max(rect.y0),
            );
            ctx.draw_painter(ids::LABEL_PAINTER, canvas, inner);
        }
    }

    fn properties(&self) -> PropertyBag {
        let mut properties = PropertyBag::new().with("disabled", self.disabled);
        if let Some(text) = &self.text {
            properties.set("text", text.as_str());
        }
        properties
    }

    fn apply_properties(&mut self, properties: &PropertyBag) {
        if let Some(text) = properties.get_str("text") {
            self.text = Some(text.to_string());
        }
        if let Some(disabled) = properties.get_bool("disabled") {
            self.disabled = disabled;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The pointer state of a [Button].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// The button is idling (inactive).
    #[default]
    Idle,
    /// The cursor is hovering over the button.
    Hovered,
    /// The cursor is hovering over the button and the left click button is pressed.
    Pressed,
}

impl ButtonState {
    /// The painter state for this pointer state.
    pub fn paint_state(self) -> PaintState {
        match self {
            Self::Idle => PaintState::empty(),
            Self::Hovered => PaintState::HOVERED,
            Self::Pressed => PaintState::HOVERED | PaintState::PRESSED,
        }
    }
}
