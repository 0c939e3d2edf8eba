use std::any::Any;

use vello::kurbo::Rect;
use vello::peniko::Color;

use crate::ids;
use crate::painter::{
    Canvas, PaintState, PainterKind, PainterMapping, PainterTag, PartPainter, StateOrder, StateVisuals,
};
use crate::resources::StyleResources;
use crate::value::Padding;

/// Draws a state-dependent background with a border around it.
///
/// Which background is drawn comes from the resolved [StateOrder]: the first entry
/// matching the control's state picks the visuals. A missing state background
/// falls back to the idle one, and the down background to the pressed one.
#[derive(Debug, Clone)]
pub struct FramedFieldPainter {
    /// Order in which states are checked.
    pub state_order: StateOrder,
    /// Background per state.
    pub backgrounds: StateVisuals<Color>,
    /// Inset of the background per state.
    pub field_paddings: StateVisuals<Padding>,
    /// Border color.
    pub border: Color,
    /// Border color while focused.
    pub focus_border: Color,
    /// Border width, no border when zero.
    pub border_width: f32,
    /// Space between the border and the content.
    pub padding: Padding,
}

impl Default for FramedFieldPainter {
    fn default() -> Self {
        Self {
            state_order: StateOrder::default(),
            backgrounds: StateVisuals::uniform(Color::WHITE),
            field_paddings: StateVisuals::uniform(Padding::ZERO),
            border: Color::BLACK,
            focus_border: Color::BLACK,
            border_width: 1.0,
            padding: Padding::ZERO,
        }
    }
}

impl FramedFieldPainter {
    /// The background for `state`.
    pub fn background_for(&self, state: PaintState) -> Color {
        self.backgrounds.get(self.state_order.matching(state))
    }

    /// The rectangle the background fills for `state`.
    pub fn field_rect(&self, rect: Rect, state: PaintState) -> Rect {
        let inset = self.field_paddings.get(self.state_order.matching(state));
        Rect::new(
            rect.x0 + inset.left as f64,
            rect.y0 + inset.top as f64,
            (rect.x1 - inset.right as f64).max(rect.x0),
            (rect.y1 - inset.bottom as f64).max(rect.y0),
        )
    }
}

impl PainterKind for FramedFieldPainter {
    const TAG: PainterTag = PainterTag::new("FramedFieldPainter");
    const BASE: PainterTag = PainterTag::STATE_PAINTER;
}

impl PartPainter for FramedFieldPainter {
    fn tag(&self) -> PainterTag {
        Self::TAG
    }

    fn initialize(&mut self, resources: &StyleResources<'_>, mapping: &PainterMapping) {
        let color = |id, fallback| resources.color(mapping.map(id)).unwrap_or(fallback);
        let inset = |id, fallback| resources.padding(mapping.map(id)).unwrap_or(fallback);

        self.state_order = resources
            .get(mapping.map(ids::STATE_ORDER))
            .unwrap_or_else(|| self.state_order.clone());

        let idle = color(ids::BACKGROUND_COLOR, self.backgrounds.idle);
        let pressed = color(ids::BACKGROUND_PRESSED_COLOR, idle);
        self.backgrounds = StateVisuals {
            idle,
            hovered: color(ids::BACKGROUND_HOVER_COLOR, idle),
            pressed,
            down: color(ids::BACKGROUND_DOWN_COLOR, pressed),
            focused: color(ids::BACKGROUND_FOCUSED_COLOR, idle),
            disabled: color(ids::BACKGROUND_DISABLED_COLOR, idle),
        };

        let idle = inset(ids::FIELD_PADDING, self.field_paddings.idle);
        let pressed = inset(ids::FIELD_PRESSED_PADDING, idle);
        self.field_paddings = StateVisuals {
            idle,
            hovered: inset(ids::FIELD_HOVER_PADDING, idle),
            pressed,
            down: inset(ids::FIELD_DOWN_PADDING, pressed),
            focused: inset(ids::FIELD_FOCUSED_PADDING, idle),
            disabled: inset(ids::FIELD_DISABLED_PADDING, idle),
        };

        self.border = color(ids::BORDER_COLOR, self.border);
        self.focus_border = color(ids::BORDER_FOCUS_COLOR, self.border);
        self.border_width = resources
            .float(mapping.map(ids::BORDER_WIDTH))
            .unwrap_or(self.border_width)
            .max(0.0);
        self.padding = inset(ids::INNER_PADDING, self.padding);
    }

    fn draw(&self, canvas: &mut dyn Canvas, rect: Rect, state: PaintState) {
        canvas.fill_rect(self.field_rect(rect, state), self.background_for(state));

        if self.border_width > 0.0 {
            let border = if state.contains(PaintState::FOCUSED) {
                self.focus_border
            } else {
                self.border
            };
            canvas.stroke_rect(rect, border, self.border_width as f64);
        }
    }

    fn content_padding(&self) -> Padding {
        Padding::new(
            self.padding.left + self.border_width,
            self.padding.top + self.border_width,
            self.padding.right + self.border_width,
            self.padding.bottom + self.border_width,
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
