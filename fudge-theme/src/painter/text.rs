use std::any::Any;

use vello::kurbo::Rect;
use vello::peniko::Color;

use crate::align::{HorizontalAlign, VerticalAlign};
use crate::ids;
use crate::painter::{Canvas, PaintState, PainterKind, PainterMapping, PainterTag, PartPainter};
use crate::resources::StyleResources;
use crate::theme::defaults::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::value::FontDescriptor;

/// Draws a single line of aligned text.
#[derive(Debug, Clone)]
pub struct TextPainter {
    text: String,
    /// The font.
    pub font: FontDescriptor,
    /// Text color.
    pub color: Color,
    /// Text color while disabled.
    pub disabled_color: Color,
    /// Horizontal alignment.
    pub align: HorizontalAlign,
    /// Vertical alignment.
    pub valign: VerticalAlign,
}

impl Default for TextPainter {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: FontDescriptor::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE),
            color: Color::BLACK,
            disabled_color: Color::BLACK,
            align: HorizontalAlign::Start,
            valign: VerticalAlign::Center,
        }
    }
}

impl TextPainter {
    /// The text to draw.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text to draw.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Estimated size of the text.
    pub fn text_size(&self) -> (f64, f64) {
        (
            self.font.estimate_width(&self.text) as f64,
            self.font.line_height() as f64,
        )
    }
}

impl PainterKind for TextPainter {
    const TAG: PainterTag = PainterTag::new("TextPainter");
    const BASE: PainterTag = PainterTag::PART_PAINTER;
}

impl PartPainter for TextPainter {
    fn tag(&self) -> PainterTag {
        Self::TAG
    }

    fn initialize(&mut self, resources: &StyleResources<'_>, mapping: &PainterMapping) {
        if let Some(font) = resources.font(mapping.map(ids::TEXT_FONT)) {
            self.font = font;
        }
        self.color = resources.color(mapping.map(ids::TEXT_COLOR)).unwrap_or(self.color);
        self.disabled_color = resources
            .color(mapping.map(ids::TEXT_DISABLED_COLOR))
            .unwrap_or(self.color);
        self.align = resources
            .get_enum(mapping.map(ids::TEXT_ALIGN))
            .unwrap_or(self.align);
        self.valign = resources
            .get_enum(mapping.map(ids::TEXT_VALIGN))
            .unwrap_or(self.valign);
    }

    fn draw(&self, canvas: &mut dyn Canvas, rect: Rect, state: PaintState) {
        if self.text.is_empty() {
            return;
        }

        let (mut width, mut height) = self.text_size();
        if self.align == HorizontalAlign::Fill {
            width = rect.width();
        }
        if self.valign == VerticalAlign::Fill {
            height = rect.height();
        }

        let x = rect.x0 + self.align.offset(width, rect.width());
        let y = rect.y0 + self.valign.offset(height, rect.height());
        let color = if state.contains(PaintState::DISABLED) {
            self.disabled_color
        } else {
            self.color
        };

        canvas.draw_text(Rect::new(x, y, x + width, y + height), &self.text, &self.font, color);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
