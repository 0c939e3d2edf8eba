use std::any::Any;

use vello::kurbo::Rect;
use vello::peniko::Color;

use crate::align::{HorizontalAlign, VerticalAlign};
use crate::ids;
use crate::painter::{Canvas, PaintState, PainterKind, PainterMapping, PainterTag, PartPainter};
use crate::resources::StyleResources;
use crate::value::TextureHandle;

/// Draws a tinted texture aligned inside its rectangle.
#[derive(Debug, Clone)]
pub struct AlignedImagePainter {
    /// The texture, nothing is drawn without one.
    pub image: Option<TextureHandle>,
    /// Natural size of the texture as reported by the host.
    pub image_size: Option<(f64, f64)>,
    /// Tint color.
    pub tint: Color,
    /// Horizontal alignment.
    pub align: HorizontalAlign,
    /// Vertical alignment.
    pub valign: VerticalAlign,
}

impl Default for AlignedImagePainter {
    fn default() -> Self {
        Self {
            image: None,
            image_size: None,
            tint: Color::WHITE,
            align: HorizontalAlign::Center,
            valign: VerticalAlign::Center,
        }
    }
}

impl AlignedImagePainter {
    /// Where the image lands inside `rect`.
    pub fn image_rect(&self, rect: Rect) -> Rect {
        let Some((width, height)) = self.image_size else {
            return rect;
        };

        let width = if self.align == HorizontalAlign::Fill { rect.width() } else { width.min(rect.width()) };
        let height = if self.valign == VerticalAlign::Fill { rect.height() } else { height.min(rect.height()) };
        let x = rect.x0 + self.align.offset(width, rect.width());
        let y = rect.y0 + self.valign.offset(height, rect.height());

        Rect::new(x, y, x + width, y + height)
    }
}

impl PainterKind for AlignedImagePainter {
    const TAG: PainterTag = PainterTag::new("AlignedImagePainter");
    const BASE: PainterTag = PainterTag::PART_PAINTER;
}

impl PartPainter for AlignedImagePainter {
    fn tag(&self) -> PainterTag {
        Self::TAG
    }

    fn initialize(&mut self, resources: &StyleResources<'_>, mapping: &PainterMapping) {
        if let Some(image) = resources.texture(mapping.map(ids::IMAGE)) {
            self.image = Some(image);
        }
        self.tint = resources.color(mapping.map(ids::IMAGE_TINT)).unwrap_or(self.tint);
        self.align = resources
            .get_enum(mapping.map(ids::IMAGE_ALIGN))
            .unwrap_or(self.align);
        self.valign = resources
            .get_enum(mapping.map(ids::IMAGE_VALIGN))
            .unwrap_or(self.valign);
    }

    fn draw(&self, canvas: &mut dyn Canvas, rect: Rect, _state: PaintState) {
        if let Some(image) = &self.image {
            canvas.draw_texture(self.image_rect(rect), image, self.tint);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_rect_alignment() {
        let painter = AlignedImagePainter {
            image_size: Some((10.0, 10.0)),
            align: HorizontalAlign::End,
            valign: VerticalAlign::Center,
            ..Default::default()
        };

        let rect = painter.image_rect(Rect::new(0.0, 0.0, 50.0, 30.0));
        assert_eq!(rect, Rect::new(40.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn test_image_rect_without_size_fills() {
        let painter = AlignedImagePainter::default();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(painter.image_rect(rect), rect);
    }
}
