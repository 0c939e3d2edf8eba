use crate::align::{HorizontalAlign, VerticalAlign};
use crate::ids;
use crate::painter::{AlignedImagePainter, FramedFieldPainter, PainterKind, StateOrder, TextPainter};
use crate::theme::palette::ThemePalette;
use crate::theme::Theme;
use crate::value::{FontDescriptor, Padding};
use vello::peniko::Color;

/// Default font family of the built-in themes.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
/// Default font size of the built-in themes.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
/// Name of the built-in dark theme registered next to the main theme.
pub const DARK_THEME_NAME: &str = "Dark";

/// Write every standard resource into `theme`, colored from `palette`.
pub fn populate(theme: &mut Theme, palette: &ThemePalette) {
    theme.set(ids::TEXT_COLOR, palette.text);
    theme.set(ids::TEXT_DISABLED_COLOR, palette.text_muted);
    theme.set(ids::TEXT_FONT, FontDescriptor::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE));
    theme.set_enum(ids::TEXT_ALIGN, HorizontalAlign::Start);
    theme.set_enum(ids::TEXT_VALIGN, VerticalAlign::Center);

    theme.set(ids::BACKGROUND_COLOR, palette.background_alt);
    theme.set(ids::BACKGROUND_HOVER_COLOR, palette.primary_light);
    theme.set(ids::BACKGROUND_PRESSED_COLOR, palette.primary_dark);
    theme.set(ids::BACKGROUND_DISABLED_COLOR, palette.background_disabled);
    theme.set(ids::BORDER_COLOR, palette.border);
    theme.set(ids::BORDER_FOCUS_COLOR, palette.primary);
    theme.set(ids::BORDER_WIDTH, 1.0f32);
    theme.set(ids::INNER_PADDING, Padding::new(6.0, 3.0, 6.0, 3.0));
    theme.set(ids::STATE_ORDER, StateOrder::default());

    theme.set(ids::FILL_COLOR, palette.background);
    theme.set(ids::IMAGE_TINT, Color::WHITE);
    theme.set_enum(ids::IMAGE_ALIGN, HorizontalAlign::Center);
    theme.set_enum(ids::IMAGE_VALIGN, VerticalAlign::Center);

    theme.set(ids::BUTTON_TEXT_COLOR, palette.text);
    theme.set_painter(ids::BUTTON_PAINTER, FramedFieldPainter::TAG.name());
    theme.set_painter(ids::FIELD_PAINTER, FramedFieldPainter::TAG.name());
    theme.set_painter(ids::LABEL_PAINTER, TextPainter::TAG.name());
    theme.set_painter(ids::IMAGE_PAINTER, AlignedImagePainter::TAG.name());
}
