//! Standard resource ids used by the built-in painters and controls.

use crate::id::ResourceId;

/// First id handed out by the token table.
pub const RESERVED_END: u32 = 1024;

/// Text color.
pub const TEXT_COLOR: ResourceId = ResourceId::new(1);
/// Font descriptor for text.
pub const TEXT_FONT: ResourceId = ResourceId::new(2);
/// Horizontal text alignment ([HorizontalAlign](crate::align::HorizontalAlign)).
pub const TEXT_ALIGN: ResourceId = ResourceId::new(3);
/// Vertical text alignment ([VerticalAlign](crate::align::VerticalAlign)).
pub const TEXT_VALIGN: ResourceId = ResourceId::new(4);
/// Text color while disabled.
pub const TEXT_DISABLED_COLOR: ResourceId = ResourceId::new(5);

/// Idle background.
pub const BACKGROUND_COLOR: ResourceId = ResourceId::new(10);
/// Background while hovered.
pub const BACKGROUND_HOVER_COLOR: ResourceId = ResourceId::new(11);
/// Background while pressed.
pub const BACKGROUND_PRESSED_COLOR: ResourceId = ResourceId::new(12);
/// Background while disabled.
pub const BACKGROUND_DISABLED_COLOR: ResourceId = ResourceId::new(13);
/// Border color.
pub const BORDER_COLOR: ResourceId = ResourceId::new(14);
/// Border color while focused.
pub const BORDER_FOCUS_COLOR: ResourceId = ResourceId::new(15);
/// Border width in continuous units.
pub const BORDER_WIDTH: ResourceId = ResourceId::new(16);
/// Padding between a frame and its content.
pub const INNER_PADDING: ResourceId = ResourceId::new(17);
/// Background while focused.
pub const BACKGROUND_FOCUSED_COLOR: ResourceId = ResourceId::new(18);
/// Background while toggled down.
pub const BACKGROUND_DOWN_COLOR: ResourceId = ResourceId::new(19);

/// Order in which a state painter checks interaction states ([StateOrder](crate::painter::StateOrder)).
pub const STATE_ORDER: ResourceId = ResourceId::new(50);
/// Inset of the idle background inside the painted rectangle.
pub const FIELD_PADDING: ResourceId = ResourceId::new(51);
/// Background inset while hovered.
pub const FIELD_HOVER_PADDING: ResourceId = ResourceId::new(52);
/// Background inset while pressed.
pub const FIELD_PRESSED_PADDING: ResourceId = ResourceId::new(53);
/// Background inset while toggled down.
pub const FIELD_DOWN_PADDING: ResourceId = ResourceId::new(54);
/// Background inset while focused.
pub const FIELD_FOCUSED_PADDING: ResourceId = ResourceId::new(55);
/// Background inset while disabled.
pub const FIELD_DISABLED_PADDING: ResourceId = ResourceId::new(56);

/// Solid fill color.
pub const FILL_COLOR: ResourceId = ResourceId::new(20);

/// Texture handle.
pub const IMAGE: ResourceId = ResourceId::new(30);
/// Tint applied to a texture.
pub const IMAGE_TINT: ResourceId = ResourceId::new(31);
/// Horizontal image alignment.
pub const IMAGE_ALIGN: ResourceId = ResourceId::new(32);
/// Vertical image alignment.
pub const IMAGE_VALIGN: ResourceId = ResourceId::new(33);

/// Painter drawing a button background.
pub const BUTTON_PAINTER: ResourceId = ResourceId::new(40);
/// Text color on buttons.
pub const BUTTON_TEXT_COLOR: ResourceId = ResourceId::new(41);
/// Painter drawing label text.
pub const LABEL_PAINTER: ResourceId = ResourceId::new(42);
/// Painter drawing a generic framed field.
pub const FIELD_PAINTER: ResourceId = ResourceId::new(43);
/// Painter drawing an image.
pub const IMAGE_PAINTER: ResourceId = ResourceId::new(44);
