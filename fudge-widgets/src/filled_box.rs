use std::any::Any;

use vello::kurbo::Rect;
use vello::peniko::Color;

use fudge_core::property::PropertyBag;
use fudge_core::widget::{Widget, WidgetContext, WidgetKind};
use fudge_theme::ids;
use fudge_theme::painter::Canvas;

/// A rectangle filled with a single color.
///
/// Requests no size of its own; give it a hint size or let a layout stretch it.
///
/// ### Theming
/// - `FILL_COLOR` - The fill color, unless the box carries its own.
#[derive(Debug, Clone, Default)]
pub struct FilledBox {
    color: Option<Color>,
}

impl FilledBox {
    /// Create a new box painted with the style's fill color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint with `color` instead of the style's fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// The color set on the box itself.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Set or clear the color of the box itself.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }
}

impl WidgetKind for FilledBox {
    const TYPE_NAME: &'static str = "FilledBox";
}

impl Widget for FilledBox {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn paint(&self, ctx: &WidgetContext<'_>, canvas: &mut dyn Canvas, rect: Rect) {
        let Some(color) = self.color.or_else(|| ctx.resources().color(ids::FILL_COLOR)) else {
            log::debug!("No fill color resolved for filled box");
            return;
        };
        canvas.fill_rect(rect, color);
    }

    fn properties(&self) -> PropertyBag {
        let mut properties = PropertyBag::new();
        if let Some(color) = self.color {
            properties.set("color", color);
        }
        properties
    }

    fn apply_properties(&mut self, properties: &PropertyBag) {
        if let Some(color) = properties.get_color("color") {
            self.color = Some(color);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
