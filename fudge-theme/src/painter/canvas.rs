use vello::kurbo::Rect;
use vello::peniko::Color;

use crate::value::{FontDescriptor, TextureHandle};

/// The drawing surface painters render onto.
///
/// Implemented by the host's renderer. The toolkit only describes *what* to draw.
pub trait Canvas {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    /// Draw a single line of text into `rect`.
    fn draw_text(&mut self, rect: Rect, text: &str, font: &FontDescriptor, color: Color);

    /// Draw a texture stretched over `rect`.
    fn draw_texture(&mut self, rect: Rect, texture: &TextureHandle, tint: Color);
}

/// A recorded drawing call.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// See [Canvas::fill_rect].
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// See [Canvas::stroke_rect].
    StrokeRect {
        /// Target rectangle.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f64,
    },
    /// See [Canvas::draw_text].
    Text {
        /// Target rectangle.
        rect: Rect,
        /// The text.
        text: String,
        /// The font.
        font: FontDescriptor,
        /// Text color.
        color: Color,
    },
    /// See [Canvas::draw_texture].
    Texture {
        /// Target rectangle.
        rect: Rect,
        /// The texture.
        texture: TextureHandle,
        /// Tint color.
        tint: Color,
    },
}

/// A [Canvas] that records every call, for tests and debugging.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the canvas empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_text(&mut self, rect: Rect, text: &str, font: &FontDescriptor, color: Color) {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
    }

    fn draw_texture(&mut self, rect: Rect, texture: &TextureHandle, tint: Color) {
        self.commands.push(DrawCommand::Texture {
            rect,
            texture: texture.clone(),
            tint,
        });
    }
}
