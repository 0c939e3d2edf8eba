use std::any::Any;

use fudge_core::widget::{Widget, WidgetKind};

/// A container that places its children through whatever layout is attached.
///
/// ### Theming
/// The panel doesn't draw anything itself, so theming is useless.
#[derive(Debug, Clone, Default)]
pub struct Panel;

impl Panel {
    /// Create a new panel.
    pub fn new() -> Self {
        Self
    }
}

impl WidgetKind for Panel {
    const TYPE_NAME: &'static str = "Panel";
}

impl Widget for Panel {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn is_container(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
