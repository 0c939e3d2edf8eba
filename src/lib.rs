#![warn(missing_docs)]

//! Build themeable widget trees with two-pass layouts in Rust.
//!
//! The toolkit is split into [theme] (resources, styles and part painters),
//! [core] (the control tree and the layout engine) and [widgets] (standard controls).

pub use nalgebra as math;
pub use vello::kurbo as geometry;
pub use vello::peniko as color;

pub use fudge_core as core;
#[cfg(feature = "macros")]
pub use fudge_macros as macros;
pub use fudge_theme as theme;
#[cfg(feature = "widgets")]
pub use fudge_widgets as widgets;

/// A "prelude" for users of the fudge toolkit.
///
/// Importing this module brings into scope the most common types
/// needed to build and lay out a control tree.
///
/// ```rust
/// use fudge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::error::{CoreError, CoreResult};
    pub use crate::core::factory::ControlFactory;
    pub use crate::core::layout::*;
    pub use crate::core::property::{PropertyBag, PropertyValue};
    pub use crate::core::snapshot::WidgetDescriptor;
    pub use crate::core::style_access::PainterOutcome;
    pub use crate::core::tree::{ControlId, UiTree};
    pub use crate::core::widget::{GuiRoot, PainterRequest, Widget, WidgetContext, WidgetKind};

    // Theme
    pub use crate::theme::config::RegistryConfig;
    pub use crate::theme::error::{ThemeError, ThemeResult};
    pub use crate::theme::id::ResourceId;
    pub use crate::theme::ids;
    pub use crate::theme::painter::{Canvas, PaintState, PainterMapping, PainterTag, PartPainter};
    pub use crate::theme::registry::ThemeRegistry;
    pub use crate::theme::style::StyleId;
    pub use crate::theme::ResourceEnum;

    // Math
    pub use nalgebra::Vector2;

    // Color
    pub use vello::peniko::Color;

    // Widgets
    #[cfg(feature = "widgets")]
    pub use crate::widgets::{
        button::{Button, ButtonState},
        filled_box::FilledBox,
        label::Label,
        panel::Panel,
        register_widgets, standard_factory,
    };
}
