#![warn(missing_docs)]

//! Core library for fudge => See `fudge` crate.
//!
//! Contains the control tree, the layout engine and the asset boundary.

pub use fudge_theme as theme;
pub use nalgebra::Vector2;

/// Contains the [CoreError](error::CoreError) type.
pub mod error;

/// Contains the [ControlFactory](factory::ControlFactory).
pub mod factory;

/// Contains the layout contract and the built-in layouts.
pub mod layout;

/// Contains the [PainterSet](painters::PainterSet) every control owns.
pub mod painters;

/// Contains [PropertyBag](property::PropertyBag) and its values.
pub mod property;

/// Contains tree snapshots for the asset boundary.
pub mod snapshot;

/// Contains style, theme and painter helpers for controls.
pub mod style_access;

/// Contains the [UiTree](tree::UiTree) arena.
pub mod tree;

/// Contains the [Widget](widget::Widget) trait.
pub mod widget;
