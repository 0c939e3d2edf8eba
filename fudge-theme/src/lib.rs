#![warn(missing_docs)]

//! # Fudge Theming System
//!
//! Themes, styles and part painters for the fudge widget toolkit.
//!
//! ## Overview
//!
//! - **[Theme](theme::Theme)**: a flat store of typed resources keyed by [ResourceId](id::ResourceId)
//! - **[Style](style::Style)**: a node in the style graph with overrides, redirects and
//!   cross-style references, resolved through single inheritance
//! - **[ThemeRegistry](registry::ThemeRegistry)**: the handle owning themes, styles,
//!   tokens and painter types, with an explicit `initialize`/`uninitialize` lifecycle
//! - **[PartPainter](painter::PartPainter)**: leaf renderers chosen by style and built
//!   by the [PainterFactoryRegistry](painter::PainterFactoryRegistry)
//! - **[RegistryConfig](config::RegistryConfig)**: configuration from code, environment
//!   variables or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use fudge_theme::config::RegistryConfig;
//! use fudge_theme::ids;
//! use fudge_theme::registry::ThemeRegistry;
//! use vello::peniko::Color;
//!
//! let mut registry = ThemeRegistry::new(RegistryConfig::from_env_or_default());
//! registry.initialize();
//!
//! let base = registry.create_style("BaseButton").unwrap();
//! let button = registry.create_inherited_style(base, "Button").unwrap();
//!
//! registry.set_value_override(base, ids::TEXT_COLOR, Color::BLACK).unwrap();
//! registry.set_value_override(button, ids::TEXT_COLOR, Color::from_rgb8(255, 0, 0)).unwrap();
//!
//! let red = registry.get_color(button, registry.main_theme(), ids::TEXT_COLOR).unwrap();
//! assert_eq!(red.components, Color::from_rgb8(255, 0, 0).components);
//! ```
//!
//! ## Resolution Order
//!
//! Resolving an id on a style checks, in this order: the style's local entry
//! (a value, a redirect to another id, or a reference into another style), then the
//! parent chain, then the theme. See [resolver] for the exact rules.
//!
//! ## Errors
//!
//! Misses and type mismatches are `None`, never errors. [ThemeError](error::ThemeError)
//! covers rejected requests (duplicates, cycles, unknown names) and broken invariants.

extern crate self as fudge_theme;

/// Contains the [align::HorizontalAlign] and [align::VerticalAlign] enums.
pub mod align;
/// Contains the [config::RegistryConfig] struct for registry configuration.
pub mod config;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains the [id::ResourceId] type and the [id::TokenTable].
pub mod id;
/// Contains the standard resource ids.
pub mod ids;
/// Contains the part painter trait, factory registry and built-in painters.
pub mod painter;
/// Contains the [registry::ThemeRegistry] handle.
pub mod registry;
/// Contains the style graph resolver.
pub mod resolver;
/// Contains [resources::StyleResources] for typed access over style chains.
pub mod resources;
/// Contains serde helpers for colors.
pub mod serde_color;
/// Contains the [style::Style] node of the style graph.
pub mod style;
/// Contains the [theme::Theme] store and built-in defaults.
pub mod theme;
/// Contains [value::ResourceValue] and friends.
pub mod value;

pub use fudge_macros::ResourceEnum;
pub use value::ResourceEnum;
