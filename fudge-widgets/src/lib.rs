#![warn(missing_docs)]

//! Widget library for fudge => See `fudge` crate.
//!
//! Contains the standard fudge controls.

use fudge_core::factory::ControlFactory;

/// Contains the [button::Button] widget.
pub mod button;

/// Contains the [filled_box::FilledBox] widget.
pub mod filled_box;

/// Contains the [label::Label] widget.
pub mod label;

/// Contains the [panel::Panel] widget.
pub mod panel;

/// Register every widget of this crate with `factory`.
pub fn register_widgets(factory: &mut ControlFactory) {
    factory.register_kind::<panel::Panel>();
    factory.register_kind::<label::Label>();
    factory.register_kind::<button::Button>();
    factory.register_kind::<filled_box::FilledBox>();
}

/// A control factory with the built-in and the standard widgets registered.
pub fn standard_factory() -> ControlFactory {
    let mut factory = ControlFactory::with_builtins();
    register_widgets(&mut factory);
    factory
}
