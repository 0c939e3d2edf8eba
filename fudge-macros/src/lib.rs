#![warn(missing_docs)]

//! Macros for fudge => See `fudge` crate.
//!
//! Contains procedural macros.

mod resource_enum;

/// Derives `fudge_theme::value::ResourceEnum` for a fieldless enum.
///
/// Every variant is mapped to its discriminant (explicit integer literals are honored,
/// implicit ones continue counting from the previous variant). Converting back from an
/// unknown raw value yields `None`, so enum resources never need unchecked casts.
///
/// Example:
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, ResourceEnum)]
/// enum TextAlign {
///     Start,
///     Center = 4,
///     End,
/// }
/// ```
#[proc_macro_derive(ResourceEnum)]
pub fn derive_resource_enum(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    proc_macro::TokenStream::from(resource_enum::derive(proc_macro2::TokenStream::from(input)))
}
