//! # Style Resolution
//!
//! Resolution is a walk over `(style, id)` states. Each step looks at the local entry
//! of the current style:
//!
//! | entry                  | next state                         |
//! |------------------------|------------------------------------|
//! | `Value(v)`             | done, `v`                          |
//! | `Redirect(id')`        | `(same style, id')`                |
//! | `Reference(s', id')`   | `(s', id')`                        |
//! | none                   | `(parent, id)`                     |
//! | none, no parent        | theme lookup by the current id     |
//!
//! The graph is kept acyclic by [Resolver::check_edge], which every mutation runs
//! before committing. The walk still counts its steps and fails with
//! [ThemeError::ResolutionDepthExceeded] once the configured ceiling is reached, so a
//! broken invariant surfaces as an error instead of a hang.

use slotmap::SlotMap;

use crate::error::{ThemeError, ThemeResult};
use crate::id::ResourceId;
use crate::style::{Style, StyleEntry, StyleId};
use crate::theme::Theme;
use crate::value::ResourceValue;

/// The arena holding every style of a registry.
pub type StyleGraph = SlotMap<StyleId, Style>;

/// Walks the style graph.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    styles: &'a StyleGraph,
    max_depth: usize,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `styles` that gives up after `max_depth` steps.
    pub fn new(styles: &'a StyleGraph, max_depth: usize) -> Self {
        Self { styles, max_depth }
    }

    /// Resolve `id` starting at `start`.
    ///
    /// Falls back to `theme` (by the id reached at the end of the walk) when no style
    /// in the chain resolves it and `check_theme` is set.
    pub fn resolve(
        &self,
        start: StyleId,
        id: ResourceId,
        theme: Option<&'a Theme>,
        check_theme: bool,
    ) -> ThemeResult<Option<&'a ResourceValue>> {
        let mut current = Some(start);
        let mut current_id = id;

        for _ in 0..self.max_depth {
            let Some(style_id) = current else {
                return Ok(if check_theme {
                    theme.and_then(|theme| theme.get(current_id))
                } else {
                    None
                });
            };

            let Some(style) = self.styles.get(style_id) else {
                log::warn!(
                    "Resolving resource {} reached released style {:?}; falling back to the theme",
                    id,
                    style_id
                );
                return Ok(if check_theme {
                    theme.and_then(|theme| theme.get(current_id))
                } else {
                    None
                });
            };

            match style.entry(current_id) {
                Some(StyleEntry::Value(value)) => return Ok(Some(value)),
                Some(StyleEntry::Redirect(next)) => current_id = *next,
                Some(StyleEntry::Reference(target, next)) => {
                    current = Some(*target);
                    current_id = *next;
                },
                None => current = style.parent(),
            }
        }

        log::error!(
            "Resolving resource {} from style {:?} exceeded {} steps; the style graph is inconsistent",
            id,
            start,
            self.max_depth
        );
        Err(ThemeError::ResolutionDepthExceeded {
            id,
            max_depth: self.max_depth,
        })
    }

    /// Resolve `id` over a chain of styles, then `theme`.
    ///
    /// The first style that resolves `id` (with inheritance) answers. When none does,
    /// the walks end in the theme at whatever id the styles redirect to, and the first
    /// style whose walk finds a theme value answers.
    pub fn resolve_chain(
        &self,
        styles: &[StyleId],
        id: ResourceId,
        theme: Option<&'a Theme>,
    ) -> ThemeResult<Option<&'a ResourceValue>> {
        for style in styles {
            if let Some(found) = self.resolve(*style, id, None, false)? {
                return Ok(Some(found));
            }
        }

        let Some(theme) = theme else {
            return Ok(None);
        };
        if styles.is_empty() {
            return Ok(theme.get(id));
        }
        for style in styles {
            if let Some(found) = self.resolve(*style, id, Some(theme), true)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Resolve the first of `ids` that [resolve_chain](Self::resolve_chain) finds.
    ///
    /// Each id is resolved completely, styles and theme, before the next one is tried.
    pub fn resolve_in_styles(
        &self,
        styles: &[StyleId],
        ids: &[ResourceId],
        theme: Option<&'a Theme>,
    ) -> ThemeResult<Option<&'a ResourceValue>> {
        self.find_in_styles(styles, ids, theme, Some)
    }

    /// Like [resolve_in_styles](Self::resolve_in_styles) but converts the value through
    /// `accept`.
    ///
    /// The value an id resolves to is final for that id: when `accept` rejects it, the
    /// id counts as not found and the next id is tried. Later styles and the theme are
    /// never searched for a value of a better type.
    pub fn find_in_styles<T>(
        &self,
        styles: &[StyleId],
        ids: &[ResourceId],
        theme: Option<&'a Theme>,
        accept: impl Fn(&'a ResourceValue) -> Option<T>,
    ) -> ThemeResult<Option<T>> {
        for id in ids {
            if let Some(found) = self.resolve_chain(styles, *id, theme)?.and_then(&accept) {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Check whether setting `entry` on `(style, id)` keeps the graph acyclic.
    ///
    /// Simulates resolution from the new edge's target. The edge is rejected when the
    /// walk comes back to `(style, id)` or does not settle within the ceiling.
    pub fn check_edge(&self, style: StyleId, id: ResourceId, entry: &StyleEntry) -> ThemeResult<()> {
        let (mut current, mut current_id) = match entry {
            StyleEntry::Value(_) => return Ok(()),
            StyleEntry::Redirect(next) => (Some(style), *next),
            StyleEntry::Reference(target, next) => (Some(*target), *next),
        };

        for _ in 0..self.max_depth {
            let Some(style_id) = current else {
                return Ok(());
            };

            if style_id == style && current_id == id {
                return Err(ThemeError::cycle(self.label(style), id));
            }

            let Some(node) = self.styles.get(style_id) else {
                return Ok(());
            };

            match node.entry(current_id) {
                Some(StyleEntry::Value(_)) => return Ok(()),
                Some(StyleEntry::Redirect(next)) => current_id = *next,
                Some(StyleEntry::Reference(target, next)) => {
                    current = Some(*target);
                    current_id = *next;
                },
                None => current = node.parent(),
            }
        }

        Err(ThemeError::ResolutionDepthExceeded {
            id,
            max_depth: self.max_depth,
        })
    }

    fn label(&self, style: StyleId) -> String {
        self.styles
            .get(style)
            .map(Style::label)
            .unwrap_or_else(|| format!("{:?}", style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;

    fn graph() -> (StyleGraph, StyleId, StyleId) {
        let mut styles = StyleGraph::with_key();
        let parent = styles.insert(Style::new(Some("parent".into()), None));
        let child = styles.insert(Style::new(Some("child".into()), Some(parent)));
        (styles, parent, child)
    }

    #[test]
    fn test_theme_fallback_uses_redirected_id() {
        let (mut styles, _, child) = graph();
        styles[child].set_entry(ids::TEXT_COLOR, StyleEntry::Redirect(ids::BUTTON_TEXT_COLOR));

        let mut theme = Theme::new("t");
        theme.set(ids::BUTTON_TEXT_COLOR, 7i64);
        theme.set(ids::TEXT_COLOR, 1i64);

        let resolver = Resolver::new(&styles, 16);
        let value = resolver.resolve(child, ids::TEXT_COLOR, Some(&theme), true).unwrap();
        assert_eq!(value, Some(&ResourceValue::Int(7)));

        let value = resolver.resolve(child, ids::TEXT_COLOR, Some(&theme), false).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_redirect_through_parent() {
        let (mut styles, parent, child) = graph();
        styles[child].set_entry(ids::TEXT_COLOR, StyleEntry::Redirect(ids::BUTTON_TEXT_COLOR));
        styles[parent].set_entry(ids::BUTTON_TEXT_COLOR, StyleEntry::Value(ResourceValue::Int(3)));

        let resolver = Resolver::new(&styles, 16);
        let value = resolver.resolve(child, ids::TEXT_COLOR, None, false).unwrap();
        assert_eq!(value, Some(&ResourceValue::Int(3)));
    }

    #[test]
    fn test_depth_exceeded_on_corrupt_graph() {
        let (mut styles, parent, child) = graph();
        // Bypass check_edge to build a loop.
        styles[child].set_entry(ids::FILL_COLOR, StyleEntry::Reference(parent, ids::FILL_COLOR));
        styles[parent].set_entry(ids::FILL_COLOR, StyleEntry::Reference(child, ids::FILL_COLOR));

        let resolver = Resolver::new(&styles, 10);
        let err = resolver.resolve(child, ids::FILL_COLOR, None, true).unwrap_err();
        assert!(matches!(err, ThemeError::ResolutionDepthExceeded { max_depth: 10, .. }));
        assert!(err.is_internal());
    }

    #[test]
    fn test_check_edge_self_redirect() {
        let (styles, _, child) = graph();
        let resolver = Resolver::new(&styles, 16);
        let err = resolver
            .check_edge(child, ids::FILL_COLOR, &StyleEntry::Redirect(ids::FILL_COLOR))
            .unwrap_err();
        assert!(matches!(err, ThemeError::ReferenceCycle { .. }));
    }

    #[test]
    fn test_check_edge_via_inheritance() {
        let (styles, parent, child) = graph();
        let resolver = Resolver::new(&styles, 16);

        // parent.x -> child.x falls back to parent.x through inheritance.
        assert!(resolver
            .check_edge(parent, ids::FILL_COLOR, &StyleEntry::Reference(child, ids::FILL_COLOR))
            .is_err());
        // child.x -> parent.x terminates at the theme.
        assert!(resolver
            .check_edge(child, ids::FILL_COLOR, &StyleEntry::Reference(parent, ids::FILL_COLOR))
            .is_ok());
    }

    #[test]
    fn test_find_in_styles_is_id_major() {
        let (mut styles, parent, child) = graph();
        styles[child].set_entry(ids::BORDER_COLOR, StyleEntry::Value(ResourceValue::Int(1)));
        styles[parent].set_entry(ids::FILL_COLOR, StyleEntry::Value(ResourceValue::Bool(true)));

        let mut theme = Theme::new("t");
        theme.set(ids::TEXT_COLOR, 3i64);

        let resolver = Resolver::new(&styles, 16);
        // TEXT_COLOR only resolves through the theme, yet it comes first.
        let found = resolver
            .resolve_in_styles(&[child], &[ids::TEXT_COLOR, ids::BORDER_COLOR], Some(&theme))
            .unwrap();
        assert_eq!(found, Some(&ResourceValue::Int(3)));

        // FILL_COLOR holds a flag, so it does not resolve as an int and BORDER_COLOR wins.
        let found = resolver
            .find_in_styles(&[child], &[ids::FILL_COLOR, ids::BORDER_COLOR], None, ResourceValue::as_int)
            .unwrap();
        assert_eq!(found, Some(1));
    }

    #[test]
    fn test_wrong_type_in_first_style_hides_later_styles() {
        let mut styles = StyleGraph::with_key();
        let own = styles.insert(Style::new(None, None));
        let class = styles.insert(Style::new(Some("class".into()), None));
        styles[own].set_entry(ids::FILL_COLOR, StyleEntry::Value(ResourceValue::Bool(true)));
        styles[class].set_entry(ids::FILL_COLOR, StyleEntry::Value(ResourceValue::Int(2)));

        let mut theme = Theme::new("t");
        theme.set(ids::FILL_COLOR, 4i64);

        let resolver = Resolver::new(&styles, 16);
        let found = resolver
            .find_in_styles(&[own, class], &[ids::FILL_COLOR], Some(&theme), ResourceValue::as_int)
            .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_released_style_falls_back_to_theme() {
        let (mut styles, parent, child) = graph();
        styles.remove(parent);

        let mut theme = Theme::new("t");
        theme.set(ids::FILL_COLOR, 9i64);

        let resolver = Resolver::new(&styles, 16);
        let value = resolver.resolve(child, ids::FILL_COLOR, Some(&theme), true).unwrap();
        assert_eq!(value, Some(&ResourceValue::Int(9)));
        let value = resolver.resolve(child, ids::FILL_COLOR, Some(&theme), false).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_resolve_in_styles_theme_pass_follows_redirect() {
        let (mut styles, _, child) = graph();
        styles[child].set_entry(ids::TEXT_COLOR, StyleEntry::Redirect(ids::BUTTON_TEXT_COLOR));

        let mut theme = Theme::new("t");
        theme.set(ids::TEXT_COLOR, 1i64);
        theme.set(ids::BUTTON_TEXT_COLOR, 2i64);

        let resolver = Resolver::new(&styles, 16);
        let found = resolver
            .resolve_in_styles(&[child], &[ids::TEXT_COLOR], Some(&theme))
            .unwrap();
        assert_eq!(found, Some(&ResourceValue::Int(2)));

        let found = resolver.resolve_in_styles(&[], &[ids::TEXT_COLOR], Some(&theme)).unwrap();
        assert_eq!(found, Some(&ResourceValue::Int(1)));
    }
}
