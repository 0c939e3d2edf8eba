//! # Styles
//!
//! A [Style] is a node in the style graph. It has at most one parent and a table of
//! local entries, each of which is one of:
//!
//! - **[StyleEntry::Value]**: a direct value that shadows anything inherited
//! - **[StyleEntry::Redirect]**: "use id Y to mean id X", resolved in the same style
//! - **[StyleEntry::Reference]**: "use id Y of style T", which may leave the
//!   inheritance chain entirely
//!
//! Styles are stored in an arena owned by the [ThemeRegistry](crate::registry::ThemeRegistry)
//! and addressed by [StyleId]. All mutation goes through the registry so that
//! references can be checked for cycles before they are committed.

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::id::ResourceId;
use crate::value::ResourceValue;

new_key_type! {
    /// Handle of a style inside a registry.
    pub struct StyleId;
}

/// A local entry of a style.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    /// A direct value.
    Value(ResourceValue),
    /// Resolve another id in the same style.
    Redirect(ResourceId),
    /// Resolve an id in another style.
    Reference(StyleId, ResourceId),
}

/// A node of the style graph.
#[derive(Debug, Clone, Default)]
pub struct Style {
    name: Option<String>,
    parent: Option<StyleId>,
    entries: IndexMap<ResourceId, StyleEntry>,
}

impl Style {
    pub(crate) fn new(name: Option<String>, parent: Option<StyleId>) -> Self {
        Self {
            name,
            parent,
            entries: IndexMap::new(),
        }
    }

    /// The registered name, `None` for private styles.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the style is owned by a single control rather than the registry.
    pub fn is_private(&self) -> bool {
        self.name.is_none()
    }

    /// The parent style.
    pub fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    /// The local entry for `id`.
    pub fn entry(&self, id: ResourceId) -> Option<&StyleEntry> {
        self.entries.get(&id)
    }

    /// Iterate over local entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceId, &StyleEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Number of local entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no local entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn set_entry(&mut self, id: ResourceId, entry: StyleEntry) -> Option<StyleEntry> {
        self.entries.insert(id, entry)
    }

    pub(crate) fn remove_entry(&mut self, id: ResourceId) -> Option<StyleEntry> {
        self.entries.shift_remove(&id)
    }

    pub(crate) fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "<private>".to_string())
    }
}
