//! # Resource Identifiers
//!
//! Resources are addressed by a [ResourceId], a small integer newtype. Ids below
//! [RESERVED_END](crate::ids::RESERVED_END) are the standard slots listed in
//! [ids](crate::ids); higher ids are handed out by a [TokenTable] so that user code
//! and serialized data can refer to resources by name.
//!
//! ```rust
//! use fudge_theme::id::{ResourceId, TokenTable};
//!
//! let mut tokens = TokenTable::new();
//! let accent = tokens.intern("Accent");
//!
//! assert_eq!(tokens.intern("Accent"), accent);
//! assert_eq!(tokens.name(accent), Some("Accent"));
//! assert!(accent >= ResourceId::new(fudge_theme::ids::RESERVED_END));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::RESERVED_END;

/// Identifies a themeable resource slot.
///
/// Conversion from plain integers is explicit; enums that double as ids should
/// go through a `const` or a `From` impl on the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u32);

impl ResourceId {
    /// Create a new resource id from a raw integer.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value of this id.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether the id falls into the range reserved for standard ids.
    pub const fn is_reserved(self) -> bool {
        self.0 < RESERVED_END
    }
}

impl From<u32> for ResourceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interns resource names into ids above the reserved range.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    ids: IndexMap<String, ResourceId>,
}

impl TokenTable {
    /// Create an empty token table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, allocating a new one on first use.
    pub fn intern(&mut self, name: &str) -> ResourceId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = ResourceId(RESERVED_END + self.ids.len() as u32);
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up an already interned name.
    pub fn get(&self, name: &str) -> Option<ResourceId> {
        self.ids.get(name).copied()
    }

    /// The name an id was interned from.
    pub fn name(&self, id: ResourceId) -> Option<&str> {
        let index = id.0.checked_sub(RESERVED_END)? as usize;
        self.ids.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no names are interned.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forget every interned name.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut tokens = TokenTable::new();
        let a = tokens.intern("a");
        let b = tokens.intern("b");

        assert_ne!(a, b);
        assert_eq!(tokens.intern("a"), a);
        assert_eq!(tokens.len(), 2);
        assert!(!a.is_reserved());
    }

    #[test]
    fn test_name_lookup() {
        let mut tokens = TokenTable::new();
        let id = tokens.intern("HoverColor");

        assert_eq!(tokens.name(id), Some("HoverColor"));
        assert_eq!(tokens.get("HoverColor"), Some(id));
        assert_eq!(tokens.name(ResourceId::new(3)), None);
        assert_eq!(tokens.name(ResourceId::new(RESERVED_END + 10)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::new(42).to_string(), "#42");
    }
}
