//! # Theme Error Types
//!
//! Errors raised by the theme registry, the style graph and the painter factory.
//!
//! Lookups that simply miss are *not* errors: they return `None`. The variants here
//! cover invalid construction (duplicates, unknown names), rejected graph mutations
//! and internal-consistency failures such as [ThemeError::ResolutionDepthExceeded].

use std::path::PathBuf;
use thiserror::Error;

use crate::id::ResourceId;

/// Errors that can occur in the theming system.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme with the specified name was not found.
    #[error("Theme '{name}' not found")]
    ThemeNotFound {
        /// The name of the theme that was not found.
        name: String,
    },

    /// A theme with this name is already registered.
    #[error("Theme '{name}' already exists")]
    DuplicateTheme {
        /// The conflicting name.
        name: String,
    },

    /// Style with the specified name (or handle) was not found.
    #[error("Style '{name}' not found")]
    StyleNotFound {
        /// The name, or debug form of the handle, that was not found.
        name: String,
    },

    /// A style with this name is already registered.
    #[error("Style '{name}' already exists")]
    DuplicateStyle {
        /// The conflicting name.
        name: String,
    },

    /// Committing the edge would close a loop in the style graph.
    #[error("Setting resource {id} on style '{style}' would create a reference cycle")]
    ReferenceCycle {
        /// The style that was being edited.
        style: String,
        /// The id that was being edited.
        id: ResourceId,
    },

    /// Resolution walked more steps than the configured ceiling.
    ///
    /// This indicates that a graph invariant was broken somewhere else.
    #[error("Resolving resource {id} exceeded the maximum depth of {max_depth}")]
    ResolutionDepthExceeded {
        /// The id the resolution started from.
        id: ResourceId,
        /// The configured ceiling.
        max_depth: usize,
    },

    /// The registry handle has not been initialized yet (or was torn down).
    #[error("Theme registry is not initialized")]
    NotInitialized,

    /// A painter type could not be registered.
    #[error("Cannot register painter '{tag}': {reason}")]
    PainterRegistration {
        /// The painter tag.
        tag: String,
        /// Why the registration was refused.
        reason: String,
    },

    /// Error parsing a configuration file.
    #[error("Failed to parse config {path:?}: {details}")]
    ConfigParse {
        /// The path of the file that failed to parse, if it came from a file.
        path: Option<PathBuf>,
        /// Details about the parse error.
        details: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a theme not found error.
    pub fn theme_not_found(name: impl Into<String>) -> Self {
        Self::ThemeNotFound { name: name.into() }
    }

    /// Create a duplicate theme error.
    pub fn duplicate_theme(name: impl Into<String>) -> Self {
        Self::DuplicateTheme { name: name.into() }
    }

    /// Create a style not found error.
    pub fn style_not_found(name: impl Into<String>) -> Self {
        Self::StyleNotFound { name: name.into() }
    }

    /// Create a duplicate style error.
    pub fn duplicate_style(name: impl Into<String>) -> Self {
        Self::DuplicateStyle { name: name.into() }
    }

    /// Create a reference cycle error.
    pub fn cycle(style: impl Into<String>, id: ResourceId) -> Self {
        Self::ReferenceCycle {
            style: style.into(),
            id,
        }
    }

    /// Create a painter registration error.
    pub fn painter_registration(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PainterRegistration {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a config parse error.
    pub fn config_parse(path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path,
            details: details.into(),
        }
    }

    /// Returns `true` for errors that signal a broken graph invariant rather than
    /// a rejected request.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::ResolutionDepthExceeded { .. })
    }
}
