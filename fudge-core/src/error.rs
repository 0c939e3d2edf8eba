//! # Core Error Types
//!
//! Errors raised by the control tree, the layout engine and the asset boundary.

use thiserror::Error;

use fudge_theme::error::ThemeError;

use crate::tree::ControlId;

/// Errors that can occur while building or editing a control tree.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The control handle is stale or was never part of this tree.
    #[error("Control {0:?} not found")]
    ControlNotFound(ControlId),

    /// The operation needs a container, but the control cannot hold children.
    #[error("Control '{name}' is not a container")]
    NotAContainer {
        /// Name of the control.
        name: String,
    },

    /// The control type forbids layouts.
    #[error("Control '{name}' of type '{type_name}' does not accept a layout")]
    LayoutRejected {
        /// Name of the control.
        name: String,
        /// Type of the control.
        type_name: &'static str,
    },

    /// A child index was outside of the container's children.
    #[error("Index {index} out of range for {count} children")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of children.
        count: usize,
    },

    /// The control is already owned by another container.
    #[error("Control '{name}' already has a parent")]
    ChildHasParent {
        /// Name of the control.
        name: String,
    },

    /// Adding the control would make it its own ancestor.
    #[error("Adding '{child}' to '{parent}' would create a cycle")]
    WouldCreateCycle {
        /// Name of the would-be parent.
        parent: String,
        /// Name of the would-be child.
        child: String,
    },

    /// No control type is registered under this name.
    #[error("Unknown control type '{0}'")]
    UnknownControlType(String),

    /// No layout type is registered under this name.
    #[error("Unknown layout type '{0}'")]
    UnknownLayoutType(String),

    /// A theme or style operation failed.
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// A tree description could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a not-a-container error.
    pub fn not_a_container(name: impl Into<String>) -> Self {
        Self::NotAContainer { name: name.into() }
    }

    /// Create a child-has-parent error.
    pub fn child_has_parent(name: impl Into<String>) -> Self {
        Self::ChildHasParent { name: name.into() }
    }

    /// Create an index-out-of-range error.
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Create a would-create-cycle error.
    pub fn would_create_cycle(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::WouldCreateCycle {
            parent: parent.into(),
            child: child.into(),
        }
    }
}
