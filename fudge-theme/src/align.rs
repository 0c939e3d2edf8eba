//! Alignment enums stored as enum resources.

use fudge_macros::ResourceEnum;
use serde::{Deserialize, Serialize};

/// Horizontal placement of content inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ResourceEnum, Serialize, Deserialize)]
pub enum HorizontalAlign {
    /// Left edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right edge.
    End,
    /// Stretched across the full width.
    Fill,
}

/// Vertical placement of content inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ResourceEnum, Serialize, Deserialize)]
pub enum VerticalAlign {
    /// Top edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Bottom edge.
    End,
    /// Stretched across the full height.
    Fill,
}

impl HorizontalAlign {
    /// Offset of content of `size` within `available`.
    pub fn offset(self, size: f64, available: f64) -> f64 {
        match self {
            Self::Start | Self::Fill => 0.0,
            Self::Center => ((available - size) / 2.0).max(0.0),
            Self::End => (available - size).max(0.0),
        }
    }
}

impl VerticalAlign {
    /// Offset of content of `size` within `available`.
    pub fn offset(self, size: f64, available: f64) -> f64 {
        match self {
            Self::Start | Self::Fill => 0.0,
            Self::Center => ((available - size) / 2.0).max(0.0),
            Self::End => (available - size).max(0.0),
        }
    }
}
