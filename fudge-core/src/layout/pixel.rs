// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rounding between continuous and whole-pixel coordinates.
//!
//! Requested sizes round so that a pixel layout never asks for less than its content
//! needs: hint and minimum sizes round up, maximum sizes round down (but never below
//! the minimum). Placement rounds both edges of a span to the nearest pixel and
//! derives the size from the rounded edges, so neighbors that touch in continuous
//! coordinates still touch after rounding.

use nalgebra::Vector2;

use super::{Measurement, UNBOUNDED};

/// Snap a measurement to whole pixels.
pub fn snap_measurement(measurement: Measurement) -> Measurement {
    let round_max = |value: f32| if value >= UNBOUNDED { value } else { value.floor() };
    Measurement {
        size: measurement.size.map(f32::ceil),
        min: measurement.min.map(f32::ceil),
        max: measurement.max.map(round_max),
        depends_on_space: measurement.depends_on_space,
    }
    .normalized()
}

/// Snap one span, returning the rounded start and length.
pub fn snap_span(start: f32, length: f32) -> (f32, f32) {
    let first = start.round();
    let last = (start + length).round();
    (first, (last - first).max(0.0))
}

/// Snap a rectangle given as position and size.
pub fn snap_rect(position: Vector2<f32>, size: Vector2<f32>) -> (Vector2<f32>, Vector2<f32>) {
    let (x, width) = snap_span(position.x, size.x);
    let (y, height) = snap_span(position.y, size.y);
    (Vector2::new(x, y), Vector2::new(width, height))
}
