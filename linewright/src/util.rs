// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Rounds half away from zero and saturates into `i32`.
pub(crate) fn round_to_i32(x: f64) -> i32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate; layout coordinates fit in i32"
    )]
    let r = x.round() as i32;
    r
}

/// Floors and saturates into `i32`.
pub(crate) fn floor_to_i32(x: f64) -> i32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate; layout coordinates fit in i32"
    )]
    let r = x.floor() as i32;
    r
}

pub(crate) fn nearly_eq(x: f64, y: f64) -> bool {
    (x - y).abs() < f64::EPSILON
}

/// Color components as comparable bytes.
pub(crate) fn color_key(color: peniko::Color) -> [u8; 4] {
    let rgba = color.to_rgba8();
    [rgba.r, rgba.g, rgba.b, rgba.a]
}
