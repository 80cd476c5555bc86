//! 2D vector helpers
//!
//! Thin, total wrappers over `glam::Vec2`. Every operation that would divide
//! by a zero length returns the zero vector (or `None`) instead of NaN.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Euclidean magnitude
#[inline]
pub fn length(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Component of `a` along `b`. Zero when `b` is the zero vector.
pub fn project(a: Vec2, b: Vec2) -> Vec2 {
    let bb = dot(b, b);
    if bb == 0.0 {
        return Vec2::ZERO;
    }
    b * (dot(a, b) / bb)
}

/// Clamp the magnitude of `v` to at most `max_len`. Zero when `max_len` is not positive.
pub fn limit(v: Vec2, max_len: f32) -> Vec2 {
    if max_len.is_nan() || max_len <= 0.0 {
        return Vec2::ZERO;
    }
    let len = length(v);
    if len <= max_len {
        v
    } else {
        v * (max_len / len)
    }
}

/// Linear interpolation, `t` is not clamped
#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a * (1.0 - t) + b * t
}

/// Affine remap of `v` from `[in_min, in_max]` to `[out_min, out_max]`
///
/// Returns `None` for an empty input range.
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> Option<f32> {
    if in_min == in_max {
        return None;
    }
    Some((v - in_min) * (out_max - out_min) / (in_max - in_min) + out_min)
}

/// Unit vector in the direction of `v`, or zero
#[inline]
pub fn direction(v: Vec2) -> Vec2 {
    let len = length(v);
    if len == 0.0 { Vec2::ZERO } else { v / len }
}

/// Wrap an angle to [-π, π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}
