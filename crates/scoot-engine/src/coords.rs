//! Geometry types shared across the engine and the demo.
//!
//! Canonical CPU space is logical pixels (DPI-aware), origin top-left,
//! +X right, +Y down. Renderers convert to NDC in shaders using a
//! screen-size uniform.

use core::ops::{Add, AddAssign, Mul};

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Clamps each component to its own inclusive `[min, max]` range.
    #[inline]
    pub fn clamp(self, min: Vec2, max: Vec2) -> Vec2 {
        Vec2 {
            x: self.x.clamp(min.x, max.x),
            y: self.y.clamp(min.y, max.y),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Axis-aligned rectangle in logical pixels, top-left origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// A rectangle with zero or negative extent on either axis draws nothing.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Flips negative extents so width and height come out non-negative,
    /// moving the origin to keep the same area covered.
    #[inline]
    pub fn normalized(self) -> Self {
        let far = self.origin + self.size;
        Rect::new(
            self.origin.x.min(far.x),
            self.origin.y.min(far.y),
            self.size.x.abs(),
            self.size.y.abs(),
        )
    }
}

/// Logical-pixel size of the drawable area, uploaded as the screen-size
/// uniform so vertex stages can map pixel coordinates to NDC.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_is_identity() {
        let v = Vec2::new(5.0, 5.0);
        assert_eq!(v.clamp(Vec2::zero(), Vec2::new(10.0, 10.0)), v);
    }

    #[test]
    fn clamp_is_per_axis() {
        let v = Vec2::new(-3.0, 12.0);
        let c = v.clamp(Vec2::zero(), Vec2::new(10.0, 10.0));
        assert_eq!(c, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn normalized_positive_is_identity() {
        let rect = Rect::new(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_flips_negative_width() {
        let n = Rect::new(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n, Rect::new(6.0, 0.0, 4.0, 5.0));
    }

    #[test]
    fn normalized_flips_negative_height() {
        let n = Rect::new(0.0, 8.0, 3.0, -8.0).normalized();
        assert_eq!(n, Rect::new(0.0, 0.0, 3.0, 8.0));
    }

    #[test]
    fn degenerate_extents_are_empty() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 5.0, 5.0).is_empty());
    }
}
