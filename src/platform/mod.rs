//! Platform abstraction layer
//!
//! Converts raw pointer positions into the percentage-of-surface coordinates
//! the session works in. Browser event wiring lives in `main.rs`.

use glam::Vec2;

/// Bounding box of the click surface in client pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client-space pointer position to [0, 100] on each axis.
    ///
    /// No clamping: points outside the surface map outside the range.
    /// Returns `None` for a degenerate (zero-sized) surface.
    pub fn to_percent(&self, client_x: f32, client_y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (client_x - self.left) / self.width * 100.0,
            (client_y - self.top) / self.height * 100.0,
        ))
    }
}
