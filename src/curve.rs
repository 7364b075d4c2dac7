//! The curved background's animatable parameters.
//!
//! Painting the shape lives in `ui::bottom_nav`; this type only carries the
//! values the navigation container drives.

use std::time::Duration;

use crate::animation::{fast_out_slow_in, AnimatedValue, Applied};
use crate::units::Argb;

/// Morph progress runs 0 → 2 during a multi-cell jump.
pub const MORPH_END: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDimensions {
    pub shadow_height: f32,
    pub outer_width: f32,
    pub outer_height: f32,
    pub inner_width: f32,
    pub inner_height: f32,
}

#[derive(Debug)]
pub struct CurveView {
    bezier_x: AnimatedValue,
    progress: AnimatedValue,
    pub color: Argb,
    pub shadow_color: Argb,
    pub dimensions: CurveDimensions,
    pub width: f32,
    pub height: f32,
}

impl CurveView {
    pub fn new(color: Argb, shadow_color: Argb, dimensions: CurveDimensions) -> Self {
        Self {
            bezier_x: AnimatedValue::new(0.0),
            progress: AnimatedValue::new(0.0),
            color,
            shadow_color,
            dimensions,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Horizontal position of the curve's control point.
    pub fn bezier_x(&self) -> f32 {
        self.bezier_x.value()
    }

    /// Shape morph scalar in `0..=2`.
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// How far the shape is from its resting form: 0 at both ends of a
    /// morph, 1 halfway through.
    pub fn bulge(&self) -> f32 {
        1.0 - (1.0 - self.progress.value()).abs().min(1.0)
    }

    pub fn is_moving(&self) -> bool {
        self.bezier_x.is_running()
    }

    pub fn is_morphing(&self) -> bool {
        self.progress.is_running()
    }

    pub fn move_to(&mut self, x: f32, duration: Duration) {
        self.bezier_x
            .animate_to(x, duration, Duration::ZERO, fast_out_slow_in);
    }

    pub fn morph(&mut self, duration: Duration) {
        self.progress
            .animate_between(0.0, MORPH_END, duration, Duration::ZERO, fast_out_slow_in);
    }

    /// Advance both parameters; returns the control-point frame, if one was
    /// applied, so the caller can react to its completion.
    pub fn tick(&mut self, dt: Duration) -> Option<Applied> {
        self.progress.tick(dt);
        self.bezier_x.tick(dt)
    }
}
