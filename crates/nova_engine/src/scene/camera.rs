//! 2D camera
//!
//! Letterboxes a fixed target resolution into whatever window size the host
//! reports and exposes the resulting world-space viewport, which gameplay
//! code uses for offscreen checks and spawn rings.

use crate::foundation::math::{Mat3, Vec2};
use crate::render::Rect;

/// Camera transforming between world space and screen space.
#[derive(Debug, Clone)]
pub struct Camera {
    target_size: Vec2,
    center: Vec2,
    half_screen: Vec2,
    scale: f32,
    viewport: Rect,
}

impl Camera {
    pub(crate) fn new(target_width: f32, target_height: f32) -> Self {
        let target_size = Vec2::new(target_width, target_height);
        let mut camera = Self {
            target_size,
            center: Vec2::zeros(),
            half_screen: target_size / 2.0,
            scale: 1.0,
            viewport: Rect::default(),
        };
        camera.update(target_size, Vec2::zeros());
        camera
    }

    /// Recompute the transform for the given screen size and world-space
    /// camera center. Called once per frame by the host.
    pub fn update(&mut self, screen_size: Vec2, center: Vec2) {
        self.scale = (screen_size.x / self.target_size.x).min(screen_size.y / self.target_size.y);
        self.center = center;
        self.half_screen = screen_size / 2.0;

        let top_left = -self.half_screen / self.scale + center;
        let bottom_right = self.half_screen / self.scale + center;
        self.viewport = Rect::from_corners(top_left, bottom_right);
    }

    /// World-space rectangle currently visible.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// View matrix for renderers that consume one.
    pub fn view(&self) -> Mat3 {
        Mat3::new_translation(&self.half_screen)
            * Mat3::new_scaling(self.scale)
            * Mat3::new_translation(&-self.center)
    }

    /// Transform a screen-space position into world space.
    pub fn screen_to_world(&self, position: Vec2) -> Vec2 {
        (position - self.half_screen) / self.scale + self.center
    }

    /// Transform a world-space position into screen space.
    pub fn world_to_screen(&self, position: Vec2) -> Vec2 {
        (position - self.center) * self.scale + self.half_screen
    }
}
