//! Tiled scrolling background

use std::cell::Cell;

use crate::foundation::math::Vec2;
use crate::render::{Color, Rect, Renderer, TextureHandle};
use crate::scene::Camera;

/// Endlessly tiled background texture covering the camera viewport.
pub struct Background {
    texture_path: String,
    texture: Cell<Option<TextureHandle>>,
}

impl Background {
    pub(crate) fn new(texture_path: impl Into<String>) -> Self {
        Self {
            texture_path: texture_path.into(),
            texture: Cell::new(None),
        }
    }

    pub(crate) fn draw(&self, renderer: &mut dyn Renderer, camera: &Camera) {
        let texture = match self.texture.get() {
            Some(texture) => texture,
            None => {
                let texture = renderer.load(&self.texture_path);
                self.texture.set(Some(texture));
                texture
            }
        };

        let (width, height) = renderer.texture_size(texture);
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) = (width as f32, height as f32);

        let viewport = camera.viewport();
        let start_x = (viewport.left() / width).floor() as i32;
        let start_y = (viewport.top() / height).floor() as i32;
        let end_x = (viewport.right() / width).ceil() as i32;
        let end_y = (viewport.bottom() / height).ceil() as i32;

        let source = Rect::new(0.0, 0.0, width, height);
        for y in start_y..end_y {
            for x in start_x..end_x {
                let destination = Rect::new(x as f32 * width, y as f32 * height, width, height);
                renderer.draw_sprite(
                    texture,
                    destination,
                    source,
                    0.0,
                    Vec2::zeros(),
                    Color::WHITE,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    #[test]
    fn tiles_cover_the_viewport() {
        let mut renderer = NullRenderer::new();
        renderer.set_texture_size("Images/Background", 128, 128);

        let mut camera = Camera::new(640.0, 360.0);
        camera.update(Vec2::new(640.0, 360.0), Vec2::zeros());

        let background = Background::new("Images/Background");
        background.draw(&mut renderer, &camera);

        // 640x360 viewport centered on origin spans 6x4 tiles of 128px.
        assert_eq!(renderer.draw_count(), 6 * 4);
    }
}
