//! Rendering abstraction
//!
//! The engine draws through the narrow [`Renderer`] trait; the actual
//! backend (sprite batching, shaders, windowing) lives with the host.
//! [`NullRenderer`] satisfies the contract for tests and headless runs.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::foundation::math::Vec2;

slotmap::new_key_type! {
    /// Handle to a loaded texture, valid for the renderer that produced it.
    pub struct TextureHandle;
}

/// Axis-aligned rectangle in world or texture space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two corners.
    pub fn from_corners(top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: bottom_right.x - top_left.x,
            height: bottom_right.y - top_left.y,
        }
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

/// RGBA color with float channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque white; the neutral sprite tint.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 0.5, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Opaque purple.
    pub const PURPLE: Self = Self::new(0.5, 0.0, 0.5);
    /// Opaque orange.
    pub const ORANGE: Self = Self::new(1.0, 0.65, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    /// Opaque color from RGB channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Narrow rendering contract the simulation draws through.
pub trait Renderer {
    /// Load a texture, cached by path. Loading the same path twice returns
    /// the same handle.
    fn load(&mut self, path: &str) -> TextureHandle;

    /// Pixel dimensions of a loaded texture.
    fn texture_size(&self, texture: TextureHandle) -> (u32, u32);

    /// Draw a sprite region to a world-space destination.
    fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        destination: Rect,
        source: Rect,
        rotation: f32,
        origin: Vec2,
        tint: Color,
    );
}

struct NullTexture {
    width: u32,
    height: u32,
}

/// Renderer that loads nothing and draws nowhere.
///
/// Texture sizes can be registered per path so animation frame math behaves
/// as it would against real assets; unregistered paths report a fixed
/// default size.
pub struct NullRenderer {
    textures: SlotMap<TextureHandle, NullTexture>,
    by_path: HashMap<String, TextureHandle>,
    sizes: HashMap<String, (u32, u32)>,
    default_size: (u32, u32),
    draw_count: u64,
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NullRenderer {
    /// New renderer with a 64x64 default texture size.
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            by_path: HashMap::new(),
            sizes: HashMap::new(),
            default_size: (64, 64),
            draw_count: 0,
        }
    }

    /// Pretend the texture at `path` has the given pixel size.
    pub fn set_texture_size(&mut self, path: &str, width: u32, height: u32) {
        self.sizes.insert(path.to_string(), (width, height));
    }

    /// Number of sprites drawn so far.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }
}

impl Renderer for NullRenderer {
    fn load(&mut self, path: &str) -> TextureHandle {
        if let Some(handle) = self.by_path.get(path) {
            return *handle;
        }

        let (width, height) = self.sizes.get(path).copied().unwrap_or(self.default_size);
        let handle = self.textures.insert(NullTexture { width, height });
        self.by_path.insert(path.to_string(), handle);
        handle
    }

    fn texture_size(&self, texture: TextureHandle) -> (u32, u32) {
        self.textures
            .get(texture)
            .map_or((0, 0), |t| (t.width, t.height))
    }

    fn draw_sprite(
        &mut self,
        _texture: TextureHandle,
        _destination: Rect,
        _source: Rect,
        _rotation: f32,
        _origin: Vec2,
        _tint: Color,
    ) {
        self.draw_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_caches_by_path() {
        let mut renderer = NullRenderer::new();
        let a = renderer.load("SpriteSheets/ShipPlayer");
        let b = renderer.load("SpriteSheets/ShipPlayer");
        assert_eq!(a, b);
    }

    #[test]
    fn registered_size_is_reported() {
        let mut renderer = NullRenderer::new();
        renderer.set_texture_size("SpriteSheets/Explosion", 512, 64);
        let handle = renderer.load("SpriteSheets/Explosion");
        assert_eq!(renderer.texture_size(handle), (512, 64));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert_eq!(rect.center(), Vec2::new(5.0, 5.0));
    }
}
