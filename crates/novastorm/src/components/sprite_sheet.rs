//! Animated sprite sheets
//!
//! Frames are laid out horizontally in a single texture strip. The texture
//! loads lazily on the first draw so blueprints stay renderer-free.

use std::cell::Cell;

use nova_engine::prelude::*;

use crate::databases::sprite_sheets::SpriteSheetEntry;

const FRAMES_PER_SECOND: f32 = 12.0;

/// Draws an animated sprite at the entity's position and facing.
pub struct SpriteSheet {
    entity: EntityRef,
    entry: SpriteSheetEntry,
    tint: Cell<Option<Color>>,
    texture: Cell<Option<TextureHandle>>,
    frame_width: Cell<f32>,
    frame_height: Cell<f32>,
    progress: Cell<f32>,
}

impl SpriteSheet {
    /// Sprite sheet for the given database entry.
    pub fn new(entity: &Entity, entry: SpriteSheetEntry) -> Self {
        Self {
            entity: entity.downgrade(),
            entry,
            tint: Cell::new(None),
            texture: Cell::new(None),
            frame_width: Cell::new(0.0),
            frame_height: Cell::new(0.0),
            progress: Cell::new(0.0),
        }
    }

    /// Current tint override, if any.
    pub fn tint(&self) -> Option<Color> {
        self.tint.get()
    }

    /// Tint the sprite (used for item rarity).
    pub fn set_tint(&self, tint: Option<Color>) {
        self.tint.set(tint);
    }

    /// Whether the animation has played through once.
    pub fn animation_finished(&self) -> bool {
        self.progress.get() * FRAMES_PER_SECOND >= f32::from(self.entry.frames)
    }
}

impl Drawable for SpriteSheet {
    fn prepare_draw(&self, frame: FrameTime, renderer: &mut dyn Renderer) {
        if self.texture.get().is_none() {
            let texture = renderer.load(&format!("SpriteSheets/{}", self.entry.path));
            let (width, height) = renderer.texture_size(texture);
            self.texture.set(Some(texture));
            self.frame_width
                .set(width as f32 / f32::from(self.entry.frames));
            self.frame_height.set(height as f32);
        }

        // Animation freezes with the simulation.
        if !self.entity.get().world().paused() {
            self.progress.set(self.progress.get() + frame.delta_seconds);
        }
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let Some(texture) = self.texture.get() else {
            return;
        };

        let width = self.frame_width.get();
        let height = self.frame_height.get();
        let frame =
            (self.progress.get() * FRAMES_PER_SECOND) as u32 % u32::from(self.entry.frames.max(1));

        let entity = self.entity.get();
        let source = Rect::new(frame as f32 * width, 0.0, width, height);
        let destination = Rect::new(entity.position().x, entity.position().y, width, height);
        let rotation = facing_angle(entity.direction());
        let origin = Vec2::new(width, height) / 2.0;

        renderer.draw_sprite(
            texture,
            destination,
            source,
            rotation,
            origin,
            self.tint.get().unwrap_or(Color::WHITE),
        );
    }

    fn finished(&self) -> bool {
        self.animation_finished()
    }
}

impl_component!(SpriteSheet: Drawable);
