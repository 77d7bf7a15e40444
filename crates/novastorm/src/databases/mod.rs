//! Static content databases: sprite sheets, rarities, entity blueprints.

pub mod entities;
pub mod rarities;
pub mod sprite_sheets;
