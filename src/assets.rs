//! Sprite loading
//!
//! Every sprite is a PNG under the asset directory, scaled to its entity's
//! pixel size at load. A sprite that can't be read is replaced by a solid
//! magenta square of the same size so the game always has something to draw.

use std::path::Path;

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};

use crate::colors::{self, Rgb};
use crate::consts::*;

/// Named sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Wall,
    Token,
    Obstacle,
    Heart,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 5] = [
        SpriteKind::Player,
        SpriteKind::Wall,
        SpriteKind::Token,
        SpriteKind::Obstacle,
        SpriteKind::Heart,
    ];

    /// File stem under the asset directory
    pub fn file_stem(self) -> &'static str {
        match self {
            SpriteKind::Player => "player",
            SpriteKind::Wall => "wall",
            SpriteKind::Token => "token",
            SpriteKind::Obstacle => "obstacle",
            SpriteKind::Heart => "heart",
        }
    }

    /// Edge length the sprite is scaled to
    pub fn size(self) -> u32 {
        let size = match self {
            SpriteKind::Player => PLAYER_SIZE,
            SpriteKind::Wall => TILE_SIZE,
            SpriteKind::Token => TOKEN_SIZE,
            SpriteKind::Obstacle => OBSTACLE_SIZE,
            SpriteKind::Heart => HEART_SIZE,
        };
        size as u32
    }
}

/// A loaded (or substituted) sprite image
#[derive(Debug, Clone)]
pub struct Sprite {
    pub image: RgbaImage,
    /// True when the file was missing or unreadable
    pub is_placeholder: bool,
}

impl Sprite {
    /// Solid magenta square
    pub fn placeholder(size: u32) -> Self {
        let [r, g, b] = colors::MAGENTA;
        Self {
            image: RgbaImage::from_pixel(size, size, Rgba([r, g, b, 255])),
            is_placeholder: true,
        }
    }

    /// Mean color of the opaque pixels (None if fully transparent)
    pub fn average_color(&self) -> Option<Rgb> {
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for p in self.image.pixels().filter(|p| p[3] > 0) {
            for (acc, &c) in sum.iter_mut().zip(&p.0[..3]) {
                *acc += c as u64;
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(sum.map(|s| (s / count) as u8))
    }
}

/// Load `name.png` from `dir`, scaled to `size` x `size`
///
/// Failure is logged and yields a placeholder; it never aborts the game.
pub fn load_sprite(dir: &Path, name: &str, size: u32) -> Sprite {
    let path = dir.join(format!("{name}.png"));
    match image::open(&path) {
        Ok(img) => {
            let image = img.to_rgba8();
            let image = if image.dimensions() == (size, size) {
                image
            } else {
                image::imageops::resize(&image, size, size, FilterType::Nearest)
            };
            log::debug!("Loaded sprite {}", path.display());
            Sprite {
                image,
                is_placeholder: false,
            }
        }
        Err(e) => {
            log::warn!("Could not load {}: {e}; using placeholder", path.display());
            Sprite::placeholder(size)
        }
    }
}

/// The full sprite set, loaded once at startup
#[derive(Debug, Clone)]
pub struct SpriteSet {
    sprites: [Sprite; 5],
}

impl SpriteSet {
    pub fn load(dir: &Path) -> Self {
        let sprites = SpriteKind::ALL.map(|kind| load_sprite(dir, kind.file_stem(), kind.size()));
        let missing = sprites.iter().filter(|s| s.is_placeholder).count();
        if missing > 0 {
            log::info!("{missing} of {} sprites missing in {}", sprites.len(), dir.display());
        }
        Self { sprites }
    }

    pub fn get(&self, kind: SpriteKind) -> &Sprite {
        &self.sprites[kind as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_magenta_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = load_sprite(dir.path(), "player", 30);
        assert!(sprite.is_placeholder);
        assert_eq!(sprite.image.dimensions(), (30, 30));
        assert_eq!(sprite.average_color(), Some(colors::MAGENTA));
    }

    #[test]
    fn test_real_png_is_loaded_and_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let src = RgbaImage::from_pixel(8, 8, Rgba([10, 200, 30, 255]));
        src.save(dir.path().join("token.png")).unwrap();

        let sprite = load_sprite(dir.path(), "token", TOKEN_SIZE as u32);
        assert!(!sprite.is_placeholder);
        assert_eq!(sprite.image.dimensions(), (20, 20));
        assert_eq!(sprite.average_color(), Some([10, 200, 30]));
    }

    #[test]
    fn test_corrupt_png_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wall.png"), b"not a png").unwrap();
        let sprite = load_sprite(dir.path(), "wall", 40);
        assert!(sprite.is_placeholder);
        assert_eq!(sprite.image.dimensions(), (40, 40));
    }

    #[test]
    fn test_transparent_pixels_ignored_in_average() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, Rgba([100, 50, 0, 255]));
        let sprite = Sprite {
            image,
            is_placeholder: false,
        };
        assert_eq!(sprite.average_color(), Some([100, 50, 0]));
    }

    #[test]
    fn test_sprite_set_indexes_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let set = SpriteSet::load(dir.path());
        for kind in SpriteKind::ALL {
            assert_eq!(set.get(kind).image.width(), kind.size());
        }
    }
}
