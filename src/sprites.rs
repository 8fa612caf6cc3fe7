use crate::error::LoadError;
use crate::state::Role;
use image::GenericImageView;
use std::path::Path;

/// Pixels with alpha above this count as solid for collision.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Row-major bitmap of the solid pixels of a sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    w: u32,
    h: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Pixels missing from a short buffer are transparent.
    pub fn from_rgba(w: u32, h: u32, rgba: &[u8]) -> Mask {
        let len = (w * h) as usize;
        let mut bits: Vec<bool> = rgba
            .chunks_exact(4)
            .take(len)
            .map(|px| px[3] > ALPHA_THRESHOLD)
            .collect();
        bits.resize(len, false);
        Mask { w, h, bits }
    }

    pub fn filled(w: u32, h: u32) -> Mask {
        Mask {
            w,
            h,
            bits: vec![true; (w * h) as usize],
        }
    }

    #[cfg(test)]
    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.w && y < self.h {
            self.bits[(y * self.w + x) as usize] = solid;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return false;
        }
        self.bits[(y as u32 * self.w + x as u32) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// True if any pixel is solid in both masks with `other`'s origin
    /// placed at `offset` in this mask's coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;

        // Only the intersection of the two rectangles can overlap
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.w as i32).min(self.w as i32);
        let y1 = (dy + other.h as i32).min(self.h as i32);
        if x0 >= x1 || y0 >= y1 {
            return false;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

#[derive(Clone, Debug)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub mask: Mask,
    pub rgba: Vec<u8>,
}

impl Sprite {
    /// `rgba` is padded with transparent pixels or truncated to `width * height`.
    pub fn from_rgba(width: u32, height: u32, mut rgba: Vec<u8>) -> Sprite {
        rgba.resize((width * height * 4) as usize, 0);
        let mask = Mask::from_rgba(width, height, &rgba);
        Sprite {
            width,
            height,
            mask,
            rgba,
        }
    }

    /// Fully opaque white rectangle.
    #[cfg(test)]
    pub fn solid(width: u32, height: u32) -> Sprite {
        Sprite::from_rgba(width, height, vec![255; (width * height * 4) as usize])
    }

    pub fn load(path: &Path) -> Result<Sprite, LoadError> {
        let img = image::open(path).map_err(|source| LoadError::Sprite {
            path: path.to_path_buf(),
            source,
        })?;
        let (w, h) = img.dimensions();
        let rgba = img.to_rgba8().into_raw();
        Ok(Sprite::from_rgba(w, h, rgba))
    }
}

/// Read-only sprite repository, one sprite per role.
pub struct SpriteSet {
    player: Sprite,
    coin: Sprite,
    monster: Sprite,
}

impl SpriteSet {
    pub fn new(player: Sprite, coin: Sprite, monster: Sprite) -> SpriteSet {
        SpriteSet {
            player,
            coin,
            monster,
        }
    }

    pub fn load_from_dir(dir: &Path) -> Result<SpriteSet, LoadError> {
        let load = |role: Role| -> Result<Sprite, LoadError> {
            let sprite = Sprite::load(&dir.join(role.file_name()))?;
            log::info!(
                "Loaded {:?} sprite {}x{} ({} solid px)",
                role,
                sprite.width,
                sprite.height,
                sprite.mask.count()
            );
            Ok(sprite)
        };

        Ok(SpriteSet {
            player: load(Role::Player)?,
            coin: load(Role::Coin)?,
            monster: load(Role::Monster)?,
        })
    }

    pub fn get(&self, role: Role) -> &Sprite {
        match role {
            Role::Player => &self.player,
            Role::Coin => &self.coin,
            Role::Monster => &self.monster,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring_mask() -> Mask {
        // 4x4 with a hollow 2x2 center
        let mut mask = Mask::filled(4, 4);
        mask.set(1, 1, false);
        mask.set(2, 1, false);
        mask.set(1, 2, false);
        mask.set(2, 2, false);
        mask
    }

    #[test]
    fn test_mask_from_alpha_threshold() {
        let rgba = vec![
            0, 0, 0, 255, //
            0, 0, 0, 128, //
            0, 0, 0, 127, //
            0, 0, 0, 0,
        ];
        let mask = Mask::from_rgba(2, 2, &rgba);
        assert!(mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(0, 1));
        assert!(!mask.get(1, 1));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_short_buffer_is_transparent() {
        // Only the first of four pixels is present
        let mask = Mask::from_rgba(2, 2, &[0, 0, 0, 255, 0, 0]);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(!mask.get(1, 1));
        assert_eq!(mask.count(), 1);
        assert!(!mask.overlap(&Mask::filled(1, 1), (1, 1)));

        let sprite = Sprite::from_rgba(3, 3, vec![255; 8]);
        assert_eq!(sprite.rgba.len(), 36);
        assert_eq!(sprite.mask.count(), 2);
    }

    #[test]
    fn test_overlap_disjoint_rects() {
        let a = Mask::filled(4, 4);
        let b = Mask::filled(4, 4);
        assert!(!a.overlap(&b, (4, 0)));
        assert!(!a.overlap(&b, (0, -4)));
        assert!(a.overlap(&b, (3, 3)));
        assert!(a.overlap(&b, (-3, -3)));
    }

    #[test]
    fn test_overlap_inside_hole_is_no_hit() {
        let ring = ring_mask();
        let dot = Mask::filled(2, 2);
        assert!(!ring.overlap(&dot, (1, 1)));
        assert!(ring.overlap(&dot, (0, 1)));
    }

    #[test]
    fn test_sprite_solid_has_full_mask() {
        let sprite = Sprite::solid(3, 5);
        assert_eq!(sprite.mask.count(), 15);
        assert_eq!(sprite.rgba.len(), 60);
    }

    #[test]
    fn test_missing_sprite_is_an_error() {
        let result = Sprite::load(Path::new("no/such/dir/robot.png"));
        assert!(matches!(result, Err(LoadError::Sprite { .. })));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(dx in -6i32..6, dy in -6i32..6) {
            let ring = ring_mask();
            let block = Mask::filled(3, 2);
            prop_assert_eq!(ring.overlap(&block, (dx, dy)), block.overlap(&ring, (-dx, -dy)));
        }
    }
}
