use super::common::{BoundingBox, Role};
use crate::sprites::Sprite;

/// Player, coin and monster all share this shape. The collision mask is
/// looked up from the sprite repository by role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub role: Role,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Entity {
    pub fn new(role: Role, x: f32, y: f32, sprite: &Sprite) -> Entity {
        Entity {
            role,
            x,
            y,
            w: sprite.width as f32,
            h: sprite.height as f32,
        }
    }

    /// Whole-pixel position the sprite is drawn at.
    pub fn pixel_origin(&self) -> (i32, i32) {
        (self.x.floor() as i32, self.y.floor() as i32)
    }

    pub fn bb(&self) -> BoundingBox {
        let (x, y) = self.pixel_origin();
        BoundingBox {
            x: x as f32,
            y: y as f32,
            w: self.w,
            h: self.h,
        }
    }

    pub fn is_past_left_edge(&self) -> bool {
        self.x + self.w < 0.0
    }
}
