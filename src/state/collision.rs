use super::entity::Entity;
use crate::sprites::SpriteSet;

/// Bounding boxes first, then the opacity masks at the integer offset
/// between the two origins.
pub fn entities_collide(a: &Entity, b: &Entity, sprites: &SpriteSet) -> bool {
    if !a.bb().overlaps(&b.bb()) {
        return false;
    }

    let (ax, ay) = a.pixel_origin();
    let (bx, by) = b.pixel_origin();
    let a_mask = &sprites.get(a.role).mask;
    let b_mask = &sprites.get(b.role).mask;
    a_mask.overlap(b_mask, (bx - ax, by - ay))
}

/// Index of the first entity in collection order touching `player`.
pub fn first_hit(player: &Entity, others: &[Entity], sprites: &SpriteSet) -> Option<usize> {
    others
        .iter()
        .position(|other| entities_collide(player, other, sprites))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprites::{Mask, Sprite};
    use crate::state::Role;

    /// Coin sprite that is a ring: opaque border, transparent 6x6 middle.
    fn ring_sprite() -> Sprite {
        let mut rgba = vec![255u8; 10 * 10 * 4];
        for y in 2..8 {
            for x in 2..8 {
                rgba[(y * 10 + x) * 4 + 3] = 0;
            }
        }
        Sprite::from_rgba(10, 10, rgba)
    }

    fn sprites() -> SpriteSet {
        SpriteSet::new(Sprite::solid(2, 2), ring_sprite(), Sprite::solid(10, 10))
    }

    fn entity(role: Role, x: f32, y: f32, sprites: &SpriteSet) -> Entity {
        Entity::new(role, x, y, sprites.get(role))
    }

    #[test]
    fn test_broad_phase_miss() {
        let sprites = sprites();
        let player = entity(Role::Player, 0.0, 0.0, &sprites);
        let monster = entity(Role::Monster, 2.0, 0.0, &sprites);
        assert!(!entities_collide(&player, &monster, &sprites));
    }

    #[test]
    fn test_narrow_phase_rejects_bbox_only_overlap() {
        let sprites = sprites();
        // Player sits inside the hole of the ring
        let player = entity(Role::Player, 14.0, 14.0, &sprites);
        let coin = entity(Role::Coin, 10.0, 10.0, &sprites);
        assert!(player.bb().overlaps(&coin.bb()));
        assert!(!entities_collide(&player, &coin, &sprites));

        // Player on the border
        let player = entity(Role::Player, 10.5, 10.0, &sprites);
        assert!(entities_collide(&player, &coin, &sprites));
    }

    #[test]
    fn test_first_hit_order() {
        let sprites = sprites();
        let player = entity(Role::Player, 5.0, 5.0, &sprites);
        let monsters = vec![
            entity(Role::Monster, 100.0, 0.0, &sprites),
            entity(Role::Monster, 0.0, 0.0, &sprites),
            entity(Role::Monster, 1.0, 1.0, &sprites),
        ];
        assert_eq!(first_hit(&player, &monsters, &sprites), Some(1));
        assert_eq!(first_hit(&player, &monsters[..1], &sprites), None);
    }

    #[test]
    fn test_empty_mask_never_collides() {
        let sprites = SpriteSet::new(
            Sprite {
                width: 5,
                height: 5,
                mask: Mask::from_rgba(5, 5, &[0; 100]),
                rgba: vec![0; 100],
            },
            Sprite::solid(5, 5),
            Sprite::solid(5, 5),
        );
        let player = entity(Role::Player, 0.0, 0.0, &sprites);
        let monster = entity(Role::Monster, 0.0, 0.0, &sprites);
        assert!(!entities_collide(&player, &monster, &sprites));
    }
}
