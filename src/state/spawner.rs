use super::common::{BoundingBox, Role};
use super::entity::Entity;
use crate::config::GameConfig;
use crate::sprites::Sprite;
use rand::Rng;
use std::ops::RangeInclusive;

/// Places coins and monsters off-screen to the right, clear of everything
/// already in play.
#[derive(Clone, Copy, Debug)]
pub struct Spawner {
    screen_w: u32,
    screen_h: u32,
    distance_min: u32,
    distance_max: u32,
    max_attempts: u32,
}

impl Spawner {
    pub fn from_config(config: &GameConfig) -> Spawner {
        Spawner {
            screen_w: config.screen_width,
            screen_h: config.screen_height,
            distance_min: config.spawn_distance_min,
            distance_max: config.spawn_distance_max,
            max_attempts: config.max_spawn_attempts,
        }
    }

    pub fn x_range(&self) -> RangeInclusive<i32> {
        let w = self.screen_w as i32;
        (w + self.distance_min as i32)..=(w + self.distance_max as i32)
    }

    pub fn y_range(&self, sprite: &Sprite) -> RangeInclusive<i32> {
        0..=self.screen_h.saturating_sub(sprite.height) as i32
    }

    /// `occupied` holds the boxes of every live coin and monster, minus the
    /// one being replaced. If no free slot turns up within the attempt
    /// budget, the least crowded candidate is used.
    pub fn spawn<R: Rng>(
        &self,
        role: Role,
        sprite: &Sprite,
        rng: &mut R,
        occupied: &[BoundingBox],
    ) -> Entity {
        let x_range = self.x_range();
        let y_range = self.y_range(sprite);

        let mut best: Option<(usize, Entity)> = None;
        for _ in 0..self.max_attempts {
            let x = rng.random_range(x_range.clone());
            let y = rng.random_range(y_range.clone());
            let candidate = Entity::new(role, x as f32, y as f32, sprite);

            let bb = candidate.bb();
            let overlaps = occupied.iter().filter(|o| o.overlaps(&bb)).count();
            if overlaps == 0 {
                return candidate;
            }
            if best.is_none_or(|(fewest, _)| overlaps < fewest) {
                best = Some((overlaps, candidate));
            }
        }

        // max_attempts is validated to be non-zero, so best is always set here
        let (overlaps, entity) =
            best.unwrap_or((0, Entity::new(role, *x_range.end() as f32, 0.0, sprite)));
        log::warn!(
            "No free slot for {:?} after {} attempts, placing with {} overlap(s)",
            role,
            self.max_attempts,
            overlaps
        );
        entity
    }
}
