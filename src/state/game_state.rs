use super::collision::{entities_collide, first_hit};
use super::common::{BoundingBox, Role};
use super::entity::Entity;
use super::spawner::Spawner;
use crate::config::GameConfig;
use crate::physics::{JumpParams, JumpState, integrate_jump};
use crate::sprites::SpriteSet;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Level-triggered keys sampled once per frame.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    StartScreen,
    Playing,
    GameOver,
}

pub struct GameState {
    pub mode: Mode,
    pub score: u32,
    pub object_speed: f32,
    pub player_speed: f32,
    pub player: Entity,
    pub jump: JumpState,
    pub coins: Vec<Entity>,
    pub monsters: Vec<Entity>,

    config: GameConfig,
    sprites: SpriteSet,
    spawner: Spawner,
    jump_params: JumpParams,
    speedups: u32,
    rng: Pcg32,
}

impl GameState {
    /// Starts on the start screen with a populated field behind the overlay.
    pub fn new(config: GameConfig, sprites: SpriteSet, seed: u64) -> GameState {
        let spawner = Spawner::from_config(&config);
        let jump_params = JumpParams::from_config(
            &config,
            sprites.get(Role::Player).height,
            sprites.get(Role::Coin).height,
        );
        let player = Entity::new(Role::Player, 0.0, 0.0, sprites.get(Role::Player));

        let mut state = GameState {
            mode: Mode::StartScreen,
            score: 0,
            object_speed: config.object_speed,
            player_speed: config.player_speed,
            player,
            jump: JumpState::default(),
            coins: Vec::with_capacity(config.coins_number),
            monsters: Vec::with_capacity(config.monsters_number),
            config,
            sprites,
            spawner,
            jump_params,
            speedups: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_run();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn jump_params(&self) -> &JumpParams {
        &self.jump_params
    }

    pub fn max_x(&self) -> f32 {
        self.config.screen_width as f32 - self.player.w
    }

    /// Full reinitialisation, then Playing.
    pub fn restart(&mut self) {
        self.reset_run();
        self.mode = Mode::Playing;
        log::info!("New game started");
    }

    fn reset_run(&mut self) {
        self.score = 0;
        self.speedups = 0;
        self.object_speed = self.config.object_speed;
        self.player_speed = self.config.player_speed;

        self.player.x = self.config.screen_width as f32 * self.config.player_start_x_ratio;
        self.player.y = self.jump_params.ground_y;
        self.jump = JumpState::default();

        self.coins.clear();
        self.monsters.clear();
        for _ in 0..self.config.coins_number {
            let coin = self.spawn(Role::Coin, None);
            self.coins.push(coin);
        }
        for _ in 0..self.config.monsters_number {
            let monster = self.spawn(Role::Monster, None);
            self.monsters.push(monster);
        }
    }

    /// `replacing` names the slot being refilled; that instance is ignored
    /// for the overlap test.
    fn spawn(&mut self, role: Role, replacing: Option<(Role, usize)>) -> Entity {
        let occupied: Vec<BoundingBox> = self
            .coins
            .iter()
            .enumerate()
            .map(|(i, e)| (Role::Coin, i, e))
            .chain(
                self.monsters
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (Role::Monster, i, e)),
            )
            .filter(|(r, i, _)| replacing != Some((*r, *i)))
            .map(|(_, _, e)| e.bb())
            .collect();

        self.spawner
            .spawn(role, self.sprites.get(role), &mut self.rng, &occupied)
    }

    fn respawn(&mut self, role: Role, index: usize) {
        let entity = self.spawn(role, Some((role, index)));
        match role {
            Role::Coin => self.coins[index] = entity,
            Role::Monster => self.monsters[index] = entity,
            Role::Player => {}
        }
    }

    /// Runs the jump integration and returns the new player y.
    pub fn apply_jump(&mut self, jump_pressed: bool, jump_held: bool) -> f32 {
        let res = integrate_jump(
            &mut self.jump,
            self.player.y,
            jump_pressed,
            jump_held,
            &self.jump_params,
        );
        if res.started {
            log::trace!("Jump started");
        }
        if res.hit_ceiling {
            log::trace!("Hit jump ceiling at y {}", res.new_y);
        }
        if res.landed {
            log::trace!("Landed");
        }
        res.new_y
    }

    pub fn move_player(&mut self, left: bool, right: bool, new_y: f32) {
        if left {
            self.player.x = (self.player.x - self.player_speed).max(0.0);
        }
        if right {
            self.player.x = (self.player.x + self.player_speed).min(self.max_x());
        }
        self.player.y = new_y;
    }

    /// Scrolls every coin and monster left, replacing the ones that left the screen.
    pub fn move_objects(&mut self) {
        for i in 0..self.coins.len() {
            self.coins[i].x -= self.object_speed;
            if self.coins[i].is_past_left_edge() {
                self.respawn(Role::Coin, i);
            }
        }
        for i in 0..self.monsters.len() {
            self.monsters[i].x -= self.object_speed;
            if self.monsters[i].is_past_left_edge() {
                self.respawn(Role::Monster, i);
            }
        }
    }

    /// Collects every coin the player touches. Returns how many were taken.
    pub fn check_coin_collisions(&mut self) -> u32 {
        let mut collected = 0;
        for i in 0..self.coins.len() {
            if entities_collide(&self.player, &self.coins[i], &self.sprites) {
                self.respawn(Role::Coin, i);
                self.add_point();
                collected += 1;
            }
        }
        collected
    }

    fn add_point(&mut self) {
        self.score += 1;
        if self.score % self.config.points_per_speedup == 0 {
            self.speedups += 1;
            self.object_speed =
                self.config.object_speed + self.speedups as f32 * self.config.object_speed_increment;
            self.player_speed =
                self.config.player_speed + self.speedups as f32 * self.config.player_speed_increment;
            log::info!(
                "Score {}: speeding up (objects {:.1}, player {:.1})",
                self.score,
                self.object_speed,
                self.player_speed
            );
        }
    }

    /// Pure query: does the player touch any monster?
    pub fn check_monster_collisions(&self) -> bool {
        first_hit(&self.player, &self.monsters, &self.sprites).is_some()
    }

    pub fn game_over(&mut self) {
        if self.mode == Mode::Playing {
            self.mode = Mode::GameOver;
            log::info!("Game over, final score {}", self.score);
        }
    }
}
