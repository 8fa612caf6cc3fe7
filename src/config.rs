//! Game tuning. Every value can be overridden from a JSON file; anything
//! missing from the file falls back to the defaults below.

use crate::error::{ConfigSource, LoadError};
use crate::sprites::SpriteSet;
use crate::state::Role;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};

pub const DEFAULT_CONFIG_FILE: &str = "robot_runner.json";
pub const CONFIG_ENV_VAR: &str = "ROBOT_RUNNER_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub fps: u32,

    pub coins_number: usize,
    pub monsters_number: usize,
    /// Objects spawn this far past the right edge of the screen
    pub spawn_distance_min: u32,
    pub spawn_distance_max: u32,
    pub max_spawn_attempts: u32,

    pub gravity: f32,
    /// Initial upward kick of a jump (negative is up)
    pub min_jump_power: f32,
    /// Hard ceiling on upward speed
    pub max_jump_power: f32,
    pub jump_power_increment: f32,
    /// The jump ceiling sits this many pixels above the bottom of a coin at y = 0
    pub max_jump_margin: u32,

    pub player_start_x_ratio: f32,
    pub player_speed: f32,
    pub object_speed: f32,
    pub player_speed_increment: f32,
    pub object_speed_increment: f32,
    pub points_per_speedup: u32,

    pub assets_dir: PathBuf,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: 640,
            screen_height: 480,
            fps: 60,
            coins_number: 3,
            monsters_number: 2,
            spawn_distance_min: 100,
            spawn_distance_max: 500,
            max_spawn_attempts: 1000,
            gravity: 1.0,
            min_jump_power: -8.0,
            max_jump_power: -200.0,
            jump_power_increment: 1.2,
            max_jump_margin: 8,
            player_start_x_ratio: 0.01,
            player_speed: 3.0,
            object_speed: 2.0,
            player_speed_increment: 0.2,
            object_speed_increment: 0.4,
            points_per_speedup: 10,
            assets_dir: PathBuf::from("assets"),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Path from `ROBOT_RUNNER_CONFIG`, or `robot_runner.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// A missing file yields the defaults. Unreadable or malformed files are errors.
    pub fn load(path: &Path) -> Result<GameConfig, LoadError> {
        let s = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(GameConfig::default());
            }
            Err(e) => {
                return Err(LoadError::Config {
                    path: path.to_path_buf(),
                    source: ConfigSource::Io(e),
                });
            }
        };

        let config = Self::from_json(&s).map_err(|e| LoadError::Config {
            path: path.to_path_buf(),
            source: ConfigSource::Json(e),
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(s: &str) -> Result<GameConfig, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let fail = |reason: &str| -> Result<(), LoadError> {
            Err(LoadError::InvalidConfig(reason.to_string()))
        };

        if self.screen_width == 0 || self.screen_height == 0 {
            return fail("screen size must be non-zero");
        }
        if self.fps == 0 {
            return fail("fps must be non-zero");
        }
        if self.spawn_distance_min > self.spawn_distance_max {
            return fail("spawn_distance_min is greater than spawn_distance_max");
        }
        if self.min_jump_power >= 0.0 || self.max_jump_power >= 0.0 {
            return fail("jump powers must be negative (upwards)");
        }
        if self.max_jump_power > self.min_jump_power {
            return fail("max_jump_power must be at least as strong as min_jump_power");
        }
        if self.gravity <= 0.0 {
            return fail("gravity must be positive");
        }
        if self.points_per_speedup == 0 {
            return fail("points_per_speedup must be non-zero");
        }
        if self.max_spawn_attempts == 0 {
            return fail("max_spawn_attempts must be non-zero");
        }
        Ok(())
    }

    /// Checks the screen against the loaded sprites: the player has to fit
    /// horizontally, every sprite vertically, and the jump ceiling has to sit
    /// above the ground.
    pub fn validate_for(&self, sprites: &SpriteSet) -> Result<(), LoadError> {
        let player = sprites.get(Role::Player);
        if player.width > self.screen_width {
            return Err(LoadError::InvalidConfig(format!(
                "player sprite is {} px wide but the screen is {} px",
                player.width, self.screen_width
            )));
        }

        for role in Role::ALL {
            let sprite = sprites.get(*role);
            if sprite.height > self.screen_height {
                return Err(LoadError::InvalidConfig(format!(
                    "{:?} sprite is {} px tall but the screen is {} px",
                    role, sprite.height, self.screen_height
                )));
            }
        }

        let max_jump_y = sprites.get(Role::Coin).height as i64 - self.max_jump_margin as i64;
        let ground_y = self.screen_height as i64 - player.height as i64;
        if max_jump_y >= ground_y {
            return Err(LoadError::InvalidConfig(format!(
                "jump ceiling y {} is not above ground y {}",
                max_jump_y, ground_y
            )));
        }
        Ok(())
    }
}
