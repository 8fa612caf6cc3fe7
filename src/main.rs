use anyhow::Context as _;
use miniquad::*;
use std::time::{SystemTime, UNIX_EPOCH};

mod config;
mod error;
mod frame;
mod physics;
mod render;
mod sprites;
mod state;

use crate::config::GameConfig;
use crate::frame::{Clock, FrameDriver, FrameInput, FrameLimiter, FrameOutcome, InputEvent};
use crate::render::Renderer;
use crate::sprites::SpriteSet;
use crate::state::{GameState, InputState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Left,
    Right,
    Jump,
    Event(InputEvent),
}

fn key_action(keycode: KeyCode) -> Option<KeyAction> {
    match keycode {
        KeyCode::Left => Some(KeyAction::Left),
        KeyCode::Right => Some(KeyAction::Right),
        KeyCode::Space => Some(KeyAction::Jump),
        KeyCode::N => Some(KeyAction::Event(InputEvent::Restart)),
        KeyCode::Escape => Some(KeyAction::Event(InputEvent::Quit)),
        _ => None,
    }
}

struct Stage {
    state: GameState,
    renderer: Renderer,
    driver: FrameDriver,
    clock: FrameLimiter,
    held: InputState,
    events: Vec<InputEvent>,
}

impl Stage {
    fn new(config: GameConfig, sprites: SpriteSet, seed: u64) -> Stage {
        let renderer = Renderer::new(
            &sprites,
            config.screen_width as f32,
            config.screen_height as f32,
        );
        let state = GameState::new(config, sprites, seed);

        Stage {
            state,
            renderer,
            driver: FrameDriver::new(),
            clock: FrameLimiter::new(),
            held: InputState::default(),
            events: Vec::new(),
        }
    }
}

impl EventHandler for Stage {
    fn update(&mut self) {
        let input = FrameInput {
            events: std::mem::take(&mut self.events),
            held: self.held,
        };

        if self.driver.step(&mut self.state, &input) == FrameOutcome::Quit {
            log::info!("Quitting");
            window::order_quit();
            return;
        }

        self.clock.tick(self.state.config().fps);
    }

    fn draw(&mut self) {
        self.renderer.draw(&self.state);
    }

    fn key_down_event(&mut self, keycode: KeyCode, _mods: KeyMods, repeat: bool) {
        match key_action(keycode) {
            Some(KeyAction::Left) => self.held.left = true,
            Some(KeyAction::Right) => self.held.right = true,
            Some(KeyAction::Jump) => self.held.jump = true,
            Some(KeyAction::Event(event)) if !repeat => self.events.push(event),
            _ => {}
        }
    }

    fn key_up_event(&mut self, keycode: KeyCode, _mods: KeyMods) {
        match key_action(keycode) {
            Some(KeyAction::Left) => self.held.left = false,
            Some(KeyAction::Right) => self.held.right = false,
            Some(KeyAction::Jump) => self.held.jump = false,
            _ => {}
        }
    }

    fn quit_requested_event(&mut self) {
        log::info!("Window closed");
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = GameConfig::default_path();
    let config = GameConfig::load(&config_path)
        .with_context(|| format!("could not load config {}", config_path.display()))?;
    let sprites = SpriteSet::load_from_dir(&config.assets_dir).with_context(|| {
        format!("could not load sprites from {}", config.assets_dir.display())
    })?;
    config
        .validate_for(&sprites)
        .context("config does not fit the loaded sprites")?;

    let seed = config.seed.unwrap_or_else(seed_from_clock);
    log::info!("Robot Runner starting, seed {}", seed);

    let conf = conf::Conf {
        window_title: String::from("Robot Runner"),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: false,
        high_dpi: false,
        ..Default::default()
    };

    miniquad::start(conf, move || Box::new(Stage::new(config, sprites, seed)));
    Ok(())
}
