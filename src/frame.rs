//! Per-frame orchestration: input, physics, movement, collisions and state
//! transitions, in that order. Rendering is driven separately by the window.

use crate::state::{GameState, InputState, Mode};
use std::time::{Duration, Instant};

/// Edge-triggered actions delivered as key-down events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Restart,
    Quit,
}

#[derive(Default, Clone, Debug)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: InputState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Owns the previous frame's key snapshot so jump presses can be detected
/// as rising edges.
#[derive(Default)]
pub struct FrameDriver {
    prev_held: InputState,
}

impl FrameDriver {
    pub fn new() -> FrameDriver {
        FrameDriver::default()
    }

    pub fn step(&mut self, state: &mut GameState, input: &FrameInput) -> FrameOutcome {
        for event in &input.events {
            match event {
                InputEvent::Quit => return FrameOutcome::Quit,
                InputEvent::Restart => {
                    if state.mode != Mode::Playing {
                        state.restart();
                    }
                }
            }
        }

        let held = input.held;
        let jump_pressed = held.jump && !self.prev_held.jump;
        self.prev_held = held;

        if state.mode != Mode::Playing {
            return FrameOutcome::Continue;
        }

        let new_y = state.apply_jump(jump_pressed, held.jump);
        state.move_player(held.left, held.right, new_y);
        state.move_objects();

        state.check_coin_collisions();
        if state.check_monster_collisions() {
            state.game_over();
        }

        FrameOutcome::Continue
    }
}

pub trait Clock {
    /// Blocks until the current frame's time budget is used up.
    fn tick(&mut self, target_fps: u32);
}

pub struct FrameLimiter {
    frame_start: Instant,
}

impl FrameLimiter {
    pub fn new() -> FrameLimiter {
        FrameLimiter {
            frame_start: Instant::now(),
        }
    }
}

impl Clock for FrameLimiter {
    fn tick(&mut self, target_fps: u32) {
        let frame_dur = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
        self.frame_start = Instant::now();
    }
}
