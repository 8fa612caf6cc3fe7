pub mod collision;
pub mod common;
pub mod entity;
pub mod game_state;
pub mod spawner;

pub use common::Role;
pub use entity::Entity;
pub use game_state::{GameState, InputState, Mode};
