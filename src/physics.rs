use crate::config::GameConfig;

/// Vertical state of the player between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JumpState {
    pub velocity_y: f32,
    pub airborne: bool,
    pub boosting: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpParams {
    pub gravity: f32,
    pub min_jump_power: f32,
    pub max_jump_power: f32,
    pub jump_power_increment: f32,
    /// Highest point (smallest y) the player can reach
    pub max_jump_y: f32,
    pub ground_y: f32,
}

impl JumpParams {
    /// The ceiling is derived from the coin height so every coin stays reachable.
    pub fn from_config(config: &GameConfig, player_h: u32, coin_h: u32) -> JumpParams {
        JumpParams {
            gravity: config.gravity,
            min_jump_power: config.min_jump_power,
            max_jump_power: config.max_jump_power,
            jump_power_increment: config.jump_power_increment,
            max_jump_y: coin_h as f32 - config.max_jump_margin as f32,
            ground_y: config.screen_height as f32 - player_h as f32,
        }
    }
}

pub struct JumpResult {
    pub new_y: f32,
    pub started: bool,
    pub hit_ceiling: bool,
    pub landed: bool,
}

/// One frame of jump integration. `jump_pressed` is the rising edge of the
/// jump key, `jump_held` its level.
pub fn integrate_jump(
    jump: &mut JumpState,
    y: f32,
    jump_pressed: bool,
    jump_held: bool,
    params: &JumpParams,
) -> JumpResult {
    let mut result = JumpResult {
        new_y: y,
        started: false,
        hit_ceiling: false,
        landed: false,
    };

    if jump_pressed && !jump.airborne {
        jump.airborne = true;
        jump.boosting = true;
        jump.velocity_y = params.min_jump_power;
        result.started = true;
    }

    // Letting go ends the boost but not the trajectory
    if !jump_held {
        jump.boosting = false;
    }

    if !jump.airborne {
        return result;
    }

    if jump.boosting && jump.velocity_y < 0.0 && y > params.max_jump_y {
        jump.velocity_y =
            (jump.velocity_y - params.jump_power_increment).max(params.max_jump_power);
    }

    jump.velocity_y += params.gravity;

    if jump.velocity_y >= 0.0 || y <= params.max_jump_y {
        jump.boosting = false;
    }

    let mut new_y = y + jump.velocity_y;

    if new_y <= params.max_jump_y {
        new_y = params.max_jump_y;
        jump.velocity_y = 0.0;
        result.hit_ceiling = true;
    }

    if new_y >= params.ground_y {
        new_y = params.ground_y;
        jump.velocity_y = 0.0;
        jump.airborne = false;
        jump.boosting = false;
        result.landed = true;
    }

    result.new_y = new_y;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> JumpParams {
        // 640x480 screen, 60px tall robot, 30px coin
        JumpParams::from_config(&GameConfig::default(), 60, 30)
    }

    #[test]
    fn test_params_from_config() {
        let p = params();
        assert_eq!(p.ground_y, 420.0);
        assert_eq!(p.max_jump_y, 22.0);
    }

    #[test]
    fn test_grounded_without_input_stays_put() {
        let p = params();
        let mut jump = JumpState::default();
        let res = integrate_jump(&mut jump, p.ground_y, false, false, &p);
        assert_eq!(res.new_y, p.ground_y);
        assert_eq!(jump, JumpState::default());
    }

    #[test]
    fn test_first_frame_of_jump() {
        let p = params();
        let mut jump = JumpState::default();
        let res = integrate_jump(&mut jump, p.ground_y, true, true, &p);
        assert!(res.started);
        assert!(jump.airborne);
        assert!(jump.boosting);
        // -8 kick, -1.2 boost, +1 gravity
        assert!((jump.velocity_y - -8.2).abs() < 1e-4);
        assert!((res.new_y - (p.ground_y - 8.2)).abs() < 1e-3);
    }

    #[test]
    fn test_held_jump_terminates() {
        let p = params();
        let mut jump = JumpState::default();
        let mut y = p.ground_y;
        let mut frames = 0;
        let mut pressed = true;
        loop {
            let res = integrate_jump(&mut jump, y, pressed, true, &p);
            pressed = false;
            y = res.new_y;
            assert!(y >= p.max_jump_y && y <= p.ground_y);
            frames += 1;
            if res.landed {
                break;
            }
            assert!(frames < 10_000, "jump never landed");
        }
        assert!(!jump.airborne);
        assert_eq!(jump.velocity_y, 0.0);
        assert_eq!(y, p.ground_y);
    }

    #[test]
    fn test_holding_jumps_higher_than_tapping() {
        let p = params();
        let apex = |hold: bool| {
            let mut jump = JumpState::default();
            let mut y = p.ground_y;
            let mut apex = y;
            let mut first = true;
            loop {
                let res = integrate_jump(&mut jump, y, first, hold || first, &p);
                first = false;
                y = res.new_y;
                apex = apex.min(y);
                if res.landed {
                    return apex;
                }
            }
        };
        assert!(apex(true) < apex(false));
    }

    #[test]
    fn test_ceiling_stops_but_does_not_land() {
        let p = params();
        let mut jump = JumpState {
            velocity_y: -50.0,
            airborne: true,
            boosting: false,
        };
        let res = integrate_jump(&mut jump, p.max_jump_y + 10.0, false, false, &p);
        assert!(res.hit_ceiling);
        assert_eq!(res.new_y, p.max_jump_y);
        assert_eq!(jump.velocity_y, 0.0);
        assert!(jump.airborne);
    }

    #[test]
    fn test_boost_capped_at_max_power() {
        let p = JumpParams {
            max_jump_power: -9.0,
            ..params()
        };
        let mut jump = JumpState {
            velocity_y: -8.5,
            airborne: true,
            boosting: true,
        };
        integrate_jump(&mut jump, 300.0, false, true, &p);
        // Capped at -9 before gravity
        assert!((jump.velocity_y - -8.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_double_jump_while_airborne() {
        let p = params();
        let mut jump = JumpState {
            velocity_y: 3.0,
            airborne: true,
            boosting: false,
        };
        let res = integrate_jump(&mut jump, 200.0, true, true, &p);
        assert!(!res.started);
        assert!(jump.velocity_y > 0.0);
    }

    #[test]
    fn test_release_ends_boost() {
        let p = params();
        let mut jump = JumpState::default();
        integrate_jump(&mut jump, p.ground_y, true, true, &p);
        assert!(jump.boosting);
        let before = jump.velocity_y;
        integrate_jump(&mut jump, 300.0, false, false, &p);
        assert!(!jump.boosting);
        assert!((jump.velocity_y - (before + p.gravity)).abs() < 1e-4);
    }
}
