use scoot_engine::coords::Vec2;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;
pub const PLAYER_SIZE: f32 = 100.0;

/// Movement speed in logical pixels per second (clock-driven mode).
pub const MOVE_SPEED: f32 = 600.0;

/// Movement step in logical pixels per frame (fixed-step mode).
///
/// Deliberately frame-rate-dependent: with the cap off the player visibly
/// speeds up, which is the point of the clock toggle.
pub const FIXED_STEP: f32 = 10.0;

/// Held movement keys for one frame.
#[derive(Debug, Copy, Clone, Default)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Per-frame displacement magnitude along one axis.
///
/// Clock on: speed × dt, frame-rate-independent. Clock off: a fixed step per
/// frame regardless of dt.
pub fn speed_scalar(clock_on: bool, dt: f32) -> f32 {
    if clock_on { MOVE_SPEED * dt } else { FIXED_STEP }
}

/// The movable entity. Position is the sprite's top-left corner.
#[derive(Debug, Copy, Clone)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(100.0, 100.0),
        }
    }

    /// Applies held movement keys for one frame.
    ///
    /// Axes compose additively; diagonals are an unnormalized vector sum, so
    /// two perpendicular keys move √2 times faster than one.
    pub fn apply(&mut self, input: MoveInput, scalar: f32) {
        if input.up {
            self.pos.y -= scalar;
        }
        if input.down {
            self.pos.y += scalar;
        }
        if input.left {
            self.pos.x -= scalar;
        }
        if input.right {
            self.pos.x += scalar;
        }
    }

    /// Keeps the player fully inside the window.
    pub fn clamp(&mut self) {
        self.pos = self.pos.clamp(
            Vec2::zero(),
            Vec2::new(WINDOW_WIDTH - PLAYER_SIZE, WINDOW_HEIGHT - PLAYER_SIZE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(player: &mut Player, input: MoveInput, clock_on: bool, dt: f32) {
        let scalar = speed_scalar(clock_on, dt);
        player.apply(input, scalar);
        player.clamp();
    }

    #[test]
    fn position_stays_in_bounds_under_any_held_combination() {
        // Exhaust all 16 key combinations, running each long enough to hit
        // the walls in every direction.
        for mask in 0u8..16 {
            let input = MoveInput {
                up: mask & 1 != 0,
                down: mask & 2 != 0,
                left: mask & 4 != 0,
                right: mask & 8 != 0,
            };

            let mut player = Player::new();
            for _ in 0..200 {
                step(&mut player, input, true, 1.0 / 60.0);
                assert!(player.pos.x >= 0.0 && player.pos.x <= 700.0);
                assert!(player.pos.y >= 0.0 && player.pos.y <= 500.0);
            }
        }
    }

    #[test]
    fn clock_on_at_60fps_moves_ten_pixels() {
        let mut player = Player::new();
        step(
            &mut player,
            MoveInput {
                right: true,
                ..Default::default()
            },
            true,
            1.0 / 60.0,
        );
        assert!((player.pos.x - 110.0).abs() < 1e-4);
        assert!((player.pos.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn clock_off_moves_fixed_step_regardless_of_dt() {
        for dt in [1.0 / 240.0, 1.0 / 60.0, 1.0 / 15.0] {
            let mut player = Player::new();
            step(
                &mut player,
                MoveInput {
                    down: true,
                    ..Default::default()
                },
                false,
                dt,
            );
            assert!((player.pos.y - 110.0).abs() < 1e-4, "dt = {dt}");
        }
    }

    #[test]
    fn diagonal_is_unnormalized() {
        let mut player = Player::new();
        step(
            &mut player,
            MoveInput {
                up: true,
                left: true,
                ..Default::default()
            },
            true,
            1.0 / 60.0,
        );
        assert!((player.pos.x - 90.0).abs() < 1e-4);
        assert!((player.pos.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn clamp_stops_at_top_edge() {
        let mut player = Player::new();
        player.pos = Vec2::new(100.0, 5.0);
        step(
            &mut player,
            MoveInput {
                up: true,
                ..Default::default()
            },
            false,
            1.0 / 60.0,
        );
        assert_eq!(player.pos.y, 0.0);
    }

    #[test]
    fn double_toggle_restores_scalar_branch() {
        let dt = 1.0 / 120.0;
        let mut clock_on = true;
        let before = speed_scalar(clock_on, dt);

        clock_on = !clock_on;
        clock_on = !clock_on;

        assert_eq!(speed_scalar(clock_on, dt), before);
    }
}
