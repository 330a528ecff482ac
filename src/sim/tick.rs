//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically.

use super::player::Controls;
use super::state::{GamePhase, GameState};
use super::tiles::TileLookup;
use crate::consts::*;
use crate::{camera_for, cell_of};

/// Input commands for a single tick (deterministic)
///
/// `*_pressed` fields are edges: true only on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
    /// Only honoured once the run has ended
    pub restart_pressed: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            left: self.left,
            right: self.right,
            jump_held: self.jump_held,
            jump_pressed: self.jump_pressed,
            dash_pressed: self.dash_pressed,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase.is_terminal() {
        if input.restart_pressed {
            state.restart();
        }
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        *input
    };

    state.time_ticks += 1;

    let tuning = state.rules.player;
    state.player.update(&input.controls(), &tuning, &state.tiles);

    if state.player.pos().x >= GOAL_X {
        end_run(state, GamePhase::GameClear);
    }

    state.camera_x = camera_for(state.player.pos().x);

    // Enemies well outside the viewport stay frozen
    let camera_x = state.camera_x;
    // A run cleared this tick can no longer be lost to a touch
    let ended = state.phase.is_terminal();
    let mut hit = false;
    for enemy in state
        .enemies
        .iter_mut()
        .filter(|e| in_update_window(e.pos.x - camera_x))
    {
        enemy.update();
        if !ended {
            hit |= state.player.check_enemy_hit(enemy);
        }
    }
    if hit {
        end_run(state, GamePhase::GameOver);
    }

    if state.rules.snowfall {
        state.snow.update(&mut state.rng, &state.tiles);
    }

    // Falling below the world also ends the run, otherwise a pit leaves it stuck
    if state.player.pos().y > WORLD_HEIGHT {
        state.player.alive = false;
        end_run(state, GamePhase::GameOver);
    }
}

#[inline]
fn in_update_window(screen_x: f32) -> bool {
    (-ENEMY_UPDATE_MARGIN..=VIEWPORT_WIDTH + ENEMY_UPDATE_MARGIN).contains(&screen_x)
}

/// Move to a terminal phase. The first outcome of a run sticks.
fn end_run(state: &mut GameState, phase: GamePhase) {
    if state.phase.is_terminal() {
        return;
    }
    state.phase = phase;
    match phase {
        GamePhase::GameClear => log::info!(
            "Level clear at tick {} (x = {:.1})",
            state.time_ticks,
            state.player.pos().x
        ),
        GamePhase::GameOver => log::info!(
            "Game over at tick {} ({:.1}, {:.1})",
            state.time_ticks,
            state.player.pos().x,
            state.player.pos().y
        ),
        GamePhase::Playing => {}
    }
}

/// Simple demo driver: run right, hop over walls, gaps and enemies
fn autopilot(state: &GameState) -> TickInput {
    let body = &state.player.body;
    let pos = body.pos;
    let tiles = &state.tiles;

    let ahead_col = cell_of(pos.x + BODY_SIZE + 4.0);
    let head_row = cell_of(pos.y);
    let feet_row = cell_of(pos.y + BODY_SIZE - 1.0);

    let contact = state.player.last_contact;
    let wall_ahead = contact.hit_wall
        || tiles.is_solid(ahead_col, head_row)
        || tiles.is_solid(ahead_col, feet_row);
    let ground_ahead = (feet_row + 1..=feet_row + 3).any(|row| tiles.is_solid(ahead_col, row));
    let enemy_ahead = state.enemies.iter().any(|e| {
        let dx = e.pos.x - pos.x;
        (0.0..BODY_SIZE * 4.0).contains(&dx) && (e.pos.y - pos.y).abs() < BODY_SIZE * 2.0
    });

    let jump_pressed = if body.grounded {
        wall_ahead || !ground_ahead || enemy_ahead
    } else {
        // Spend spare air jumps when dropping into a pit
        let ground_below = (feet_row + 1..tiles.height() as i32).any(|row| {
            tiles.is_solid(cell_of(pos.x), row)
                || tiles.is_solid(cell_of(pos.x + BODY_SIZE - 1.0), row)
        });
        body.vel.y > 1.0
            && !ground_below
            && state.player.jump_count < state.rules.player.max_jumps
    };

    TickInput {
        right: true,
        jump_held: true,
        jump_pressed,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::sim::player::PlayerTuning;
    use crate::sim::state::Rules;
    use glam::Vec2;

    /// 45x16 level with ground on the bottom two rows and enemies at `markers`
    fn flat_level(markers: &[(usize, usize)]) -> Level {
        let mut rows: Vec<Vec<char>> = vec![vec!['.'; MAP_COLS]; MAP_ROWS];
        for x in 0..MAP_COLS {
            rows[14][x] = '#';
            rows[15][x] = '#';
        }
        for &(x, y) in markers {
            rows[y][x] = 'E';
        }
        let rows: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        Level::parse("flat", &rows).unwrap()
    }

    fn classic() -> Rules {
        Rules::default()
    }

    fn holiday() -> Rules {
        Rules {
            player: PlayerTuning::holiday(),
            snowfall: true,
        }
    }

    fn place_grounded(state: &mut GameState, x: f32) {
        state.player.body.pos = Vec2::new(x, 104.0);
        state.player.body.grounded = true;
    }

    fn jump() -> TickInput {
        TickInput {
            jump_held: true,
            jump_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_falls_onto_ground_from_spawn() {
        let mut state = GameState::new(flat_level(&[]), classic(), 1);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.body.grounded);
        assert_eq!(state.player.pos().y, 104.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_triple_jump_scenario() {
        let mut state = GameState::new(flat_level(&[]), classic(), 1);
        place_grounded(&mut state, 300.0);

        tick(&mut state, &jump());
        assert_eq!(state.player.jump_count, 1);
        assert!(!state.player.body.grounded);
        assert!((state.player.body.vel.y - (-4.5 + 0.35)).abs() < 1e-6);

        for expected in 2..=3 {
            tick(&mut state, &jump());
            assert_eq!(state.player.jump_count, expected);
            assert!((state.player.body.vel.y - (-4.5 + 0.35)).abs() < 1e-6);
        }

        // Fourth press: only gravity acts
        tick(&mut state, &jump());
        assert_eq!(state.player.jump_count, 3);
        assert!((state.player.body.vel.y - (-4.5 + 0.7)).abs() < 1e-5);
    }

    #[test]
    fn test_enemy_contact_is_game_over_until_restart() {
        let mut state = GameState::new(flat_level(&[(5, 13)]), classic(), 1);
        place_grounded(&mut state, 36.0);

        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert!(!state.player.alive);

        // Nothing moves while the run is over
        let frozen = state.player.pos();
        let enemy_x = state.enemies[0].pos.x;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &right);
        }
        assert!(state.is_game_over());
        assert_eq!(state.player.pos(), frozen);
        assert_eq!(state.enemies[0].pos.x, enemy_x);

        let restart = TickInput {
            restart_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.alive);
        assert_eq!(state.player.pos(), Vec2::ZERO);
        assert_eq!(state.enemies[0].pos.x, 40.0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(flat_level(&[]), classic(), 1);
        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        let restart = TickInput {
            restart_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.time_ticks, 4);
    }

    #[test]
    fn test_reaching_goal_clears_and_stops_updates() {
        let mut state = GameState::new(Level::builtin(), classic(), 1);
        place_grounded(&mut state, 311.0);
        state.player.body.vel.x = 3.0;

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        assert!(state.is_game_clear());
        assert_eq!(state.player.pos().x, 314.0);
        assert_eq!(state.camera_x, WORLD_WIDTH - VIEWPORT_WIDTH);

        for _ in 0..10 {
            tick(&mut state, &right);
        }
        assert!(state.is_game_clear());
        assert_eq!(state.player.pos().x, 314.0);
    }

    #[test]
    fn test_goal_and_enemy_touch_on_same_tick() {
        let mut state = GameState::new(flat_level(&[(39, 13)]), classic(), 1);
        place_grounded(&mut state, 311.0);
        state.player.body.vel.x = 3.0;

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &right);
        // Enemy moved to 313 and overlaps the player at 314
        assert!(state.player.overlaps(&state.enemies[0]));
        assert!(state.is_game_clear());
        assert!(state.player.alive);
    }

    #[test]
    fn test_game_clear_accepts_restart() {
        let mut state = GameState::new(flat_level(&[]), holiday(), 1);
        state.phase = GamePhase::GameClear;
        let restart = TickInput {
            restart_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_only_nearby_enemies_update() {
        let mut state = GameState::new(flat_level(&[(20, 13), (40, 13)]), classic(), 1);
        place_grounded(&mut state, 0.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.enemies[0].pos.x, 161.0);
        assert_eq!(state.enemies[1].pos.x, 320.0);
    }

    #[test]
    fn test_falling_out_of_world_ends_run() {
        let rows = vec![".".repeat(MAP_COLS); MAP_ROWS];
        let level = Level::parse("void", &rows).unwrap();
        let mut state = GameState::new(level, classic(), 1);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.is_game_over());
        assert!(!state.player.alive);
    }

    #[test]
    fn test_snowfall_only_with_rules() {
        let mut plain = GameState::new(flat_level(&[]), classic(), 3);
        let mut snowy = GameState::new(flat_level(&[]), holiday(), 3);
        for _ in 0..30 {
            tick(&mut plain, &TickInput::default());
            tick(&mut snowy, &TickInput::default());
        }
        assert!(plain.snow.is_empty());
        assert_eq!(snowy.snow.len(), 4);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Level::builtin(), holiday(), 99999);
        let mut state2 = GameState::new(Level::builtin(), holiday(), 99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            jump(),
            TickInput {
                right: true,
                jump_held: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..200 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.snow, state2.snow);
    }

    #[test]
    fn test_autopilot_jumps_after_wall_bump() {
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        // Open flat ground: nothing to hop over
        let mut state = GameState::new(flat_level(&[]), classic(), 1);
        place_grounded(&mut state, 100.0);
        tick(&mut state, &idle);
        assert!(state.player.body.grounded);
        assert_eq!(state.player.jump_count, 0);

        // Same spot, but the last step was blocked
        let mut state = GameState::new(flat_level(&[]), classic(), 1);
        place_grounded(&mut state, 100.0);
        state.player.last_contact.hit_wall = true;
        tick(&mut state, &idle);
        assert_eq!(state.player.jump_count, 1);
        assert!(state.player.body.vel.y < 0.0);
    }

    #[test]
    fn test_idle_mode_makes_progress() {
        let mut state = GameState::new(Level::builtin(), classic(), 1);
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &idle);
        }
        assert!(state.player.pos().x > 40.0 || state.phase.is_terminal());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn camera_always_within_world(x in 0.0f32..=(WORLD_WIDTH - BODY_SIZE)) {
                let mut state = GameState::new(flat_level(&[]), classic(), 1);
                place_grounded(&mut state, x);
                tick(&mut state, &TickInput::default());
                prop_assert!(state.camera_x >= 0.0);
                prop_assert!(state.camera_x <= WORLD_WIDTH - VIEWPORT_WIDTH);
            }
        }
    }
}
