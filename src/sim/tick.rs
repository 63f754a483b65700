//! Per-frame simulation step
//!
//! The main loop is a four-state machine:
//! Intro → Playing → {GameOver, Win} → Playing (on restart).

use super::collision::any_collision;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
///
/// All flags are edge-triggered: true only on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Leave the intro screen
    pub start: bool,
    /// Jump (or jump again while airborne)
    pub jump: bool,
    /// Start a new round after a loss or win
    pub restart: bool,
}

/// Advance the game by `dt` seconds
///
/// Returns the new phase if this tick changed it.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Option<GamePhase> {
    let before = state.phase;

    match state.phase {
        GamePhase::Intro => {
            if input.start {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => step_playing(state, input, dt),
        GamePhase::GameOver | GamePhase::Win => {
            if input.restart {
                state.reset();
            }
        }
    }

    if state.phase != before {
        log::info!("Phase {} -> {}", before.as_str(), state.phase.as_str());
        Some(state.phase)
    } else {
        None
    }
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    state.round_ticks += 1;

    state
        .parallax
        .update(dt, &state.stage.layer_widths, &state.tuning.layer_speeds);

    let ground_y = state.ground_y();
    state.player.step(input.jump, dt, &state.tuning, ground_y);

    let hazard_max_frame = state.tuning.hazard_sheet.max_frame();
    for (hazard, velocity) in state.hazards.iter_mut().zip(&state.hazard_velocities) {
        hazard.pos.x += velocity * dt;
        hazard.update(dt, hazard_max_frame);
    }

    let collided = any_collision(
        &state.player.anim,
        &state.hazards,
        state.tuning.collision_inset,
    );

    state.finish_line += state.finish_velocity() * dt;

    if collided {
        state.phase = GamePhase::GameOver;
        log::info!("Hit with {:.0}px left to the finish", state.distance_to_finish());
    }
    // Crossing the line on the same frame as a hit still counts as a win
    if state.player.anim.pos.x >= state.finish_line {
        state.phase = GamePhase::Win;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Stage;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn stage() -> Stage {
        Stage {
            width: 1024.0,
            height: 760.0,
            player_frame: Vec2::new(128.0, 128.0),
            hazard_frame: Vec2::new(100.0, 100.0),
            layer_widths: [1024.0, 1024.0, 1408.0],
        }
    }

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, stage(), Tuning::default());
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &start, SIM_DT), Some(GamePhase::Playing));
        state
    }

    #[test]
    fn test_intro_waits_for_start() {
        let mut state = GameState::new(1, stage(), Tuning::default());
        let hazard_x = state.hazards[0].pos.x;

        // Jump and restart are ignored on the intro screen
        let input = TickInput {
            jump: true,
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input, SIM_DT), None);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.hazards[0].pos.x, hazard_x);
        assert_eq!(state.parallax.offsets, [0.0; 3]);
    }

    #[test]
    fn test_playing_scrolls_world() {
        let mut state = playing_state(1);
        let hazard_x = state.hazards[0].pos.x;
        let finish = state.finish_line;

        tick(&mut state, &TickInput::default(), SIM_DT);

        let moved = state.hazard_velocities[0] * SIM_DT;
        assert!((state.hazards[0].pos.x - (hazard_x + moved)).abs() < 1e-3);
        assert!((state.finish_line - (finish + moved)).abs() < 1e-3);
        assert!(state.parallax.offsets.iter().all(|o| *o < 0.0));
        assert_eq!(state.round_ticks, 1);
    }

    #[test]
    fn test_hazards_move_at_own_velocity() {
        let mut state = playing_state(1);
        state.hazard_velocities[1] = -300.0;
        let last = state.hazards.len() - 1;
        state.hazard_velocities[last] = -900.0;
        let x0 = state.hazards[0].pos.x;
        let x1 = state.hazards[1].pos.x;
        let finish = state.finish_line;

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!((state.hazards[0].pos.x - (x0 - 600.0 * SIM_DT)).abs() < 1e-3);
        assert!((state.hazards[1].pos.x - (x1 - 300.0 * SIM_DT)).abs() < 1e-3);
        // Finish line follows the last hazard
        assert!((state.finish_line - (finish - 900.0 * SIM_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_idle_player_hits_first_hazard() {
        let mut state = playing_state(1);
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 600 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        // First hazard starts at the right edge, ~2/3 s away at 600 px/s
        assert!(ticks < 60, "took {} ticks", ticks);
    }

    #[test]
    fn test_crossing_finish_line_wins() {
        let mut state = playing_state(1);
        // Clear the path and bring the finish line right up to the player
        let far = -10_000.0;
        for hazard in &mut state.hazards {
            hazard.pos.x = far;
        }
        state.finish_line = state.player.anim.pos.x + 5.0;

        assert_eq!(
            tick(&mut state, &TickInput::default(), SIM_DT),
            Some(GamePhase::Win)
        );
    }

    #[test]
    fn test_win_takes_precedence_over_hit() {
        let mut state = playing_state(1);
        let player_pos = state.player.anim.pos;
        state.hazards[0].pos = player_pos;
        state.finish_line = player_pos.x;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = playing_state(9);
        state.phase = GamePhase::GameOver;

        // Other keys do nothing on the game-over screen
        let input = TickInput {
            start: true,
            jump: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &input, SIM_DT), None);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(
            tick(&mut state, &restart, SIM_DT),
            Some(GamePhase::Playing)
        );
        assert_eq!(state.round_ticks, 0);
        assert_eq!(state.hazards[0].pos.x, 1024.0);
    }

    #[test]
    fn test_restart_from_win() {
        let mut state = playing_state(9);
        state.phase = GamePhase::Win;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_jump_clears_first_hazard() {
        let mut state = playing_state(3);
        let mut ticks = 0;
        // Jump when the first hazard is close, then keep running
        while ticks < 70 && state.phase == GamePhase::Playing {
            let gap = state.hazards[0].pos.x - state.player.anim.pos.x;
            let input = TickInput {
                jump: gap > 0.0 && gap < 260.0 && state.player.jumps == 0,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.hazards[0].pos.x + 100.0 < state.player.anim.pos.x);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing_state(99_999);
        let mut b = playing_state(99_999);
        let inputs = [
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
        ];
        for input in inputs.iter().cycle().take(40) {
            tick(&mut a, input, SIM_DT);
            tick(&mut b, input, SIM_DT);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.anim.pos, b.player.anim.pos);
        assert_eq!(a.finish_line, b.finish_line);
    }
}
