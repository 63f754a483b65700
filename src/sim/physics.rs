//! Player physics: gravity, jump impulse, ground contact

use serde::{Deserialize, Serialize};

use super::anim::AnimData;
use crate::tuning::Tuning;

/// True if the bottom of the sprite has reached the ground line
#[inline]
pub fn is_on_ground(anim: &AnimData, ground_y: f32) -> bool {
    anim.pos.y >= ground_y - anim.rec.height
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub anim: AnimData,
    /// Vertical velocity (px/s, positive = down)
    pub velocity: f32,
    /// Jumps used since last touching the ground
    pub jumps: u32,
    pub in_air: bool,
}

impl Player {
    pub fn new(anim: AnimData) -> Self {
        Self {
            anim,
            velocity: 0.0,
            jumps: 0,
            in_air: false,
        }
    }

    /// Advance the player by one step
    ///
    /// Ground contact clears velocity and the jump counter; otherwise gravity
    /// accelerates the fall. A jump press is honoured while jumps remain,
    /// which allows jumping again in mid-air. The run cycle only animates on
    /// the ground.
    pub fn step(&mut self, jump_pressed: bool, dt: f32, tuning: &Tuning, ground_y: f32) {
        if is_on_ground(&self.anim, ground_y) {
            self.velocity = 0.0;
            self.in_air = false;
            self.jumps = 0;
            self.anim.pos.y = ground_y - self.anim.rec.height;
        } else {
            self.velocity += tuning.gravity * dt;
            self.in_air = true;
        }

        if jump_pressed && self.jumps < tuning.max_jumps {
            self.velocity = tuning.jump_velocity;
            self.jumps += 1;
        }

        self.anim.pos.y += self.velocity * dt;
        // Never sink below the ground line on the landing step
        self.anim.pos.y = self.anim.pos.y.min(ground_y - self.anim.rec.height);

        if !self.in_air {
            self.anim.update(dt, tuning.player_sheet.max_frame());
        }
    }

    /// Put the player back on the ground at rest
    pub fn land(&mut self, ground_y: f32) {
        self.anim.pos.y = ground_y - self.anim.rec.height;
        self.velocity = 0.0;
        self.jumps = 0;
        self.in_air = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use glam::Vec2;

    const GROUND: f32 = 760.0;
    const DT: f32 = 1.0 / 60.0;

    fn grounded_player() -> Player {
        let rec = Rect::new(0.0, 0.0, 128.0, 128.0);
        Player::new(AnimData::new(
            rec,
            Vec2::new(512.0, GROUND - 128.0),
            1.0 / 12.0,
        ))
    }

    #[test]
    fn test_is_on_ground() {
        let player = grounded_player();
        assert!(is_on_ground(&player.anim, GROUND));

        let mut above = player.anim;
        above.pos.y -= 1.0;
        assert!(!is_on_ground(&above, GROUND));
    }

    #[test]
    fn test_idle_on_ground_stays_put_and_animates() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        for _ in 0..10 {
            player.step(false, DT, &tuning, GROUND);
        }
        assert_eq!(player.anim.pos.y, GROUND - 128.0);
        assert_eq!(player.velocity, 0.0);
        assert!(!player.in_air);
        assert!(player.anim.frame > 0);
    }

    #[test]
    fn test_jump_lifts_off_and_gravity_pulls_back() {
        let tuning = Tuning::default();
        let mut player = grounded_player();

        player.step(true, DT, &tuning, GROUND);
        assert_eq!(player.jumps, 1);
        assert!(player.anim.pos.y < GROUND - 128.0);

        let v0 = player.velocity;
        player.step(false, DT, &tuning, GROUND);
        assert!(player.in_air);
        assert!(player.velocity > v0);

        // Eventually lands again
        for _ in 0..240 {
            player.step(false, DT, &tuning, GROUND);
        }
        assert!(!player.in_air);
        assert_eq!(player.jumps, 0);
        assert_eq!(player.anim.pos.y, GROUND - 128.0);
    }

    #[test]
    fn test_landing_snaps_to_ground_line() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.step(true, DT, &tuning, GROUND);

        let mut landed_on = None;
        for n in 1..240 {
            player.step(false, DT, &tuning, GROUND);
            assert!(player.anim.pos.y <= GROUND - 128.0);
            if is_on_ground(&player.anim, GROUND) {
                landed_on = Some(n);
                break;
            }
        }
        assert!(landed_on.is_some());
        assert_eq!(player.anim.pos.y, GROUND - 128.0);

        // Next step registers the contact
        player.step(false, DT, &tuning, GROUND);
        assert!(!player.in_air);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(player.anim.pos.y, GROUND - 128.0);
    }

    #[test]
    fn test_double_jump_limit() {
        let tuning = Tuning::default();
        let mut player = grounded_player();

        player.step(true, DT, &tuning, GROUND);
        player.step(false, DT, &tuning, GROUND);
        player.step(true, DT, &tuning, GROUND);
        assert_eq!(player.jumps, 2);
        assert_eq!(player.velocity, tuning.jump_velocity);

        // Third press in the air is ignored
        player.step(false, DT, &tuning, GROUND);
        player.step(true, DT, &tuning, GROUND);
        assert_eq!(player.jumps, 2);
        assert!(player.velocity > tuning.jump_velocity);
    }

    #[test]
    fn test_frozen_animation_in_air() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.step(true, DT, &tuning, GROUND);
        let frame = player.anim.frame;
        for _ in 0..10 {
            player.step(false, DT, &tuning, GROUND);
        }
        assert_eq!(player.anim.frame, frame);
    }
}
