//! Sprite-sheet animation timer
//!
//! Every animated entity carries an [`AnimData`]: the source rectangle inside
//! its sprite sheet, its on-screen position, and a small frame timer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Per-entity animation and position record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimData {
    /// Source rectangle within the sprite sheet (size = one frame)
    pub rec: Rect,
    /// Top-left corner on screen
    pub pos: Vec2,
    /// Frame index that will be shown on the next advance
    pub frame: u32,
    /// Seconds each frame stays on screen
    pub update_time: f32,
    /// Seconds accumulated since the last frame change
    pub running_time: f32,
}

impl AnimData {
    pub fn new(rec: Rect, pos: Vec2, update_time: f32) -> Self {
        Self {
            rec,
            pos,
            frame: 0,
            update_time,
            running_time: 0.0,
        }
    }

    /// Advance the frame timer by `dt`
    ///
    /// When the timer expires the source rectangle moves to the column of the
    /// current frame and the frame index steps forward, wrapping after
    /// `max_frame`. At most one frame is advanced per call.
    pub fn update(&mut self, dt: f32, max_frame: u32) {
        self.running_time += dt;
        if self.running_time >= self.update_time {
            self.running_time = 0.0;
            self.rec.x = self.frame as f32 * self.rec.width;
            self.frame = (self.frame + 1) % (max_frame + 1);
        }
    }

    /// Restart the animation from its first frame
    pub fn rewind(&mut self) {
        self.frame = 0;
        self.running_time = 0.0;
    }

    /// Size of one frame on screen
    #[inline]
    pub fn frame_size(&self) -> Vec2 {
        self.rec.size()
    }

    /// On-screen rectangle covered by the current frame
    pub fn screen_rect(&self) -> Rect {
        Rect::at(self.pos, self.frame_size())
    }
}
