//! Optional play-area enforcement.
//!
//! Keeps spectators out of the playfield and forfeits the turn of an active
//! player who has walked away. The area is defined in scene-local
//! coordinates; the local player's world position is un-rotated before the
//! containment check, and the exit point is rotated into world space before
//! teleporting.

use crate::config::{GameArea, QueueConfig};
use crate::math::{is_inside_area, rotate_around_center, Vec3};

/// What the host should do with the local avatar this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaAction {
    /// A spectator is standing in the playfield; move them to the exit point
    /// (already rotated into world coordinates).
    TeleportOut(Vec3),
    /// The active player has been outside the area past the grace period;
    /// force the turn to advance.
    EndTurn,
}

pub struct AreaEnforcer {
    area: GameArea,
    center: Vec3,
    rotation_deg: f32,
    grace_ms: u64,
    timer: f32,
    /// When the active player was first seen outside the area. The grace
    /// period tolerates teleport and movement latency.
    outside_since: Option<u64>,
}

impl AreaEnforcer {
    pub fn new(area: GameArea, center: Vec3, rotation_deg: f32, grace_ms: u64) -> Self {
        Self {
            area,
            center,
            rotation_deg,
            grace_ms,
            timer: 0.0,
            outside_since: None,
        }
    }

    /// Builds an enforcer if the config declares a play area.
    pub fn from_config(config: &QueueConfig) -> Option<Self> {
        config.game_area.clone().map(|area| {
            Self::new(
                area,
                config.area_center,
                config.scene_rotation_deg,
                config.area_exit_grace_ms,
            )
        })
    }

    /// Per-frame entry point; the containment check runs roughly once per
    /// second of accumulated frame time.
    pub fn tick(
        &mut self,
        dt: f32,
        position: Vec3,
        local_active: bool,
        now_ms: u64,
    ) -> Option<AreaAction> {
        self.timer += dt;
        if self.timer < 1.0 {
            return None;
        }
        self.timer = 0.0;
        self.evaluate(position, local_active, now_ms)
    }

    /// The actual containment check, independent of the tick gate.
    pub fn evaluate(
        &mut self,
        position: Vec3,
        local_active: bool,
        now_ms: u64,
    ) -> Option<AreaAction> {
        let local_pos = rotate_around_center(position, self.center, -self.rotation_deg);
        let inside = is_inside_area(local_pos, self.area.top_left, self.area.bottom_right);

        if inside {
            self.outside_since = None;
            if !local_active {
                let exit = rotate_around_center(self.area.exit, self.center, self.rotation_deg);
                return Some(AreaAction::TeleportOut(exit));
            }
        } else if local_active {
            let since = *self.outside_since.get_or_insert(now_ms);
            if now_ms.saturating_sub(since) > self.grace_ms {
                self.outside_since = None;
                return Some(AreaAction::EndTurn);
            }
        } else {
            self.outside_since = None;
        }
        None
    }
}
