//! Configuration surface of the queue and its add-ons.

use crate::math::Vec3;
use std::error::Error;
use std::fmt;

/// Rectangular playfield in scene-local coordinates, plus the point
/// spectators get teleported to.
#[derive(Debug, Clone, PartialEq)]
pub struct GameArea {
    pub top_left: Vec3,
    pub bottom_right: Vec3,
    pub exit: Vec3,
}

/// Everything the host scene can tune. `Default` gives a queue with no turn
/// limits and no play-area enforcement.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum turn duration in milliseconds. `None` disables the limit.
    pub max_turn_ms: Option<u64>,
    /// Inactivity timeout in milliseconds. `None` disables the limit.
    pub inactivity_timeout_ms: Option<u64>,
    /// Playfield rectangle and exit point. `None` disables area enforcement.
    pub game_area: Option<GameArea>,
    /// Scene-level yaw offset in degrees; affects area coordinates only.
    pub scene_rotation_deg: f32,
    /// Center the scene rotation pivots around.
    pub area_center: Vec3,
    /// How long a departure notice is held before the entry is removed.
    pub departure_grace_ms: u64,
    /// How long an active player may stay outside the area before forfeiting.
    pub area_exit_grace_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_turn_ms: None,
            inactivity_timeout_ms: None,
            game_area: None,
            scene_rotation_deg: 0.0,
            area_center: Vec3::new(8.0, 0.0, 8.0),
            departure_grace_ms: 2000,
            area_exit_grace_ms: 2000,
        }
    }
}

/// A rejected configuration. These are host-scene programming errors, so the
/// engine refuses to construct rather than limping along.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroTimeout(&'static str),
    DegenerateArea,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroTimeout(field) => {
                write!(f, "{} must be positive; use None to disable the limit", field)
            }
            ConfigError::DegenerateArea => {
                write!(f, "game area corners must span a rectangle on the XZ plane")
            }
        }
    }
}

impl Error for ConfigError {}

impl QueueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turn_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout("max_turn_ms"));
        }
        if self.inactivity_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout("inactivity_timeout_ms"));
        }
        if let Some(area) = &self.game_area {
            if area.top_left.x == area.bottom_right.x || area.top_left.z == area.bottom_right.z {
                return Err(ConfigError::DegenerateArea);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(QueueConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = QueueConfig {
            max_turn_ms: Some(0),
            ..QueueConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("max_turn_ms"))
        );

        let config = QueueConfig {
            inactivity_timeout_ms: Some(0),
            ..QueueConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("inactivity_timeout_ms"))
        );
    }

    #[test]
    fn test_degenerate_area_rejected() {
        let config = QueueConfig {
            game_area: Some(GameArea {
                top_left: Vec3::new(4.0, 0.0, 4.0),
                bottom_right: Vec3::new(4.0, 0.0, 12.0),
                exit: Vec3::ZERO,
            }),
            ..QueueConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DegenerateArea));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ConfigError::ZeroTimeout("max_turn_ms");
        assert!(err.to_string().contains("max_turn_ms"));
    }
}
