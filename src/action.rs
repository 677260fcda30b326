//! Action decoding: three continuous channels in [-1, 1] plus a discrete
//! attack flag. Shape mismatches are caller bugs and fail fast.

use crate::error::SimError;

/// Number of continuous action channels: strafe, forward, turn.
pub const CONTINUOUS_ACTIONS: usize = 3;
/// Number of discrete action channels: attack intent.
pub const DISCRETE_ACTIONS: usize = 1;

/// One agent's control input for a tick. Continuous values are clamped to
/// [-1, 1] on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    pub strafe: f32,
    pub forward: f32,
    pub turn: f32,
    pub attack: bool,
}

impl Action {
    pub fn new(strafe: f32, forward: f32, turn: f32, attack: bool) -> Self {
        Self {
            strafe: strafe.clamp(-1.0, 1.0),
            forward: forward.clamp(-1.0, 1.0),
            turn: turn.clamp(-1.0, 1.0),
            attack,
        }
    }

    /// Decode from raw policy output buffers, validating shape.
    pub fn from_slices(continuous: &[f32], discrete: &[i32]) -> Result<Self, SimError> {
        if continuous.len() != CONTINUOUS_ACTIONS {
            return Err(SimError::BadActionShape {
                expected: CONTINUOUS_ACTIONS,
                got: continuous.len(),
            });
        }
        if discrete.len() != DISCRETE_ACTIONS {
            return Err(SimError::BadActionShape {
                expected: DISCRETE_ACTIONS,
                got: discrete.len(),
            });
        }
        Ok(Self::new(
            continuous[0],
            continuous[1],
            continuous[2],
            discrete[0] != 0,
        ))
    }

    /// Stand still, no attack.
    pub fn idle() -> Self {
        Self::new(0.0, 0.0, 0.0, false)
    }
}
