//! Observation encoding: a fixed-length feature vector over self state and
//! nearest-enemy relative state, fully defined even with no enemy present.

use crate::types::Pose;
use glam::Vec3;

/// Observation vector length. Field order is fixed:
/// `[own_health_frac, vel_local_x, vel_local_z, enemy_dir_local_x,
/// enemy_dir_local_z, dist_norm, enemy_health_frac]`.
pub const OBS_SIZE: usize = 7;

/// Nearest-enemy data needed for encoding.
#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub position: Vec3,
    pub health_frac: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub own_health_frac: f32,
    pub vel_local_x: f32,
    pub vel_local_z: f32,
    pub enemy_dir_local_x: f32,
    pub enemy_dir_local_z: f32,
    pub dist_norm: f32,
    pub enemy_health_frac: f32,
}

impl Observation {
    /// Encode self state plus optional nearest-enemy relative state.
    /// `horizon` is the distance used to normalize the enemy range. With no
    /// enemy registered the enemy slots take neutral placeholder values:
    /// direction (0, 0), distance 1, health 1.
    pub fn encode(
        own_health_frac: f32,
        pose: &Pose,
        velocity: Vec3,
        enemy: Option<EnemyView>,
        horizon: f32,
    ) -> Self {
        let vel_local = pose.world_to_local(velocity);

        let (dir_x, dir_z, dist_norm, enemy_health_frac) = match enemy {
            Some(view) => {
                let to_enemy = view.position - pose.position;
                let dir_local = pose.world_to_local(to_enemy).normalize_or_zero();
                let dist_norm = (to_enemy.length() / horizon).clamp(0.0, 1.0);
                (dir_local.x, dir_local.z, dist_norm, view.health_frac)
            }
            None => (0.0, 0.0, 1.0, 1.0),
        };

        Self {
            own_health_frac,
            vel_local_x: vel_local.x,
            vel_local_z: vel_local.z,
            enemy_dir_local_x: dir_x,
            enemy_dir_local_z: dir_z,
            dist_norm,
            enemy_health_frac,
        }
    }

    /// Flatten into the fixed field order.
    pub fn to_array(&self) -> [f32; OBS_SIZE] {
        [
            self.own_health_frac,
            self.vel_local_x,
            self.vel_local_z,
            self.enemy_dir_local_x,
            self.enemy_dir_local_z,
            self.dist_norm,
            self.enemy_health_frac,
        ]
    }
}
