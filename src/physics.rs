//! Physics collaborator boundary. The arena consumes poses and velocities,
//! applies forces and rotation deltas, and asks for overlap queries; what
//! integrates underneath is not its concern. `KinematicPhysics` is the
//! in-repo stand-in used by the driver and tests, not a physics engine.

use crate::types::{AgentId, Pose};
use glam::Vec3;
use std::collections::HashMap;

/// Pose and velocity of one body, read each tick.
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub pose: Pose,
    pub velocity: Vec3,
}

/// Interface the simulation consumes from the physics/scene collaborator.
pub trait Physics {
    /// Activate a body for an agent. Replaces any existing body for the id.
    fn add_body(&mut self, id: AgentId, radius: f32, pose: Pose);

    fn remove_body(&mut self, id: AgentId);

    fn body(&self, id: AgentId) -> Option<BodyState>;

    /// Queue a world-space acceleration to integrate on the next `step`.
    fn apply_force(&mut self, id: AgentId, accel: Vec3);

    /// Apply a yaw delta immediately.
    fn rotate(&mut self, id: AgentId, yaw_delta: f32);

    /// Move a body and zero its velocities; used on episode reset.
    fn teleport(&mut self, id: AgentId, pose: Pose);

    /// Integrate queued forces over `dt`.
    fn step(&mut self, dt: f32);

    /// Bodies whose centers lie within `radius` of `center`, nearest first
    /// (ties by id) so hit resolution is deterministic.
    fn overlaps(&self, center: Vec3, radius: f32) -> Vec<AgentId>;
}

#[derive(Debug, Clone)]
struct Body {
    pose: Pose,
    velocity: Vec3,
    pending_accel: Vec3,
    radius: f32,
}

/// Semi-implicit Euler integrator with linear drag. Good enough to exercise
/// the combat loop; swap in a real engine behind the same trait.
#[derive(Debug, Default)]
pub struct KinematicPhysics {
    bodies: HashMap<AgentId, Body>,
    drag: f32,
}

impl KinematicPhysics {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            drag: 2.0,
        }
    }
}

impl Physics for KinematicPhysics {
    fn add_body(&mut self, id: AgentId, radius: f32, pose: Pose) {
        self.bodies.insert(
            id,
            Body {
                pose,
                velocity: Vec3::ZERO,
                pending_accel: Vec3::ZERO,
                radius,
            },
        );
    }

    fn remove_body(&mut self, id: AgentId) {
        self.bodies.remove(&id);
    }

    fn body(&self, id: AgentId) -> Option<BodyState> {
        self.bodies.get(&id).map(|b| BodyState {
            pose: b.pose,
            velocity: b.velocity,
        })
    }

    fn apply_force(&mut self, id: AgentId, accel: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pending_accel += accel;
        }
    }

    fn rotate(&mut self, id: AgentId, yaw_delta: f32) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pose.yaw = (body.pose.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        }
    }

    fn teleport(&mut self, id: AgentId, pose: Pose) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pose = pose;
            body.velocity = Vec3::ZERO;
            body.pending_accel = Vec3::ZERO;
        }
    }

    fn step(&mut self, dt: f32) {
        for body in self.bodies.values_mut() {
            body.velocity += body.pending_accel * dt;
            body.velocity *= (1.0 - self.drag * dt).max(0.0);
            body.pose.position += body.velocity * dt;
            body.pending_accel = Vec3::ZERO;
        }
    }

    fn overlaps(&self, center: Vec3, radius: f32) -> Vec<AgentId> {
        let mut hits: Vec<(f32, AgentId)> = self
            .bodies
            .iter()
            .filter_map(|(&id, body)| {
                let dist = center.distance(body.pose.position);
                (dist <= radius + body.radius).then_some((dist, id))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.0.cmp(&b.1.0)));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_integrates_into_motion() {
        let mut physics = KinematicPhysics::new();
        physics.add_body(AgentId(0), 0.5, Pose::default());
        physics.apply_force(AgentId(0), Vec3::new(0.0, 0.0, 10.0));
        physics.step(0.1);
        let state = physics.body(AgentId(0)).unwrap();
        assert!(state.pose.position.z > 0.0);
        assert!(state.velocity.z > 0.0);
    }

    #[test]
    fn test_teleport_zeroes_velocity() {
        let mut physics = KinematicPhysics::new();
        physics.add_body(AgentId(0), 0.5, Pose::default());
        physics.apply_force(AgentId(0), Vec3::new(5.0, 0.0, 0.0));
        physics.step(0.1);
        physics.teleport(AgentId(0), Pose::new(Vec3::new(1.0, 0.5, 1.0), 0.0));
        let state = physics.body(AgentId(0)).unwrap();
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.pose.position, Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn test_overlaps_sorted_nearest_first() {
        let mut physics = KinematicPhysics::new();
        physics.add_body(AgentId(0), 0.5, Pose::default());
        physics.add_body(AgentId(1), 0.5, Pose::new(Vec3::new(2.0, 0.0, 0.0), 0.0));
        physics.add_body(AgentId(2), 0.5, Pose::new(Vec3::new(1.0, 0.0, 0.0), 0.0));
        physics.add_body(AgentId(3), 0.5, Pose::new(Vec3::new(50.0, 0.0, 0.0), 0.0));
        let hits = physics.overlaps(Vec3::ZERO, 3.0);
        assert_eq!(hits, vec![AgentId(0), AgentId(2), AgentId(1)]);
    }

    #[test]
    fn test_rotate_wraps_yaw() {
        let mut physics = KinematicPhysics::new();
        physics.add_body(AgentId(0), 0.5, Pose::default());
        physics.rotate(AgentId(0), std::f32::consts::TAU + 0.25);
        let state = physics.body(AgentId(0)).unwrap();
        assert!((state.pose.yaw - 0.25).abs() < 1e-5);
    }
}
