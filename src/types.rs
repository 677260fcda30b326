//! Shared identity and geometry types for the arena.

use glam::Vec3;

/// Stable identity of a combatant, assigned by the arena on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Position plus heading. Yaw is radians around +Y, zero facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Express a world-space vector in this pose's local frame.
    pub fn world_to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.right()), v.y, v.dot(self.forward()))
    }

    /// Express a local-frame vector in world space.
    pub fn local_to_world(&self, v: Vec3) -> Vec3 {
        self.right() * v.x + Vec3::Y * v.y + self.forward() * v.z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
        }
    }
}

/// Axis-aligned arena volume. Containment is tested on x/z only; the floor
/// threshold catches bodies that fall off the platform.
#[derive(Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub floor_y: f32,
}

impl ArenaBounds {
    pub fn new(center: Vec3, half_extents: Vec3, floor_y: f32) -> Self {
        Self {
            center,
            half_extents,
            floor_y,
        }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        let p = position - self.center;
        p.x.abs() <= self.half_extents.x && p.z.abs() <= self.half_extents.z
    }

    pub fn below_floor(&self, position: Vec3) -> bool {
        position.y < self.floor_y
    }

    /// Unit direction from `position` back toward the arena center, ignoring
    /// height. Zero when already at the center.
    pub fn toward_center(&self, position: Vec3) -> Vec3 {
        let mut d = self.center - position;
        d.y = 0.0;
        d.normalize_or_zero()
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            center: Vec3::new(0.0, 0.5, 0.0),
            half_extents: Vec3::new(8.0, 1.0, 8.0),
            floor_y: -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_forward_at_zero_yaw() {
        let pose = Pose::default();
        assert!((pose.forward() - Vec3::Z).length() < 1e-6);
        assert!((pose.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_local_world_round_trip() {
        let pose = Pose::new(Vec3::new(1.0, 0.0, 2.0), 0.7);
        let v = Vec3::new(0.3, 0.0, -1.2);
        let back = pose.world_to_local(pose.local_to_world(v));
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn test_bounds_contains_ignores_height() {
        let bounds = ArenaBounds::default();
        assert!(bounds.contains(Vec3::new(7.9, 100.0, -7.9)));
        assert!(!bounds.contains(Vec3::new(8.1, 0.5, 0.0)));
    }

    #[test]
    fn test_below_floor() {
        let bounds = ArenaBounds::default();
        assert!(bounds.below_floor(Vec3::new(0.0, -1.5, 0.0)));
        assert!(!bounds.below_floor(Vec3::new(0.0, 0.5, 0.0)));
    }
}
