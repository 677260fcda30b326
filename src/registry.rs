//! Registry of live combatants and the nearest-enemy query used by both
//! targeting and observation encoding.

use crate::types::AgentId;
use glam::Vec3;

/// Identity-only roster of active agents, kept in registration order.
/// Positions are supplied by the caller at query time so the registry never
/// holds stale pose state.
#[derive(Debug, Default)]
pub struct EnemyRegistry {
    agents: Vec<AgentId>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: AgentId) {
        if !self.agents.contains(&id) {
            self.agents.push(id);
        }
    }

    pub fn unregister(&mut self, id: AgentId) {
        self.agents.retain(|a| *a != id);
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().copied()
    }

    /// Nearest registered agent to `from`, excluding `from` itself. Ties
    /// break toward the earlier registration, so the scan is deterministic.
    /// Returns `None` when `from` is the only registered agent.
    pub fn find_nearest<F>(&self, from: AgentId, position_of: F) -> Option<AgentId>
    where
        F: Fn(AgentId) -> Vec3,
    {
        let origin = position_of(from);
        let mut best: Option<(AgentId, f32)> = None;

        for &id in &self.agents {
            if id == from {
                continue;
            }
            let dist = origin.distance(position_of(id));
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((id, dist)),
            }
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(id: AgentId) -> Vec3 {
        match id.0 {
            0 => Vec3::new(0.0, 0.0, 0.0),
            1 => Vec3::new(3.0, 0.0, 0.0),
            2 => Vec3::new(1.0, 0.0, 0.0),
            _ => Vec3::new(100.0, 0.0, 0.0),
        }
    }

    #[test]
    fn test_find_nearest_excludes_self() {
        let mut registry = EnemyRegistry::new();
        registry.register(AgentId(0));
        registry.register(AgentId(1));
        let nearest = registry.find_nearest(AgentId(0), positions);
        assert_eq!(nearest, Some(AgentId(1)));
    }

    #[test]
    fn test_find_nearest_none_when_alone() {
        let mut registry = EnemyRegistry::new();
        registry.register(AgentId(0));
        assert_eq!(registry.find_nearest(AgentId(0), positions), None);
    }

    #[test]
    fn test_find_nearest_picks_minimum_distance() {
        let mut registry = EnemyRegistry::new();
        registry.register(AgentId(0));
        registry.register(AgentId(1));
        registry.register(AgentId(2));
        assert_eq!(registry.find_nearest(AgentId(0), positions), Some(AgentId(2)));
    }

    #[test]
    fn test_find_nearest_tie_breaks_by_registration_order() {
        // Two enemies at identical distance: the first registered wins.
        let mut registry = EnemyRegistry::new();
        registry.register(AgentId(0));
        registry.register(AgentId(1));
        registry.register(AgentId(2));
        let equidistant = |id: AgentId| match id.0 {
            0 => Vec3::ZERO,
            1 => Vec3::new(2.0, 0.0, 0.0),
            _ => Vec3::new(-2.0, 0.0, 0.0),
        };
        assert_eq!(
            registry.find_nearest(AgentId(0), equidistant),
            Some(AgentId(1))
        );
    }

    #[test]
    fn test_unregister_removes_from_scan() {
        let mut registry = EnemyRegistry::new();
        registry.register(AgentId(0));
        registry.register(AgentId(2));
        registry.unregister(AgentId(2));
        assert_eq!(registry.find_nearest(AgentId(0), positions), None);
    }
}
