//! Scripted control policies for driving agents without a learned model:
//! a uniform-random baseline and a reactive chase-and-strike opponent.

use crate::action::Action;
use crate::observation::Observation;
use rand::Rng;

/// Maps an observation to an action, once per tick.
pub trait Policy {
    fn act(&mut self, obs: &Observation) -> Action;
}

/// Uniform noise over the action space. Useful as a sparring dummy and as a
/// sanity baseline for reward tuning.
#[derive(Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> Action {
        let mut rng = rand::rng();
        Action::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_bool(0.2),
        )
    }
}

/// Reactive chase behavior: turn toward the nearest enemy, close distance,
/// and swing once within striking range. Falls back to a slow wander with
/// turn jitter when no enemy is observed.
#[derive(Debug, Clone)]
pub struct ChasePolicy {
    /// Normalized distance under which the policy starts attacking.
    pub strike_dist_norm: f32,
    /// Steering gain on the lateral enemy direction component.
    pub turn_gain: f32,
}

impl Default for ChasePolicy {
    fn default() -> Self {
        Self {
            strike_dist_norm: 0.08,
            turn_gain: 2.0,
        }
    }
}

impl Policy for ChasePolicy {
    fn act(&mut self, obs: &Observation) -> Action {
        let no_enemy = obs.enemy_dir_local_x == 0.0
            && obs.enemy_dir_local_z == 0.0
            && obs.dist_norm >= 1.0;
        if no_enemy {
            let mut rng = rand::rng();
            return Action::new(0.0, 0.5, rng.random_range(-0.3..=0.3), false);
        }

        let turn = (obs.enemy_dir_local_x * self.turn_gain).clamp(-1.0, 1.0);
        // Ease off the throttle near the target so the swing lands instead
        // of overshooting.
        let forward = if obs.dist_norm > self.strike_dist_norm {
            1.0
        } else {
            0.2
        };
        let attack = obs.dist_norm <= self.strike_dist_norm && obs.enemy_dir_local_z > 0.0;
        Action::new(0.0, forward, turn, attack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pose;
    use glam::Vec3;

    fn obs_with_enemy(position: Vec3) -> Observation {
        Observation::encode(
            1.0,
            &Pose::default(),
            Vec3::ZERO,
            Some(crate::observation::EnemyView {
                position,
                health_frac: 1.0,
            }),
            20.0,
        )
    }

    #[test]
    fn test_chase_turns_toward_enemy() {
        let mut policy = ChasePolicy::default();
        // Enemy to the right: positive local x, so turn right.
        let action = policy.act(&obs_with_enemy(Vec3::new(10.0, 0.0, 0.0)));
        assert!(action.turn > 0.0);
        assert!(action.forward > 0.0);
        assert!(!action.attack);
    }

    #[test]
    fn test_chase_attacks_in_range() {
        let mut policy = ChasePolicy::default();
        let action = policy.act(&obs_with_enemy(Vec3::new(0.0, 0.0, 1.0)));
        assert!(action.attack);
    }

    #[test]
    fn test_chase_wanders_without_enemy() {
        let mut policy = ChasePolicy::default();
        let obs = Observation::encode(1.0, &Pose::default(), Vec3::ZERO, None, 20.0);
        let action = policy.act(&obs);
        assert!(!action.attack);
        assert!(action.forward > 0.0);
    }

    #[test]
    fn test_random_policy_is_in_range() {
        let mut policy = RandomPolicy;
        let obs = Observation::encode(1.0, &Pose::default(), Vec3::ZERO, None, 20.0);
        for _ in 0..100 {
            let action = policy.act(&obs);
            assert!((-1.0..=1.0).contains(&action.forward));
            assert!((-1.0..=1.0).contains(&action.strafe));
            assert!((-1.0..=1.0).contains(&action.turn));
        }
    }
}
