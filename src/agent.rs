//! Per-agent episode lifecycle: AwaitingReset -> Active -> Terminal, looping
//! back to AwaitingReset. The agent owns its health, weapon, and reward
//! accumulator; cross-agent consequences of a hit are resolved by the arena.

use crate::error::SimError;
use crate::health::{DamageOutcome, HealthPool};
use crate::physics::Physics;
use crate::reward::{RewardConfig, RewardShaper};
use crate::types::{AgentId, ArenaBounds, Pose};
use crate::weapon::{SwingConfig, WeaponSwing};
use glam::Vec3;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    AwaitingReset,
    Active,
    Terminal,
}

/// Why an episode ended. Timeouts carry no terminal reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    Defeated,
    Fell,
    TimedOut,
}

/// Where an agent respawns at episode start. Explicit configuration, no
/// scene lookup.
#[derive(Debug, Clone, Copy)]
pub enum SpawnMode {
    Fixed(Pose),
    RandomInBounds,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub max_hp: i32,
    pub max_steps: usize,
    pub spawn: SpawnMode,
    /// Acceleration applied per unit of movement action.
    pub move_accel: f32,
    /// Turn rate in radians per second at full turn action.
    pub turn_speed: f32,
    pub body_radius: f32,
    /// `None` means unarmed.
    pub weapon: Option<SwingConfig>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_hp: 5,
            max_steps: 500,
            spawn: SpawnMode::RandomInBounds,
            move_accel: 4.0,
            turn_speed: std::f32::consts::PI,
            body_radius: 0.5,
            weapon: Some(SwingConfig::default()),
        }
    }
}

pub struct CombatAgent {
    id: AgentId,
    config: AgentConfig,
    phase: AgentPhase,
    health: HealthPool,
    weapon: Option<WeaponSwing>,
    reward: RewardShaper,
    steps: usize,
    prev_enemy_dist: Option<f32>,
    target: Option<AgentId>,
    terminal_reason: Option<TerminalReason>,
}

impl CombatAgent {
    pub fn new(id: AgentId, config: AgentConfig, reward_config: RewardConfig) -> Self {
        let health = HealthPool::new(config.max_hp);
        let weapon = config.weapon.clone().map(WeaponSwing::new);
        Self {
            id,
            config,
            phase: AgentPhase::AwaitingReset,
            health,
            weapon,
            reward: RewardShaper::new(reward_config),
            steps: 0,
            prev_enemy_dist: None,
            target: None,
            terminal_reason: None,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn health(&self) -> &HealthPool {
        &self.health
    }

    pub fn weapon(&self) -> Option<&WeaponSwing> {
        self.weapon.as_ref()
    }

    pub fn weapon_mut(&mut self) -> Option<&mut WeaponSwing> {
        self.weapon.as_mut()
    }

    pub fn episode_return(&self) -> f32 {
        self.reward.episode_return()
    }

    pub fn tick_reward(&self) -> f32 {
        self.reward.tick_delta()
    }

    pub fn target(&self) -> Option<AgentId> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<AgentId>) {
        self.target = target;
    }

    pub fn terminal_reason(&self) -> Option<TerminalReason> {
        self.terminal_reason
    }

    /// Start a fresh episode: respawn with zeroed velocity, full health,
    /// idle weapon, cleared counters and return. Idempotent between steps.
    pub fn reset(&mut self, physics: &mut dyn Physics, bounds: &ArenaBounds) {
        let pose = match self.config.spawn {
            SpawnMode::Fixed(pose) => pose,
            SpawnMode::RandomInBounds => {
                let mut rng = rand::rng();
                let x = rng.random_range(-bounds.half_extents.x..=bounds.half_extents.x);
                let z = rng.random_range(-bounds.half_extents.z..=bounds.half_extents.z);
                let yaw = rng.random_range(0.0..std::f32::consts::TAU);
                Pose::new(bounds.center + Vec3::new(x, 0.0, z), yaw)
            }
        };
        physics.teleport(self.id, pose);

        self.health.reset();
        if let Some(weapon) = &mut self.weapon {
            weapon.reset();
        }
        self.reward.begin_episode();
        self.steps = 0;
        self.prev_enemy_dist = None;
        self.target = None;
        self.terminal_reason = None;
        self.phase = AgentPhase::Active;
    }

    /// Open the agent's tick: phase contract check, step count, time penalty.
    pub fn begin_step(&mut self) -> Result<(), SimError> {
        if self.phase != AgentPhase::Active {
            return Err(SimError::AgentNotActive(self.id));
        }
        self.steps += 1;
        self.reward.begin_tick();
        self.reward.step_penalty();
        Ok(())
    }

    pub fn apply_damage(&mut self, amount: i32) -> Result<DamageOutcome, SimError> {
        self.health.apply_damage(amount)
    }

    pub fn note_landed_hit(&mut self, removed_frac: f32) {
        self.reward.landed_hit(removed_frac);
    }

    pub fn note_got_hit(&mut self, removed_frac: f32) {
        self.reward.got_hit(removed_frac);
    }

    /// Kill credited to the opponent: loss penalty plus episode end. The
    /// attacker's episode continues.
    pub fn defeat(&mut self) {
        self.reward.lose();
        self.phase = AgentPhase::Terminal;
        self.terminal_reason = Some(TerminalReason::Defeated);
        debug!(agent = %self.id, "defeated");
    }

    /// Kill bonus for the attacker. Not a terminal transition.
    pub fn note_win(&mut self) {
        self.reward.win();
        debug!(agent = %self.id, "won the exchange");
    }

    /// Fell below the arena floor: terminal with the boundary penalty,
    /// independent of combat state.
    pub fn fall(&mut self) {
        self.reward.fall();
        self.phase = AgentPhase::Terminal;
        self.terminal_reason = Some(TerminalReason::Fell);
        debug!(agent = %self.id, "fell out of the arena");
    }

    /// Step budget exhausted: force-terminate with no terminal reward.
    pub fn timeout(&mut self) {
        self.phase = AgentPhase::Terminal;
        self.terminal_reason = Some(TerminalReason::TimedOut);
        debug!(agent = %self.id, steps = self.steps, "episode timed out");
    }

    pub fn out_of_bounds_penalty(&mut self) {
        self.reward.out_of_bounds();
    }

    /// Distance-to-enemy shaping against the previous tick's cached value.
    /// The first tick after reset only primes the cache.
    pub fn distance_shaping(&mut self, dist: f32) {
        if let Some(prev) = self.prev_enemy_dist {
            self.reward.distance_delta(prev, dist);
        }
        self.prev_enemy_dist = Some(dist);
    }

    pub fn approach_shaping(&mut self, v_toward: f32) {
        self.reward.approach(v_toward);
    }

    pub fn facing_shaping(&mut self, alignment: f32) {
        self.reward.facing(alignment);
    }

    pub fn timed_out_over(&self, max_steps: usize) -> bool {
        self.steps >= max_steps.min(self.config.max_steps)
    }
}
