//! Arena environment: fixed-tick episode controller stepping every agent in
//! registration order, resolving combat synchronously within the tick, and
//! returning gym-style step results.

use crate::action::Action;
use crate::agent::{AgentConfig, AgentPhase, CombatAgent, TerminalReason};
use crate::error::SimError;
use crate::health::DamageOutcome;
use crate::observation::{EnemyView, Observation};
use crate::physics::{BodyState, Physics};
use crate::registry::EnemyRegistry;
use crate::reward::RewardConfig;
use crate::types::{AgentId, ArenaBounds, Pose};
use glam::Vec3;
use tracing::debug;

/// Environment tuning shared by all agents.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Fixed simulation tick in seconds.
    pub dt: f32,
    /// Episode step budget; exceeding it truncates with no terminal reward.
    pub max_steps: usize,
    pub bounds: ArenaBounds,
    /// Distance that maps to 1.0 in the observation's normalized range.
    pub obs_horizon: f32,
    /// Corrective acceleration toward the center while out of bounds.
    pub center_nudge_accel: f32,
    pub reward: RewardConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dt: 0.02,
            max_steps: 500,
            bounds: ArenaBounds::default(),
            obs_horizon: 20.0,
            center_nudge_accel: 10.0,
            reward: RewardConfig::default(),
        }
    }
}

/// Per-agent bookkeeping attached to a step result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepInfo {
    pub steps: usize,
    pub hp: i32,
    pub episode_return: f32,
    /// Killed the opponent this tick. Not a terminal event for this agent.
    pub won: bool,
    pub died: bool,
    pub fell: bool,
    pub timed_out: bool,
}

/// Result of one tick for one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    /// Reward delta for this tick; the episode return is in `info`.
    pub reward: f32,
    pub done: bool,
    /// Episode ended by step budget rather than a combat/boundary outcome.
    pub truncated: bool,
    pub info: StepInfo,
}

/// The episode controller. Owns the agents, the enemy registry, and the
/// physics collaborator; the driver owns the policies.
pub struct ArenaEnv<P: Physics> {
    physics: P,
    agents: Vec<CombatAgent>,
    registry: EnemyRegistry,
    config: EnvConfig,
    next_id: usize,
}

impl<P: Physics> ArenaEnv<P> {
    pub fn new(physics: P, config: EnvConfig) -> Self {
        Self {
            physics,
            agents: Vec::new(),
            registry: EnemyRegistry::new(),
            config,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// Activate a new combatant: allocate its id, give it a physics body,
    /// and register it for nearest-enemy lookups.
    pub fn add_agent(&mut self, config: AgentConfig) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        self.physics.add_body(id, config.body_radius, Pose::default());
        self.agents
            .push(CombatAgent::new(id, config, self.config.reward.clone()));
        self.registry.register(id);
        debug!(agent = %id, "agent activated");
        id
    }

    /// Deactivate a combatant. Registry mutation happens only here and in
    /// `add_agent`, never mid-tick.
    pub fn remove_agent(&mut self, id: AgentId) {
        self.registry.unregister(id);
        self.physics.remove_body(id);
        self.agents.retain(|a| a.id() != id);
    }

    pub fn agent(&self, id: AgentId) -> Option<&CombatAgent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Start fresh episodes for every agent and return their observations.
    pub fn reset_all(&mut self) -> Vec<Observation> {
        for i in 0..self.agents.len() {
            self.agents[i].reset(&mut self.physics, &self.config.bounds);
        }
        (0..self.agents.len()).map(|i| self.observe(i)).collect()
    }

    /// Advance the simulation one tick. Actions are consumed in registration
    /// order, one per agent; a length mismatch is a contract violation.
    ///
    /// Agents that ended their episode on the previous tick are implicitly
    /// reset at the start of this one.
    pub fn step(&mut self, actions: &[Action]) -> Result<Vec<StepResult>, SimError> {
        if actions.len() != self.agents.len() {
            return Err(SimError::BadActionShape {
                expected: self.agents.len(),
                got: actions.len(),
            });
        }
        let dt = self.config.dt;
        let n = self.agents.len();
        let mut won = vec![false; n];

        // Implicit reset, then open every agent's reward window for the tick.
        for i in 0..n {
            if self.agents[i].phase() != AgentPhase::Active {
                self.agents[i].reset(&mut self.physics, &self.config.bounds);
            }
            self.agents[i].begin_step()?;
        }

        // Locomotion and combat, in registration order. An agent killed by an
        // earlier agent's swing is skipped for the rest of the tick; its
        // rewards were already credited when the hit resolved.
        for i in 0..n {
            if self.agents[i].phase() != AgentPhase::Active {
                continue;
            }
            let id = self.agents[i].id();
            let action = actions[i];
            let state = self
                .physics
                .body(id)
                .ok_or(SimError::UnknownAgent(id))?;

            let move_accel = self.agents[i].config().move_accel;
            let turn_speed = self.agents[i].config().turn_speed;
            let accel_local = Vec3::new(action.strafe, 0.0, action.forward) * move_accel;
            self.physics
                .apply_force(id, state.pose.local_to_world(accel_local));
            self.physics.rotate(id, action.turn * turn_speed * dt);

            let can_hit = match self.agents[i].weapon_mut() {
                Some(weapon) => {
                    weapon.advance(dt);
                    if weapon.try_attack(action.attack) {
                        debug!(agent = %id, "swing started");
                    }
                    weapon.can_hit()
                }
                None => false,
            };
            // Covers both hit paths: the swing-start overlap poll on the
            // tick the attack begins, and ongoing contacts on later ticks
            // while the window is open and the hit unspent.
            if can_hit {
                self.resolve_swing_hits(i, &mut won)?;
            }
        }

        self.physics.step(dt);

        // Targeting, shaping, and boundary/timeout termination, after all
        // combat for the tick has fully resolved.
        for i in 0..n {
            if self.agents[i].phase() != AgentPhase::Active {
                continue;
            }
            let id = self.agents[i].id();
            let state = self
                .physics
                .body(id)
                .ok_or(SimError::UnknownAgent(id))?;
            let position = state.pose.position;

            let nearest = self.find_nearest(id);
            self.agents[i].set_target(nearest);
            if let Some(enemy_id) = nearest
                && let Some(enemy) = self.physics.body(enemy_id)
            {
                let to_enemy = enemy.pose.position - position;
                self.agents[i].distance_shaping(to_enemy.length());
                let dir = to_enemy.normalize_or_zero();
                self.agents[i].approach_shaping(state.velocity.dot(dir));
                self.agents[i].facing_shaping(state.pose.forward().dot(dir));
            }

            if self.config.bounds.below_floor(position) {
                self.agents[i].fall();
                continue;
            }
            if !self.config.bounds.contains(position) {
                self.agents[i].out_of_bounds_penalty();
                let nudge = self.config.bounds.toward_center(position)
                    * self.config.center_nudge_accel;
                self.physics.apply_force(id, nudge);
            }

            if self.agents[i].timed_out_over(self.config.max_steps) {
                self.agents[i].timeout();
            }
        }

        Ok((0..n)
            .map(|i| {
                let observation = self.observe(i);
                let agent = &self.agents[i];
                let reason = agent.terminal_reason();
                StepResult {
                    observation,
                    reward: agent.tick_reward(),
                    done: agent.phase() == AgentPhase::Terminal,
                    truncated: reason == Some(TerminalReason::TimedOut),
                    info: StepInfo {
                        steps: agent.steps(),
                        hp: agent.health().hp(),
                        episode_return: agent.episode_return(),
                        won: won[i],
                        died: reason == Some(TerminalReason::Defeated),
                        fell: reason == Some(TerminalReason::Fell),
                        timed_out: reason == Some(TerminalReason::TimedOut),
                    },
                }
            })
            .collect())
    }

    fn index_of(&self, id: AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a.id() == id)
    }

    fn find_nearest(&self, from: AgentId) -> Option<AgentId> {
        self.registry.find_nearest(from, |aid| {
            self.physics
                .body(aid)
                .map(|b| b.pose.position)
                .unwrap_or(Vec3::splat(f32::INFINITY))
        })
    }

    /// Run the overlap pass for an attacker whose swing can still land its
    /// hit. At most one candidate is accepted per swing.
    fn resolve_swing_hits(
        &mut self,
        attacker_idx: usize,
        won: &mut [bool],
    ) -> Result<(), SimError> {
        let attacker_id = self.agents[attacker_idx].id();
        let Some(swing) = self.agents[attacker_idx].weapon().map(|w| w.config().clone())
        else {
            return Ok(());
        };
        let state = self
            .physics
            .body(attacker_id)
            .ok_or(SimError::UnknownAgent(attacker_id))?;

        for candidate in self.physics.overlaps(state.pose.position, swing.range) {
            if candidate == attacker_id {
                continue;
            }
            let Some(victim_idx) = self.index_of(candidate) else {
                continue;
            };
            if self.agents[victim_idx].phase() != AgentPhase::Active {
                continue;
            }
            if let Some(min_dot) = swing.frontal_arc {
                let Some(victim_state) = self.physics.body(candidate) else {
                    continue;
                };
                let dir =
                    (victim_state.pose.position - state.pose.position).normalize_or_zero();
                if state.pose.forward().dot(dir) < min_dot {
                    continue;
                }
            }
            let accepted = match self.agents[attacker_idx].weapon_mut() {
                Some(weapon) => weapon.on_contact(candidate, attacker_id),
                None => false,
            };
            if accepted {
                debug!(attacker = %attacker_id, victim = %candidate, "swing connected");
                self.resolve_hit(attacker_idx, victim_idx, swing.damage, won)?;
                break;
            }
        }
        Ok(())
    }

    /// Apply damage and credit both sides. A killing hit credits the victim's
    /// loss and the attacker's win in the same call, before any terminal
    /// check for the tick runs, so a simultaneous kill can never leave one
    /// side uncredited.
    fn resolve_hit(
        &mut self,
        attacker_idx: usize,
        victim_idx: usize,
        damage: i32,
        won: &mut [bool],
    ) -> Result<(), SimError> {
        match self.agents[victim_idx].apply_damage(damage)? {
            DamageOutcome::Rejected => {}
            DamageOutcome::Survived { removed_frac } => {
                self.agents[victim_idx].note_got_hit(removed_frac);
                self.agents[attacker_idx].note_landed_hit(removed_frac);
            }
            DamageOutcome::Died { removed_frac } => {
                self.agents[victim_idx].note_got_hit(removed_frac);
                self.agents[victim_idx].defeat();
                self.agents[attacker_idx].note_landed_hit(removed_frac);
                self.agents[attacker_idx].note_win();
                won[attacker_idx] = true;
            }
        }
        Ok(())
    }

    fn observe(&self, idx: usize) -> Observation {
        let agent = &self.agents[idx];
        let state = self.physics.body(agent.id()).unwrap_or(BodyState {
            pose: Pose::default(),
            velocity: Vec3::ZERO,
        });
        let enemy = self.find_nearest(agent.id()).and_then(|enemy_id| {
            let body = self.physics.body(enemy_id)?;
            let health_frac = self.agent(enemy_id)?.health().frac();
            Some(EnemyView {
                position: body.pose.position,
                health_frac,
            })
        });
        Observation::encode(
            agent.health().frac(),
            &state.pose,
            state.velocity,
            enemy,
            self.config.obs_horizon,
        )
    }
}
