pub mod action;
pub mod agent;
pub mod arena;
pub mod error;
pub mod health;
pub mod observation;
pub mod physics;
pub mod policy;
pub mod registry;
pub mod reward;
pub mod types;
pub mod weapon;

// Re-export commonly used types for convenience
pub use action::Action;
pub use agent::{AgentConfig, AgentPhase, CombatAgent, SpawnMode, TerminalReason};
pub use arena::{ArenaEnv, EnvConfig, StepInfo, StepResult};
pub use error::SimError;
pub use health::{DamageOutcome, HealthPool};
pub use observation::{OBS_SIZE, Observation};
pub use physics::{BodyState, KinematicPhysics, Physics};
pub use policy::{ChasePolicy, Policy, RandomPolicy};
pub use registry::EnemyRegistry;
pub use reward::{RewardConfig, RewardShaper};
pub use types::{AgentId, ArenaBounds, Pose};
pub use weapon::{SwingConfig, SwingState, WeaponSwing};
