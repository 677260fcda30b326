//! Error taxonomy: contract violations surface immediately to the driver;
//! absent collaborators and boundary conditions are handled in-band and
//! never appear here.

use crate::types::AgentId;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// The driver supplied an action batch whose shape does not match the
    /// number of registered agents or the per-agent layout.
    #[error("action shape mismatch: expected {expected}, got {got}")]
    BadActionShape { expected: usize, got: usize },

    /// Damage amounts are non-negative by contract.
    #[error("damage amount must be non-negative, got {0}")]
    NegativeDamage(i32),

    /// An agent was stepped outside its `Active` phase.
    #[error("{0} stepped while not active")]
    AgentNotActive(AgentId),

    /// The driver referenced an agent the arena does not know about.
    #[error("unknown {0}")]
    UnknownAgent(AgentId),
}
