//! Per-agent hit-point pool. Damage is applied here; the structured outcome
//! is returned to the caller, which owns all reward and termination
//! consequences.

use crate::error::SimError;

/// Result of one `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// The pool was already empty; nothing changed. Keeps death one-shot no
    /// matter how many hits land after the fatal one.
    Rejected,
    /// Damage landed and the owner survived.
    Survived { removed_frac: f32 },
    /// This call emptied the pool. Reported exactly once per episode.
    Died { removed_frac: f32 },
}

#[derive(Debug, Clone)]
pub struct HealthPool {
    max_hp: i32,
    hp: i32,
}

impl HealthPool {
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self { max_hp, hp: max_hp }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn frac(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Remove up to `amount` hit points, clamped at zero. A negative amount
    /// is a caller bug, not a combat outcome.
    pub fn apply_damage(&mut self, amount: i32) -> Result<DamageOutcome, SimError> {
        if amount < 0 {
            return Err(SimError::NegativeDamage(amount));
        }
        if self.hp == 0 {
            return Ok(DamageOutcome::Rejected);
        }

        let removed = amount.min(self.hp);
        self.hp -= removed;
        let removed_frac = removed as f32 / self.max_hp as f32;

        if self.hp == 0 {
            Ok(DamageOutcome::Died { removed_frac })
        } else {
            Ok(DamageOutcome::Survived { removed_frac })
        }
    }

    /// Restore to full. Only meaningful between episodes.
    pub fn reset(&mut self) {
        self.hp = self.max_hp;
    }
}
