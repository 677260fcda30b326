//! Weapon swing timing state machine. A swing is the half-open window
//! `[attack, attack + active_time)` during which exactly one hit may be
//! credited; the cooldown keeps the weapon unusable through a recovery
//! window after the swing ends.

use crate::types::AgentId;

/// Timing and hit-test tuning for one weapon.
#[derive(Debug, Clone)]
pub struct SwingConfig {
    /// Seconds the swing stays damage-eligible after an attack starts.
    pub active_time: f32,
    /// Seconds from attack start until the next attack may begin.
    pub cooldown: f32,
    /// Hit-test radius around the wielder.
    pub range: f32,
    /// Minimum `forward . to_target` to count a hit; `None` hits all around.
    pub frontal_arc: Option<f32>,
    /// Hit points removed per landed hit.
    pub damage: i32,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            active_time: 0.25,
            cooldown: 0.35,
            range: 1.6,
            frontal_arc: Some(0.2),
            damage: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingState {
    /// Ready to attack.
    Idle,
    /// Swing window open, may still land its one hit.
    Active,
    /// Swing over, recovery cooldown still running.
    Cooling,
}

/// Per-agent attack state machine. Contact callbacks can fire many times per
/// tick for one overlapping body, so deduplication is per swing, never per
/// contact pair.
#[derive(Debug, Clone)]
pub struct WeaponSwing {
    config: SwingConfig,
    cooldown_remaining: f32,
    active_remaining: f32,
    hit_this_swing: bool,
}

impl WeaponSwing {
    pub fn new(config: SwingConfig) -> Self {
        Self {
            config,
            cooldown_remaining: 0.0,
            active_remaining: 0.0,
            hit_this_swing: false,
        }
    }

    pub fn config(&self) -> &SwingConfig {
        &self.config
    }

    pub fn state(&self) -> SwingState {
        if self.active_remaining > 0.0 {
            SwingState::Active
        } else if self.cooldown_remaining > 0.0 {
            SwingState::Cooling
        } else {
            SwingState::Idle
        }
    }

    /// Start a swing if one was requested and the weapon is idle. Returns
    /// whether a new swing began; on success the caller must immediately run
    /// the swing-start overlap pass so targets already in range count.
    pub fn try_attack(&mut self, want_attack: bool) -> bool {
        if !want_attack || self.state() != SwingState::Idle {
            return false;
        }
        self.active_remaining = self.config.active_time;
        self.cooldown_remaining = self.config.cooldown;
        self.hit_this_swing = false;
        true
    }

    /// Advance both timers, floored at zero. Once the active window closes,
    /// contacts are ignored until the next `try_attack`.
    pub fn advance(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        self.active_remaining = (self.active_remaining - dt).max(0.0);
    }

    /// Whether the current swing may still land its hit.
    pub fn can_hit(&self) -> bool {
        self.state() == SwingState::Active && !self.hit_this_swing
    }

    /// Contact/overlap notification. Accepts at most one candidate per swing
    /// and never the wielder itself; acceptance consumes the swing's hit.
    pub fn on_contact(&mut self, candidate: AgentId, owner: AgentId) -> bool {
        if !self.can_hit() || candidate == owner {
            return false;
        }
        self.hit_this_swing = true;
        true
    }

    pub fn reset(&mut self) {
        self.cooldown_remaining = 0.0;
        self.active_remaining = 0.0;
        self.hit_this_swing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: AgentId = AgentId(0);
    const TARGET: AgentId = AgentId(1);

    #[test]
    fn test_initial_state_is_idle() {
        let weapon = WeaponSwing::new(SwingConfig::default());
        assert_eq!(weapon.state(), SwingState::Idle);
        assert!(!weapon.can_hit());
    }

    #[test]
    fn test_attack_requires_intent() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        assert!(!weapon.try_attack(false));
        assert_eq!(weapon.state(), SwingState::Idle);
    }

    #[test]
    fn test_one_hit_per_swing() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        assert!(weapon.try_attack(true));
        // Three contact events inside one active window credit one hit.
        let hits = (0..3)
            .filter(|_| weapon.on_contact(TARGET, OWNER))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_self_contact_rejected() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        weapon.try_attack(true);
        assert!(!weapon.on_contact(OWNER, OWNER));
        // The swing's hit is still available for a real target.
        assert!(weapon.on_contact(TARGET, OWNER));
    }

    #[test]
    fn test_cooldown_gates_next_swing() {
        let mut weapon = WeaponSwing::new(SwingConfig {
            active_time: 0.15,
            cooldown: 0.35,
            ..SwingConfig::default()
        });
        assert!(weapon.try_attack(true));
        weapon.advance(0.1);
        // 0.1s later: swing window still open, cooldown still running.
        assert_eq!(weapon.state(), SwingState::Active);
        assert!(!weapon.try_attack(true));
        weapon.advance(0.1);
        assert_eq!(weapon.state(), SwingState::Cooling);
        assert!(!weapon.try_attack(true));
        weapon.advance(0.2);
        assert_eq!(weapon.state(), SwingState::Idle);
        assert!(weapon.try_attack(true));
    }

    #[test]
    fn test_contacts_ignored_after_window_closes() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        weapon.try_attack(true);
        weapon.advance(0.3);
        assert!(!weapon.on_contact(TARGET, OWNER));
    }

    #[test]
    fn test_hit_flag_clears_on_new_swing() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        weapon.try_attack(true);
        assert!(weapon.on_contact(TARGET, OWNER));
        weapon.advance(1.0);
        assert!(weapon.try_attack(true));
        assert!(weapon.on_contact(TARGET, OWNER));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut weapon = WeaponSwing::new(SwingConfig::default());
        weapon.try_attack(true);
        weapon.on_contact(TARGET, OWNER);
        weapon.reset();
        assert_eq!(weapon.state(), SwingState::Idle);
        assert!(weapon.try_attack(true));
    }
}
