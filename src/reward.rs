//! Reward shaping. Every term is additive into the agent's running episode
//! return; terminal bonuses stack on top of the per-hit terms rather than
//! replacing them.

/// Shaping and terminal constants. Tuning, not contract.
#[derive(Debug, Clone)]
pub struct RewardConfig {
    /// Applied every tick so standing still is never free.
    pub step_penalty: f32,
    /// Scale on the per-tick decrease in distance to the nearest enemy.
    pub distance_scale: f32,
    /// Bound on the distance term so shaping cannot dwarf terminal rewards.
    pub distance_cap: f32,
    /// Scale on the velocity component directed toward the enemy.
    pub approach_scale: f32,
    /// Scale on forward-facing alignment with the enemy direction.
    pub facing_scale: f32,
    /// Reward per landed hit, scaled by fraction of max health removed.
    pub hit_reward: f32,
    /// Penalty per received hit, scaled the same way.
    pub hit_penalty: f32,
    /// One-shot bonus for reducing the opponent to zero health.
    pub win_bonus: f32,
    /// One-shot penalty for being reduced to zero health.
    pub lose_penalty: f32,
    /// Per-tick penalty while outside the arena's x/z bounds.
    pub bounds_penalty: f32,
    /// One-shot penalty when falling below the floor ends the episode.
    pub fall_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            step_penalty: -0.0005,
            distance_scale: 0.001,
            distance_cap: 0.01,
            approach_scale: 0.0005,
            facing_scale: 0.0005,
            hit_reward: 0.05,
            hit_penalty: -0.05,
            win_bonus: 1.0,
            lose_penalty: -1.0,
            bounds_penalty: -0.01,
            fall_penalty: -1.0,
        }
    }
}

/// Per-agent reward accumulator: the running episode return plus the delta
/// for the tick in flight.
#[derive(Debug, Clone)]
pub struct RewardShaper {
    config: RewardConfig,
    episode_return: f32,
    tick_delta: f32,
}

impl RewardShaper {
    pub fn new(config: RewardConfig) -> Self {
        Self {
            config,
            episode_return: 0.0,
            tick_delta: 0.0,
        }
    }

    pub fn episode_return(&self) -> f32 {
        self.episode_return
    }

    /// Reward accumulated since `begin_tick`.
    pub fn tick_delta(&self) -> f32 {
        self.tick_delta
    }

    pub fn begin_episode(&mut self) {
        self.episode_return = 0.0;
        self.tick_delta = 0.0;
    }

    pub fn begin_tick(&mut self) {
        self.tick_delta = 0.0;
    }

    fn add(&mut self, amount: f32) {
        self.tick_delta += amount;
        self.episode_return += amount;
    }

    pub fn step_penalty(&mut self) {
        let amount = self.config.step_penalty;
        self.add(amount);
    }

    /// Reward for closing distance since the previous tick, penalty for
    /// retreating. Bounded either way.
    pub fn distance_delta(&mut self, prev_dist: f32, dist: f32) {
        let cap = self.config.distance_cap;
        let term = ((prev_dist - dist) * self.config.distance_scale).clamp(-cap, cap);
        self.add(term);
    }

    /// `v_toward` is the signed velocity component along the enemy direction.
    pub fn approach(&mut self, v_toward: f32) {
        let amount = v_toward * self.config.approach_scale;
        self.add(amount);
    }

    /// `alignment` is `forward . enemy_dir`, in [-1, 1].
    pub fn facing(&mut self, alignment: f32) {
        let amount = alignment * self.config.facing_scale;
        self.add(amount);
    }

    pub fn landed_hit(&mut self, removed_frac: f32) {
        let amount = self.config.hit_reward * removed_frac;
        self.add(amount);
    }

    pub fn got_hit(&mut self, removed_frac: f32) {
        let amount = self.config.hit_penalty * removed_frac;
        self.add(amount);
    }

    pub fn win(&mut self) {
        let amount = self.config.win_bonus;
        self.add(amount);
    }

    pub fn lose(&mut self) {
        let amount = self.config.lose_penalty;
        self.add(amount);
    }

    pub fn out_of_bounds(&mut self) {
        let amount = self.config.bounds_penalty;
        self.add(amount);
    }

    pub fn fall(&mut self) {
        let amount = self.config.fall_penalty;
        self.add(amount);
    }
}
