//! The learned meta-policy and its external action-selector boundary.
//!
//! The learning component is a black box behind [`ActionSelector`]: the
//! engine hands it state features and interval rewards, and receives an
//! action index back.  Nothing about value functions, exploration, or state
//! discretisation leaks into the engine — swapping the learner never
//! touches dispatch code.

use lift_building::Passenger;
use lift_core::CarId;

use crate::{Command, PolicyContext, PolicyError, PolicyResult, SchedulingPolicy};

// ── ActionSelector ────────────────────────────────────────────────────────────

/// The message-passing boundary to the external learning component.
///
/// State in, action out, reward in.  Implementations own their entire
/// learning state; the engine only promises to call `observe_reward` once
/// per re-decision interval before `select_action`, and `reset_episode`
/// between independent runs.
pub trait ActionSelector {
    /// Pick an action index given the current state features.
    fn select_action(&mut self, features: &[f64]) -> usize;

    /// Receive the reward accumulated since the previous decision.
    fn observe_reward(&mut self, reward: f64);

    /// Freeze (`true`) or resume (`false`) learning — evaluation runs follow
    /// the learned policy without updating it.
    fn evaluation_mode(&mut self, frozen: bool);

    /// Clear per-episode state before an independent run.  Learned values
    /// persist; only episode-local bookkeeping resets.
    fn reset_episode(&mut self);
}

// ── State features ────────────────────────────────────────────────────────────

/// Features handed to the selector at each re-decision, in order:
/// `[up_peak, down_peak, interfloor, queue_len]` where the first three are
/// counts of queued passengers travelling from the lobby, to the lobby, and
/// between other floors respectively.
fn state_features(ctx: &PolicyContext<'_>) -> Vec<f64> {
    let mut up_peak = 0.0;
    let mut down_peak = 0.0;
    let mut interfloor = 0.0;
    for p in ctx.control.hall_calls() {
        if p.arrival_floor.0 == 0 {
            up_peak += 1.0;
        } else if p.destination_floor.0 == 0 {
            down_peak += 1.0;
        } else {
            interfloor += 1.0;
        }
    }
    vec![up_peak, down_peak, interfloor, ctx.control.len() as f64]
}

// ── LearnedMetaPolicy ─────────────────────────────────────────────────────────

/// A meta-policy that selects among sub-policies as its discrete action set.
///
/// All engine callbacks forward to the currently active sub-policy.  On a
/// fixed re-decision interval the accumulated reward (negative mean squared
/// waiting time observed over the interval) is handed to the selector, a new
/// action is chosen, and — only when the choice differs from the current
/// one — `changed_to` fires exactly once on the newly active sub-policy.
/// In-flight car commitments made under the previous sub-policy are never
/// reset; they resolve naturally.
pub struct LearnedMetaPolicy {
    actions: Vec<Box<dyn SchedulingPolicy>>,
    selector: Box<dyn ActionSelector>,
    decision_interval_secs: f64,

    active: usize,
    next_decision_secs: f64,

    /// Interval reward accumulation: squared wait seconds of queued
    /// passengers, sampled once per tick.
    penalty_sum: f64,
    penalty_samples: u64,

    /// Per-interval chosen action, in interval order.
    action_usage: Vec<usize>,
    /// Total intervals each action has been active.
    usage_counts: Vec<u64>,
}

impl LearnedMetaPolicy {
    /// Build a meta-policy over `actions` with the given re-decision
    /// interval.  The first action starts active and is counted as the
    /// choice for the first interval.
    pub fn new(
        actions: Vec<Box<dyn SchedulingPolicy>>,
        selector: Box<dyn ActionSelector>,
        decision_interval_secs: f64,
    ) -> PolicyResult<Self> {
        if actions.is_empty() {
            return Err(PolicyError::EmptyActionSpace);
        }
        if decision_interval_secs <= 0.0 {
            return Err(PolicyError::InvalidDecisionInterval(decision_interval_secs));
        }
        let num_actions = actions.len();
        let mut usage_counts = vec![0u64; num_actions];
        usage_counts[0] = 1;
        Ok(Self {
            actions,
            selector,
            decision_interval_secs,
            active: 0,
            next_decision_secs: decision_interval_secs,
            penalty_sum: 0.0,
            penalty_samples: 0,
            action_usage: vec![0],
            usage_counts,
        })
    }

    /// Index of the currently active sub-policy.
    #[inline]
    pub fn active_action(&self) -> usize {
        self.active
    }

    /// Name of the currently active sub-policy.
    pub fn active_name(&self) -> &'static str {
        self.actions[self.active].name()
    }

    /// The per-interval action choices, oldest first.  Raw material for the
    /// policy-usage report.
    #[inline]
    pub fn action_usage(&self) -> &[usize] {
        &self.action_usage
    }

    /// Total intervals each action was active, indexed by action.
    #[inline]
    pub fn usage_distribution(&self) -> &[u64] {
        &self.usage_counts
    }

    /// Number of actions in the discrete action space.
    #[inline]
    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    /// Forward evaluation-mode control to the selector.
    pub fn evaluation_mode(&mut self, frozen: bool) {
        self.selector.evaluation_mode(frozen);
    }

    /// Reset episode-local state in the selector and the usage counters.
    /// Learned values inside the selector persist across episodes.
    pub fn reset_episode(&mut self) {
        self.selector.reset_episode();
        self.active = 0;
        self.next_decision_secs = self.decision_interval_secs;
        self.penalty_sum = 0.0;
        self.penalty_samples = 0;
        self.action_usage = vec![0];
        self.usage_counts.fill(0);
        self.usage_counts[0] = 1;
    }

    /// Interval boundary: reward the selector, pick the next action, and
    /// switch sub-policies if it changed.
    fn redecide(&mut self, ctx: &PolicyContext<'_>) {
        let reward = if self.penalty_samples > 0 {
            -(self.penalty_sum / self.penalty_samples as f64)
        } else {
            0.0
        };
        self.selector.observe_reward(reward);

        let features = state_features(ctx);
        let chosen = self.selector.select_action(&features);
        // An out-of-range index is a selector bug; keep the current action
        // rather than corrupt the dispatch loop.
        let chosen = if chosen < self.actions.len() {
            chosen
        } else {
            self.active
        };

        if chosen != self.active {
            self.active = chosen;
            self.actions[self.active].changed_to(ctx);
        }
        self.action_usage.push(self.active);
        self.usage_counts[self.active] += 1;

        self.penalty_sum = 0.0;
        self.penalty_samples = 0;
        self.next_decision_secs += self.decision_interval_secs;
    }
}

impl SchedulingPolicy for LearnedMetaPolicy {
    fn name(&self) -> &'static str {
        "learned-meta"
    }

    fn passenger_arrived(
        &mut self,
        ctx: &PolicyContext<'_>,
        passenger: &Passenger,
    ) -> Vec<Command> {
        self.actions[self.active].passenger_arrived(ctx, passenger)
    }

    fn passenger_boarded(
        &mut self,
        ctx: &PolicyContext<'_>,
        car: CarId,
        passenger: &Passenger,
    ) -> Vec<Command> {
        self.actions[self.active].passenger_boarded(ctx, car, passenger)
    }

    fn passenger_exited(
        &mut self,
        ctx: &PolicyContext<'_>,
        car: CarId,
        passenger: &Passenger,
    ) -> Vec<Command> {
        self.actions[self.active].passenger_exited(ctx, car, passenger)
    }

    fn update(&mut self, ctx: &PolicyContext<'_>) -> Vec<Command> {
        // Sample the interval penalty once per tick: mean squared wait of
        // the passengers still queued.
        let mut sq_sum = 0.0;
        let mut count = 0u64;
        for p in ctx.control.hall_calls() {
            let wait = ctx.wait_secs(p.arrival_tick);
            sq_sum += wait * wait;
            count += 1;
        }
        if count > 0 {
            self.penalty_sum += sq_sum / count as f64;
        }
        self.penalty_samples += 1;

        if ctx.now_secs + 1e-9 >= self.next_decision_secs {
            self.redecide(ctx);
        }

        self.actions[self.active].update(ctx)
    }

    fn on_idle(&mut self, ctx: &PolicyContext<'_>, car: CarId) -> Vec<Command> {
        self.actions[self.active].on_idle(ctx, car)
    }

    fn on_turned(&mut self, ctx: &PolicyContext<'_>, car: CarId) -> Vec<Command> {
        self.actions[self.active].on_turned(ctx, car)
    }

    fn changed_to(&mut self, ctx: &PolicyContext<'_>) {
        self.actions[self.active].changed_to(ctx);
    }
}
