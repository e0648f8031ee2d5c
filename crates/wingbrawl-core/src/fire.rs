//! Gun fire-rate limiting.
//!
//! [`FireGate`] decides whether a shot may be fired now. Under
//! [`FirePolicy::SharedCooldown`] every shooter draws on one timestamp, so a
//! shot from any fighter blocks the other until the cooldown passes.
//! [`FirePolicy::PerShooter`] keeps one timestamp per shooter name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::capability::Clock;

/// How the gun cooldown is shared between shooters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePolicy {
    /// One cooldown for every shooter.
    #[default]
    SharedCooldown,
    /// Each shooter has its own cooldown.
    PerShooter,
}

/// Fire-rate limiter.
///
/// The first shot of each timestamp is always allowed.
///
/// # Example
///
/// ```
/// use wingbrawl_core::capability::ManualClock;
/// use wingbrawl_core::fire::{FireGate, FirePolicy};
///
/// let clock = ManualClock::starting_at(1_000);
/// let mut gate = FireGate::new(FirePolicy::SharedCooldown);
///
/// assert!(gate.try_fire("plane", &clock, 200));
/// clock.advance(100);
/// assert!(!gate.try_fire("plane2", &clock, 200));
/// clock.advance(100);
/// assert!(gate.try_fire("plane2", &clock, 200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FireGate {
    policy: FirePolicy,
    shared: Option<u64>,
    per_shooter: HashMap<String, u64>,
}

impl FireGate {
    /// Creates a gate with no shots on record.
    #[must_use]
    pub fn new(policy: FirePolicy) -> Self {
        Self {
            policy,
            shared: None,
            per_shooter: HashMap::new(),
        }
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> FirePolicy {
        self.policy
    }

    /// Records a shot by `shooter` and returns `true` if at least
    /// `cooldown_ms` has passed since the last recorded shot it competes with.
    /// Returns `false` and records nothing otherwise.
    pub fn try_fire(&mut self, shooter: &str, clock: &dyn Clock, cooldown_ms: u64) -> bool {
        match self.policy {
            FirePolicy::SharedCooldown => Self::arm(&mut self.shared, clock, cooldown_ms),
            FirePolicy::PerShooter => {
                let mut stamp = self.per_shooter.get(shooter).copied();
                let fired = Self::arm(&mut stamp, clock, cooldown_ms);
                if let (true, Some(at)) = (fired, stamp) {
                    self.per_shooter.insert(shooter.to_string(), at);
                }
                fired
            }
        }
    }

    fn arm(stamp: &mut Option<u64>, clock: &dyn Clock, cooldown_ms: u64) -> bool {
        match stamp {
            None => {
                *stamp = Some(clock.now_ms());
                true
            }
            Some(last) => clock.elapsed(last, cooldown_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::ManualClock;

    #[test]
    fn first_shot_is_allowed_at_time_zero() {
        let clock = ManualClock::new();
        let mut gate = FireGate::new(FirePolicy::SharedCooldown);
        assert!(gate.try_fire("plane", &clock, 200));
    }

    #[test]
    fn cooldown_boundary_is_inclusive() {
        let clock = ManualClock::new();
        let mut gate = FireGate::default();
        assert_eq!(gate.policy(), FirePolicy::SharedCooldown);
        assert!(gate.try_fire("plane", &clock, 200));
        clock.advance(199);
        assert!(!gate.try_fire("plane", &clock, 200));
        clock.advance(1);
        assert!(gate.try_fire("plane", &clock, 200));
    }

    #[test]
    fn rejected_shot_does_not_rearm() {
        let clock = ManualClock::new();
        let mut gate = FireGate::default();
        assert!(gate.try_fire("plane", &clock, 200));
        clock.set(150);
        assert!(!gate.try_fire("plane", &clock, 200));
        clock.set(200);
        assert!(gate.try_fire("plane", &clock, 200));
    }

    #[test]
    fn shared_cooldown_spans_shooters() {
        let clock = ManualClock::new();
        let mut gate = FireGate::new(FirePolicy::SharedCooldown);
        assert!(gate.try_fire("plane", &clock, 200));
        clock.advance(50);
        assert!(!gate.try_fire("plane2", &clock, 200));
    }

    #[test]
    fn per_shooter_cooldowns_are_independent() {
        let clock = ManualClock::new();
        let mut gate = FireGate::new(FirePolicy::PerShooter);
        assert_eq!(gate.policy(), FirePolicy::PerShooter);
        assert!(gate.try_fire("plane", &clock, 200));
        clock.advance(50);
        assert!(gate.try_fire("plane2", &clock, 200));
        assert!(!gate.try_fire("plane", &clock, 200));
        clock.advance(150);
        assert!(gate.try_fire("plane", &clock, 200));
        assert!(!gate.try_fire("plane2", &clock, 200));
    }
}
