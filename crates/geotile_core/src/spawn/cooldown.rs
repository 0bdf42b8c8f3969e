//! Per-user, per-target spawn cooldowns.

use super::environment::GreenPlanTarget;
use dashmap::DashMap;
use std::time::Duration;

/// Default wait between spawns for the same user and target.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10 * 60);

/// Tracks when each user may next spawn a creature for each green-plan target.
///
/// Backed by a concurrent map so one tracker can be shared behind an `Arc`
/// by every check-in handler. Timestamps are Unix milliseconds supplied by the
/// caller.
#[derive(Debug, Default)]
pub struct CooldownTracker {
    ready_at: DashMap<String, u64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user_id: &str, target: GreenPlanTarget) -> String {
        format!("{user_id}:{}", target.as_str())
    }

    /// Whether the user may spawn for `target` at `now_ms`.
    pub fn is_ready(&self, user_id: &str, target: GreenPlanTarget, now_ms: u64) -> bool {
        self.ready_at
            .get(&Self::key(user_id, target))
            .map_or(true, |ready_at| now_ms >= *ready_at)
    }

    /// Blocks spawns for `target` until `now_ms + cooldown`.
    pub fn set_cooldown(&self, user_id: &str, target: GreenPlanTarget, now_ms: u64, cooldown: Duration) {
        let millis = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX);
        let until = now_ms.saturating_add(millis);
        self.ready_at.insert(Self::key(user_id, target), until);
    }

    /// Time left before the user may spawn again, if any.
    pub fn remaining(&self, user_id: &str, target: GreenPlanTarget, now_ms: u64) -> Option<Duration> {
        self.ready_at
            .get(&Self::key(user_id, target))
            .and_then(|ready_at| ready_at.checked_sub(now_ms))
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Drops entries that have already expired and returns how many were removed.
    pub fn prune(&self, now_ms: u64) -> usize {
        let before = self.ready_at.len();
        self.ready_at.retain(|_, ready_at| *ready_at > now_ms);
        before - self.ready_at.len()
    }

    /// Number of tracked user/target pairs.
    pub fn len(&self) -> usize {
        self.ready_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready_at.is_empty()
    }
}
