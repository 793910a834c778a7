//! Two-phase authorization values
//!
//! Rules never mutate their own state while checking a transaction. Instead a
//! rule returns a [`Verdict`] carrying an optional violation and an optional
//! [`Effect`], the state change it wants applied if the transaction goes
//! through. The chain gathers those effects into a [`CommitPlan`] which the
//! ledger hands back for application only once no rule raised a violation.
//! A rejected transaction simply drops its plan.

use crate::types::{Timestamp, TransactionKey, Violation};

/// A pending state change of one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Move the chronological watermark forward to the given instant
    AdvanceWatermark(Timestamp),
    /// Record one event in a rule's single sliding window
    RecordEvent(Timestamp),
    /// Record one event in the sliding window of the given key
    RecordKeyedEvent { key: TransactionKey, at: Timestamp },
}

/// Result of checking one rule against a transaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    pub violation: Option<Violation>,
    pub effect: Option<Effect>,
}

impl Verdict {
    /// The rule has no objection and nothing to record
    pub fn pass() -> Self {
        Verdict::default()
    }

    /// The rule refuses the transaction
    pub fn reject(violation: Violation) -> Self {
        Verdict {
            violation: Some(violation),
            effect: None,
        }
    }

    /// The rule accepts the transaction, provided `effect` is applied on commit
    pub fn defer(effect: Effect) -> Self {
        Verdict {
            violation: None,
            effect: Some(effect),
        }
    }
}

/// An effect tagged with the position of the rule that must apply it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEffect {
    pub rule: usize,
    pub effect: Effect,
}

/// Ordered list of effects to apply when a transaction is accepted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitPlan {
    effects: Vec<PendingEffect>,
}

impl CommitPlan {
    pub fn new() -> Self {
        CommitPlan::default()
    }

    /// Append an effect for the rule at position `rule`
    pub fn push(&mut self, rule: usize, effect: Effect) {
        self.effects.push(PendingEffect { rule, effect });
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn effects(&self) -> &[PendingEffect] {
        &self.effects
    }
}

impl IntoIterator for CommitPlan {
    type Item = PendingEffect;
    type IntoIter = std::vec::IntoIter<PendingEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

/// Aggregate result of authorizing one transaction against a set of rules
///
/// Holds every violation raised, in rule order, and the plan to commit if
/// there are none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authorization {
    pub violations: Vec<Violation>,
    pub plan: CommitPlan,
}

impl Authorization {
    pub fn is_authorized(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_commit_plan_preserves_order() {
        let at = Utc.with_ymd_and_hms(2021, 4, 1, 16, 20, 0).unwrap();
        let mut plan = CommitPlan::new();
        plan.push(4, Effect::RecordEvent(at));
        plan.push(0, Effect::AdvanceWatermark(at));

        let rules: Vec<usize> = plan.into_iter().map(|pending| pending.rule).collect();
        assert_eq!(rules, vec![4, 0]);
    }

    #[test]
    fn test_verdict_constructors() {
        let at = Utc.with_ymd_and_hms(2021, 4, 1, 16, 20, 0).unwrap();

        assert_eq!(Verdict::pass(), Verdict { violation: None, effect: None });
        assert!(Verdict::reject(Violation::card_not_active()).effect.is_none());
        assert_eq!(
            Verdict::defer(Effect::RecordEvent(at)).effect,
            Some(Effect::RecordEvent(at))
        );
    }

    #[test]
    fn test_authorization_without_violations_is_authorized() {
        assert!(Authorization::default().is_authorized());

        let rejected = Authorization {
            violations: vec![Violation::card_not_active()],
            plan: CommitPlan::new(),
        };
        assert!(!rejected.is_authorized());
    }
}
