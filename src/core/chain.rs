//! Rule chain
//!
//! This module provides the RuleChain, which treats a fixed, ordered list of
//! rules as a single [`Authorizer`].
//!
//! Every rule is consulted on every transaction, with no short-circuiting, so
//! that one pass reports the complete set of violations. A fatal error from
//! any rule takes precedence over violations, since it means the request
//! stream itself is broken.

use crate::core::commit::{Authorization, CommitPlan};
use crate::core::traits::{Authorizer, Rule};
use crate::types::{Account, AuthorizerError, Transaction};
use tracing::warn;

/// Ordered collection of rules evaluated uniformly
#[derive(Debug, Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleChain {
    /// Create an empty chain, which authorizes everything
    pub fn new() -> Self {
        RuleChain::default()
    }

    /// Append a rule, builder style
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.push(rule);
        self
    }

    /// Append a rule; it will be evaluated after every rule already present
    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the rules in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Authorizer for RuleChain {
    fn authorize(
        &self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Authorization, AuthorizerError> {
        let mut authorization = Authorization::default();
        let mut fatal = None;

        for (index, rule) in self.rules.iter().enumerate() {
            match rule.check(account, transaction) {
                Ok(verdict) => {
                    if let Some(violation) = verdict.violation {
                        authorization.violations.push(violation);
                    }
                    if let Some(effect) = verdict.effect {
                        authorization.plan.push(index, effect);
                    }
                }
                Err(err) => {
                    warn!(rule = rule.name(), error = %err, "rule reported a fatal error");
                    fatal.get_or_insert(err);
                }
            }
        }

        match fatal {
            Some(err) => Err(err),
            None => Ok(authorization),
        }
    }

    fn commit(&mut self, plan: CommitPlan) -> Result<(), AuthorizerError> {
        for pending in plan {
            let rule = self
                .rules
                .get_mut(pending.rule)
                .ok_or(AuthorizerError::InvalidCommit {
                    index: pending.rule,
                })?;
            // Only a stale plan fails here, and earlier effects stay applied.
            rule.apply(&pending.effect)?;
        }
        Ok(())
    }
}
