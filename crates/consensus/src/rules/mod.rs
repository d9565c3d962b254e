use lodestone_primitives::SealedHeader;
use std::fmt::{self, Debug};
use tracing::trace;

mod standard;
pub use standard::{AncestryRule, GasLimitRule, GasUsageRule, TimestampRule};

/// A single acceptance check run against a candidate header.
///
/// Rules are stateless predicates over the header, its parent and the shared
/// protocol context `Ctx`. Every rule must be a necessary condition on its
/// own, so reordering rules within a set never changes the overall outcome,
/// only where a rejection short-circuits.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait HeaderValidationRule<Ctx>: Debug + Send + Sync {
    /// Check `header` against its `parent`.
    ///
    /// Returns `false` if the header is inadmissible. Rules observe but never
    /// mutate their inputs; diagnostics are emitted as trace logs, not
    /// errors.
    fn validate(&self, header: &SealedHeader, parent: &SealedHeader, ctx: &Ctx) -> bool;
}

/// An ordered set of [HeaderValidationRule]s with short-circuit semantics.
///
/// The first rule to reject wins and the remaining rules are not invoked.
/// An empty set accepts every header.
pub struct HeaderRuleSet<Ctx> {
    rules: Vec<Box<dyn HeaderValidationRule<Ctx>>>,
}

// === impl HeaderRuleSet ===

impl<Ctx> HeaderRuleSet<Ctx> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule, returning the set for chaining.
    pub fn with_rule(mut self, rule: impl HeaderValidationRule<Ctx> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Number of rules in this set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the rules against the header in order, stopping at the first
    /// rejection.
    pub fn evaluate(&self, header: &SealedHeader, parent: &SealedHeader, ctx: &Ctx) -> bool {
        for rule in &self.rules {
            if !rule.validate(header, parent, ctx) {
                trace!(
                    target: "consensus::rules",
                    number = header.number,
                    hash = ?header.hash(),
                    ?rule,
                    "Header rejected"
                );
                return false
            }
        }
        true
    }
}

impl<Ctx> Default for HeaderRuleSet<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Debug for HeaderRuleSet<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderRuleSet").field("rules", &self.rules).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    /// Rule with a fixed outcome that counts its invocations.
    #[derive(Debug)]
    struct CountingRule {
        outcome: bool,
        calls: AtomicUsize,
    }

    impl CountingRule {
        fn new(outcome: bool) -> Arc<Self> {
            Arc::new(Self { outcome, calls: AtomicUsize::new(0) })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl<Ctx> HeaderValidationRule<Ctx> for CountingRule {
        fn validate(&self, _header: &SealedHeader, _parent: &SealedHeader, _ctx: &Ctx) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
        }
    }

    #[test]
    fn first_rejection_short_circuits() {
        let reject = CountingRule::new(false);
        let accept = CountingRule::new(true);
        let rules = HeaderRuleSet::new()
            .with_rule(Arc::clone(&reject))
            .with_rule(Arc::clone(&accept));

        let header = SealedHeader::default();
        assert!(!rules.evaluate(&header, &header, &()));
        assert_eq!(reject.calls(), 1);
        assert_eq!(accept.calls(), 0);
    }

    #[test]
    fn all_rules_run_when_accepting() {
        let first = CountingRule::new(true);
        let second = CountingRule::new(true);
        let rules = HeaderRuleSet::new()
            .with_rule(Arc::clone(&first))
            .with_rule(Arc::clone(&second));

        let header = SealedHeader::default();
        assert!(rules.evaluate(&header, &header, &()));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[test]
    fn empty_set_accepts() {
        let rules: HeaderRuleSet<()> = HeaderRuleSet::new();
        assert!(rules.is_empty());
        let header = SealedHeader::default();
        assert!(rules.evaluate(&header, &header, &()));
    }
}
