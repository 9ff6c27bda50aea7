//! The rule registry's shared vocabulary (§4.3): the `Rule`/`ClosureRule`
//! traits every logic's bundle is built from, plus the generic per-family
//! rule engines (`propositional`, `quantifier`, `modal`) that turn a
//! logic's declarative truth table / frame properties into concrete rule
//! instances, so adding a logic to the roster means writing data, not a new
//! rule class per operator.

pub mod modal;
pub mod propositional;
pub mod quantifier;

use crate::proof::{Branch, Node, NodeArena, Target};

/// One list of node descriptions per new sibling branch; a single-list
/// `Adds` extends the current branch, a multi-list `Adds` splits it once
/// per list (spec.md §4.3).
pub type Adds = Vec<Vec<Node>>;

/// A non-closure rule: finds target sites on a branch and describes what a
/// match adds.
pub trait Rule {
    /// Stable identifier, used for the branch's per-node "applied" tracking
    /// and surfaced in `Target::rule`/history entries.
    fn name(&self) -> &'static str;

    /// Candidate application sites on `branch`, already filtered against
    /// the branch's applied-set (AppliedNodes, §4.4) so a rule never
    /// reoffers a site it has already consumed.
    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target>;

    /// Realize `target` into node descriptions for each resulting branch.
    /// Takes the source branch mutably so rules that allocate fresh
    /// constants/worlds or update instantiation trackers (§4.4) can do so
    /// directly, *before* the engine clones it for any split children —
    /// which is how those children end up inheriting the update, matching
    /// §3's split-inheritance contract without the engine needing to know
    /// which rules touch branch-owned helper state.
    fn apply(&self, target: &Target, branch: &mut Branch, arena: &NodeArena) -> Adds;

    /// Whether a successful application ticks the target's source node
    /// (spec.md §4.5 "If the rule is annotated to tick its source node").
    /// Quantifier/modal-universal rules return `false` since they must
    /// stay available for constants/worlds discovered later.
    fn ticks_source(&self) -> bool {
        true
    }

    /// Static score for `is_rank_optim` (§4.5 P2): lower is preferred.
    /// Non-branching rules default to 0, branching rules should override
    /// to 1 so the scheduler prefers them only when nothing cheaper exists.
    fn rank(&self) -> i32 {
        0
    }

    /// Whether this rule must sit out a step given the name of the rule the
    /// scheduler applied last. Every rule but the serial-frame access rule
    /// is happy to reapply back to back; that one isn't, since each world it
    /// mints is itself a fresh serial target (§4.6).
    fn blocked_after_last(&self, _last_rule: Option<&'static str>) -> bool {
        false
    }
}

/// A closure rule: instead of extending a branch, marks it closed.
pub trait ClosureRule {
    fn name(&self) -> &'static str;

    /// `Some(target)` if `branch` meets this rule's closure criterion.
    fn check(&self, branch: &Branch, arena: &NodeArena) -> Option<Target>;
}

/// An ordered list of rules considered together in one scheduler pass
/// (spec.md §4.3 "rule_groups: ordered list of rule groups").
pub struct RuleGroup {
    pub name: &'static str,
    pub rules: Vec<Box<dyn Rule>>,
}

impl RuleGroup {
    pub fn new(name: &'static str, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { name, rules }
    }
}
