//! The generic many-valued propositional rule family (§4.3, §4.6).
//!
//! Rather than hand-transcribing a rule class per (operator, sign) pair for
//! every logic — ten operators times two signs times seven logics — a
//! single [`OperatorRule`] is parameterized by the logic's [`Semantics`]
//! (its value set, designation predicate, and truth table) and derives its
//! own branch structure mechanically: it enumerates every pair of operand
//! values consistent with the node's required result sign, groups those
//! pairs by each operand's *designated-ness* (the only distinction further
//! decomposition or closure ever consults), and emits one branch per
//! distinct group. This is the logic's "declarative" rule bundle (spec.md
//! §4.3) — here the declaration is the truth table, not a rule class — and
//! it automatically degrades to the familiar deterministic
//! two-valued tableau rules for `CPL`/`CFOL` since a two-valued truth table
//! has exactly one value per designation bucket.
//!
//! The two extra closure rules below exist because boolean designation
//! alone can't distinguish "both designated" (`B`) from "neither" (`N`)
//! when a logic's value set lacks one of them: a literal `p` and its
//! negation being simultaneously designated is a genuine contradiction
//! only in logics without `B` ([`GlutClosure`]); both being undesignated is
//! only a contradiction in logics without `N` ([`GapClosure`]). Whether a
//! logic needs either is read directly off its `Semantics::values`, so
//! nothing here is hand-tuned per logic either.

use crate::lexicals::{Operator, Sentence};
use crate::model::value::Semantics;
use crate::proof::node::Node as PNode;
use crate::proof::{Branch, NodeArena, Target};
use crate::rules::{Adds, ClosureRule, Rule};

/// `name` must be a `'static` label unique within the owning logic's
/// registry (e.g. `"FDE:Conjunction:designated"`), used for display only —
/// propositional operator rules tick their source node on every
/// application, so they never need the branch's applied-set to prevent
/// re-firing.
pub struct OperatorRule {
    name: &'static str,
    semantics: Semantics,
    operator: Operator,
    designated: bool,
    branching: bool,
}

fn buckets_unary(sem: &Semantics, operator: Operator, target_designated: bool) -> Vec<[bool; 1]> {
    let mut out = Vec::new();
    for &v in sem.values {
        let result = (sem.truth_function)(operator, v, None);
        if (sem.designated)(result) == target_designated {
            let d = (sem.designated)(v);
            if !out.contains(&[d]) {
                out.push([d]);
            }
        }
    }
    out
}

fn buckets_binary(sem: &Semantics, operator: Operator, target_designated: bool) -> Vec<[bool; 2]> {
    let mut out = Vec::new();
    for &va in sem.values {
        for &vb in sem.values {
            let result = (sem.truth_function)(operator, va, Some(vb));
            if (sem.designated)(result) == target_designated {
                let pair = [(sem.designated)(va), (sem.designated)(vb)];
                if !out.contains(&pair) {
                    out.push(pair);
                }
            }
        }
    }
    out
}

impl OperatorRule {
    pub fn new(name: &'static str, semantics: Semantics, operator: Operator, designated: bool) -> Self {
        let branching = if operator.arity() == 1 {
            buckets_unary(&semantics, operator, designated).len() > 1
        } else {
            buckets_binary(&semantics, operator, designated).len() > 1
        };
        Self {
            name,
            semantics,
            operator,
            designated,
            branching,
        }
    }

    fn operands<'s>(s: &'s Sentence) -> &'s [std::rc::Rc<Sentence>] {
        match s {
            Sentence::Operated(o) => &o.operands,
            _ => unreachable!("targets() only matches Operated sentences"),
        }
    }
}

/// Build every (operator, sign) rule instance for a logic's full native
/// operator set, in the fixed order spec.md's worked operator list uses.
pub fn operator_rules(logic_name: &'static str, semantics: Semantics) -> Vec<Box<dyn Rule>> {
    use Operator::*;
    const OPERATORS: &[Operator] = &[
        Assertion,
        Negation,
        Conjunction,
        Disjunction,
        MaterialConditional,
        MaterialBiconditional,
        Conditional,
        Biconditional,
    ];
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();
    for &op in OPERATORS {
        for &designated in &[true, false] {
            let name: &'static str = Box::leak(
                format!(
                    "{logic_name}:{op:?}:{}",
                    if designated { "designated" } else { "undesignated" }
                )
                .into_boxed_str(),
            );
            rules.push(Box::new(OperatorRule::new(name, semantics, op, designated)));
        }
    }
    rules
}

impl Rule for OperatorRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target> {
        branch
            .unticked_nodes()
            .filter_map(|id| {
                let node = arena.get(id);
                let s = node.sentence.as_ref()?;
                if node.designated != Some(self.designated) {
                    return None;
                }
                match s {
                    Sentence::Operated(o) if o.operator == self.operator => Some(
                        Target::new(branch.id())
                            .node(id)
                            .sentence(s.clone())
                            .designated(self.designated),
                    ),
                    _ => None,
                }
            })
            .collect()
    }

    fn apply(&self, target: &Target, _branch: &mut Branch, _arena: &NodeArena) -> Adds {
        let s = target.sentence.as_ref().expect("propositional target carries its sentence");
        let operands = Self::operands(s);
        if operands.len() == 1 {
            let buckets = buckets_unary(&self.semantics, self.operator, self.designated);
            buckets
                .into_iter()
                .map(|b| vec![PNode::new().sentence((*operands[0]).clone()).designated(b[0])])
                .collect()
        } else {
            let buckets = buckets_binary(&self.semantics, self.operator, self.designated);
            buckets
                .into_iter()
                .map(|b| {
                    vec![
                        PNode::new().sentence((*operands[0]).clone()).designated(b[0]),
                        PNode::new().sentence((*operands[1]).clone()).designated(b[1]),
                    ]
                })
                .collect()
        }
    }

    fn rank(&self) -> i32 {
        if self.branching {
            1
        } else {
            0
        }
    }
}

/// Same sentence occurrence marked both designated and undesignated: a
/// contradiction in every logic, since a sentence has exactly one value.
pub struct DesignationClosure;

impl ClosureRule for DesignationClosure {
    fn name(&self) -> &'static str {
        "DesignationClosure"
    }

    fn check(&self, branch: &Branch, arena: &NodeArena) -> Option<Target> {
        for &id in branch.nodes() {
            let node = arena.get(id);
            let Some(s) = &node.sentence else { continue };
            let Some(d) = node.designated else { continue };
            let opposite = branch.find_by_sentence_designated(s, Some(!d));
            if let Some(&other) = opposite.first() {
                return Some(
                    Target::new(branch.id())
                        .node(id)
                        .nodes(vec![id, other])
                        .flag(crate::proof::CLOSURE_FLAG),
                );
            }
        }
        None
    }
}

/// A literal and its negation both designated: only a contradiction in
/// logics whose value set has no `B` (both-true-and-false) value.
pub struct GlutClosure;

impl ClosureRule for GlutClosure {
    fn name(&self) -> &'static str {
        "GlutClosure"
    }

    fn check(&self, branch: &Branch, arena: &NodeArena) -> Option<Target> {
        for &id in branch.nodes() {
            let node = arena.get(id);
            let Some(s) = &node.sentence else { continue };
            if node.designated != Some(true) {
                continue;
            }
            let negated = s.negate();
            let hits = branch.find_by_sentence_designated(&negated, Some(true));
            if let Some(&other) = hits.first() {
                return Some(
                    Target::new(branch.id())
                        .node(id)
                        .nodes(vec![id, other])
                        .flag(crate::proof::CLOSURE_FLAG),
                );
            }
        }
        None
    }
}

/// A literal and its negation both undesignated: only a contradiction in
/// logics whose value set has no `N` (neither-true-nor-false) value.
pub struct GapClosure;

impl ClosureRule for GapClosure {
    fn name(&self) -> &'static str {
        "GapClosure"
    }

    fn check(&self, branch: &Branch, arena: &NodeArena) -> Option<Target> {
        for &id in branch.nodes() {
            let node = arena.get(id);
            let Some(s) = &node.sentence else { continue };
            if node.designated != Some(false) {
                continue;
            }
            let negated = s.negate();
            let hits = branch.find_by_sentence_designated(&negated, Some(false));
            if let Some(&other) = hits.first() {
                return Some(
                    Target::new(branch.id())
                        .node(id)
                        .nodes(vec![id, other])
                        .flag(crate::proof::CLOSURE_FLAG),
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::Sentence;
    use crate::model::value::{negate, strong_and, strong_or, Value};
    use crate::proof::BranchId;

    fn cpl_semantics() -> Semantics {
        fn tf(op: Operator, a: Value, b: Option<Value>) -> Value {
            crate::model::value::default_truth_function(strong_and, strong_or, op, a, b)
        }
        Semantics {
            values: &[Value::F, Value::T],
            designated: |v| v == Value::T,
            truth_function: tf,
        }
    }

    #[test]
    fn classical_conjunction_designated_is_non_branching_single_bucket() {
        let rule = OperatorRule::new("t", cpl_semantics(), Operator::Conjunction, true);
        assert!(!rule.branching);
    }

    #[test]
    fn classical_disjunction_designated_branches() {
        let rule = OperatorRule::new("t", cpl_semantics(), Operator::Disjunction, true);
        assert!(rule.branching);
    }

    #[test]
    fn designation_closure_detects_same_sentence_conflict() {
        let mut branch = Branch::new(BranchId(0));
        let mut arena = NodeArena::new();
        let s = Sentence::atomic(0, 0);
        let n1 = arena.alloc(PNode::new().sentence(s.clone()).designated(true));
        branch.append(n1, arena.get(n1));
        let n2 = arena.alloc(PNode::new().sentence(s.clone()).designated(false));
        branch.append(n2, arena.get(n2));
        assert!(DesignationClosure.check(&branch, &arena).is_some());
    }

    #[test]
    fn negate_helper_round_trips() {
        assert_eq!(negate(negate(Value::T)), Value::T);
    }
}
