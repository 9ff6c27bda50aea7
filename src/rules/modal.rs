//! The modal rule family (§4.6 "Modal logics carry a frame"): classical
//! bivalent propositional rules indexed by world, plus the
//! possibility/necessity world-creating rules and the frame-closure rules
//! (`K`/`D`/`T`/`S4`/`S5` differ only in which [`FrameProperty`] set they
//! register).
//!
//! Mirrors [`crate::rules::propositional`]'s pattern of deriving rule shape
//! from a declarative table rather than one hand-written class per
//! operator: here the "table" is simply the classical two-valued truth
//! function, since every modal logic in the roster is bivalent at each
//! world — the only logic-specific knob is the accessibility relation's
//! closure properties, handled by [`AccessRule`].

use crate::lexicals::{Operator, Sentence};
use crate::model::value::{default_truth_function, strong_and, strong_or, Semantics, Value};
use crate::proof::node::Node as PNode;
use crate::proof::{Branch, NodeArena, Target, CLOSURE_FLAG};
use crate::rules::{Adds, ClosureRule, Rule};

/// Classical bivalent semantics shared by every modal logic's per-world
/// propositional rules.
pub fn bivalent_semantics() -> Semantics {
    fn tf(op: Operator, a: Value, b: Option<Value>) -> Value {
        default_truth_function(strong_and, strong_or, op, a, b)
    }
    Semantics {
        values: &[Value::F, Value::T],
        designated: |v| v == Value::T,
        truth_function: tf,
    }
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

/// A non-modal operator's rule at whatever world its node asserts it.
pub struct ModalOperatorRule {
    name: &'static str,
    semantics: Semantics,
    operator: Operator,
    designated: bool,
    branching: bool,
}

impl ModalOperatorRule {
    pub fn new(name: &'static str, operator: Operator, designated: bool) -> Self {
        let semantics = bivalent_semantics();
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

    fn operands(s: &Sentence) -> &[std::rc::Rc<Sentence>] {
        match s {
            Sentence::Operated(o) => &o.operands,
            _ => unreachable!("targets() only matches Operated sentences"),
        }
    }
}

/// Every (operator, sign) rule instance for a modal logic's propositional
/// connectives (possibility/necessity are handled separately, by
/// [`witness_rules`]/[`universal_rules`]).
pub fn operator_rules(logic_name: &'static str) -> Vec<Box<dyn Rule>> {
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
            rules.push(Box::new(ModalOperatorRule::new(name, op, designated)));
        }
    }
    rules
}

impl Rule for ModalOperatorRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target> {
        branch
            .unticked_nodes()
            .filter_map(|id| {
                let node = arena.get(id);
                let s = node.sentence.as_ref()?;
                let w = node.world?;
                if node.designated != Some(self.designated) {
                    return None;
                }
                match s {
                    Sentence::Operated(o) if o.operator == self.operator => Some(
                        Target::new(branch.id())
                            .node(id)
                            .sentence(s.clone())
                            .designated(self.designated)
                            .world(w),
                    ),
                    _ => None,
                }
            })
            .collect()
    }

    fn apply(&self, target: &Target, _branch: &mut Branch, _arena: &NodeArena) -> Adds {
        let s = target.sentence.as_ref().expect("modal target carries its sentence");
        let w = target.world.expect("modal target carries its world");
        let operands = Self::operands(s);
        if operands.len() == 1 {
            let buckets = buckets_unary(&self.semantics, self.operator, self.designated);
            buckets
                .into_iter()
                .map(|b| vec![PNode::new().sentence((*operands[0]).clone()).designated(b[0]).world(w)])
                .collect()
        } else {
            let buckets = buckets_binary(&self.semantics, self.operator, self.designated);
            buckets
                .into_iter()
                .map(|b| {
                    vec![
                        PNode::new().sentence((*operands[0]).clone()).designated(b[0]).world(w),
                        PNode::new().sentence((*operands[1]).clone()).designated(b[1]).world(w),
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

fn unary_operand(s: &Sentence) -> &Sentence {
    match s {
        Sentence::Operated(o) if o.operands.len() == 1 => &o.operands[0],
        _ => unreachable!("possibility/necessity targets are always unary"),
    }
}

/// Possibility-designated (`◇A` true: witness one new accessible world with
/// `A` true) or Necessity-undesignated (`□A` false: witness one new
/// accessible world with `A` false). Both tick their source node since a
/// single witness discharges the existential claim.
pub struct WitnessRule {
    name: &'static str,
    operator: Operator,
    designated: bool,
}

impl WitnessRule {
    pub fn new(name: &'static str, operator: Operator, designated: bool) -> Self {
        Self {
            name,
            operator,
            designated,
        }
    }
}

impl Rule for WitnessRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target> {
        branch
            .unticked_nodes()
            .filter_map(|id| {
                let node = arena.get(id);
                let s = node.sentence.as_ref()?;
                let w = node.world?;
                if node.designated != Some(self.designated) {
                    return None;
                }
                match s {
                    Sentence::Operated(o) if o.operator == self.operator => Some(
                        Target::new(branch.id())
                            .node(id)
                            .sentence(s.clone())
                            .designated(self.designated)
                            .world(w),
                    ),
                    _ => None,
                }
            })
            .collect()
    }

    fn apply(&self, target: &Target, branch: &mut Branch, _arena: &NodeArena) -> Adds {
        let s = target.sentence.as_ref().expect("witness target carries its sentence");
        let w = target.world.expect("witness target carries its world");
        let inner = unary_operand(s).clone();
        let w2 = branch.new_world();
        branch.record_access(w, w2);
        vec![vec![PNode::new().sentence(inner).designated(self.designated).world(w2)]]
    }

    fn rank(&self) -> i32 {
        1
    }
}

/// Necessity-designated (`□A` true: push `A` true to every world already
/// accessible, and to any discovered later) or Possibility-undesignated
/// (`◇A` false: push `A` false to every accessible world). Never ticks —
/// new worlds can appear after this node is first visited — so re-firing
/// is bounded instead by the branch's per-(node, world) instantiation
/// tracker (§4.4).
pub struct UniversalRule {
    name: &'static str,
    operator: Operator,
    designated: bool,
}

impl UniversalRule {
    pub fn new(name: &'static str, operator: Operator, designated: bool) -> Self {
        Self {
            name,
            operator,
            designated,
        }
    }
}

impl Rule for UniversalRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target> {
        let mut out = Vec::new();
        for id in branch.unticked_nodes() {
            let node = arena.get(id);
            let Some(s) = node.sentence.as_ref() else { continue };
            let Some(w) = node.world else { continue };
            if node.designated != Some(self.designated) {
                continue;
            }
            let matches_op = matches!(s, Sentence::Operated(o) if o.operator == self.operator);
            if !matches_op {
                continue;
            }
            for w2 in branch.accesses_from(w) {
                if !branch.is_modal_instantiated(id, w2) {
                    out.push(
                        Target::new(branch.id())
                            .node(id)
                            .sentence(s.clone())
                            .designated(self.designated)
                            .access(w, w2),
                    );
                }
            }
        }
        out
    }

    fn apply(&self, target: &Target, branch: &mut Branch, _arena: &NodeArena) -> Adds {
        let s = target.sentence.as_ref().expect("universal target carries its sentence");
        let w2 = target.world2.expect("universal target carries its destination world");
        let inner = unary_operand(s).clone();
        if let Some(node) = target.node {
            branch.mark_modal_instantiated(node, w2);
        }
        vec![vec![PNode::new().sentence(inner).designated(self.designated).world(w2)]]
    }

    fn ticks_source(&self) -> bool {
        false
    }

    fn rank(&self) -> i32 {
        0
    }
}

/// The four Possibility/Necessity rules, one per (operator, designated)
/// pair.
pub fn modal_frame_operator_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(WitnessRule::new(
            "Modal:Possibility:designated",
            Operator::Possibility,
            true,
        )),
        Box::new(UniversalRule::new(
            "Modal:Possibility:undesignated",
            Operator::Possibility,
            false,
        )),
        Box::new(UniversalRule::new(
            "Modal:Necessity:designated",
            Operator::Necessity,
            true,
        )),
        Box::new(WitnessRule::new(
            "Modal:Necessity:undesignated",
            Operator::Necessity,
            false,
        )),
    ]
}

/// Which accessibility-closure property a logic's frame enforces
/// (spec.md §4.6 "serial/reflexive/transitive/symmetric closures are
/// applied per logic").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameProperty {
    Serial,
    Reflexive,
    Transitive,
    Symmetric,
}

/// Generates the missing access fact (if any) a frame property requires;
/// self-limiting since `targets` only offers facts not already present, so
/// it never needs to tick a source node (there isn't one).
pub struct AccessRule {
    name: &'static str,
    property: FrameProperty,
}

impl AccessRule {
    pub fn new(name: &'static str, property: FrameProperty) -> Self {
        Self { name, property }
    }
}

/// Build the access rules a logic's frame needs, named after `logic_name`.
pub fn access_rules(logic_name: &'static str, properties: &[FrameProperty]) -> Vec<Box<dyn Rule>> {
    properties
        .iter()
        .map(|&p| {
            let name: &'static str =
                Box::leak(format!("{logic_name}:Access:{p:?}").into_boxed_str());
            Box::new(AccessRule::new(name, p)) as Box<dyn Rule>
        })
        .collect()
}

impl Rule for AccessRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, _arena: &NodeArena) -> Vec<Target> {
        match self.property {
            FrameProperty::Serial => branch
                .worlds()
                .filter(|&w| branch.accesses_from(w).next().is_none())
                .map(|w| Target::new(branch.id()).world(w))
                .collect(),
            FrameProperty::Reflexive => branch
                .worlds()
                .filter(|&w| !branch.has_access(w, w))
                .map(|w| Target::new(branch.id()).world(w))
                .collect(),
            FrameProperty::Transitive => {
                let mut out = Vec::new();
                for (w1, w2) in branch.accesses() {
                    for w3 in branch.accesses_from(w2) {
                        if !branch.has_access(w1, w3) {
                            out.push(Target::new(branch.id()).access(w1, w3));
                        }
                    }
                }
                out
            }
            FrameProperty::Symmetric => branch
                .accesses()
                .filter(|&(w1, w2)| !branch.has_access(w2, w1))
                .map(|(w1, w2)| Target::new(branch.id()).access(w2, w1))
                .collect(),
        }
    }

    fn apply(&self, target: &Target, branch: &mut Branch, _arena: &NodeArena) -> Adds {
        match self.property {
            FrameProperty::Serial => {
                let w1 = target.world.expect("serial target carries its world");
                let w2 = branch.new_world();
                vec![vec![PNode::new().access(w1, w2)]]
            }
            FrameProperty::Reflexive => {
                let w = target.world.expect("reflexive target carries its world");
                vec![vec![PNode::new().access(w, w)]]
            }
            FrameProperty::Transitive | FrameProperty::Symmetric => {
                let w1 = target.world1.expect("access target carries world1");
                let w2 = target.world2.expect("access target carries world2");
                vec![vec![PNode::new().access(w1, w2)]]
            }
        }
    }

    fn ticks_source(&self) -> bool {
        false
    }

    fn rank(&self) -> i32 {
        0
    }

    /// A serial access step never ticks and the world it mints has no
    /// outgoing access either, so without a guard it would be its own next
    /// target forever. Grounded on `d.py`'s `Serial.applies_to_branch`,
    /// which refuses to fire when the tableau's last-applied rule was
    /// itself — expansion stops the moment nothing else is left to do
    /// instead of running on to `max_steps`.
    fn blocked_after_last(&self, last_rule: Option<&'static str>) -> bool {
        self.property == FrameProperty::Serial && last_rule == Some(self.name)
    }
}

/// Same sentence asserted with opposite designation *at the same world*:
/// the modal analogue of [`crate::rules::propositional::DesignationClosure`],
/// scoped by world since a sentence may consistently hold at one world and
/// fail at another.
pub struct ModalDesignationClosure;

impl ClosureRule for ModalDesignationClosure {
    fn name(&self) -> &'static str {
        "ModalDesignationClosure"
    }

    fn check(&self, branch: &Branch, arena: &NodeArena) -> Option<Target> {
        for &id in branch.nodes() {
            let node = arena.get(id);
            let Some(s) = &node.sentence else { continue };
            let Some(d) = node.designated else { continue };
            let Some(w) = node.world else { continue };
            let opposite = branch.find_by_sentence_designated(s, Some(!d));
            if let Some(&other) = opposite.iter().find(|&&o| arena.get(o).world == Some(w)) {
                return Some(
                    Target::new(branch.id())
                        .node(id)
                        .nodes(vec![id, other])
                        .flag(CLOSURE_FLAG),
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
    use crate::proof::BranchId;

    #[test]
    fn necessity_designated_is_non_branching() {
        let rule = ModalOperatorRule::new("t", Operator::Negation, true);
        assert!(!rule.branching);
    }

    #[test]
    fn disjunction_designated_branches_at_a_world() {
        let rule = ModalOperatorRule::new("t", Operator::Disjunction, true);
        assert!(rule.branching);
    }

    #[test]
    fn modal_closure_requires_same_world() {
        let mut branch = Branch::new(BranchId(0));
        let mut arena = NodeArena::new();
        let s = Sentence::atomic(0, 0);
        let n1 = arena.alloc(PNode::new().sentence(s.clone()).designated(true).world(0));
        branch.append(n1, arena.get(n1));
        let n2 = arena.alloc(PNode::new().sentence(s.clone()).designated(false).world(1));
        branch.append(n2, arena.get(n2));
        assert!(ModalDesignationClosure.check(&branch, &arena).is_none());

        let n3 = arena.alloc(PNode::new().sentence(s.clone()).designated(false).world(0));
        branch.append(n3, arena.get(n3));
        assert!(ModalDesignationClosure.check(&branch, &arena).is_some());
    }

    #[test]
    fn reflexive_access_rule_targets_every_world_once() {
        let mut branch = Branch::new(BranchId(0));
        branch.new_world();
        let rule = AccessRule::new("t", FrameProperty::Reflexive);
        let targets = rule.targets(&branch, &NodeArena::new());
        assert_eq!(targets.len(), 1);
    }
}
