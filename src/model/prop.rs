//! The propositional many-valued model (§4.6): shared by every
//! non-modal, non-quantified logic in the roster (`CPL`, `FDE`, `K3`,
//! `LP`, `K3W`, `B3E`, `RM3`). A model is just the set of (sentence,
//! designated) facts an open branch asserts about its atomics/predicated
//! leaves, plus the logic's [`Semantics`] to evaluate compound sentences
//! and check designation.

use indexmap::IndexMap;

use crate::error::ModelError;
use crate::lexicals::Sentence;
use crate::model::{Model, Semantics, Value};
use crate::proof::{Branch, NodeArena};

/// Infer a leaf's value from which designation facts an open branch
/// witnesses for it. A single-bit designation mark can't distinguish which
/// of several values on its side of the designation line produced it — a
/// `K3` node marked non-designated could be witnessing `F` or `N` — so a
/// side seen only once falls back to the same default a side never seen at
/// all would get: `N` over `F` when the logic has a gap, `B` over `T` when
/// it has a glut. Both sides present is only reachable for a logic with a
/// `B` value (`DesignationClosure`/`GlutClosure` would otherwise have
/// closed the branch).
fn infer(sem: &Semantics, seen_true: bool, seen_false: bool) -> Value {
    match (seen_true, seen_false) {
        (true, true) => {
            if sem.has_both() {
                Value::B
            } else {
                Value::T
            }
        }
        (false, true) | (false, false) => {
            if sem.has_gap() {
                Value::N
            } else {
                Value::F
            }
        }
        (true, false) => {
            if sem.has_both() {
                Value::B
            } else {
                Value::T
            }
        }
    }
}

pub struct PropModel {
    semantics: Semantics,
    facts: IndexMap<Sentence, (bool, bool)>,
}

impl PropModel {
    pub fn new(semantics: Semantics) -> Self {
        Self {
            semantics,
            facts: IndexMap::new(),
        }
    }

    fn leaf_value(&self, s: &Sentence) -> Value {
        let (t, f) = self.facts.get(s).copied().unwrap_or((false, false));
        infer(&self.semantics, t, f)
    }
}

impl Model for PropModel {
    fn read_branch(&mut self, branch: &Branch, arena: &NodeArena) {
        for &id in branch.nodes() {
            let node = arena.get(id);
            let (Some(s), Some(d)) = (&node.sentence, node.designated) else {
                continue;
            };
            if !(s.is_atomic() || s.is_predicated()) {
                continue;
            }
            let entry = self.facts.entry(s.clone()).or_insert((false, false));
            if d {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }
    }

    fn value_of(&self, sentence: &Sentence) -> Result<Value, ModelError> {
        match sentence {
            Sentence::Atomic(_) | Sentence::Predicated(_) => Ok(self.leaf_value(sentence)),
            Sentence::Operated(o) => {
                let a = self.value_of(&o.operands[0])?;
                let b = if o.operands.len() > 1 {
                    Some(self.value_of(&o.operands[1])?)
                } else {
                    None
                };
                Ok((self.semantics.truth_function)(o.operator, a, b))
            }
            Sentence::Quantified(_) => Err(ModelError::ModelValueError(
                "propositional model cannot evaluate a quantified sentence".to_string(),
            )),
        }
    }

    fn designates(&self, v: Value) -> bool {
        (self.semantics.designated)(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::Operator;
    use crate::model::value::{default_truth_function, strong_and, strong_or};
    use crate::proof::{Branch, BranchId, Node};

    fn cpl_semantics() -> Semantics {
        fn tf(op: Operator, a: Value, b: Option<Value>) -> Value {
            default_truth_function(strong_and, strong_or, op, a, b)
        }
        Semantics {
            values: &[Value::F, Value::T],
            designated: |v| v == Value::T,
            truth_function: tf,
        }
    }

    #[test]
    fn unconstrained_classical_atomic_defaults_false() {
        let model = PropModel::new(cpl_semantics());
        let a = Sentence::atomic(0, 0);
        assert_eq!(model.value_of(&a).unwrap(), Value::F);
    }

    #[test]
    fn read_branch_assigns_true_to_designated_atomic() {
        let mut branch = Branch::new(BranchId(0));
        let mut arena = NodeArena::new();
        let a = Sentence::atomic(0, 0);
        let id = arena.alloc(Node::new().sentence(a.clone()).designated(true));
        branch.append(id, arena.get(id));

        let mut model = PropModel::new(cpl_semantics());
        model.read_branch(&branch, &arena);
        assert_eq!(model.value_of(&a).unwrap(), Value::T);
    }
}
