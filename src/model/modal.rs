//! The modal model (§4.6 "Modal logics carry a frame"): a set of worlds,
//! an accessibility relation, and a bivalent valuation at each world —
//! shared by `K`/`D`/`T`/`S4`/`S5`, which differ only in which frame
//! property already shaped the branch's access facts by the time
//! `read_branch` runs (the closure, not the model, is where `K` vs `S5`
//! actually lives — see [`crate::rules::modal::AccessRule`]).

use indexmap::{IndexMap, IndexSet};

use crate::error::ModelError;
use crate::lexicals::{Operator, Sentence};
use crate::model::value::{negate, strong_and, strong_or};
use crate::model::{Model, Value};
use crate::proof::{Branch, NodeArena};

pub struct ModalModel {
    worlds: IndexSet<u32>,
    access: IndexSet<(u32, u32)>,
    facts: IndexMap<(Sentence, u32), (bool, bool)>,
}

impl Default for ModalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalModel {
    pub fn new() -> Self {
        Self {
            worlds: IndexSet::new(),
            access: IndexSet::new(),
            facts: IndexMap::new(),
        }
    }

    fn leaf_value(&self, s: &Sentence, w: u32) -> Value {
        match self.facts.get(&(s.clone(), w)).copied() {
            Some((true, _)) => Value::T,
            Some((false, true)) => Value::F,
            None | Some((false, false)) => Value::F,
        }
    }

    fn accesses_from(&self, w: u32) -> impl Iterator<Item = u32> + '_ {
        self.access.iter().filter(move |&&(a, _)| a == w).map(|&(_, b)| b)
    }

    fn value_of_at(&self, sentence: &Sentence, w: u32) -> Result<Value, ModelError> {
        match sentence {
            Sentence::Atomic(_) | Sentence::Predicated(_) => Ok(self.leaf_value(sentence, w)),
            Sentence::Operated(o) if o.operator == Operator::Possibility => {
                let inner = &o.operands[0];
                let mut any_accessible = false;
                for w2 in self.accesses_from(w) {
                    any_accessible = true;
                    if self.value_of_at(inner, w2)? == Value::T {
                        return Ok(Value::T);
                    }
                }
                let _ = any_accessible;
                Ok(Value::F)
            }
            Sentence::Operated(o) if o.operator == Operator::Necessity => {
                let inner = &o.operands[0];
                for w2 in self.accesses_from(w) {
                    if self.value_of_at(inner, w2)? == Value::F {
                        return Ok(Value::F);
                    }
                }
                Ok(Value::T)
            }
            Sentence::Operated(o) => {
                let a = self.value_of_at(&o.operands[0], w)?;
                match o.operator {
                    Operator::Assertion => Ok(a),
                    Operator::Negation => Ok(negate(a)),
                    _ => {
                        let b = self.value_of_at(&o.operands[1], w)?;
                        Ok(match o.operator {
                            Operator::Conjunction => strong_and(a, b),
                            Operator::Disjunction => strong_or(a, b),
                            Operator::MaterialConditional | Operator::Conditional => {
                                strong_or(negate(a), b)
                            }
                            Operator::MaterialBiconditional | Operator::Biconditional => {
                                strong_and(strong_or(negate(a), b), strong_or(negate(b), a))
                            }
                            _ => unreachable!("modal operators handled above"),
                        })
                    }
                }
            }
            Sentence::Quantified(_) => Err(ModelError::ModelValueError(
                "modal model cannot evaluate a quantified sentence".to_string(),
            )),
        }
    }
}

impl Model for ModalModel {
    fn read_branch(&mut self, branch: &Branch, arena: &NodeArena) {
        self.worlds.extend(branch.worlds());
        self.access.extend(branch.accesses());
        for &id in branch.nodes() {
            let node = arena.get(id);
            let (Some(s), Some(d), Some(w)) = (&node.sentence, node.designated, node.world)
            else {
                continue;
            };
            if !(s.is_atomic() || s.is_predicated()) {
                continue;
            }
            let entry = self.facts.entry((s.clone(), w)).or_insert((false, false));
            if d {
                entry.0 = true;
            } else {
                entry.1 = true;
            }
        }
    }

    fn value_of(&self, sentence: &Sentence) -> Result<Value, ModelError> {
        self.value_of_at(sentence, 0)
    }

    fn designates(&self, v: Value) -> bool {
        v == Value::T
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::{Branch, BranchId, Node};

    #[test]
    fn necessity_true_when_every_accessible_world_is_true() {
        let mut branch = Branch::new(BranchId(0));
        let mut arena = NodeArena::new();
        let a = Sentence::atomic(0, 0);
        branch.new_world();
        let w1 = branch.new_world();
        branch.record_access(0, w1);
        let id = arena.alloc(Node::new().sentence(a.clone()).designated(true).world(w1));
        branch.append(id, arena.get(id));

        let mut model = ModalModel::new();
        model.read_branch(&branch, &arena);
        let la = Sentence::operated(Operator::Necessity, vec![a]);
        assert_eq!(model.value_of(&la).unwrap(), Value::T);
    }
}
