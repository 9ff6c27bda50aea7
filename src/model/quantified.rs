//! The first-order model (§4.6 "Quantified logics carry a constant domain
//! read from the branch's constants"): `CFOL`'s bivalent valuation over
//! ground atomics/predications, with quantifiers evaluated by substituting
//! every domain constant in turn.

use indexmap::{IndexMap, IndexSet};

use crate::error::ModelError;
use crate::lexicals::{Operator, Quantifier, Sentence, Symbol};
use crate::model::value::{negate, strong_and, strong_or};
use crate::model::{Model, Value};
use crate::proof::{Branch, NodeArena};
use crate::rules::quantifier::substitute;

pub struct QuantModel {
    domain: IndexSet<Symbol>,
    facts: IndexMap<Sentence, (bool, bool)>,
}

impl Default for QuantModel {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantModel {
    pub fn new() -> Self {
        Self {
            domain: IndexSet::new(),
            facts: IndexMap::new(),
        }
    }

    fn leaf_value(&self, s: &Sentence) -> Value {
        match self.facts.get(s).copied() {
            Some((true, _)) => Value::T,
            Some((false, true)) => Value::F,
            None | Some((false, false)) => Value::F,
        }
    }
}

impl Model for QuantModel {
    fn read_branch(&mut self, branch: &Branch, arena: &NodeArena) {
        self.domain.extend(branch.constants());
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
        if self.domain.is_empty() {
            self.domain.insert(Symbol::new(0, 0));
        }
    }

    fn value_of(&self, sentence: &Sentence) -> Result<Value, ModelError> {
        match sentence {
            Sentence::Atomic(_) | Sentence::Predicated(_) => Ok(self.leaf_value(sentence)),
            Sentence::Quantified(q) => {
                let mut values = Vec::with_capacity(self.domain.len());
                for &c in &self.domain {
                    let instance = substitute(&q.body, q.variable, c);
                    values.push(self.value_of(&instance)?);
                }
                Ok(match q.quantifier {
                    Quantifier::Universal => {
                        if values.iter().all(|&v| v == Value::T) {
                            Value::T
                        } else {
                            Value::F
                        }
                    }
                    Quantifier::Existential => {
                        if values.iter().any(|&v| v == Value::T) {
                            Value::T
                        } else {
                            Value::F
                        }
                    }
                })
            }
            Sentence::Operated(o) => {
                let a = self.value_of(&o.operands[0])?;
                Ok(match o.operator {
                    Operator::Assertion => a,
                    Operator::Negation => negate(a),
                    _ => {
                        let b = self.value_of(&o.operands[1])?;
                        match o.operator {
                            Operator::Conjunction => strong_and(a, b),
                            Operator::Disjunction => strong_or(a, b),
                            Operator::MaterialConditional | Operator::Conditional => {
                                strong_or(negate(a), b)
                            }
                            Operator::MaterialBiconditional | Operator::Biconditional => {
                                strong_and(strong_or(negate(a), b), strong_or(negate(b), a))
                            }
                            _ => unreachable!("unary operators handled above"),
                        }
                    }
                })
            }
        }
    }

    fn designates(&self, v: Value) -> bool {
        v == Value::T
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::Predicate;
    use crate::proof::{Branch, BranchId, Node};

    #[test]
    fn universal_over_empty_domain_is_true() {
        let model = QuantModel::new();
        let var = Symbol::new(0, 0);
        let pred = Predicate {
            name: "F".into(),
            index: 0,
            subscript: 0,
            arity: 1,
        };
        let body = Sentence::predicated(pred, vec![crate::lexicals::Term::Variable(var)]);
        let q = Sentence::quantified(Quantifier::Universal, var, body);
        assert_eq!(model.value_of(&q).unwrap(), Value::T);
    }

    #[test]
    fn universal_false_when_one_instance_fails() {
        let mut branch = Branch::new(BranchId(0));
        let mut arena = NodeArena::new();
        let c = Symbol::new(0, 0);
        branch.add_constant(c);
        let pred = Predicate {
            name: "F".into(),
            index: 0,
            subscript: 0,
            arity: 1,
        };
        let ground = Sentence::predicated(pred.clone(), vec![crate::lexicals::Term::Constant(c)]);
        let id = arena.alloc(Node::new().sentence(ground).designated(false));
        branch.append(id, arena.get(id));

        let mut model = QuantModel::new();
        model.read_branch(&branch, &arena);
        let var = Symbol::new(0, 0);
        let body = Sentence::predicated(pred, vec![crate::lexicals::Term::Variable(var)]);
        let q = Sentence::quantified(Quantifier::Universal, var, body);
        assert_eq!(model.value_of(&q).unwrap(), Value::F);
    }
}
