//! Quantifier rules for `CFOL` (§4.6 "Quantified logics carry a constant
//! domain read from the branch's constants").
//!
//! Universal-designated and existential-undesignated are the "for every
//! constant on the branch" shape (never ticks its source — new constants
//! can appear later from other rules, so the node must stay available,
//! tracked instead via the branch's QuantifierInstantiations helper,
//! §4.4). Existential-designated and universal-undesignated only ever need
//! one fresh witness constant, so they tick immediately.

use std::rc::Rc;

use crate::lexicals::{Quantified, Quantifier, Sentence, Symbol, Term, CONSTANT_ALPHABET_LEN};
use crate::proof::node::Node as PNode;
use crate::proof::{Branch, NodeArena, Target};
use crate::rules::{Adds, Rule};

pub(crate) fn substitute(s: &Sentence, var: Symbol, constant: Symbol) -> Sentence {
    match s {
        Sentence::Atomic(_) => s.clone(),
        Sentence::Predicated(p) => {
            let params = p
                .parameters
                .iter()
                .map(|t| match t {
                    Term::Variable(v) if *v == var => Term::Constant(constant),
                    other => *other,
                })
                .collect();
            Sentence::Predicated(crate::lexicals::Predicated {
                predicate: p.predicate.clone(),
                parameters: params,
            })
        }
        Sentence::Quantified(q) => Sentence::Quantified(Quantified {
            quantifier: q.quantifier,
            variable: q.variable,
            body: Rc::new(substitute(&q.body, var, constant)),
        }),
        Sentence::Operated(o) => Sentence::operated(
            o.operator,
            o.operands.iter().map(|op| substitute(op, var, constant)).collect(),
        ),
    }
}

fn quantified_parts(s: &Sentence) -> (Quantifier, Symbol, &Sentence) {
    match s {
        Sentence::Quantified(q) => (q.quantifier, q.variable, &q.body),
        _ => unreachable!("targets() only matches Quantified sentences"),
    }
}

/// The smallest constant symbol not already referenced on `branch`.
fn fresh_constant(branch: &Branch) -> Symbol {
    let mut ordinal = 0u32;
    loop {
        let candidate = Symbol::from_ordinal(ordinal, CONSTANT_ALPHABET_LEN);
        if !branch.constants().any(|c| c == candidate) {
            return candidate;
        }
        ordinal += 1;
    }
}

/// `witness` selects whether this rule instance produces one fresh
/// witness (ticking) or instantiates every known branch constant
/// (non-ticking, re-fireable).
pub struct QuantifierRule {
    name: &'static str,
    quantifier: Quantifier,
    designated: bool,
    witness: bool,
}

impl QuantifierRule {
    pub fn new(name: &'static str, quantifier: Quantifier, designated: bool, witness: bool) -> Self {
        Self {
            name,
            quantifier,
            designated,
            witness,
        }
    }
}

/// The four CFOL quantifier rules, one per (quantifier, designated) pair;
/// `witness` is `true` exactly when (quantifier, designated) is
/// existential-designated or universal-undesignated.
pub fn quantifier_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(QuantifierRule::new(
            "CFOL:Universal:designated",
            Quantifier::Universal,
            true,
            false,
        )),
        Box::new(QuantifierRule::new(
            "CFOL:Universal:undesignated",
            Quantifier::Universal,
            false,
            true,
        )),
        Box::new(QuantifierRule::new(
            "CFOL:Existential:designated",
            Quantifier::Existential,
            true,
            true,
        )),
        Box::new(QuantifierRule::new(
            "CFOL:Existential:undesignated",
            Quantifier::Existential,
            false,
            false,
        )),
    ]
}

impl Rule for QuantifierRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn targets(&self, branch: &Branch, arena: &NodeArena) -> Vec<Target> {
        let matching = || {
            branch.unticked_nodes().filter_map(|id| {
                let node = arena.get(id);
                let s = node.sentence.as_ref()?;
                if node.designated != Some(self.designated) {
                    return None;
                }
                match s {
                    Sentence::Quantified(q) if q.quantifier == self.quantifier => Some((id, s.clone())),
                    _ => None,
                }
            })
        };

        if self.witness {
            matching()
                .map(|(id, s)| {
                    Target::new(branch.id())
                        .node(id)
                        .sentence(s)
                        .designated(self.designated)
                })
                .collect()
        } else {
            let mut out = Vec::new();
            for (id, s) in matching() {
                let known: Vec<Symbol> = branch.constants().collect();
                if known.is_empty() {
                    out.push(
                        Target::new(branch.id())
                            .node(id)
                            .sentence(s.clone())
                            .designated(self.designated)
                            .constant(fresh_constant(branch)),
                    );
                } else {
                    for c in known {
                        if !branch.is_instantiated(id, c) {
                            out.push(
                                Target::new(branch.id())
                                    .node(id)
                                    .sentence(s.clone())
                                    .designated(self.designated)
                                    .constant(c),
                            );
                        }
                    }
                }
            }
            out
        }
    }

    fn apply(&self, target: &Target, branch: &mut Branch, _arena: &NodeArena) -> Adds {
        let s = target.sentence.as_ref().expect("quantifier target carries its sentence");
        let (_, var, body) = quantified_parts(s);
        let constant = if self.witness {
            fresh_constant(branch)
        } else {
            target.constant.expect("non-witness quantifier target carries its constant")
        };
        branch.add_constant(constant);
        if let Some(node) = target.node {
            branch.mark_instantiated(node, constant);
        }
        vec![vec![PNode::new()
            .sentence(substitute(body, var, constant))
            .designated(self.designated)]]
    }

    fn ticks_source(&self) -> bool {
        self.witness
    }

    fn rank(&self) -> i32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::Predicate;
    use crate::proof::BranchId;

    #[test]
    fn substitute_replaces_only_the_bound_variable() {
        let var = Symbol::new(0, 0);
        let pred = Predicate {
            name: "F".into(),
            index: 0,
            subscript: 0,
            arity: 1,
        };
        let body = Sentence::predicated(pred, vec![Term::Variable(var)]);
        let out = substitute(&body, var, Symbol::new(0, 0));
        assert!(matches!(out, Sentence::Predicated(_)));
    }

    #[test]
    fn fresh_constant_skips_existing() {
        let mut b = Branch::new(BranchId(0));
        b.add_constant(Symbol::from_ordinal(0, CONSTANT_ALPHABET_LEN));
        let fresh = fresh_constant(&b);
        assert_ne!(fresh, Symbol::from_ordinal(0, CONSTANT_ALPHABET_LEN));
    }
}
