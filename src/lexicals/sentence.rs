//! The sentence free algebra (§3): `Atomic | Predicated | Quantified | Operated`.
//!
//! Every variant is immutable and structurally (not pointer-) comparable:
//! children are stored behind `Rc` purely so `Sentence::clone()` and
//! `negate()` stay O(1) regardless of subtree size, but `PartialEq`/`Hash`/
//! `Ord` deref through the `Rc` and compare values, matching spec.md's "no
//! structural sharing required but structural equality is required".
//!
//! `#[derive(PartialOrd, Ord)]` on `Sentence` compares variants in
//! declaration order first (the "kind-tag" of §3's canonical tuple), then
//! fields in declaration order — which for `Operated`/`Quantified` recurses
//! into operator/quantifier id before subterms, exactly the tuple spec.md
//! describes. The variant order below (Atomic, Predicated, Quantified,
//! Operated) is an implementation choice, stable across runs because it's
//! fixed at compile time.

use std::rc::Rc;

use crate::lexicals::predicate::Predicate;
use crate::lexicals::term::{Symbol, Term};

/// Number of atomic root symbols before subscript-extension kicks in
/// (`a`..`e` in both notations).
pub const ATOMIC_ALPHABET_LEN: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantifier {
    Universal,
    Existential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Assertion,
    Negation,
    Possibility,
    Necessity,
    Conjunction,
    Disjunction,
    MaterialConditional,
    MaterialBiconditional,
    Conditional,
    Biconditional,
}

impl Operator {
    pub fn arity(self) -> u8 {
        use Operator::*;
        match self {
            Assertion | Negation | Possibility | Necessity => 1,
            Conjunction
            | Disjunction
            | MaterialConditional
            | MaterialBiconditional
            | Conditional
            | Biconditional => 2,
        }
    }

    pub fn is_modal(self) -> bool {
        matches!(self, Operator::Possibility | Operator::Necessity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Predicated {
    pub predicate: Predicate,
    pub parameters: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantified {
    pub quantifier: Quantifier,
    pub variable: Symbol,
    pub body: Rc<Sentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operated {
    pub operator: Operator,
    pub operands: Vec<Rc<Sentence>>,
}

/// A sentence: the node type of the free algebra described in spec.md §3.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sentence {
    Atomic(Symbol),
    Predicated(Predicated),
    Quantified(Quantified),
    Operated(Operated),
}

impl Sentence {
    pub fn atomic(index: u8, subscript: u32) -> Self {
        Sentence::Atomic(Symbol::new(index, subscript))
    }

    pub fn atomic_ordinal(ordinal: u32) -> Self {
        Sentence::Atomic(Symbol::from_ordinal(ordinal, ATOMIC_ALPHABET_LEN))
    }

    /// Build a predicated sentence. Panics if `parameters.len()` doesn't
    /// match `predicate.arity` — callers (parsers, rule `apply`s) are
    /// expected to have already validated this; see
    /// [`crate::error::ConfigError`] for the checked path used at the API
    /// boundary.
    pub fn predicated(predicate: Predicate, parameters: Vec<Term>) -> Self {
        assert_eq!(
            parameters.len(),
            predicate.arity as usize,
            "predicate {} has arity {} but got {} parameters",
            predicate.name,
            predicate.arity,
            parameters.len()
        );
        Sentence::Predicated(Predicated {
            predicate,
            parameters,
        })
    }

    pub fn quantified(quantifier: Quantifier, variable: Symbol, body: Sentence) -> Self {
        Sentence::Quantified(Quantified {
            quantifier,
            variable,
            body: Rc::new(body),
        })
    }

    pub fn operated(operator: Operator, operands: Vec<Sentence>) -> Self {
        assert_eq!(
            operands.len(),
            operator.arity() as usize,
            "operator {operator:?} has arity {} but got {} operands",
            operator.arity(),
            operands.len()
        );
        Sentence::Operated(Operated {
            operator,
            operands: operands.into_iter().map(Rc::new).collect(),
        })
    }

    /// `negate(s)` always returns a fresh `Operated(Negation, [s])`, never
    /// collapsing double negation — callers that want that collapse do it
    /// via rule logic, not here.
    pub fn negate(&self) -> Sentence {
        Sentence::Operated(Operated {
            operator: Operator::Negation,
            operands: vec![Rc::new(self.clone())],
        })
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Sentence::Atomic(_))
    }

    pub fn is_predicated(&self) -> bool {
        matches!(self, Sentence::Predicated(_))
    }

    pub fn is_quantified(&self) -> bool {
        matches!(self, Sentence::Quantified(_))
    }

    pub fn is_operated(&self) -> bool {
        matches!(self, Sentence::Operated(_))
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Sentence::Operated(o) => Some(o.operator),
            _ => None,
        }
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        match self {
            Sentence::Quantified(q) => Some(q.quantifier),
            _ => None,
        }
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Sentence::Predicated(p) => Some(&p.predicate),
            _ => None,
        }
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, Sentence::Operated(o) if o.operator == Operator::Negation)
    }

    /// The operand of a negation; `None` if this isn't a negation.
    pub fn negatum(&self) -> Option<&Sentence> {
        match self {
            Sentence::Operated(o) if o.operator == Operator::Negation => Some(&o.operands[0]),
            _ => None,
        }
    }

    /// A literal is an atomic or predicated sentence, or the negation of one.
    pub fn is_literal(&self) -> bool {
        if self.is_atomic() || self.is_predicated() {
            return true;
        }
        match self.negatum() {
            Some(s) => s.is_atomic() || s.is_predicated(),
            None => false,
        }
    }

    /// A minimal example sentence for the given operator, for use by rule
    /// `example_nodes()` (documentation/helper generation, §4.3).
    pub fn first_operated(operator: Operator) -> Sentence {
        let operands = (0..operator.arity() as u32)
            .map(Sentence::atomic_ordinal)
            .collect();
        Sentence::operated(operator, operands)
    }

    /// Every constant symbol occurring in this sentence (including under
    /// quantifiers and operators), appended to `out` in traversal order.
    pub fn collect_constants(&self, out: &mut Vec<Symbol>) {
        match self {
            Sentence::Atomic(_) => {}
            Sentence::Predicated(p) => {
                for t in &p.parameters {
                    if let Term::Constant(s) = t {
                        out.push(*s);
                    }
                }
            }
            Sentence::Quantified(q) => q.body.collect_constants(out),
            Sentence::Operated(o) => {
                for operand in &o.operands {
                    operand.collect_constants(out);
                }
            }
        }
    }

    /// A minimal example sentence for the given quantifier: `Qx Fx` using a
    /// fresh unary example predicate.
    pub fn first_quantified(quantifier: Quantifier) -> Sentence {
        let variable = Symbol::new(0, 0);
        let body = Sentence::predicated(
            Predicate {
                name: "F".into(),
                index: 0,
                subscript: 0,
                arity: 1,
            },
            vec![Term::Variable(variable)],
        );
        Sentence::quantified(quantifier, variable, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_wraps_without_collapsing() {
        let a = Sentence::atomic(0, 0);
        let na = a.negate();
        let nna = na.negate();
        assert!(na.is_negated());
        assert!(nna.is_negated());
        assert_eq!(nna.negatum().unwrap(), &na);
    }

    #[test]
    fn structural_equality_not_identity() {
        let a1 = Sentence::atomic(0, 0);
        let a2 = Sentence::atomic(0, 0);
        assert_eq!(a1, a2);
    }

    #[test]
    fn ordinal_atomic_extends_alphabet_by_subscript() {
        let s = Sentence::atomic_ordinal(5);
        assert_eq!(s, Sentence::atomic(0, 1));
    }

    #[test]
    fn arity_matches_operator() {
        assert_eq!(Operator::Conjunction.arity(), 2);
        assert_eq!(Operator::Negation.arity(), 1);
    }

    #[test]
    fn literal_includes_negated_atomic_and_predicated() {
        let a = Sentence::atomic(0, 0);
        assert!(a.is_literal());
        assert!(a.negate().is_literal());
        assert!(!a.negate().negate().is_literal());
    }

    #[test]
    fn total_order_is_deterministic_and_stable() {
        let a = Sentence::atomic(0, 0);
        let b = Sentence::atomic(1, 0);
        let conj = Sentence::operated(Operator::Conjunction, vec![a.clone(), b.clone()]);
        assert!(a < b);
        assert!(a < conj);
    }
}
