//! Many-valued truth values (§4.6) and per-logic truth-functional
//! semantics.
//!
//! `Value` is the superset lattice `{F, N, B, T}` (FDE's four values);
//! three-valued logics simply never produce or consult the value they
//! lack (`K3`/`K3W`/`B3E` never touch `B`, `LP`/`RM3` never touch `N`),
//! which is also exactly how §4.3's generic closure derivation decides
//! whether a logic needs a `GlutClosure`/`GapClosure` rule (see
//! [`crate::rules::propositional`]).

use crate::lexicals::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    F,
    N,
    B,
    T,
}

/// A logic's many-valued semantics: its value set, designation predicate,
/// and truth-functional operator table. Declared once per logic as a
/// `const fn`-free plain struct of function pointers so the rule engine
/// can stay fully generic over which logic it's decomposing for.
#[derive(Clone, Copy)]
pub struct Semantics {
    pub values: &'static [Value],
    pub designated: fn(Value) -> bool,
    pub truth_function: fn(Operator, Value, Option<Value>) -> Value,
}

impl Semantics {
    pub fn has_both(&self) -> bool {
        self.values.contains(&Value::B)
    }

    pub fn has_gap(&self) -> bool {
        self.values.contains(&Value::N)
    }
}

/// Classical negation: swaps T/F, fixes B/N (every logic in the roster
/// shares this — the roster has no logic with a non-involutive negation).
pub fn negate(v: Value) -> Value {
    match v {
        Value::T => Value::F,
        Value::F => Value::T,
        Value::B => Value::B,
        Value::N => Value::N,
    }
}

/// Strong Kleene conjunction/disjunction: meet/join under `F < N,B < T`
/// (`N`/`B` incomparable to each other, both strictly between `F` and `T`).
/// This single pair of lattice operations is shared by FDE, K3, LP, RM3;
/// only K3W/B3E override conjunction/disjunction (weak Kleene: any `N`
/// operand infects the result).
pub fn strong_and(a: Value, b: Value) -> Value {
    use Value::*;
    match (a, b) {
        (F, _) | (_, F) => F,
        (T, T) => T,
        (T, x) | (x, T) => x,
        (B, B) => B,
        (N, N) => N,
        (B, N) | (N, B) => N,
    }
}

pub fn strong_or(a: Value, b: Value) -> Value {
    use Value::*;
    match (a, b) {
        (T, _) | (_, T) => T,
        (F, F) => F,
        (F, x) | (x, F) => x,
        (B, B) => B,
        (N, N) => N,
        (B, N) | (N, B) => B,
    }
}

/// Weak (Bochvar) conjunction/disjunction: any `N` operand forces `N`
/// (K3W/B3E's "infectious" treatment of the gap value).
pub fn weak_and(a: Value, b: Value) -> Value {
    if a == Value::N || b == Value::N {
        Value::N
    } else {
        strong_and(a, b)
    }
}

pub fn weak_or(a: Value, b: Value) -> Value {
    if a == Value::N || b == Value::N {
        Value::N
    } else {
        strong_or(a, b)
    }
}

/// Material conditional/biconditional defined the classical way from
/// negation + disjunction/conjunction, applied uniformly over whichever
/// `and`/`or` a logic uses for its own `Conjunction`/`Disjunction`.
pub fn material_conditional(or: fn(Value, Value) -> Value, a: Value, b: Value) -> Value {
    or(negate(a), b)
}

pub fn material_biconditional(
    and: fn(Value, Value) -> Value,
    or: fn(Value, Value) -> Value,
    a: Value,
    b: Value,
) -> Value {
    and(
        material_conditional(or, a, b),
        material_conditional(or, b, a),
    )
}

/// Default `Assertion`/`Conditional`/`Biconditional` dispatcher shared by
/// every propositional logic except `B3E` (which overrides `Assertion`
/// and derives `Conditional`/`Biconditional` from it — see
/// `logic::propositional::b3e`). `and`/`or` are the logic's own
/// conjunction/disjunction (strong or weak) so the derived operators stay
/// consistent with it.
pub fn default_truth_function(
    and: fn(Value, Value) -> Value,
    or: fn(Value, Value) -> Value,
    operator: Operator,
    a: Value,
    b: Option<Value>,
) -> Value {
    use Operator::*;
    match operator {
        Assertion => a,
        Negation => negate(a),
        Conjunction => and(a, b.expect("binary operator")),
        Disjunction => or(a, b.expect("binary operator")),
        MaterialConditional | Conditional => {
            material_conditional(or, a, b.expect("binary operator"))
        }
        MaterialBiconditional | Biconditional => {
            material_biconditional(and, or, a, b.expect("binary operator"))
        }
        Possibility | Necessity => {
            panic!("modal operators are not truth-functional; handled by the modal rule family")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_is_involutive() {
        for v in [Value::F, Value::N, Value::B, Value::T] {
            assert_eq!(negate(negate(v)), v);
        }
    }

    #[test]
    fn strong_kleene_matches_classical_on_tf() {
        assert_eq!(strong_and(Value::T, Value::F), Value::F);
        assert_eq!(strong_or(Value::T, Value::F), Value::T);
    }

    #[test]
    fn weak_kleene_is_infectious() {
        assert_eq!(weak_and(Value::N, Value::T), Value::N);
        assert_eq!(weak_or(Value::N, Value::F), Value::N);
    }
}
