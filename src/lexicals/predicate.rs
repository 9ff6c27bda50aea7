//! Predicates: system (fixed, reserved-negative-index) and user-declared.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::error::ConfigError;

/// Reserved index for the system `Identity` predicate (arity 2).
pub const IDENTITY_INDEX: i32 = -1;
/// Reserved index for the system `Existence` predicate (arity 1).
pub const EXISTENCE_INDEX: i32 = -2;

/// A predicate symbol. Identity is `(index, subscript)`; `name` and `arity`
/// are cosmetic/derived data carried alongside for printing and arity
/// checks, not part of equality (two predicates with the same index and
/// subscript are always the same predicate by construction of
/// [`PredicateStore`]).
#[derive(Debug, Clone)]
pub struct Predicate {
    pub name: SmolStr,
    pub index: i32,
    pub subscript: u32,
    pub arity: u8,
}

impl Predicate {
    pub fn identity() -> Self {
        Self {
            name: SmolStr::new_static("Identity"),
            index: IDENTITY_INDEX,
            subscript: 0,
            arity: 2,
        }
    }

    pub fn existence() -> Self {
        Self {
            name: SmolStr::new_static("Existence"),
            index: EXISTENCE_INDEX,
            subscript: 0,
            arity: 1,
        }
    }

    pub fn is_system(&self) -> bool {
        self.index < 0
    }

    fn key(&self) -> (i32, u32) {
        (self.index, self.subscript)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Predicate {}

impl Hash for Predicate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Predicate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Predicate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A per-parse-session store mapping `(index, subscript) -> (name, arity)`.
///
/// System predicates (`Identity`, `Existence`) are always present. User
/// predicates are declared as the parser encounters them; a mismatched
/// arity for an already-declared key is a [`ConfigError::ValueConflict`].
/// The store is threaded explicitly through parsing rather than held in a
/// global, so concurrent parses with distinct user predicates never
/// interfere (§5).
#[derive(Debug, Clone)]
pub struct PredicateStore {
    by_key: IndexMap<(i32, u32), Predicate>,
}

impl Default for PredicateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PredicateStore {
    pub fn new() -> Self {
        let mut by_key = IndexMap::new();
        let id = Predicate::identity();
        let ex = Predicate::existence();
        by_key.insert((id.index, id.subscript), id);
        by_key.insert((ex.index, ex.subscript), ex);
        Self { by_key }
    }

    pub fn get(&self, index: i32, subscript: u32) -> Option<&Predicate> {
        self.by_key.get(&(index, subscript))
    }

    /// Declare a user predicate, or return the existing one if already
    /// declared with a matching arity.
    pub fn declare(
        &mut self,
        index: i32,
        subscript: u32,
        arity: u8,
        name: impl Into<SmolStr>,
    ) -> Result<Predicate, ConfigError> {
        if let Some(existing) = self.by_key.get(&(index, subscript)) {
            if existing.arity != arity {
                return Err(ConfigError::ValueConflict {
                    key: format!("predicate[{index},{subscript}]"),
                    old: existing.arity.to_string(),
                    new: arity.to_string(),
                });
            }
            return Ok(existing.clone());
        }
        let pred = Predicate {
            name: name.into(),
            index,
            subscript,
            arity,
        };
        self.by_key.insert((index, subscript), pred.clone());
        Ok(pred)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_predicates_present_by_default() {
        let store = PredicateStore::new();
        assert_eq!(store.get(IDENTITY_INDEX, 0).unwrap().arity, 2);
        assert_eq!(store.get(EXISTENCE_INDEX, 0).unwrap().arity, 1);
    }

    #[test]
    fn declare_is_idempotent() {
        let mut store = PredicateStore::new();
        let a = store.declare(0, 0, 1, "F").unwrap();
        let b = store.declare(0, 0, 1, "F").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn declare_conflicting_arity_errors() {
        let mut store = PredicateStore::new();
        store.declare(0, 0, 1, "F").unwrap();
        let err = store.declare(0, 0, 2, "F").unwrap_err();
        assert!(matches!(err, ConfigError::ValueConflict { .. }));
    }

    #[test]
    fn equality_ignores_name_and_arity() {
        let a = Predicate {
            name: "F".into(),
            index: 0,
            subscript: 0,
            arity: 1,
        };
        let b = Predicate {
            name: "G".into(),
            index: 0,
            subscript: 0,
            arity: 9,
        };
        assert_eq!(a, b);
    }
}
