//! Models (§4.6): reading an open branch into a semantic structure and
//! checking it refutes the argument it was built from.
//!
//! `value` holds the shared many-valued lattice and truth-functional
//! plumbing every logic's model draws on; `prop`/`modal`/`quantified` are
//! the three concrete [`Model`] shapes the roster needs (propositional
//! many-valued, modal-with-frame, first-order-with-domain) — chosen per
//! logic by its [`crate::logic::LogicBundle::new_model`] factory rather
//! than by a nominal subclass hierarchy.

pub mod modal;
pub mod prop;
pub mod quantified;
pub mod value;

use crate::error::ModelError;
use crate::lexicals::{Argument, Sentence};
use crate::proof::{Branch, NodeArena};
pub use value::{Semantics, Value};

/// A logic's branch-reader (spec.md §4.6): populates itself from an open
/// branch, then answers `value_of`/`is_countermodel_to` against it.
pub trait Model {
    /// Populate the model from assertions on `branch`.
    fn read_branch(&mut self, branch: &Branch, arena: &NodeArena);

    /// Total function from any sentence to a value, given the model's
    /// universe. `Err` only for the genuinely ill-formed case of a term
    /// with no denotation in a finite-domain model (spec.md §7 `ModelError`).
    fn value_of(&self, sentence: &Sentence) -> Result<Value, ModelError>;

    /// Whether every premise evaluates to a designated value and the
    /// conclusion to a non-designated one.
    fn is_countermodel_to(&self, argument: &Argument) -> Result<bool, ModelError> {
        for p in &argument.premises {
            if !self.designates(self.value_of(p)?) {
                return Ok(false);
            }
        }
        Ok(!self.designates(self.value_of(&argument.conclusion)?))
    }

    /// Whether `v` counts as "true-like" for this logic (spec.md §4.6
    /// "designated values are logic-specific").
    fn designates(&self, v: Value) -> bool;
}
