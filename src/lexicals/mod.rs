//! Lexicals (§4.1): sentences, predicates, terms, arguments, and the
//! notation-neutral identity/ordering shared by both surface parsers.

mod argument;
mod predicate;
mod sentence;
mod term;

pub use argument::Argument;
pub use predicate::{Predicate, PredicateStore, EXISTENCE_INDEX, IDENTITY_INDEX};
pub use sentence::{
    Operated, Operator, Predicated, Quantified, Quantifier, Sentence, ATOMIC_ALPHABET_LEN,
};
pub use term::{Symbol, Term};
