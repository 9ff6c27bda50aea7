//! # tableaux
//!
//! A multi-logic analytic tableau proof engine: given an argument (premises
//! plus a conclusion) and a named logic, decide validity by constructing a
//! proof tree, extracting a counter-model when the argument is invalid.
//!
//! ## Module structure (dependency order)
//!
//! ```text
//! api        → Parse / ParseArgument / BuildTableau entry points
//!   ↑
//! corpus     → ~90 named example arguments, alias lookup
//!   ↑
//! logic      → per-logic static bundles (trunk builder + rule list + model type)
//!   ↑
//! model      → Model trait + shared many-valued / modal / classical infrastructure
//!   ↑
//! rules      → Rule/ClosureRule traits, RuleGroup, per-rule helper caches
//!   ↑
//! proof      → Node, Branch, Target, Tableau, event channels, step scheduler
//!   ↑
//! parser     → logos token kinds + two recursive-descent readers (Polish, Standard)
//!   ↑
//! lexicals   → Sentence/Predicate/Term free algebra, Argument, canonical order
//! ```
//!
//! Everything above `lexicals` depends on it; nothing below a module depends
//! on what's above it. `error` is a leaf every layer can reach into.

/// Foundation types: the sentence free algebra, predicates, terms, arguments.
pub mod lexicals;

/// Surface parsers: Polish (prefix) and Standard (infix) notations.
pub mod parser;

/// The tableau engine: branch/node arena, event emitter, step scheduler.
pub mod proof;

/// Rule/ClosureRule traits and the generic per-family rule engines.
pub mod rules;

/// Per-logic static bundles and the name → bundle registry.
pub mod logic;

/// Branch-reading model semantics and the shared many-valued lattice.
pub mod model;

/// The named example-argument corpus and alias lookup.
pub mod corpus;

/// External API: `parse`, `parse_argument`, `build_tableau`.
pub mod api;

/// Crate-wide error taxonomy.
pub mod error;

// Re-export the entry points most consumers reach for first.
pub use api::{build_tableau, parse, parse_argument};
pub use error::{Error, Result};
pub use lexicals::{Argument, PredicateStore, Sentence};
pub use logic::registry::lookup as lookup_logic;
pub use parser::Notation;
pub use proof::{Options, Tableau};
