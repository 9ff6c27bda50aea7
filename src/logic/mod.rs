//! Per-logic static bundles (§4.3) and the name → bundle registry.
//!
//! A logic is "statically registered" (spec.md §1 non-goal: "arbitrary
//! third-party-logic loading at runtime") — [`registry::lookup`] is a plain
//! match over the roster in [`SPEC_FULL.md`](../../SPEC_FULL.md) §3, not a
//! plugin loader. Adding a logic means writing a new module plus one arm
//! here, never touching the engine.

pub mod modal;
pub mod propositional;
pub mod quantified;
pub mod registry;

use crate::lexicals::Argument;
use crate::model::Model;
use crate::proof::{Branch, NodeArena};
use crate::rules::{ClosureRule, RuleGroup};

/// Descriptive, non-semantic metadata a logic carries for writers/UI
/// (out of scope here, but the data still belongs on the bundle per
/// spec.md §4.3 "meta: category, description, category order, tags").
pub struct Meta {
    pub category: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

/// A logic's full declarative bundle (spec.md §4.3).
pub struct LogicBundle {
    pub name: &'static str,
    pub meta: Meta,
    pub closure_rules: Vec<Box<dyn ClosureRule>>,
    pub rule_groups: Vec<RuleGroup>,
    pub build_trunk: fn(&mut NodeArena, &mut Branch, &Argument),
    pub new_model: fn() -> Box<dyn Model>,
}
