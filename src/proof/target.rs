//! Targets (§3): an opaque dictionary designating a rule application site.
//! Required key is `branch`; everything else is optional and consulted only
//! by the rule that produced the target.

use crate::lexicals::{Sentence, Symbol};
use crate::proof::node::NodeId;
use crate::proof::BranchId;

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub branch: BranchId,
    pub node: Option<NodeId>,
    pub nodes: Option<Vec<NodeId>>,
    pub world: Option<u32>,
    pub world1: Option<u32>,
    pub world2: Option<u32>,
    pub sentence: Option<Sentence>,
    pub designated: Option<bool>,
    pub flag: Option<&'static str>,
    /// Name of the rule that produced this target, filled in by the
    /// scheduler before `apply` is called so rules needn't close over it.
    pub rule: Option<&'static str>,
    /// Rust-specific extension beyond spec.md's listed optional keys: the
    /// witness/instantiation constant a quantifier rule targets, carried
    /// alongside `sentence` rather than re-derived inside `apply` (Target
    /// is a dictionary, not a closed struct — spec.md's key list is the
    /// common case, not an exhaustive schema).
    pub constant: Option<Symbol>,
}

impl Target {
    pub fn new(branch: BranchId) -> Self {
        Self {
            branch,
            node: None,
            nodes: None,
            world: None,
            world1: None,
            world2: None,
            sentence: None,
            designated: None,
            flag: None,
            rule: None,
            constant: None,
        }
    }

    pub fn node(mut self, n: NodeId) -> Self {
        self.node = Some(n);
        self
    }

    pub fn nodes(mut self, ns: Vec<NodeId>) -> Self {
        self.nodes = Some(ns);
        self
    }

    pub fn world(mut self, w: u32) -> Self {
        self.world = Some(w);
        self
    }

    pub fn access(mut self, w1: u32, w2: u32) -> Self {
        self.world1 = Some(w1);
        self.world2 = Some(w2);
        self
    }

    pub fn sentence(mut self, s: Sentence) -> Self {
        self.sentence = Some(s);
        self
    }

    pub fn designated(mut self, d: bool) -> Self {
        self.designated = Some(d);
        self
    }

    pub fn flag(mut self, f: &'static str) -> Self {
        self.flag = Some(f);
        self
    }

    pub fn rule(mut self, r: &'static str) -> Self {
        self.rule = Some(r);
        self
    }

    pub fn constant(mut self, c: Symbol) -> Self {
        self.constant = Some(c);
        self
    }
}
