//! Branches (§3): an ordered sequence of nodes plus a closed flag, owning
//! the subformula/access indexes and per-rule "applied" tracking a branch
//! needs for O(1) lookup during rule search.
//!
//! Node *content* lives in the tableau-wide arena ([`Tableau`](super::Tableau));
//! a `Branch` stores only [`NodeId`]s plus indexes keyed off content handed
//! to it at [`Branch::append`] time, so splitting a branch (§3 "on split the
//! child inherits all ancestor nodes, all indexes, all constants and world
//! counters") is a plain `Clone` — no re-indexing of inherited history.

use indexmap::{IndexMap, IndexSet};

use crate::lexicals::{Sentence, Symbol};
use crate::proof::node::{Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchId(pub u32);

#[derive(Debug, Clone, Default)]
pub struct Branch {
    id: Option<BranchId>,
    parent: Option<BranchId>,
    nodes: Vec<NodeId>,
    closed: bool,
    ticked: IndexSet<NodeId>,
    applied: IndexSet<(NodeId, &'static str)>,
    by_sentence_designated: IndexMap<(Sentence, Option<bool>), Vec<NodeId>>,
    by_sentence_world: IndexMap<(Sentence, Option<u32>), Vec<NodeId>>,
    access: IndexSet<(u32, u32)>,
    constants: IndexSet<Symbol>,
    worlds: IndexSet<u32>,
    next_world: u32,
    /// QuantifierInstantiations helper (§4.4): has universal node `n` already
    /// been instantiated with constant `c` on this branch?
    quantifier_insts: IndexSet<(NodeId, Symbol)>,
    /// The modal analogue: has necessity/universal-access node `n` already
    /// been pushed through to world `w`?
    modal_insts: IndexSet<(NodeId, u32)>,
}

impl Branch {
    pub fn new(id: BranchId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn id(&self) -> BranchId {
        self.id.expect("branch id set at construction")
    }

    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    /// Clone this branch's full state for a new child, per §3's split
    /// inheritance contract; the child's own id/parent are then set by the
    /// caller (the tableau, which owns id allocation).
    pub fn split_into(&self, child_id: BranchId) -> Self {
        let mut child = self.clone();
        child.id = Some(child_id);
        child.parent = Some(self.id());
        child
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_ticked(&self, id: NodeId) -> bool {
        self.ticked.contains(&id)
    }

    pub fn tick(&mut self, id: NodeId) {
        self.ticked.insert(id);
    }

    pub fn unticked_nodes<'b>(&'b self) -> impl Iterator<Item = NodeId> + 'b {
        self.nodes.iter().copied().filter(move |n| !self.is_ticked(*n))
    }

    /// Register a freshly-arena-allocated node's content into this branch's
    /// ordered list and subformula/access/constant-domain indexes.
    pub fn append(&mut self, id: NodeId, node: &Node) {
        self.nodes.push(id);
        if let Some(s) = &node.sentence {
            self.by_sentence_designated
                .entry((s.clone(), node.designated))
                .or_default()
                .push(id);
            self.by_sentence_world
                .entry((s.clone(), node.world))
                .or_default()
                .push(id);
            let mut consts = Vec::new();
            s.collect_constants(&mut consts);
            for c in consts {
                self.constants.insert(c);
            }
        }
        if let Some((w1, w2)) = node.has_access() {
            self.access.insert((w1, w2));
            self.worlds.insert(w1);
            self.worlds.insert(w2);
        }
        if let Some(w) = node.world {
            self.worlds.insert(w);
        }
        if let Some(ws) = &node.worlds {
            self.worlds.extend(ws.iter().copied());
        }
    }

    pub fn find_by_sentence_designated(&self, s: &Sentence, designated: Option<bool>) -> &[NodeId] {
        self.by_sentence_designated
            .get(&(s.clone(), designated))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_by_sentence_world(&self, s: &Sentence, world: Option<u32>) -> &[NodeId] {
        self.by_sentence_world
            .get(&(s.clone(), world))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_sentence_designated(&self, s: &Sentence, designated: Option<bool>) -> bool {
        !self.find_by_sentence_designated(s, designated).is_empty()
    }

    pub fn has_access(&self, w1: u32, w2: u32) -> bool {
        self.access.contains(&(w1, w2))
    }

    pub fn record_access(&mut self, w1: u32, w2: u32) {
        self.access.insert((w1, w2));
        self.worlds.insert(w1);
        self.worlds.insert(w2);
    }

    pub fn accesses(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.access.iter().copied()
    }

    pub fn accesses_from(&self, w1: u32) -> impl Iterator<Item = u32> + '_ {
        self.access
            .iter()
            .filter(move |&&(a, _)| a == w1)
            .map(|&(_, b)| b)
    }

    pub fn worlds(&self) -> impl Iterator<Item = u32> + '_ {
        self.worlds.iter().copied()
    }

    pub fn has_world(&self, w: u32) -> bool {
        self.worlds.contains(&w)
    }

    /// Allocate and register the next unused world index on this branch.
    pub fn new_world(&mut self) -> u32 {
        let w = self.next_world;
        self.next_world = w + 1;
        self.worlds.insert(w);
        w
    }

    pub fn constants(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.constants.iter().copied()
    }

    pub fn constants_len(&self) -> usize {
        self.constants.len()
    }

    pub fn add_constant(&mut self, c: Symbol) {
        self.constants.insert(c);
    }

    pub fn is_applied(&self, node: NodeId, rule: &'static str) -> bool {
        self.applied.contains(&(node, rule))
    }

    pub fn mark_applied(&mut self, node: NodeId, rule: &'static str) {
        self.applied.insert((node, rule));
    }

    pub fn is_instantiated(&self, node: NodeId, constant: Symbol) -> bool {
        self.quantifier_insts.contains(&(node, constant))
    }

    pub fn mark_instantiated(&mut self, node: NodeId, constant: Symbol) {
        self.quantifier_insts.insert((node, constant));
    }

    pub fn instantiation_count(&self, node: NodeId) -> usize {
        self.quantifier_insts
            .iter()
            .filter(|&&(n, _)| n == node)
            .count()
    }

    pub fn is_modal_instantiated(&self, node: NodeId, world: u32) -> bool {
        self.modal_insts.contains(&(node, world))
    }

    pub fn mark_modal_instantiated(&mut self, node: NodeId, world: u32) {
        self.modal_insts.insert((node, world));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicals::Sentence;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn split_inherits_nodes_and_indexes_then_diverges() {
        let mut parent = Branch::new(BranchId(0));
        let s = Sentence::atomic(0, 0);
        parent.append(n(0), &Node::new().sentence(s.clone()));
        let mut child = parent.split_into(BranchId(1));
        assert_eq!(child.nodes(), parent.nodes());
        assert!(child.has_sentence_designated(&s, None));

        child.append(n(1), &Node::new().sentence(Sentence::atomic(1, 0)));
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn ticked_state_is_per_branch() {
        let mut b = Branch::new(BranchId(0));
        b.append(n(0), &Node::new().sentence(Sentence::atomic(0, 0)));
        assert!(!b.is_ticked(n(0)));
        b.tick(n(0));
        assert!(b.is_ticked(n(0)));
    }

    #[test]
    fn new_world_increments_and_is_remembered() {
        let mut b = Branch::new(BranchId(0));
        assert_eq!(b.new_world(), 0);
        assert_eq!(b.new_world(), 1);
        assert!(b.has_world(0));
        assert!(b.has_world(1));
    }
}
