//! Nodes (§3): an opaque property map asserted onto a branch.
//!
//! `NodeId` identity is the node's index into the tableau-wide node arena
//! ([`Tableau`](super::Tableau) owns storage; branches hold `Vec<NodeId>`).
//! Two nodes with identical property maps are still distinct entities
//! (spec.md §3), which the arena gives for free: equality on [`Node`] itself
//! is never implemented, only on [`NodeId`].

use std::fmt;

use crate::lexicals::Sentence;

/// Stable identity for a node within one tableau's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Sentinel flag value marking a branch-closure node (spec.md §3, §9: kept
/// as a property for fidelity to the source model; callers should prefer
/// [`Branch::is_closed`](super::Branch::is_closed) over scanning for it).
pub const CLOSURE_FLAG: &str = "closure";

/// The property map a rule's `apply` describes for a new node. Builder
/// style: `Node::new().sentence(s).designated(true)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub sentence: Option<Sentence>,
    pub designated: Option<bool>,
    pub world: Option<u32>,
    pub world1: Option<u32>,
    pub world2: Option<u32>,
    pub worlds: Option<Vec<u32>>,
    pub flag: Option<&'static str>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sentence(mut self, s: Sentence) -> Self {
        self.sentence = Some(s);
        self
    }

    pub fn designated(mut self, d: bool) -> Self {
        self.designated = Some(d);
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

    pub fn worlds(mut self, ws: impl IntoIterator<Item = u32>) -> Self {
        self.worlds = Some(ws.into_iter().collect());
        self
    }

    pub fn flag(mut self, f: &'static str) -> Self {
        self.flag = Some(f);
        self
    }

    pub fn closure() -> Self {
        Self::new().flag(CLOSURE_FLAG)
    }

    /// A node is "modal" iff any of world/world1/world2/worlds is present.
    pub fn is_modal(&self) -> bool {
        self.world.is_some() || self.world1.is_some() || self.world2.is_some()
            || self.worlds.is_some()
    }

    pub fn is_closure(&self) -> bool {
        self.flag == Some(CLOSURE_FLAG)
    }

    pub fn has_access(&self) -> Option<(u32, u32)> {
        match (self.world1, self.world2) {
            (Some(w1), Some(w2)) => Some((w1, w2)),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    /// Truncated single-line repr, mirroring the source model's
    /// repr-truncation for node property maps used in logs/history.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node{{")?;
        let mut first = true;
        macro_rules! field {
            ($name:expr, $val:expr) => {
                if let Some(v) = $val {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", $name, v)?;
                    first = false;
                }
            };
        }
        field!("sentence", self.sentence.as_ref().map(|s| format!("{s:?}")));
        field!("designated", self.designated);
        field!("world", self.world);
        field!("world1", self.world1);
        field!("world2", self.world2);
        field!("flag", self.flag);
        write!(f, "}}")
    }
}
