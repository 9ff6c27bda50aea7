//! The engine's synchronous event emitter (§4.5, §5, §9).
//!
//! Channels mirror spec.md's named list exactly. Listeners are plain
//! function values registered with `on`/`once`, called in registration
//! order on the calling thread; a panicking listener surfaces from
//! `step()`/`build()` but the triggering state change has already
//! committed (spec.md §4.5 "Failure semantics").

use crate::proof::branch::BranchId;
use crate::proof::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    BeforeTrunkBuild,
    AfterTrunkBuild,
    AfterBranchAdd,
    AfterBranchClose,
    AfterNodeAdd,
    AfterNodeTick,
    BeforeApply,
    AfterApply,
}

/// Payload passed to listeners; only the fields relevant to the firing
/// channel are populated, the rest are `None`/default.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub branch: Option<BranchId>,
    pub parent_branch: Option<BranchId>,
    pub node: Option<NodeId>,
    pub rule: Option<&'static str>,
}

impl Event {
    pub fn branch(b: BranchId) -> Self {
        Self {
            branch: Some(b),
            ..Default::default()
        }
    }

    pub fn branch_split(child: BranchId, parent: BranchId) -> Self {
        Self {
            branch: Some(child),
            parent_branch: Some(parent),
            ..Default::default()
        }
    }

    pub fn node_on(branch: BranchId, node: NodeId) -> Self {
        Self {
            branch: Some(branch),
            node: Some(node),
            ..Default::default()
        }
    }

    pub fn rule_on(rule: &'static str, branch: BranchId) -> Self {
        Self {
            branch: Some(branch),
            rule: Some(rule),
            ..Default::default()
        }
    }
}

type Listener = Box<dyn FnMut(&Event)>;

struct Slot {
    listener: Listener,
    once: bool,
}

/// A per-channel registry of listeners; `Tableau` owns one `Emitter` for
/// the whole engine (spec.md: "the engine owns an event emitter").
#[derive(Default)]
pub struct Emitter {
    slots: indexmap::IndexMap<u8, Vec<Slot>>,
}

fn channel_key(c: Channel) -> u8 {
    c as u8
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, channel: Channel, listener: impl FnMut(&Event) + 'static) {
        self.slots
            .entry(channel_key(channel))
            .or_default()
            .push(Slot {
                listener: Box::new(listener),
                once: false,
            });
    }

    pub fn once(&mut self, channel: Channel, listener: impl FnMut(&Event) + 'static) {
        self.slots
            .entry(channel_key(channel))
            .or_default()
            .push(Slot {
                listener: Box::new(listener),
                once: true,
            });
    }

    /// Fire `channel` with `event`, calling listeners in registration order
    /// and dropping any `once` listener after its call.
    pub fn emit(&mut self, channel: Channel, event: &Event) {
        let key = channel_key(channel);
        let Some(slots) = self.slots.get_mut(&key) else {
            return;
        };
        let mut i = 0;
        while i < slots.len() {
            (slots[i].listener)(event);
            if slots[i].once {
                slots.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut em = Emitter::new();
        let l1 = log.clone();
        em.on(Channel::AfterApply, move |_| l1.borrow_mut().push(1));
        let l2 = log.clone();
        em.on(Channel::AfterApply, move |_| l2.borrow_mut().push(2));
        em.emit(Channel::AfterApply, &Event::default());
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn once_listener_fires_a_single_time() {
        let count = Rc::new(RefCell::new(0));
        let mut em = Emitter::new();
        let c = count.clone();
        em.once(Channel::AfterNodeTick, move |_| *c.borrow_mut() += 1);
        em.emit(Channel::AfterNodeTick, &Event::default());
        em.emit(Channel::AfterNodeTick, &Event::default());
        assert_eq!(*count.borrow(), 1);
    }
}
