//! The tableau engine (§4.5): branch/node arena, event emitter, step
//! scheduler, and the public `Tableau` lifecycle.

mod arena;
mod branch;
mod events;
mod node;
mod options;
mod tableau;
pub mod target;

pub use arena::NodeArena;
pub use branch::{Branch, BranchId};
pub use events::{Channel, Emitter, Event};
pub use node::{Node, NodeId, CLOSURE_FLAG};
pub use options::Options;
pub use target::Target;
pub use tableau::{StatResult, StepEntry, Stats, Tableau, TabFlag, TabFlags, Tree};
