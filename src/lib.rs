#![allow(clippy::type_complexity)]

//! Node/graph substrate for MCTS-style planners: alternating layers of state and action
//! nodes, memoized successors, and the statistics a search policy reads and writes.

pub mod error;
pub mod games;
pub mod graph;
pub mod node;
pub mod utils;

pub use error::GraphError;
pub use graph::{GraphStats, SearchGraph};
pub use node::{ActionId, ActionNode, Node, StateId, StateNode};
pub use utils::{ActionI, Reward, State, Visits};
