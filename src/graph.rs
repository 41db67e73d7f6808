//! # Search Graph
//!
//! Arena that owns every node of one search. States expand eagerly (all of their actions
//! become `ActionNode`s immediately), actions expand lazily (a successor `StateNode`
//! exists only once it has been sampled). Successors are memoized by state value, so a
//! transition that keeps landing on the same state keeps returning the same node.

use std::fmt::Write;
use std::ops::{Index, IndexMut};
use log::{debug, trace, warn};
use crate::error::{GraphError, Result};
use crate::node::*;
use crate::utils::*;

pub struct SearchGraph<S: State> {
    states: Vec<StateNode<S>>,
    actions: Vec<ActionNode<S>>,
    root: StateId,
}

/// Snapshot of how far the search has grown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub states: usize,
    pub actions: usize,
    /// Action nodes with `n > 0`
    pub tried_actions: usize,
    /// Action nodes that have produced at least one successor
    pub sampled_actions: usize,
    pub total_visits: u64,
    pub max_depth: usize,
}

impl<S: State> SearchGraph<S> {
    pub fn new(root_state: S) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, root_state)
    }

    pub fn with_capacity(capacity: usize, root_state: S) -> Self {
        let mut graph = SearchGraph {
            states: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
            root: StateId(0),
        };
        graph.root = graph.push_state(None, root_state);
        graph
    }

    /// Create a state node together with one action node per legal action
    fn push_state(&mut self, parent: Option<ActionId>, state: S) -> StateId {
        let id = StateId(self.states.len());
        let legal = state.actions();
        let mut children = Children::with_capacity(legal.len());
        for action in legal {
            let action_id = ActionId(self.actions.len());
            if children.insert(action.clone(), action_id) {
                self.actions.push(ActionNode::new(id, action));
            } else {
                warn!("{:?} lists {:?} more than once, keeping the first", state, action);
            }
        }
        trace!("created {:?} for {:?} with {} actions", id, state, children.len());
        self.states.push(StateNode::new(parent, state, children));
        id
    }

    // ---------- Growing ---------- //
    /// Ask the acting state to perform this action and descend to the resulting state.
    /// A successor equal to one seen before returns the node already built for it.
    /// Domain errors come back untouched and leave the graph as it was.
    pub fn sample_state(&mut self, action: ActionId, real_world: bool) -> std::result::Result<StateId, S::Error> {
        let node = &self.actions[action.0];
        let next = self.states[node.acting_state().0].state().perform(node.action(), real_world)?;
        if let Some(existing) = node.children().get(&next) {
            debug!("{} landed on known {:?}", node, existing);
            return Ok(existing);
        }
        let id = self.push_state(Some(action), next.clone());
        let node = &mut self.actions[action.0];
        node.children_mut().insert(next, id);
        debug!("{} discovered {:?} ({} outcomes so far)", node, id, node.children().len());
        Ok(id)
    }

    // ---------- Derived views ---------- //
    /// Actions from `state` whose node has never been visited, in action order.
    /// Recomputed on every call.
    pub fn untried_actions(&self, state: StateId) -> Vec<S::Action> {
        self.states[state.0].children().iter()
            .filter(|(_, a)| self.actions[a.0].n == 0)
            .map(|(action, _)| action.clone())
            .collect()
    }

    /// `untried_actions` is a view over the visit counts; there is nothing to assign.
    pub fn set_untried_actions(&mut self, _state: StateId, _actions: Vec<S::Action>) -> Result<()> {
        Err(GraphError::ReadOnly { property: "untried_actions" })
    }

    // ---------- Navigation ---------- //
    #[inline] pub fn root_id(&self) -> StateId { self.root }
    pub fn root(&self) -> &StateNode<S> { &self.states[self.root.0] }
    pub fn state(&self, id: StateId) -> &StateNode<S> { &self.states[id.0] }
    pub fn state_mut(&mut self, id: StateId) -> &mut StateNode<S> { &mut self.states[id.0] }
    pub fn action(&self, id: ActionId) -> &ActionNode<S> { &self.actions[id.0] }
    pub fn action_mut(&mut self, id: ActionId) -> &mut ActionNode<S> { &mut self.actions[id.0] }
    pub fn get_state(&self, id: StateId) -> Option<&StateNode<S>> { self.states.get(id.0) }
    pub fn get_action(&self, id: ActionId) -> Option<&ActionNode<S>> { self.actions.get(id.0) }

    /// The action node for `action` under `state`
    pub fn child_action(&self, state: StateId, action: &S::Action) -> Option<ActionId> {
        self.states[state.0].children().get(action)
    }
    /// The successor node for `next` under `action`, if it has been sampled
    pub fn child_state(&self, action: ActionId, next: &S) -> Option<StateId> {
        self.actions[action.0].children().get(next)
    }
    pub fn acting_state(&self, action: ActionId) -> StateId {
        self.actions[action.0].acting_state()
    }
    /// None for the root
    pub fn parent_action(&self, state: StateId) -> Option<ActionId> {
        self.states[state.0].parent()
    }

    /// Actions taken from the root down to `state`
    pub fn path_from_root(&self, state: StateId) -> Vec<ActionId> {
        let mut path = Vec::new();
        let mut current = state;
        while let Some(action) = self.parent_action(current) {
            path.push(action);
            current = self.acting_state(action);
        }
        path.reverse();
        path
    }

    /// Number of actions between the root and `state`
    pub fn depth(&self, state: StateId) -> usize {
        let mut depth = 0;
        let mut current = state;
        while let Some(action) = self.parent_action(current) {
            depth += 1;
            current = self.acting_state(action);
        }
        depth
    }

    // ---------- Utils --------- //
    pub fn state_count(&self) -> usize { self.states.len() }
    pub fn action_count(&self) -> usize { self.actions.len() }
    /// Total nodes of both kinds
    pub fn size(&self) -> usize { self.states.len() + self.actions.len() }

    pub fn stats(&self) -> GraphStats {
        let mut depths = vec![0usize; self.states.len()];
        // children are always pushed after their parents, so one forward pass is enough
        for (i, node) in self.states.iter().enumerate() {
            if let Some(action) = node.parent() {
                depths[i] = depths[self.acting_state(action).0] + 1;
            }
        }
        GraphStats {
            states: self.states.len(),
            actions: self.actions.len(),
            tried_actions: self.actions.iter().filter(|a| a.is_visited()).count(),
            sampled_actions: self.actions.iter().filter(|a| !a.children().is_empty()).count(),
            total_visits: self.actions.iter().map(|a| a.n as u64).sum(),
            max_depth: depths.into_iter().max().unwrap_or(0),
        }
    }

    /// Indented text rendering of the graph below the root, `max_depth` state layers deep
    pub fn dump(&self, max_depth: usize) -> String {
        let mut out = String::new();
        self.dump_rec(&mut out, self.root, 0, max_depth);
        out
    }

    fn dump_rec(&self, out: &mut String, state: StateId, tab_level: usize, depth: usize) {
        let node = &self.states[state.0];
        let _ = writeln!(out, "{}{} [n={} q={:.3}]", "    ".repeat(2 * tab_level), node, node.n, node.q);
        if depth == 0 { return; }
        for (_, action) in node.children().iter() {
            let a = &self.actions[action.0];
            if a.children().is_empty() && a.n == 0 { continue; }
            let _ = writeln!(out, "{}{} [n={} q={:.3}]", "    ".repeat(2 * tab_level + 1), a, a.n, a.q);
            for (_, next) in a.children().iter() {
                self.dump_rec(out, next, tab_level + 1, depth - 1);
            }
        }
    }

    /// Print the whole search graph
    pub fn print_family(&self) {
        print!("{}", self.dump(DUMP_DEPTH));
    }
}

impl<S: State> Index<StateId> for SearchGraph<S> {
    type Output = StateNode<S>;
    fn index(&self, id: StateId) -> &Self::Output { &self.states[id.0] }
}

impl<S: State> IndexMut<StateId> for SearchGraph<S> {
    fn index_mut(&mut self, id: StateId) -> &mut Self::Output { &mut self.states[id.0] }
}

impl<S: State> Index<ActionId> for SearchGraph<S> {
    type Output = ActionNode<S>;
    fn index(&self, id: ActionId) -> &Self::Output { &self.actions[id.0] }
}

impl<S: State> IndexMut<ActionId> for SearchGraph<S> {
    fn index_mut(&mut self, id: ActionId) -> &mut Self::Output { &mut self.actions[id.0] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Counter that can step up by one or two, capped at `LIMIT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Count(u8);
    const LIMIT: u8 = 4;

    impl State for Count {
        type Action = u8;
        type Error = Infallible;
        fn actions(&self) -> Vec<u8> {
            (1..=2).filter(|step| self.0 + step <= LIMIT).collect()
        }
        fn perform(&self, step: &u8, _real_world: bool) -> std::result::Result<Self, Infallible> {
            Ok(Count(self.0 + step))
        }
    }

    #[test]
    fn root_expands_every_action() {
        let graph = SearchGraph::new(Count(0));
        let root = graph.root();
        assert!(root.is_root());
        assert_eq!(root.children().len(), 2);
        assert_eq!(graph.action_count(), 2);
        for (action, id) in root.children().iter() {
            assert_eq!(graph[id].action(), action);
            assert_eq!(graph[id].acting_state(), graph.root_id());
            assert!(graph[id].children().is_empty());
        }
    }

    /// Lists its first step twice
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct Stutter;

    impl State for Stutter {
        type Action = u8;
        type Error = Infallible;
        fn actions(&self) -> Vec<u8> { vec![1, 1, 2] }
        fn perform(&self, _step: &u8, _real_world: bool) -> std::result::Result<Self, Infallible> {
            Ok(Stutter)
        }
    }

    #[test]
    fn repeated_action_gets_one_node() {
        let graph = SearchGraph::new(Stutter);
        let root = graph.root_id();
        assert_eq!(graph[root].children().len(), 2);
        assert_eq!(graph.action_count(), 2);
        assert_eq!(graph.untried_actions(root), vec![1, 2]);
        for (action, id) in graph[root].children().iter() {
            assert_eq!(graph[id].action(), action);
        }
    }

    #[test]
    fn terminal_state_has_no_children() {
        let graph = SearchGraph::new(Count(LIMIT));
        assert!(graph.root().children().is_empty());
        assert!(graph.untried_actions(graph.root_id()).is_empty());
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn sampled_successor_links_back() {
        let mut graph = SearchGraph::new(Count(0));
        let two = graph.child_action(graph.root_id(), &2).unwrap();
        let s = graph.sample_state(two, false).unwrap();
        assert_eq!(graph[s].state(), &Count(2));
        assert_eq!(graph.parent_action(s), Some(two));
        assert_eq!(graph.child_state(two, &Count(2)), Some(s));
        assert_eq!(graph.depth(s), 1);
        assert_eq!(graph.path_from_root(s), vec![two]);
    }

    #[test]
    fn converging_paths_stay_separate_nodes() {
        // 0 -1-> 1 -1-> 2 and 0 -2-> 2 reach equal states through different action nodes
        let mut graph = SearchGraph::new(Count(0));
        let one = graph.child_action(graph.root_id(), &1).unwrap();
        let two = graph.child_action(graph.root_id(), &2).unwrap();
        let s1 = graph.sample_state(one, false).unwrap();
        let one_again = graph.child_action(s1, &1).unwrap();
        let via_ones = graph.sample_state(one_again, false).unwrap();
        let direct = graph.sample_state(two, false).unwrap();
        assert_eq!(graph[via_ones].state(), graph[direct].state());
        assert_ne!(via_ones, direct);
        assert_eq!(graph.depth(via_ones), 2);
        assert_eq!(graph.depth(direct), 1);
    }

    #[test]
    fn statistics_are_left_to_the_caller() {
        let mut graph = SearchGraph::new(Count(0));
        let one = graph.child_action(graph.root_id(), &1).unwrap();
        let s = graph.sample_state(one, false).unwrap();
        assert_eq!(graph[one].n, 0);
        assert_eq!(graph[s].n, 0);
        graph[one].n += 3;
        graph[one].q += 1.5;
        graph[s].reward = 2.0;
        assert_eq!(graph.action(one).n, 3);
        assert_eq!(graph.action(one).q, 1.5);
        assert_eq!(graph.state(s).reward, 2.0);
    }

    #[test]
    fn stats_track_growth() {
        let mut graph = SearchGraph::new(Count(0));
        assert_eq!(graph.stats(), GraphStats { states: 1, actions: 2, ..Default::default() });
        let one = graph.child_action(graph.root_id(), &1).unwrap();
        let s1 = graph.sample_state(one, false).unwrap();
        let deeper = graph.child_action(s1, &2).unwrap();
        graph.sample_state(deeper, false).unwrap();
        graph[one].n = 2;
        let stats = graph.stats();
        assert_eq!(stats.states, 3);
        assert_eq!(stats.actions, 2 + 2 + 1);
        assert_eq!(stats.tried_actions, 1);
        assert_eq!(stats.sampled_actions, 2);
        assert_eq!(stats.total_visits, 2);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn dump_shows_sampled_branches_only() {
        let mut graph = SearchGraph::new(Count(0));
        let two = graph.child_action(graph.root_id(), &2).unwrap();
        graph.sample_state(two, false).unwrap();
        let text = graph.dump(DUMP_DEPTH);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "State: Count(0) [n=0 q=0.000]");
        assert_eq!(lines[1], "    Action: 2 [n=0 q=0.000]");
        assert_eq!(lines[2], "        State: Count(2) [n=0 q=0.000]");
        assert_eq!(lines.len(), 3);
        assert_eq!(graph.dump(0).lines().count(), 1);
    }

    #[test]
    fn foreign_ids_are_not_found() {
        let graph = SearchGraph::new(Count(0));
        assert!(graph.get_state(StateId(10)).is_none());
        assert!(graph.get_action(ActionId(10)).is_none());
        assert!(graph.get_action(ActionId(0)).is_some());
    }
}
