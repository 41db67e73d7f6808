//! # Nodes
//!
//! The two alternating layers of the search graph. A `StateNode` owns one `ActionNode`
//! per legal action, created up front. An `ActionNode` owns the `StateNode`s it has
//! sampled so far, keyed by the successor state itself.
//!
//! Nodes live in the arena of a [`SearchGraph`](crate::graph::SearchGraph) and refer to
//! each other through `StateId` / `ActionId`. Parent links are plain ids and never keep
//! anything alive.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::ops::{Deref, DerefMut};
use crate::utils::*;

// ---------- Ids ---------- //
/// Position of a `StateNode` in its graph's arena
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

/// Position of an `ActionNode` in its graph's arena
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub(crate) usize);

// ---------- Children ---------- //
/// Value-keyed map from key to child id that also remembers insertion order
#[derive(Debug, Clone)]
pub struct Children<K, C> {
    entries: Vec<(K, C)>,
    lookup: HashMap<K, usize>,
}

impl<K, C> Default for Children<K, C> {
    fn default() -> Self {
        Self { entries: Vec::new(), lookup: HashMap::new() }
    }
}

impl<K: Clone + Eq + Hash, C: Copy> Children<K, C> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), lookup: HashMap::with_capacity(capacity) }
    }
    pub fn get(&self, key: &K) -> Option<C> {
        self.lookup.get(key).map(|&i| self.entries[i].1)
    }
    pub fn contains_key(&self, key: &K) -> bool { self.lookup.contains_key(key) }
    /// Returns false (and keeps the existing child) if the key is already present
    pub(crate) fn insert(&mut self, key: K, child: C) -> bool {
        if self.contains_key(&key) {
            return false;
        }
        self.lookup.insert(key.clone(), self.entries.len());
        self.entries.push((key, child));
        true
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, C)> + '_ {
        self.entries.iter().map(|(k, c)| (k, *c))
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ { self.entries.iter().map(|(k, _)| k) }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ---------- Node ---------- //
/// Shape shared by both layers: a parent link, children, and the search statistics.
/// `n` and `q` belong to the search policy; nothing in this crate writes them.
#[derive(Debug, Clone)]
pub struct Node<P, K, C> {
    parent: P,
    children: Children<K, C>,
    pub n: Visits,
    pub q: Reward,
}

impl<P: Copy, K: Clone + Eq + Hash, C: Copy> Node<P, K, C> {
    fn new(parent: P, children: Children<K, C>) -> Self {
        Node { parent, children, n: 0, q: 0.0 }
    }
    #[inline] pub fn parent(&self) -> P { self.parent }
    #[inline] pub fn children(&self) -> &Children<K, C> { &self.children }
    #[inline] pub(crate) fn children_mut(&mut self) -> &mut Children<K, C> { &mut self.children }
    #[inline] pub fn is_visited(&self) -> bool { self.n > 0 }
}

// ---------- ActionNode ---------- //
/// Having chosen `action` from the parent state. Children are the distinct successor
/// states observed so far.
#[derive(Debug, Clone)]
pub struct ActionNode<S: State> {
    node: Node<StateId, S, StateId>,
    action: S::Action,
}

impl<S: State> ActionNode<S> {
    pub(crate) fn new(parent: StateId, action: S::Action) -> Self {
        ActionNode { node: Node::new(parent, Children::default()), action }
    }
    pub fn action(&self) -> &S::Action { &self.action }
    /// The state this action is taken from
    #[inline] pub fn acting_state(&self) -> StateId { self.node.parent() }
}

impl<S: State> Deref for ActionNode<S> {
    type Target = Node<StateId, S, StateId>;
    fn deref(&self) -> &Self::Target { &self.node }
}

impl<S: State> DerefMut for ActionNode<S> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.node }
}

impl<S: State> Display for ActionNode<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action: {:?}", self.action)
    }
}

// ---------- StateNode ---------- //
/// Being in `state`. Holds exactly one child per legal action, keyed by the action.
#[derive(Debug, Clone)]
pub struct StateNode<S: State> {
    node: Node<Option<ActionId>, S::Action, ActionId>,
    state: S,
    /// Free for the search policy; starts at zero
    pub reward: Reward,
}

impl<S: State> StateNode<S> {
    pub(crate) fn new(parent: Option<ActionId>, state: S, children: Children<S::Action, ActionId>) -> Self {
        StateNode { node: Node::new(parent, children), state, reward: 0.0 }
    }
    pub fn state(&self) -> &S { &self.state }
    #[inline] pub fn is_root(&self) -> bool { self.node.parent().is_none() }
}

impl<S: State> Deref for StateNode<S> {
    type Target = Node<Option<ActionId>, S::Action, ActionId>;
    fn deref(&self) -> &Self::Target { &self.node }
}

impl<S: State> DerefMut for StateNode<S> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.node }
}

impl<S: State> Display for StateNode<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "State: {:?}", self.state)
    }
}
