use std::{
    collections::{hash_map::Entry, HashMap, VecDeque},
    fmt::Display,
    hash::Hash,
    rc::Rc,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::SearchError, node::Node};

/// The nodes that have been discovered but not yet expanded.
///
/// Implementations differ only in which node `remove` hands out next. None of them
/// reject duplicate states on `add`; keeping a state out of the frontier twice is up
/// to the search engine.
pub trait Frontier<R, A> {
    fn add(&mut self, node: Rc<Node<R, A>>);

    /// Check if a node with the given state is currently in the frontier
    fn contains_state(&self, state: &R) -> bool;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// Take the next node out of the frontier
    fn remove(&mut self) -> Result<Rc<Node<R, A>>, SearchError>;
}

/// Which node the frontier hands out next
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Last in, first out. Gives a depth-first search.
    #[default]
    Stack,
    /// First in, first out. Gives a breadth-first search.
    Queue,
}

impl Policy {
    pub fn from_use_queue(use_queue: bool) -> Self {
        if use_queue {
            Policy::Queue
        } else {
            Policy::Stack
        }
    }

    /// Create an empty frontier with this removal order
    pub fn create<R, A>(self) -> Box<dyn Frontier<R, A>>
    where
        R: Copy + Eq + Hash + 'static,
        A: 'static,
    {
        match self {
            Policy::Stack => Box::new(StackFrontier::new()),
            Policy::Queue => Box::new(QueueFrontier::new()),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Policy::Stack => "stack",
                Policy::Queue => "queue",
            }
        )
    }
}

impl FromStr for Policy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stack" | "dfs" => Ok(Policy::Stack),
            "queue" | "bfs" => Ok(Policy::Queue),
            _ => Err(anyhow::anyhow!("Invalid frontier policy: {}", s)),
        }
    }
}

/// The states of the nodes in a frontier, counted so that the set stays exact even if
/// the same state was added more than once.
#[derive(Debug)]
struct MemberStates<R>(HashMap<R, usize>);

impl<R: Copy + Eq + Hash> MemberStates<R> {
    fn new() -> Self {
        Self(HashMap::new())
    }

    fn insert(&mut self, state: R) {
        *self.0.entry(state).or_insert(0) += 1;
    }

    fn remove(&mut self, state: R) {
        if let Entry::Occupied(mut entry) = self.0.entry(state) {
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
            }
        }
    }

    fn contains(&self, state: &R) -> bool {
        self.0.contains_key(state)
    }
}

/// A frontier that removes the most recently added node first
#[derive(Debug)]
pub struct StackFrontier<R, A> {
    nodes: Vec<Rc<Node<R, A>>>,
    states: MemberStates<R>,
}

impl<R: Copy + Eq + Hash, A> StackFrontier<R, A> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            states: MemberStates::new(),
        }
    }
}

impl<R: Copy + Eq + Hash, A> Default for StackFrontier<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Eq + Hash, A> Frontier<R, A> for StackFrontier<R, A> {
    fn add(&mut self, node: Rc<Node<R, A>>) {
        self.states.insert(node.state());
        self.nodes.push(node);
    }

    fn contains_state(&self, state: &R) -> bool {
        self.states.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Rc<Node<R, A>>, SearchError> {
        let node = self.nodes.pop().ok_or(SearchError::EmptyFrontier)?;
        self.states.remove(node.state());
        Ok(node)
    }
}

/// A frontier that removes the earliest added node first
#[derive(Debug)]
pub struct QueueFrontier<R, A> {
    nodes: VecDeque<Rc<Node<R, A>>>,
    states: MemberStates<R>,
}

impl<R: Copy + Eq + Hash, A> QueueFrontier<R, A> {
    pub fn new() -> Self {
        Self {
            nodes: VecDeque::new(),
            states: MemberStates::new(),
        }
    }
}

impl<R: Copy + Eq + Hash, A> Default for QueueFrontier<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Eq + Hash, A> Frontier<R, A> for QueueFrontier<R, A> {
    fn add(&mut self, node: Rc<Node<R, A>>) {
        self.states.insert(node.state());
        self.nodes.push_back(node);
    }

    fn contains_state(&self, state: &R) -> bool {
        self.states.contains(state)
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn remove(&mut self) -> Result<Rc<Node<R, A>>, SearchError> {
        let node = self.nodes.pop_front().ok_or(SearchError::EmptyFrontier)?;
        self.states.remove(node.state());
        Ok(node)
    }
}
