//! Explicit-graph puzzle used by the solver unit tests.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

use crate::puzzle::Puzzle;

#[derive(Debug)]
struct GraphInner {
    edges: BTreeMap<u32, Vec<u32>>,
    goals: BTreeSet<u32>,
    dead: BTreeSet<u32>,
    expansions: Cell<usize>,
}

/// A directed graph whose nodes are puzzle states.
#[derive(Debug, Clone)]
pub(crate) struct Graph(Rc<GraphInner>);

#[derive(Default)]
pub(crate) struct GraphBuilder {
    edges: BTreeMap<u32, Vec<u32>>,
    goals: BTreeSet<u32>,
    dead: BTreeSet<u32>,
}

impl GraphBuilder {
    pub(crate) fn edges(mut self, from: u32, to: &[u32]) -> Self {
        self.edges.entry(from).or_default().extend_from_slice(to);
        self
    }

    pub(crate) fn goal(mut self, node: u32) -> Self {
        self.goals.insert(node);
        self
    }

    pub(crate) fn dead(mut self, node: u32) -> Self {
        self.dead.insert(node);
        self
    }

    pub(crate) fn build(self) -> Graph {
        Graph(Rc::new(GraphInner {
            edges: self.edges,
            goals: self.goals,
            dead: self.dead,
            expansions: Cell::new(0),
        }))
    }
}

impl Graph {
    pub(crate) fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// 0 -> 1 -> ... -> len, with `len` solved
    pub(crate) fn chain(len: u32) -> Graph {
        (0..len)
            .fold(Graph::builder(), |b, n| b.edges(n, &[n + 1]))
            .goal(len)
            .build()
    }

    pub(crate) fn start(&self, node: u32) -> GraphState {
        GraphState {
            node,
            graph: self.clone(),
        }
    }

    /// How many times `extensions` has been called on any state
    pub(crate) fn expansions(&self) -> usize {
        self.0.expansions.get()
    }
}

#[derive(Debug)]
pub(crate) struct GraphState {
    node: u32,
    graph: Graph,
}

impl fmt::Display for GraphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.node)
    }
}

impl Puzzle for GraphState {
    fn is_solved(&self) -> bool {
        self.graph.0.goals.contains(&self.node)
    }

    fn fail_fast(&self) -> bool {
        self.graph.0.dead.contains(&self.node)
    }

    fn extensions(&self) -> Vec<Self> {
        let inner = &self.graph.0;
        inner.expansions.set(inner.expansions.get() + 1);
        inner
            .edges
            .get(&self.node)
            .map(|next| next.iter().map(|&n| self.graph.start(n)).collect())
            .unwrap_or_default()
    }
}

pub(crate) fn fingerprints<P: Puzzle>(path: &[P]) -> Vec<String> {
    path.iter().map(Puzzle::fingerprint).collect()
}
