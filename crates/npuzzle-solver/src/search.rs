//! One A* search space: a node arena plus its priority frontier.
//!
//! Nodes form a tree rooted at the start board, linked child-to-parent by
//! arena handles. Parents are always allocated before their children, so the
//! links cannot form a cycle and a path is recovered by walking handles back
//! to the root.
//!
//! The frontier is ordered by an explicit key of `(priority, node id)`; the
//! node itself carries no ordering. Equal priorities pop in creation order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::board::Board;

/// Handle of a node inside a [`Search`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A search node. Never mutated after it is pushed into the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub board: Board,
    pub moves: u32,
    pub parent: Option<NodeId>,
    /// `moves + board.manhattan()`, fixed at creation.
    pub priority: u32,
}

/// Frontier ordering key: lowest priority first, then oldest node.
type FrontierKey = Reverse<(u32, NodeId)>;

/// Counters kept by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    pub expanded: usize,
    pub created: usize,
    pub stale_skipped: usize,
}

/// A single best-first search over boards.
#[derive(Debug)]
pub struct Search {
    nodes: Vec<Node>,
    frontier: BinaryHeap<FrontierKey>,
    /// Boards already expanded, when duplicate detection is enabled.
    closed: Option<HashSet<Board>>,
    counters: SearchCounters,
}

impl Search {
    /// Start a search from `root`.
    pub fn new(root: Board, dedupe_visited: bool) -> Self {
        let mut search = Self {
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            closed: dedupe_visited.then(HashSet::new),
            counters: SearchCounters::default(),
        };
        search.insert(root, 0, None);
        search
    }

    fn insert(&mut self, board: Board, moves: u32, parent: Option<NodeId>) {
        let id = NodeId(self.nodes.len() as u32);
        let priority = moves + board.manhattan();
        self.nodes.push(Node {
            board,
            moves,
            parent,
            priority,
        });
        self.frontier.push(Reverse((priority, id)));
        self.counters.created += 1;
    }

    /// Remove the lowest-priority node from the frontier.
    ///
    /// With duplicate detection on, nodes whose board was already expanded are
    /// dropped here. Returns `None` once the frontier is exhausted.
    pub fn pop(&mut self) -> Option<NodeId> {
        while let Some(Reverse((_, id))) = self.frontier.pop() {
            match &self.closed {
                Some(closed) if closed.contains(&self.nodes[id.index()].board) => {
                    self.counters.stale_skipped += 1;
                }
                _ => return Some(id),
            }
        }
        None
    }

    /// Push every neighbor of `id`'s board except the one it came from.
    pub fn expand(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let moves = node.moves + 1;
        let neighbors = node.board.neighbors();
        let previous = node.parent.map(|parent| &self.nodes[parent.index()].board);
        let children: Vec<Board> = neighbors
            .into_iter()
            .filter(|next| previous != Some(next))
            .collect();

        if let Some(closed) = &mut self.closed {
            closed.insert(self.nodes[id.index()].board.clone());
        }
        for child in children {
            self.insert(child, moves, Some(id));
        }
        self.counters.expanded += 1;
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Boards from the root to `id`, inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::with_capacity(self.node(id).moves as usize + 1);
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            path.push(node.board.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn counters(&self) -> SearchCounters {
        self.counters
    }
}
