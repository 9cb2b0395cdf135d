//! Bracket: arena-indexed single-elimination tree.

use crate::models::match_node::MatchNode;
use crate::models::slot::{MatchSlot, Side};
use serde::{Deserialize, Serialize};

/// Index of a node inside its bracket's arena.
pub type NodeId = usize;

/// One node of the KO tree: the match plus its parent back-link. Children
/// are reachable through the match's `MatchWinner` slots; the parent index
/// is set once while filling the bracket and never changes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KoNode {
    pub match_node: MatchNode,
    pub parent: Option<NodeId>,
}

/// Single-elimination tree rooted at the final match. Topology is immutable
/// after construction; only slot contents and match records mutate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub(crate) nodes: Vec<KoNode>,
    pub(crate) root: NodeId,
    /// First-round nodes in match order.
    pub(crate) first_round: Vec<NodeId>,
}

impl Bracket {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &MatchNode {
        &self.nodes[id].match_node
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut MatchNode {
        &mut self.nodes[id].match_node
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn first_round(&self) -> &[NodeId] {
        &self.first_round
    }

    pub fn num_rounds(&self) -> usize {
        self.first_round.len().trailing_zeros() as usize + 1
    }

    /// Child node ids referenced by this match's winner slots, red side first.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let m = self.node(id);
        [&m.red, &m.white]
            .into_iter()
            .filter_map(|s| match s {
                MatchSlot::MatchWinner { node } => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// Node id of the match with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.match_node.name == name)
    }

    /// First-round slot position carrying the given stable slot name.
    pub fn find_slot(&self, name: &str) -> Option<(NodeId, Side)> {
        for &id in &self.first_round {
            for side in [Side::Red, Side::White] {
                if self.node(id).slot(side).name() == Some(name) {
                    return Some((id, side));
                }
            }
        }
        None
    }

    /// The last `count` rounds, earliest first. Walks down from the root so
    /// early rounds of a large bracket are never materialized.
    pub fn final_rounds(&self, count: usize) -> Vec<Vec<NodeId>> {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        if count == 0 || self.nodes.is_empty() {
            return levels;
        }
        let mut current = vec![self.root];
        while !current.is_empty() && levels.len() < count {
            levels.push(current.clone());
            current = current.iter().flat_map(|&id| self.children(id)).collect();
        }
        levels.reverse();
        levels
    }

    /// All rounds, first round first; sizes 2^(r-1), …, 2, 1.
    pub fn rounds(&self) -> Vec<Vec<NodeId>> {
        self.final_rounds(self.num_rounds())
    }

    /// Path of node ids from the root to every node, recorded breadth-first.
    /// `paths[id]` starts at the root and ends at `id`.
    pub fn paths_from_root(&self) -> Vec<Vec<NodeId>> {
        let mut paths: Vec<Vec<NodeId>> = vec![Vec::new(); self.nodes.len()];
        let mut queue = std::collections::VecDeque::new();
        paths[self.root] = vec![self.root];
        queue.push_back(self.root);
        while let Some(id) = queue.pop_front() {
            for child in self.children(id) {
                let mut path = paths[id].clone();
                path.push(child);
                paths[child] = path;
                queue.push_back(child);
            }
        }
        paths
    }

    /// Every node in the subtree rooted at `id`, including `id` itself.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut frontier = vec![id];
        while let Some(n) = frontier.pop() {
            out.push(n);
            frontier.extend(self.children(n));
        }
        out
    }
}
