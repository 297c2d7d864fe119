use super::graph::ProximityGraph;
use crate::domains::field::NodeId;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Ordered node sequence from the requesting agent to its target goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<NodeId>,
    total_weight: f64,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>, total_weight: f64) -> Self {
        Self { nodes, total_weight }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn start(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn goal(&self) -> Option<&NodeId> {
        self.nodes.last()
    }

    /// Sum of edge weights along the path.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `"Messi → A. Fati → Goal_Right"`
    pub fn label(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Shortest path from `start` to `end`, or `None` when `end` is unreachable
/// or either endpoint is missing from the graph.
///
/// Stops as soon as `end` is settled. Never returns a partial path.
pub fn dijkstra(graph: &ProximityGraph, start: &NodeId, end: &NodeId) -> Option<Path> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let mut dist: HashMap<&NodeId, f64> = HashMap::new();
    let mut prev: HashMap<&NodeId, &NodeId> = HashMap::new();
    let mut settled: HashSet<&NodeId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    dist.insert(start, 0.0);
    queue.push(Reverse((OrderedFloat(0.0), start)));

    while let Some(Reverse((OrderedFloat(cost), node))) = queue.pop() {
        if !settled.insert(node) {
            continue;
        }
        if node == end {
            break;
        }
        for edge in graph.edges(node) {
            let alt = cost + edge.weight;
            if dist.get(&edge.to).map_or(true, |&known| alt < known) {
                dist.insert(&edge.to, alt);
                prev.insert(&edge.to, node);
                queue.push(Reverse((OrderedFloat(alt), &edge.to)));
            }
        }
    }

    let total_weight = *dist.get(end)?;

    let mut nodes = vec![end.clone()];
    let mut current = end;
    while current != start {
        current = *prev.get(current)?;
        nodes.push(current.clone());
    }
    nodes.reverse();

    tracing::trace!(hops = nodes.len() - 1, total_weight, "shortest path settled");
    Some(Path { nodes, total_weight })
}
