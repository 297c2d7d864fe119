use crate::domains::field::{Agent, GoalNode, NodeId, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum distance at which two nodes are linked.
pub const DEFAULT_MAX_LINK_DISTANCE: f64 = 400.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: NodeId,
    /// Euclidean distance between the two endpoints.
    pub weight: f64,
}

/// Directed weighted proximity graph over one team and its target goal.
///
/// Rebuilt from a snapshot for every request and never edited afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityGraph {
    adjacency: BTreeMap<NodeId, Vec<Edge>>,
}

impl ProximityGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Outgoing edges of `node`; empty for unknown nodes.
    pub fn edges(&self, node: &NodeId) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.edges(from).iter().find(|e| &e.to == to).map(|e| e.weight)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    fn add_node(&mut self, node: NodeId) {
        self.adjacency.entry(node).or_default();
    }

    fn add_edge(&mut self, from: &NodeId, to: NodeId, weight: f64) {
        self.adjacency.entry(from.clone()).or_default().push(Edge { to, weight });
    }
}

/// Link every pair of `team` agents closer than `max_link_distance`, plus
/// every such agent close enough to `opponent_goal`.
///
/// Each unordered pair is visited in both orders, so the result holds two
/// directed edges per teammate link. The goal gets an adjacency entry but no
/// outgoing edges, and agents of the other team are ignored entirely.
pub fn build_graph(
    agents: &[Agent],
    opponent_goal: &GoalNode,
    team: Team,
    max_link_distance: f64,
) -> ProximityGraph {
    let team_agents: Vec<&Agent> = agents.iter().filter(|a| a.team == team).collect();
    let goal_id = opponent_goal.node_id();

    let mut graph = ProximityGraph::default();
    for agent in &team_agents {
        graph.add_node(agent.node_id());
    }
    graph.add_node(goal_id.clone());

    for (i, from) in team_agents.iter().enumerate() {
        let from_id = from.node_id();
        for (j, to) in team_agents.iter().enumerate() {
            if i == j {
                continue;
            }
            let dist = from.position.distance_to(&to.position);
            if dist < max_link_distance {
                graph.add_edge(&from_id, to.node_id(), dist);
            }
        }
    }

    for agent in &team_agents {
        let dist = agent.position.distance_to(&opponent_goal.position);
        if dist < max_link_distance {
            graph.add_edge(&agent.node_id(), goal_id.clone(), dist);
        }
    }

    graph
}
