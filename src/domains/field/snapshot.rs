use super::types::{Agent, GoalNode, NodeId, Position2D, Team};
use serde::{Deserialize, Serialize};

/// Positions of every agent and both goals, read at a single logical instant.
///
/// The planning core only ever reads from a snapshot, so a drag that lands
/// while a route is being computed can never produce a graph mixing old and
/// new coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub version: u64,
    agents: Vec<Agent>,
    goals: [GoalNode; 2],
}

impl FieldSnapshot {
    pub fn new(version: u64, agents: Vec<Agent>, goals: [GoalNode; 2]) -> Self {
        Self {
            version,
            agents,
            goals,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Goal defended by `owner`.
    pub fn goal(&self, owner: Team) -> &GoalNode {
        match owner {
            Team::A => &self.goals[0],
            Team::B => &self.goals[1],
        }
    }

    /// Goal that `team` attacks.
    pub fn opponent_goal(&self, team: Team) -> &GoalNode {
        self.goal(team.opponent())
    }

    pub fn position_of(&self, node: &NodeId) -> Option<Position2D> {
        match node {
            NodeId::Agent(id) => self.agent(id).map(|a| a.position),
            NodeId::Goal(owner) => Some(self.goal(*owner).position),
        }
    }
}
