use super::events::FieldEvent;
use super::roster::{random_position, Rosters};
use super::snapshot::FieldSnapshot;
use super::types::{Agent, FieldBounds, GoalNode, Position2D, Team};
use crate::common::{AggregateRoot, DomainError, DomainResult};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The live playing field: every agent's current coordinate plus the two
/// fixed goals. Drag updates mutate it; route planning only sees snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub bounds: FieldBounds,
    agents: Vec<Agent>,
    goals: [GoalNode; 2],
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<FieldEvent>,
}

impl Field {
    /// `left_goal` is defended by team A, `right_goal` by team B.
    pub fn new(id: String, bounds: FieldBounds, left_goal: Position2D, right_goal: Position2D) -> Self {
        Self {
            id,
            bounds,
            agents: Vec::new(),
            goals: [
                GoalNode { owner: Team::A, position: left_goal },
                GoalNode { owner: Team::B, position: right_goal },
            ],
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Place both rosters at random inside the spawn area.
    pub fn with_rosters<R: Rng + ?Sized>(
        id: String,
        bounds: FieldBounds,
        left_goal: Position2D,
        right_goal: Position2D,
        rosters: &Rosters,
        spawn_margin: f64,
        rng: &mut R,
    ) -> DomainResult<Self> {
        let mut field = Self::new(id, bounds, left_goal, right_goal);
        for team in [Team::A, Team::B] {
            for name in rosters.names(team) {
                let position = random_position(&field.bounds, spawn_margin, rng)?;
                field.add_agent(name.clone(), team, position)?;
            }
        }
        Ok(field)
    }

    pub fn add_agent(&mut self, agent_id: String, team: Team, position: Position2D) -> DomainResult<()> {
        if self.agents.iter().any(|a| a.id == agent_id) {
            return Err(DomainError::InvalidCommand {
                reason: format!("Agent {} is already on the field", agent_id),
            });
        }
        if !position.is_finite() {
            return Err(DomainError::InvalidCommand {
                reason: format!("Agent {} has a non-finite position", agent_id),
            });
        }
        self.record(FieldEvent::AgentPlaced {
            field_id: self.id.clone(),
            agent_id,
            team,
            position,
            timestamp: Utc::now(),
        })
    }

    /// Reposition an agent, clamping into the field with `margin` on every
    /// side. Returns the coordinate actually stored.
    pub fn move_agent(&mut self, agent_id: &str, position: Position2D, margin: f64) -> DomainResult<Position2D> {
        if !position.is_finite() {
            return Err(DomainError::InvalidCommand {
                reason: format!("Cannot move {} to a non-finite position", agent_id),
            });
        }
        let from = self
            .agent(agent_id)
            .map(|a| a.position)
            .ok_or_else(|| DomainError::AgentNotFound { id: agent_id.to_string() })?;
        let to = self.bounds.clamp(position, margin);
        self.record(FieldEvent::AgentMoved {
            field_id: self.id.clone(),
            agent_id: agent_id.to_string(),
            from,
            to,
            timestamp: Utc::now(),
        })?;
        Ok(to)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// Names of a team's agents in setup order.
    pub fn roster(&self, team: Team) -> Vec<&str> {
        self.agents
            .iter()
            .filter(|a| a.team == team)
            .map(|a| a.id.as_str())
            .collect()
    }

    pub fn goal(&self, owner: Team) -> &GoalNode {
        match owner {
            Team::A => &self.goals[0],
            Team::B => &self.goals[1],
        }
    }

    pub fn opponent_goal(&self, team: Team) -> &GoalNode {
        self.goal(team.opponent())
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::new(self.version, self.agents.clone(), self.goals.clone())
    }
}

impl AggregateRoot for Field {
    type Event = FieldEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            FieldEvent::AgentPlaced { agent_id, team, position, .. } => {
                self.agents.push(Agent {
                    id: agent_id.clone(),
                    position: *position,
                    team: *team,
                });
            }
            FieldEvent::AgentMoved { agent_id, to, .. } => {
                let agent = self
                    .agents
                    .iter_mut()
                    .find(|a| &a.id == agent_id)
                    .ok_or_else(|| DomainError::AgentNotFound { id: agent_id.clone() })?;
                agent.position = *to;
            }
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
