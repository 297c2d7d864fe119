use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `to`.
    pub fn lerp(&self, to: &Position2D, t: f64) -> Position2D {
        Position2D {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Team::A => "Team A",
            Team::B => "Team B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Graph vertex identifier. Agents and goals live in separate variants so an
/// agent can never be mistaken for a goal, whatever its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeId {
    Agent(String),
    /// The goal defended by the given team.
    Goal(Team),
}

impl NodeId {
    pub fn agent(id: impl Into<String>) -> Self {
        NodeId::Agent(id.into())
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, NodeId::Goal(_))
    }

    pub fn as_agent(&self) -> Option<&str> {
        match self {
            NodeId::Agent(id) => Some(id),
            NodeId::Goal(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Agent(id) => f.write_str(id),
            NodeId::Goal(Team::A) => f.write_str("Goal_Left"),
            NodeId::Goal(Team::B) => f.write_str("Goal_Right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub position: Position2D,
    pub team: Team,
}

impl Agent {
    pub fn node_id(&self) -> NodeId {
        NodeId::Agent(self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalNode {
    /// Team defending this goal.
    pub owner: Team,
    pub position: Position2D,
}

impl GoalNode {
    pub fn node_id(&self) -> NodeId {
        NodeId::Goal(self.owner)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

impl FieldBounds {
    /// Clamp into `[margin, width - margin] x [margin, height - margin]`.
    pub fn clamp(&self, position: Position2D, margin: f64) -> Position2D {
        Position2D {
            x: position.x.max(margin).min(self.width - margin),
            y: position.y.max(margin).min(self.height - margin),
        }
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
        }
    }
}
