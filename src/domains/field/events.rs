use super::types::{Position2D, Team};
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FieldEvent {
    AgentPlaced {
        field_id: String,
        agent_id: String,
        team: Team,
        position: Position2D,
        timestamp: DateTime<Utc>,
    },
    AgentMoved {
        field_id: String,
        agent_id: String,
        from: Position2D,
        to: Position2D,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for FieldEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FieldEvent::AgentPlaced { .. } => "AgentPlaced",
            FieldEvent::AgentMoved { .. } => "AgentMoved",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            FieldEvent::AgentPlaced { field_id, .. } => field_id,
            FieldEvent::AgentMoved { field_id, .. } => field_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            FieldEvent::AgentPlaced { timestamp, .. } => *timestamp,
            FieldEvent::AgentMoved { timestamp, .. } => *timestamp,
        }
    }
}
