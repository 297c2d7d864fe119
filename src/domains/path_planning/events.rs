use crate::common::DomainEvent;
use crate::domains::field::NodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PathPlanningEvent {
    SelectionChanged {
        session_id: String,
        agent_id: Option<String>,
        timestamp: DateTime<Utc>,
    },
    PathResolved {
        session_id: String,
        request_id: String,
        agent_id: String,
        nodes: Vec<NodeId>,
        total_weight: f64,
        timestamp: DateTime<Utc>,
    },
    NoPathFound {
        session_id: String,
        request_id: String,
        agent_id: String,
        goal: NodeId,
        timestamp: DateTime<Utc>,
    },
    PlaybackCancelled {
        session_id: String,
        generation: u64,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for PathPlanningEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PathPlanningEvent::SelectionChanged { .. } => "SelectionChanged",
            PathPlanningEvent::PathResolved { .. } => "PathResolved",
            PathPlanningEvent::NoPathFound { .. } => "NoPathFound",
            PathPlanningEvent::PlaybackCancelled { .. } => "PlaybackCancelled",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            PathPlanningEvent::SelectionChanged { session_id, .. } => session_id,
            PathPlanningEvent::PathResolved { session_id, .. } => session_id,
            PathPlanningEvent::NoPathFound { session_id, .. } => session_id,
            PathPlanningEvent::PlaybackCancelled { session_id, .. } => session_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PathPlanningEvent::SelectionChanged { timestamp, .. } => *timestamp,
            PathPlanningEvent::PathResolved { timestamp, .. } => *timestamp,
            PathPlanningEvent::NoPathFound { timestamp, .. } => *timestamp,
            PathPlanningEvent::PlaybackCancelled { timestamp, .. } => *timestamp,
        }
    }
}
