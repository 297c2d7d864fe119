use super::playback::Frame;
use super::solver::Path;
use crate::domains::field::NodeId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a route request as reported to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RouteOutcome {
    Resolved(Path),
    NoPath { agent_id: String, goal: NodeId },
}

impl RouteOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            RouteOutcome::Resolved(path) => Some(path),
            RouteOutcome::NoPath { .. } => None,
        }
    }
}

/// Output port towards whatever draws the field.
pub trait RouteObserver: Send + Sync {
    fn on_path_resolved(&self, outcome: &RouteOutcome);
    fn on_frame(&self, frame: &Frame);
    fn on_playback_complete(&self);
}

/// Input port for the external display refresh driver.
#[async_trait]
pub trait FrameClock: Send {
    /// Wait for the next frame.
    async fn tick(&mut self);
}
