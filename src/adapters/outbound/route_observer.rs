use crate::domains::logger::DynLogger;
use crate::domains::path_planning::{Frame, RouteObserver, RouteOutcome};
use std::sync::{Mutex, PoisonError};

/// Reports resolved paths through the domain logger. Frames and misses go to
/// tracing at debug level; the service already reports misses to the user.
pub struct LoggingRouteObserver {
    logger: DynLogger,
}

impl LoggingRouteObserver {
    pub fn new(logger: DynLogger) -> Self {
        Self { logger }
    }
}

impl RouteObserver for LoggingRouteObserver {
    fn on_path_resolved(&self, outcome: &RouteOutcome) {
        match outcome {
            RouteOutcome::Resolved(path) => self.logger.info(&format!("Path: {}", path.label())),
            RouteOutcome::NoPath { agent_id, goal } => {
                tracing::debug!(agent = agent_id.as_str(), goal = %goal, "no path to render")
            }
        }
    }

    fn on_frame(&self, frame: &Frame) {
        tracing::debug!(
            segment = frame.segment,
            progress = frame.progress,
            x = frame.position.x,
            y = frame.position.y,
            "ball frame"
        );
    }

    fn on_playback_complete(&self) {
        self.logger.info("Ball reached the goal");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteNotification {
    Resolved(RouteOutcome),
    Frame(Frame),
    Complete,
}

/// Keeps every notification in order. Handy for tests and replays.
#[derive(Default)]
pub struct RecordingRouteObserver {
    notifications: Mutex<Vec<RouteNotification>>,
}

impl RecordingRouteObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<RouteNotification> {
        self.notifications.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                RouteNotification::Frame(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.notifications()
            .iter()
            .filter(|n| matches!(n, RouteNotification::Complete))
            .count()
    }

    fn push(&self, notification: RouteNotification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

impl RouteObserver for RecordingRouteObserver {
    fn on_path_resolved(&self, outcome: &RouteOutcome) {
        self.push(RouteNotification::Resolved(outcome.clone()));
    }

    fn on_frame(&self, frame: &Frame) {
        self.push(RouteNotification::Frame(*frame));
    }

    fn on_playback_complete(&self) {
        self.push(RouteNotification::Complete);
    }
}
