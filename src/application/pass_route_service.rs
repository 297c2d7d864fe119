// Pass route service - the request boundary between the field UI and the planning core
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::common::{AggregateRoot, ApplicationResult, DomainResult, EventEnvelope, RouteError};
use crate::config::Config;
use crate::domains::field::{Field, NodeId, Position2D};
use crate::domains::logger::DynLogger;
use crate::domains::path_planning::{
    build_graph, dijkstra, Path, PathPlanningEvent, PathPlayer, Playback, RouteObserver, RouteOutcome,
};

/// A successful route request: the path and its freshly started playback.
#[derive(Debug)]
pub struct ResolvedRoute {
    pub path: Path,
    pub playback: Playback,
}

pub struct PassRouteService {
    session_id: String,
    field: Field,
    max_link_distance: f64,
    drag_margin: f64,
    player: PathPlayer,
    selected: Option<String>,
    last_path: Option<Path>,
    /// Token of the playback started by the last successful request.
    active_playback: Option<u64>,
    observer: Arc<dyn RouteObserver>,
    logger: DynLogger,
    uncommitted_events: Vec<PathPlanningEvent>,
}

impl PassRouteService {
    pub fn new(
        field: Field,
        config: &Config,
        observer: Arc<dyn RouteObserver>,
        logger: DynLogger,
    ) -> ApplicationResult<Self> {
        config.validate()?;
        Ok(Self {
            session_id: Uuid::new_v4().to_string(),
            field,
            max_link_distance: config.planner.max_link_distance,
            drag_margin: config.field.drag_margin,
            player: PathPlayer::new(config.playback.speed)?,
            selected: None,
            last_path: None,
            active_playback: None,
            observer,
            logger,
            uncommitted_events: Vec::new(),
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn player(&self) -> &PathPlayer {
        &self.player
    }

    pub fn selected_agent(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    /// Pick the agent future requests start from. Forgets the last path and
    /// stops the ball.
    pub fn select_agent(&mut self, agent_id: &str) {
        self.change_selection(Some(agent_id.to_string()));
    }

    pub fn clear_selection(&mut self) {
        self.change_selection(None);
    }

    /// Drag update from the input collaborator. The last path is kept for
    /// redrawing, but any in-flight playback is stopped.
    pub fn move_agent(&mut self, agent_id: &str, position: Position2D) -> DomainResult<Position2D> {
        let stored = self.field.move_agent(agent_id, position, self.drag_margin)?;
        self.cancel_playback();
        Ok(stored)
    }

    /// Route from the currently selected agent to the goal it attacks.
    pub fn request_path(&mut self) -> ApplicationResult<ResolvedRoute> {
        let Some(agent_id) = self.selected.clone() else {
            return Err(self.report(RouteError::NoAgentSelected).into());
        };
        self.request_path_for(&agent_id)
    }

    /// Snapshot, build, solve and start playback for `agent_id`.
    ///
    /// `NoAgentSelected` and `UnknownAgent` leave the service untouched.
    /// `NoPathFound` also clears the last path and stops playback.
    pub fn request_path_for(&mut self, agent_id: &str) -> ApplicationResult<ResolvedRoute> {
        let snapshot = self.field.snapshot();
        let Some(start) = snapshot.agent(agent_id) else {
            return Err(self
                .report(RouteError::UnknownAgent { id: agent_id.to_string() })
                .into());
        };
        let team = start.team;
        let start_id = start.node_id();
        let goal = snapshot.opponent_goal(team);
        let goal_id = goal.node_id();

        let graph = build_graph(snapshot.agents(), goal, team, self.max_link_distance);
        tracing::debug!(
            agent = agent_id,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            snapshot_version = snapshot.version,
            "proximity graph built"
        );

        let request_id = Uuid::new_v4().to_string();
        let Some(path) = dijkstra(&graph, &start_id, &goal_id) else {
            self.last_path = None;
            self.cancel_playback();
            self.uncommitted_events.push(PathPlanningEvent::NoPathFound {
                session_id: self.session_id.clone(),
                request_id,
                agent_id: agent_id.to_string(),
                goal: goal_id.clone(),
                timestamp: Utc::now(),
            });
            self.observer.on_path_resolved(&RouteOutcome::NoPath {
                agent_id: agent_id.to_string(),
                goal: goal_id.clone(),
            });
            return Err(self
                .report(RouteError::NoPathFound {
                    agent_id: agent_id.to_string(),
                    goal: goal_id.to_string(),
                })
                .into());
        };

        let playback = self.player.play(&path, &snapshot)?;
        self.uncommitted_events.push(PathPlanningEvent::PathResolved {
            session_id: self.session_id.clone(),
            request_id,
            agent_id: agent_id.to_string(),
            nodes: path.nodes().to_vec(),
            total_weight: path.total_weight(),
            timestamp: Utc::now(),
        });
        tracing::info!(
            agent = agent_id,
            hops = path.hops(),
            total_weight = path.total_weight(),
            "path resolved"
        );
        self.observer.on_path_resolved(&RouteOutcome::Resolved(path.clone()));
        self.last_path = Some(path.clone());
        self.active_playback = Some(playback.token());

        Ok(ResolvedRoute { path, playback })
    }

    /// Line segments of the last path, resolved against current positions.
    /// Pairs touching a node that no longer resolves are skipped.
    pub fn path_segments(&self) -> Vec<(Position2D, Position2D)> {
        let Some(path) = &self.last_path else {
            return Vec::new();
        };
        path.nodes()
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some((self.node_position(from)?, self.node_position(to)?)),
                _ => None,
            })
            .collect()
    }

    /// Position of any node on the live field.
    pub fn node_position(&self, node: &NodeId) -> Option<Position2D> {
        match node {
            NodeId::Agent(id) => self.field.agent(id).map(|a| a.position),
            NodeId::Goal(owner) => Some(self.field.goal(*owner).position),
        }
    }

    pub fn uncommitted_events(&self) -> &[PathPlanningEvent] {
        &self.uncommitted_events
    }

    /// Field and session events not yet committed, serialized for sinks.
    pub fn pending_envelopes(&self) -> DomainResult<Vec<EventEnvelope>> {
        let mut envelopes = Vec::new();
        for event in self.field.uncommitted_events() {
            envelopes.push(EventEnvelope::new(event, "Field")?);
        }
        for event in &self.uncommitted_events {
            envelopes.push(EventEnvelope::new(event, "PassRouteSession")?);
        }
        Ok(envelopes)
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
        self.field.mark_events_as_committed();
    }

    fn change_selection(&mut self, agent_id: Option<String>) {
        self.selected = agent_id.clone();
        self.last_path = None;
        self.cancel_playback();
        self.uncommitted_events.push(PathPlanningEvent::SelectionChanged {
            session_id: self.session_id.clone(),
            agent_id,
            timestamp: Utc::now(),
        });
    }

    /// Stops the playback this service started, if it is still the current
    /// one. Nothing is recorded when no playback is in flight.
    fn cancel_playback(&mut self) {
        let Some(token) = self.active_playback.take() else {
            return;
        };
        if self.player.generation().current() != token {
            return;
        }
        self.player.cancel();
        self.uncommitted_events.push(PathPlanningEvent::PlaybackCancelled {
            session_id: self.session_id.clone(),
            generation: self.player.generation().current(),
            timestamp: Utc::now(),
        });
    }

    fn report(&self, error: RouteError) -> RouteError {
        self.logger.info(&error.to_string());
        error
    }
}
