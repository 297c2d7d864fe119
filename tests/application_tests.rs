use std::sync::Arc;

use async_trait::async_trait;
use pitch_path::adapters::inbound::ImmediateFrameClock;
use pitch_path::adapters::outbound::{init_noop_logger, RecordingRouteObserver, RouteNotification};
use pitch_path::application::{run_playback, PassRouteService};
use pitch_path::common::{ApplicationError, RouteError};
use pitch_path::config::Config;
use pitch_path::domains::field::{Field, FieldBounds, NodeId, Position2D, Team};
use pitch_path::domains::path_planning::{
    FrameClock, PathPlanningEvent, PlaybackGeneration, RouteOutcome,
};

/// Team A: "Messi" can relay through "Fati" to the right goal, "Lonely" is
/// stranded on the left. Team B: "Ronaldo" near the left goal.
fn setup() -> (PassRouteService, Arc<RecordingRouteObserver>) {
    let mut field = Field::new(
        "field-1".to_string(),
        FieldBounds::default(),
        Position2D::new(10.0, 250.0),
        Position2D::new(890.0, 250.0),
    );
    field.add_agent("Messi".to_string(), Team::A, Position2D::new(450.0, 250.0)).unwrap();
    field.add_agent("Fati".to_string(), Team::A, Position2D::new(600.0, 250.0)).unwrap();
    field.add_agent("Lonely".to_string(), Team::A, Position2D::new(40.0, 40.0)).unwrap();
    field.add_agent("Ronaldo".to_string(), Team::B, Position2D::new(200.0, 250.0)).unwrap();

    let observer = Arc::new(RecordingRouteObserver::new());
    let service = PassRouteService::new(field, &Config::default(), observer.clone(), init_noop_logger()).unwrap();
    (service, observer)
}

fn route_error(result: Result<impl std::fmt::Debug, ApplicationError>) -> RouteError {
    match result {
        Err(ApplicationError::Route(e)) => e,
        other => panic!("Expected route error, got {:?}", other),
    }
}

#[test]
fn test_request_without_selection() {
    let (mut service, observer) = setup();

    let err = route_error(service.request_path());
    assert_eq!(err, RouteError::NoAgentSelected);
    assert!(service.last_path().is_none());
    assert!(service.uncommitted_events().is_empty());
    assert!(observer.notifications().is_empty());
}

#[test]
fn test_request_for_unknown_agent_keeps_state() {
    let (mut service, _observer) = setup();
    service.select_agent("Messi");
    service.request_path().unwrap();
    let events_before = service.uncommitted_events().len();

    service.select_agent("Ghost");
    let events_after_select = service.uncommitted_events().len();
    let err = route_error(service.request_path());
    assert_eq!(err, RouteError::UnknownAgent { id: "Ghost".to_string() });
    assert_eq!(service.uncommitted_events().len(), events_after_select);
    assert!(events_after_select > events_before);

    let err = route_error(service.request_path_for("Nobody"));
    assert_eq!(err, RouteError::UnknownAgent { id: "Nobody".to_string() });
    assert_eq!(service.selected_agent(), Some("Ghost"));
}

#[test]
fn test_request_path_resolves_and_notifies() {
    let (mut service, observer) = setup();
    service.select_agent("Messi");

    let route = service.request_path().unwrap();
    let expected = vec![NodeId::agent("Messi"), NodeId::agent("Fati"), NodeId::Goal(Team::B)];
    assert_eq!(route.path.nodes(), expected.as_slice());
    assert!((route.path.total_weight() - 440.0).abs() < 1e-9);
    assert_eq!(route.path.label(), "Messi → Fati → Goal_Right");
    assert_eq!(service.last_path(), Some(&route.path));
    assert_eq!(route.playback.total_frames(), 1 + 50 + 96 + 1);

    assert_eq!(
        observer.notifications(),
        vec![RouteNotification::Resolved(RouteOutcome::Resolved(route.path.clone()))]
    );
    match service.uncommitted_events().last().unwrap() {
        PathPlanningEvent::PathResolved { agent_id, nodes, .. } => {
            assert_eq!(agent_id, "Messi");
            assert_eq!(nodes, &expected);
        }
        other => panic!("Expected PathResolved event, got {:?}", other),
    }
}

#[test]
fn test_team_b_attacks_left_goal() {
    let (mut service, _observer) = setup();
    let route = service.request_path_for("Ronaldo").unwrap();
    assert_eq!(route.path.nodes(), &[NodeId::agent("Ronaldo"), NodeId::Goal(Team::A)]);
    assert!((route.path.total_weight() - 190.0).abs() < 1e-9);
}

#[test]
fn test_no_path_clears_previous_route() {
    let (mut service, observer) = setup();
    let mut first = service.request_path_for("Messi").unwrap().playback;
    assert!(first.next().is_some());

    let err = route_error(service.request_path_for("Lonely"));
    assert_eq!(
        err,
        RouteError::NoPathFound {
            agent_id: "Lonely".to_string(),
            goal: "Goal_Right".to_string()
        }
    );
    assert!(service.last_path().is_none());
    assert!(first.next().is_none());
    assert!(first.is_superseded());

    match observer.notifications().last().unwrap() {
        RouteNotification::Resolved(RouteOutcome::NoPath { agent_id, goal }) => {
            assert_eq!(agent_id, "Lonely");
            assert_eq!(goal, &NodeId::Goal(Team::B));
        }
        other => panic!("Expected NoPath notification, got {:?}", other),
    }
    assert!(service
        .uncommitted_events()
        .iter()
        .any(|e| matches!(e, PathPlanningEvent::NoPathFound { .. })));
}

#[test]
fn test_new_request_supersedes_playback() {
    let (mut service, _observer) = setup();
    let mut first = service.request_path_for("Messi").unwrap().playback;
    let mut second = service.request_path_for("Messi").unwrap().playback;

    assert!(first.next().is_none());
    assert!(second.next().is_some());
}

#[test]
fn test_selection_change_forgets_path() {
    let (mut service, _observer) = setup();
    service.select_agent("Messi");
    let mut playback = service.request_path().unwrap().playback;

    service.select_agent("Fati");
    assert!(service.last_path().is_none());
    assert!(playback.next().is_none());

    service.clear_selection();
    assert_eq!(service.selected_agent(), None);
    match service.uncommitted_events().last().unwrap() {
        PathPlanningEvent::SelectionChanged { agent_id, .. } => assert!(agent_id.is_none()),
        other => panic!("Expected SelectionChanged event, got {:?}", other),
    }
}

#[test]
fn test_drag_keeps_path_but_stops_ball() {
    let (mut service, _observer) = setup();
    service.select_agent("Messi");
    let mut playback = service.request_path().unwrap().playback;

    let stored = service.move_agent("Fati", Position2D::new(650.0, 1000.0)).unwrap();
    assert_eq!(stored, Position2D::new(650.0, 480.0));
    assert!(service.last_path().is_some());
    assert!(playback.next().is_none());

    let segments = service.path_segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], (Position2D::new(450.0, 250.0), Position2D::new(650.0, 480.0)));
    assert_eq!(segments[1], (Position2D::new(650.0, 480.0), Position2D::new(890.0, 250.0)));
}

#[test]
fn test_drag_unknown_agent() {
    let (mut service, _observer) = setup();
    assert!(service.move_agent("Ghost", Position2D::new(1.0, 1.0)).is_err());
}

#[test]
fn test_mark_events_as_committed() {
    let (mut service, _observer) = setup();
    service.select_agent("Messi");
    service.request_path().unwrap();
    service.move_agent("Messi", Position2D::new(460.0, 250.0)).unwrap();
    assert!(!service.uncommitted_events().is_empty());

    service.mark_events_as_committed();
    assert!(service.uncommitted_events().is_empty());
}

#[tokio::test]
async fn test_run_playback_to_completion() {
    let (mut service, observer) = setup();
    let route = service.request_path_for("Messi").unwrap();
    let expected_frames = route.playback.total_frames();

    let mut clock = ImmediateFrameClock::default();
    let report = run_playback(route.playback, &mut clock, observer.as_ref()).await;

    assert!(report.completed);
    assert_eq!(report.frames, expected_frames);
    assert_eq!(clock.ticks as usize, expected_frames - 1);
    assert_eq!(observer.frames().len(), expected_frames);
    assert_eq!(observer.completions(), 1);
    assert_eq!(observer.frames().last().unwrap().position, Position2D::new(890.0, 250.0));
    assert_eq!(observer.notifications().last(), Some(&RouteNotification::Complete));
}

/// Supersedes the running playback after a fixed number of ticks, the way a
/// second click on "find path" would.
struct InterruptingClock {
    generation: PlaybackGeneration,
    remaining: usize,
}

#[async_trait]
impl FrameClock for InterruptingClock {
    async fn tick(&mut self) {
        if self.remaining == 0 {
            self.generation.advance();
        } else {
            self.remaining -= 1;
        }
    }
}

#[test]
fn test_run_playback_superseded_midway() {
    let (mut service, observer) = setup();
    let route = service.request_path_for("Messi").unwrap();
    let mut clock = InterruptingClock {
        generation: service.player().generation().clone(),
        remaining: 5,
    };

    let report = tokio_test::block_on(run_playback(route.playback, &mut clock, observer.as_ref()));

    assert!(!report.completed);
    assert_eq!(report.frames, 6);
    assert_eq!(observer.frames().len(), 6);
    assert_eq!(observer.completions(), 0);
}

#[test]
fn test_pending_envelopes_cover_field_and_session() {
    let (mut service, _observer) = setup();
    service.select_agent("Messi");
    service.request_path().unwrap();

    let envelopes = service.pending_envelopes().unwrap();
    // four placements, then selection change and resolved path
    assert_eq!(envelopes.len(), 4 + 2);
    assert!(envelopes[..4].iter().all(|e| e.aggregate_type == "Field" && e.event_type == "AgentPlaced"));
    assert_eq!(envelopes[4].event_type, "SelectionChanged");
    assert_eq!(envelopes[5].event_type, "PathResolved");
    assert_eq!(envelopes[5].aggregate_type, "PassRouteSession");
    assert_eq!(envelopes[5].event_data["PathResolved"]["agent_id"], "Messi");

    service.mark_events_as_committed();
    assert!(service.pending_envelopes().unwrap().is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let field = Field::new(
        "field-1".to_string(),
        FieldBounds::default(),
        Position2D::new(10.0, 250.0),
        Position2D::new(890.0, 250.0),
    );
    let mut config = Config::default();
    config.playback.speed = 0.0;

    let result = PassRouteService::new(field, &config, Arc::new(RecordingRouteObserver::new()), init_noop_logger());
    assert!(matches!(result, Err(ApplicationError::Configuration(_))));
}

fn cancellations(service: &PassRouteService) -> usize {
    service
        .uncommitted_events()
        .iter()
        .filter(|e| matches!(e, PathPlanningEvent::PlaybackCancelled { .. }))
        .count()
}

#[test]
fn test_cancellation_recorded_only_for_running_playback() {
    let (mut service, _observer) = setup();

    service.select_agent("Messi");
    service.clear_selection();
    service.move_agent("Fati", Position2D::new(610.0, 250.0)).unwrap();
    assert_eq!(cancellations(&service), 0);

    service.select_agent("Messi");
    let mut playback = service.request_path().unwrap().playback;
    service.select_agent("Fati");
    assert_eq!(cancellations(&service), 1);
    assert!(playback.next().is_none());

    service.clear_selection();
    service.move_agent("Fati", Position2D::new(600.0, 250.0)).unwrap();
    assert_eq!(cancellations(&service), 1);
}

#[test]
fn test_superseded_playback_is_not_cancelled_again() {
    let (mut service, _observer) = setup();
    service.request_path_for("Messi").unwrap();
    service.player().generation().advance();

    service.move_agent("Fati", Position2D::new(610.0, 250.0)).unwrap();
    assert_eq!(cancellations(&service), 0);
}
