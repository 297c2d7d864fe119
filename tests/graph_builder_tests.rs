use pitch_path::domains::field::*;
use pitch_path::domains::path_planning::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_field(seed: u64) -> Field {
    let mut rng = StdRng::seed_from_u64(seed);
    Field::with_rosters(
        format!("field-{}", seed),
        FieldBounds::default(),
        Position2D::new(10.0, 250.0),
        Position2D::new(890.0, 250.0),
        &default_rosters(),
        40.0,
        &mut rng,
    )
    .unwrap()
}

fn agent(id: &str, team: Team, x: f64, y: f64) -> Agent {
    Agent {
        id: id.to_string(),
        position: Position2D::new(x, y),
        team,
    }
}

#[test]
fn test_scenario_three_in_a_row() {
    let agents = vec![
        agent("a", Team::A, 0.0, 0.0),
        agent("b", Team::A, 100.0, 0.0),
        agent("c", Team::A, 250.0, 0.0),
    ];
    let goal = GoalNode { owner: Team::B, position: Position2D::new(500.0, 0.0) };
    let graph = build_graph(&agents, &goal, Team::A, DEFAULT_MAX_LINK_DISTANCE);

    assert_eq!(graph.node_count(), 4);
    // 6 teammate edges plus c -> goal
    assert_eq!(graph.edge_count(), 7);
    assert_eq!(graph.edge_weight(&NodeId::agent("a"), &NodeId::agent("c")), Some(250.0));
    assert_eq!(graph.edge_weight(&NodeId::agent("c"), &NodeId::Goal(Team::B)), Some(250.0));
    assert_eq!(graph.edge_weight(&NodeId::agent("a"), &NodeId::Goal(Team::B)), None);
    assert_eq!(graph.edge_weight(&NodeId::agent("b"), &NodeId::Goal(Team::B)), None);
}

#[test]
fn test_teammate_links_are_symmetric() {
    for seed in 0..20 {
        let field = random_field(seed);
        for team in [Team::A, Team::B] {
            let snapshot = field.snapshot();
            let graph = build_graph(
                snapshot.agents(),
                snapshot.opponent_goal(team),
                team,
                DEFAULT_MAX_LINK_DISTANCE,
            );
            let members: Vec<&Agent> = snapshot.agents().iter().filter(|a| a.team == team).collect();
            for i in &members {
                for j in &members {
                    if i.id == j.id {
                        continue;
                    }
                    let dist = i.position.distance_to(&j.position);
                    let forward = graph.edge_weight(&i.node_id(), &j.node_id());
                    let backward = graph.edge_weight(&j.node_id(), &i.node_id());
                    if dist < DEFAULT_MAX_LINK_DISTANCE {
                        assert_eq!(forward, Some(dist));
                        assert_eq!(backward, Some(dist));
                    } else {
                        assert_eq!(forward, None);
                        assert_eq!(backward, None);
                    }
                }
            }
        }
    }
}

#[test]
fn test_no_cross_team_edges() {
    for seed in 0..20 {
        let field = random_field(seed);
        let snapshot = field.snapshot();
        for team in [Team::A, Team::B] {
            let graph = build_graph(
                snapshot.agents(),
                snapshot.opponent_goal(team),
                team,
                DEFAULT_MAX_LINK_DISTANCE,
            );
            assert_eq!(graph.node_count(), 12);
            assert_eq!(graph.nodes().filter(|n| n.is_goal()).count(), 1);
            for node in graph.nodes() {
                if node.is_goal() {
                    assert!(graph.edges(node).is_empty());
                }
                for edge in graph.edges(node) {
                    let from = node.as_agent().expect("only agents have outgoing edges");
                    assert_eq!(snapshot.agent(from).unwrap().team, team);
                    match &edge.to {
                        NodeId::Agent(to) => assert_eq!(snapshot.agent(to).unwrap().team, team),
                        NodeId::Goal(owner) => assert_eq!(*owner, team.opponent()),
                    }
                }
            }
        }
    }
}

#[test]
fn test_isolated_agent_has_empty_adjacency() {
    let agents = vec![
        agent("lonely", Team::A, 0.0, 0.0),
        agent("rival", Team::B, 10.0, 0.0),
    ];
    let goal = GoalNode { owner: Team::B, position: Position2D::new(900.0, 0.0) };
    let graph = build_graph(&agents, &goal, Team::A, DEFAULT_MAX_LINK_DISTANCE);

    assert!(graph.contains(&NodeId::agent("lonely")));
    assert!(!graph.contains(&NodeId::agent("rival")));
    assert!(graph.edges(&NodeId::agent("lonely")).is_empty());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_smaller_link_distance_prunes_edges() {
    let field = random_field(42);
    let snapshot = field.snapshot();
    let goal = snapshot.opponent_goal(Team::A);

    let wide = build_graph(snapshot.agents(), goal, Team::A, 400.0);
    let narrow = build_graph(snapshot.agents(), goal, Team::A, 150.0);
    assert!(narrow.edge_count() <= wide.edge_count());
    for node in narrow.nodes() {
        for edge in narrow.edges(node) {
            assert!(edge.weight < 150.0);
            assert_eq!(wide.edge_weight(node, &edge.to), Some(edge.weight));
        }
    }
}
