//! Passing routes on a two-team field: proximity graphs over live player
//! positions, Dijkstra to the opponent's goal, and frame-by-frame ball
//! playback along the result.

pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use application::{run_playback, PassRouteService, PlaybackReport, ResolvedRoute};
pub use common::{ApplicationError, ApplicationResult, DomainError, DomainResult, RouteError};
pub use config::Config;
pub use domains::field::{Field, FieldSnapshot, NodeId, Position2D, Team};
pub use domains::logger::{DomainLogger, DynLogger};
pub use domains::path_planning::{build_graph, dijkstra, Frame, Path, PathPlayer, Playback, ProximityGraph};
