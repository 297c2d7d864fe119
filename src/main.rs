use std::sync::Arc;

use anyhow::Context;
use pitch_path::adapters::inbound::IntervalFrameClock;
use pitch_path::adapters::outbound::{init_combined_logger, init_console_logger, LoggingRouteObserver};
use pitch_path::domains::field::{default_rosters, Field};
use pitch_path::domains::logger::DynLogger;
use pitch_path::domains::path_planning::{RouteObserver, RouteOutcome};
use pitch_path::{run_playback, ApplicationError, Config, PassRouteService};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "pitch_path.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Leaves the `log` facade free for the fast_log file sink.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    let config = Config::load(CONFIG_PATH).context("loading configuration")?;
    info!(
        max_link_distance = config.planner.max_link_distance,
        speed = config.playback.speed,
        "Configuration loaded"
    );

    let logger: DynLogger = match &config.logging.file {
        Some(path) => init_combined_logger(path, &config.logging.level),
        None => init_console_logger(),
    };

    let mut rng = rand::thread_rng();
    let field = Field::with_rosters(
        "main-field".to_string(),
        config.bounds(),
        config.goals.left,
        config.goals.right,
        &default_rosters(),
        config.field.spawn_margin,
        &mut rng,
    )?;

    let observer = Arc::new(LoggingRouteObserver::new(logger.clone()));
    let mut service = PassRouteService::new(field, &config, observer.clone(), logger.clone())?;

    let requested = std::env::args().nth(1);
    let agent_id = match requested {
        Some(name) => name,
        None => match service.field().agents().first() {
            Some(agent) => agent.id.clone(),
            None => anyhow::bail!("field has no agents"),
        },
    };
    service.select_agent(&agent_id);

    match service.request_path() {
        Ok(route) => {
            let outcome = RouteOutcome::Resolved(route.path.clone());
            info!(outcome = %serde_json::to_string(&outcome)?, "route");
            let mut clock = IntervalFrameClock::from_millis(config.playback.frame_interval_ms);
            let report = run_playback(route.playback, &mut clock, observer.as_ref() as &dyn RouteObserver).await;
            info!(frames = report.frames, completed = report.completed, "Playback finished");
        }
        // Already reported to the user by the service.
        Err(ApplicationError::Route(_)) => {}
        Err(e) => error!("Route request failed: {}", e),
    }

    for envelope in service.pending_envelopes()? {
        debug!(
            aggregate = envelope.aggregate_type.as_str(),
            event = envelope.event_type.as_str(),
            data = %envelope.event_data,
            "event"
        );
    }
    service.mark_events_as_committed();

    Ok(())
}
