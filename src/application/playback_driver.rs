use crate::domains::path_planning::{FrameClock, Playback, RouteObserver};

/// How a driven playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    pub frames: usize,
    pub completed: bool,
}

/// Pump `playback` into `observer`, one frame per clock tick.
///
/// The first frame is delivered without waiting. Stops as soon as the
/// playback runs out or is superseded; `on_playback_complete` fires only in
/// the first case.
pub async fn run_playback<C>(mut playback: Playback, clock: &mut C, observer: &dyn RouteObserver) -> PlaybackReport
where
    C: FrameClock + ?Sized,
{
    let mut frames = 0;
    while let Some(frame) = playback.next() {
        observer.on_frame(&frame);
        frames += 1;
        if playback.is_finished() {
            break;
        }
        clock.tick().await;
    }

    let completed = playback.is_complete();
    if completed {
        observer.on_playback_complete();
    } else {
        tracing::debug!(frames, token = playback.token(), "playback superseded");
    }
    PlaybackReport { frames, completed }
}
