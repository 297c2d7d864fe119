use super::solver::Path;
use crate::common::{DomainError, DomainResult};
use crate::domains::field::{FieldSnapshot, Position2D};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Short hops still animate over at least this many frames.
pub const MIN_SEGMENT_FRAMES: u32 = 10;

/// Ball speed in field units per frame.
pub const DEFAULT_BALL_SPEED: f64 = 3.0;

/// Interpolation steps for a segment of length `distance`:
/// `max(10, floor(distance / speed))`.
pub fn segment_frames(distance: f64, speed: f64) -> u32 {
    // `as` saturates and maps NaN to 0
    ((distance / speed).floor() as u32).max(MIN_SEGMENT_FRAMES)
}

/// Shared playback token. Starting or cancelling a playback advances it, and
/// every older `Playback` stops producing frames once it notices.
#[derive(Debug, Clone, Default)]
pub struct PlaybackGeneration(Arc<AtomicU64>);

impl PlaybackGeneration {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Bump the generation and return the new value.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// One rendered ball position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub segment: usize,
    /// Fraction of the current segment covered, in `[0, 1]`.
    pub progress: f64,
    pub position: Position2D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Segment { index: usize, frame: u32, frames: u32 },
    Finish,
    Done,
}

/// Turns resolved paths into frame sequences at a fixed speed.
#[derive(Debug, Clone)]
pub struct PathPlayer {
    speed: f64,
    generation: PlaybackGeneration,
}

impl PathPlayer {
    pub fn new(speed: f64) -> DomainResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(DomainError::InvalidCommand {
                reason: format!("Playback speed must be positive, got {}", speed),
            });
        }
        Ok(Self {
            speed,
            generation: PlaybackGeneration::default(),
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn generation(&self) -> &PlaybackGeneration {
        &self.generation
    }

    /// Stop whatever playback is in flight.
    pub fn cancel(&self) {
        self.generation.advance();
    }

    /// Start playing `path`, superseding any earlier playback. Node positions
    /// are copied out of `snapshot` now; later drags do not bend the flight.
    pub fn play(&self, path: &Path, snapshot: &FieldSnapshot) -> DomainResult<Playback> {
        let waypoints = path
            .nodes()
            .iter()
            .map(|node| {
                snapshot.position_of(node).ok_or_else(|| DomainError::InvalidCommand {
                    reason: format!("Path node {} is not on the field", node),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        let token = self.generation.advance();
        Ok(Playback::new(waypoints, self.speed, token, self.generation.clone()))
    }
}

/// Lazily generated ball positions along a path, one per frame tick.
///
/// Yields the first waypoint, then `segment_frames` interpolated positions
/// per segment, then the final waypoint once more. Paths with fewer than two
/// waypoints yield nothing.
#[derive(Debug, Clone)]
pub struct Playback {
    waypoints: Vec<Position2D>,
    speed: f64,
    stage: Stage,
    token: u64,
    generation: PlaybackGeneration,
    cancelled: bool,
}

impl Playback {
    fn new(waypoints: Vec<Position2D>, speed: f64, token: u64, generation: PlaybackGeneration) -> Self {
        let stage = if waypoints.len() < 2 { Stage::Done } else { Stage::Start };
        Self {
            waypoints,
            speed,
            stage,
            token,
            generation,
            cancelled: false,
        }
    }

    pub fn waypoints(&self) -> &[Position2D] {
        &self.waypoints
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    /// A newer playback was started or this one was cancelled.
    pub fn is_superseded(&self) -> bool {
        self.generation.current() != self.token
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Ran all the way to the final waypoint.
    pub fn is_complete(&self) -> bool {
        self.is_finished() && !self.cancelled && self.waypoints.len() >= 2
    }

    /// Number of frames a full, uncancelled run yields.
    pub fn total_frames(&self) -> usize {
        if self.waypoints.len() < 2 {
            return 0;
        }
        let interpolated: usize = self
            .waypoints
            .windows(2)
            .map(|pair| segment_frames(pair[0].distance_to(&pair[1]), self.speed) as usize)
            .sum();
        interpolated + 2
    }

    fn enter_segment(&self, index: usize) -> Stage {
        match (self.waypoints.get(index), self.waypoints.get(index + 1)) {
            (Some(from), Some(to)) => Stage::Segment {
                index,
                frame: 0,
                frames: segment_frames(from.distance_to(to), self.speed),
            },
            _ => Stage::Finish,
        }
    }
}

impl Iterator for Playback {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.stage == Stage::Done {
            return None;
        }
        if self.is_superseded() {
            self.stage = Stage::Done;
            self.cancelled = true;
            return None;
        }

        match self.stage {
            Stage::Start => {
                let first = *self.waypoints.first()?;
                self.stage = self.enter_segment(0);
                Some(Frame {
                    segment: 0,
                    progress: 0.0,
                    position: first,
                })
            }
            Stage::Segment { index, frame, frames } => {
                let from = *self.waypoints.get(index)?;
                let to = *self.waypoints.get(index + 1)?;
                let frame = frame + 1;
                let progress = f64::from(frame) / f64::from(frames);
                self.stage = if frame < frames {
                    Stage::Segment { index, frame, frames }
                } else {
                    self.enter_segment(index + 1)
                };
                Some(Frame {
                    segment: index,
                    progress,
                    position: from.lerp(&to, progress),
                })
            }
            Stage::Finish => {
                let last = *self.waypoints.last()?;
                self.stage = Stage::Done;
                Some(Frame {
                    segment: self.waypoints.len().saturating_sub(2),
                    progress: 1.0,
                    position: last,
                })
            }
            Stage::Done => None,
        }
    }
}
