//! Scroll velocity sampling with debounce.

use std::time::{Duration, Instant};
use tracing::trace;

/// One scroll position observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    /// Scroll offset in pixels.
    pub offset: f64,
    /// When the offset was observed.
    pub timestamp: Instant,
}

/// Result of an accepted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityReading {
    /// Absolute velocity in px/s.
    pub velocity: f64,
    /// Offset decreased relative to the previous accepted sample.
    pub is_scrolling_up: bool,
}

/// Tracks scroll velocity and direction from a stream of samples.
///
/// Samples arriving no later than `minimum_interval` after the last accepted
/// one are dropped without touching any state. That also drops samples with
/// timestamps earlier than the last accepted one.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    minimum_interval: Duration,
    last: Option<VelocitySample>,
    current_velocity: f64,
    is_scrolling_up: bool,
}

impl VelocityTracker {
    /// Tracker with the given debounce interval.
    pub fn new(minimum_interval: Duration) -> Self {
        Self {
            minimum_interval,
            last: None,
            current_velocity: 0.0,
            is_scrolling_up: false,
        }
    }

    /// Feed a sample.
    ///
    /// Returns `None` when the sample is debounced. The first sample is
    /// accepted as the baseline with zero velocity.
    pub fn record(&mut self, offset: f64, now: Instant) -> Option<VelocityReading> {
        let sample = VelocitySample {
            offset,
            timestamp: now,
        };

        let Some(last) = self.last else {
            self.last = Some(sample);
            self.current_velocity = 0.0;
            self.is_scrolling_up = false;
            trace!(offset, "velocity baseline");
            return Some(self.reading());
        };

        let time_delta = now.saturating_duration_since(last.timestamp);
        if time_delta <= self.minimum_interval {
            trace!(offset, ?time_delta, "velocity sample debounced");
            return None;
        }

        // Direction is judged against the offset before this sample is stored
        self.is_scrolling_up = offset < last.offset;
        self.current_velocity = (offset - last.offset).abs() / time_delta.as_secs_f64();
        self.last = Some(sample);

        trace!(
            offset,
            velocity = self.current_velocity,
            up = self.is_scrolling_up,
            "velocity sample"
        );
        Some(self.reading())
    }

    /// Most recent velocity in px/s.
    pub fn current_velocity(&self) -> f64 {
        self.current_velocity
    }

    /// Direction of the most recent accepted movement.
    pub fn is_scrolling_up(&self) -> bool {
        self.is_scrolling_up
    }

    fn reading(&self) -> VelocityReading {
        VelocityReading {
            velocity: self.current_velocity,
            is_scrolling_up: self.is_scrolling_up,
        }
    }
}
