//! Frame timing.
//!
//! The [`FrameTimer`] is owned by the main loop and handed to whatever needs
//! the frame delta, instead of living in process-wide state.

use std::time::{Duration, Instant};

/// Measures the time between frames and since start-up.
#[derive(Clone, Debug)]
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    delta: Duration,
    paused: bool,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a timer whose clock starts at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
            delta: Duration::ZERO,
            paused: false,
        }
    }

    /// Marks the start of a new frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Marks the start of a new frame at `now`. Does nothing while paused.
    pub fn tick_at(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
    }

    /// Seconds between the last two frames, or zero while paused.
    pub fn delta_time(&self) -> f32 {
        if self.paused {
            0.0
        } else {
            self.delta.as_secs_f32()
        }
    }

    /// Time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time between the start of the timer and the last frame.
    pub fn frame_time(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.start)
    }

    /// Frames per second derived from the last delta.
    pub fn fps(&self) -> f32 {
        let delta = self.delta.as_secs_f32();
        if delta > 0.0 { 1.0 / delta } else { 0.0 }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the timer. The paused interval is not counted as frame time.
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.paused = false;
            self.last_frame = now;
            self.delta = Duration::ZERO;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_time_between_ticks() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);
        assert_eq!(timer.delta_time(), 0.0);
        assert_eq!(timer.fps(), 0.0);

        timer.tick_at(start + Duration::from_millis(250));
        assert_eq!(timer.delta_time(), 0.25);
        assert_eq!(timer.fps(), 4.0);

        timer.tick_at(start + Duration::from_millis(750));
        assert_eq!(timer.delta_time(), 0.5);
        assert_eq!(timer.frame_time(), Duration::from_millis(750));
    }

    #[test]
    fn paused_timer_reports_no_delta() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);
        timer.tick_at(start + Duration::from_millis(100));
        timer.pause();
        assert!(timer.is_paused());
        assert_eq!(timer.delta_time(), 0.0);

        timer.tick_at(start + Duration::from_secs(10));
        timer.resume_at(start + Duration::from_secs(10));
        timer.tick_at(start + Duration::from_millis(10_500));
        assert_eq!(timer.delta_time(), 0.5);
    }
}
