//! Time facilities for the animation.
//!
//! Two clocks run side by side:
//!
//! - **animation time** advances by a fixed step per frame and drives the
//!   point pulse, so a given frame always looks the same no matter how fast
//!   the host schedules frames;
//! - **wall-clock time** measures real seconds since start and drives the
//!   camera drift.
//!
//! # Example
//!
//! ```ignore
//! use plexus::time::Time;
//!
//! let mut time = Time::new(1.0 / 60.0);
//!
//! // In your frame callback:
//! let t = time.animation();
//! network.update(t);
//! time.advance();
//!
//! println!("Frame: {}", time.frame());
//! println!("FPS: {:.1}", time.fps());
//! ```

use std::time::{Duration, Instant};

/// Frame clock for the animator.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created.
    start: Instant,
    /// Seconds added to the animation time per frame.
    step: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a clock starting now, advancing `step` seconds per frame.
    pub fn new(step: f32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            step,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Close the current frame: advance animation time by one step and
    /// count the frame.
    ///
    /// Returns `true` when the FPS estimate was refreshed.
    pub fn advance(&mut self) -> bool {
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Fixed-step animation time in seconds.
    ///
    /// Derived from the frame count in `f64`, never accumulated: a running
    /// `f32` sum stops moving after about six days at 60 Hz.
    #[inline]
    pub fn animation(&self) -> f32 {
        (self.frame_count as f64 * self.step as f64) as f32
    }

    /// Seconds of animation time per frame.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Real seconds since the clock was created.
    #[inline]
    pub fn wall_elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
