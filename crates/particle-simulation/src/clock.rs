//! Frame timing
//!
//! Rules are written per reference frame (1/60 s). The clock converts wall time
//! into a whole number of reference ticks per displayed frame so simulations
//! run at the same pace on 60 Hz and 144 Hz displays.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! // once per redraw:
//! for _ in 0..clock.advance(Instant::now()) {
//!     let time = clock.next_tick();
//!     simulation.step(&time);
//! }
//! ```

use std::time::{Duration, Instant};

/// Length of one reference tick
pub const REFERENCE_TICK: Duration = Duration::from_nanos(16_666_667);

/// Upper bound on ticks run for a single displayed frame
pub const MAX_TICKS_PER_FRAME: u32 = 4;

/// Simulated time handed to [`Simulation::step`](crate::Simulation::step)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Simulated seconds since the clock started
    pub elapsed: f32,
    /// Seconds per tick
    pub delta: f32,
    /// Tick number, starting at 1 for the first tick
    pub tick: u64,
}

impl FrameTime {
    /// Time of tick number `tick` on a fixed reference clock
    pub fn at_tick(tick: u64) -> Self {
        let delta = REFERENCE_TICK.as_secs_f32();
        Self {
            elapsed: tick as f32 * delta,
            delta,
            tick,
        }
    }
}

#[derive(Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    accumulator: Duration,
    tick_duration: Duration,
    max_ticks_per_frame: u32,
    tick: u64,
    frame_count: u64,
    fps: f32,
    fps_frames: u32,
    fps_window: Duration,
    paused: bool,
    step_requested: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: None,
            accumulator: Duration::ZERO,
            tick_duration: REFERENCE_TICK,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
            tick: 0,
            frame_count: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: Duration::ZERO,
            paused: false,
            step_requested: false,
        }
    }

    /// Record a displayed frame at `now` and return how many ticks to run
    ///
    /// The first frame always runs one tick.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let delta = match self.last_frame.replace(now) {
            Some(previous) => now.saturating_duration_since(previous),
            None => self.tick_duration,
        };
        self.advance_by(delta)
    }

    /// Same as [`advance`](Self::advance) with an explicit frame duration
    pub fn advance_by(&mut self, delta: Duration) -> u32 {
        self.frame_count += 1;
        self.update_fps(delta);

        if self.paused {
            self.accumulator = Duration::ZERO;
            return if std::mem::take(&mut self.step_requested) { 1 } else { 0 };
        }

        self.accumulator += delta;
        let mut ticks = 0;
        while self.accumulator >= self.tick_duration && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.tick_duration;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_frame {
            // Too far behind; drop the backlog instead of spiralling
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Consume one tick and return its time
    pub fn next_tick(&mut self) -> FrameTime {
        self.tick += 1;
        let delta = self.tick_duration.as_secs_f32();
        FrameTime {
            elapsed: self.tick as f32 * delta,
            delta,
            tick: self.tick,
        }
    }

    fn update_fps(&mut self, delta: Duration) {
        self.fps_frames += 1;
        self.fps_window += delta;
        if self.fps_window >= Duration::from_millis(500) {
            self.fps = self.fps_frames as f32 / self.fps_window.as_secs_f32();
            self.fps_frames = 0;
            self.fps_window = Duration::ZERO;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.step_requested = false;
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Run exactly one tick on the next frame while paused
    pub fn step_once(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Frames recorded so far
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Displayed frames per second, refreshed twice a second
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
