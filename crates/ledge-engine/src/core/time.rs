/// Default simulation tick: 60 Hz.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Largest frame delta accepted per call. Anything beyond this (a stalled or
/// backgrounded tab) is dropped instead of being replayed as catch-up ticks.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Fixed timestep accumulator.
/// Turns variable wall-clock frame deltas into a whole number of constant ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Upper bound applied to each incoming frame delta.
    max_frame: f32,
    /// Carry buffer of time not yet consumed by a tick.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32, max_frame: f32) -> Self {
        Self {
            dt,
            max_frame,
            accumulator: 0.0,
        }
    }

    /// Clamp the frame delta, add it to the carry buffer and drain whole ticks.
    /// Returns the number of ticks the caller must run, each with `dt()`.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // A non-finite delta would poison the carry buffer for good.
        let frame = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_frame)
        } else {
            0.0
        };
        self.accumulator += frame;

        let mut steps = 0;
        while self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    /// Leftover fraction of a tick, for interpolating between states (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// The per-frame cap.
    pub fn max_frame(&self) -> f32 {
        self.max_frame
    }

    /// Drop any carried time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FIXED_DT, MAX_FRAME_DT)
    }
}
