//! Game clock with fixed-timestep accumulator, and a frame-rate counter

/// Tracks game time and provides a fixed-timestep accumulator for race updates
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
}

/// Longest frame the clock will account for, in seconds.
const MAX_FRAME_TIME: f64 = 0.25;

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
        }
    }
}

impl GameClock {
    /// Create a new game clock with default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame of `seconds`. Call once per frame.
    pub fn advance(&mut self, seconds: f64) {
        // Clamp to avoid spiral of death
        self.delta_time = seconds.clamp(0.0, MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }

    /// Fixed timestep in milliseconds, the unit race speeds are tuned in
    pub fn fixed_timestep_ms(&self) -> f32 {
        (self.fixed_timestep * 1000.0) as f32
    }
}

/// Counts frames and publishes a frames-per-second figure once a second.
#[derive(Debug, Default)]
pub struct FrameRateCounter {
    elapsed_ms: f64,
    frame_count: u32,
    frames_per_second: u32,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame that took `dt_ms` milliseconds.
    pub fn record(&mut self, dt_ms: f64) {
        self.elapsed_ms += dt_ms;
        self.frame_count += 1;

        if self.elapsed_ms > 1000.0 {
            self.elapsed_ms = 0.0;
            self.frames_per_second = self.frame_count;
            self.frame_count = 0;
        }
    }

    /// Last published rate; 0 until a full second has been recorded.
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }
}
