//! Song conductor
//!
//! Advances song time by one fixed tick per render frame and derives the
//! stage timing values characters sync to: the current step, whether a step
//! boundary was crossed this tick, and the fixed-point note scroll (negative
//! during the count-in).

use crate::core::fixed::{fixed_floor, Fixed, FIXED_UNIT};

/// Steps (sixteenth notes) per beat
pub const STEPS_PER_BEAT: i64 = 4;

/// Conductor settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConductorConfig {
    /// Song tempo in beats per minute
    pub bpm: u32,
    /// Ticks per second (render rate)
    pub tick_rate: u32,
    /// Steps of count-in before the song starts
    pub preroll_steps: i32,
}

/// Default settings: 60 ticks per second, one bar of count-in
pub const DEFAULT_CONDUCTOR: ConductorConfig = ConductorConfig {
    bpm: 100,
    tick_rate: 60,
    preroll_steps: 16,
};

impl Default for ConductorConfig {
    fn default() -> Self {
        DEFAULT_CONDUCTOR
    }
}

/// Timing values a stage exposes to its characters for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTiming {
    /// Current song step; negative during the count-in
    pub song_step: i32,
    /// Whether `song_step` changed on this tick
    pub just_step: bool,
    /// Song position in steps, fixed point
    pub note_scroll: Fixed,
}

impl StageTiming {
    /// Timing for a tick that lands on a step boundary
    pub fn on_step(song_step: i32) -> Self {
        Self {
            song_step,
            just_step: true,
            note_scroll: song_step * FIXED_UNIT,
        }
    }

    /// Timing for a tick at an arbitrary scroll position with no boundary
    pub fn at_scroll(note_scroll: Fixed) -> Self {
        Self {
            song_step: fixed_floor(note_scroll),
            just_step: false,
            note_scroll,
        }
    }
}

/// Fixed-timestep song clock
#[derive(Debug)]
pub struct Conductor {
    config: ConductorConfig,
    tick_count: u64,
    timing: StageTiming,
    paused: bool,
}

impl Conductor {
    /// Create a conductor positioned at the start of the count-in
    pub fn new(config: ConductorConfig) -> Self {
        let note_scroll = -config.preroll_steps * FIXED_UNIT;
        let timing = StageTiming {
            song_step: fixed_floor(note_scroll),
            just_step: false,
            note_scroll,
        };

        Self {
            config,
            tick_count: 0,
            timing,
            paused: false,
        }
    }

    /// Advance one tick and return the new timing
    pub fn tick(&mut self) -> StageTiming {
        if self.paused {
            self.timing.just_step = false;
            return self.timing;
        }

        self.tick_count += 1;

        let note_scroll = self.scroll_at(self.tick_count);
        let song_step = fixed_floor(note_scroll);
        self.timing = StageTiming {
            song_step,
            just_step: song_step != self.timing.song_step,
            note_scroll,
        };
        self.timing
    }

    /// Note scroll after `ticks` ticks, computed from the start so it never drifts
    fn scroll_at(&self, ticks: u64) -> Fixed {
        let per_minute = 60 * self.config.tick_rate.max(1) as i64;
        let elapsed = ticks as i64 * self.config.bpm as i64 * STEPS_PER_BEAT * FIXED_UNIT as i64
            / per_minute;
        let start = -(self.config.preroll_steps as i64) * FIXED_UNIT as i64;
        (start + elapsed) as Fixed
    }

    /// Timing of the most recent tick
    pub fn timing(&self) -> StageTiming {
        self.timing
    }

    /// Ticks advanced so far (pauses excluded)
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ConductorConfig {
        &self.config
    }

    /// Pause the song clock
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Conductor paused at step {}", self.timing.song_step);
        }
    }

    /// Resume the song clock
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Conductor resumed at step {}", self.timing.song_step);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
