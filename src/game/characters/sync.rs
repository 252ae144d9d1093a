// Per-tick animation requests from the stage's timing source

use super::anim_id::AnimId;
use crate::core::fixed::fixed_floor;
use crate::game::stage::{ChartCursor, Direction, StageTiming, TimingSource};
use log::trace;

/// The two poses a dancer alternates or reacts between
fn pose_for(direction: Direction) -> AnimId {
    match direction {
        Direction::Left => AnimId::Left,
        Direction::Right => AnimId::Right,
    }
}

/// Active timing regime and its state
#[derive(Debug, Clone, Copy)]
pub enum SyncMode<'a> {
    /// Toggle Left/Right every `cadence` steps
    Step { cadence: u32 },
    /// Follow a stage-owned event chart
    Chart(ChartCursor<'a>),
}

/// Decides which animation a character should request each tick
#[derive(Debug, Clone, Copy)]
pub struct SyncDispatcher<'a> {
    mode: SyncMode<'a>,
}

impl<'a> SyncDispatcher<'a> {
    /// Fix the timing regime for the lifetime of the dispatcher
    pub fn new(source: TimingSource<'a>) -> Self {
        let mode = match source {
            TimingSource::StepCounter { cadence } => SyncMode::Step {
                cadence: cadence.max(1),
            },
            TimingSource::Chart(chart) => SyncMode::Chart(chart.cursor()),
        };
        Self { mode }
    }

    /// Run this tick's decision
    ///
    /// `current` is the animation active before the tick; every requested
    /// animation is passed to `request` in order. Returns the number of
    /// requests made.
    pub fn dispatch<F>(&mut self, timing: &StageTiming, current: AnimId, mut request: F) -> usize
    where
        F: FnMut(AnimId),
    {
        match &mut self.mode {
            SyncMode::Chart(cursor) => {
                if timing.note_scroll < 0 {
                    return 0;
                }

                let substep = fixed_floor(timing.note_scroll);
                let mut requests = 0;
                while let Some(entry) = cursor.next_due(substep) {
                    trace!(
                        "Chart entry {} ({:?} @ {}) at substep {}",
                        cursor.position() - 1,
                        entry.direction,
                        entry.substep,
                        substep
                    );
                    request(pose_for(entry.direction));
                    requests += 1;
                }
                requests
            }
            SyncMode::Step { cadence } => {
                if !timing.just_step || timing.song_step.rem_euclid(*cadence as i32) != 0 {
                    return 0;
                }

                let next = if current == AnimId::Left {
                    AnimId::Right
                } else {
                    AnimId::Left
                };
                request(next);
                1
            }
        }
    }

    pub fn mode(&self) -> &SyncMode<'a> {
        &self.mode
    }

    /// Whether this dispatcher follows an event chart
    pub fn is_chart_driven(&self) -> bool {
        matches!(self.mode, SyncMode::Chart(_))
    }
}
