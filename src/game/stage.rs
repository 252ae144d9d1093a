// Stage context consumed by characters: timing inputs and event charts

use log::warn;

pub use crate::engine::conductor::StageTiming;

/// Direction bit of a chart entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// One chart event: at `substep`, react toward `direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartEntry {
    pub substep: u16,
    pub direction: Direction,
}

impl ChartEntry {
    /// High bit of a packed entry selects `Right`
    pub const DIRECTION_BIT: u16 = 0x8000;
    /// Low 15 bits of a packed entry hold the trigger substep
    pub const SUBSTEP_MASK: u16 = 0x7FFF;

    pub const fn new(substep: u16, direction: Direction) -> Self {
        Self { substep, direction }
    }

    /// Decode a packed 16-bit entry
    pub fn from_packed(word: u16) -> Self {
        let direction = if word & Self::DIRECTION_BIT != 0 {
            Direction::Right
        } else {
            Direction::Left
        };
        Self {
            substep: word & Self::SUBSTEP_MASK,
            direction,
        }
    }

    /// Encode as a packed 16-bit entry
    pub fn packed(&self) -> u16 {
        let bit = match self.direction {
            Direction::Left => 0,
            Direction::Right => Self::DIRECTION_BIT,
        };
        (self.substep & Self::SUBSTEP_MASK) | bit
    }
}

/// Ordered list of chart events, owned by the stage
///
/// Entries are expected in nondecreasing substep order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChart {
    entries: Vec<ChartEntry>,
}

impl EventChart {
    /// Word that ends a packed chart
    pub const TERMINATOR: u16 = 0xFFFF;

    pub fn new(entries: Vec<ChartEntry>) -> Self {
        Self { entries }
    }

    /// Decode packed words, stopping at the terminator if present
    pub fn from_packed(words: &[u16]) -> Self {
        let entries = words
            .iter()
            .take_while(|&&word| word != Self::TERMINATOR)
            .map(|&word| ChartEntry::from_packed(word))
            .collect();
        Self { entries }
    }

    /// Decode a packed chart stored as little-endian bytes
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        let chunks = bytes.chunks_exact(2);
        if !chunks.remainder().is_empty() {
            warn!("Event chart has a trailing odd byte; ignoring it");
        }
        let words: Vec<u16> = chunks
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::from_packed(&words)
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start a cursor at the first entry
    pub fn cursor(&self) -> ChartCursor<'_> {
        ChartCursor {
            chart: self,
            position: 0,
        }
    }
}

/// A character's read position in a stage-owned chart
#[derive(Debug, Clone, Copy)]
pub struct ChartCursor<'a> {
    chart: &'a EventChart,
    position: usize,
}

impl<'a> ChartCursor<'a> {
    /// Take the next entry if it triggers at or before `substep`
    pub fn next_due(&mut self, substep: i32) -> Option<ChartEntry> {
        let entry = *self.chart.entries.get(self.position)?;
        if i32::from(entry.substep) > substep {
            return None;
        }
        self.position += 1;
        Some(entry)
    }

    /// Index of the next unprocessed entry
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every entry has been processed
    pub fn is_finished(&self) -> bool {
        self.position >= self.chart.len()
    }

    pub fn chart(&self) -> &'a EventChart {
        self.chart
    }
}

/// Which timing source drives a character; fixed for the character's lifetime
#[derive(Debug, Clone, Copy)]
pub enum TimingSource<'a> {
    /// Dance on every `cadence`-th step boundary
    StepCounter { cadence: u32 },
    /// React to a stage-owned event chart
    Chart(&'a EventChart),
}

/// Per-stage settings and shared data a character is constructed against
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// Steps between dance toggles in step-counter mode
    pub dance_cadence: u32,
    /// Event chart, for stages that provide one
    pub chart: Option<&'a EventChart>,
}

impl<'a> StageContext<'a> {
    /// Stage without a chart, dancing every `dance_cadence` steps
    pub fn new(dance_cadence: u32) -> Self {
        Self {
            dance_cadence,
            chart: None,
        }
    }

    /// Attach an event chart to the stage
    pub fn with_chart(mut self, chart: &'a EventChart) -> Self {
        self.chart = Some(chart);
        self
    }

    /// The timing source characters on this stage should use
    pub fn timing_source(&self) -> TimingSource<'a> {
        match self.chart {
            Some(chart) => TimingSource::Chart(chart),
            None => TimingSource::StepCounter {
                cadence: self.dance_cadence,
            },
        }
    }
}
