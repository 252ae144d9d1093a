// Character animation system
//
// Each animation is a small script of `Op`s. An `Animatable` walks the active
// script one tick at a time and reports whenever the selected frame changes.

use super::anim_id::{AnimId, ANIM_COUNT};
use log::{debug, warn};

/// Upper bound on control instructions (jumps, switches) run in one tick
const MAX_CONTROL_OPS_PER_TICK: usize = 4 * ANIM_COUNT;

/// One animation script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Show this frame index and end the tick
    Frame(u8),
    /// Jump to the first instruction; takes effect on the next tick
    Repeat,
    /// Jump back this many instructions and keep going
    Back(u8),
    /// Switch to another animation and keep going
    ChangeAnim(AnimId),
}

/// Script for one animation
#[derive(Debug, Clone, Copy)]
pub struct AnimationProgram {
    /// Instruction the script starts from when made active
    pub start: usize,
    /// Ticks each `Frame` is held (0 behaves like 1)
    pub frame_ticks: u8,
    /// The instructions
    pub script: &'static [Op],
}

impl AnimationProgram {
    /// Create a program starting at its first instruction
    pub const fn new(frame_ticks: u8, script: &'static [Op]) -> Self {
        Self {
            start: 0,
            frame_ticks,
            script,
        }
    }

    /// Begin execution at instruction `start` instead of the first one
    pub const fn starting_at(mut self, start: usize) -> Self {
        self.start = start;
        self
    }
}

/// One program per [`AnimId`], indexed by `AnimId::index`
pub type AnimationTable = [AnimationProgram; ANIM_COUNT];

/// Per-character interpreter state
#[derive(Debug)]
pub struct Animatable {
    table: &'static AnimationTable,
    anim: AnimId,
    cursor: usize,
    /// Ticks the current frame is still held for
    hold: u8,
    frame: Option<u8>,
}

impl Animatable {
    /// Create an interpreter with `initial` active and no frame selected yet
    pub fn new(table: &'static AnimationTable, initial: AnimId) -> Self {
        Self {
            table,
            anim: initial,
            cursor: table[initial.index()].start,
            hold: 0,
            frame: None,
        }
    }

    /// Switch to `anim` unless it is already the active animation
    pub fn set_anim(&mut self, anim: AnimId) {
        if anim != self.anim {
            self.start(anim);
        }
    }

    /// Start `anim` from its beginning, even if it is already active
    pub fn restart_anim(&mut self, anim: AnimId) {
        self.start(anim);
    }

    fn start(&mut self, anim: AnimId) {
        debug!("Animation {} -> {}", self.anim.name(), anim.name());
        self.anim = anim;
        self.cursor = self.table[anim.index()].start;
        self.hold = 0;
    }

    /// Advance one tick
    ///
    /// Calls `on_frame` with the new frame index when the selected frame
    /// changes, and returns the frame selected after the tick.
    pub fn step<F>(&mut self, mut on_frame: F) -> Option<u8>
    where
        F: FnMut(u8),
    {
        if self.hold > 0 {
            self.hold -= 1;
            return self.frame;
        }

        for _ in 0..MAX_CONTROL_OPS_PER_TICK {
            let program = &self.table[self.anim.index()];
            let Some(&op) = program.script.get(self.cursor) else {
                // Ran off the end of the script: keep showing the last frame
                return self.frame;
            };

            match op {
                Op::Frame(index) => {
                    self.cursor += 1;
                    self.hold = program.frame_ticks.saturating_sub(1);
                    if self.frame != Some(index) {
                        self.frame = Some(index);
                        on_frame(index);
                    }
                    return self.frame;
                }
                Op::Repeat => {
                    self.cursor = 0;
                    return self.frame;
                }
                Op::Back(n) => {
                    self.cursor = self.cursor.saturating_sub(n as usize);
                }
                Op::ChangeAnim(target) => {
                    self.start(target);
                }
            }
        }

        warn!(
            "Animation {} ran {} control instructions without selecting a frame",
            self.anim.name(),
            MAX_CONTROL_OPS_PER_TICK
        );
        self.frame
    }

    /// Currently active animation
    pub fn anim(&self) -> AnimId {
        self.anim
    }

    /// Currently selected frame index, if any frame has been selected yet
    pub fn frame(&self) -> Option<u8> {
        self.frame
    }

    /// Position in the active script
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ticks the current frame will still be held
    pub fn hold_ticks(&self) -> u8 {
        self.hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_ANIMS: AnimationTable = [
        AnimationProgram::new(0, &[Op::ChangeAnim(AnimId::Left)]), // Idle
        AnimationProgram::new(1, &[Op::Frame(0), Op::Frame(1), Op::Frame(2), Op::Repeat]), // Left
        AnimationProgram::new(0, &[Op::ChangeAnim(AnimId::Idle)]), // LeftAlt (alias of an alias)
        AnimationProgram::new(2, &[Op::Frame(8), Op::Frame(9), Op::Repeat]), // Down
        AnimationProgram::new(0, &[Op::ChangeAnim(AnimId::DownAlt)]), // DownAlt (malformed: loops on itself)
        AnimationProgram::new(1, &[Op::Frame(5), Op::Frame(5), Op::Frame(6), Op::Back(1)]), // Up
        AnimationProgram::new(1, &[Op::Frame(3), Op::Frame(4)]), // UpAlt (no terminator)
        AnimationProgram::new(1, &[Op::Frame(4), Op::Frame(5), Op::Frame(6), Op::Frame(7)])
            .starting_at(2), // Right
        AnimationProgram::new(0, &[Op::Frame(1), Op::Frame(2)]), // RightAlt
    ];

    /// Run `ticks` ticks, collecting the frame after each and every callback
    fn run(anim: &mut Animatable, ticks: usize) -> (Vec<Option<u8>>, Vec<u8>) {
        let mut frames = Vec::new();
        let mut changes = Vec::new();
        for _ in 0..ticks {
            frames.push(anim.step(|f| changes.push(f)));
        }
        (frames, changes)
    }

    #[test]
    fn test_frames_advance_one_per_tick() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Left);
        let (frames, changes) = run(&mut anim, 3);

        assert_eq!(frames, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(changes, vec![0, 1, 2]);
    }

    #[test]
    fn test_repeat_cycle() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Left);
        let (first_pass, _) = run(&mut anim, 3);

        // The Repeat tick keeps the last frame and rewinds to the first instruction
        assert_eq!(anim.step(|_| {}), Some(2));
        assert_eq!(anim.cursor(), 0);

        let (second_pass, _) = run(&mut anim, 3);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_frame_ticks_hold_frames() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Down);
        let (frames, changes) = run(&mut anim, 6);

        assert_eq!(
            frames,
            vec![Some(8), Some(8), Some(9), Some(9), Some(9), Some(8)]
        );
        assert_eq!(changes, vec![8, 9, 8]);
    }

    #[test]
    fn test_zero_frame_ticks_behaves_like_one() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::RightAlt);
        let (frames, _) = run(&mut anim, 2);
        assert_eq!(frames, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_callback_only_on_change() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Up);
        let (frames, changes) = run(&mut anim, 6);

        // Back(1) loops on the last frame forever
        assert_eq!(
            frames,
            vec![Some(5), Some(5), Some(6), Some(6), Some(6), Some(6)]
        );
        assert_eq!(changes, vec![5, 6]);
    }

    #[test]
    fn test_duplicate_set_anim_is_noop() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Left);
        run(&mut anim, 2);
        let cursor = anim.cursor();

        anim.set_anim(AnimId::Left);
        assert_eq!(anim.cursor(), cursor);
        assert_eq!(anim.step(|_| {}), Some(2));
    }

    #[test]
    fn test_set_anim_resets_cursor_and_hold() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Down);
        anim.step(|_| {});
        assert_eq!(anim.hold_ticks(), 1);

        anim.set_anim(AnimId::Left);
        assert_eq!(anim.anim(), AnimId::Left);
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.hold_ticks(), 0);
        assert_eq!(anim.step(|_| {}), Some(0));
    }

    #[test]
    fn test_restart_anim_rewinds_active() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Left);
        run(&mut anim, 2);

        anim.restart_anim(AnimId::Left);
        assert_eq!(anim.cursor(), 0);
        assert_eq!(anim.step(|_| {}), Some(0));
    }

    #[test]
    fn test_alias_resolves_on_first_tick() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Right);
        run(&mut anim, 1);

        anim.set_anim(AnimId::Idle);
        let mut changes = Vec::new();
        let frame = anim.step(|f| changes.push(f));

        assert_eq!(frame, Some(0));
        assert_eq!(changes, vec![0]);
        assert_eq!(anim.anim(), AnimId::Left);
    }

    #[test]
    fn test_alias_chain() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::LeftAlt);
        assert_eq!(anim.step(|_| {}), Some(0));
        assert_eq!(anim.anim(), AnimId::Left);
    }

    #[test]
    fn test_program_start_offset() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::Right);
        let (frames, _) = run(&mut anim, 3);
        // Starts at instruction 2, then runs off the end and holds
        assert_eq!(frames, vec![Some(6), Some(7), Some(7)]);
    }

    #[test]
    fn test_self_redirect_does_not_hang() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::DownAlt);
        assert_eq!(anim.step(|_| {}), None);
        assert_eq!(anim.anim(), AnimId::DownAlt);
    }

    #[test]
    fn test_missing_terminator_holds_last_frame() {
        let mut anim = Animatable::new(&TEST_ANIMS, AnimId::UpAlt);
        let (frames, changes) = run(&mut anim, 4);
        assert_eq!(frames, vec![Some(3), Some(4), Some(4), Some(4)]);
        assert_eq!(changes, vec![3, 4]);
    }
}
