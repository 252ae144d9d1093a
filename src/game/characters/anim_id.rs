// Character animation identifiers

/// Number of animation slots every character provides
pub const ANIM_COUNT: usize = 9;

/// Logical animation a character can be asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AnimId {
    /// Neutral pose / dance
    #[default]
    Idle = 0,
    Left,
    LeftAlt,
    Down,
    DownAlt,
    Up,
    UpAlt,
    Right,
    RightAlt,
}

impl AnimId {
    /// Every id, in table order
    pub const ALL: [AnimId; ANIM_COUNT] = [
        AnimId::Idle,
        AnimId::Left,
        AnimId::LeftAlt,
        AnimId::Down,
        AnimId::DownAlt,
        AnimId::Up,
        AnimId::UpAlt,
        AnimId::Right,
        AnimId::RightAlt,
    ];

    /// Position of this id in an animation table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up an id by table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Check if this is an alternate variant
    pub fn is_alt(&self) -> bool {
        matches!(
            self,
            Self::LeftAlt | Self::DownAlt | Self::UpAlt | Self::RightAlt
        )
    }

    /// The non-alternate variant of this id
    pub fn base(&self) -> Self {
        match self {
            Self::LeftAlt => Self::Left,
            Self::DownAlt => Self::Down,
            Self::UpAlt => Self::Up,
            Self::RightAlt => Self::Right,
            other => *other,
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Left => "left",
            Self::LeftAlt => "left_alt",
            Self::Down => "down",
            Self::DownAlt => "down_alt",
            Self::Up => "up",
            Self::UpAlt => "up_alt",
            Self::Right => "right",
            Self::RightAlt => "right_alt",
        }
    }
}
