use std::fmt::{self, Write};
use std::ops::RangeInclusive;
pub use vec1::vec1;

/// Signed integer used for modifiers and totals.
pub type Int = i64;
/// Unsigned integer used for dice counts, sides, and face values.
pub type UInt = u32;

pub type NonEmpty<T> = vec1::Vec1<T>;

pub const COUNT_RANGE: RangeInclusive<UInt> = 1..=100;
pub const SIDES_RANGE: RangeInclusive<UInt> = 2..=1000;

/// The die size that advantage and disadvantage apply to.
pub const D20: UInt = 20;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub const fn apply(self, x: Int) -> Int {
        match self {
            Self::Plus => x,
            Self::Minus => -x,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Plus => '+',
            Self::Minus => '-',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeepMode {
    Highest,
    Lowest,
}

/// A `kh`/`kl` pool modifier. `amount` is validated against the group's
/// count by the parser.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeepModifier {
    pub mode: KeepMode,
    pub amount: UInt,
}

impl KeepModifier {
    pub const fn highest(amount: UInt) -> Self {
        Self {
            mode: KeepMode::Highest,
            amount,
        }
    }

    pub const fn lowest(amount: UInt) -> Self {
        Self {
            mode: KeepMode::Lowest,
            amount,
        }
    }
}

impl fmt::Display for KeepModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.mode {
            KeepMode::Highest => "kh",
            KeepMode::Lowest => "kl",
        };
        write!(f, "{}{}", op, self.amount)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum AdvantageMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl AdvantageMode {
    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
        }
    }
}

impl fmt::Display for AdvantageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a modifier with an explicit sign: `+3`, `-1`, `+0`.
pub fn format_modifier(modifier: Int) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}
