use crate::common::*;
use std::fmt;

/// One `[count]d<sides>[kh|kl<amount>]` term of a formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceGroup {
    pub(crate) sign: Sign,
    pub(crate) count: UInt,
    pub(crate) sides: UInt,
    pub(crate) keep: Option<KeepModifier>,
}

impl DiceGroup {
    pub(crate) const fn new(sign: Sign, count: UInt, sides: UInt, keep: Option<KeepModifier>) -> Self {
        Self {
            sign,
            count,
            sides,
            keep,
        }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn count(&self) -> UInt {
        self.count
    }

    pub fn sides(&self) -> UInt {
        self.sides
    }

    pub fn keep(&self) -> Option<KeepModifier> {
        self.keep
    }

    /// A lone, unmodified d20: the group advantage and disadvantage act on,
    /// and the only group criticals and fumbles are read from.
    pub fn is_advantage_eligible(&self) -> bool {
        self.sides == D20 && self.count == 1 && self.keep.is_none()
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if let Some(keep) = self.keep {
            write!(f, "{}", keep)?;
        }
        Ok(())
    }
}

/// A validated dice formula.
///
/// Equality ignores [`raw`](Self::raw): two spellings of the same notation
/// (`d20` and `1D20`) compare equal.
#[derive(Debug, Clone)]
pub struct ParsedFormula {
    pub(crate) groups: NonEmpty<DiceGroup>,
    pub(crate) flat_modifier: Int,
    pub(crate) raw: String,
}

impl ParsedFormula {
    pub(crate) fn new(groups: NonEmpty<DiceGroup>, flat_modifier: Int, raw: impl Into<String>) -> Self {
        Self {
            groups,
            flat_modifier,
            raw: raw.into(),
        }
    }

    /// Dice groups in the order they were written.
    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    pub fn flat_modifier(&self) -> Int {
        self.flat_modifier
    }

    /// The formula text as it was typed, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Index of the first advantage-eligible group, if any.
    pub fn advantage_group(&self) -> Option<usize> {
        self.groups.iter().position(DiceGroup::is_advantage_eligible)
    }

    /// Every group rolling twice its dice, keep amounts included, as damage
    /// does on a critical hit. The constant is not doubled.
    ///
    /// The result is rolled directly and may exceed the parser's dice limits.
    pub(crate) fn with_doubled_dice(&self) -> Self {
        let groups = self.groups.mapped_ref(|group| DiceGroup {
            count: group.count.saturating_mul(2),
            keep: group.keep.map(|keep| KeepModifier {
                amount: keep.amount.saturating_mul(2),
                ..keep
            }),
            ..*group
        });
        let mut ret = Self::new(groups, self.flat_modifier, String::new());
        ret.raw = ret.to_string();
        ret
    }
}

impl PartialEq for ParsedFormula {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups && self.flat_modifier == other.flat_modifier
    }
}

impl Eq for ParsedFormula {}

impl fmt::Display for ParsedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A formula cannot open with a sign, so a leading subtracted group
        // is written after the constant instead (`5-1d20`).
        let lead_constant = self.groups.first().sign == Sign::Minus;
        if lead_constant {
            write!(f, "{}", self.flat_modifier)?;
        }
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 || lead_constant {
                write!(f, "{}", group.sign)?;
            }
            write!(f, "{}", group)?;
        }
        if !lead_constant && self.flat_modifier != 0 {
            f.write_str(&format_modifier(self.flat_modifier))?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ParsedFormula {
    type Err = super::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
