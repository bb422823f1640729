use crate::common::*;
use std::ops::Range;

/// One physical die.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DieRoll {
    pub sides: UInt,
    pub value: UInt,
    pub discarded: bool,
}

impl DieRoll {
    pub const fn new(sides: UInt, value: UInt) -> Self {
        Self {
            sides,
            value,
            discarded: false,
        }
    }

    pub const fn kept(&self) -> bool {
        !self.discarded
    }

    /// The die landed on its highest face.
    pub const fn is_max(&self) -> bool {
        self.value == self.sides
    }

    /// The die landed on 1.
    pub const fn is_min(&self) -> bool {
        self.value == 1
    }
}

/// Outcome of executing a formula once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RollResult {
    pub(crate) rolls: Vec<DieRoll>,
    pub(crate) groups: Vec<Range<usize>>,
    pub(crate) advantage: AdvantageMode,
    pub(crate) advantage_group: Option<usize>,
    pub(crate) subtotal: Int,
    pub(crate) applied_modifier: Int,
    pub(crate) total: Int,
    pub(crate) is_critical: bool,
    pub(crate) is_fumble: bool,
}

impl RollResult {
    /// Every die in roll order, discarded ones included.
    pub fn rolls(&self) -> &[DieRoll] {
        &self.rolls
    }

    /// The dice of each formula group, in formula order.
    pub fn group_rolls(&self) -> impl Iterator<Item = &[DieRoll]> + '_ {
        self.groups.iter().map(move |range| &self.rolls[range.clone()])
    }

    /// The advantage mode a group was rolled with. `Normal` for every group
    /// except the one that received the extra d20.
    pub fn group_advantage(&self, group: usize) -> AdvantageMode {
        if self.advantage_group == Some(group) {
            self.advantage
        } else {
            AdvantageMode::Normal
        }
    }

    pub fn kept(&self) -> impl Iterator<Item = &DieRoll> + '_ {
        self.rolls.iter().filter(|die| die.kept())
    }

    pub fn discarded(&self) -> impl Iterator<Item = &DieRoll> + '_ {
        self.rolls.iter().filter(|die| die.discarded)
    }

    pub fn subtotal(&self) -> Int {
        self.subtotal
    }

    /// The formula's constant plus the external modifier.
    pub fn applied_modifier(&self) -> Int {
        self.applied_modifier
    }

    pub fn total(&self) -> Int {
        self.total
    }

    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    pub fn is_fumble(&self) -> bool {
        self.is_fumble
    }
}
