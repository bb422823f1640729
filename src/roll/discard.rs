use super::result::DieRoll;
use crate::common::*;
use log::trace;
use std::cmp::Reverse;

#[enum_dispatch::enum_dispatch]
pub(crate) trait Discard {
    /// Marks the dice of one group that do not count towards the subtotal.
    fn discard(&self, dice: &mut [DieRoll]);
}

/// How a single group's dice are filtered. A group either carries a keep
/// modifier, is the advantage group, or keeps everything.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[enum_dispatch::enum_dispatch(Discard)]
pub(crate) enum DiscardRule {
    Keep(KeepModifier),
    Pick(AdvantagePick),
    All(KeepAll),
}

impl Discard for KeepModifier {
    fn discard(&self, dice: &mut [DieRoll]) {
        let mut order: Vec<usize> = (0..dice.len()).collect();
        // Equal faces keep roll order, so the earlier die wins a tie.
        match self.mode {
            KeepMode::Highest => order.sort_by_key(|&i| (Reverse(dice[i].value), i)),
            KeepMode::Lowest => order.sort_by_key(|&i| (dice[i].value, i)),
        }
        for &i in order.iter().skip(self.amount as usize) {
            trace!("{} drops die #{} ({})", self, i, dice[i].value);
            dice[i].discarded = true;
        }
    }
}

/// Chooses between the two d20s of an advantage or disadvantage roll.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct AdvantagePick(pub AdvantageMode);

impl Discard for AdvantagePick {
    fn discard(&self, dice: &mut [DieRoll]) {
        let [first, second] = dice else {
            return;
        };
        let second_wins = match self.0 {
            AdvantageMode::Advantage => second.value > first.value,
            AdvantageMode::Disadvantage => second.value < first.value,
            AdvantageMode::Normal => return,
        };
        // On a tie the second die is the one set aside.
        let dropped = if second_wins { first } else { second };
        trace!("{} drops {}", self.0, dropped.value);
        dropped.discarded = true;
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct KeepAll;

impl Discard for KeepAll {
    fn discard(&self, _: &mut [DieRoll]) {}
}
