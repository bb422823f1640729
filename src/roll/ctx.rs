use super::{
    discard::{AdvantagePick, Discard, DiscardRule, KeepAll},
    result::{DieRoll, RollResult},
    roller::Roller,
};
use crate::common::*;
use crate::parse::ast::ParsedFormula;
use log::{debug, trace};

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Executes parsed formulas against a borrowed [`Roller`].
///
/// Holds no state of its own between executions; every call produces a
/// fresh [`RollResult`].
pub struct RollContext<'r, R: ?Sized> {
    roller: &'r mut R,
}

impl<'r, R: Roller + ?Sized> RollContext<'r, R> {
    pub fn new(roller: &'r mut R) -> Self {
        Self { roller }
    }

    fn roll_one(&mut self, sides: UInt) -> DieRoll {
        let value = self.roller.roll(sides);
        debug_assert!(
            (1..=sides).contains(&value),
            "roller produced {} for a d{}",
            value,
            sides
        );
        trace!("d{} -> {}", sides, value);
        DieRoll::new(sides, value)
    }

    pub fn execute(
        &mut self,
        formula: &ParsedFormula,
        advantage: AdvantageMode,
        external_modifier: Int,
    ) -> RollResult {
        let eligible = formula.advantage_group();
        let advantage_group = eligible.filter(|_| !advantage.is_normal());

        let mut rolls = Vec::new();
        let mut groups = Vec::with_capacity(formula.groups().len());
        let mut subtotal: Int = 0;

        for (i, group) in formula.groups().iter().enumerate() {
            let (count, rule): (UInt, DiscardRule) = match group.keep() {
                Some(keep) => (group.count(), keep.into()),
                None if advantage_group == Some(i) => (group.count() + 1, AdvantagePick(advantage).into()),
                None => (group.count(), KeepAll.into()),
            };

            let start = rolls.len();
            for _ in 0..count {
                rolls.push(self.roll_one(group.sides()));
            }
            let dice = &mut rolls[start..];
            rule.discard(dice);

            let kept: Int = dice
                .iter()
                .filter(|die| die.kept())
                .map(|die| Int::from(die.value))
                .sum();
            subtotal += group.sign().apply(kept);
            groups.push(start..rolls.len());
        }

        // Only the designated d20 can crit or fumble.
        let natural = eligible
            .and_then(|i| rolls[groups[i].clone()].iter().find(|die| die.kept()))
            .map(|die| die.value);
        let is_critical = natural == Some(D20);
        let is_fumble = natural == Some(1);

        // Saturates: a flat modifier may be anything up to `Int::MAX`.
        let applied_modifier = formula.flat_modifier().saturating_add(external_modifier);
        let total = subtotal.saturating_add(applied_modifier);
        debug!(
            "rolled {} ({}, {}): {} dice, subtotal {}, total {}",
            formula,
            advantage,
            format_modifier(external_modifier),
            rolls.len(),
            subtotal,
            total
        );

        RollResult {
            rolls,
            groups,
            advantage,
            advantage_group,
            subtotal,
            applied_modifier,
            total,
            is_critical,
            is_fumble,
        }
    }
}
