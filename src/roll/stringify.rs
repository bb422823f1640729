use super::result::{DieRoll, RollResult};
use crate::common::*;
use crate::parse::ast::{DiceGroup, ParsedFormula};
use std::cmp::Ordering;

/// Renders a formula next to one of its results, e.g.
/// `4d6kh3 (1, 2, 3, 4) + 2 = 11`.
pub trait Stringify {
    fn stringify(&mut self, formula: &ParsedFormula, result: &RollResult) -> String {
        let mut ret = String::new();
        for (i, (group, dice)) in formula.groups().iter().zip(result.group_rolls()).enumerate() {
            match (i, group.sign()) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => ret.push('-'),
                (_, sign) => ret.push_str(&format!(" {} ", sign)),
            }
            let group = self.str_group(group, dice, result.group_advantage(i));
            ret.push_str(&group);
        }
        let modifier = self.str_modifier(result.applied_modifier());
        ret.push_str(&modifier);
        let total = self.str_total(result);
        ret.push_str(&total);
        ret
    }

    fn str_group(&mut self, group: &DiceGroup, dice: &[DieRoll], advantage: AdvantageMode) -> String {
        let the_dice = dice
            .iter()
            .map(|die| self.str_die(die))
            .collect::<Vec<_>>()
            .join(", ");
        if advantage.is_normal() {
            format!("{} ({})", group, the_dice)
        } else {
            format!("{} ({}) ({})", group, the_dice, advantage)
        }
    }

    fn str_die(&mut self, die: &DieRoll) -> String {
        die.value.to_string()
    }

    fn str_modifier(&mut self, modifier: Int) -> String {
        match modifier.cmp(&0) {
            Ordering::Greater => format!(" + {}", modifier),
            Ordering::Less => format!(" - {}", modifier.unsigned_abs()),
            Ordering::Equal => String::new(),
        }
    }

    fn str_total(&mut self, result: &RollResult) -> String {
        format!(" = {}", result.total())
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for SimpleStringifier {}

/// Strikes through discarded dice, bolds natural maximums and ones, and
/// flags criticals and fumbles.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_die(&mut self, die: &DieRoll) -> String {
        let mut ret = if die.is_max() || die.is_min() {
            format!("**{}**", die.value)
        } else {
            die.value.to_string()
        };
        if die.discarded {
            ret = format!("~~{}~~", ret);
        }
        ret
    }

    fn str_total(&mut self, result: &RollResult) -> String {
        let mut ret = format!(" = `{}`", result.total());
        if result.is_critical() {
            ret.push_str(" **Critical!**");
        } else if result.is_fumble() {
            ret.push_str(" **Fumble!**");
        }
        ret
    }
}
