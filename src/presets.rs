//! Formulas callers build without typing: the die buttons of a dice tray,
//! the classic `4d6kh3` ability score roll, and the d20 rolls of play
//! (attacks, death saves, initiative) plus hit dice.

use crate::common::*;
use crate::parse::ast::{DiceGroup, ParsedFormula};
use crate::roll::{execute, RollResult, Roller};
use log::debug;
use std::fmt;

/// Roll four d6 and keep the highest three.
pub const ABILITY_SCORE_FORMULA: &str = "4d6kh3";

/// Number of scores in a full ability score set.
pub const ABILITY_SCORE_COUNT: usize = 6;

/// Lowest natural roll that succeeds a death saving throw.
pub const DEATH_SAVE_DC: UInt = 10;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Preset {
    D3,
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Preset {
    pub const ALL: [Self; 8] = [
        Self::D3,
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D20,
        Self::D100,
    ];

    pub const fn sides(self) -> UInt {
        match self {
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Formula text for `count` dice of this size, e.g. `4d6`.
    ///
    /// `count` is clamped to the legal range of 1 to 100 dice.
    pub fn formula(self, count: UInt) -> String {
        format!("{}d{}", Self::clamp(count), self.sides())
    }

    /// The same formula as [`formula`](Self::formula), already parsed.
    pub fn group(self, count: UInt) -> ParsedFormula {
        let group = DiceGroup::new(Sign::Plus, Self::clamp(count), self.sides(), None);
        ParsedFormula::new(vec1![group], 0, self.formula(count))
    }

    fn clamp(count: UInt) -> UInt {
        count.clamp(*COUNT_RANGE.start(), *COUNT_RANGE.end())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

fn ability_formula() -> ParsedFormula {
    let group = DiceGroup::new(Sign::Plus, 4, 6, Some(KeepModifier::highest(3)));
    ParsedFormula::new(vec1![group], 0, ABILITY_SCORE_FORMULA)
}

/// Rolls one ability score: four d6, lowest discarded.
pub fn ability_score<R: Roller + ?Sized>(roller: &mut R) -> RollResult {
    execute(&ability_formula(), AdvantageMode::Normal, 0, roller)
}

/// Rolls a full set of six ability scores.
pub fn ability_scores<R: Roller + ?Sized>(roller: &mut R) -> Vec<RollResult> {
    let formula = ability_formula();
    (0..ABILITY_SCORE_COUNT)
        .map(|_| execute(&formula, AdvantageMode::Normal, 0, roller))
        .collect()
}

/// An attack roll and, when damage was asked for, its damage roll.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttackRoll {
    pub attack: RollResult,
    pub damage: Option<RollResult>,
}

impl AttackRoll {
    pub fn is_critical(&self) -> bool {
        self.attack.is_critical()
    }

    pub fn is_fumble(&self) -> bool {
        self.attack.is_fumble()
    }

    /// Damage dealt, never below zero.
    pub fn damage_total(&self) -> Option<Int> {
        self.damage.as_ref().map(|damage| damage.total().max(0))
    }
}

/// Rolls a d20 attack with `attack_modifier`, then `damage` (if any) plus
/// `damage_modifier`. A natural 20 doubles every damage die.
pub fn attack<R: Roller + ?Sized>(
    attack_modifier: Int,
    damage: Option<&ParsedFormula>,
    damage_modifier: Int,
    advantage: AdvantageMode,
    roller: &mut R,
) -> AttackRoll {
    let attack = execute(&Preset::D20.group(1), advantage, attack_modifier, roller);
    let damage = damage.map(|formula| {
        if attack.is_critical() {
            let doubled = formula.with_doubled_dice();
            debug!("critical hit: rolling {} instead of {}", doubled, formula);
            execute(&doubled, AdvantageMode::Normal, damage_modifier, roller)
        } else {
            execute(formula, AdvantageMode::Normal, damage_modifier, roller)
        }
    });
    AttackRoll { attack, damage }
}

/// A death saving throw: a bare d20 against [`DEATH_SAVE_DC`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeathSave {
    pub result: RollResult,
}

impl DeathSave {
    pub fn natural(&self) -> UInt {
        self.result.kept().next().map_or(0, |die| die.value)
    }

    pub fn is_success(&self) -> bool {
        self.natural() >= DEATH_SAVE_DC
    }

    /// Failures marked by this save: a natural 1 counts twice.
    pub fn failures(&self) -> UInt {
        match self.natural() {
            1 => 2,
            n if n < DEATH_SAVE_DC => 1,
            _ => 0,
        }
    }

    /// A natural 20 brings the creature back with 1 hit point.
    pub fn regains_hit_point(&self) -> bool {
        self.result.is_critical()
    }
}

pub fn death_save<R: Roller + ?Sized>(roller: &mut R) -> DeathSave {
    let result = execute(&Preset::D20.group(1), AdvantageMode::Normal, 0, roller);
    DeathSave { result }
}

/// A hit die spent to recover hit points.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HitDieRoll {
    pub result: RollResult,
}

impl HitDieRoll {
    /// Hit points recovered, never below zero.
    pub fn hit_points(&self) -> Int {
        self.result.total().max(0)
    }
}

/// Rolls one `die` plus the Constitution modifier.
pub fn hit_die<R: Roller + ?Sized>(die: Preset, con_modifier: Int, roller: &mut R) -> HitDieRoll {
    let result = execute(&die.group(1), AdvantageMode::Normal, con_modifier, roller);
    HitDieRoll { result }
}

/// Rolls a d20 plus the Dexterity modifier and any other initiative bonus.
pub fn initiative<R: Roller + ?Sized>(
    dex_modifier: Int,
    bonus: Int,
    advantage: AdvantageMode,
    roller: &mut R,
) -> RollResult {
    execute(&Preset::D20.group(1), advantage, dex_modifier.saturating_add(bonus), roller)
}
