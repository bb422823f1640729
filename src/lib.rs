//! Dice notation parsing and roll execution for tabletop games.
//!
//! A formula such as `2d6+3` or `4d6kh3` is [parsed](parse) once into a
//! [`ParsedFormula`] and can then be [executed](execute) any number of times
//! against an injected [`Roller`], optionally with advantage or disadvantage
//! and an external modifier.
//!
//! ```
//! use dice_roller::{AdvantageMode, RollRequest};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let request = RollRequest::parse("1d20+5")
//!     .unwrap()
//!     .with_advantage(AdvantageMode::Advantage);
//! let result = request.roll(&mut rng);
//! assert_eq!(result.rolls().len(), 2);
//! assert_eq!(result.total(), result.subtotal() + 5);
//! ```

mod common;
pub mod parse;
mod presets;
pub mod roll;

pub use common::{
    format_modifier, AdvantageMode, Int, KeepMode, KeepModifier, Sign, UInt, COUNT_RANGE,
    SIDES_RANGE,
};
pub use parse::ast::{DiceGroup, ParsedFormula};
pub use parse::{parse, ParseError, SourcePosition};
pub use presets::{
    ability_score, ability_scores, attack, death_save, hit_die, initiative, AttackRoll, DeathSave,
    HitDieRoll, Preset, ABILITY_SCORE_COUNT, ABILITY_SCORE_FORMULA, DEATH_SAVE_DC,
};
pub use roll::{
    execute, DieRoll, MarkdownStringifier, RollContext, RollRequest, RollResult, Roller,
    SimpleStringifier, Stringify,
};

pub(crate) type DefaultRng = roll::DefaultRoller;

/// Parses and rolls `formula` with the thread-local generator.
pub fn roll(
    formula: &str,
    advantage: AdvantageMode,
    external_modifier: Int,
) -> Result<RollResult, ParseError> {
    let formula = parse(formula)?;
    let mut rng: DefaultRng = rand::thread_rng();
    Ok(execute(&formula, advantage, external_modifier, &mut rng))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seeded;
    use proptest::prelude::*;

    #[test]
    fn test_roll_convenience() {
        let result = roll("3d6+1", AdvantageMode::Normal, 2).unwrap();
        assert_eq!(result.rolls().len(), 3);
        assert!((6..=21).contains(&result.total()));
        assert_eq!(roll("1d20+", AdvantageMode::Normal, 0).unwrap_err().position().map(|p| p.start()), Some(5));
    }

    #[test]
    fn test_canonical_form_reparses() {
        for s in ["d20", "4D6KH3 + 2", "5 - d20", "1d8+1d6-1d4-3", "2d20kl1"] {
            let formula = parse(s).unwrap();
            assert_eq!(parse(&formula.to_string()).unwrap(), formula, "{:?}", s);
        }
    }

    fn formula_strategy() -> impl Strategy<Value = String> {
        let group = (1u32..=12, prop::sample::select(vec![2u32, 4, 6, 8, 10, 12, 20, 100]), 0u8..3)
            .prop_flat_map(|(count, sides, keep)| {
                (Just(count), Just(sides), Just(keep), 1..=count)
            })
            .prop_map(|(count, sides, keep, amount)| match keep {
                0 => format!("{}d{}", count, sides),
                1 => format!("{}d{}kh{}", count, sides, amount),
                _ => format!("{}d{}kl{}", count, sides, amount),
            });
        (
            prop::collection::vec((prop::bool::ANY, group), 1..4),
            prop::option::of(-20i64..=20),
        )
            .prop_map(|(groups, modifier)| {
                let mut ret = String::new();
                for (i, (minus, group)) in groups.into_iter().enumerate() {
                    if i > 0 {
                        ret.push(if minus { '-' } else { '+' });
                    }
                    ret.push_str(&group);
                }
                if let Some(m) = modifier {
                    ret.push_str(&format_modifier(m));
                }
                ret
            })
    }

    fn advantage_strategy() -> impl Strategy<Value = AdvantageMode> {
        prop_oneof![
            Just(AdvantageMode::Normal),
            Just(AdvantageMode::Advantage),
            Just(AdvantageMode::Disadvantage),
        ]
    }

    proptest! {
        #[test]
        fn test_generated_formulas_parse(s in formula_strategy()) {
            let formula = parse(&s).unwrap();
            prop_assert_eq!(parse(&formula.to_string()).unwrap(), formula);
        }

        #[test]
        fn test_roll_invariants(
            s in formula_strategy(),
            advantage in advantage_strategy(),
            modifier in prop_oneof![-10i64..=10, any::<Int>()],
            seed in any::<u64>(),
        ) {
            let formula = parse(&s).unwrap();
            let result = execute(&formula, advantage, modifier, &mut seeded(seed));

            for die in result.rolls() {
                prop_assert!((1..=die.sides).contains(&die.value));
            }

            let mut subtotal = 0;
            for (i, (group, dice)) in formula.groups().iter().zip(result.group_rolls()).enumerate() {
                let extra = !advantage.is_normal() && formula.advantage_group() == Some(i);
                prop_assert_eq!(dice.len() as u32, group.count() + u32::from(extra));

                let expected_kept = group.keep().map_or(group.count(), |keep| keep.amount);
                let kept: Vec<_> = dice.iter().filter(|die| die.kept()).collect();
                prop_assert_eq!(kept.len() as u32, expected_kept);

                let sum: Int = kept.iter().map(|die| Int::from(die.value)).sum();
                subtotal += group.sign().apply(sum);
            }

            prop_assert_eq!(result.subtotal(), subtotal);
            prop_assert_eq!(result.applied_modifier(), formula.flat_modifier().saturating_add(modifier));
            prop_assert_eq!(result.total(), result.subtotal().saturating_add(result.applied_modifier()));
            if formula.advantage_group().is_none() {
                prop_assert!(!result.is_critical() && !result.is_fumble());
            }
        }
    }
}
