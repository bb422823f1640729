mod ctx;
mod discard;
mod request;
mod result;
mod roller;
mod stringify;

use crate::common::{AdvantageMode, Int};
use crate::parse::ast::ParsedFormula;

pub use ctx::{DefaultRoller, RollContext};
pub use request::RollRequest;
pub use result::{DieRoll, RollResult};
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};

#[cfg(test)]
pub(crate) use roller::ScriptedRoller;

/// Rolls every group of `formula`, applies keep and advantage discards, and
/// totals the result with the formula's constant plus `external_modifier`.
///
/// Never fails: all validation happens while parsing.
pub fn execute<R: Roller + ?Sized>(
    formula: &ParsedFormula,
    advantage: AdvantageMode,
    external_modifier: Int,
    roller: &mut R,
) -> RollResult {
    RollContext::new(roller).execute(formula, advantage, external_modifier)
}
