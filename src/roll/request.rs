use super::{result::RollResult, roller::Roller, RollContext};
use crate::common::*;
use crate::parse::{self, ast::ParsedFormula, ParseError};

/// A formula together with the configuration it is rolled under.
///
/// Rolling the same request again is a reroll: the formula is not parsed a
/// second time, only the dice change.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RollRequest {
    formula: ParsedFormula,
    advantage: AdvantageMode,
    modifier: Int,
}

impl RollRequest {
    pub fn new(formula: ParsedFormula) -> Self {
        Self {
            formula,
            advantage: AdvantageMode::Normal,
            modifier: 0,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse::parse(s).map(Self::new)
    }

    pub fn with_advantage(mut self, advantage: AdvantageMode) -> Self {
        self.advantage = advantage;
        self
    }

    /// Sets the external modifier, added on top of the formula's own constant.
    pub fn with_modifier(mut self, modifier: Int) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn formula(&self) -> &ParsedFormula {
        &self.formula
    }

    pub fn advantage(&self) -> AdvantageMode {
        self.advantage
    }

    pub fn modifier(&self) -> Int {
        self.modifier
    }

    pub fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> RollResult {
        RollContext::new(roller).execute(&self.formula, self.advantage, self.modifier)
    }
}

impl From<ParsedFormula> for RollRequest {
    fn from(formula: ParsedFormula) -> Self {
        Self::new(formula)
    }
}
