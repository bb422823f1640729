pub mod ast;
mod error;
mod lexer;
mod parser;

pub use error::{ParseError, SourcePosition};
pub use parser::Parser;

/// Parses a dice formula such as `2d6+3`, `4d6kh3` or `1d20-1`.
///
/// Whitespace between terms and the case of `d`, `kh` and `kl` are
/// insignificant. The first rule the input breaks is reported.
///
/// # Examples
/// ```
/// let formula = dice_roller::parse("4D6 kh3 + 2").unwrap();
/// assert_eq!(formula.to_string(), "4d6kh3+2");
/// assert_eq!(formula.flat_modifier(), 2);
/// ```
pub fn parse(s: &str) -> Result<ast::ParsedFormula, ParseError> {
    Parser::new(s).parse()
}
