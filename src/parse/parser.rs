use super::{ast::*, error::*, lexer::*};
use crate::common::*;
use log::{debug, trace};
use logos_iter::LogosIter;

type PResult<T = ()> = Result<T, ParseError>;

/// Single left-to-right pass over `term (sign term)*`.
pub struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    groups: Vec<DiceGroup>,
    flat_modifier: Option<Int>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: lexer(source),
            groups: Vec::new(),
            flat_modifier: None,
        }
    }

    pub fn parse(mut self) -> PResult<ParsedFormula> {
        if self.source.trim().is_empty() {
            return Err(ParseError::Syntax {
                pos: SourcePosition::new(0..0, self.source),
                expected: Self::describe(TokenKind::TERMS),
            });
        }

        self.parse_term(Sign::Plus)?;
        while self.matches_any(TokenKind::SIGNS) {
            let sign = self.parse_sign();
            self.parse_term(sign)?;
        }
        if self.lexer.peek().is_some() {
            return self.unexpected_token(TokenKind::SIGNS);
        }

        let groups = NonEmpty::try_from_vec(self.groups).map_err(|_| ParseError::NoDice)?;
        let formula = ParsedFormula::new(groups, self.flat_modifier.unwrap_or(0), self.source.trim());
        debug!("parsed {:?} as {}", formula.raw(), formula);
        Ok(formula)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(&[expected])
        }
    }

    /// Position of the token most recently consumed.
    fn position(&mut self) -> SourcePosition {
        SourcePosition::new(self.lexer.span(), self.source)
    }

    fn describe(kinds: &[TokenKind]) -> NonEmpty<&'static str> {
        let mut kinds = kinds.iter().map(TokenKind::as_str);
        let mut ret = vec1![kinds.next().unwrap_or("<end of input>")];
        for kind in kinds {
            ret.push(kind);
        }
        ret
    }

    fn unexpected_token<T>(&mut self, expected: &[TokenKind]) -> PResult<T> {
        let span = match self.advance() {
            Some(_) => self.lexer.span(),
            None => self.source.len()..self.source.len(),
        };
        Err(ParseError::Syntax {
            pos: SourcePosition::new(span, self.source),
            expected: Self::describe(expected),
        })
    }

    fn parse_sign(&mut self) -> Sign {
        match self.advance() {
            Some(TokenKind::Minus) => Sign::Minus,
            _ => Sign::Plus,
        }
    }

    fn parse_term(&mut self, sign: Sign) -> PResult {
        match self.lexer.peek() {
            Some(TokenKind::Dice) => self.parse_dice(sign),
            Some(TokenKind::Integer) => self.parse_modifier(sign),
            _ => self.unexpected_token(TokenKind::TERMS),
        }
    }

    fn parse_dice(&mut self, sign: Sign) -> PResult {
        self.consume(TokenKind::Dice)?;
        let pos = self.position();
        let (count, sides) = split_dice(&pos.slice);
        let count = count.unwrap_or(1);

        if !COUNT_RANGE.contains(&count) {
            return Err(ParseError::CountOutOfRange { pos, count });
        }
        if !SIDES_RANGE.contains(&sides) {
            return Err(ParseError::SidesOutOfRange { pos, sides });
        }

        let keep = self.parse_keep(count)?;
        let group = DiceGroup::new(sign, count, sides, keep);
        trace!("dice group {}{} at {:?}", sign, group, pos.span);
        self.groups.push(group);
        Ok(())
    }

    fn parse_keep(&mut self, count: UInt) -> PResult<Option<KeepModifier>> {
        let mode = match self.lexer.peek() {
            Some(TokenKind::KeepHighest) => KeepMode::Highest,
            Some(TokenKind::KeepLowest) => KeepMode::Lowest,
            _ => return Ok(None),
        };
        self.advance();

        let pos = self.position();
        let amount = saturating_digits(&pos.slice);
        if amount == 0 || amount > count {
            return Err(ParseError::InvalidKeepAmount { pos, amount, count });
        }
        Ok(Some(KeepModifier { mode, amount }))
    }

    fn parse_modifier(&mut self, sign: Sign) -> PResult {
        self.consume(TokenKind::Integer)?;
        let pos = self.position();
        if self.flat_modifier.is_some() {
            return Err(ParseError::MultipleModifiers(pos));
        }

        let value = pos
            .slice
            .parse::<Int>()
            .map_err(|_| ParseError::IntegerTooLarge(pos.clone()))?;
        trace!("flat modifier {}{} at {:?}", sign, value, pos.span);
        self.flat_modifier = Some(sign.apply(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> PResult<ParsedFormula> {
        Parser::new(s).parse()
    }

    fn group(sign: Sign, count: UInt, sides: UInt, keep: Option<KeepModifier>) -> DiceGroup {
        DiceGroup::new(sign, count, sides, keep)
    }

    fn check(s: &str, groups: Vec<DiceGroup>, flat_modifier: Int) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed.groups(), &groups[..], "groups of {:?}", s);
        assert_eq!(parsed.flat_modifier(), flat_modifier, "modifier of {:?}", s);
    }

    fn check_err(s: &str, expected: ParseError) {
        assert_eq!(parse(s).unwrap_err(), expected, "parsing {:?}", s);
    }

    fn pos(span: std::ops::Range<usize>, slice: &str) -> SourcePosition {
        SourcePosition {
            span,
            slice: slice.to_string(),
        }
    }

    #[test]
    fn test_parse_dice() {
        use Sign::*;

        check("1d20", vec![group(Plus, 1, 20, None)], 0);
        check("d8", vec![group(Plus, 1, 8, None)], 0);
        check("2d6+3", vec![group(Plus, 2, 6, None)], 3);
        check("1d20-1", vec![group(Plus, 1, 20, None)], -1);
        check("3d7", vec![group(Plus, 3, 7, None)], 0);
        check("100d1000", vec![group(Plus, 100, 1000, None)], 0);
        check(
            "1d20+1d6-1d4",
            vec![group(Plus, 1, 20, None), group(Plus, 1, 6, None), group(Minus, 1, 4, None)],
            0,
        );
    }

    #[test]
    fn test_parse_keep() {
        use Sign::*;

        check("4d6kh3", vec![group(Plus, 4, 6, Some(KeepModifier::highest(3)))], 0);
        check("2d20kl1+5", vec![group(Plus, 2, 20, Some(KeepModifier::lowest(1)))], 5);
        check("3d6kh3", vec![group(Plus, 3, 6, Some(KeepModifier::highest(3)))], 0);
    }

    #[test]
    fn test_parse_leading_constant() {
        check("5+1d20", vec![group(Sign::Plus, 1, 20, None)], 5);
        check("5 - d20", vec![group(Sign::Minus, 1, 20, None)], 5);
    }

    #[test]
    fn test_whitespace_and_case() {
        assert_eq!(parse("  2D6 KH1 +  3 ").unwrap(), parse("2d6kh1+3").unwrap());
        assert_eq!(parse("2D6KH1").unwrap(), parse("2d6kh1").unwrap());
        assert_eq!(parse("d20").unwrap(), parse("1d20").unwrap());
        assert_eq!(parse(" 1d20+5 ").unwrap().raw(), "1d20+5");
    }

    #[test]
    fn test_parse_is_idempotent() {
        for s in ["4d6kh3", "1d20+1d6-2", "d100"] {
            assert_eq!(parse(s).unwrap(), parse(s).unwrap());
        }
    }

    #[test]
    fn test_bounds() {
        check_err("101d6", ParseError::CountOutOfRange { pos: pos(0..5, "101d6"), count: 101 });
        check_err("0d6", ParseError::CountOutOfRange { pos: pos(0..3, "0d6"), count: 0 });
        check_err("2d1001", ParseError::SidesOutOfRange { pos: pos(0..6, "2d1001"), sides: 1001 });
        check_err("1d1", ParseError::SidesOutOfRange { pos: pos(0..3, "1d1"), sides: 1 });
        check_err("1d0", ParseError::SidesOutOfRange { pos: pos(0..3, "1d0"), sides: 0 });
        check_err(
            "1d6+99999999999d6",
            ParseError::CountOutOfRange { pos: pos(4..17, "99999999999d6"), count: u32::MAX },
        );
    }

    #[test]
    fn test_keep_amount() {
        check_err(
            "4d6kh5",
            ParseError::InvalidKeepAmount { pos: pos(3..6, "kh5"), amount: 5, count: 4 },
        );
        check_err(
            "d20kl0",
            ParseError::InvalidKeepAmount { pos: pos(3..6, "kl0"), amount: 0, count: 1 },
        );
    }

    #[test]
    fn test_modifiers() {
        check_err("1d20+2+3", ParseError::MultipleModifiers(pos(7..8, "3")));
        check_err("3+1d6-1", ParseError::MultipleModifiers(pos(6..7, "1")));
        check_err(
            "1d20+99999999999999999999",
            ParseError::IntegerTooLarge(pos(5..25, "99999999999999999999")),
        );
        check_err(
            "1d20-9223372036854775808",
            ParseError::IntegerTooLarge(pos(5..24, "9223372036854775808")),
        );
        assert_eq!(parse("1d20+9223372036854775807").unwrap().flat_modifier(), Int::MAX);
        assert_eq!(parse("1d20-9223372036854775807").unwrap().flat_modifier(), -Int::MAX);
    }

    #[test]
    fn test_no_dice() {
        check_err("3", ParseError::NoDice);
        check_err("42", ParseError::NoDice);
    }

    #[test]
    fn test_syntax() {
        check_err(
            "",
            ParseError::Syntax { pos: pos(0..0, ""), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "   ",
            ParseError::Syntax { pos: pos(0..0, ""), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "1d20+",
            ParseError::Syntax { pos: pos(5..5, ""), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "+3",
            ParseError::Syntax { pos: pos(0..1, "+"), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "-1d20",
            ParseError::Syntax { pos: pos(0..1, "-"), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "1d20 ++ 2",
            ParseError::Syntax { pos: pos(6..7, "+"), expected: vec1!["<dice>", "<integer>"] },
        );
        check_err(
            "4d6kh3kl1",
            ParseError::Syntax { pos: pos(6..9, "kl1"), expected: vec1!["'+'", "'-'"] },
        );
        check_err(
            "2d6 3",
            ParseError::Syntax { pos: pos(4..5, "3"), expected: vec1!["'+'", "'-'"] },
        );
    }

    #[test]
    fn test_syntax_garbage() {
        for s in ["2d", "dx", "1d20*2", "(1d20)", "1d20 + abc", "kh1"] {
            assert!(
                matches!(parse(s), Err(ParseError::Syntax { .. })),
                "{:?} should be a syntax error",
                s
            );
        }
    }
}
