use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]*[dD][0-9]+")]
    Dice,

    #[regex(r"[kK][hH][0-9]+")]
    KeepHighest,
    #[regex(r"[kK][lL][0-9]+")]
    KeepLowest,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const SIGNS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const TERMS: &'static [Self] = &[Self::Dice, Self::Integer];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "<dice>",
            KeepHighest => "'kh'",
            KeepLowest => "'kl'",
            Plus => "'+'",
            Minus => "'-'",
            Error => "<error>",
        }
    }
}

/// Parses a run of ASCII digits, saturating instead of overflowing so that
/// oversized values fall through to the range checks.
pub(crate) fn saturating_digits(s: &str) -> u32 {
    s.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u32, |acc, b| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
}

// The regex guarantees a single 'd' or 'D' separating two digit runs.
pub(crate) fn split_dice(s: &str) -> (Option<u32>, u32) {
    let (num, sides) = s.split_at(s.find(|c: char| c == 'd' || c == 'D').unwrap_or(0));
    let num = if num.is_empty() {
        None
    } else {
        Some(saturating_digits(num))
    };
    (num, saturating_digits(sides))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        TokenKind::lexer(s).collect()
    }

    #[test]
    fn test_lex_formula() {
        use TokenKind::*;

        assert_eq!(kinds("2d6+3"), vec![Dice, Plus, Integer]);
        assert_eq!(kinds("4d6kh3 - 1"), vec![Dice, KeepHighest, Minus, Integer]);
        assert_eq!(kinds("D20 KL1"), vec![Dice, KeepLowest]);
        assert_eq!(kinds("1d20 x"), vec![Dice, Error]);
    }

    #[test]
    fn test_split_dice() {
        assert_eq!(split_dice("d20"), (None, 20));
        assert_eq!(split_dice("4D6"), (Some(4), 6));
        assert_eq!(split_dice("99999999999d6"), (Some(u32::MAX), 6));
    }

    #[test]
    fn test_saturating_digits() {
        assert_eq!(saturating_digits("kh3"), 3);
        assert_eq!(saturating_digits("0042"), 42);
        assert_eq!(saturating_digits("4294967296"), u32::MAX);
    }
}
