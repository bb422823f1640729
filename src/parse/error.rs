use crate::common::{NonEmpty, UInt};
use std::ops::Range;
use thiserror::Error;

/// The offending piece of input: a byte span into the caller's text and the
/// text it covers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SourcePosition {
    pub span: Range<usize>,
    pub slice: String,
}

impl SourcePosition {
    pub fn new(span: Range<usize>, source: &str) -> Self {
        let slice = source.get(span.clone()).unwrap_or_default().to_string();
        Self { span, slice }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("(at position {}): unexpected {}; expected {}", .pos.start(), .pos.fmt_found(), .expected.fmt_expected())]
    Syntax {
        pos: SourcePosition,
        expected: NonEmpty<&'static str>,
    },
    #[error("(at position {}): integer {:?} is too large", .0.start(), .0.slice)]
    IntegerTooLarge(SourcePosition),
    #[error("a formula must roll at least one die")]
    NoDice,
    #[error("(at position {}): {:?} rolls {} dice; the count must be between 1 and 100", .pos.start(), .pos.slice, .count)]
    CountOutOfRange { pos: SourcePosition, count: UInt },
    #[error("(at position {}): {:?} has {} sides; dice must have between 2 and 1000 sides", .pos.start(), .pos.slice, .sides)]
    SidesOutOfRange { pos: SourcePosition, sides: UInt },
    #[error("(at position {}): {:?} is a second modifier; only one constant term is allowed", .0.start(), .0.slice)]
    MultipleModifiers(SourcePosition),
    #[error("(at position {}): {:?} keeps {} of {} dice; the amount must be between 1 and {}", .pos.start(), .pos.slice, .amount, .count, .count)]
    InvalidKeepAmount {
        pos: SourcePosition,
        amount: UInt,
        count: UInt,
    },
}

impl ParseError {
    /// Where in the input the error occurred, when it can be pinned down.
    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            Self::Syntax { pos, .. }
            | Self::CountOutOfRange { pos, .. }
            | Self::SidesOutOfRange { pos, .. }
            | Self::InvalidKeepAmount { pos, .. } => Some(pos),
            Self::IntegerTooLarge(pos) | Self::MultipleModifiers(pos) => Some(pos),
            Self::NoDice => None,
        }
    }
}

impl SourcePosition {
    fn fmt_found(&self) -> String {
        if self.slice.is_empty() {
            String::from("end of input")
        } else {
            format!("{:?}", self.slice)
        }
    }
}

trait FormatExpected {
    fn fmt_expected(&self) -> String;
}

impl FormatExpected for [&'static str] {
    fn fmt_expected(&self) -> String {
        match self {
            [] => unreachable!("NonEmpty cannot be empty"),
            [a] => a.to_string(),
            [a, b] => format!("{} or {}", a, b),
            s => format!("{}, or {}", s[..s.len() - 1].join(", "), &s[s.len() - 1]),
        }
    }
}
