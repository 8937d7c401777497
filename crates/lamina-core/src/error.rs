//! Error types for Lamina.
use std::fmt;

use thiserror::Error;

/// One problem found while reading a single digit token of fraction text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitProblem {
    /// A delimiter-separated token with nothing in it, e.g. `1,,2`.
    Empty,
    /// A token that is not a non-negative integer.
    NotAnInteger(String),
    /// A well-formed digit that does not fit the base.
    OutOfRange { digit: u32, base: u32 },
    /// More than one repeat marker in the text.
    ExtraRepeatMarker,
}

impl fmt::Display for DigitProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "digits cannot be empty"),
            Self::NotAnInteger(token) => write!(f, "{token} is not an integer"),
            Self::OutOfRange { digit, base } => write!(f, "digit {digit} is not below base {base}"),
            Self::ExtraRepeatMarker => write!(f, "more than one repeat marker"),
        }
    }
}

/// Every problem found in one piece of fraction text, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The text that failed to parse.
    pub text: String,
    /// All problems, so callers can report them in one pass.
    pub problems: Vec<DigitProblem>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fraction {:?}: ", self.text)?;
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    #[error("invalid base {base}: must be at least 2")] InvalidBase { base: u32 },
    #[error("invalid digit {digit} for base {base}")] InvalidDigit { digit: u32, base: u32 },
    #[error(transparent)] Parse(#[from] ParseError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot load lamination description: {0}")] Load(String),
    #[error("{field}: {source}")] Fraction { field: String, source: FractionError },
    #[error("{field}: chord needs exactly 2 points, got {got}")] ChordArity { field: String, got: usize },
    #[error("{got} branch specs for a map with only {base} inverse branches")] TooManyBranches { got: usize, base: u32 },
    #[error("invalid lamination description: {}", list(.0))] Invalid(Vec<ConfigError>),
}

fn list(errors: &[ConfigError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[derive(Error, Debug)]
pub enum LaminaError {
    #[error(transparent)] Fraction(#[from] FractionError),
    #[error(transparent)] Config(#[from] ConfigError),
}
