use num_bigint::BigUint;
use thiserror::Error;
use crate::neighborhood::Offset;

/// Invalid construction parameters. Fatal, an automaton is never built from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("{axis} must be a positive even number, got {value}")]
  InvalidDimension { axis: &'static str, value: usize },

  #[error("neighborhood must contain at least one offset")]
  EmptyNeighborhood,

  #[error("offset {0:?} appears more than once in the neighborhood")]
  DuplicateOffset(Offset),

  #[error("neighborhood of {size} cells exceeds the maximum of {max}")]
  NeighborhoodTooLarge { size: usize, max: usize },

  #[error("rule number {rule_number} does not fit in {table_bits} bits")]
  RuleNumberOutOfRange { rule_number: BigUint, table_bits: u64 },

  #[error("Wolfram rule expects {expected} neighbors, neighborhood has {actual}")]
  NeighborhoodMismatch { expected: usize, actual: usize },

  #[error("neighbor count {count} is larger than the neighborhood size {size}")]
  NeighborCountOutOfRange { count: u32, size: usize },

  #[error("life-like code {code} is out of range for {size} neighbors")]
  CodeOutOfRange { code: u64, size: usize },

  #[error("expected {expected} cell states, got {actual}")]
  StateLengthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRuleError {
  #[error("unrecognized rule notation {0:?}")]
  Notation(String),

  #[error("rule number {0:?} is not a valid integer")]
  Number(String),

  #[error(transparent)]
  Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
  #[error("missing `x = .., y = ..` header line")]
  MissingHeader,

  #[error("unexpected end of pattern, `!` not found")]
  UnexpectedEof,

  #[error("invalid character {0:?}")]
  InvalidCharacter(char),

  #[error("run count {0:?} is too large")]
  InvalidCount(String),

  #[error("cell ({x}, {y}) lies outside the {width}x{height} pattern")]
  OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

/// All kinds of errors in this crate.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("invalid rule: {0}")]
  ParseRule(#[from] ParseRuleError),

  #[error("invalid RLE: {0}")]
  Rle(#[from] RleError),

  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
