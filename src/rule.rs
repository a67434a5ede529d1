use num_bigint::BigUint;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use crate::cell::Cell;
use crate::error::{ConfigError, ParseRuleError};
use crate::grid::Grid;

/// Bit `n` set means `n` alive neighbors.
pub(crate) type NeighborMask = u32;

/// Largest neighborhood whose lookup index fits in a `usize`.
pub const MAX_WOLFRAM_NEIGHBORS: usize = usize::BITS as usize - 1;

/// Largest neighbor count representable in a [`NeighborMask`].
pub const MAX_LIFE_LIKE_NEIGHBORS: usize = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
  Wolfram(WolframRule),
  LifeLike(LifeLikeRule),
}

impl Rule {
  /// Next state of `cell`, reading only `grid`.
  pub fn evaluate(&self, grid: &Grid, cell: &Cell) -> bool {
    match self {
      Rule::Wolfram(rule) => rule.evaluate(grid, cell),
      Rule::LifeLike(rule) => rule.evaluate(grid, cell),
    }
  }

  /// Checks the rule against a neighborhood of `size` cells.
  pub fn validate(&self, size: usize) -> Result<(), ConfigError> {
    match self {
      Rule::Wolfram(rule) => {
        if rule.neighborhood_size != size {
          return Err(ConfigError::NeighborhoodMismatch {
            expected: rule.neighborhood_size,
            actual: size,
          });
        }
        Ok(())
      }
      Rule::LifeLike(rule) => rule.validate(size),
    }
  }

  /// Parses `B3/S23` style notation, or a decimal Wolfram rule number
  /// (optionally prefixed with `W`) for a neighborhood of `size` cells.
  pub fn parse(src: &str, size: usize) -> Result<Self, ParseRuleError> {
    let src = src.trim();
    let number = src.strip_prefix(|c: char| c == 'W' || c == 'w').unwrap_or(src);
    if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
      let rule_number = number.parse::<BigUint>()
        .map_err(|_| ParseRuleError::Number(number.to_owned()))?;
      return Ok(Rule::Wolfram(WolframRule::from_biguint(rule_number, size)?));
    }
    Ok(Rule::LifeLike(src.parse()?))
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Rule::Wolfram(rule) => rule.fmt(f),
      Rule::LifeLike(rule) => rule.fmt(f),
    }
  }
}

impl From<WolframRule> for Rule {
  fn from(rule: WolframRule) -> Self {
    Rule::Wolfram(rule)
  }
}

impl From<LifeLikeRule> for Rule {
  fn from(rule: LifeLikeRule) -> Self {
    Rule::LifeLike(rule)
  }
}

/// The rule number's binary expansion is a lookup table indexed by the
/// neighbor states packed first-neighbor-most-significant.
///
/// The cell's own state is not consulted. Rule numbers are arbitrary
/// precision: a `k`-neighbor table has `2^k` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WolframParams", try_from = "WolframParams")]
pub struct WolframRule {
  rule_number: BigUint,
  neighborhood_size: usize,
}

impl WolframRule {
  pub fn new(rule_number: u128, neighborhood_size: usize) -> Result<Self, ConfigError> {
    Self::from_biguint(BigUint::from(rule_number), neighborhood_size)
  }

  pub fn from_biguint(rule_number: BigUint, neighborhood_size: usize) -> Result<Self, ConfigError> {
    if neighborhood_size == 0 {
      return Err(ConfigError::EmptyNeighborhood);
    }
    if neighborhood_size > MAX_WOLFRAM_NEIGHBORS {
      return Err(ConfigError::NeighborhoodTooLarge {
        size: neighborhood_size,
        max: MAX_WOLFRAM_NEIGHBORS,
      });
    }
    let table_bits = 1u64 << neighborhood_size;
    if rule_number.bits() > table_bits {
      return Err(ConfigError::RuleNumberOutOfRange { rule_number, table_bits });
    }
    Ok(Self { rule_number, neighborhood_size })
  }

  /// `2^(2^k) - 1`, the rule that turns every cell alive. Takes `2^k` bits.
  pub fn max_rule_number(neighborhood_size: usize) -> BigUint {
    (BigUint::from(1u32) << (1usize << neighborhood_size)) - 1u32
  }

  pub fn rule_number(&self) -> &BigUint {
    &self.rule_number
  }

  pub fn neighborhood_size(&self) -> usize {
    self.neighborhood_size
  }

  /// Packs neighbor states in stored order, first neighbor most significant.
  pub fn index(&self, grid: &Grid, cell: &Cell) -> usize {
    cell.neighbors()
      .iter()
      .fold(0, |acc, &n| acc << 1 | grid.is_alive(n) as usize)
  }

  pub fn evaluate(&self, grid: &Grid, cell: &Cell) -> bool {
    self.rule_number.bit(self.index(grid, cell) as u64)
  }
}

impl Display for WolframRule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.rule_number)
  }
}

/// Birth/survival rule over the number of alive neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "LifeLikeCounts", try_from = "LifeLikeCounts")]
pub struct LifeLikeRule {
  birth: NeighborMask,
  survival: NeighborMask,
}

pub const GAME_OF_LIFE: LifeLikeRule = LifeLikeRule {
  birth: 0b1000,
  survival: 0b1100,
};

impl LifeLikeRule {
  pub fn new<B, S>(birth: B, survival: S) -> Result<Self, ConfigError>
  where
    B: IntoIterator<Item = u32>,
    S: IntoIterator<Item = u32>,
  {
    Ok(Self {
      birth: to_mask(birth)?,
      survival: to_mask(survival)?,
    })
  }

  /// Decodes the compact numeric form: bit `c` is birth on `c` neighbors,
  /// bit `size + 1 + c` is survival on `c` neighbors.
  pub fn from_code(code: u64, size: usize) -> Result<Self, ConfigError> {
    if size > MAX_LIFE_LIKE_NEIGHBORS {
      return Err(ConfigError::NeighborhoodTooLarge {
        size,
        max: MAX_LIFE_LIKE_NEIGHBORS,
      });
    }
    let half = size as u32 + 1;
    if code.checked_shr(2 * half).unwrap_or(0) != 0 {
      return Err(ConfigError::CodeOutOfRange { code, size });
    }
    let mask = (1u64 << half) - 1;
    Ok(Self {
      birth: (code & mask) as NeighborMask,
      survival: (code >> half & mask) as NeighborMask,
    })
  }

  /// Inverse of [`from_code`](Self::from_code). Fails when the rule does
  /// not fit a neighborhood of `size` cells.
  pub fn code(&self, size: usize) -> Result<u64, ConfigError> {
    self.validate(size)?;
    Ok(self.birth as u64 | (self.survival as u64) << (size + 1))
  }

  pub fn births(&self) -> impl Iterator<Item = u32> {
    counts(self.birth)
  }

  pub fn survivals(&self) -> impl Iterator<Item = u32> {
    counts(self.survival)
  }

  pub fn validate(&self, size: usize) -> Result<(), ConfigError> {
    if size > MAX_LIFE_LIKE_NEIGHBORS {
      return Err(ConfigError::NeighborhoodTooLarge {
        size,
        max: MAX_LIFE_LIKE_NEIGHBORS,
      });
    }
    match self.births().chain(self.survivals()).find(|&c| c as usize > size) {
      Some(count) => Err(ConfigError::NeighborCountOutOfRange { count, size }),
      None => Ok(()),
    }
  }

  pub fn evaluate(&self, grid: &Grid, cell: &Cell) -> bool {
    let alive = cell.neighbors().iter().filter(|&&n| grid.is_alive(n)).count();
    let mask = if cell.alive { self.survival } else { self.birth };
    mask.checked_shr(alive as u32).map_or(false, |m| m & 1 != 0)
  }
}

fn to_mask<I>(counts: I) -> Result<NeighborMask, ConfigError>
where
  I: IntoIterator<Item = u32>,
{
  counts.into_iter().try_fold(0, |mask, count| {
    if count as usize > MAX_LIFE_LIKE_NEIGHBORS {
      Err(ConfigError::NeighborCountOutOfRange {
        count,
        size: MAX_LIFE_LIKE_NEIGHBORS,
      })
    } else {
      Ok(mask | 1 << count)
    }
  })
}

fn counts(mut mask: NeighborMask) -> impl Iterator<Item = u32> {
  std::iter::from_fn(move || {
    if mask == 0 {
      None
    } else {
      let count = mask.trailing_zeros();
      mask &= mask - 1;
      Some(count)
    }
  })
}

impl Display for LifeLikeRule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "B")?;
    for n in self.births() {
      write!(f, "{}", n)?;
    }
    write!(f, "/S")?;
    for n in self.survivals() {
      write!(f, "{}", n)?;
    }
    Ok(())
  }
}

static NOTATION_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(?i)B([0-9]*)/S([0-9]*)$").unwrap());

impl std::str::FromStr for LifeLikeRule {
  type Err = ParseRuleError;

  /// Accepts `B3/S23`, `b3/s23` and either part empty (`B2/S`).
  fn from_str(src: &str) -> Result<Self, Self::Err> {
    let caps = NOTATION_RE.captures(src.trim())
      .ok_or_else(|| ParseRuleError::Notation(src.to_owned()))?;
    let digits = |i: usize| {
      caps[i].chars().filter_map(|c| c.to_digit(10)).collect::<Vec<_>>()
    };
    Ok(Self::new(digits(1), digits(2))?)
  }
}

/// Serialized form of a [`WolframRule`]. The rule number is a decimal
/// string, JSON numbers cannot hold it in general.
#[derive(Serialize, Deserialize)]
struct WolframParams {
  rule_number: String,
  neighborhood_size: usize,
}

impl From<WolframRule> for WolframParams {
  fn from(rule: WolframRule) -> Self {
    Self {
      rule_number: rule.rule_number.to_string(),
      neighborhood_size: rule.neighborhood_size,
    }
  }
}

impl TryFrom<WolframParams> for WolframRule {
  type Error = ParseRuleError;

  fn try_from(params: WolframParams) -> Result<Self, Self::Error> {
    let rule_number = params.rule_number.parse::<BigUint>()
      .map_err(|_| ParseRuleError::Number(params.rule_number.clone()))?;
    Ok(Self::from_biguint(rule_number, params.neighborhood_size)?)
  }
}

/// Serialized form of a [`LifeLikeRule`]: sorted neighbor counts.
#[derive(Serialize, Deserialize)]
struct LifeLikeCounts {
  birth: Vec<u32>,
  survival: Vec<u32>,
}

impl From<LifeLikeRule> for LifeLikeCounts {
  fn from(rule: LifeLikeRule) -> Self {
    Self {
      birth: rule.births().collect(),
      survival: rule.survivals().collect(),
    }
  }
}

impl TryFrom<LifeLikeCounts> for LifeLikeRule {
  type Error = ConfigError;

  fn try_from(counts: LifeLikeCounts) -> Result<Self, Self::Error> {
    Self::new(counts.birth, counts.survival)
  }
}
