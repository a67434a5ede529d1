use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::automaton::Automaton;
use crate::error::Result;
use crate::neighborhood::{Neighborhood, Offset};
use crate::rle;
use crate::rule::Rule;

/// Everything needed to rebuild an identical automaton.
///
/// Cell states are kept as an RLE body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  pub width: usize,
  pub height: usize,
  pub neighborhood: Vec<Offset>,
  pub rule: Rule,
  pub turn: u64,
  pub cells: String,
}

impl Snapshot {
  pub fn capture(automaton: &Automaton) -> Self {
    Self {
      width: automaton.width(),
      height: automaton.height(),
      neighborhood: automaton.neighborhood().offsets().collect(),
      rule: automaton.rule().clone(),
      turn: automaton.turn(),
      cells: rle::write_body(automaton.grid()),
    }
  }

  pub fn restore(&self) -> Result<Automaton> {
    let neighborhood = Neighborhood::new(self.neighborhood.iter().copied())?;
    let mut automaton = Automaton::new(self.width, self.height, neighborhood, self.rule.clone())?
      .with_turn(self.turn);
    for coord in rle::read_body(&self.cells, self.width, self.height)? {
      automaton.set(coord, true);
    }
    debug!(turn = self.turn, population = automaton.population(), "snapshot restored");
    Ok(automaton)
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn from_json(src: &str) -> Result<Self> {
    Ok(serde_json::from_str(src)?)
  }
}
