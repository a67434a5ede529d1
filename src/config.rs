use serde::Deserialize;
use std::path::Path;
use crate::automaton::Automaton;
use crate::error::Result;
use crate::neighborhood::{Neighborhood, Offset};
use crate::rule::Rule;

/// Construction parameters, as read from a JSON file.
///
/// ```json
/// { "width": 100, "height": 100, "neighborhood": "edges", "rule": "B01/S02" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
  pub width: usize,
  pub height: usize,
  #[serde(default)]
  pub neighborhood: NeighborhoodConfig,
  pub rule: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NeighborhoodConfig {
  Preset(Preset),
  Offsets(Vec<Offset>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
  Edges,
  Vertices,
  Moore,
}

impl Default for NeighborhoodConfig {
  fn default() -> Self {
    NeighborhoodConfig::Preset(Preset::Edges)
  }
}

impl Preset {
  pub fn neighborhood(self) -> Neighborhood {
    match self {
      Preset::Edges => Neighborhood::edges(),
      Preset::Vertices => Neighborhood::vertices(),
      Preset::Moore => Neighborhood::moore(),
    }
  }
}

impl NeighborhoodConfig {
  pub fn build(&self) -> Result<Neighborhood> {
    match self {
      NeighborhoodConfig::Preset(preset) => Ok(preset.neighborhood()),
      NeighborhoodConfig::Offsets(offsets) => Ok(Neighborhood::new(offsets.iter().copied())?),
    }
  }
}

impl Config {
  pub fn from_json(src: &str) -> Result<Self> {
    Ok(serde_json::from_str(src)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let src = std::fs::read_to_string(path)?;
    Self::from_json(&src)
  }

  pub fn automaton(&self) -> Result<Automaton> {
    let neighborhood = self.neighborhood.build()?;
    let rule = Rule::parse(&self.rule, neighborhood.len())?;
    Ok(Automaton::new(self.width, self.height, neighborhood, rule)?)
  }
}
