use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::neighborhood::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
  Up,
  Down,
}

impl Orientation {
  /// `Up` on even coordinate parity.
  pub fn at((x, y): Coord) -> Self {
    if (x + y) % 2 == 0 {
      Orientation::Up
    } else {
      Orientation::Down
    }
  }
}

/// A triangular cell.
///
/// Neighbors are stored as coordinates and looked up through the grid. The
/// list is shared between the two buffers of an automaton.
#[derive(Debug, Clone)]
pub struct Cell {
  pub(crate) alive: bool,
  orientation: Orientation,
  neighbors: Arc<[Coord]>,
}

impl Cell {
  pub(crate) fn new(orientation: Orientation, neighbors: Vec<Coord>) -> Self {
    Self {
      alive: false,
      orientation,
      neighbors: neighbors.into(),
    }
  }

  pub fn is_alive(&self) -> bool {
    self.alive
  }

  pub fn orientation(&self) -> Orientation {
    self.orientation
  }

  pub fn neighbors(&self) -> &[Coord] {
    &self.neighbors
  }
}

/// Cells compare by state only, structure never changes after construction.
impl PartialEq for Cell {
  fn eq(&self, other: &Self) -> bool {
    self.alive == other.alive
  }
}

impl Eq for Cell {}
