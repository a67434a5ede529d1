//! Initial-state helpers. Coordinates wrap around the torus.

use rand::Rng;
use crate::automaton::Automaton;
use crate::error::ConfigError;
use crate::neighborhood::Coord;
use crate::rle::Pattern;

fn wrap(automaton: &Automaton, x: i64, y: i64) -> Coord {
  (
    x.rem_euclid(automaton.width() as i64) as usize,
    y.rem_euclid(automaton.height() as i64) as usize,
  )
}

impl Automaton {
  /// Overwrites every cell from a flat list indexed by `x + y * width`.
  pub fn apply_states(&mut self, states: &[bool]) -> Result<(), ConfigError> {
    self.grid_mut().apply_states(states)
  }

  /// Randomizes the cells of the `2 * half_extent` box centered on `center`,
  /// leaving the rest untouched.
  pub fn fill_random<R: Rng>(&mut self, center: Coord, half_extent: (usize, usize), rng: &mut R) {
    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let (hx, hy) = (half_extent.0 as i64, half_extent.1 as i64);
    for y in cy - hy..cy + hy {
      for x in cx - hx..cx + hx {
        let coord = wrap(self, x, y);
        self.set(coord, rng.gen());
      }
    }
  }

  /// Sets the alive cells of `pattern`, shifted by `origin`.
  pub fn place(&mut self, pattern: &Pattern, origin: Coord) {
    for &(x, y) in &pattern.cells {
      let coord = wrap(self, (origin.0 + x) as i64, (origin.1 + y) as i64);
      self.set(coord, true);
    }
  }

  /// Places `pattern` in the middle of the grid.
  pub fn place_centered(&mut self, pattern: &Pattern) {
    let x = self.width().saturating_sub(pattern.width) / 2;
    let y = self.height().saturating_sub(pattern.height) / 2;
    self.place(pattern, (x, y));
  }
}
