use rayon::prelude::*;
use tracing::{debug, trace};
use crate::cell::Cell;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::neighborhood::{Coord, Neighborhood};
use crate::rule::Rule;

/// Maps a point of the presentation layer onto the cell drawn under it.
///
/// The triangle geometry lives entirely with the implementor.
pub trait CellLocator {
  fn locate(&self, point: (f32, f32)) -> Option<Coord>;
}

/// A grid advanced synchronously by a fixed rule.
#[derive(Debug, Clone)]
pub struct Automaton {
  grid: Grid,
  /// Receives the next generation; holds the previous one after a step.
  back: Grid,
  neighborhood: Neighborhood,
  rule: Rule,
  turn: u64,
}

impl Automaton {
  pub fn new(
    width: usize,
    height: usize,
    neighborhood: Neighborhood,
    rule: Rule,
  ) -> Result<Self, ConfigError> {
    rule.validate(neighborhood.len())?;
    let grid = Grid::new(width, height, &neighborhood)?;
    debug!(width, height, neighbors = neighborhood.len(), %rule, "automaton created");
    Ok(Self {
      back: grid.clone(),
      grid,
      neighborhood,
      rule,
      turn: 0,
    })
  }

  pub(crate) fn with_turn(mut self, turn: u64) -> Self {
    self.turn = turn;
    self
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn cell(&self, coord: Coord) -> &Cell {
    self.grid.cell(coord)
  }

  pub fn rule(&self) -> &Rule {
    &self.rule
  }

  pub fn neighborhood(&self) -> &Neighborhood {
    &self.neighborhood
  }

  pub fn turn(&self) -> u64 {
    self.turn
  }

  pub fn width(&self) -> usize {
    self.grid.width()
  }

  pub fn height(&self) -> usize {
    self.grid.height()
  }

  pub fn population(&self) -> usize {
    self.grid.population()
  }

  pub fn set(&mut self, coord: Coord, alive: bool) {
    self.grid.set(coord, alive);
  }

  /// Returns the new state.
  pub fn toggle(&mut self, coord: Coord) -> bool {
    self.grid.toggle(coord)
  }

  /// Toggles the cell under `point`, if any.
  pub fn toggle_at<L: CellLocator>(&mut self, locator: &L, point: (f32, f32)) -> Option<bool> {
    let coord = locator.locate(point)?;
    if coord.0 < self.width() && coord.1 < self.height() {
      Some(self.toggle(coord))
    } else {
      None
    }
  }

  pub(crate) fn grid_mut(&mut self) -> &mut Grid {
    &mut self.grid
  }

  /// Advances one generation and returns its population.
  ///
  /// Every cell is evaluated against the current grid only, then the buffers
  /// are swapped.
  pub fn step(&mut self) -> usize {
    let current = &self.grid;
    let rule = &self.rule;
    self.back
      .cells_mut()
      .par_iter_mut()
      .zip(current.cells().par_iter())
      .for_each(|(next, cell)| {
        next.alive = rule.evaluate(current, cell);
      });

    std::mem::swap(&mut self.grid, &mut self.back);
    self.turn += 1;

    let population = self.grid.population();
    trace!(turn = self.turn, population, "step");
    population
  }

  /// Advances `num_gen` generations, returning each population.
  pub fn step_n(&mut self, num_gen: usize) -> Vec<usize> {
    (0..num_gen).map(|_| self.step()).collect()
  }

  /// Steps until a generation repeats the one before it, or `max_turns`
  /// steps have been taken.
  ///
  /// Only fixed points are detected. Oscillators of period 2 or more are
  /// never reported and exhaust the budget.
  pub fn search(&mut self, max_turns: usize) -> SearchReport {
    let mut populations = Vec::new();
    for _ in 0..max_turns {
      populations.push(self.step());
      if is_fixed_point(&self.back, &self.grid) {
        debug!(turn = self.turn, "converged");
        return SearchReport {
          outcome: SearchOutcome::Converged { turn: self.turn },
          populations,
        };
      }
    }
    SearchReport {
      outcome: SearchOutcome::Exhausted,
      populations,
    }
  }
}

/// Whether `after` repeats `before` cell for cell.
///
/// Compares alive states only. A period-1 check: it does not recognize
/// longer cycles.
pub fn is_fixed_point(before: &Grid, after: &Grid) -> bool {
  before == after
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
  /// The generation reached at `turn` equals the previous one.
  Converged { turn: u64 },
  Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
  pub outcome: SearchOutcome,
  /// Population after each step taken.
  pub populations: Vec<usize>,
}
