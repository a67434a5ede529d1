use itertools::Itertools;
use crate::cell::{Cell, Orientation};
use crate::error::ConfigError;
use crate::neighborhood::{Coord, Neighborhood};

/// Toroidal grid of triangular cells, stored row by row.
#[derive(Debug, Clone)]
pub struct Grid {
  width: usize,
  height: usize,
  cells: Vec<Cell>,
}

impl Grid {
  /// Both dimensions must be positive and even, otherwise the alternating
  /// triangles do not close up around the torus.
  pub fn new(
    width: usize,
    height: usize,
    neighborhood: &Neighborhood,
  ) -> Result<Self, ConfigError> {
    check_dimension("width", width)?;
    check_dimension("height", height)?;

    let cells = (0..height)
      .cartesian_product(0..width)
      .map(|(y, x)| {
        let orientation = Orientation::at((x, y));
        let neighbors = neighborhood.neighbors_of((x, y), orientation, width, height);
        Cell::new(orientation, neighbors)
      })
      .collect();

    Ok(Self { width, height, cells })
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  fn index(&self, (x, y): Coord) -> usize {
    assert!(x < self.width && y < self.height,
      "({}, {}) outside {}x{} grid", x, y, self.width, self.height);
    y * self.width + x
  }

  /// Panics if `coord` is outside the grid.
  pub fn cell(&self, coord: Coord) -> &Cell {
    &self.cells[self.index(coord)]
  }

  pub fn is_alive(&self, coord: Coord) -> bool {
    self.cell(coord).alive
  }

  pub fn set(&mut self, coord: Coord, alive: bool) {
    let i = self.index(coord);
    self.cells[i].alive = alive;
  }

  /// Returns the new state.
  pub fn toggle(&mut self, coord: Coord) -> bool {
    let i = self.index(coord);
    let cell = &mut self.cells[i];
    cell.alive = !cell.alive;
    cell.alive
  }

  pub fn cells(&self) -> &[Cell] {
    &self.cells
  }

  pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
    &mut self.cells
  }

  pub fn row(&self, y: usize) -> &[Cell] {
    &self.cells[y * self.width..(y + 1) * self.width]
  }

  /// Cells with their coordinates, row by row.
  pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
    let width = self.width;
    self.cells.iter().enumerate().map(move |(i, cell)| ((i % width, i / width), cell))
  }

  pub fn population(&self) -> usize {
    self.cells.iter().filter(|cell| cell.alive).count()
  }

  /// Overwrites every state from a flat list indexed by `x + y * width`.
  pub fn apply_states(&mut self, states: &[bool]) -> Result<(), ConfigError> {
    if states.len() != self.cells.len() {
      return Err(ConfigError::StateLengthMismatch {
        expected: self.cells.len(),
        actual: states.len(),
      });
    }
    for (cell, &alive) in self.cells.iter_mut().zip(states) {
      cell.alive = alive;
    }
    Ok(())
  }

  /// One line per row, `#` for alive cells.
  pub fn debug(&self) -> String {
    self.cells
      .chunks(self.width)
      .map(|row| row.iter().map(|c| if c.alive { '#' } else { '.' }).collect::<String>())
      .join("\n")
  }
}

fn check_dimension(axis: &'static str, value: usize) -> Result<(), ConfigError> {
  if value == 0 || value % 2 != 0 {
    Err(ConfigError::InvalidDimension { axis, value })
  } else {
    Ok(())
  }
}

/// Same dimensions and same alive states.
impl PartialEq for Grid {
  fn eq(&self, other: &Self) -> bool {
    self.width == other.width && self.height == other.height && self.cells == other.cells
  }
}

impl Eq for Grid {}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_odd_dimensions() {
    let n = Neighborhood::edges();
    assert_eq!(Grid::new(3, 4, &n).unwrap_err(),
      ConfigError::InvalidDimension { axis: "width", value: 3 });
    assert_eq!(Grid::new(4, 5, &n).unwrap_err(),
      ConfigError::InvalidDimension { axis: "height", value: 5 });
    assert!(Grid::new(0, 4, &n).is_err());
  }

  #[test]
  fn test_neighbors_wrap() {
    let grid = Grid::new(4, 4, &Neighborhood::edges()).unwrap();
    let cell = grid.cell((0, 0));
    assert_eq!(cell.orientation(), Orientation::Up);
    assert_eq!(cell.neighbors(), &[(3, 0), (0, 1), (1, 0)]);

    let cell = grid.cell((3, 3));
    assert_eq!(cell.orientation(), Orientation::Up);
    assert_eq!(cell.neighbors(), &[(2, 3), (3, 0), (0, 3)]);
  }

  #[test]
  fn test_row_major_layout() {
    let mut grid = Grid::new(4, 2, &Neighborhood::edges()).unwrap();
    grid.set((3, 0), true);
    grid.set((1, 1), true);
    assert_eq!(grid.debug(), "...#\n.#..");
    assert_eq!(grid.row(1).iter().filter(|c| c.is_alive()).count(), 1);
  }

  #[test]
  fn test_toggle() {
    let mut grid = Grid::new(2, 2, &Neighborhood::edges()).unwrap();
    assert!(grid.toggle((1, 1)));
    assert!(grid.is_alive((1, 1)));
    assert!(!grid.toggle((1, 1)));
    assert_eq!(grid.population(), 0);
  }

  #[test]
  fn test_apply_states() {
    let mut grid = Grid::new(2, 2, &Neighborhood::edges()).unwrap();
    grid.apply_states(&[false, true, true, false]).unwrap();
    assert!(grid.is_alive((1, 0)));
    assert!(grid.is_alive((0, 1)));
    assert_eq!(grid.population(), 2);
    assert_eq!(grid.apply_states(&[true]),
      Err(ConfigError::StateLengthMismatch { expected: 4, actual: 1 }));
  }

  #[test]
  fn test_eq_compares_states() {
    let n = Neighborhood::edges();
    let mut a = Grid::new(4, 4, &n).unwrap();
    let b = Grid::new(4, 4, &Neighborhood::moore()).unwrap();
    assert_eq!(a, b);
    a.toggle((2, 1));
    assert_ne!(a, b);
    assert_ne!(Grid::new(4, 2, &n).unwrap(), Grid::new(2, 4, &n).unwrap());
  }
}
