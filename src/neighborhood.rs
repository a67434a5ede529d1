use indexmap::IndexSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use crate::cell::Orientation;
use crate::error::ConfigError;

/// Grid position `(x, y)`, `x` is the column.
pub type Coord = (usize, usize);

/// Relative `(dx, dy)` offset as seen from an upward triangle.
pub type Offset = (i32, i32);

/// Ordered, duplicate-free neighborhood template.
///
/// Order is significant: Wolfram rules read neighbor states in exactly this
/// order, and two templates are equal only when their orders agree.
#[derive(Debug, Clone)]
pub struct Neighborhood {
  offsets: IndexSet<Offset, BuildHasherDefault<FxHasher>>,
}

impl PartialEq for Neighborhood {
  fn eq(&self, other: &Self) -> bool {
    self.offsets().eq(other.offsets())
  }
}

impl Eq for Neighborhood {}

impl Neighborhood {
  pub fn new<I>(offsets: I) -> Result<Self, ConfigError>
  where
    I: IntoIterator<Item = Offset>,
  {
    let mut set = IndexSet::default();
    for offset in offsets {
      if !set.insert(offset) {
        return Err(ConfigError::DuplicateOffset(offset));
      }
    }
    if set.is_empty() {
      return Err(ConfigError::EmptyNeighborhood);
    }
    Ok(Self { offsets: set })
  }

  /// The three triangles sharing an edge with the cell.
  pub fn edges() -> Self {
    Self::from_static(&[(-1, 0), (0, 1), (1, 0)])
  }

  /// The twelve triangles sharing at least a vertex with the cell.
  pub fn vertices() -> Self {
    Self::from_static(&[
      (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1),
      (-2, 0), (-1, 0), (1, 0), (2, 0),
      (-1, -1), (0, -1), (1, -1),
    ])
  }

  /// Square Moore neighborhood. Symmetric under the vertical flip, so on this
  /// grid it behaves exactly like the square-lattice one.
  pub fn moore() -> Self {
    Self::from_static(&[
      (-1, -1), (0, -1), (1, -1),
      (-1, 0), (1, 0),
      (-1, 1), (0, 1), (1, 1),
    ])
  }

  fn from_static(offsets: &[Offset]) -> Self {
    Self { offsets: offsets.iter().copied().collect() }
  }

  pub fn len(&self) -> usize {
    self.offsets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.offsets.is_empty()
  }

  pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
    self.offsets.iter().copied()
  }

  /// Wrapped coordinates of the neighbors of `(x, y)`, in template order.
  ///
  /// A downward triangle sees the template mirrored vertically.
  pub fn neighbors_of(
    &self,
    (x, y): Coord,
    orientation: Orientation,
    width: usize,
    height: usize,
  ) -> Vec<Coord> {
    let sign = match orientation {
      Orientation::Up => 1,
      Orientation::Down => -1,
    };
    self.offsets()
      .map(|(dx, dy)| {
        let nx = (x as i64 + dx as i64).rem_euclid(width as i64);
        let ny = (y as i64 + sign * dy as i64).rem_euclid(height as i64);
        (nx as usize, ny as usize)
      })
      .collect()
  }
}
