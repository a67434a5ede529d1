use image::{ImageBuffer, ImageResult, Luma};
use std::path::Path;
use crate::grid::Grid;

const ALIVE_SHADE: u8 = 70;
const DEAD_SHADE: u8 = 255;

/// One pixel per cell, alive cells dark.
pub fn to_image(grid: &Grid) -> ImageBuffer<Luma<u8>, Vec<u8>> {
  let mut img = ImageBuffer::from_pixel(grid.width() as u32, grid.height() as u32, Luma([DEAD_SHADE]));
  for ((x, y), cell) in grid.iter() {
    if cell.is_alive() {
      img.put_pixel(x as u32, y as u32, Luma([ALIVE_SHADE]));
    }
  }
  img
}

pub fn save_image(grid: &Grid, path: impl AsRef<Path>) -> ImageResult<()> {
  to_image(grid).save(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::neighborhood::Neighborhood;

  #[test]
  fn test_to_image() {
    let mut grid = Grid::new(4, 2, &Neighborhood::edges()).unwrap();
    grid.set((3, 1), true);
    let img = to_image(&grid);
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1), &Luma([ALIVE_SHADE]));
    assert_eq!(img.get_pixel(0, 0), &Luma([DEAD_SHADE]));
  }
}
