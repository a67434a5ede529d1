use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::error::RleError;
use crate::grid::Grid;
use crate::neighborhood::Coord;
use crate::rule::Rule;

/// A pattern decoded from RLE text: its bounding box, the rule named in the
/// header, and the alive cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
  pub width: usize,
  pub height: usize,
  pub rule: Option<String>,
  pub cells: Vec<Coord>,
}

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)(?:\s*,\s*rule\s*=\s*(\S+))?").unwrap()
});

/// Read a pattern from a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
pub fn read(src: impl AsRef<str>) -> Result<Pattern, RleError> {
  let mut lines = src.as_ref()
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'));
  let header = lines.next().ok_or(RleError::MissingHeader)?;
  let caps = HEADER_RE.captures(header).ok_or(RleError::MissingHeader)?;
  let width = caps[1].parse().map_err(|_| RleError::MissingHeader)?;
  let height = caps[2].parse().map_err(|_| RleError::MissingHeader)?;
  let rule = caps.get(3).map(|m| m.as_str().to_owned());

  let body = lines.join("");
  let cells = read_body(&body, width, height)?;
  Ok(Pattern { width, height, rule, cells })
}

/// Decodes the run-length body alone, up to and including `!`.
pub fn read_body(body: &str, width: usize, height: usize) -> Result<Vec<Coord>, RleError> {
  let mut cells = vec![];
  let mut src = body;
  let mut x: usize = 0;
  let mut y = 0;
  loop {
    src = src.trim_start();

    let b0 = *src.as_bytes().first().ok_or(RleError::UnexpectedEof)?;
    if b0 == b'!' {
      break;
    }

    let mut num = 1;
    if b0.is_ascii_digit() {
      let num_len = src.find(|c: char| !c.is_ascii_digit()).unwrap_or(src.len());
      num = src[..num_len].parse()
        .map_err(|_| RleError::InvalidCount(src[..num_len].to_owned()))?;
      src = &src[num_len..];
    }

    let c = src.chars().next().ok_or(RleError::UnexpectedEof)?;
    match c {
      'b' => {
        x = x.saturating_add(num);
      }
      'o' if num == 0 => {}
      'o' => {
        let end = x.saturating_add(num);
        if end > width || y >= height {
          return Err(RleError::OutOfBounds { x: end - 1, y, width, height });
        }
        cells.extend((x..end).map(|i| (i, y)));
        x = end;
      }
      '$' => {
        x = 0;
        y = y.saturating_add(num);
      }
      _ => {
        return Err(RleError::InvalidCharacter(c));
      }
    }

    src = &src[c.len_utf8()..];
  }

  Ok(cells)
}

/// Write a grid to a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
pub fn write(grid: &Grid, rule: &Rule) -> String {
  let mut output = format!("x = {}, y = {}, rule = {}\n", grid.width(), grid.height(), rule);
  write_runs(grid, &mut output);
  output.push('\n');
  output
}

/// Encodes the cells only, without header.
pub fn write_body(grid: &Grid) -> String {
  let mut output = String::new();
  write_runs(grid, &mut output);
  output
}

fn write_runs(grid: &Grid, output: &mut String) {
  let mut num_consec_next_rows = 0;
  for y in 0..grid.height() {
    let groups = grid.row(y).iter().group_by(|cell| cell.is_alive());
    let mut runs = groups
      .into_iter()
      .map(|(alive, run)| {
        let unit = if alive { RleUnit::Alive } else { RleUnit::Dead };
        (unit, run.count())
      })
      .collect_vec();
    if let Some(&(RleUnit::Dead, _)) = runs.last() {
      runs.pop();
    }

    if runs.is_empty() {
      num_consec_next_rows += 1;
      continue;
    }

    if num_consec_next_rows > 0 {
      RleUnit::NextRow.write(num_consec_next_rows, output);
    }
    for (unit, num) in runs {
      unit.write(num, output);
    }
    num_consec_next_rows = 1;
  }

  output.push('!');
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RleUnit {
  Dead,
  Alive,
  NextRow,
}

impl RleUnit {
  fn write(&self, num: usize, s: &mut String) {
    let c = match self {
      Self::Dead => 'b',
      Self::Alive => 'o',
      Self::NextRow => '$',
    };

    let buf = if num == 1 {
      c.to_string()
    } else {
      format!("{}{}", num, c)
    };

    let line_start = s.rfind('\n').map_or(0, |i| i + 1);
    if s.len() - line_start + buf.len() > 70 {
      s.push('\n');
    }

    s.push_str(&buf);
  }
}
