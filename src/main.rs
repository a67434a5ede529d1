use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trilife::config::Preset;
use trilife::{export, rle, Automaton, Config, Rule, SearchOutcome, Snapshot};

/// Run a triangular-grid automaton without a display.
#[derive(Parser, Debug)]
#[command(name = "trilife", version)]
struct Args {
  /// JSON config file; overrides the grid and rule flags.
  config: Option<PathBuf>,

  #[arg(long, default_value_t = 100)]
  width: usize,

  #[arg(long, default_value_t = 100)]
  height: usize,

  /// Wolfram number (`30`, `W30`) or life-like notation (`B01/S02`).
  #[arg(long, default_value = "B01/S02")]
  rule: String,

  #[arg(long, value_enum, default_value_t = Preset::Edges)]
  neighborhood: Preset,

  /// Generations to run when not searching.
  #[arg(long, default_value_t = 150)]
  generations: usize,

  /// Step until the grid stops changing, at most this many turns.
  #[arg(long, conflicts_with = "generations")]
  search: Option<usize>,

  #[arg(long, default_value_t = 0)]
  seed: u64,

  /// Randomize a box of this half extent around the center.
  #[arg(long)]
  fill: Option<usize>,

  /// RLE pattern placed in the middle of the grid.
  #[arg(long)]
  pattern: Option<PathBuf>,

  /// Write the final state as JSON.
  #[arg(long)]
  snapshot: Option<PathBuf>,

  /// Write the final generation as an image.
  #[arg(long)]
  image: Option<PathBuf>,

  /// Print the final generation as `#`/`.` rows instead of RLE.
  #[arg(long)]
  ascii: bool,
}

fn build(args: &Args) -> Result<Automaton> {
  if let Some(path) = &args.config {
    let config = Config::load(path)
      .with_context(|| format!("failed to load config {}", path.display()))?;
    return config.automaton().context("invalid config");
  }
  let neighborhood = args.neighborhood.neighborhood();
  let rule = Rule::parse(&args.rule, neighborhood.len())
    .with_context(|| format!("invalid rule {:?}", args.rule))?;
  Automaton::new(args.width, args.height, neighborhood, rule).context("invalid automaton")
}

fn seed(automaton: &mut Automaton, args: &Args) -> Result<()> {
  if let Some(path) = &args.pattern {
    let src = fs::read_to_string(path)
      .with_context(|| format!("failed to read pattern {}", path.display()))?;
    let pattern = rle::read(&src)
      .with_context(|| format!("failed to parse pattern {}", path.display()))?;
    if pattern.width > automaton.width() || pattern.height > automaton.height() {
      warn!(pattern.width, pattern.height, "pattern larger than the grid, wrapping");
    }
    automaton.place_centered(&pattern);
  }
  if let Some(half) = args.fill {
    let center = (automaton.width() / 2, automaton.height() / 2);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    automaton.fill_random(center, (half, half), &mut rng);
  }
  Ok(())
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  let mut automaton = build(&args)?;
  seed(&mut automaton, &args)?;
  info!(
    width = automaton.width(),
    height = automaton.height(),
    rule = %automaton.rule(),
    population = automaton.population(),
    "starting"
  );
  if let Rule::LifeLike(rule) = automaton.rule() {
    if let Ok(code) = rule.code(automaton.neighborhood().len()) {
      info!(code, "life-like rule code");
    }
  }

  let populations = match args.search {
    Some(max_turns) => {
      let report = automaton.search(max_turns);
      match report.outcome {
        SearchOutcome::Converged { turn } => info!(turn, "converged"),
        SearchOutcome::Exhausted => info!(max_turns, "no fixed point found"),
      }
      report.populations
    }
    None => automaton.step_n(args.generations),
  };

  for (turn, population) in populations.iter().enumerate() {
    println!("{}\t{}", turn + 1, population);
  }
  if args.ascii {
    println!("{}", automaton.grid().debug());
  } else {
    print!("{}", rle::write(automaton.grid(), automaton.rule()));
  }

  if let Some(path) = &args.snapshot {
    let json = Snapshot::capture(&automaton).to_json()?;
    fs::write(path, json)
      .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    info!(path = %path.display(), "snapshot written");
  }
  if let Some(path) = &args.image {
    export::save_image(automaton.grid(), path)
      .with_context(|| format!("failed to write image {}", path.display()))?;
    info!(path = %path.display(), "image written");
  }
  Ok(())
}
