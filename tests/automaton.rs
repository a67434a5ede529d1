use num_bigint::BigUint;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use trilife::{
  Automaton, ConfigError, LifeLikeRule, Neighborhood, Orientation, Rule, SearchOutcome,
  Snapshot, WolframRule, GAME_OF_LIFE,
};

fn wolfram(rule_number: u128, width: usize, height: usize) -> Automaton {
  let rule = WolframRule::new(rule_number, 3).unwrap();
  Automaton::new(width, height, Neighborhood::edges(), rule.into()).unwrap()
}

#[test]
fn single_cell_under_rule_zero() {
  let mut uni = wolfram(0, 4, 4);
  uni.toggle((1, 2));
  assert_eq!(uni.population(), 1);
  assert_eq!(uni.step(), 0);
  assert_eq!(uni.turn(), 1);
}

#[test]
fn corner_neighbors_wrap() {
  let uni = wolfram(0, 4, 4);
  let cell = uni.grid().cell((0, 0));
  assert_eq!(cell.orientation(), Orientation::Up);
  assert_eq!(cell.neighbors(), &[(3, 0), (0, 1), (1, 0)]);

  let cell = uni.grid().cell((1, 0));
  assert_eq!(cell.orientation(), Orientation::Down);
  assert_eq!(cell.neighbors(), &[(0, 0), (1, 3), (2, 0)]);
}

#[test]
fn max_rule_fills_grid() {
  let max = WolframRule::max_rule_number(3);
  assert_eq!(max, BigUint::from(255u32));
  let mut uni = wolfram(255, 6, 4);
  assert_eq!(uni.step(), 24);
  assert_eq!(uni.step(), 24);
}

#[test]
fn wolfram_rules_on_larger_templates() {
  for neighborhood in vec![Neighborhood::moore(), Neighborhood::vertices()] {
    let k = neighborhood.len();
    let rule = Rule::parse("0", k).unwrap();
    let mut uni = Automaton::new(8, 6, neighborhood.clone(), rule).unwrap();
    uni.set((3, 3), true);
    assert_eq!(uni.step(), 0);

    let rule = Rule::parse(&WolframRule::max_rule_number(k).to_string(), k).unwrap();
    let mut uni = Automaton::new(8, 6, neighborhood, rule).unwrap();
    assert_eq!(uni.step(), 48);
  }
}

#[test]
fn life_block_is_still() {
  let mut uni = Automaton::new(8, 8, Neighborhood::moore(), GAME_OF_LIFE.into()).unwrap();
  for &c in &[(3, 3), (4, 3), (3, 4), (4, 4)] {
    uni.set(c, true);
  }
  let before = uni.grid().clone();
  assert_eq!(uni.step_n(3), vec![4, 4, 4]);
  assert_eq!(uni.grid(), &before);
}

#[test]
fn search_reports_first_repeat() {
  let mut uni = wolfram(0, 4, 4);
  uni.set((0, 0), true);
  let report = uni.search(10);
  assert_eq!(report.outcome, SearchOutcome::Converged { turn: 2 });
  assert_eq!(report.populations, vec![0, 0]);

  let report = uni.search(10);
  assert_eq!(report.outcome, SearchOutcome::Converged { turn: 3 });
}

#[test]
fn search_exhausts_on_oscillator() {
  let mut uni = Automaton::new(8, 8, Neighborhood::moore(), GAME_OF_LIFE.into()).unwrap();
  for x in 2..5 {
    uni.set((x, 3), true);
  }
  let report = uni.search(7);
  assert_eq!(report.outcome, SearchOutcome::Exhausted);
  assert_eq!(report.populations, vec![3; 7]);
  assert_eq!(uni.turn(), 7);
}

#[test]
fn rule_must_match_neighborhood() {
  let rule = WolframRule::new(30, 3).unwrap();
  let err = Automaton::new(4, 4, Neighborhood::vertices(), rule.into()).unwrap_err();
  assert_eq!(err, ConfigError::NeighborhoodMismatch { expected: 3, actual: 12 });

  let rule = LifeLikeRule::new(vec![4], vec![]).unwrap();
  assert!(Automaton::new(4, 4, Neighborhood::edges(), rule.into()).is_err());
}

#[test]
fn snapshot_resumes_run() {
  let rule = LifeLikeRule::new(vec![0, 1], vec![0, 2]).unwrap();
  let mut uni = Automaton::new(20, 20, Neighborhood::edges(), rule.into()).unwrap();
  uni.fill_random((10, 10), (3, 3), &mut ChaCha8Rng::seed_from_u64(3));
  uni.step_n(5);

  let json = Snapshot::capture(&uni).to_json().unwrap();
  let mut restored = Snapshot::from_json(&json).unwrap().restore().unwrap();
  assert_eq!(restored.turn(), 5);
  assert_eq!(restored.step_n(10), uni.step_n(10));
  assert_eq!(restored.grid(), uni.grid());
}

fn even() -> impl Strategy<Value = usize> {
  (1usize..12).prop_map(|n| n * 2)
}

proptest! {
  #[test]
  fn even_dimensions_build(width in even(), height in even()) {
    let uni = wolfram(0, width, height);
    prop_assert_eq!(uni.grid().cells().len(), width * height);
    for (_, cell) in uni.grid().iter() {
      prop_assert_eq!(cell.neighbors().len(), 3);
    }
  }

  #[test]
  fn odd_dimensions_fail(width in even(), height in even(), odd_width: bool) {
    let (width, height) = if odd_width { (width + 1, height) } else { (width, height + 1) };
    let result = Automaton::new(width, height, Neighborhood::vertices(), GAME_OF_LIFE.into());
    prop_assert!(
      matches!(result, Err(ConfigError::InvalidDimension { .. })),
      "expected an invalid-dimension error"
    );
  }

  #[test]
  fn stepping_is_deterministic(rule_number in 0u128..256, seed: u64, gens in 1usize..8) {
    let mut a = wolfram(rule_number, 10, 8);
    a.fill_random((5, 4), (5, 4), &mut ChaCha8Rng::seed_from_u64(seed));
    let mut b = a.clone();
    prop_assert_eq!(a.step_n(gens), b.step_n(gens));
    prop_assert_eq!(a.grid(), b.grid());
  }
}
