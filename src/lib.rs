//! Cellular automata on a toroidal grid of alternating up and down triangles.
//!
//! ```
//! use trilife::{Automaton, Neighborhood, WolframRule};
//!
//! let rule = WolframRule::new(0, 3).unwrap();
//! let mut uni = Automaton::new(4, 4, Neighborhood::edges(), rule.into()).unwrap();
//! uni.toggle((1, 2));
//! assert_eq!(uni.step(), 0);
//! assert_eq!(uni.turn(), 1);
//! ```

pub mod automaton;
pub mod cell;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod neighborhood;
pub mod pattern;
pub mod rle;
pub mod rule;
pub mod snapshot;

pub use automaton::{is_fixed_point, Automaton, CellLocator, SearchOutcome, SearchReport};
pub use cell::{Cell, Orientation};
pub use config::Config;
pub use error::{ConfigError, Error, ParseRuleError, Result, RleError};
pub use grid::Grid;
pub use neighborhood::{Coord, Neighborhood, Offset};
pub use rule::{LifeLikeRule, Rule, WolframRule, GAME_OF_LIFE};
pub use snapshot::Snapshot;
