//! # SHRDLU Solver Library
//!
//! This library provides the core logic for a column-based sliding-tile puzzle:
//! numbered tiles stack up in the columns of a square board, like a cross
//! between the 15-puzzle and Connect-4, and a move lifts the top tile of one
//! column onto another. Goals say where tiles should end up, and two solvers
//! search for a sequence of moves that satisfies them.
//!
//! It is used by three binaries:
//! - `human_player`: the interactive menu game (manual play, random walk, best-first).
//! - `ai_solver`: builds a board and goals from command line options and prints a plan.
//! - `strategy_evaluator`: compares both solvers on a batch of seeded boards.
//!
//! ## Modules
//! - `engine`: the board (`Board`), moves (`Action`), state fingerprints and
//!   the manual play session (`Game`).
//! - `goals`: position and adjacency goals (`Goal`) and their all-of / any-of
//!   aggregation (`GoalSet`).
//! - `solver`: the random walk and the greedy best-first search (`Solver`).
//! - `error`: error types returned by the modules above.
//! - `utils`: parsing of board files, goal specs and goal modes.

pub mod engine;
pub mod error;
pub mod goals;
pub mod solver;
pub mod utils;

pub use engine::{Action, Board, Game};
pub use error::{BoardError, GoalError};
pub use goals::{Direction, Goal, GoalMode, GoalSet};
pub use solver::{Solution, Solver};
