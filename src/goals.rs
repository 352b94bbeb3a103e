//! Goals a board can be driven towards, and how several of them combine.
//!
//! A [`Goal`] is either a tile at an absolute cell or a tile sitting next to
//! another tile. Each goal answers three questions about a board: is it
//! structurally valid, is it satisfied, and how far away is it (a heuristic
//! in `[0, 1]`, `0` meaning satisfied). A [`GoalSet`] aggregates goals under
//! all-of or any-of semantics.
use rand::Rng;
use std::fmt;

use crate::engine::{Action, Board};
use crate::error::GoalError;

/// Where a tile must sit relative to another tile.
///
/// Directions travel as negative sentinel codes in raw goal tuples so they
/// cannot be confused with a row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Above,
    Below,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Above,
        Direction::Below,
        Direction::Left,
        Direction::Right,
    ];

    /// Decodes a sentinel code: `-1` above, `-2` below, `-3` left, `-4` right.
    ///
    /// # Examples
    /// ```
    /// use shrdlu_solver::goals::Direction;
    /// assert_eq!(Direction::from_code(-2), Some(Direction::Below));
    /// assert_eq!(Direction::from_code(1), None);
    /// ```
    pub fn from_code(code: i32) -> Option<Direction> {
        match code {
            -1 => Some(Direction::Above),
            -2 => Some(Direction::Below),
            -3 => Some(Direction::Left),
            -4 => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Direction::Above => -1,
            Direction::Below => -2,
            Direction::Left => -3,
            Direction::Right => -4,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Direction::Above => 'a',
            Direction::Below => 'b',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    /// Phrase used in goal sentences, e.g. "left of".
    pub fn phrase(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
            Direction::Left => "left of",
            Direction::Right => "right of",
        }
    }

    /// The cell on this side of `(row, col)`, or `None` if it falls off the board.
    pub fn neighbour_of(&self, row: usize, col: usize, size: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Above if row + 1 < size => Some((row + 1, col)),
            Direction::Below if row >= 1 => Some((row - 1, col)),
            Direction::Left if col >= 1 => Some((row, col - 1)),
            Direction::Right if col + 1 < size => Some((row, col + 1)),
            _ => None,
        }
    }
}

/// Which raw-tuple layout a goal was given in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalKind {
    /// `(tile, row, col)`
    Position,
    /// `(tile, direction code, other tile)`
    Adjacency,
}

/// A single condition on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Goal {
    /// `tile` must sit at the absolute cell `(row, col)`.
    Position { tile: u8, row: usize, col: usize },
    /// `tile` must sit directly `direction` of `other`.
    Adjacency {
        tile: u8,
        direction: Direction,
        other: u8,
    },
}

fn linear_distance(a: (usize, usize), b: (usize, usize)) -> f64 {
    let dr = a.0 as f64 - b.0 as f64;
    let dc = a.1 as f64 - b.1 as f64;
    (dr * dr + dc * dc).sqrt()
}

fn tile_from_raw(tile: i32, board: &Board) -> Result<u8, GoalError> {
    if tile >= 1 && tile as usize <= board.tile_count() {
        Ok(tile as u8)
    } else {
        Err(GoalError::TileOutOfRange {
            tile,
            tile_count: board.tile_count(),
        })
    }
}

impl Goal {
    /// Builds a goal from a raw `(a, b, c)` tuple and validates it against `board`.
    ///
    /// # Errors
    /// Any [`GoalError`] describing why the tuple does not fit the board.
    ///
    /// # Examples
    /// ```
    /// use shrdlu_solver::engine::Board;
    /// use shrdlu_solver::goals::{Goal, GoalKind};
    /// let board = Board::new_empty(3, 6).unwrap();
    /// let goal = Goal::from_tuple(GoalKind::Adjacency, (4, -1, 2), &board).unwrap();
    /// assert_eq!(goal.to_string(), "Tile 4 must be above tile 2");
    /// assert!(Goal::from_tuple(GoalKind::Adjacency, (4, -1, 4), &board).is_err());
    /// assert!(Goal::from_tuple(GoalKind::Position, (4, 3, 0), &board).is_err());
    /// ```
    pub fn from_tuple(
        kind: GoalKind,
        (a, b, c): (i32, i32, i32),
        board: &Board,
    ) -> Result<Goal, GoalError> {
        let tile = tile_from_raw(a, board)?;
        let goal = match kind {
            GoalKind::Position => {
                let size = board.size();
                if b < 0 || c < 0 || b as usize >= size || c as usize >= size {
                    return Err(GoalError::CoordinateOutOfRange {
                        row: b,
                        col: c,
                        size,
                    });
                }
                Goal::Position {
                    tile,
                    row: b as usize,
                    col: c as usize,
                }
            }
            GoalKind::Adjacency => {
                let direction = Direction::from_code(b).ok_or(GoalError::UnknownDirection(b))?;
                let other = tile_from_raw(c, board)?;
                Goal::Adjacency {
                    tile,
                    direction,
                    other,
                }
            }
        };
        goal.validate(board)?;
        Ok(goal)
    }

    /// A random position goal that is valid for `board`.
    pub fn random_position<R: Rng>(board: &Board, rng: &mut R) -> Goal {
        Goal::Position {
            tile: rng.gen_range(1..=board.tile_count() as u8),
            row: rng.gen_range(0..board.size()),
            col: rng.gen_range(0..board.size()),
        }
    }

    /// A random adjacency goal that is valid for `board`.
    ///
    /// The other tile is redrawn until it differs from the first.
    pub fn random_adjacency<R: Rng>(board: &Board, rng: &mut R) -> Goal {
        let tile = rng.gen_range(1..=board.tile_count() as u8);
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let mut other = rng.gen_range(1..=board.tile_count() as u8);
        while other == tile {
            other = rng.gen_range(1..=board.tile_count() as u8);
        }
        Goal::Adjacency {
            tile,
            direction,
            other,
        }
    }

    /// Checks the goal against the board's dimensions and tile count.
    pub fn validate(&self, board: &Board) -> Result<(), GoalError> {
        let check_tile = |t: u8| tile_from_raw(t as i32, board).map(|_| ());
        match *self {
            Goal::Position { tile, row, col } => {
                check_tile(tile)?;
                if row >= board.size() || col >= board.size() {
                    return Err(GoalError::CoordinateOutOfRange {
                        row: row as i32,
                        col: col as i32,
                        size: board.size(),
                    });
                }
            }
            Goal::Adjacency { tile, other, .. } => {
                check_tile(tile)?;
                check_tile(other)?;
                if tile == other {
                    return Err(GoalError::SelfReference(tile));
                }
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        self.validate(board).is_ok()
    }

    pub fn is_satisfied(&self, board: &Board) -> bool {
        match *self {
            Goal::Position { tile, row, col } => board.get_tile(row, col) == tile,
            Goal::Adjacency {
                tile,
                direction,
                other,
            } => {
                let (row, col) = board.find(other);
                direction
                    .neighbour_of(row, col, board.size())
                    .map_or(false, |(r, c)| board.get_tile(r, c) == tile)
            }
        }
    }

    /// Distance to satisfaction, normalised into `[0, 1]`.
    ///
    /// - Position: distance from the tile to its target cell.
    /// - Adjacency: distance from the tile to the cell next to `other`. The
    ///   worst score `1.0` is returned when that cell is off the board, or when
    ///   it holds some other tile. A cell below `other` is always measured,
    ///   occupied or not.
    pub fn heuristic(&self, board: &Board) -> f64 {
        match *self {
            Goal::Position { tile, row, col } => {
                linear_distance(board.find(tile), (row, col)) / board.max_heuristic()
            }
            Goal::Adjacency {
                tile,
                direction,
                other,
            } => {
                let (row, col) = board.find(other);
                let Some(cell) = direction.neighbour_of(row, col, board.size()) else {
                    return 1.0;
                };
                let occupant = board.get_tile(cell.0, cell.1);
                if direction == Direction::Below || occupant == 0 || occupant == tile {
                    linear_distance(board.find(tile), cell) / board.max_heuristic()
                } else {
                    1.0
                }
            }
        }
    }

    /// Raw tuple form, with directions shown by their short letter, e.g. `(3, a, 2)`.
    pub fn tuple_string(&self) -> String {
        match self {
            Goal::Position { tile, row, col } => format!("({}, {}, {})", tile, row, col),
            Goal::Adjacency {
                tile,
                direction,
                other,
            } => format!("({}, {}, {})", tile, direction.to_char(), other),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Position { tile, row, col } => {
                write!(f, "Tile {} must be at: row {}, col {}", tile, row, col)
            }
            Goal::Adjacency {
                tile,
                direction,
                other,
            } => write!(f, "Tile {} must be {} tile {}", tile, direction.phrase(), other),
        }
    }
}

/// How the goals of a [`GoalSet`] combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalMode {
    /// Every goal must hold. Heuristic is the mean of the members.
    AllOf,
    /// One goal is enough. Heuristic is the smallest member.
    AnyOf,
}

impl fmt::Display for GoalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalMode::AllOf => write!(f, "all of"),
            GoalMode::AnyOf => write!(f, "any of"),
        }
    }
}

/// The goals a game is played towards.
///
/// An empty all-of set is satisfied by any board; an empty any-of set by none.
#[derive(Clone, Debug, PartialEq)]
pub struct GoalSet {
    mode: GoalMode,
    goals: Vec<Goal>,
}

impl GoalSet {
    pub fn new(mode: GoalMode) -> Self {
        GoalSet {
            mode,
            goals: Vec::new(),
        }
    }

    pub fn with_goals(mode: GoalMode, goals: Vec<Goal>) -> Self {
        GoalSet { mode, goals }
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    pub fn mode(&self) -> GoalMode {
        self.mode
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// True when every member goal fits the board.
    pub fn is_valid(&self, board: &Board) -> bool {
        self.goals.iter().all(|g| g.is_valid(board))
    }

    pub fn is_satisfied(&self, board: &Board) -> bool {
        match self.mode {
            GoalMode::AllOf => self.goals.iter().all(|g| g.is_satisfied(board)),
            GoalMode::AnyOf => self.goals.iter().any(|g| g.is_satisfied(board)),
        }
    }

    /// Under any-of, the first member goal that holds on `board`.
    ///
    /// Always `None` under all-of, where no single goal is responsible.
    pub fn satisfying_goal(&self, board: &Board) -> Option<&Goal> {
        match self.mode {
            GoalMode::AllOf => None,
            GoalMode::AnyOf => self.goals.iter().find(|g| g.is_satisfied(board)),
        }
    }

    /// Combined heuristic of the members on `board`, in `[0, 1]`.
    pub fn heuristic(&self, board: &Board) -> f64 {
        match self.mode {
            GoalMode::AllOf => {
                if self.goals.is_empty() {
                    return 0.0;
                }
                let sum: f64 = self.goals.iter().map(|g| g.heuristic(board)).sum();
                sum / self.goals.len() as f64
            }
            GoalMode::AnyOf => self
                .goals
                .iter()
                .map(|g| g.heuristic(board))
                .fold(1.0, f64::min),
        }
    }

    /// Scores `action` by the heuristic of the board it leads to.
    pub fn score_action(&self, resulting_board: &Board, action: Action) -> Action {
        action.with_heuristic(self.heuristic(resulting_board))
    }
}
