//! Text formats used by the command line tools: board files, goal specs and goal modes.
use crate::engine::Board;
use crate::error::{BoardError, GoalError};
use crate::goals::{Direction, Goal, GoalKind, GoalMode};

/// Parses a board drawn as text, one line per row with the ceiling row first.
///
/// Cells are separated by whitespace. `.` or `0` is an empty cell and any
/// positive integer is a tile. The board size is the number of rows and the
/// tile count is the number of tiles found.
///
/// # Errors
/// * `BoardError::Parse` for an unreadable cell or a ragged row.
/// * Any error from [`Board::from_cells`], e.g. a floating tile or a gap in the numbering.
///
/// # Examples
/// ```
/// use shrdlu_solver::utils::board_from_str_array;
///
/// let rows = [
///     ". . .",
///     "2 4 .",
///     "1 3 5",
/// ];
/// let board = board_from_str_array(&rows).unwrap();
/// assert_eq!(board.size(), 3);
/// assert_eq!(board.tile_count(), 5);
/// assert_eq!(board.get_tile(0, 0), 1);
/// assert_eq!(board.get_tile(1, 1), 4);
///
/// assert!(board_from_str_array(&[". . .", ". . 2", "1 3 ."]).is_err()); // 2 is floating
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, BoardError> {
    let size = rows.len();
    let mut parsed: Vec<Vec<u8>> = Vec::with_capacity(size);

    for (i, row) in rows.iter().enumerate() {
        let cells = row
            .split_whitespace()
            .map(|token| match token {
                "." => Ok(0),
                _ => token.parse::<u8>().map_err(|_| {
                    BoardError::Parse(format!("unrecognized cell '{}' in line {}", token, i + 1))
                }),
            })
            .collect::<Result<Vec<u8>, _>>()?;
        if cells.len() != size {
            return Err(BoardError::Parse(format!(
                "line {} has {} cells (expected {})",
                i + 1,
                cells.len(),
                size
            )));
        }
        parsed.push(cells);
    }

    // Lines come ceiling first; cells are stored bottom row first.
    let cells: Vec<u8> = parsed.into_iter().rev().flatten().collect();
    let tile_count = cells.iter().filter(|&&v| v != 0).count();
    Board::from_cells(size, tile_count, &cells)
}

/// Reads a direction from its name (`above`, `below`, `left`, `right`),
/// its short letter, or its sentinel code (`-1` to `-4`).
pub fn parse_direction(s: &str) -> Result<Direction, GoalError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "above" | "a" => Ok(Direction::Above),
        "below" | "b" => Ok(Direction::Below),
        "left" | "l" => Ok(Direction::Left),
        "right" | "r" => Ok(Direction::Right),
        other => {
            let code = other
                .parse::<i32>()
                .map_err(|_| GoalError::Parse(format!("unknown direction '{}'", s)))?;
            Direction::from_code(code).ok_or(GoalError::UnknownDirection(code))
        }
    }
}

fn parse_int(s: &str) -> Result<i32, GoalError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| GoalError::Parse(format!("'{}' is not a number", s.trim())))
}

/// Parses and validates a goal written as `pos:T,R,C` or `adj:T,DIR,U`.
///
/// # Examples
/// ```
/// use shrdlu_solver::engine::Board;
/// use shrdlu_solver::goals::{Direction, Goal};
/// use shrdlu_solver::utils::parse_goal_spec;
///
/// let board = Board::new_empty(3, 6).unwrap();
/// assert_eq!(
///     parse_goal_spec("pos:3,0,0", &board).unwrap(),
///     Goal::Position { tile: 3, row: 0, col: 0 }
/// );
/// assert_eq!(
///     parse_goal_spec("adj:1,left,2", &board).unwrap(),
///     Goal::Adjacency { tile: 1, direction: Direction::Left, other: 2 }
/// );
/// assert!(parse_goal_spec("adj:1,-4,1", &board).is_err());
/// ```
pub fn parse_goal_spec(spec: &str, board: &Board) -> Result<Goal, GoalError> {
    let (kind, body) = spec
        .split_once(':')
        .ok_or_else(|| GoalError::Parse(format!("expected 'pos:' or 'adj:' in '{}'", spec)))?;
    let kind = match kind.trim().to_ascii_lowercase().as_str() {
        "pos" | "position" => GoalKind::Position,
        "adj" | "adjacency" | "neighbour" | "neighbor" => GoalKind::Adjacency,
        other => return Err(GoalError::Parse(format!("unknown goal kind '{}'", other))),
    };

    let parts: Vec<&str> = body.split(',').collect();
    if parts.len() != 3 {
        return Err(GoalError::Parse(format!(
            "expected three comma separated values in '{}'",
            body
        )));
    }

    let first = parse_int(parts[0])?;
    let second = match kind {
        GoalKind::Position => parse_int(parts[1])?,
        GoalKind::Adjacency => parse_direction(parts[1])?.code(),
    };
    let third = parse_int(parts[2])?;
    Goal::from_tuple(kind, (first, second, third), board)
}

/// Reads `all` / `and` / `conjunctive` or `any` / `or` / `disjunctive`.
pub fn parse_goal_mode(s: &str) -> Result<GoalMode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "all" | "and" | "conjunctive" => Ok(GoalMode::AllOf),
        "any" | "or" | "disjunctive" => Ok(GoalMode::AnyOf),
        other => Err(format!("unknown goal mode '{}' (use 'all' or 'any')", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&[
            ".  .  .  .",
            "5  .  .  .",
            "2  4  .  .",
            "1  3  6  .",
        ])
        .unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.tile_count(), 6);
        assert_eq!(board.top_tile(0), 5);
        assert_eq!(board.top_tile(2), 6);
        assert!(board.is_empty(3));
    }

    #[test]
    fn test_sample_board_files_parse() {
        for content in [
            include_str!("../boards/three_by_three.txt"),
            include_str!("../boards/four_by_four.txt"),
        ] {
            let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
            let board = board_from_str_array(&lines).unwrap();
            assert_eq!(board.size(), lines.len());
        }
    }

    #[test]
    fn test_board_from_str_array_zero_is_empty() {
        let dotted = board_from_str_array(&[". . .", "2 4 6", "1 3 5"]).unwrap();
        let zeroed = board_from_str_array(&["0 0 0", "2 4 6", "1 3 5"]).unwrap();
        assert_eq!(dotted, zeroed);
    }

    #[test]
    fn test_board_from_str_array_invalid_cell() {
        let result = board_from_str_array(&[". . .", ". . .", "1 X 2"]);
        assert!(matches!(result, Err(BoardError::Parse(msg)) if msg.contains("'X'")));
    }

    #[test]
    fn test_board_from_str_array_ragged_row() {
        let result = board_from_str_array(&[". . .", ". .", "1 2 3"]);
        assert!(matches!(result, Err(BoardError::Parse(msg)) if msg.contains("line 2")));
    }

    #[test]
    fn test_board_from_str_array_bad_tile_count() {
        // Only two tiles on a 3x3 board is below the minimum.
        assert!(matches!(
            board_from_str_array(&[". . .", ". . .", "1 2 ."]),
            Err(BoardError::InvalidDimensions { .. })
        ));
        // Numbering must be 1..=n with no gaps.
        assert_eq!(
            board_from_str_array(&[". . .", ". . .", "1 2 4"]),
            Err(BoardError::TileOutOfRange {
                tile: 4,
                tile_count: 3,
            })
        );
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("Above"), Ok(Direction::Above));
        assert_eq!(parse_direction("b"), Ok(Direction::Below));
        assert_eq!(parse_direction("-3"), Ok(Direction::Left));
        assert_eq!(parse_direction(" right "), Ok(Direction::Right));
        assert_eq!(parse_direction("-7"), Err(GoalError::UnknownDirection(-7)));
        assert!(matches!(parse_direction("up"), Err(GoalError::Parse(_))));
    }

    #[test]
    fn test_parse_goal_spec_errors() {
        let board = Board::new_empty(3, 6).unwrap();
        assert!(matches!(parse_goal_spec("3,0,0", &board), Err(GoalError::Parse(_))));
        assert!(matches!(parse_goal_spec("foo:3,0,0", &board), Err(GoalError::Parse(_))));
        assert!(matches!(parse_goal_spec("pos:3,0", &board), Err(GoalError::Parse(_))));
        assert!(matches!(parse_goal_spec("pos:3,x,0", &board), Err(GoalError::Parse(_))));
        assert!(matches!(
            parse_goal_spec("pos:3,0,9", &board),
            Err(GoalError::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            parse_goal_spec("adj:9,above,1", &board),
            Err(GoalError::TileOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_goal_spec_sentinel_direction() {
        let board = Board::new_empty(3, 6).unwrap();
        assert_eq!(
            parse_goal_spec("adj:4,-2,6", &board),
            Ok(Goal::Adjacency {
                tile: 4,
                direction: Direction::Below,
                other: 6,
            })
        );
    }

    #[test]
    fn test_parse_goal_mode() {
        assert_eq!(parse_goal_mode("ALL"), Ok(GoalMode::AllOf));
        assert_eq!(parse_goal_mode("or"), Ok(GoalMode::AnyOf));
        assert!(parse_goal_mode("some").is_err());
    }
}
