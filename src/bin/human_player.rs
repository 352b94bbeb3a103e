use rand::rngs::ThreadRng;
use shrdlu_solver::engine::{Action, Board, Game, MAX_SIZE};
use shrdlu_solver::goals::{Goal, GoalKind, GoalMode, GoalSet};
use shrdlu_solver::solver::{Solution, Solver};
use std::io::{self, Write}; // For input/output

const RANDOM_WALK_STEPS: usize = 1000;
const QUIT: i64 = 99;

/// Prints `prompt` and reads one integer, asking again until one is given.
///
/// Returns `None` once stdin is closed.
fn read_number(prompt: &str) -> Option<i64> {
    loop {
        print!("{}", prompt);
        io::stdout().flush().ok()?;

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }
        match input.trim().parse::<i64>() {
            Ok(n) => return Some(n),
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// Reads numbers until one satisfies `accept`.
fn read_number_where(prompt: &str, accept: impl Fn(i64) -> bool) -> Option<i64> {
    loop {
        let n = read_number(prompt)?;
        if accept(n) {
            return Some(n);
        }
        println!("Try again.");
    }
}

/// Narrows a typed number to a goal tuple component.
fn tuple_component(n: i64) -> Result<i32, String> {
    i32::try_from(n).map_err(|_| format!("{} is out of range", n))
}

/// Like [`read_number`], but asks again for numbers that do not fit an `i32`.
fn read_component(prompt: &str) -> Option<i32> {
    loop {
        match tuple_component(read_number(prompt)?) {
            Ok(n) => return Some(n),
            Err(e) => println!("{}. Try again.", e),
        }
    }
}

fn read_tuple() -> Option<(i32, i32, i32)> {
    let a = read_component("Provide the first number: ")?;
    println!("*** Directions are (-1 : above, -2 : below, -3 : left, -4 : right) ***");
    println!("*** If you chose a neighbour goal, select a direction. ***");
    let b = read_component("Provide the row or direction: ")?;
    let c = read_component("Provide the final column (or other number if neighbour goal): ")?;
    Some((a, b, c))
}

/// Asks for the board size and tile count, then builds a random or hand-placed board.
fn setup_board() -> Option<Board> {
    let choice = read_number_where("Random board (1) or custom board (2)?\n$ ", |n| {
        n == 1 || n == 2
    })?;

    let size = read_number_where("What size is the board?\n$ ", |n| {
        n >= 3 && n as usize <= MAX_SIZE
    })? as usize;
    let tiles = loop {
        let n = read_number("How many tiles are there?\n$ ")? as usize;
        if Board::new_empty(size, n).is_ok() {
            break n;
        }
        println!("Use between {} and {} tiles.", size, size * size - size);
    };

    if choice == 1 {
        return Board::new_random(size, tiles, &mut rand::thread_rng()).ok();
    }

    let mut board = Board::new_empty(size, tiles).ok()?;
    for tile in 1..=tiles as u8 {
        loop {
            println!("{}\n", board);
            let prompt = format!("Which column should {} go to?\n$ ", tile);
            let col = read_number_where(&prompt, |n| n >= 0 && (n as usize) < size)? as usize;
            match board.push_to_col(tile, col) {
                Ok(()) => break,
                Err(e) => println!("{}. Try again.", e),
            }
        }
    }
    Some(board)
}

fn setup_goals(board: &Board, rng: &mut ThreadRng) -> Option<GoalSet> {
    let mode = read_number_where("Conjunctive goals (1) or Disjunctive goals (2)?\n$ ", |n| {
        n == 1 || n == 2
    })?;
    let mut goals = GoalSet::new(if mode == 1 { GoalMode::AllOf } else { GoalMode::AnyOf });

    loop {
        let menu = "1. Manual atom goal\n2. Manual neighbour goal\n\
                    3. Auto atom goal\n4. Auto neighbour goal\n$ ";
        let choice = read_number_where(menu, |n| (1..=4).contains(&n))?;
        let goal = match choice {
            1 => Goal::from_tuple(GoalKind::Position, read_tuple()?, board),
            2 => Goal::from_tuple(GoalKind::Adjacency, read_tuple()?, board),
            3 => Ok(Goal::random_position(board, rng)),
            _ => Ok(Goal::random_adjacency(board, rng)),
        };

        match goal {
            Ok(goal) => {
                println!("Successfully added the goal: {}", goal);
                goals.add_goal(goal);
            }
            Err(e) => {
                println!("Invalid Goal provided: {}", e);
                continue;
            }
        }

        let next = read_number_where("Add another goal (1) or exit (99)?\n$ ", |n| {
            n == 1 || n == QUIT
        })?;
        if next == QUIT {
            return Some(goals);
        }
    }
}

fn print_solution(solver: &Solver, solution: &Solution, method: &str) {
    println!("We found a solution using {}! Printing the plan...", method);
    if let Some(goal) = solver.goals().satisfying_goal(&solution.final_board) {
        println!("The satisfied goal is: {}", goal);
    }
    for action in &solution.plan {
        println!("{}", action.describe());
    }
    println!("\n{}\n", solution.final_board);
}

fn manual_play(board: Board, goals: GoalSet) -> Option<()> {
    let mut game = Game::new(board, goals);
    println!("{}\n", game.board());

    while !game.is_won() {
        let from = read_number("From column: ")?;
        let to = read_number("To column: ")?;
        if from < 0 || to < 0 {
            println!("Invalid move: columns are never negative.");
            continue;
        }
        match game.play(Action::new(from as usize, to as usize)) {
            Ok(()) => println!("{}\n", game.board()),
            Err(e) => println!("Invalid move: {}.", e),
        }
    }

    println!("Congratulation you won in {} moves!\n", game.moves().len());
    Some(())
}

fn random_play(board: Board, goals: GoalSet, rng: &mut ThreadRng) {
    println!("{}\n", board);
    let mut solver = Solver::new(board, goals);
    match solver.random_walk(RANDOM_WALK_STEPS, rng) {
        Ok(Some(solution)) => print_solution(&solver, &solution, "random actions"),
        Ok(None) => println!("No solution found :(\n"),
        Err(e) => println!("Search aborted: {}\n", e),
    }
}

fn best_first_play(board: Board, goals: GoalSet) -> Option<()> {
    println!("For smaller boards, lower max recursions work well. (Use max of 50)");
    let depth = read_number_where("How many max recursions?\n$ ", |n| n >= 1)? as usize;

    println!("{}\n", board);
    let mut solver = Solver::new(board, goals);
    match solver.best_first(depth) {
        Ok(Some(solution)) => print_solution(&solver, &solution, "Best-first-search"),
        Ok(None) => println!("No solution found :(\n"),
        Err(e) => println!("Search aborted: {}\n", e),
    }
    Some(())
}

fn main() {
    env_logger::init();
    let mut rng = rand::thread_rng();
    println!("--- Mini SHRDLU ---\n");

    loop {
        let menu = "Please select a game mode...\n1. Manual game\n2. Random game\n\
                    3. AI game (best-first-search)\n99. Exit\n$ ";
        let Some(choice) = read_number(menu) else {
            break;
        };
        if choice == QUIT {
            println!("Thank you for playing.\n");
            break;
        }
        if !(1..=3).contains(&choice) {
            println!("Please select an option from the list.\n");
            continue;
        }

        let Some(board) = setup_board() else { break };
        let Some(goals) = setup_goals(&board, &mut rng) else { break };

        let finished = match choice {
            1 => {
                println!("Starting manual game...\n");
                manual_play(board, goals)
            }
            2 => {
                println!("Starting random game...\n");
                random_play(board, goals, &mut rng);
                Some(())
            }
            _ => best_first_play(board, goals),
        };
        if finished.is_none() {
            break;
        }
    }
}
