use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shrdlu_solver::engine::{Board, DEFAULT_SIZE, DEFAULT_TILES};
use shrdlu_solver::goals::{Goal, GoalMode, GoalSet};
use shrdlu_solver::solver::Solver;
use shrdlu_solver::utils::{board_from_str_array, parse_goal_mode, parse_goal_spec};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Greedy heuristic search with duplicate-state pruning
    BestFirst,
    /// Random legal moves, never undoing the previous one
    Random,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board edge length (ignored when a board file is given)
    #[clap(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Number of tiles (ignored when a board file is given)
    #[clap(long, default_value_t = DEFAULT_TILES)]
    tiles: usize,

    /// Seed for the random board, random goals and random walk
    #[clap(long)]
    seed: Option<u64>,

    /// Goal as `pos:T,R,C` or `adj:T,DIR,U` (repeatable)
    #[clap(short, long = "goal")]
    goals: Vec<String>,

    /// Number of random position goals to add
    #[clap(long, default_value_t = 0)]
    random_position: usize,

    /// Number of random adjacency goals to add
    #[clap(long, default_value_t = 0)]
    random_adjacency: usize,

    /// How the goals combine: `all` (and, conjunctive) or `any` (or, disjunctive)
    #[clap(long, value_parser = parse_goal_mode, default_value = "all")]
    mode: GoalMode,

    /// Which solver to run
    #[clap(long, value_enum, default_value_t = Strategy::BestFirst)]
    strategy: Strategy,

    /// Depth limit for the best-first search
    #[clap(short, long, default_value_t = 50)]
    depth: usize,

    /// Step budget for the random walk
    #[clap(long, default_value_t = 1000)]
    max_steps: usize,

    /// Path to a board file (one row per line, ceiling first, `.` for empty)
    board_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    board_from_str_array(&lines).map_err(|e| format!("Invalid board format: {}", e))
}

fn build_goals(args: &Args, board: &Board, rng: &mut SmallRng) -> Result<GoalSet, String> {
    let mut goals = GoalSet::new(args.mode);

    for spec in &args.goals {
        let goal = parse_goal_spec(spec, board)
            .map_err(|e| format!("Invalid goal '{}': {}", spec, e))?;
        goals.add_goal(goal);
    }
    for _ in 0..args.random_position {
        goals.add_goal(Goal::random_position(board, rng));
    }
    for _ in 0..args.random_adjacency {
        goals.add_goal(Goal::random_adjacency(board, rng));
    }
    if goals.is_empty() {
        goals.add_goal(Goal::random_position(board, rng));
    }
    Ok(goals)
}

fn run(args: Args) -> Result<(), String> {
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let board = match &args.board_file {
        Some(path) => {
            let board = read_board_file(path)?;
            println!("Loaded board from {}\n", path.display());
            board
        }
        None => Board::new_random(args.size, args.tiles, &mut rng).map_err(|e| e.to_string())?,
    };
    let goals = build_goals(&args, &board, &mut rng)?;
    let mut solver = Solver::new(board, goals);

    println!("Initial board state:\n{}\n", solver.board());
    println!("Goals ({}, {} total):", solver.goals().mode(), solver.goals().len());
    for goal in solver.goals().goals() {
        println!("  {}", goal);
    }
    println!();
    let outcome = match args.strategy {
        Strategy::BestFirst => {
            println!("Searching with best-first, depth limit {}...\n", args.depth);
            solver.best_first(args.depth)
        }
        Strategy::Random => {
            println!("Searching with random moves, at most {} steps...\n", args.max_steps);
            solver.random_walk(args.max_steps, &mut rng)
        }
    }
    .map_err(|e| e.to_string())?;

    match outcome {
        Some(solution) => {
            println!("Solution found:\n");
            if let Some(goal) = solver.goals().satisfying_goal(&solution.final_board) {
                println!("The satisfied goal is: {}", goal);
            }
            println!("Moves ({}):", solution.steps_taken);
            if solution.plan.is_empty() {
                println!("  No moves made.");
            } else {
                for (i, action) in solution.plan.iter().enumerate() {
                    println!("  Move {}: {}", i + 1, action.describe());
                }
            }
            println!("\nFinal board state:\n{}\n", solution.final_board);
        }
        None => println!("No solution found.\n"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
