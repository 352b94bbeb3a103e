use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shrdlu_solver::engine::Board;
use shrdlu_solver::goals::{Goal, GoalMode, GoalSet};
use shrdlu_solver::solver::{Solution, Solver};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Compares the random walk and best-first solvers on seeded boards",
    long_about = None
)]
struct Args {
    /// Board edge length
    #[clap(long, default_value_t = 4)]
    size: usize,

    /// Number of tiles
    #[clap(long, default_value_t = 8)]
    tiles: usize,

    /// Number of seeded boards to evaluate
    #[clap(long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board `i` uses `start_seed + i`
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Depth limit for the best-first search
    #[clap(long, default_value_t = 50)]
    depth: usize,

    /// Step budget for the random walk
    #[clap(long, default_value_t = 1000)]
    max_steps: usize,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_moves: usize,
}

impl Tally {
    fn record(&mut self, outcome: &Option<Solution>) {
        if let Some(solution) = outcome {
            self.solved += 1;
            self.total_moves += solution.steps_taken;
        }
    }

    fn average_moves(&self) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.solved as f64
        }
    }
}

fn describe(outcome: &Option<Solution>) -> String {
    match outcome {
        Some(solution) => format!("solved in {} moves", solution.steps_taken),
        None => "no solution".to_string(),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let mut random_tally = Tally::default();
    let mut best_first_tally = Tally::default();

    println!("Starting strategy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx;
        let board = match Board::new_random_with_seed(args.size, args.tiles, seed) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let goals = GoalSet::with_goals(
            GoalMode::AllOf,
            vec![
                Goal::random_position(&board, &mut rng),
                Goal::random_adjacency(&board, &mut rng),
            ],
        );

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);
        for goal in goals.goals() {
            println!("  Goal: {}", goal);
        }

        let mut solver = Solver::new(board, goals);
        let random = solver.random_walk(args.max_steps, &mut rng);
        let best_first = solver.best_first(args.depth);
        let (random, best_first) = match (random, best_first) {
            (Ok(r), Ok(b)) => (r, b),
            (Err(e), _) | (_, Err(e)) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        println!("  Strategy: {:<11}, {}", "Random", describe(&random));
        println!(
            "  Strategy: {:<11}, {} ({} boards visited)",
            "BestFirst",
            describe(&best_first),
            solver.visited_count()
        );
        random_tally.record(&random);
        best_first_tally.record(&best_first);
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    for (name, tally) in [("Random", &random_tally), ("BestFirst", &best_first_tally)] {
        println!(
            "Strategy {:<10}: Solved = {}/{}, Average Moves = {:.2}",
            name,
            tally.solved,
            args.boards,
            tally.average_moves()
        );
    }
    ExitCode::SUCCESS
}
