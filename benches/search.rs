use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shrdlu_solver::engine::Board;
use shrdlu_solver::goals::{Goal, GoalMode, GoalSet};
use shrdlu_solver::solver::Solver;
use std::hint::black_box;

fn corpus() -> Vec<(Board, GoalSet)> {
    let mut rng = SmallRng::seed_from_u64(1337);
    (0..16)
        .map(|seed| {
            let board = Board::new_random_with_seed(4, 10, seed).unwrap();
            let goals = GoalSet::with_goals(
                GoalMode::AllOf,
                vec![Goal::random_position(&board, &mut rng)],
            );
            (board, goals)
        })
        .collect()
}

fn bench_best_first(c: &mut Criterion) {
    let cases = corpus();
    c.bench_function("solver/best_first_depth_30", |bch| {
        bch.iter(|| {
            let mut solved = 0usize;
            for (board, goals) in &cases {
                let mut solver = Solver::new(board.clone(), goals.clone());
                if solver.best_first(30).unwrap().is_some() {
                    solved += 1;
                }
            }
            black_box(solved)
        })
    });
}

fn bench_random_walk(c: &mut Criterion) {
    let cases = corpus();
    c.bench_function("solver/random_walk_1000", |bch| {
        let mut rng = SmallRng::seed_from_u64(7);
        bch.iter(|| {
            let mut solved = 0usize;
            for (board, goals) in &cases {
                let mut solver = Solver::new(board.clone(), goals.clone());
                if solver.random_walk(1000, &mut rng).unwrap().is_some() {
                    solved += 1;
                }
            }
            black_box(solved)
        })
    });
}

fn bench_enumerate_moves(c: &mut Criterion) {
    let boards: Vec<Board> = corpus().into_iter().map(|(b, _)| b).collect();
    c.bench_function("engine/enumerate_moves", |bch| {
        bch.iter(|| {
            let total: usize = boards.iter().map(|b| b.enumerate_moves().len()).sum();
            black_box(total)
        })
    });
}

criterion_group!(search, bench_best_first, bench_random_walk, bench_enumerate_moves);
criterion_main!(search);
