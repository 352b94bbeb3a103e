//! Solvers that drive a board towards a [`GoalSet`].
//!
//! - `random_walk`: uniformly random legal moves, never immediately undoing
//!   the previous one, until the goals hold or the step budget runs out.
//! - `best_first`: a depth-bounded greedy search. Each node's children are
//!   scored by the goal heuristic of the board they lead to and tried best
//!   first. A fingerprint set shared by the whole search prunes every board
//!   that was generated before, so the search trades completeness for speed.
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::engine::{Action, Board, Fingerprint};
use crate::error::BoardError;
use crate::goals::GoalSet;

/// Represents a solution found by a solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Moves to replay from the initial board, in order.
    pub plan: Vec<Action>,
    /// The board after the last move of the plan. It satisfies the goals.
    pub final_board: Board,
    /// Number of moves in the plan.
    pub steps_taken: usize,
}

/// Owns the state of one search: the starting board, the goals, the
/// visited fingerprints and the plan being built.
///
/// Each run starts from a fresh visited set and an empty plan.
#[derive(Debug)]
pub struct Solver {
    root: Board,
    goals: GoalSet,
    visited: HashSet<Fingerprint>,
    plan: Vec<Action>,
    nodes_expanded: usize,
}

impl Solver {
    pub fn new(board: Board, goals: GoalSet) -> Self {
        Solver {
            root: board,
            goals,
            visited: HashSet::new(),
            plan: Vec::new(),
            nodes_expanded: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.root
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    /// Number of distinct boards recorded by the last best-first run.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of boards whose moves were generated by the last best-first run.
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.plan.clear();
        self.nodes_expanded = 0;
    }

    fn solution(&self, final_board: Board) -> Solution {
        Solution {
            plan: self.plan.clone(),
            steps_taken: self.plan.len(),
            final_board,
        }
    }

    /// Plays random legal moves until the goals hold or `max_steps` moves were made.
    ///
    /// The reverse of the previous move is excluded from each draw unless it
    /// is the only legal move.
    ///
    /// # Returns
    /// * `Ok(Some(solution))` when the goals hold, possibly after zero moves.
    /// * `Ok(None)` when the step budget ran out.
    pub fn random_walk<R: Rng>(
        &mut self,
        max_steps: usize,
        rng: &mut R,
    ) -> Result<Option<Solution>, BoardError> {
        self.reset();
        let mut board = self.root.clone();
        let mut previous: Option<Action> = None;

        while self.plan.len() < max_steps && !self.goals.is_satisfied(&board) {
            let moves = board.enumerate_moves();
            let forward: Vec<Action> = moves
                .iter()
                .copied()
                .filter(|a| previous.map_or(true, |p| !a.is_reverse_of(&p)))
                .collect();
            let pool = if forward.is_empty() { &moves } else { &forward };
            let Some(&choice) = pool.choose(rng) else {
                debug!("random walk stuck: no legal moves");
                break;
            };

            board.perform_action(&choice)?;
            self.plan.push(choice);
            previous = Some(choice);
        }

        if self.goals.is_satisfied(&board) {
            info!("random walk solved in {} moves", self.plan.len());
            Ok(Some(self.solution(board)))
        } else {
            info!("random walk gave up after {} moves", self.plan.len());
            Ok(None)
        }
    }

    /// Runs the greedy best-first search with at most `max_depth` moves.
    ///
    /// A root that already satisfies the goals yields an empty plan, whatever
    /// the depth. Otherwise a depth of `0` always fails.
    ///
    /// # Returns
    /// * `Ok(Some(solution))` with the accepted plan and winning board.
    /// * `Ok(None)` if the depth budget or the unpruned candidates ran out.
    pub fn best_first(&mut self, max_depth: usize) -> Result<Option<Solution>, BoardError> {
        self.reset();
        let root = self.root.clone();
        self.visited.insert(root.fingerprint());

        if self.goals.is_satisfied(&root) {
            info!("initial board already satisfies the goals");
            return Ok(Some(self.solution(root)));
        }

        debug!("best-first search with depth limit {}", max_depth);
        let outcome = self.expand(&root, max_depth)?;
        info!(
            "best-first search {} after expanding {} boards ({} visited)",
            if outcome.is_some() { "succeeded" } else { "failed" },
            self.nodes_expanded,
            self.visited.len()
        );
        Ok(outcome.map(|final_board| self.solution(final_board)))
    }

    fn expand(
        &mut self,
        node: &Board,
        depth_remaining: usize,
    ) -> Result<Option<Board>, BoardError> {
        if depth_remaining == 0 {
            return Ok(None);
        }
        self.nodes_expanded += 1;

        for (action, child) in self.scored_children(node)? {
            self.plan.push(action);
            if self.goals.is_satisfied(&child) {
                return Ok(Some(child));
            }
            if let Some(winner) = self.expand(&child, depth_remaining - 1)? {
                return Ok(Some(winner));
            }
            self.plan.pop();
        }
        Ok(None)
    }

    /// Children of `node` not seen before, best heuristic first.
    ///
    /// Every returned child is entered into the visited set here, so a
    /// sibling subtree can never reach it again.
    fn scored_children(&mut self, node: &Board) -> Result<Vec<(Action, Board)>, BoardError> {
        let mut children = Vec::new();
        for action in node.enumerate_moves() {
            let mut child = node.clone();
            child.perform_action(&action)?;
            if !self.visited.insert(child.fingerprint()) {
                continue;
            }
            let scored = self.goals.score_action(&child, action);
            children.push((scored, child));
        }
        // Stable: ties keep move enumeration order.
        children.sort_by(|(a, _), (b, _)| a.priority_cmp(b));
        Ok(children)
    }
}
