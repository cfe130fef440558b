use std::time::Duration;

use crate::problem::knapsack_problem::KnapsackProblem;

use super::{
    backtracking::Backtracking,
    branch_and_bound::BranchAndBound,
    brute_force::BruteForce,
    deadline::DEFAULT_TIMEOUT,
    dp::{bottom_up::BottomUpDp, entry::TieBreak, rolling::RollingDp, top_down::TopDownDp},
    outcome::SolveOutcome,
};

/// The seam every solver sits behind, including the external ILP bridge.
///
/// A strategy is synchronous and single-threaded; the timeout is its entire
/// resource budget for one call.
pub trait Strategy {
    fn name(&self) -> &'static str;

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome;

    fn solve_default(&self, problem: &KnapsackProblem) -> SolveOutcome {
        self.solve(problem, DEFAULT_TIMEOUT)
    }
}

/// Every strategy that reports a provably optimal profit when it completes.
///
/// The rolling-row DP belongs here for the profit value even though it never
/// reports a selection.
pub fn exact_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(BruteForce),
        Box::new(Backtracking::plain()),
        Box::new(Backtracking::with_bound()),
        Box::new(BranchAndBound),
        Box::new(BottomUpDp::new(TieBreak::ProfitOnly)),
        Box::new(BottomUpDp::new(TieBreak::Lexicographic)),
        Box::new(TopDownDp::new(TieBreak::ProfitOnly)),
        Box::new(TopDownDp::new(TieBreak::Lexicographic)),
        Box::new(RollingDp),
    ]
}
