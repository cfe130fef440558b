use std::time::Duration;

use crate::problem::knapsack_problem::KnapsackProblem;

use super::{
    bound::fractional_upper_bound,
    deadline::Deadline,
    outcome::SolveOutcome,
    search::SearchContext,
    strategy::Strategy,
};

/// Recursive include/exclude search over item indices.
///
/// At each node: deadline poll, infeasibility prune, optionally a
/// fractional-relaxation bound prune, and at a leaf a four-level comparison
/// against the best complete assignment so far. Items are visited in catalog
/// order; the bound re-sorts the remaining slice by ratio internally.
pub struct Backtracking {
    use_bound: bool,
}

impl Backtracking {
    /// Pure backtracking: feasibility pruning only.
    pub fn plain() -> Self {
        Backtracking { use_bound: false }
    }

    /// Backtracking with the fractional upper-bound prune.
    pub fn with_bound() -> Self {
        Backtracking { use_bound: true }
    }
}

impl Strategy for Backtracking {
    fn name(&self) -> &'static str {
        if self.use_bound { "BT (bound)" } else { "BT" }
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let capacity = u64::from(problem.capacity());
        let mut ctx = SearchContext::new(problem.items(), capacity, problem.lex_ranks(), deadline);

        descend(&mut ctx, 0, 0, 0, self.use_bound);

        if ctx.timed_out() {
            return SolveOutcome::timed_out(deadline.elapsed());
        }

        SolveOutcome::solved(ctx.best_profit(), ctx.best_selection(), deadline.elapsed())
    }
}

fn descend(ctx: &mut SearchContext<'_>, index: usize, weight: u64, profit: u64, use_bound: bool) {
    if ctx.check_deadline() {
        return;
    }

    if weight > ctx.capacity() {
        return;
    }

    if index == ctx.items().len() {
        ctx.offer_current(profit, weight);
        return;
    }

    if use_bound {
        let bound =
            fractional_upper_bound(ctx.items(), index, weight, profit, ctx.capacity(), false);
        if bound <= ctx.best_profit() as f64 {
            return;
        }
    }

    let item = &ctx.items()[index];
    let (item_weight, item_profit) = (u64::from(item.weight()), u64::from(item.profit()));

    ctx.include(index);
    descend(ctx, index + 1, weight + item_weight, profit + item_profit, use_bound);

    ctx.exclude(index);
    descend(ctx, index + 1, weight, profit, use_bound);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        solver::{brute_force::BruteForce, outcome::SolveStatus},
        test_utils::{problem, selected_ids},
    };

    use super::*;

    #[test]
    fn test_reference_scenario_optimum() {
        let problem = problem(&[("P1", 10, 60), ("P2", 20, 100), ("P3", 30, 120)], 50);

        for solver in [Backtracking::plain(), Backtracking::with_bound()] {
            let outcome = solver.solve(&problem, Duration::from_secs(10));
            assert_eq!(outcome.status, SolveStatus::Solved);
            assert_eq!(outcome.profit, 220);
            assert_eq!(selected_ids(&outcome), vec!["P2", "P3"]);
        }
    }

    #[test]
    fn test_bound_prune_does_not_change_the_answer() {
        let problem = problem(
            &[
                ("A", 12, 40),
                ("B", 2, 10),
                ("C", 1, 20),
                ("D", 1, 20),
                ("E", 4, 10),
                ("F", 1, 2),
            ],
            15,
        );

        let reference = BruteForce.solve(&problem, Duration::from_secs(10));
        let plain = Backtracking::plain().solve(&problem, Duration::from_secs(10));
        let bounded = Backtracking::with_bound().solve(&problem, Duration::from_secs(10));

        assert_eq!(plain.profit, reference.profit);
        assert_eq!(bounded.profit, reference.profit);
        assert_eq!(selected_ids(&plain), selected_ids(&bounded));
    }

    #[test]
    fn test_zero_budget_times_out() {
        let problem = problem(&[("A", 1, 1)], 10);
        let outcome = Backtracking::plain().solve(&problem, Duration::ZERO);

        assert_eq!(outcome.status, SolveStatus::TimedOut);
        assert_eq!(outcome.profit, 0);
        assert!(outcome.selection.is_empty());
    }
}
