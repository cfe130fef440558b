use std::time::Duration;

use tracing::warn;

use crate::problem::knapsack_problem::KnapsackProblem;

use super::{
    deadline::Deadline,
    outcome::SolveOutcome,
    search::SearchContext,
    strategy::Strategy,
};

/// Exhaustive subset enumeration over all 2^n inclusion bitmaps, visited in
/// increasing numeric order.
///
/// Ties on profit are broken by lower weight, then fewer items, then the
/// lexicographically smallest *sorted* id sequence. Sorting before comparing
/// makes the tie-break independent of enumeration order, which an
/// insertion-order comparison would not be.
pub struct BruteForce;

impl Strategy for BruteForce {
    fn name(&self) -> &'static str {
        "BF"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let items = problem.items();
        let n = items.len();
        let capacity = u64::from(problem.capacity());

        let Some(total_subsets) = 1u128.checked_shl(n as u32) else {
            // 2^n is not even representable; the enumeration could never
            // finish inside any realistic budget.
            warn!(n, "catalog too large to enumerate, reporting timeout");
            return SolveOutcome::timed_out(deadline.elapsed());
        };

        let mut ctx = SearchContext::new(items, capacity, problem.lex_ranks(), deadline);

        let mut mask: u128 = 0;
        while mask < total_subsets {
            if ctx.check_deadline() {
                break;
            }

            let mut weight: u64 = 0;
            let mut profit: u64 = 0;
            for (i, item) in items.iter().enumerate() {
                if mask & (1u128 << i) != 0 {
                    weight += u64::from(item.weight());
                    profit += u64::from(item.profit());
                }
            }

            if weight <= capacity {
                ctx.load_mask(mask);
                ctx.offer_current(profit, weight);
            }

            mask += 1;
        }

        if ctx.timed_out() {
            return SolveOutcome::timed_out(deadline.elapsed());
        }

        SolveOutcome::solved(ctx.best_profit(), ctx.best_selection(), deadline.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        solver::outcome::SolveStatus,
        test_utils::{problem, selected_ids},
    };

    use super::*;

    #[test]
    fn test_reference_scenario_optimum() {
        let problem = problem(&[("P1", 10, 60), ("P2", 20, 100), ("P3", 30, 120)], 50);
        let outcome = BruteForce.solve(&problem, Duration::from_secs(10));

        assert_eq!(outcome.status, SolveStatus::Solved);
        assert_eq!(outcome.profit, 220);
        assert_eq!(selected_ids(&outcome), vec!["P2", "P3"]);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let problem = problem(&[("A", 1, 1)], 10);
        let outcome = BruteForce.solve(&problem, Duration::ZERO);

        assert_eq!(outcome.status, SolveStatus::TimedOut);
        assert_eq!(outcome.profit, 0);
        assert!(outcome.selection.is_empty());
    }

    #[test]
    fn test_profit_tie_broken_by_sorted_ids() {
        // Both {A} and {B} reach profit 10 at weight 5; A must win.
        let problem = problem(&[("B", 5, 10), ("A", 5, 10)], 5);
        let outcome = BruteForce.solve(&problem, Duration::from_secs(10));

        assert_eq!(outcome.profit, 10);
        assert_eq!(selected_ids(&outcome), vec!["A"]);
    }

    #[test]
    fn test_all_items_overweight_yields_empty_optimum() {
        let problem = problem(&[("A", 60, 10), ("B", 70, 20)], 50);
        let outcome = BruteForce.solve(&problem, Duration::from_secs(10));

        assert_eq!(outcome.status, SolveStatus::Solved);
        assert_eq!(outcome.profit, 0);
        assert!(outcome.selection.is_empty());
    }
}
