use std::time::Duration;

use crate::problem::{item::Item, knapsack_problem::KnapsackProblem};

use super::{deadline::Deadline, outcome::SolveOutcome, strategy::Strategy};

/// Ratio-greedy single-pass selection.
///
/// An approximation baseline, not an exact solver: unlike fractional
/// knapsack, leftover capacity cannot be filled by splitting the last item,
/// so the result may be arbitrarily far from the optimum.
pub struct GreedyApprox;

/// Descending ratio, ties by descending profit, then ascending id.
pub(crate) fn greedy_order(a: &Item, b: &Item) -> std::cmp::Ordering {
    b.ratio()
        .total_cmp(&a.ratio())
        .then_with(|| b.profit().cmp(&a.profit()))
        .then_with(|| a.id().cmp(b.id()))
}

impl Strategy for GreedyApprox {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let mut sorted = problem.items().to_vec();
        sorted.sort_by(greedy_order);

        let mut remaining = u64::from(problem.capacity());
        let mut profit: u64 = 0;
        let mut selection = Vec::new();

        for item in sorted {
            if deadline.expired() {
                return SolveOutcome::timed_out(deadline.elapsed());
            }
            if u64::from(item.weight()) <= remaining {
                remaining -= u64::from(item.weight());
                profit += u64::from(item.profit());
                selection.push(item);
            }
        }

        SolveOutcome::solved(profit, selection, deadline.elapsed())
    }
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
    fn test_documented_approximation_gap() {
        // Ratios: A 6.0, B 4.5, C 4.0. Greedy takes A then B (profit 150)
        // and C no longer fits; the exact optimum is {B, C} = 210.
        let problem = problem(&[("A", 10, 60), ("B", 20, 90), ("C", 30, 120)], 50);

        let greedy = GreedyApprox.solve(&problem, Duration::from_secs(10));
        assert_eq!(greedy.status, SolveStatus::Solved);
        assert_eq!(greedy.profit, 150);
        assert_eq!(selected_ids(&greedy), vec!["A", "B"]);

        let exact = BruteForce.solve(&problem, Duration::from_secs(10));
        assert_eq!(exact.profit, 210);
        assert_eq!(selected_ids(&exact), vec!["B", "C"]);
    }

    #[test]
    fn test_sort_ties_fall_back_to_profit_then_id() {
        // Equal ratios: the heavier, more profitable item goes first; equal
        // items are ordered by id.
        let problem = problem(&[("X", 10, 40), ("Y", 20, 80), ("Z", 10, 40)], 20);
        let outcome = GreedyApprox.solve(&problem, Duration::from_secs(10));

        assert_eq!(outcome.profit, 80);
        assert_eq!(selected_ids(&outcome), vec!["Y"]);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let problem = problem(&[("A", 1, 1)], 10);
        let outcome = GreedyApprox.solve(&problem, Duration::ZERO);

        assert_eq!(outcome.status, SolveStatus::TimedOut);
        assert_eq!(outcome.profit, 0);
    }
}
