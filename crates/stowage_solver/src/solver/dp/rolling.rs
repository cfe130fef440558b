use std::time::Duration;

use crate::{
    problem::knapsack_problem::KnapsackProblem,
    solver::{deadline::Deadline, outcome::SolveOutcome, strategy::Strategy},
};

use super::table::TableStats;

/// Capacity-only rolling-array DP: two capacity-sized profit rows, swapped
/// after each item.
///
/// O(capacity) memory instead of O(n x capacity), at the price of all
/// reconstruction state: this solver reports the optimal profit and an
/// empty selection, demonstrating the space/information trade-off.
pub struct RollingDp;

impl Strategy for RollingDp {
    fn name(&self) -> &'static str {
        "DP (rolling rows)"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let capacity = problem.capacity() as usize;
        let mut prev = vec![0u64; capacity + 1];
        let mut curr = vec![0u64; capacity + 1];

        for item in problem.items() {
            let weight = item.weight() as usize;
            for w in 0..=capacity {
                if deadline.expired() {
                    return SolveOutcome::timed_out(deadline.elapsed());
                }
                curr[w] = if weight <= w {
                    let include = u64::from(item.profit()) + prev[w - weight];
                    include.max(prev[w])
                } else {
                    prev[w]
                };
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        let stats = TableStats {
            entries: 2 * (capacity + 1),
            bytes: 2 * (capacity + 1) * std::mem::size_of::<u64>(),
        };

        // After the final swap `prev` holds the last filled row.
        SolveOutcome::solved(prev[capacity], Vec::new(), deadline.elapsed())
            .with_table_stats(stats)
    }
}
