use std::time::Duration;

use crate::{
    problem::knapsack_problem::KnapsackProblem,
    solver::{deadline::Deadline, outcome::SolveOutcome, strategy::Strategy},
};

use super::{
    dense_table::DenseTable,
    entry::{Entry, TieBreak},
    table::DpTable,
};

/// Bottom-up DP over the dense table.
///
/// Fills every (item index, residual capacity) cell in increasing order,
/// then reconstructs the selection by walking backward from (n, capacity):
/// an item is selected exactly when re-applying its include-step reproduces
/// the stored entry.
pub struct BottomUpDp {
    tie_break: TieBreak,
}

impl BottomUpDp {
    pub fn new(tie_break: TieBreak) -> Self {
        BottomUpDp { tie_break }
    }
}

impl Default for BottomUpDp {
    fn default() -> Self {
        BottomUpDp::new(TieBreak::ProfitOnly)
    }
}

impl Strategy for BottomUpDp {
    fn name(&self) -> &'static str {
        "DP (dense table)"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let items = problem.items();
        let ranks = problem.lex_ranks();
        let n = items.len() as u32;
        let capacity = problem.capacity();

        let mut table = DenseTable::new(n, capacity, self.tie_break);

        for w in 0..=capacity {
            table.set(0, w, Entry::zero(self.tie_break));
        }

        for i in 1..=n {
            let item = &items[i as usize - 1];
            for w in 0..=capacity {
                if deadline.expired() {
                    return SolveOutcome::timed_out(deadline.elapsed())
                        .with_table_stats(table.stats());
                }

                let cell = if item.weight() <= w {
                    let include = table
                        .get(i - 1, w - item.weight())
                        .with_item(item, ranks[i as usize - 1]);
                    let exclude = table.get(i - 1, w);
                    if include > *exclude { include } else { exclude.clone() }
                } else {
                    table.get(i - 1, w).clone()
                };

                table.set(i, w, cell);
            }
        }

        let profit = table.get(n, capacity).profit();
        let mut selected = Vec::new();
        let (mut i, mut w) = (n, capacity);
        while i > 0 && w > 0 {
            let item = &items[i as usize - 1];
            let included = item.weight() <= w
                && table
                    .get(i - 1, w - item.weight())
                    .with_item(item, ranks[i as usize - 1])
                    == *table.get(i, w);
            if included {
                selected.push(item.clone());
                w -= item.weight();
            }
            i -= 1;
        }
        selected.reverse();

        SolveOutcome::solved(profit, selected, deadline.elapsed()).with_table_stats(table.stats())
    }
}
