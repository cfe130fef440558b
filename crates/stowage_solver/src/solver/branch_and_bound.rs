use std::time::Duration;

use fixedbitset::FixedBitSet;
use tracing::debug;

use crate::problem::{
    item::Item,
    knapsack_problem::{KnapsackProblem, id_ranks},
};

use super::{
    bound::fractional_upper_bound,
    deadline::Deadline,
    greedy::greedy_order,
    outcome::SolveOutcome,
    search::SearchContext,
    strategy::Strategy,
};

/// Pre-sort applied to the catalog before one branch-and-bound phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    /// Descending profit. Wins when a single dominant, heavy item decides
    /// the instance.
    Value,
    /// Descending profit/weight ratio. The usual choice; also the order the
    /// fractional bound wants, so the bound can consume the slice as-is.
    Ratio,
}

impl SortOrder {
    fn apply(self, items: &mut [Item]) {
        match self {
            SortOrder::Value => items.sort_by(|a, b| b.profit().cmp(&a.profit())),
            // Same ordering the greedy pass uses, so equal ratios still sort
            // deterministically (profit desc, then id asc).
            SortOrder::Ratio => items.sort_by(greedy_order),
        }
    }

    fn other(self) -> Self {
        match self {
            SortOrder::Value => SortOrder::Ratio,
            SortOrder::Ratio => SortOrder::Value,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortOrder::Value => "value",
            SortOrder::Ratio => "ratio",
        }
    }
}

/// Backtracking plus a fractional upper-bound prune, a greedy seed and a
/// dual-heuristic retry.
///
/// Neither pre-sort order dominates the other across input shapes, so the
/// budget is hedged: phase 1 runs the heuristically chosen order for half
/// the budget; phase 2, entered only if phase 1 timed out, restarts from
/// scratch under the other order for the remainder. Only both phases timing
/// out reports overall failure.
pub struct BranchAndBound;

/// Value-first ordering pays off when the most profitable item is both
/// heavy (>= 80% of capacity) and dominant (>= 50% of total profit).
fn prefers_value_order(problem: &KnapsackProblem) -> bool {
    let total_profit = problem.total_profit() as f64;
    let Some(richest) = problem.items().iter().max_by_key(|item| item.profit()) else {
        return false;
    };

    f64::from(richest.weight()) >= 0.8 * f64::from(problem.capacity())
        && f64::from(richest.profit()) >= 0.5 * total_profit
}

impl Strategy for BranchAndBound {
    fn name(&self) -> &'static str {
        "BB"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let overall = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(overall.elapsed());
        }

        let first_order = if prefers_value_order(problem) {
            SortOrder::Value
        } else {
            SortOrder::Ratio
        };

        // Phase 1: heuristic order, half the budget. Phase 2 only runs after
        // a phase-1 timeout, under the other order, on whatever is left.
        let phases = [(first_order, timeout / 2), (first_order.other(), Duration::MAX)];

        for (phase, (order, budget)) in phases.into_iter().enumerate() {
            let budget = budget.min(overall.remaining());
            debug!(phase, order = order.label(), ?budget, "starting search phase");

            if let Some(outcome) = run_phase(problem, order, budget, &overall) {
                return outcome;
            }
        }

        SolveOutcome::dual_timeout(overall.elapsed())
    }
}

/// One complete search under one ordering. Returns None on timeout.
fn run_phase(
    problem: &KnapsackProblem,
    order: SortOrder,
    budget: Duration,
    overall: &Deadline,
) -> Option<SolveOutcome> {
    let mut items = problem.items().to_vec();
    order.apply(&mut items);
    let ranks = id_ranks(&items);

    let capacity = u64::from(problem.capacity());
    let mut ctx = SearchContext::new(&items, capacity, &ranks, Deadline::new(budget));

    seed_with_greedy(&mut ctx);
    descend(&mut ctx, 0, 0, 0, order == SortOrder::Ratio);

    if ctx.timed_out() {
        return None;
    }

    Some(SolveOutcome::solved(
        ctx.best_profit(),
        ctx.best_selection(),
        overall.elapsed(),
    ))
}

/// Primes the best-so-far bound with a single greedy pass over the already
/// sorted catalog, improving early pruning.
fn seed_with_greedy(ctx: &mut SearchContext<'_>) {
    let mut picked = FixedBitSet::with_capacity(ctx.items().len());
    let mut weight: u64 = 0;
    let mut profit: u64 = 0;

    for (i, item) in ctx.items().iter().enumerate() {
        if weight + u64::from(item.weight()) <= ctx.capacity() {
            weight += u64::from(item.weight());
            profit += u64::from(item.profit());
            picked.set(i, true);
        }
    }

    ctx.offer_seed(picked, profit, weight);
}

fn descend(ctx: &mut SearchContext<'_>, index: usize, weight: u64, profit: u64, ratio_sorted: bool) {
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

    let bound =
        fractional_upper_bound(ctx.items(), index, weight, profit, ctx.capacity(), ratio_sorted);
    if bound <= ctx.best_profit() as f64 {
        return;
    }

    let item = &ctx.items()[index];
    let (item_weight, item_profit) = (u64::from(item.weight()), u64::from(item.profit()));

    ctx.include(index);
    descend(ctx, index + 1, weight + item_weight, profit + item_profit, ratio_sorted);

    ctx.exclude(index);
    descend(ctx, index + 1, weight, profit, ratio_sorted);
}
