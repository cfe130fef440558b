use rand::Rng;

use crate::{
    problem::{container::Container, item::Item, knapsack_problem::KnapsackProblem},
    solver::outcome::SolveOutcome,
};

pub(crate) fn problem(items: &[(&str, u32, u32)], capacity: u32) -> KnapsackProblem {
    let items = items
        .iter()
        .map(|&(id, weight, profit)| Item::new(id, weight, profit))
        .collect();
    KnapsackProblem::new(items, Container::new(capacity)).unwrap()
}

pub(crate) fn random_problem(
    rng: &mut impl Rng,
    n: usize,
    max_weight: u32,
    max_profit: u32,
    capacity: u32,
) -> KnapsackProblem {
    let items = (0..n)
        .map(|i| {
            Item::new(
                format!("R{i:03}"),
                rng.random_range(1..=max_weight),
                rng.random_range(1..=max_profit),
            )
        })
        .collect();
    KnapsackProblem::new(items, Container::new(capacity)).unwrap()
}

/// Selected item ids in sorted order, for order-independent assertions.
pub(crate) fn selected_ids(outcome: &SolveOutcome) -> Vec<&str> {
    let mut ids: Vec<&str> = outcome.selection.iter().map(|item| item.id()).collect();
    ids.sort_unstable();
    ids
}
