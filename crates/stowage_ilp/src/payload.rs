use serde::{Deserialize, Serialize};

use stowage_solver::problem::knapsack_problem::KnapsackProblem;

/// Wire format handed to the external solver.
#[derive(Debug, Serialize)]
pub struct IlpInput<'a> {
    pub capacity: u32,
    pub timeout_ms: u64,
    pub items: Vec<IlpInputItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct IlpInputItem<'a> {
    pub id: &'a str,
    pub weight: u32,
    pub profit: u32,
}

impl<'a> IlpInput<'a> {
    pub fn from_problem(problem: &'a KnapsackProblem, timeout_ms: u64) -> Self {
        IlpInput {
            capacity: problem.capacity(),
            timeout_ms,
            items: problem
                .items()
                .iter()
                .map(|item| IlpInputItem {
                    id: item.id(),
                    weight: item.weight(),
                    profit: item.profit(),
                })
                .collect(),
        }
    }
}

/// Wire format the external solver writes back.
#[derive(Debug, Deserialize)]
pub struct IlpOutput {
    pub total_profit: u64,
    pub selected_ids: Vec<String>,
}
