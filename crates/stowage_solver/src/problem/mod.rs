pub mod container;
pub mod item;
pub mod knapsack_problem;
