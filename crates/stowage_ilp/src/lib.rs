pub mod bridge;
pub mod payload;
