pub mod dice;
pub mod models;
