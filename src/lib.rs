pub mod algorithm;
pub mod common;
pub mod config;
pub mod heuristic;
pub mod map;
pub mod scenario;
pub mod stat;
pub mod state;
