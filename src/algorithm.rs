mod astar;
mod closed;
mod open;

pub use astar::{a_star_search, SearchOptions};
