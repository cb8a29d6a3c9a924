//! Walk machinery: frontier, per-directory scanner, traversal driver.

mod frontier;
mod orchestrator;
mod scanner;

pub use orchestrator::Walker;
