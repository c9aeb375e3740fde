/// Evolution loop, budgets and cancellation
pub mod executor;
/// Similarity metrics between binary grids
pub mod fitness;
/// Progress reporting capability
pub mod observer;
/// Injectable source of random decisions
pub mod random;
