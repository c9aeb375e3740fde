//! Hill-climbing evolution of a binary pixel grid toward a monochrome target
//!
//! A grid of random noise is repeatedly mutated one pixel at a time. A flip
//! survives only if it makes the grid strictly more similar to the target, so
//! fitness climbs monotonically until the requested similarity is reached.

#![forbid(unsafe_code)]

/// Fitness evaluation, random mutation and the evolution loop
pub mod algorithm;
/// Image decoding and encoding, progress reporting, CLI and error handling
pub mod io;
/// Packed binary grid data structure
pub mod spatial;

pub use algorithm::executor::{EvolutionConfig, EvolutionOutcome, Evolver, evolve, evolve_with};
pub use algorithm::fitness::{FitnessConvention, score};
pub use io::error::{EvolutionError, Result};
pub use spatial::BinaryGrid;
