//! Periodic progress reporting out of the evolution loop

use crate::io::error::Result;
use crate::spatial::BinaryGrid;

/// Snapshot of a run handed to a [`ProgressObserver`]
#[derive(Clone, Copy, Debug)]
pub struct ProgressReport<'a> {
    /// Iterations completed so far
    pub iteration: usize,
    /// Fitness of the current best grid
    pub fitness: f64,
    /// Mutations accepted so far
    pub accepted: usize,
    /// Current best grid
    pub grid: &'a BinaryGrid,
}

/// Synchronous callback invoked by the engine every report interval
///
/// The engine waits for `observe` to return before continuing. An error
/// aborts the run and is returned to the caller unchanged.
pub trait ProgressObserver {
    /// Receive one progress report
    ///
    /// # Errors
    ///
    /// Implementations performing I/O may fail; the run stops on error
    fn observe(&mut self, report: &ProgressReport<'_>) -> Result<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressReport<'_>),
{
    fn observe(&mut self, report: &ProgressReport<'_>) -> Result<()> {
        self(report);
        Ok(())
    }
}
