//! Single-candidate hill climbing from random noise toward a target grid
//!
//! Each iteration copies the current best grid into a scratch buffer, flips
//! one randomly chosen cell, scores the result and keeps it only when the
//! score strictly improves. The accepted fitness therefore never decreases.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::algorithm::fitness::FitnessConvention;
use crate::algorithm::observer::{ProgressObserver, ProgressReport};
use crate::algorithm::random::PixelSource;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::BinaryGrid;

/// Optional limits on how long a run may search
///
/// Without limits the loop only stops at the target fitness, which may never
/// happen for an unreachable target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    /// Stop once this many iterations have completed in total
    pub max_iterations: Option<usize>,
    /// Stop once a single call to [`Evolver::run`] has taken this long
    pub max_duration: Option<Duration>,
}

impl Budget {
    /// No limits
    pub const fn unbounded() -> Self {
        Self {
            max_iterations: None,
            max_duration: None,
        }
    }

    /// Limit on total iterations only
    pub const fn iterations(max_iterations: usize) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            max_duration: None,
        }
    }

    /// Limit on wall-clock time only
    pub const fn duration(max_duration: Duration) -> Self {
        Self {
            max_iterations: None,
            max_duration: Some(max_duration),
        }
    }
}

/// Parameters controlling a single evolution run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvolutionConfig {
    /// Fitness at or above which the run stops, in `[0.0, 1.0]`
    pub target_fitness: f64,
    /// Iterations between observer calls; `None` disables reporting
    pub report_interval: Option<usize>,
    /// Meaning of the fitness value being maximized
    pub convention: FitnessConvention,
    /// Optional liveness limits
    pub budget: Budget,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            target_fitness: 1.0,
            report_interval: None,
            convention: FitnessConvention::Agreement,
            budget: Budget::unbounded(),
        }
    }
}

impl EvolutionConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the target fitness lies outside
    /// `[0.0, 1.0]` or the report interval is zero
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.target_fitness) {
            return Err(invalid_parameter(
                "target_fitness",
                &self.target_fitness,
                &"must lie within [0.0, 1.0]",
            ));
        }
        if self.report_interval == Some(0) {
            return Err(invalid_parameter(
                "report_interval",
                &0,
                &"must be positive; use None to disable reporting",
            ));
        }
        Ok(())
    }
}

/// Shared flag that asks a running evolution to stop
///
/// Checked once per iteration. Clones refer to the same flag, so a handle can
/// be moved to another thread or captured by an observer.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Reason a run stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Fitness reached the configured target
    TargetReached,
    /// Iteration budget exhausted
    IterationBudget,
    /// Wall-clock budget exhausted
    TimeBudget,
    /// Cancellation token was tripped
    Cancelled,
}

/// Result of one mutate/evaluate/accept iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Whether the flipped candidate replaced the current best
    pub accepted: bool,
    /// Fitness of the flipped candidate
    pub candidate_fitness: f64,
    /// Fitness of the current best after the decision
    pub fitness: f64,
}

/// Final state of a run
#[derive(Clone, Debug)]
pub struct EvolutionOutcome {
    /// Best grid found
    pub grid: BinaryGrid,
    /// Fitness of `grid`
    pub fitness: f64,
    /// Iterations completed
    pub iterations: usize,
    /// Mutations accepted
    pub accepted: usize,
    /// Why the run stopped
    pub termination: Termination,
}

/// Current best candidate; `fitness` always describes `grid`
struct EvolutionState {
    grid: BinaryGrid,
    fitness: f64,
    iteration: usize,
    accepted: usize,
}

/// Hill-climbing executor holding the state of one run
pub struct Evolver<'t, S: PixelSource> {
    target: &'t BinaryGrid,
    config: EvolutionConfig,
    source: S,
    state: EvolutionState,
    /// Scratch buffer reused for every proposed mutation
    candidate: BinaryGrid,
    cancellation: CancellationToken,
}

impl<'t, S: PixelSource> Evolver<'t, S> {
    /// Create an executor with a freshly drawn noise grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the target has no pixels or the
    /// configuration is out of range
    pub fn new(target: &'t BinaryGrid, config: EvolutionConfig, mut source: S) -> Result<Self> {
        if target.is_empty() {
            return Err(invalid_parameter(
                "target",
                &format!("{}x{}", target.width(), target.height()),
                &"target grid must contain at least one pixel",
            ));
        }
        config.validate()?;

        let grid = BinaryGrid::from_fn(target.width(), target.height(), |_, _| {
            source.initial_pixel()
        });
        let fitness = config.convention.evaluate(&grid, target)?;
        let candidate = grid.clone();

        log::debug!(
            "Evolving {}x{} grid toward {:?} fitness {}; initial fitness {fitness:.4}",
            target.width(),
            target.height(),
            config.convention,
            config.target_fitness
        );

        Ok(Self {
            target,
            config,
            source,
            state: EvolutionState {
                grid,
                fitness,
                iteration: 0,
                accepted: 0,
            },
            candidate,
            cancellation: CancellationToken::new(),
        })
    }

    /// Replace the cancellation token with an existing one
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Handle that can stop this executor's runs
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Grid being evolved toward
    pub const fn target(&self) -> &BinaryGrid {
        self.target
    }

    /// Parameters of this run
    pub const fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Current best grid
    pub const fn grid(&self) -> &BinaryGrid {
        &self.state.grid
    }

    /// Fitness of the current best grid
    pub const fn fitness(&self) -> f64 {
        self.state.fitness
    }

    /// Iterations completed so far
    pub const fn iteration(&self) -> usize {
        self.state.iteration
    }

    /// Mutations accepted so far
    pub const fn accepted(&self) -> usize {
        self.state.accepted
    }

    /// Whether the current fitness satisfies the target
    pub const fn target_reached(&self) -> bool {
        self.state.fitness >= self.config.target_fitness
    }

    /// Consume the executor and return the current best grid
    pub fn into_grid(self) -> BinaryGrid {
        self.state.grid
    }

    /// Propose, score and accept or reject one single-cell flip
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the pixel source selects a cell outside
    /// the grid
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.candidate.copy_from(&self.state.grid)?;

        let (width, height) = self.target.dimensions();
        let (col, row) = self.source.select_cell(width, height);
        if self.candidate.flip(col, row).is_none() {
            return Err(invalid_parameter(
                "cell",
                &format!("({col}, {row})"),
                &format!("outside the {width}x{height} grid"),
            ));
        }

        let candidate_fitness = self
            .config
            .convention
            .evaluate(&self.candidate, self.target)?;

        // Ties are rejected so the current best only ever improves
        let accepted = candidate_fitness > self.state.fitness;
        if accepted {
            std::mem::swap(&mut self.state.grid, &mut self.candidate);
            self.state.fitness = candidate_fitness;
            self.state.accepted += 1;
        }

        self.state.iteration += 1;

        Ok(StepOutcome {
            accepted,
            candidate_fitness,
            fitness: self.state.fitness,
        })
    }

    /// Iterate until the target fitness, a budget or cancellation stops the run
    ///
    /// The observer, if any, is called after every iteration whose count is a
    /// multiple of the configured report interval. Calling `run` again after a
    /// budget stop continues from the current state.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Evolver::step`] and from the observer
    pub fn run(
        &mut self,
        mut observer: Option<&mut dyn ProgressObserver>,
    ) -> Result<EvolutionOutcome> {
        let started = Instant::now();

        let termination = loop {
            if let Some(termination) = self.check_termination(started) {
                break termination;
            }

            self.step()?;

            if let (Some(observer), Some(interval)) =
                (observer.as_deref_mut(), self.config.report_interval)
                && self.state.iteration % interval == 0
            {
                observer.observe(&ProgressReport {
                    iteration: self.state.iteration,
                    fitness: self.state.fitness,
                    accepted: self.state.accepted,
                    grid: &self.state.grid,
                })?;
            }
        };

        log::debug!(
            "Evolution stopped ({termination:?}) after {} iterations, {} accepted, fitness {:.4}",
            self.state.iteration,
            self.state.accepted,
            self.state.fitness
        );

        Ok(EvolutionOutcome {
            grid: self.state.grid.clone(),
            fitness: self.state.fitness,
            iterations: self.state.iteration,
            accepted: self.state.accepted,
            termination,
        })
    }

    fn check_termination(&self, started: Instant) -> Option<Termination> {
        if self.target_reached() {
            return Some(Termination::TargetReached);
        }
        if self.cancellation.is_cancelled() {
            return Some(Termination::Cancelled);
        }
        let budget = &self.config.budget;
        if budget
            .max_iterations
            .is_some_and(|max| self.state.iteration >= max)
        {
            return Some(Termination::IterationBudget);
        }
        if budget
            .max_duration
            .is_some_and(|max| started.elapsed() >= max)
        {
            return Some(Termination::TimeBudget);
        }
        None
    }
}

/// Evolve random noise until it reaches `target_fitness` agreement with `target`
///
/// Runs without budget or observer, so an unreachable target never returns.
///
/// # Errors
///
/// Returns `InvalidParameter` for an empty target or a target fitness outside
/// `[0.0, 1.0]`
pub fn evolve<S: PixelSource>(
    target: &BinaryGrid,
    target_fitness: f64,
    source: S,
) -> Result<BinaryGrid> {
    let config = EvolutionConfig {
        target_fitness,
        ..EvolutionConfig::default()
    };
    let mut evolver = Evolver::new(target, config, source)?;
    evolver.run(None)?;
    Ok(evolver.into_grid())
}

/// Evolve with full control over configuration and progress reporting
///
/// # Errors
///
/// Returns configuration errors from [`Evolver::new`] and any error raised
/// by the observer
pub fn evolve_with<S: PixelSource>(
    target: &BinaryGrid,
    config: EvolutionConfig,
    source: S,
    observer: Option<&mut dyn ProgressObserver>,
) -> Result<EvolutionOutcome> {
    Evolver::new(target, config, source)?.run(observer)
}
