//! Terminal progress display and snapshot writing during a run

use std::path::PathBuf;
use std::sync::LazyLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::algorithm::executor::Termination;
use crate::algorithm::observer::{ProgressObserver, ProgressReport};
use crate::io::configuration::{FITNESS_BAR_SCALE, PROGRESS_BAR_WIDTH};
use crate::io::error::Result;
use crate::io::image::encode;
use crate::io::visualization::FrameRecorder;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Fitness progress bar for a single evolution run
///
/// The bar position is the current fitness in per-mille; the target fitness
/// is shown as the prefix and the iteration count as the message.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a visible progress bar for a run aiming at `target_fitness`
    pub fn new(target_fitness: f64) -> Self {
        Self::with_bar(ProgressBar::new(FITNESS_BAR_SCALE), target_fitness)
    }

    /// Create a progress manager that draws nothing
    pub fn hidden(target_fitness: f64) -> Self {
        Self::with_bar(ProgressBar::hidden(), target_fitness)
    }

    fn with_bar(bar: ProgressBar, target_fitness: f64) -> Self {
        bar.set_length(FITNESS_BAR_SCALE);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(format!("target {target_fitness:.3}"));
        Self { bar }
    }

    /// Report the latest fitness and iteration count
    pub fn update(&self, iteration: usize, fitness: f64, accepted: usize) {
        self.bar.set_position(fitness_position(fitness));
        self.bar
            .set_message(format!("fitness {fitness:.4} | iter {iteration} | kept {accepted}"));
    }

    /// Current bar position in per-mille
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a final message describing why the run stopped
    pub fn finish(&self, termination: Termination, fitness: f64) {
        self.bar.set_position(fitness_position(fitness));
        let outcome = match termination {
            Termination::TargetReached => "target reached",
            Termination::IterationBudget => "iteration budget exhausted",
            Termination::TimeBudget => "time budget exhausted",
            Termination::Cancelled => "cancelled",
        };
        self.bar
            .finish_with_message(format!("fitness {fitness:.4} ({outcome})"));
    }
}

fn fitness_position(fitness: f64) -> u64 {
    (fitness.clamp(0.0, 1.0) * FITNESS_BAR_SCALE as f64).round() as u64
}

/// Observer that mirrors progress to the terminal and to disk
///
/// On every report it updates the progress bar (or logs the fitness when no
/// bar is shown), overwrites the snapshot image and feeds the timelapse.
pub struct SnapshotReporter {
    snapshot_path: Option<PathBuf>,
    progress: Option<ProgressManager>,
    recorder: Option<FrameRecorder>,
    reports: usize,
}

impl SnapshotReporter {
    /// Create a reporter; every component is optional
    pub const fn new(
        snapshot_path: Option<PathBuf>,
        progress: Option<ProgressManager>,
        recorder: Option<FrameRecorder>,
    ) -> Self {
        Self {
            snapshot_path,
            progress,
            recorder,
            reports: 0,
        }
    }

    /// Number of reports received
    pub const fn reports(&self) -> usize {
        self.reports
    }

    /// Progress bar, if one is attached
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress.as_ref()
    }

    /// Detach the timelapse recorder
    pub fn take_recorder(&mut self) -> Option<FrameRecorder> {
        self.recorder.take()
    }
}

impl ProgressObserver for SnapshotReporter {
    fn observe(&mut self, report: &ProgressReport<'_>) -> Result<()> {
        self.reports += 1;

        match &self.progress {
            Some(progress) => progress.update(report.iteration, report.fitness, report.accepted),
            None => log::info!(
                "Iteration {}: fitness {:.4} ({} accepted)",
                report.iteration,
                report.fitness,
                report.accepted
            ),
        }

        if let Some(path) = &self.snapshot_path {
            encode(path, report.grid)?;
        }

        if let Some(recorder) = &mut self.recorder {
            recorder.record(report.iteration, report.grid)?;
        }

        Ok(())
    }
}
