//! Command-line interface for evolving noise into a monochrome target image

use crate::algorithm::executor::{Budget, EvolutionConfig, EvolutionOutcome, Evolver, Termination};
use crate::algorithm::fitness::FitnessConvention;
use crate::algorithm::random::RandomSelector;
use crate::io::configuration::{
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_REPORT_INTERVAL, DEFAULT_SNAPSHOT_PATH,
    DEFAULT_TARGET_FITNESS, DEFAULT_TARGET_PATH, GIF_FRAME_DELAY_MS, MAX_RECORDED_FRAMES,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{Quantization, decode_with, encode};
use crate::io::progress::{ProgressManager, SnapshotReporter};
use crate::io::visualization::FrameRecorder;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "pixelclimb")]
#[command(
    author,
    version,
    about = "Evolve random noise into a monochrome version of an image"
)]
/// Command-line arguments for the evolution driver
pub struct Cli {
    /// Image to evolve toward
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Where to write the monochrome conversion of the input
    #[arg(long, default_value = DEFAULT_TARGET_PATH)]
    pub target_out: PathBuf,

    /// Where to write periodic progress snapshots
    #[arg(long, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub snapshot: PathBuf,

    /// Where to write the final evolved image
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Fitness at which evolution stops, between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_TARGET_FITNESS)]
    pub fitness: f64,

    /// Iterations between progress reports (0 disables reporting)
    #[arg(short, long, default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub interval: usize,

    /// Random seed for reproducible runs (operating system entropy if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop after this many iterations even if the target was not reached
    #[arg(short = 'n', long)]
    pub max_iterations: Option<usize>,

    /// Stop after this many seconds even if the target was not reached
    #[arg(short, long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,

    /// Maximize the fraction of differing pixels instead of agreeing ones
    #[arg(long)]
    pub literal: bool,

    /// How gray levels are reduced to black and white
    #[arg(long, value_enum, default_value_t = Quantization::Dither)]
    pub quantize: Quantization,

    /// Record every progress report into an animated GIF at this path
    #[arg(long, value_name = "GIF")]
    pub timelapse: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if the progress bar should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Fitness convention selected by the flags
    pub const fn convention(&self) -> FitnessConvention {
        if self.literal {
            FitnessConvention::Disagreement
        } else {
            FitnessConvention::Agreement
        }
    }

    /// Translate the flags into engine parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the time limit is negative or not finite,
    /// or if the resulting configuration fails validation
    pub fn evolution_config(&self) -> Result<EvolutionConfig> {
        let max_duration = self
            .time_limit
            .map(|seconds| {
                Duration::try_from_secs_f64(seconds)
                    .map_err(|e| invalid_parameter("time_limit", &seconds, &e))
            })
            .transpose()?;

        let config = EvolutionConfig {
            target_fitness: self.fitness,
            report_interval: (self.interval > 0).then_some(self.interval),
            convention: self.convention(),
            budget: Budget {
                max_iterations: self.max_iterations,
                max_duration,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Drives one evolution run from input image to output files
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Arguments this runner was created with
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Decode the target, evolve toward it and write every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be decoded, an output cannot be
    /// written, or the arguments are out of range
    pub fn run(&self) -> Result<EvolutionOutcome> {
        let start_time = Instant::now();
        let config = self.cli.evolution_config()?;

        let target = decode_with(&self.cli.input, self.cli.quantize)?;
        log::info!(
            "Loaded {} as {}x{} monochrome target",
            self.cli.input.display(),
            target.width(),
            target.height()
        );
        encode(&self.cli.target_out, &target)?;

        if config.convention == FitnessConvention::Disagreement {
            log::warn!("Literal fitness maximizes mismatches; the result tends to the inverse image");
        }

        let source = self
            .cli
            .seed
            .map_or_else(RandomSelector::from_os_rng, RandomSelector::new);

        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressManager::new(config.target_fitness));
        let recorder = self
            .cli
            .timelapse
            .as_ref()
            .map(|_| FrameRecorder::new(MAX_RECORDED_FRAMES));
        let mut reporter =
            SnapshotReporter::new(Some(self.cli.snapshot.clone()), progress, recorder);

        let mut evolver = Evolver::new(&target, config, source)?;
        log::info!("Initial fitness {:.4}", evolver.fitness());
        let outcome = evolver.run(Some(&mut reporter))?;

        if let Some(progress) = reporter.progress() {
            progress.finish(outcome.termination, outcome.fitness);
        }
        if outcome.termination != Termination::TargetReached {
            log::warn!(
                "Stopped before reaching fitness {}: {:?}",
                config.target_fitness,
                outcome.termination
            );
        }

        encode(&self.cli.output, &outcome.grid)?;

        if let (Some(path), Some(mut recorder)) = (&self.cli.timelapse, reporter.take_recorder()) {
            recorder.record_final(outcome.iterations, &outcome.grid)?;
            recorder.export_gif(path, GIF_FRAME_DELAY_MS)?;
            log::info!(
                "Wrote {} frame timelapse to {}",
                recorder.frame_count(),
                path.display()
            );
        }

        log::info!(
            "Fitness {:.4} after {} iterations ({} accepted) in {:.1?}; wrote {}",
            outcome.fitness,
            outcome.iterations,
            outcome.accepted,
            start_time.elapsed(),
            self.cli.output.display()
        );

        Ok(outcome)
    }
}
