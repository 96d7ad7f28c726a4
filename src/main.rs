//! Kohonen CLI - Self-Organizing Map trainer
//!
//! Command-line interface for training a lattice on synthetic samples and
//! rendering the result.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonen::data::samples_from_config;
use kohonen::{
    quantization_error, save_lattice_png, topographic_error, Config, DecayGranularity, Lattice,
    OutputConfig, RenderOptions, Result, SomTrainer,
};
use log::{error, warn};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonen")]
#[command(version)]
#[command(about = "Self-Organizing Map trainer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a lattice on random samples and save it as a PNG
    Train {
        /// JSON configuration file (flags below override it)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Lattice width
        #[arg(long)]
        width: Option<usize>,

        /// Lattice height
        #[arg(long)]
        height: Option<usize>,

        /// Components per vector
        #[arg(short = 'd', long)]
        input_dim: Option<usize>,

        /// Number of random samples
        #[arg(short = 'm', long)]
        samples: Option<usize>,

        /// Number of training epochs
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Base learning rate, in (0, 1]
        #[arg(short, long)]
        alpha: Option<f64>,

        /// Base neighborhood radius (default: max(width, height) / 2)
        #[arg(long)]
        sigma: Option<f64>,

        /// Random seed for lattice and samples
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Pixels per cell in the output image
        #[arg(long)]
        scale: Option<u32>,

        /// Do not outline sample BMUs in the image
        #[arg(long)]
        no_bmu: bool,

        /// Advance the decay schedule per sample instead of per epoch
        #[arg(long)]
        per_sample_decay: bool,
    },

    /// Print the default configuration as JSON
    Config,
}

/// Flag overrides for the train command.
struct TrainArgs {
    config: Option<PathBuf>,
    width: Option<usize>,
    height: Option<usize>,
    input_dim: Option<usize>,
    samples: Option<usize>,
    iterations: Option<usize>,
    alpha: Option<f64>,
    sigma: Option<f64>,
    seed: Option<u64>,
    output_dir: Option<PathBuf>,
    scale: Option<u32>,
    no_bmu: bool,
    per_sample_decay: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Train {
            config,
            width,
            height,
            input_dim,
            samples,
            iterations,
            alpha,
            sigma,
            seed,
            output_dir,
            scale,
            no_bmu,
            per_sample_decay,
        } => train_lattice(TrainArgs {
            config,
            width,
            height,
            input_dim,
            samples,
            iterations,
            alpha,
            sigma,
            seed,
            output_dir,
            scale,
            no_bmu,
            per_sample_decay,
        }),

        Commands::Config => print_default_config(),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Loads the configuration file, if any, and applies flag overrides.
fn resolve_config(args: &TrainArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(width) = args.width {
        config.lattice.width = width;
    }
    if let Some(height) = args.height {
        config.lattice.height = height;
    }
    if let Some(input_dim) = args.input_dim {
        config.lattice.input_dim = input_dim;
        config.data.num_features = input_dim;
    }
    if let Some(samples) = args.samples {
        config.data.num_samples = samples;
    }
    if let Some(iterations) = args.iterations {
        config.training.iterations = iterations;
    }
    if let Some(alpha) = args.alpha {
        config.lattice.alpha = alpha;
    }
    if args.sigma.is_some() {
        config.lattice.sigma = args.sigma;
    }
    if let Some(seed) = args.seed {
        config.lattice.seed = Some(seed);
        // Keep the sample stream independent of the lattice stream.
        config.data.seed = Some(seed.wrapping_add(1));
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(scale) = args.scale {
        config.output.scale = scale;
    }
    if args.no_bmu {
        config.output.show_bmu = false;
    }
    if args.per_sample_decay {
        config.training.decay = DecayGranularity::PerSample;
    }

    config.validate()?;
    Ok(config)
}

fn train_lattice(args: TrainArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = resolve_config(&args)?;

    println!("Kohonen Self-Organizing Map");
    println!(
        "   Lattice: {}x{} cells, {}-dim prototypes",
        config.lattice.width, config.lattice.height, config.lattice.input_dim
    );
    println!();

    // Step 1: Generate samples
    let samples = samples_from_config(&config.data)?;
    println!("✓ Generated {} random samples", samples.len());

    // Step 2: Initialize lattice
    let mut lattice = Lattice::from_config(&config.lattice)?;
    println!(
        "✓ Initialized lattice (alpha={}, sigma={})",
        lattice.alpha(),
        lattice.sigma()
    );

    let qe_before = quantization_error(&lattice, &samples)?;

    // Step 3: Train with progress display
    let bar_style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(config.training.iterations as u64);
    pb.set_style(bar_style);
    pb.set_message("Training...");

    let trainer = SomTrainer::new(config.training.clone());
    let summary = trainer.train_with_progress(&mut lattice, &samples, |report| {
        pb.set_message(format!(
            "Training... alpha={:.4}, sigma={:.3}",
            report.alpha, report.sigma
        ));
        pb.inc(1);
        ControlFlow::Continue(())
    });
    pb.finish_and_clear();
    let summary = summary?;

    println!(
        "✓ Trained {} epochs ({} updates)",
        summary.epochs_completed, summary.samples_seen
    );

    let qe_after = quantization_error(&lattice, &samples)?;
    println!("   Quantization error: {:.5} -> {:.5}", qe_before, qe_after);
    if lattice.num_cells() >= 2 {
        println!(
            "   Topographic error:  {:.3}",
            topographic_error(&lattice, &samples)?
        );
    }

    // Step 4: Save image
    if !matches!(lattice.input_dim(), 1 | 3) {
        warn!(
            "Skipping image: only 1- or 3-dimensional prototypes can be rendered, got {}",
            lattice.input_dim()
        );
        return Ok(());
    }

    let file_name = OutputConfig::file_name(
        config.lattice.width,
        config.lattice.height,
        config.training.iterations,
    );
    let path = config.output.directory.join(file_name);
    let options = RenderOptions {
        scale: config.output.scale,
        show_bmu: config.output.show_bmu,
    };
    save_lattice_png(&lattice, &path, &options, Some(samples.as_slice()))?;
    println!("✓ Saved lattice image to {}", path.display());

    println!();
    println!(
        "Training complete in {}",
        HumanDuration(start_time.elapsed())
    );

    Ok(())
}

fn print_default_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&Config::default())?;
    println!("{}", json);
    Ok(())
}
