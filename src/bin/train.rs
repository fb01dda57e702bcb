//! Training binary.
//!
//! Trains the learner by self-play, then plays evaluation episodes with the
//! frozen table and reports the win fraction.
//!
//! Usage:
//!   cargo run --release --bin train -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>            Configuration JSON file (optional)
//!   --episodes <N>             Training episodes
//!   --eval-episodes <N>        Evaluation episodes
//!   --seed <N>                 Random seed (optional)
//!   --threads <N>              Evaluation threads (default: all cores)
//!   --progress-interval <N>    Episodes between progress updates
//!   --json                     Print the summary as JSON
//!   -v, -vv                    More logging

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use blackjack_learner::learning::{EvaluationReport, Trainer, TrainingConfig, TrainingStats};
use blackjack_learner::logging;

/// Train the blackjack learner and report its win rate.
#[derive(Debug, Parser)]
#[command(name = "train", version, about)]
struct Cli {
    /// Path to a JSON training configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of training episodes.
    #[arg(short, long, value_name = "N")]
    episodes: Option<u64>,

    /// Override the number of evaluation episodes.
    #[arg(long, value_name = "N")]
    eval_episodes: Option<u64>,

    /// Override the random seed.
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of evaluation threads.
    #[arg(short, long, value_name = "N")]
    threads: Option<usize>,

    /// Override the number of episodes between progress updates.
    #[arg(long, value_name = "N")]
    progress_interval: Option<u64>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Summary {
    config: TrainingConfig,
    training: TrainingStats,
    evaluation: EvaluationReport,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            TrainingConfig::from_json_file(path)?
        }
        None => TrainingConfig::default(),
    };

    if let Some(episodes) = cli.episodes {
        config.episodes = episodes;
    }
    if let Some(episodes) = cli.eval_episodes {
        config.eval_episodes = episodes;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(threads) = cli.threads {
        config.num_threads = Some(threads);
    }
    if let Some(interval) = cli.progress_interval {
        config.progress_interval = interval;
    }
    config.validate()?;

    let mut trainer = Trainer::new(config.clone());

    let bar = ProgressBar::new(config.episodes);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} episodes {msg}",
        )?,
    );

    let training = trainer
        .train_with_callback(config.episodes, config.progress_interval, |stats| {
            bar.set_position(stats.episodes);
            bar.set_message(format!(
                "| {} states | win rate {:.3}",
                stats.states,
                stats.outcomes.win_rate()
            ));
        })?
        .clone();
    bar.finish_and_clear();

    let evaluation = trainer.evaluate(config.eval_episodes)?;

    if cli.json {
        let summary = Summary {
            config,
            training,
            evaluation,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== Training ===");
    println!("Episodes:     {}", training.episodes);
    println!("States:       {}", training.states);
    println!("Entries:      {}", training.entries);
    println!(
        "Outcomes:     {} wins / {} ties / {} losses",
        training.outcomes.wins, training.outcomes.ties, training.outcomes.losses
    );
    println!(
        "Time:         {:.2}s ({:.0} episodes/s)",
        training.elapsed_seconds, training.episodes_per_second
    );
    println!();
    println!("=== Evaluation ===");
    println!("Episodes:     {}", evaluation.episodes);
    println!(
        "Outcomes:     {} wins / {} ties / {} losses",
        evaluation.outcomes.wins, evaluation.outcomes.ties, evaluation.outcomes.losses
    );
    println!("Win rate:     {:.4}", evaluation.win_rate);

    Ok(())
}
