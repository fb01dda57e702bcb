//! Interactive blackjack.
//!
//! Plays rounds against the dealer. The player can be you (`input`), a coin
//! flip (`random`), or the learner after some self-play (`agent`).
//!
//! Usage:
//!   cargo run --bin bj -- [--strategy input|random|agent] [--rounds N]

use std::error::Error;
use std::io;

use clap::{ArgAction, Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use blackjack_learner::blackjack::{Round, RoundEvent, Seat};
use blackjack_learner::cards::Deck;
use blackjack_learner::learning::{
    validate_probability, AgentStrategy, DecisionTable, PromptStrategy, RandomStrategy, Reward,
    StateClass, Strategy, Tally, Trainer, TrainingConfig,
};
use blackjack_learner::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    /// Ask on the terminal.
    Input,
    /// Draw with a fixed probability.
    Random,
    /// Learned table.
    Agent,
}

/// Play blackjack against the dealer.
#[derive(Debug, Parser)]
#[command(name = "bj", version, about)]
struct Cli {
    /// Who decides whether to draw.
    #[arg(long, value_enum, default_value_t = StrategyKind::Input)]
    strategy: StrategyKind,

    /// Self-play episodes before playing with the agent (at least 1).
    #[arg(long, value_name = "N", default_value_t = 50_000)]
    train: u64,

    /// Draw probability for the random strategy.
    #[arg(long, value_name = "P", default_value_t = 0.5)]
    probability: f64,

    /// Number of rounds to play.
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    rounds: u32,

    /// Random seed.
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Increase logging verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn rng_from(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

fn train_agent(cli: &Cli) -> Result<DecisionTable, Box<dyn Error>> {
    let mut config = TrainingConfig::default().with_episodes(cli.train);
    config.seed = cli.seed;
    config.validate()?;
    println!("Training the agent for {} episodes...", config.episodes);

    let episodes = config.episodes;
    let mut trainer = Trainer::new(config);
    let stats = trainer.train(episodes)?;
    println!(
        "Learned {} states (training win rate {:.3}).\n",
        stats.states,
        stats.outcomes.win_rate()
    );
    Ok(trainer.into_table())
}

fn narrate(event: &RoundEvent) {
    match event {
        RoundEvent::Dealt { seat: Seat::Player, card } => println!("Player drew {}.", card),
        RoundEvent::Dealt { seat: Seat::Dealer, card } => println!("Dealer drew {}.", card),
        RoundEvent::DealtFaceDown => println!("Dealer drew a card."),
        RoundEvent::Decided { state, decision } => {
            log::debug!("{} -> {}", state.label(), decision)
        }
        RoundEvent::PlayerBust { total } => println!("Player busts with {}.", total),
        RoundEvent::HoleCardRevealed { card } => println!("Dealer's hidden card was {}.", card),
        RoundEvent::DealerBust { total } => println!("Dealer busts with {}.", total),
        RoundEvent::Settled {
            player_total,
            dealer_total,
            reward,
        } => {
            let verdict = match reward {
                Reward::Win => "Player wins.",
                Reward::Lose => "Dealer wins.",
                Reward::Tie => "It's a tie.",
            };
            println!("Player {} vs Dealer {}: {}", player_total, dealer_total, verdict);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let probability = validate_probability(cli.probability)?;

    let table = match cli.strategy {
        StrategyKind::Agent => train_agent(&cli)?,
        _ => DecisionTable::new(),
    };

    let mut deck_rng = rng_from(cli.seed, 1);
    let mut agent_rng = rng_from(cli.seed, 2);

    let mut strategy: Box<dyn Strategy + '_> = match cli.strategy {
        StrategyKind::Input => Box::new(PromptStrategy::new(io::stdin().lock(), io::stdout())),
        StrategyKind::Random => Box::new(RandomStrategy::with_probability(
            rng_from(cli.seed, 3),
            probability,
        )),
        StrategyKind::Agent => Box::new(AgentStrategy::new(&table, &mut agent_rng)),
    };

    let mut tally = Tally::default();
    for n in 1..=cli.rounds {
        if cli.rounds > 1 {
            println!("--- Round {} ---", n);
        }
        let mut round = Round::new(Deck::shuffled(&mut deck_rng));
        let episode = round.play_with(strategy.as_mut(), narrate)?;
        log::info!(
            "player {} dealer {}, {} cards left",
            round.player(),
            round.dealer(),
            round.deck().len()
        );
        tally.record(episode.reward);
        println!();
    }

    if cli.rounds > 1 {
        println!(
            "{} rounds: {} wins / {} ties / {} losses (win rate {:.3})",
            tally.total(),
            tally.wins,
            tally.ties,
            tally.losses,
            tally.win_rate()
        );
    }

    Ok(())
}
