use anyhow::{Context, Result};
use clap::Parser;
use projiter::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fip-demo",
    about = "Sort shuffled vectors through the folded-interleave projection"
)]
struct Cli {
    /// Rounds of shuffled incrementing ranges; round `i` has `i + 1` elements.
    #[arg(long, default_value_t = 15)]
    rounds: usize,
    /// Rounds of random values, run once at full length and once with one element fewer.
    #[arg(long, default_value_t = 10)]
    random_rounds: usize,
    /// Largest random value (inclusive); must not be negative.
    #[arg(long, default_value_t = 99, value_parser = clap::value_parser!(i32).range(0..))]
    max_value: i32,
    /// Seed for the random generator; drawn from the thread RNG when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, rounds = cli.rounds, random_rounds = cli.random_rounds, "starting");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values: Vec<i32> = Vec::with_capacity(cli.rounds);

    // Simple incrementing ranges in shuffled order.
    for i in 0..cli.rounds {
        values.push(i32::try_from(i).context("round count does not fit in i32")?);
        values.shuffle(&mut rng);
        run_round(&mut values)?;
    }

    // Random values in shuffled order.
    for _ in 0..cli.random_rounds {
        randomize(&mut values, &mut rng, cli.max_value);
        run_round(&mut values)?;
    }

    // Again with one value fewer, to cover the other parity.
    values.pop();
    for _ in 0..cli.random_rounds {
        randomize(&mut values, &mut rng, cli.max_value);
        run_round(&mut values)?;
    }

    Ok(())
}

fn randomize(values: &mut [i32], rng: &mut StdRng, max_value: i32) {
    for value in values.iter_mut() {
        *value = rng.random_range(0..=max_value);
    }
    values.shuffle(rng);
}

fn run_round(values: &mut [i32]) -> Result<()> {
    println!("Before:   {}", join(values));

    let fip = FoldedInterleave::new(values.len());
    sort_projected(values, fip)
        .with_context(|| format!("sorting {} values through the projection", values.len()))?;
    println!("After:    {}", join(values));

    let view = projected_to_vec(values, fip).context("reading the projected view")?;
    println!("FIP view: {}\n", join(&view));

    Ok(())
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
