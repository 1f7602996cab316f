use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use prime_counter::config::Config;
use prime_counter::lookup::{NthPrimeWorkflow, RequestOutcome};
use prime_counter::prime::{is_prime, ordinal, WolframAlphaClient};
use prime_counter::state::{ActivityKind, AppState};
use prime_counter::telemetry::init_tracing;

#[derive(Parser)]
#[command(
    name = "prime-counter",
    version,
    about = "Counter with primality checks, nth-prime lookups and favorite primes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (default: platform config dir).
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Report whether N is prime.
    IsPrime {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Ask the configured service for the Nth prime.
    NthPrime {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Run a scripted counter session and print the favorites and activity log.
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::IsPrime { n } => {
            let answer = if is_prime(n) { "yes" } else { "no" };
            println!("Is {} prime? {}", n, answer);
        }
        Command::NthPrime { n } => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path),
                None => Config::load(),
            }
            .context("Failed to load configuration")?;
            nth_prime(&config, n).await?;
        }
        Command::Demo => demo(),
    }

    Ok(())
}

async fn nth_prime(config: &Config, n: i64) -> Result<()> {
    let client = WolframAlphaClient::new(&config.lookup).context("Failed to build HTTP client")?;
    let state = AppState::new();
    let workflow = NthPrimeWorkflow::new(state.clone(), Arc::new(client));

    let RequestOutcome::Started(handle) = workflow.request(n) else {
        anyhow::bail!("A lookup is already pending");
    };

    handle
        .wait()
        .await
        .with_context(|| format!("Failed to look up the {} prime", ordinal(n)))?;

    match state.take_pending_prime_result() {
        Some(prime) => println!("The {} prime is {}", ordinal(n), prime),
        None => println!("No answer for the {} prime", ordinal(n)),
    }
    Ok(())
}

fn demo() {
    let state = AppState::new();

    for _ in 0..7 {
        state.increment();
    }
    if state.check_count_is_prime() {
        println!("{} is prime", state.count());
        if let Err(e) = state.add_count_to_favorites() {
            eprintln!("{}", e);
        }
    }
    state.set_detail_sheet_visible(false);

    let favorites = state.project_favorites();
    for value in [2, 3, 7] {
        if let Err(e) = favorites.add_favorite(value) {
            eprintln!("{}", e);
        }
    }
    if let Err(e) = favorites.remove_favorite_at(0) {
        eprintln!("{}", e);
    }

    println!("Favorite primes: {:?}", favorites.favorites());
    println!("Activity:");
    for entry in favorites.activity_log() {
        match entry.kind {
            ActivityKind::FavoriteAdded(value) => println!("  + {}", value),
            ActivityKind::FavoriteRemoved(value) => println!("  - {}", value),
        }
    }
}
