//! CLI frontend for the HERO System damage dice engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hd",
    about = "HERO System damage dice: DC conversion, rolling and attack assembly",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Roll types selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RollKind {
    /// Normal damage (STUN and BODY)
    Normal,
    /// Killing damage (BODY and a STUN multiplier)
    Killing,
    /// A plain total
    Success,
    /// Adjustment power
    Adjustment,
    /// Entangle BODY
    Entangle,
    /// Flash segments
    Flash,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert damage classes to a dice formula
    Formula {
        /// Damage classes (fractions and negatives allowed)
        #[arg(long, allow_hyphen_values = true)]
        dc: f64,

        /// AP per die: 3, 5, 6, 10 or 15 (default: 15 if killing, else 5)
        #[arg(short, long)]
        tier: Option<u32>,

        /// Killing attack (adds the K suffix)
        #[arg(short, long)]
        killing: bool,

        /// Show half dice as d6-1
        #[arg(long)]
        die_minus_one: bool,
    },

    /// Roll the dice for a number of damage classes
    Roll {
        /// Damage classes
        #[arg(long, allow_hyphen_values = true)]
        dc: f64,

        /// AP per die (default: 15 for killing rolls, else 5)
        #[arg(short, long)]
        tier: Option<u32>,

        /// What the roll measures
        #[arg(short, long, value_enum, default_value = "normal")]
        kind: RollKind,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Use standard effect instead of rolling
        #[arg(long)]
        standard_effect: bool,

        /// Also roll a hit location
        #[arg(long)]
        hit_location: bool,

        /// Print the roll as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble an attack's damage from a JSON scenario
    Damage {
        /// Scenario file with `item`, `context` and `options`
        scenario: PathBuf,

        /// Optional-rules JSON file
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Roll the assembled dice
        #[arg(long)]
        roll: bool,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Called shot location (e.g. head, vitals)
        #[arg(long)]
        called: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HD_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Formula {
            dc,
            tier,
            killing,
            die_minus_one,
        } => commands::formula::run(dc, tier, killing, die_minus_one),
        Commands::Roll {
            dc,
            tier,
            kind,
            seed,
            standard_effect,
            hit_location,
            json,
        } => commands::roll::run(&commands::roll::RollArgs {
            dc,
            tier,
            kind,
            seed,
            standard_effect,
            hit_location,
            json,
        })
        .await,
        Commands::Damage {
            scenario,
            rules,
            roll,
            seed,
            called,
            json,
        } => commands::damage::run(&commands::damage::DamageArgs {
            scenario: &scenario,
            rules: rules.as_deref(),
            roll,
            seed,
            called: called.as_deref(),
            json,
        })
        .await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
