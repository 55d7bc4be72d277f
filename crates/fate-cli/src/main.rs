//! CLI frontend for Fate Roller.

mod commands;
mod logging;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use fate_core::DieKind;

use commands::play::PlayOptions;
use commands::roll::RollOptions;

#[derive(Parser)]
#[command(
    name = "fate",
    about = "Fate Roller: roll a die and let fate comment on the result",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll once and print the result
    Roll {
        /// Die to roll (d6 or d21)
        #[arg(short, long, default_value = "d6")]
        die: DieKind,

        /// Ask the oracle to interpret the roll
        #[arg(short, long)]
        fortune: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Skip the roll animation delay
        #[arg(long)]
        instant: bool,

        /// Model used for fortunes (overrides FATE_MODEL)
        #[arg(long)]
        model: Option<String>,
    },

    /// Open the interactive roller
    Play {
        /// Die to start with (d6 or d21)
        #[arg(short, long, default_value = "d6")]
        die: DieKind,

        /// Start with fortunes switched off
        #[arg(long)]
        no_fortune: bool,

        /// Append logs to this file (the terminal itself never shows logs)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Model used for fortunes (overrides FATE_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            die,
            fortune,
            json,
            instant,
            model,
        } => logging::init(logging::LogTarget::Stderr).and_then(|()| {
            commands::roll::run(
                RollOptions {
                    die,
                    fortune,
                    json,
                    instant,
                },
                commands::oracle_config(model),
            )
        }),
        Commands::Play {
            die,
            no_fortune,
            log_file,
            model,
        } => {
            let target = match log_file {
                Some(path) => logging::LogTarget::File(path),
                None => logging::LogTarget::Silent,
            };
            logging::init(target).and_then(|()| {
                commands::play::run(
                    PlayOptions {
                        die,
                        fortune: !no_fortune,
                    },
                    commands::oracle_config(model),
                )
            })
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
