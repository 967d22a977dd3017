//! Fringe command-line interface.
//!
//! Run interference simulations from TOML job files:
//! ```sh
//! fringe-cli run job.toml
//! fringe-cli validate job.toml
//! fringe-cli lasers
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fringe-cli")]
#[command(about = "Fringe: Two-Beam Gaussian Interference Simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a TOML job file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without running the simulation.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display common laser lines for quick configuration.
    Lasers,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Fringe Interference Simulator");
            println!("=============================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_simulation(&job)?;

            // Determine output directory
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            // PNG rasters (default on)
            if job.output.save_images {
                runner::write_images(&result, &out_dir)?;
            }

            // CSV intensity map (optional)
            if job.output.save_csv {
                runner::write_pattern_csv(&result.pattern, &out_dir.join("pattern.csv"))?;
            }

            // JSON summary (optional)
            if job.output.save_json {
                runner::write_summary_json(&job, &result.pattern, &out_dir.join("summary.json"))?;
            }

            println!("Simulation complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            runner::validate_job(&job)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Lasers => {
            println!("Common laser lines:");
            println!();
            println!("  405 nm  — violet diode");
            println!("  445 nm  — blue diode");
            println!("  473 nm  — frequency-doubled Nd:YAG (blue)");
            println!("  532 nm  — frequency-doubled Nd:YAG (green)");
            println!("  594 nm  — helium-neon (yellow)");
            println!("  633 nm  — helium-neon (red)");
            println!("  780 nm  — rubidium D2 diode");
            println!("  1064 nm — Nd:YAG fundamental");
            println!();
            println!("Pairs closer than 0.1 nm interfere coherently in the simulator.");
            Ok(())
        }
    }
}
