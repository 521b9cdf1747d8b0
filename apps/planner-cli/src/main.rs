mod commands;
mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::Environment;

/// Factory Planner - headless layout tools
#[derive(Parser, Debug)]
#[command(name = "factory-planner", version, about, long_about = None)]
struct Cli {
    /// Editor settings file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    settings: Option<PathBuf>,

    /// Catalog seed file used instead of the built-in buildings
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List building types grouped by category
    Catalog,

    /// Load a layout file and summarise it
    Inspect {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Report every pair of overlapping buildings
    Check {
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Exit with an error when any overlap is found
        #[arg(long)]
        strict: bool,
    },

    /// Run an editor script
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Layout file to load before the script runs
        #[arg(long, value_name = "FILE")]
        open: Option<PathBuf>,

        /// Save the resulting layout here
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the final render frame as JSON
        #[arg(long)]
        frame: bool,
    },
}

fn run(cli: Cli) -> Result<(), String> {
    let env = Environment::load(cli.settings.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Command::Catalog => {
            print!("{}", commands::list_catalog(&env.catalog));
        }
        Command::Inspect { path } => {
            print!("{}", commands::inspect(&env, &path)?);
        }
        Command::Check { path, strict } => {
            let overlaps = commands::check(&env, &path)?;
            for overlap in &overlaps {
                println!("{}", overlap.message());
            }
            println!("{} overlapping pairs", overlaps.len());
            if strict && !overlaps.is_empty() {
                return Err(format!("{}: layout has overlapping buildings", path.display()));
            }
        }
        Command::Replay {
            script,
            open,
            output,
            frame,
        } => {
            let text = std::fs::read_to_string(&script)
                .map_err(|e| format!("{}: {}", script.display(), e))?;
            let mut editor = commands::replay(&env, &text, open.as_deref())?;
            if let Some(path) = output {
                editor
                    .save_to(&path)
                    .map_err(|e| format!("{}: {}", path.display(), e))?;
            }
            if frame {
                println!("{}", commands::render_frame(&editor)?);
            } else {
                println!("{} buildings, {} selected", editor.instances().len(), editor.selection().len());
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
