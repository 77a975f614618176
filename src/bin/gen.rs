//! ruledist-gen: CLI tool for fetching and rewriting rule lists.

use clap::{Parser, Subcommand};
use ruledist::{pipeline, source};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ruledist-gen")]
#[command(version = "0.1.0")]
#[command(about = "Fetch rule lists and rewrite them into annotated and provider formats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources and write both output documents per source
    Generate {
        /// Output directory for generated files
        #[arg(short, long, default_value = "dist")]
        output_dir: PathBuf,

        /// YAML file with the source list (built-in sources when omitted)
        #[arg(short, long)]
        sources: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output_dir,
            sources,
            verbose,
        } => {
            if let Err(e) = generate(&output_dir, sources.as_deref(), verbose) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn generate(
    output_dir: &std::path::Path,
    sources_file: Option<&std::path::Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = match sources_file {
        Some(path) => {
            if verbose {
                println!("Loading sources from {:?}", path);
            }
            source::load_sources(path)?
        }
        None => source::default_sources(),
    };

    if verbose {
        for s in &sources {
            println!("Source {}: {}", s.name, s.url);
        }
    }

    let report = pipeline::run(&sources, output_dir)?;

    for name in &report.succeeded {
        println!("Generated {:?} and {:?}", output_dir.join(format!("{}.txt", name)), output_dir.join(format!("{}.yaml", name)));
    }

    if !report.is_success() {
        for (name, err) in &report.failed {
            eprintln!("Failed {}: {}", name, err);
        }
        return Err(format!("{} of {} sources failed", report.failed.len(), sources.len()).into());
    }

    Ok(())
}
