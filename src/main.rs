use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use netresult::{
    config::ResultConfig,
    error::{Result, ResultError},
    result::{ResultCollection, merge},
};
use tqdm::tqdm;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Inspect and combine the ranked networks saved by structure-learning runs
#[derive(Parser, Debug)]
#[command(name = "netresult")]
#[command(about = "Inspect and merge ranked network collections", long_about = None)]
struct Args {
    /// Path to a JSON configuration file (result size, default file name, summary length)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the networks of a result file, best first, followed by its runs
    Show {
        /// Result file (defaults to the configured file name)
        file: Option<PathBuf>,

        /// Number of networks to print
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Merge several result files into a single deduplicated one
    Merge {
        /// Result files to merge, in priority order for duplicate structures
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Where to write the merged result (defaults to the configured file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the report data of a result file as JSON
    Summary {
        /// Result file (defaults to the configured file name)
        file: Option<PathBuf>,

        /// Number of best networks described
        #[arg(short, long)]
        top: Option<usize>,
    },
}

fn show(result: &ResultCollection, top: usize) {
    let nodes = result.nodes();
    println!(
        "{} networks over {} nodes (capacity {})",
        result.len(),
        nodes.len(),
        match result.capacity() {
            0 => "unbounded".to_string(),
            n => n.to_string(),
        }
    );

    for (rank, candidate) in result.top(top).enumerate() {
        let edges: Vec<String> = candidate
            .edges()
            .iter()
            .map(|e| {
                format!(
                    "{} -> {}",
                    nodes.name(e.src).unwrap_or("?"),
                    nodes.name(e.dest).unwrap_or("?")
                )
            })
            .collect();
        println!(
            "{:>4}  {:>14.4}  [{}]",
            rank + 1,
            candidate.score(),
            edges.join(", ")
        );
    }

    for (i, run) in result.runs().iter().enumerate() {
        match run.runtime() {
            Some(runtime) => println!(
                "run {i}: host {}, {:.2}s",
                run.host(),
                runtime.as_secs_f64()
            ),
            None => println!("run {i}: host {}, still open", run.host()),
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => ResultConfig::from_path(path)?,
        None => ResultConfig::default(),
    };

    match args.command {
        Command::Show { file, top } => {
            let path = file.unwrap_or_else(|| config.filename.clone());
            let result = ResultCollection::load_from_path(&path)?;
            show(&result, top.unwrap_or(config.summary_top));
        }
        Command::Merge { files, output } => {
            let mut loaded = Vec::with_capacity(files.len());
            for path in tqdm(files.iter()) {
                loaded.push(ResultCollection::load_from_path(path)?);
            }
            let merged = merge(&loaded)?;
            let output = output.unwrap_or_else(|| config.filename.clone());
            merged.persist_to_path(&output)?;
            info!(
                inputs = loaded.len(),
                networks = merged.len(),
                output = %output.display(),
                "merge complete"
            );
        }
        Command::Summary { file, top } => {
            let path = file.unwrap_or_else(|| config.filename.clone());
            let result = ResultCollection::load_from_path(&path)?;
            let summary = result.summary(top.unwrap_or(config.summary_top));
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|err| ResultError::Serialization(err.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
