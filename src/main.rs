use anyhow::Result;
use flight_graph::{
    cleaner::{clean_all, CleanStats},
    cli::{Cli, Commands},
    config::Config,
    download::fetch_raw_data,
    graph::Neo4jStore,
    pipeline::{run_pipeline, PipelineOptions},
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse_args();

    match cli.command() {
        Commands::Run => {
            let config = Config::from_env()?;
            let mut store = Neo4jStore::connect(&config.neo4j)?;

            let options = PipelineOptions {
                dirs: &config.dirs,
                source: &config.source,
                batch_size: config.batch_size,
            };
            let report = run_pipeline(&mut store, &options)?;

            print_clean_stats(&report.cleaned);
            println!(
                "Loaded {} airports, {} airlines, {} routes",
                report.loaded.airports, report.loaded.airlines, report.loaded.routes
            );
            for rel in &report.relationships {
                println!("  {}: {} edges", rel.name, rel.edges);
            }
            println!("Total time: {:.3} seconds", report.elapsed.as_secs_f64());
        }

        Commands::Fetch { force } => {
            let dirs = Config::dirs_from_env();
            let fetched = fetch_raw_data(&dirs.raw_dir, *force)?;
            println!("Downloaded {} files to {:?}", fetched, dirs.raw_dir);
        }

        Commands::Clean => {
            let start = Instant::now();
            let dirs = Config::dirs_from_env();
            print_clean_stats(&clean_all(&dirs)?);
            println!("Total time: {:.3} seconds", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}

fn print_clean_stats(cleaned: &[CleanStats]) {
    println!("\nCleaned:");
    for stats in cleaned {
        println!(
            "  {}: {} rows ({} dropped, {} values replaced)",
            stats.dataset, stats.rows_written, stats.rows_dropped, stats.values_replaced
        );
    }
}
