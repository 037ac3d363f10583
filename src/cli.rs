use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flight-graph")]
#[command(version, about = "Load the OpenFlights datasets into a Neo4j graph")]
pub struct Cli {
    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Clean the raw datasets and load them into Neo4j
    Run,

    /// Download the raw datasets from OpenFlights
    Fetch {
        /// Re-download files that already exist
        #[arg(short, long)]
        force: bool,
    },

    /// Clean the raw datasets without touching the database
    Clean,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Run)
    }
}
