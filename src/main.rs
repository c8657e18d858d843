use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, CommandFactory, Parser, Subcommand};
use dealboard::commands::deal::DealFields;
use dealboard::commands::{board, contact, deal, init, move_cmd, stats};
use dealboard::completions::{generate_completions, Shell};
use dealboard::config::Config;
use dealboard::models::deal::DealStage;
use dealboard::models::filter::{StageFilter, ValueRange};
use dealboard::validation::{
    clap_close_date_parser, clap_probability_parser, clap_stage_filter_parser, clap_stage_parser,
    clap_value_range_parser,
};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DEALBOARD_LOG";

#[derive(Parser)]
#[command(name = "dealboard")]
#[command(about = "Sales pipeline board: filter, total and move deals across stages", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a config file (default: ./dealboard.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for the file backend (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, seeded with a sample pipeline
    Init {
        /// Overwrite existing pipeline data
        #[arg(long)]
        force: bool,

        /// Create empty record files instead of sample data
        #[arg(long)]
        empty: bool,
    },

    /// Show the pipeline board, one column per stage
    Board {
        /// Only show one stage (all, new, qualified, proposal, negotiation, closed-won, closed-lost)
        #[arg(short, long, default_value = "all", value_parser = clap_stage_filter_parser)]
        stage: StageFilter,

        /// Value range: all, MIN-MAX or MIN+ (e.g. 10000-50000, 100000+)
        #[arg(long, default_value = "all", value_parser = clap_value_range_parser)]
        value: ValueRange,
    },

    /// Move a deal to another stage
    Move {
        /// Deal ID
        id: u64,

        /// Target stage
        #[arg(value_parser = clap_stage_parser)]
        stage: DealStage,
    },

    /// Manage deals
    Deal {
        #[command(subcommand)]
        command: DealCommands,
    },

    /// Manage contacts
    Contact {
        #[command(subcommand)]
        command: ContactCommands,
    },

    /// Show pipeline statistics
    Stats,

    /// Generate shell completion script
    Completions {
        /// Shell type (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum DealCommands {
    /// List deals
    List {
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,

        /// Only list one stage
        #[arg(short, long, default_value = "all", value_parser = clap_stage_filter_parser)]
        stage: StageFilter,
    },

    /// Show a single deal
    Show {
        /// Deal ID
        id: u64,
    },

    /// Create a deal
    Create {
        #[command(flatten)]
        fields: DealArgs,
    },

    /// Edit a deal; only the given fields change
    Edit {
        /// Deal ID
        id: u64,

        #[command(flatten)]
        fields: DealArgs,
    },

    /// Delete a deal
    Delete {
        /// Deal ID
        id: u64,
    },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List contacts
    List,
}

#[derive(Args)]
struct DealArgs {
    /// Deal title
    #[arg(long)]
    title: Option<String>,

    /// Deal value in dollars
    #[arg(long)]
    value: Option<f64>,

    /// Pipeline stage (default: new)
    #[arg(long, value_parser = clap_stage_parser)]
    stage: Option<DealStage>,

    /// Win probability, 0-100 (default: 10)
    #[arg(long, value_parser = clap_probability_parser)]
    probability: Option<u8>,

    /// Contact ID
    #[arg(long)]
    contact: Option<u64>,

    /// Expected close date (YYYY-MM-DD)
    #[arg(long, value_parser = clap_close_date_parser)]
    close_date: Option<DateTime<Utc>>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<DealArgs> for DealFields {
    fn from(args: DealArgs) -> Self {
        DealFields {
            title: args.title,
            value: args.value,
            stage: args.stage,
            probability: args.probability,
            contact: args.contact,
            close_date: args.close_date,
            notes: args.notes,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "dealboard=debug" } else { "dealboard=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Completions { shell } = &cli.command {
        let shell = Shell::from_str(shell)?;
        let mut cmd = Cli::command();
        generate_completions(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.store.data_dir = dir;
    }

    match cli.command {
        Commands::Init { force, empty } => init::execute(&config, force, empty),
        Commands::Board { stage, value } => board::execute(&config, stage, value),
        Commands::Move { id, stage } => move_cmd::execute(&config, id, stage),
        Commands::Deal { command } => match command {
            DealCommands::List { search, stage } => deal::list(&config, search.as_deref(), stage),
            DealCommands::Show { id } => deal::show(&config, id),
            DealCommands::Create { fields } => deal::create(&config, fields.into()),
            DealCommands::Edit { id, fields } => deal::edit(&config, id, fields.into()),
            DealCommands::Delete { id } => deal::delete(&config, id),
        },
        Commands::Contact { command } => match command {
            ContactCommands::List => contact::list(&config),
        },
        Commands::Stats => stats::execute(&config),
        Commands::Completions { .. } => Ok(()),
    }
}
