mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use calculation::config::load_config;
use calculation::domain::verify::verify_operations;
use calculation::{CalculationLocalClient, DecompositionService};
use calculation_sdk::CalculationApi;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::AppConfig;

/// Calculation CLI - compiles arithmetic expressions into dependency-ordered operations
#[derive(Parser, Debug)]
#[command(name = "calculation-cli")]
#[command(about = "Compiles arithmetic expressions into dependency-ordered operations")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum operations per expression (overrides config)
    #[arg(long)]
    max_operations: Option<i64>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that an expression is well-formed
    Validate {
        expression: String,
    },
    /// Decompose an expression and print the operations as JSON
    Decompose {
        expression: String,

        /// Bind every operation to this calculation id
        #[arg(long)]
        calculation_id: Option<Uuid>,

        /// Verify the ordering of the emitted operations before printing
        #[arg(long)]
        verify: bool,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(max_operations) = cli.max_operations {
        config.apply_max_operations(max_operations);
    }

    logging::init_logging(&config.logging.level, cli.verbose);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let module_config = load_config(&config)?;
    let service = Arc::new(DecompositionService::new(&module_config));
    tracing::debug!(
        max_operations = service.max_operations(),
        "calculation service ready"
    );
    let client: Arc<dyn CalculationApi> = Arc::new(CalculationLocalClient::new(service));

    let Some(command) = cli.command else {
        anyhow::bail!("no command given, see --help");
    };

    match command {
        Commands::Validate { expression } => {
            client.validate(&expression).await?;
            println!("valid");
        }
        Commands::Decompose {
            expression,
            calculation_id,
            verify,
            compact,
        } => {
            let mut decomposition = client.decompose(&expression).await?;
            if let Some(calculation_id) = calculation_id {
                decomposition.bind(calculation_id);
            }
            if verify {
                verify_operations(&decomposition.operations)
                    .context("emitted operations are not topologically ordered")?;
            }
            let rendered = if compact {
                serde_json::to_string(&decomposition)?
            } else {
                serde_json::to_string_pretty(&decomposition)?
            };
            println!("{rendered}");
        }
    }

    Ok(())
}
