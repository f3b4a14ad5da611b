//! po-classify — classify purchase orders from the command line.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use po_classifier::config::{EnvCredentialProvider, SecretsFileProvider};
use po_classifier::{Classifier, CredentialChain, Settings, Taxonomy};

/// Purchase-order L1/L2/L3 classifier
#[derive(Parser)]
#[command(name = "po-classify")]
#[command(version = po_classifier::PKG_VERSION)]
#[command(about = "Classify purchase orders into L1/L2/L3 categories")]
struct Args {
    /// Taxonomy JSON file (default: built-in taxonomy)
    #[arg(long, global = true, env = "PO_TAXONOMY_PATH")]
    taxonomy: Option<PathBuf>,

    /// Secrets TOML file holding GROQ_API_KEY (default: standard locations)
    #[arg(long, global = true)]
    secrets: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a PO description
    Classify {
        /// PO description (or omit to read from stdin)
        description: Option<String>,
        /// Supplier name
        #[arg(short, long)]
        supplier: Option<String>,
    },

    /// Show effective completion settings
    Settings,

    /// Print the category taxonomy
    Taxonomy,

    /// Print version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let taxonomy = match &args.taxonomy {
        Some(path) => Taxonomy::from_path(path)?,
        None => Taxonomy::builtin()?,
    };

    match args.command {
        Command::Classify {
            description,
            supplier,
        } => {
            let description = match description {
                Some(text) => text,
                None => read_stdin()?,
            };
            if description.trim().is_empty() {
                eprintln!("warning: please enter a PO description");
                return Ok(ExitCode::from(2));
            }

            let credentials = match args.secrets {
                Some(path) => CredentialChain::new()
                    .with(EnvCredentialProvider)
                    .with(SecretsFileProvider::with_path(path)),
                None => CredentialChain::default(),
            };
            let classifier = Classifier::builder()
                .settings(Settings::from_env()?)
                .credentials(credentials)
                .taxonomy(taxonomy)
                .build()?;

            let result = classifier
                .classify(&description, supplier.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.is_degraded() {
                return Ok(ExitCode::from(3));
            }
        }

        Command::Settings => {
            let settings = Settings::from_env()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }

        Command::Taxonomy => {
            println!("{}", taxonomy.to_pretty_json()?);
        }

        Command::Version => {
            println!("po-classify {}", po_classifier::version_string());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Read text from stdin; empty when stdin is an interactive terminal.
fn read_stdin() -> io::Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf)
}
