use clap::Parser;
use database::{db::create_connection, error::ServiceError, services::import::ImportService};
use log::{error, info};
use migration::{DbErr, Migrator, MigratorTrait};
use models::catalog_data::CatalogDocument;
use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode};
use thiserror::Error;

/// Loads departments, faculty, courses, and sections from a JSON catalog
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the catalog document
    catalog: PathBuf,

    /// Database to write to
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Apply pending migrations before importing
    #[arg(long)]
    migrate: bool,

    /// Parse and validate the document without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Error)]
enum ImportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid catalog: {0}")]
    Invalid(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn read_catalog(path: &PathBuf) -> Result<CatalogDocument, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.clone(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ImportError::Parse {
        path: path.clone(),
        source,
    })
}

async fn run(cli: Cli) -> Result<(), ImportError> {
    let document = read_catalog(&cli.catalog)?;
    document.validate().map_err(ImportError::Invalid)?;

    if cli.dry_run {
        info!(
            "{} is valid: {} departments",
            cli.catalog.display(),
            document.departments.len()
        );
        return Ok(());
    }

    let db = create_connection(&cli.database_url).await?;
    if cli.migrate {
        Migrator::up(&db, None).await?;
    }

    let report = ImportService::import_catalog(&db, document).await?;
    info!(
        "Created {} departments, {} faculty, {} courses, {} sections ({} already present)",
        report.departments_created,
        report.faculty_created,
        report.courses_created,
        report.sections_created,
        report.sections_skipped
    );

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
