use clap::Parser;
use dbtref::*;
use std::{
    io::Read,
    path::PathBuf,
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Rewrite table references in SQL into dbt ref() / source() calls
#[derive(Parser)]
#[command(name = "dbtref")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// dbt project root (overrides DBTREF_PROJECT_DIR)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Models directory relative to the project root (overrides DBTREF_MODELS_DIR)
    #[arg(short, long)]
    models_dir: Option<String>,

    /// Print a JSON response instead of the bare SQL
    #[arg(long)]
    json: bool,

    /// Print the loaded catalog as JSON and exit
    #[arg(long)]
    list: bool,

    /// SQL file to translate, stdin when omitted
    sql_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!(%err, kind = %err.kind(), "dbtref failed");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the translation succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config = config()?;
    let project = cli.project.or_else(|| config.project_dir.clone());
    let models_dir = cli.models_dir.unwrap_or_else(|| config.models_dir.clone());

    let catalog = match &project {
        Some(root) => {
            let catalog = CatalogBuilder::new(models_dir).load_dir(root)?.build();
            info!(entries = catalog.len(), root = %root.display(), "catalog loaded");
            Some(catalog)
        }
        None => {
            info!("no project directory given, translating without a catalog");
            None
        }
    };

    if cli.list {
        let listing = catalog.as_ref().map(ReferenceMap::sorted).unwrap_or_default();
        println!("{}", to_json(&listing)?);
        return Ok(true);
    }

    let sql = match &cli.sql_file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = translate(catalog.as_ref(), &sql);
    if cli.json {
        println!("{}", to_json(&result.response())?);
    } else if let Some(err) = &result.error {
        eprintln!("error: {err}");
        print!("{}", result.output);
    } else {
        print!("{}", result.output);
    }
    Ok(result.is_success())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Io(e.into()))
}
