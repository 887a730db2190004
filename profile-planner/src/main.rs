use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use profile_planner::cache::CacheConfig;
use profile_planner::planner::ProfileConfig;
use profile_planner::request::ProfileRequest;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Rank a request's options and print them with their schedules as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Request document: date, ordering, limit, options and timetable.
    request: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = cli.request.display();
    let request = match ProfileRequest::from_path(&cli.request) {
        Ok(request) => request,
        Err(e) => {
            error!(%path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    let response = match request
        .answer(&ProfileConfig::default(), &CacheConfig::default())
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!(%path, "{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("failed to serialize response: {e}");
            ExitCode::FAILURE
        }
    }
}
