mod cli;
mod error;
mod logging;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use skewtick_core::{run_pipeline, YahooAdapter};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.pipeline_config();
    debug!(?config, "resolved pipeline configuration");

    let adapter = YahooAdapter::new().with_timeout_ms(cli.timeout_ms);
    let report = run_pipeline(&adapter, &config).await?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        writeln!(stdout, "{}", report.to_json(cli.pretty)?)?;
    } else {
        writeln!(stdout, "{}", report.headline())?;
    }

    Ok(ExitCode::SUCCESS)
}
