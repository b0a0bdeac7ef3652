//! ftp-put entry point.

mod opts;

use std::process::ExitCode;

use ftpput_upload::{FtpUploader, SuppaConnector, TracingSink};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = opts::parse_clap()?;
    let params = args.config.to_params()?;
    tracing::debug!(?params, "connection parameters");

    let mut uploader = FtpUploader::new(SuppaConnector, params).with_logger(&TracingSink);
    if uploader.put(&args.remote, &args.local) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
