use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use std::process::ExitCode;
use tracing::{debug, error};

use s3put::config::{self, Cli, Config};
use s3put::logging::{self, LogFormat};
use s3put::s3::upload_all;
use s3put::report::report;
use s3put::{Error, S3Client};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env early so LOG_LEVEL and S3_* can come from it
    dotenv::dotenv().ok();

    let log = logging::init();
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    match run(&log).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &program);
            ExitCode::FAILURE
        }
    }
}

async fn run(log: &LogFormat) -> Result<()> {
    let cli = match Cli::try_parse_from(config::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if matches!(
            e.kind(),
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
        ) =>
        {
            e.exit()
        }
        Err(e) => {
            let message = e.to_string();
            error!("{}", message.lines().next().unwrap_or_default());
            return Err(Error::Usage.into());
        }
    };

    let config = Config::from_env(cli)?;
    debug!("{:?}", config);

    log.enable_timestamps();

    let client = S3Client::new(&config);
    let jobs = upload_all(&client, &config).await?;
    debug!("uploaded {} file(s) to s3://{}", jobs.len(), client.bucket());

    Ok(())
}
