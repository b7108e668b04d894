//! RAX FTP Get - Entry Point
//!
//! Downloads a single file from an FTP server given an `ftp://` URL.

use clap::Parser;
use log::info;
use std::process::ExitCode;

use rax_ftp_get::error::{exit_code, report_error};
use rax_ftp_get::transfer::{ConsoleProgress, NoProgress, TransferObserver};
use rax_ftp_get::utils::logging::setup_logging;
use rax_ftp_get::{ClientConfig, FtpClientError, TransferEngine};

/// Download a single file over FTP
#[derive(Parser, Debug)]
#[command(name = "rax-ftp-get", version)]
struct Args {
    /// ftp://[user[:pass]@]host[:port]/path
    #[arg(value_name = "FTP URL")]
    url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures; usage errors exit 1, not clap's 2
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => return fail(FtpClientError::from(e)),
    };

    let mut observer: Box<dyn TransferObserver> = if config.show_progress {
        Box::new(ConsoleProgress::stdout())
    } else {
        Box::new(NoProgress)
    };

    let engine = TransferEngine::new(config);
    match engine.download_url(&args.url, observer.as_mut()).await {
        Ok(summary) => {
            info!("Saved {}", summary.destination.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail(err: FtpClientError) -> ExitCode {
    report_error(&err);
    ExitCode::from(exit_code(&err))
}
