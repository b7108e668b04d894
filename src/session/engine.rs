//! Module `engine`
//!
//! Drives one download from greeting to QUIT. Every step sends a command,
//! reads the reply and checks its code; the first failure aborts the
//! session. Sockets and the destination file are released by drop on
//! every exit path.

use log::{debug, info, warn};
use std::io;
use tokio::io::AsyncWriteExt;

use crate::config::ClientConfig;
use crate::error::{FtpClientError, FtpResult};
use crate::protocol::responses::{
    DATA_CONNECTION_ALREADY_OPEN, ENTERING_PASSIVE_MODE, FILE_STATUS, FILE_STATUS_OK,
    LOGIN_SUCCESS, OK, PASSWORD_REQUIRED, READY, SERVICE_CLOSING, TRANSFER_COMPLETE,
};
use crate::protocol::{Command, ControlChannel, ResponseReader};
use crate::transfer::{
    TransferObserver, TransferSummary, copy_data, create_destination, destination_path,
    open_data_channel, parse_pasv_response,
};
use crate::url::{FtpUrl, parse_url_with_limit};
use crate::utils::network::{connect, resolve_host};

/// Runs download sessions with a fixed configuration.
pub struct TransferEngine {
    config: ClientConfig,
}

impl TransferEngine {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Parse `raw_url` and download the file it names.
    pub async fn download_url<O>(&self, raw_url: &str, observer: &mut O) -> FtpResult<TransferSummary>
    where
        O: TransferObserver + ?Sized,
    {
        let url = parse_url_with_limit(raw_url, self.config.max_url_length)?;
        self.download(&url, observer).await
    }

    /// Download `url` into the configured output directory.
    pub async fn download<O>(&self, url: &FtpUrl, observer: &mut O) -> FtpResult<TransferSummary>
    where
        O: TransferObserver + ?Sized,
    {
        let mut stage = "resolve";
        self.run(url, observer, &mut stage).await.inspect_err(|e| {
            debug!("Session aborted during {}: {}", stage, e);
        })
    }

    async fn run<O>(
        &self,
        url: &FtpUrl,
        observer: &mut O,
        stage: &mut &'static str,
    ) -> FtpResult<TransferSummary>
    where
        O: TransferObserver + ?Sized,
    {
        let config = &self.config;

        let (host, port) = url.endpoint(config.control_port)?;
        let control_addr = resolve_host(&host, port).await?;

        *stage = "greeting";
        let stream = connect(control_addr, config.connect_timeout()).await?;
        let reader = ResponseReader::new(config.max_line_length, config.read_timeout());
        let mut control = ControlChannel::new(stream, reader);
        let greeting = control.expect_final(&[READY]).await?;
        debug!("Greeting: {}", greeting);

        *stage = "login";
        info!("Logging in as {}", url.username);
        control
            .execute(&Command::USER(url.username.clone()), &[PASSWORD_REQUIRED])
            .await?;
        control
            .execute(&Command::PASS(url.password.clone()), &[LOGIN_SUCCESS])
            .await?;

        *stage = "TYPE";
        control.execute(&Command::binary(), &[OK]).await?;

        *stage = "SIZE";
        let size = control
            .execute(&Command::SIZE(url.path.clone()), &[FILE_STATUS])
            .await?;
        let total_bytes = parse_size(&size.content)?;
        info!("Remote file {} is {} bytes", url.path, total_bytes);

        *stage = "PASV";
        let pasv = control
            .execute(&Command::PASV, &[ENTERING_PASSIVE_MODE])
            .await?;
        let endpoint = parse_pasv_response(&pasv.content)?;
        let mut data = open_data_channel(&endpoint, config.connect_timeout()).await?;

        *stage = "RETR";
        control
            .execute(
                &Command::RETR(url.path.clone()),
                &[FILE_STATUS_OK, DATA_CONNECTION_ALREADY_OPEN],
            )
            .await?;

        *stage = "transfer";
        let destination = destination_path(&config.output_dir_path(), url)?;
        let mut file = create_destination(&destination, config.file_mode).await?;
        let state = copy_data(
            &mut data,
            &mut file,
            total_bytes,
            config.buffer_size,
            config.read_timeout(),
            &mut *observer,
        )
        .await?;

        file.flush().await?;
        drop(file);
        drop(data);

        if state.bytes_transferred != total_bytes {
            warn!(
                "Received {} bytes but SIZE reported {}",
                state.bytes_transferred, total_bytes
            );
        }

        // A single status line follows the data loop
        *stage = "transfer status";
        control.expect_line(&[TRANSFER_COMPLETE]).await?;

        *stage = "QUIT";
        control.send(&Command::QUIT).await?;
        control.expect_line(&[SERVICE_CLOSING]).await?;
        close_control(&mut control).await?;

        let elapsed = state.elapsed();
        observer.on_complete(state.bytes_transferred, elapsed);
        info!(
            "Downloaded {} to {} ({} bytes)",
            url,
            destination.display(),
            state.bytes_transferred
        );

        Ok(TransferSummary {
            destination,
            bytes_transferred: state.bytes_transferred,
            total_bytes,
            elapsed,
        })
    }
}

/// Shut down the control connection. A peer that already hung up after
/// 221 is not an error.
async fn close_control<S>(control: &mut ControlChannel<S>) -> FtpResult<()>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    match control.shutdown().await {
        Err(FtpClientError::IoError(e)) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
        other => other,
    }
}

/// Parse the byte count from the text of a 213 reply.
///
/// Leading whitespace is skipped and trailing text after the digits is
/// ignored.
pub fn parse_size(content: &str) -> FtpResult<u64> {
    let trimmed = content.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();

    trimmed[..digits]
        .parse::<u64>()
        .map_err(|_| FtpClientError::InvalidSizeResponse(content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert_eq!(parse_size(" 42").unwrap(), 42);
        assert_eq!(parse_size("0").unwrap(), 0);
        assert_eq!(parse_size("4096 bytes").unwrap(), 4096);
    }

    #[test]
    fn test_parse_size_rejects_non_numeric() {
        for content in ["not-a-number", "", "-1", "bytes: 12", "99999999999999999999999"] {
            assert!(
                matches!(parse_size(content), Err(FtpClientError::InvalidSizeResponse(_))),
                "{content} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_url_fails_before_connecting() {
        let engine = TransferEngine::new(ClientConfig::default());
        let mut observer = crate::transfer::NoProgress;
        let err = engine
            .download_url("http://example.com/file", &mut observer)
            .await
            .unwrap_err();
        assert!(matches!(err, FtpClientError::MalformedUrl(_)));
    }
}
