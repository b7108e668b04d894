//! Module `file_ops`
//!
//! Creates the local destination file and copies the data connection
//! into it chunk by chunk.

use log::{info, trace};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{FtpClientError, FtpResult};
use crate::transfer::progress::TransferObserver;
use crate::transfer::results::TransferState;
use crate::url::FtpUrl;
use crate::utils::network::with_timeout;

/// Local path for a download: the remote basename under `output_dir`.
pub fn destination_path(output_dir: &Path, url: &FtpUrl) -> FtpResult<PathBuf> {
    let name = url.file_name().ok_or_else(|| {
        FtpClientError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Cannot derive a local file name from {}", url.path),
        ))
    })?;
    Ok(output_dir.join(name))
}

/// Create or truncate the destination for writing.
pub async fn create_destination(path: &Path, mode: u32) -> FtpResult<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let file = options.open(path).await?;
    info!("Writing to {}", path.display());
    Ok(file)
}

/// Copy `data` into `destination` until end of stream, notifying
/// `observer` after every chunk.
pub async fn copy_data<R, W, O>(
    data: &mut R,
    destination: &mut W,
    total_bytes: u64,
    buffer_size: usize,
    read_timeout: Option<Duration>,
    observer: &mut O,
) -> FtpResult<TransferState>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    O: TransferObserver + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut state = TransferState::start(total_bytes);

    loop {
        let n = with_timeout(read_timeout, data.read(&mut buffer)).await?;
        if n == 0 {
            break; // End of stream
        }

        destination.write_all(&buffer[..n]).await?;
        state.record(n);
        trace!(
            "Received {} bytes ({}/{})",
            n, state.bytes_transferred, state.total_bytes
        );
        observer.on_progress(state.bytes_transferred, state.total_bytes);
    }

    state.finish();
    info!(
        "Data connection closed after {} bytes",
        state.bytes_transferred
    );
    Ok(state)
}
