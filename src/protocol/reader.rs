//! Module `reader`
//!
//! Reads CR LF terminated reply lines from the control connection and
//! aggregates multi-line replies down to their final line.

use log::{debug, info};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::{FtpClientError, FtpResult};
use crate::protocol::parser::parse_reply_line;
use crate::protocol::responses::Message;
use crate::utils::network::with_timeout;

/// Longest reply line kept by default
pub const MAX_LINE_LENGTH: usize = 2048;

/// Reads structured replies from any buffered async byte stream.
#[derive(Debug, Clone, Copy)]
pub struct ResponseReader {
    max_line_length: usize,
    read_timeout: Option<Duration>,
}

impl Default for ResponseReader {
    fn default() -> Self {
        Self::new(MAX_LINE_LENGTH, None)
    }
}

impl ResponseReader {
    pub fn new(max_line_length: usize, read_timeout: Option<Duration>) -> Self {
        Self {
            max_line_length,
            read_timeout,
        }
    }

    /// Read the next reply line, skipping lines that carry no reply code.
    pub async fn read_line<R>(&self, conn: &mut R) -> FtpResult<Message>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            let raw = self.read_raw_line(conn).await?;
            let line = String::from_utf8_lossy(&raw);
            info!("< {}", line);

            match parse_reply_line(&line)? {
                Some(message) => return Ok(message),
                None => debug!("Skipping line without reply code"),
            }
        }
    }

    /// Read lines until the final line of a reply and return only that line.
    pub async fn read_final<R>(&self, conn: &mut R) -> FtpResult<Message>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            let message = self.read_line(conn).await?;
            if message.is_final {
                return Ok(message);
            }
        }
    }

    /// Read up to the next CR, keeping at most `max_line_length` bytes.
    /// The byte after the CR is the LF and is discarded unread.
    async fn read_raw_line<R>(&self, conn: &mut R) -> FtpResult<Vec<u8>>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = Vec::new();
        let mut received_any = false;

        loop {
            let (terminated, used) = {
                let available = with_timeout(self.read_timeout, conn.fill_buf()).await?;
                if available.is_empty() {
                    if !received_any {
                        return Err(FtpClientError::IoError(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "control connection closed by server",
                        )));
                    }
                    // Peer closed mid-line; what arrived is the last line
                    return Ok(line);
                }
                received_any = true;

                match available.iter().position(|&byte| byte == b'\r') {
                    Some(pos) => {
                        self.keep(&mut line, &available[..pos]);
                        (true, pos + 1)
                    }
                    None => {
                        self.keep(&mut line, available);
                        (false, available.len())
                    }
                }
            };
            conn.consume(used);

            if terminated {
                let mut line_feed = [0u8; 1];
                with_timeout(self.read_timeout, conn.read(&mut line_feed)).await?;
                return Ok(line);
            }
        }
    }

    fn keep(&self, line: &mut Vec<u8>, bytes: &[u8]) {
        let room = self.max_line_length.saturating_sub(line.len());
        line.extend_from_slice(&bytes[..bytes.len().min(room)]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_multi_line_reply_keeps_final_line() {
        let mut conn: &[u8] = b"150-line one\r\n150 line two\r\n";
        let message = ResponseReader::default().read_final(&mut conn).await.unwrap();
        assert_eq!(message, Message::new(150, "line two", true));
        assert!(conn.is_empty());
    }

    #[tokio::test]
    async fn test_read_line_returns_continuation() {
        let mut conn: &[u8] = b"220-Welcome\r\n220 Ready\r\n";
        let reader = ResponseReader::default();
        let first = reader.read_line(&mut conn).await.unwrap();
        assert_eq!(first, Message::new(220, "Welcome", false));
        let second = reader.read_line(&mut conn).await.unwrap();
        assert_eq!(second, Message::new(220, "Ready", true));
    }

    #[tokio::test]
    async fn test_chatter_lines_are_skipped() {
        let mut conn: &[u8] = b"220-RAX FTP\r\n   Please be nice\r\n\r\n220 Service ready\r\n";
        let message = ResponseReader::default().read_final(&mut conn).await.unwrap();
        assert_eq!(message, Message::new(220, "Service ready", true));
    }

    #[tokio::test]
    async fn test_byte_after_cr_is_discarded() {
        let mut conn: &[u8] = b"200 Type set\rX331 Next\r\n";
        let reader = ResponseReader::default();
        assert_eq!(reader.read_line(&mut conn).await.unwrap().code, 200);
        let next = reader.read_line(&mut conn).await.unwrap();
        assert_eq!(next, Message::new(331, "Next", true));
    }

    #[tokio::test]
    async fn test_bad_separator_fails() {
        let mut conn: &[u8] = b"226*Done\r\n";
        let err = ResponseReader::default().read_final(&mut conn).await.unwrap_err();
        assert!(matches!(err, FtpClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_long_line_is_truncated() {
        let mut raw = b"213 ".to_vec();
        raw.extend(std::iter::repeat_n(b'9', 100));
        raw.extend_from_slice(b"\r\n226 Done\r\n");
        let mut conn: &[u8] = &raw;

        let reader = ResponseReader::new(16, None);
        let message = reader.read_line(&mut conn).await.unwrap();
        assert_eq!(message.code, 213);
        assert_eq!(message.content, "9".repeat(12));

        // The dropped tail does not leak into the next reply
        let next = reader.read_line(&mut conn).await.unwrap();
        assert_eq!(next, Message::new(226, "Done", true));
    }

    #[tokio::test]
    async fn test_eof_fails() {
        let mut conn: &[u8] = b"";
        let err = ResponseReader::default().read_line(&mut conn).await.unwrap_err();
        assert!(matches!(err, FtpClientError::IoError(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[tokio::test]
    async fn test_eof_inside_multi_line_reply_fails() {
        let mut conn: &[u8] = b"230-Partial\r\n";
        let err = ResponseReader::default().read_final(&mut conn).await.unwrap_err();
        assert!(matches!(err, FtpClientError::IoError(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        use tokio::io::AsyncWriteExt;

        let (client, mut server) = tokio::io::duplex(64);
        let mut conn = tokio::io::BufReader::new(client);
        let reader = ResponseReader::new(2048, Some(Duration::from_millis(50)));

        let err = reader.read_final(&mut conn).await.unwrap_err();
        assert!(matches!(err, FtpClientError::IoError(ref e) if e.kind() == io::ErrorKind::TimedOut));

        // A line that stalls before its CR times out as well
        server.write_all(b"220 Rea").await.unwrap();
        let err = reader.read_line(&mut conn).await.unwrap_err();
        assert!(matches!(err, FtpClientError::IoError(ref e) if e.kind() == io::ErrorKind::TimedOut));
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_accepted() {
        let mut conn: &[u8] = b"221 Goodbye";
        let message = ResponseReader::default().read_line(&mut conn).await.unwrap();
        assert_eq!(message, Message::new(221, "Goodbye", true));
    }
}
