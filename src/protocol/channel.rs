//! Module `channel`
//!
//! The control connection: sends commands, reads replies and checks reply
//! codes against the set each protocol step allows.

use log::info;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{FtpClientError, FtpResult};
use crate::protocol::commands::Command;
use crate::protocol::reader::ResponseReader;
use crate::protocol::responses::Message;

/// Succeeds iff `message.code` is one of `expected`. An empty set rejects
/// every code.
pub fn check_code(message: &Message, expected: &[u16]) -> FtpResult<()> {
    if expected.contains(&message.code) {
        Ok(())
    } else {
        Err(FtpClientError::UnexpectedCode {
            actual: message.code,
            expected: expected.to_vec(),
        })
    }
}

/// Command/reply exchange over a single control connection.
pub struct ControlChannel<S> {
    stream: BufReader<S>,
    reader: ResponseReader,
}

impl<S> ControlChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, reader: ResponseReader) -> Self {
        Self {
            stream: BufReader::new(stream),
            reader,
        }
    }

    /// Write one command line and flush it.
    pub async fn send(&mut self, command: &Command) -> FtpResult<()> {
        let line = command.to_wire()?;
        info!("> {}", command.loggable());

        let writer = self.stream.get_mut();
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Read a single reply line without aggregating continuations.
    pub async fn read_line(&mut self) -> FtpResult<Message> {
        self.reader.read_line(&mut self.stream).await
    }

    /// Read a complete, possibly multi-line, reply.
    pub async fn read_final(&mut self) -> FtpResult<Message> {
        self.reader.read_final(&mut self.stream).await
    }

    /// Read a complete reply and check its code.
    pub async fn expect_final(&mut self, expected: &[u16]) -> FtpResult<Message> {
        let message = self.read_final().await?;
        check_code(&message, expected)?;
        Ok(message)
    }

    /// Read one reply line and check its code.
    pub async fn expect_line(&mut self, expected: &[u16]) -> FtpResult<Message> {
        let message = self.read_line().await?;
        check_code(&message, expected)?;
        Ok(message)
    }

    /// Send `command`, then read its complete reply and check the code.
    pub async fn execute(&mut self, command: &Command, expected: &[u16]) -> FtpResult<Message> {
        self.send(command).await?;
        self.expect_final(expected).await
    }

    /// Close the write side of the connection.
    pub async fn shutdown(&mut self) -> FtpResult<()> {
        self.stream.get_mut().shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::responses::{
        AUTH_FAILED, DATA_CONNECTION_ALREADY_OPEN, FILE_STATUS_OK, LOGIN_SUCCESS,
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

    #[test]
    fn test_check_code_accepts_member() {
        let message = Message::new(125, "Data connection already open", true);
        assert!(check_code(&message, &[FILE_STATUS_OK, DATA_CONNECTION_ALREADY_OPEN]).is_ok());
    }

    #[test]
    fn test_check_code_rejects_with_exact_pair() {
        let message = Message::new(AUTH_FAILED, "Login incorrect", true);
        match check_code(&message, &[LOGIN_SUCCESS]) {
            Err(FtpClientError::UnexpectedCode { actual, expected }) => {
                assert_eq!(actual, AUTH_FAILED);
                assert_eq!(expected, vec![230]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_check_code_empty_set_rejects() {
        for code in [200, 220, 226] {
            let message = Message::new(code, "", true);
            assert!(matches!(
                check_code(&message, &[]),
                Err(FtpClientError::UnexpectedCode { actual, ref expected }) if actual == code && expected.is_empty()
            ));
        }
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let (client, mut server) = duplex(1024);
        let mut channel = ControlChannel::new(client, ResponseReader::default());

        server.write_all(b"331-Password\r\n331 required\r\n").await.unwrap();
        let message = channel
            .execute(&Command::USER("bob".into()), &[331])
            .await
            .unwrap();
        assert_eq!(message, Message::new(331, "required", true));

        channel.shutdown().await.unwrap();
        let mut sent = String::new();
        server.read_to_string(&mut sent).await.unwrap();
        assert_eq!(sent, "USER bob\r\n");
    }

    #[tokio::test]
    async fn test_expect_line_does_not_aggregate() {
        let (client, mut server) = duplex(1024);
        let mut channel = ControlChannel::new(client, ResponseReader::default());

        server.write_all(b"226-Transfer complete\r\n").await.unwrap();
        let message = channel.expect_line(&[226]).await.unwrap();
        assert!(!message.is_final);
    }
}
