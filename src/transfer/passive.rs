//! Passive mode negotiation
//!
//! Extracts the data endpoint from a 227 reply and connects to it.

use log::info;
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::error::{FtpClientError, FtpResult};
use crate::transfer::results::PassiveEndpoint;
use crate::utils::network::connect;

const PASV_PREFIX: &str = "Entering Passive Mode (";

/// Parse `Entering Passive Mode (a,b,c,d,p1,p2)` from the text of a 227
/// reply. Text after the closing parenthesis is ignored.
pub fn parse_pasv_response(text: &str) -> FtpResult<PassiveEndpoint> {
    let invalid = || FtpClientError::InvalidPasvResponse(text.to_string());

    let tuple = text.strip_prefix(PASV_PREFIX).ok_or_else(invalid)?;
    let (tuple, _) = tuple.split_once(')').ok_or_else(invalid)?;

    let fields = tuple
        .split(',')
        .map(|field| field.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| invalid())?;

    let &[a, b, c, d, p1, p2] = fields.as_slice() else {
        return Err(invalid());
    };

    Ok(PassiveEndpoint {
        address: Ipv4Addr::new(a, b, c, d),
        port: u16::from(p1) * 256 + u16::from(p2),
    })
}

/// Open the data connection announced by the server.
pub async fn open_data_channel(
    endpoint: &PassiveEndpoint,
    connect_timeout: Option<Duration>,
) -> FtpResult<TcpStream> {
    info!(
        "Opening passive data connection to {}:{}",
        endpoint.address, endpoint.port
    );
    connect(endpoint.socket_addr(), connect_timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(text: &str) {
        assert!(
            matches!(parse_pasv_response(text), Err(FtpClientError::InvalidPasvResponse(_))),
            "{text} should be rejected"
        );
    }

    #[test]
    fn test_parse_pasv_response() {
        let endpoint = parse_pasv_response("Entering Passive Mode (192,168,1,1,200,150)").unwrap();
        assert_eq!(endpoint.address.to_string(), "192.168.1.1");
        assert_eq!(endpoint.port, 51350);
    }

    #[test]
    fn test_trailing_text_and_spacing_accepted() {
        let endpoint = parse_pasv_response("Entering Passive Mode (127,0,0,1, 4, 1).").unwrap();
        assert_eq!(endpoint.socket_addr().to_string(), "127.0.0.1:1025");
    }

    #[test]
    fn test_port_bytes_are_high_then_low() {
        let endpoint = parse_pasv_response("Entering Passive Mode (10,0,0,2,0,21)").unwrap();
        assert_eq!(endpoint.port, 21);
        let endpoint = parse_pasv_response("Entering Passive Mode (10,0,0,2,255,255)").unwrap();
        assert_eq!(endpoint.port, 65535);
    }

    #[test]
    fn test_rejects_malformed_replies() {
        assert_invalid("");
        assert_invalid("Entering Extended Passive Mode (|||6446|)");
        assert_invalid("entering passive mode (1,2,3,4,5,6)");
        assert_invalid("Entering Passive Mode 1,2,3,4,5,6");
        assert_invalid("Entering Passive Mode (1,2,3,4,5)");
        assert_invalid("Entering Passive Mode (1,2,3,4,5,6,7)");
        assert_invalid("Entering Passive Mode (1,2,3,4,5,6");
        assert_invalid("Entering Passive Mode (256,0,0,1,4,1)");
        assert_invalid("Entering Passive Mode (1,2,3,4,-5,6)");
        assert_invalid("Entering Passive Mode (a,b,c,d,e,f)");
    }
}
