//! Reply line parsing
//!
//! Turns one control line (terminator already stripped) into a `Message`.

use crate::error::{FtpClientError, FtpResult};
use crate::protocol::responses::Message;

/// Parse a reply line of the form `<digits><separator><text>`.
///
/// Returns `Ok(None)` for lines that do not start with a reply code
/// followed by at least one character; those are server chatter.
pub fn parse_reply_line(line: &str) -> FtpResult<Option<Message>> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Ok(None);
    }

    let Some(separator) = line[digits..].chars().next() else {
        return Ok(None);
    };

    let code = line[..digits].parse::<u16>().map_err(|_| {
        FtpClientError::InvalidResponse(format!("Reply code out of range in {:?}", line))
    })?;

    let is_final = match separator {
        '-' => false,
        ' ' => true,
        other => {
            return Err(FtpClientError::InvalidResponse(format!(
                "Unknown separator {:?} after code {}",
                other, code
            )));
        }
    };

    let content = &line[digits + separator.len_utf8()..];
    Ok(Some(Message::new(code, content, is_final)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_final_line() {
        let message = parse_reply_line("230 User logged in, proceed").unwrap().unwrap();
        assert_eq!(message, Message::new(230, "User logged in, proceed", true));
    }

    #[test]
    fn test_parse_continuation_line() {
        let message = parse_reply_line("220-Welcome to RAX FTP Server").unwrap().unwrap();
        assert_eq!(message, Message::new(220, "Welcome to RAX FTP Server", false));
    }

    #[test]
    fn test_parse_empty_text() {
        let message = parse_reply_line("200 ").unwrap().unwrap();
        assert_eq!(message, Message::new(200, "", true));
    }

    #[test]
    fn test_chatter_is_skipped() {
        assert_eq!(parse_reply_line("").unwrap(), None);
        assert_eq!(parse_reply_line("   indented banner text").unwrap(), None);
        assert_eq!(parse_reply_line("Welcome!").unwrap(), None);
        assert_eq!(parse_reply_line("220").unwrap(), None);
    }

    #[test]
    fn test_unknown_separator_is_invalid() {
        assert!(matches!(
            parse_reply_line("200x"),
            Err(FtpClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_reply_line("150:Opening"),
            Err(FtpClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_code_overflow_is_invalid() {
        assert!(matches!(
            parse_reply_line("99999999 too big"),
            Err(FtpClientError::InvalidResponse(_))
        ));
    }
}
