//! Error handlers
//!
//! Reports a failed session once and maps it to a process exit status.

use crate::error::types::FtpClientError;
use log::{Level, error, log_enabled};

/// Report an error once: through the logger at `error` level, or straight
/// to stderr when that level is filtered out.
pub fn report_error(err: &FtpClientError) {
    let report = format_report(err);
    if log_enabled!(Level::Error) {
        error!("{}", report);
    } else {
        eprintln!("{}", report);
    }
}

/// `Error in <operation>: <message>`
pub fn format_report(err: &FtpClientError) -> String {
    format!("Error in {}: {}", err.operation(), err)
}

/// Convert an error to the process exit status
pub fn exit_code(_err: &FtpClientError) -> u8 {
    // Every failure is terminal and indistinguishable to the caller
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_names_operation() {
        let err = FtpClientError::UnexpectedCode {
            actual: 530,
            expected: vec![230],
        };
        assert_eq!(
            format_report(&err),
            "Error in check_code: Invalid response (code 530, expected 230)"
        );
    }

    #[test]
    fn test_exit_code_is_one() {
        assert_eq!(exit_code(&FtpClientError::MalformedUrl("x".into())), 1);
        assert_eq!(exit_code(&FtpClientError::DnsError("x".into())), 1);
    }
}
