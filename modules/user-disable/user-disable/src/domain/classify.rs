//! Retry/fatal classification used by the `error` handler.
//!
//! Classification is keyed on the structured status code and kind carried by
//! [`ReportedError`]. Only when the runner supplied neither does it fall back
//! to finding the status code in the message text.

use tracing::debug;
use user_disable_sdk::{ErrorKind, ReportedError};

/// Statuses that signal a transient condition.
pub const RETRYABLE_STATUSES: [u16; 4] = [429, 502, 503, 504];

/// Statuses that will not change on retry.
pub const FATAL_STATUSES: [u16; 2] = [401, 403];

/// Outcome of classifying a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Retry,
    Fatal,
}

/// Decide whether a reported failure should be retried.
///
/// | input                                  | outcome |
/// |----------------------------------------|---------|
/// | kind validation/configuration/auth     | fatal   |
/// | kind network                           | retry   |
/// | status 429, 502, 503, 504              | retry   |
/// | status 401, 403                        | fatal   |
/// | anything else                          | retry   |
#[must_use]
pub fn classify(report: &ReportedError) -> Classification {
    match report.kind {
        Some(ErrorKind::Validation | ErrorKind::Configuration | ErrorKind::Authentication) => {
            return Classification::Fatal;
        }
        Some(ErrorKind::Network) => return Classification::Retry,
        Some(ErrorKind::Api) | None => {}
    }

    let status = report.status_code.or_else(|| {
        let found = status_in_message(&report.message);
        debug!(status = ?found, "no structured status code, read status from message");
        found
    });

    match status {
        Some(code) if FATAL_STATUSES.contains(&code) => Classification::Fatal,
        _ => Classification::Retry,
    }
}

/// First known status code mentioned in `message`; retryable codes win.
fn status_in_message(message: &str) -> Option<u16> {
    RETRYABLE_STATUSES
        .iter()
        .chain(FATAL_STATUSES.iter())
        .copied()
        .find(|code| message.contains(&code.to_string()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn status(code: u16) -> ReportedError {
        ReportedError {
            message: format!("HTTP {code}"),
            status_code: Some(code),
            kind: Some(ErrorKind::Api),
        }
    }

    #[test]
    fn retryable_statuses_request_retry() {
        for code in RETRYABLE_STATUSES {
            assert_eq!(classify(&status(code)), Classification::Retry, "status {code}");
        }
    }

    #[test]
    fn auth_statuses_are_fatal() {
        for code in FATAL_STATUSES {
            assert_eq!(classify(&status(code)), Classification::Fatal, "status {code}");
        }
    }

    #[test]
    fn other_statuses_default_to_retry() {
        for code in [400, 404, 409, 500] {
            assert_eq!(classify(&status(code)), Classification::Retry, "status {code}");
        }
    }

    #[test]
    fn structured_status_wins_over_message_text() {
        let report = ReportedError {
            message: "upstream said 403 earlier".to_owned(),
            status_code: Some(503),
            kind: Some(ErrorKind::Api),
        };
        assert_eq!(classify(&report), Classification::Retry);
    }

    #[test]
    fn kinds_without_status() {
        let mut report = ReportedError::from_message("userPrincipalName is required");
        report.kind = Some(ErrorKind::Validation);
        assert_eq!(classify(&report), Classification::Fatal);

        report.kind = Some(ErrorKind::Configuration);
        assert_eq!(classify(&report), Classification::Fatal);

        report.kind = Some(ErrorKind::Authentication);
        assert_eq!(classify(&report), Classification::Fatal);

        report.kind = Some(ErrorKind::Network);
        assert_eq!(classify(&report), Classification::Retry);
    }

    #[test]
    fn message_only_reports_use_embedded_status() {
        let fatal = ReportedError::from_message("Graph API request failed: HTTP 403 Forbidden: denied");
        assert_eq!(classify(&fatal), Classification::Fatal);

        let retry = ReportedError::from_message("Graph API request failed: HTTP 429 Too Many Requests");
        assert_eq!(classify(&retry), Classification::Retry);

        let unknown = ReportedError::from_message("socket hang up");
        assert_eq!(classify(&unknown), Classification::Retry);
    }

    #[test]
    fn retryable_code_in_message_wins_over_fatal_code() {
        let report = ReportedError::from_message("401 after 503");
        assert_eq!(classify(&report), Classification::Retry);
    }
}
