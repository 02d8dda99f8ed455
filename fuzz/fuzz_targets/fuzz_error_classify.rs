#![no_main]

use libfuzzer_sys::fuzz_target;
use user_disable::domain::{Classification, classify};
use user_disable_sdk::{ErrorKind, ReportedError};

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        let report = ReportedError::from_message(message);
        let _ = classify(&report);

        // Structured fields always win over message text
        let report = ReportedError {
            message: message.to_owned(),
            status_code: Some(403),
            kind: Some(ErrorKind::Api),
        };
        assert_eq!(classify(&report), Classification::Fatal);
    }
});
