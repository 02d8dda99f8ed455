#![no_main]

use libfuzzer_sys::fuzz_target;
use user_disable::domain::DisableRequest;

const BASE: &str = "https://graph.microsoft.com";

fuzz_target!(|data: &[u8]| {
    if let Ok(upn) = std::str::from_utf8(data) {
        let request = DisableRequest::new(BASE, upn);
        let segment = request
            .url()
            .strip_prefix("https://graph.microsoft.com/v1.0/users/")
            .expect("URL must start with the users collection");

        // The UPN must stay a single path segment and decode back unchanged
        assert!(!segment.contains(['/', '?', '#']));
        assert_eq!(urlencoding::decode(segment).expect("valid UTF-8"), upn);
    }
});
