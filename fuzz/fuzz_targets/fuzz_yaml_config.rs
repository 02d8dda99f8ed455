#![no_main]

use figment::Figment;
use figment::providers::{Format, Serialized, Yaml};
use libfuzzer_sys::fuzz_target;
use user_disable::UserDisableConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let figment = Figment::from(Serialized::defaults(UserDisableConfig::default()))
            .merge(Yaml::string(s));
        // Must never panic; any accepted config must also pass validation again
        if let Ok(config) = UserDisableConfig::from_figment(&figment) {
            assert!(config.validate().is_ok());
        }
    }
});
