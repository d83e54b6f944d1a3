#![no_main]

use calculation_sdk::OperandToken;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 256 {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that decodes must survive an encode/decode cycle unchanged
        if let Ok(token) = s.parse::<OperandToken>() {
            assert_eq!(token.to_string().parse::<OperandToken>().ok(), Some(token));
        }
    }
});
