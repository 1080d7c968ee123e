#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(parsed) = barehttp::parse_response(s) else {
        return;
    };
    let response = barehttp::Response::from(parsed);
    let _ = response.code();
    let _ = response.body();
    let _ = response.header("content-type");
    let _ = response.to_string();
});
