//! Config fuzz target: feed arbitrary bytes through parse and, when the
//! document is well formed, all the way through generation. Neither stage
//! may panic; errors surface as Err values or per-container failures.
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(resolved) = cdlgen::parse_resolved(s) {
        let _ = cdlgen::generate_config(&resolved);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}
