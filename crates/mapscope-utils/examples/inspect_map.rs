//! Example: load a linker map report and print what mapscope finds in it
//!
//! ```text
//! cargo run -p mapscope-utils --example inspect_map -- build/firmware.map [other.map]
//! ```
//!
//! Set `RUST_LOG=debug` to see parse progress, `RUST_LOG=trace` to see every
//! skipped report line, `MAPSCOPE_LOG_FORMAT=json` for JSON output.

use std::env;
use std::process::ExitCode;

use mapscope_core::MemoryMap;
use mapscope_utils::init_logging;

fn main() -> ExitCode
{
    let _guard = init_logging().expect("Failed to initialize logging");

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        tracing::error!("Usage: inspect_map <report.map> [other.map]");
        return ExitCode::FAILURE;
    };

    let map = match MemoryMap::from_file(&path) {
        Ok(map) => map,
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Failed to load map report");
            return ExitCode::FAILURE;
        }
    };

    let stats = map.parse_stats();
    tracing::info!(
        regions = stats.regions,
        modules = stats.modules,
        globals = stats.globals,
        skipped_lines = stats.skipped_lines,
        "Loaded {path}"
    );

    println!("{}", map.stats_str());
    println!("{}", map.diagnose_str());

    if let Some(other_path) = args.next() {
        match MemoryMap::from_file(&other_path) {
            Ok(other) => println!("{}", map.differences_str(&other)),
            Err(e) => {
                tracing::error!(error = %e, path = %other_path, "Failed to load map report");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
