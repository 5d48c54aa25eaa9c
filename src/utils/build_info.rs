//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `delve --version`.
pub fn version_line() -> String {
    format!("delve {} ({})", BUILD_DATE, BUILD_COMMIT)
}
