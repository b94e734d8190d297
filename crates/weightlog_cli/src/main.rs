//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `weightlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("weightlog_core ping={}", weightlog_core::ping());
    println!("weightlog_core version={}", weightlog_core::core_version());
}
