//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `docuedit_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from the UI shell/FFI runtime setup.
    println!("docuedit_core ping={}", docuedit_core::ping());
    println!("docuedit_core version={}", docuedit_core::core_version());
}
