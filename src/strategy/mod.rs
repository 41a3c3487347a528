//! Scanning Strategy Module
//!
//! - Parallel: independent windows of one buffer scanned on a thread pool

pub mod parallel;

pub use parallel::scan_windows;
