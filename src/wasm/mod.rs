//! WASM entry point for the baseline checker.
//!
//! This module provides a wasm-bindgen interface for use in the browser.

mod api;

pub use api::*;
