//! Core types and the detection kernel shared between native and WASM builds.
//!
//! Nothing in here depends on tower-lsp; the native and wasm front ends
//! convert to their own protocol types at the edge.

pub mod types;

pub use types::*;
