//! Native LSP server and its helpers.
//!
//! Everything here depends on tower-lsp or tokio and is only built with the
//! `native` feature.

pub mod adapters;
pub mod debounce;
pub mod server;

pub use adapters::*;
pub use debounce::Debouncer;
pub use server::{run, Backend};
