// Library exports shared by the language server, the CLI checker and the wasm build
pub mod config;
pub mod core;
pub mod detect;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod hover;
pub mod normalize;
pub mod patterns;
pub mod report;
pub mod table;
pub mod utils;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use detect::{DetectedFeature, Detector};
pub use domain::Domain;
pub use error::{BaselineError, Result};
pub use table::{CompatTable, Feature, SupportRecord};
