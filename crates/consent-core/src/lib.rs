//! Consent Core — shared domain types, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConsentConfig, ConsentPaths};
pub use error::{Error, Result};
pub use types::{ConsentOption, ConsentState, LocationCode, User};
