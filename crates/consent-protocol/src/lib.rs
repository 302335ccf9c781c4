//! Consent protocol — location catalog and per-user consent transitions.
//!
//! The catalog maps a location code to the ordered set of consent options
//! offered there. The state machine applies view/grant/revoke to a single
//! user record in memory; persistence is left to the registry.

pub mod catalog;
pub mod consent;

pub use catalog::{find_option, options_for, options_for_opt, DEFAULT_OPTIONS, SPECIAL_LOCATIONS, SPECIAL_OPTIONS};
pub use consent::{grant, relocate, revoke, view, ConsentEntry, RevokeOutcome};
