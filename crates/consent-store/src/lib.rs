//! Consent Store — in-memory user registry persisted as one JSON file.
//!
//! The registry is read once at startup and rewritten in full on save.
//! Each top-level key is an opaque user identity; each value holds the
//! display name and the consent flags.

pub mod registry;

pub use registry::Registry;
