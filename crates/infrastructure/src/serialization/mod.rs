//! JSON serialization for the settings file.
//!
//! Writes 2-space indented JSON with a trailing newline so the file stays
//! pleasant to edit by hand.

mod json;

pub use json::*;
