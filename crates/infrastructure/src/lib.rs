//! Sambharalu Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the settings file and the
//! wiring that turns both into a ready [`FestivalClient`].
//!
//! [`FestivalClient`]: sambharalu_application::FestivalClient

pub mod adapters;
pub mod attachment;
pub mod persistence;
pub mod serialization;
pub mod wiring;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use attachment::{AttachmentError, load_attachment};
pub use persistence::{SettingsError, SettingsRepository};
pub use serialization::{SerializationError, from_json_bytes, to_json_pretty};
pub use wiring::{WiringError, build_client, load_client_config};
