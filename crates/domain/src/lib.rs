//! Sambharalu Domain - Core types
//!
//! This crate defines the domain model for the festival records client:
//! sessions, requests and decoded responses, endpoint candidates, records,
//! signup forms and upload chunking.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod candidate;
pub mod error;
pub mod record;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;
pub mod upload;

pub use auth::{AccessGrant, OtpDispatch, SignupForm, SignupVerified, UserProfile};
pub use candidate::{EndpointCandidate, PayloadEncoding, PayloadShape};
pub use error::{DomainError, DomainResult};
pub use record::{Category, CreatedRecord, Location, RecordDraft, RecordSummary};
pub use response::{ApiResponse, ResponseBody};
pub use session::Session;
pub use settings::ClientSettings;
pub use upload::{Attachment, CHUNK_SIZE, UploadChunk, UploadReport, chunk};
