//! Sambharalu Application - Client operations and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for external dependencies)
//! - Configuration resolution
//! - Endpoint-candidate fallback over a failure-absorbing transport
//! - Demo-mode canned data
//! - The [`FestivalClient`] facade

pub mod client;
pub mod config;
pub mod demo;
pub mod endpoints;
pub mod error;
pub mod ports;
pub mod candidates;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::FestivalClient;
pub use config::{ClientConfig, DemoSettings};
pub use error::{ClientError, ClientResult};
pub use ports::{Clock, HttpClient, HttpClientError};
pub use candidates::{Attempt, Tried};
pub use transport::Transport;
