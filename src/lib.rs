//! unity-idm-client - Client library for the Unity IDM REST administration API
//!
//! This crate provides a thin client for querying groups, entities and
//! attributes on a Unity IDM server over its REST administration interface.
//! Responses are returned as decoded JSON values; their schemas are owned by
//! the remote service.
//!
//! # Example
//!
//! ```no_run
//! use unity_idm_client::{ClientConfig, UnityClient};
//!
//! # async fn run() -> unity_idm_client::Result<()> {
//! let config = ClientConfig::new("https://idm.example.org").with_auth("admin", "secret");
//! let client = UnityClient::new(config)?;
//! let groups = client.fetch_entity_groups(3).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The Unity IDM API client
//! - [`config`] - Client configuration and loading
//! - [`error`] - Error types and error handling

pub mod client;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use client::UnityClient;
pub use config::{ClientConfig, Credentials, TlsPolicy};
pub use error::{Result, UnityError};
