//! HTTP client module for the Unity IDM REST administration API.
//!
//! This module provides the client for querying groups, entities and
//! attributes on a Unity IDM server.

pub mod api;


pub use api::UnityClient;
