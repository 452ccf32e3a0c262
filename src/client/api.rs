//! Unity IDM HTTP client API.
//!
//! This module provides the client for querying the REST administration
//! endpoints of a Unity IDM server. Every operation is a single GET request
//! whose JSON body is returned as a decoded [`serde_json::Value`], without
//! schema validation or field coercion.

use crate::config::{ClientConfig, Credentials, TlsPolicy};
use crate::error::{Result, UnityError};
use reqwest::{Certificate, Client};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// URL-encoded path of the root group.
const ROOT_GROUP_PATH: &str = "%2F";

/// Client for the Unity IDM REST administration API.
///
/// Holds only immutable configuration and a reusable connection pool; no
/// response data is retained between calls, so a client can be shared freely
/// across tasks.
#[derive(Debug, Clone)]
pub struct UnityClient {
    /// HTTP client.
    http: Client,
    /// Computed API base URL (base URL + rest-admin path + API version).
    api_base_url: String,
    /// HTTP Basic credentials, attached to every request when present.
    auth: Option<Credentials>,
}

impl UnityClient {
    /// Creates a new client from the given configuration.
    ///
    /// Validates the configuration and builds the HTTP connection pool; no
    /// network activity takes place until the first operation is called.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();

        match &config.tls {
            TlsPolicy::Verify => {}
            TlsPolicy::Insecure => {
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsPolicy::CaBundle(path) => {
                let pem = std::fs::read(path).map_err(|e| {
                    UnityError::config_with_source(
                        format!("Failed to read CA bundle '{}'", path.display()),
                        e,
                    )
                })?;
                let certs = Certificate::from_pem_bundle(&pem).map_err(|e| {
                    UnityError::config_with_source(
                        format!("Failed to parse CA bundle '{}'", path.display()),
                        e,
                    )
                })?;
                builder = builder.tls_built_in_root_certs(false);
                for cert in certs {
                    builder = builder.add_root_certificate(cert);
                }
            }
        }

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| UnityError::config_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http,
            api_base_url: config.api_base_url(),
            auth: config.auth,
        })
    }

    /// Returns the computed API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns all members and subgroups of the specified group.
    ///
    /// If `group_path` is not supplied, the root group is targeted and all
    /// root-level groups and members are returned.
    ///
    /// Example response:
    ///
    /// ```json
    /// {
    ///   "subGroups" : [ ],
    ///   "members" : [ 3 ]
    /// }
    /// ```
    pub async fn fetch_group(&self, group_path: Option<&str>) -> Result<Value> {
        let path = match group_path {
            Some(group) => format!("/group/{}", group),
            None => format!("/group/{}", ROOT_GROUP_PATH),
        };
        self.get_json(&path, &[]).await
    }

    /// Returns information about the identified entity, including its state
    /// and all identities.
    pub async fn fetch_entity(&self, entity_id: u64) -> Result<Value> {
        self.get_json(&format!("/entity/{}", entity_id), &[]).await
    }

    /// Returns the paths of all groups the identified entity is a member of.
    pub async fn fetch_entity_groups(&self, entity_id: u64) -> Result<Value> {
        self.get_json(&format!("/entity/{}/groups", entity_id), &[])
            .await
    }

    /// Returns the effective attributes of the identified entity across all
    /// groups it is a member of.
    pub async fn fetch_entity_attributes(&self, entity_id: u64) -> Result<Value> {
        self.fetch_entity_attributes_filtered(entity_id, None, true)
            .await
    }

    /// Returns the attributes of the identified entity.
    ///
    /// # Arguments
    /// * `group_path` - Restrict to attributes in this group; all groups when
    ///   absent
    /// * `effective` - Include attributes inherited through group membership,
    ///   not only directly assigned ones
    pub async fn fetch_entity_attributes_filtered(
        &self,
        entity_id: u64,
        group_path: Option<&str>,
        effective: bool,
    ) -> Result<Value> {
        let mut query = vec![("effective", effective.to_string())];
        if let Some(group) = group_path {
            query.push(("group", group.to_string()));
        }

        self.get_json(&format!("/entity/{}/attributes", entity_id), &query)
            .await
    }

    /// Issues a GET request against the API base URL and decodes the JSON
    /// response body.
    ///
    /// A send failure or an unreadable body is a `Transport` error, a non-2xx
    /// status is an `HttpStatus` error, and an undecodable body is a `Json`
    /// error.
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.api_base_url, path);
        debug!(url = %url, "Sending GET request");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| UnityError::transport_with_source(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(url = %url, status = %status, "Request failed");
            return Err(UnityError::http_status(status.as_u16(), url, body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UnityError::transport_with_source(&url, e))?;

        Ok(serde_json::from_slice(&body)?)
    }
}
