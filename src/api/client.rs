//! HTTP client for data API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the data API, handling authentication and response parsing.

use super::error::ApiError;
use anyhow::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Envelope wrapping every list response from the data API.
///
#[derive(Deserialize)]
struct ListWrapper<T> {
    data: Vec<T>,
}

/// Makes requests to the data API and conforms response data to the given
/// model type.
///
pub struct Client {
    access_token: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given access token and base URL.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(access_token: &str, base_url: &str) -> Self {
        Client {
            access_token: access_token.to_owned(),
            base_url: base_url.to_owned(),
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Return the vector of model data under the wrapper envelope for the
    /// given collection path, or an error.
    ///
    pub async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response = self
            .http_client
            .request(Method::GET, format!("{}/{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await?;

        match response.status().as_u16() {
            200 => {
                let wrapper: ListWrapper<T> = response
                    .json()
                    .await
                    .map_err(|e| ApiError::Deserialization(e.to_string()))?;
                Ok(wrapper.data)
            }
            401 => Err(ApiError::Unauthorized.into()),
            status => Err(ApiError::RequestFailed { status }.into()),
        }
    }
}
