//! Profile service client.
//!
//! Provides type-safe methods for:
//! - Fetching a profile by identifier
//! - Updating the editable profile fields
//! - Deleting a profile (account self-deletion)

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;
use uuid::Uuid;

use crate::domain::profiles::{ProfileRecord, ProfileResponse, UpdateProfileRequest};
use crate::error::{ClientError, ErrorBody};

/// Header carrying a per-request correlation id
pub const X_REQUEST_ID: &str = "x-request-id";

/// Remote profile resource, addressed by an opaque identifier.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, profile_id: &str) -> Result<ProfileRecord, ClientError>;

    async fn update_profile(
        &self,
        profile_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<(), ClientError>;

    async fn delete_profile(&self, profile_id: &str) -> Result<(), ClientError>;
}

/// HTTP client for the profile service.
#[derive(Clone)]
pub struct ProfileClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ProfileClient {
    /// Create a new profile service client.
    pub fn new(base_url: &str, token: Option<&str>, timeout_seconds: u64) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid profile service URL")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Profile service URL cannot carry a path: {}", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(base_url = %base_url, "Profile client initialized");

        Ok(Self {
            client,
            base_url,
            token: token.map(str::to_string),
        })
    }

    /// `{base}/profile/{id}` with the identifier encoded as one path segment.
    fn profile_url(&self, profile_id: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::Internal(anyhow::anyhow!("Profile service URL cannot carry a path"))
            })?;
            segments.pop_if_empty().push("profile").push(profile_id);
        }
        Ok(url)
    }

    /// Attach auth and request id, send, and map non-success statuses.
    async fn send(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let request_id = Uuid::new_v4().to_string();

        let mut req = req.header(X_REQUEST_ID, &request_id);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.map_err(|e| {
            error!(error = %e, request_id = %request_id, "Profile service request failed");
            ClientError::Internal(anyhow::anyhow!("Profile service unavailable: {}", e))
        })?;

        let status = response.status();
        debug!(status = %status, request_id = %request_id, "Profile service response");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.json::<ErrorBody>().await.ok();
            Err(ClientError::from_status(status, body))
        }
    }
}

#[async_trait]
impl ProfileApi for ProfileClient {
    #[instrument(skip(self))]
    async fn fetch_profile(&self, profile_id: &str) -> Result<ProfileRecord, ClientError> {
        let url = self.profile_url(profile_id)?;
        let response = self.send(self.client.get(url)).await?;

        let profile = response.json::<ProfileResponse>().await.map_err(|e| {
            error!(error = %e, "Failed to parse profile response");
            ClientError::Internal(anyhow::anyhow!("Invalid profile response: {}", e))
        })?;

        Ok(profile.into())
    }

    #[instrument(skip(self, request))]
    async fn update_profile(
        &self,
        profile_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<(), ClientError> {
        let url = self.profile_url(profile_id)?;
        // Response body is not inspected beyond the status
        self.send(self.client.put(url).json(request)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_profile(&self, profile_id: &str) -> Result<(), ClientError> {
        let url = self.profile_url(profile_id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
