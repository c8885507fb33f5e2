//! JSON-over-HTTP client for the user service.
//!
//! Every endpoint is a single `POST` relative to the configured base URL (which
//! usually includes the gateway's service prefix, e.g.
//! `https://gateway.tld/USER-SERVICE/`). Request bodies hold secrets and are
//! never logged; only the path and the resulting status are traced.

use super::{
    error::ApiError,
    types::{
        ChangePasswordRequest, ErrorBody, LoginEnvelope, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
        ResetPasswordRequest, SendResetCodeRequest, Session, VerifyResetCodeRequest,
    },
    AuthApi,
};
use crate::APP_USER_AGENT;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Request timeout used when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

const REGISTER_PATH: &str = "api/auth/register/";
const LOGIN_PATH: &str = "api/auth/login/";
const SEND_RESET_CODE_PATH: &str = "api/auth/users/send-reset-code";
const VERIFY_RESET_CODE_PATH: &str = "api/auth/users/verify-code";
const RESET_PASSWORD_PATH: &str = "api/auth/users/reset-password";
const CHANGE_PASSWORD_PATH: &str = "api/auth/users/change-password/";

#[derive(Clone, Debug)]
pub struct HttpAuthApi {
    client: Client,
    base_url: Url,
}

impl HttpAuthApi {
    /// Builds a client for `base_url`. Only `http` and `https` are accepted.
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] for an unusable URL and
    /// [`ApiError::Serialization`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::Config(format!("invalid endpoint {path}: {err}")))
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;

        let response = self.client.post(url).json(body).send().await?;

        debug!("POST {} -> {}", path, response.status());

        Ok(response)
    }

    async fn post_expect_empty<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.post(path, body).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(http_error(response).await)
        }
    }

    async fn post_expect_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.post(path, body).await?;
        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Parse(format!("Failed to decode response: {err}")))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip_all)]
    async fn send_reset_code(&self, request: &SendResetCodeRequest) -> Result<(), ApiError> {
        let response = self.post(SEND_RESET_CODE_PATH, request).await?;

        // anything but a plain 200 counts as "not sent", 201/204 included
        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            let error = http_error(response).await;
            debug!("send reset code rejected: {}", error);
            Err(error)
        }
    }

    #[instrument(skip_all)]
    async fn verify_reset_code(&self, request: &VerifyResetCodeRequest) -> Result<(), ApiError> {
        self.post_expect_empty(VERIFY_RESET_CODE_PATH, request).await
    }

    #[instrument(skip_all)]
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_expect_empty(RESET_PASSWORD_PATH, request).await
    }

    #[instrument(skip_all)]
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.post_expect_json(REGISTER_PATH, request).await
    }

    #[instrument(skip_all)]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post_expect_json::<_, LoginEnvelope>(LOGIN_PATH, request)
            .await
            .map(LoginEnvelope::into_session)
    }

    #[instrument(skip_all)]
    async fn change_password(
        &self,
        session: &Session,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(CHANGE_PASSWORD_PATH)?;

        let response = self
            .client
            .patch(url)
            .bearer_auth(&session.access)
            .json(request)
            .send()
            .await?;

        debug!("PATCH {} -> {}", CHANGE_PASSWORD_PATH, response.status());

        if response.status().is_success() {
            Ok(())
        } else {
            Err(http_error(response).await)
        }
    }
}

/// Parses the base URL and makes sure relative joins append to its path.
fn normalize_base_url(base_url: &str) -> Result<Url, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config("missing API base URL".to_string()));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|err| ApiError::Config(format!("invalid API base URL {trimmed}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ApiError::Config(format!(
                "unsupported scheme {scheme} in API base URL"
            )))
        }
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Turns a non-success response into [`ApiError::Http`], keeping the server's
/// reason when the body carries one.
async fn http_error(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Http {
        status,
        detail: error_detail(&body),
    }
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .map(|message| message.chars().take(MAX_ERROR_CHARS).collect())
}
