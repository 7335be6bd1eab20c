use super::{
    client::{ApiClient, Unauthorized},
    credentials::Credentials,
    types::{
        ApiError, AuthUser, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
        VerifyResponse,
    },
};
use crate::config::Service;

/// Adapter for the auth service (`/auth/login`, `/auth/register`, `/auth/verify`).
#[derive(Clone, Debug)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new(Service::Auth, credentials),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new_with_base_url(Service::Auth, base_url, credentials),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        self.client.credentials()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.client.url("/auth/login").await;
        self.client
            .send_json(
                self.client.http_client().post(url).json(request),
                Unauthorized::RejectCredentials,
            )
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let url = self.client.url("/auth/register").await;
        self.client
            .send_json(
                self.client.http_client().post(url).json(request),
                Unauthorized::RejectCredentials,
            )
            .await
    }

    /// Checks a token against the service. A 401 is reported to the caller; the stored
    /// session is left alone, since it may have changed while the check was in flight.
    pub async fn verify(&self, token: &str) -> Result<AuthUser, ApiError> {
        let url = self.client.url("/auth/verify").await;
        let response: VerifyResponse = self
            .client
            .send_json(
                self.client.http_client().get(url).bearer_auth(token),
                Unauthorized::Report,
            )
            .await?;
        Ok(response.user)
    }
}
