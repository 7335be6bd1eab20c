use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::{credentials::Credentials, types::ApiError},
    config::{self, Service},
};

/// How a 401/403 from the service is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthorized {
    /// The stored session is no longer valid; clear it and notify the session store.
    ExpireSession,
    /// Credentials supplied with this request were rejected; the session is untouched.
    RejectCredentials,
    /// The token under check is invalid; the caller decides what to clear.
    Report,
}

/// Transport core shared by the service adapters: one instance per backend service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    service: Service,
    base_url: Option<String>,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(service: Service, credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            service,
            base_url: None,
            credentials,
        }
    }

    pub fn new_with_base_url(
        service: Service,
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            client: Client::new(),
            service,
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
            credentials,
        }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_base_url(self.service).await
        }
    }

    pub(crate) async fn url(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Attaches the stored bearer token, if any.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::unknown(format!("Failed to build request: {}", e)))?;
        log::debug!(
            "[{}] {} {}",
            self.service.label(),
            request.method(),
            request.url().path()
        );

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock::responder_for(request.url().as_str()) {
            let response = responder.respond(&request)?;
            if let Some(gate) = response.gate.clone() {
                let _ = gate.await;
            }
            return Ok(Response::from(response));
        }

        self.client.execute(request).await.map_err(|e| {
            log::warn!("[{}] request failed: {}", self.service.label(), e);
            ApiError::network(format!("Request failed: {}", e))
        })
    }

    fn handle_unauthorized_status(&self, status: StatusCode, policy: Unauthorized) {
        if matches!(status.as_u16(), 401 | 403)
            && policy == Unauthorized::ExpireSession
        {
            log::info!(
                "[{}] session rejected with {}, signing out",
                self.service.label(),
                status
            );
            self.credentials.expire();
        }
    }

    async fn error_from(&self, response: Response, policy: Unauthorized) -> ApiError {
        let status = response.status();
        self.handle_unauthorized_status(status, policy);
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_response(status.as_u16(), &body);
        match (status.as_u16(), policy) {
            (401, Unauthorized::RejectCredentials) => ApiError {
                code: "AUTH_ERROR".into(),
                ..error
            },
            (401 | 403, Unauthorized::ExpireSession | Unauthorized::Report) => ApiError {
                code: "UNAUTHORIZED".into(),
                ..error
            },
            _ => error,
        }
    }

    /// Sends the request and decodes a 2xx JSON body; anything else becomes an `ApiError`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        policy: Unauthorized,
    ) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(self.error_from(response, policy).await)
        }
    }
}

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_segment("abc-123_x"), "abc-123_x");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn explicit_base_url_drops_trailing_slash() {
        let client = ApiClient::new_with_base_url(
            Service::Vehicle,
            "http://localhost:50001/api/v1/",
            Credentials::default(),
        );
        assert_eq!(client.base_url.as_deref(), Some("http://localhost:50001/api/v1"));
        assert_eq!(client.service(), Service::Vehicle);
    }
}
