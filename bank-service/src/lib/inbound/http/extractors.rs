use std::convert::Infallible;
use std::net::SocketAddr;

use auth::AuthorizationError;
use auth::Payload;
use axum::async_trait;
use axum::extract::ConnectInfo;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::app::AppState;
use crate::inbound::http::handlers::ApiError;
use crate::session::models::ClientMetadata;

/// Identity of the caller, verified from the `Authorization: Bearer` header.
///
/// Handlers that need authentication take this as an argument; a request
/// without a valid access token never reaches the handler body.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Payload);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str())
            .transpose()
            .map_err(|_| AuthorizationError::MalformedHeader)?;

        let payload = state.authenticator.authorize(header_value).map_err(|e| {
            tracing::warn!(error = %e, uri = %parts.uri, "Request authorization failed");
            ApiError::from(e)
        })?;

        Ok(Self(payload))
    }
}

/// Client provenance recorded on the session created at login.
#[derive(Debug, Clone)]
pub struct RequestMetadata(pub ClientMetadata);

#[async_trait]
impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let client_ip = forwarded_for(&parts.headers)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(address)| address.ip().to_string())
            })
            .unwrap_or_default();

        Ok(Self(ClientMetadata {
            user_agent,
            client_ip,
        }))
    }
}

/// First hop of `X-Forwarded-For`, if present.
fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        assert_eq!(forwarded_for(&headers), None);

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(forwarded_for(&headers), Some("203.0.113.7".to_string()));
    }
}
