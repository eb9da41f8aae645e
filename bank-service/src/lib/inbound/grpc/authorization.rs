use std::net::SocketAddr;

use auth::AuthorizationError;
use auth::Payload;
use auth::AUTHORIZATION_HEADER;
use tonic::metadata::MetadataMap;
use tonic::Status;

use crate::app::AppState;
use crate::session::models::ClientMetadata;

const GATEWAY_USER_AGENT_HEADER: &str = "grpcgateway-user-agent";
const USER_AGENT_HEADER: &str = "user-agent";
const X_FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Verifies the bearer token carried in the `authorization` metadata entry
/// and returns the caller's payload.
pub fn authorize_user(state: &AppState, metadata: &MetadataMap) -> Result<Payload, Status> {
    let header = metadata
        .get(AUTHORIZATION_HEADER)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| unauthenticated(AuthorizationError::MalformedHeader))?;

    state.authenticator.authorize(header).map_err(|e| {
        tracing::warn!(error = %e, "Rejected gRPC credentials");
        unauthenticated(e)
    })
}

/// Collects login provenance. A gateway-supplied user agent wins over the
/// client's own, and a forwarded address wins over the peer address.
pub fn extract_metadata(metadata: &MetadataMap, remote_addr: Option<SocketAddr>) -> ClientMetadata {
    let text = |key: &str| {
        metadata
            .get(key)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let user_agent = text(GATEWAY_USER_AGENT_HEADER)
        .or_else(|| text(USER_AGENT_HEADER))
        .unwrap_or_default();

    let client_ip = text(X_FORWARDED_FOR_HEADER)
        .and_then(|value| value.split(',').next().map(|hop| hop.trim().to_string()))
        .filter(|hop| !hop.is_empty())
        .or_else(|| remote_addr.map(|addr| addr.ip().to_string()))
        .unwrap_or_default();

    ClientMetadata {
        user_agent,
        client_ip,
    }
}

fn unauthenticated(err: AuthorizationError) -> Status {
    Status::unauthenticated(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_metadata_prefers_gateway_values() {
        let mut metadata = MetadataMap::new();
        metadata.insert(GATEWAY_USER_AGENT_HEADER, "gateway/1.0".parse().unwrap());
        metadata.insert(USER_AGENT_HEADER, "grpc-rust/0.11".parse().unwrap());
        metadata.insert(X_FORWARDED_FOR_HEADER, "203.0.113.9, 10.0.0.1".parse().unwrap());

        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
        let extracted = extract_metadata(&metadata, Some(peer));

        assert_eq!(extracted.user_agent, "gateway/1.0");
        assert_eq!(extracted.client_ip, "203.0.113.9");
    }

    #[test]
    fn test_extract_metadata_falls_back_to_peer() {
        let mut metadata = MetadataMap::new();
        metadata.insert(USER_AGENT_HEADER, "grpc-rust/0.11".parse().unwrap());

        let peer: SocketAddr = "192.0.2.4:50000".parse().unwrap();
        let extracted = extract_metadata(&metadata, Some(peer));

        assert_eq!(extracted.user_agent, "grpc-rust/0.11");
        assert_eq!(extracted.client_ip, "192.0.2.4");
    }

    #[test]
    fn test_extract_metadata_empty() {
        let extracted = extract_metadata(&MetadataMap::new(), None);
        assert_eq!(extracted, ClientMetadata::default());
    }
}
