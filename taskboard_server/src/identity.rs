use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderName, header::InvalidHeaderName};
use taskboard::{IdentityResolver, Principal};

/// Reads the principal id from a request header.
///
/// The header is expected to be set by an authenticating proxy in front of
/// the server, which must strip any client-supplied value.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.as_bytes())?,
        })
    }
}

#[async_trait]
impl IdentityResolver<HeaderMap> for HeaderIdentity {
    async fn current_principal(&self, headers: &HeaderMap) -> Option<Principal> {
        let value = headers.get(&self.header)?.to_str().ok()?;
        Principal::new(value.trim())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[tokio::test]
    async fn test_reads_configured_header() {
        let identity = HeaderIdentity::new("x-principal-id").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-principal-id", HeaderValue::from_static("user_2a"));

        let principal = identity.current_principal(&headers).await;
        assert_eq!(principal.map(|p| p.id().to_string()), Some("user_2a".into()));
    }

    #[tokio::test]
    async fn test_missing_or_blank_header_is_anonymous() {
        let identity = HeaderIdentity::new("x-principal-id").unwrap();
        assert!(identity.current_principal(&HeaderMap::new()).await.is_none());

        let mut headers = HeaderMap::new();
        headers.insert("x-principal-id", HeaderValue::from_static("  "));
        assert!(identity.current_principal(&headers).await.is_none());
    }
}
