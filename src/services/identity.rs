use poem::Request;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::app_error::AppError;
use crate::config::Config;

/// Verified identity for one request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
    pub name: String,
    pub picture_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &Request) -> Result<&str, AppError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(token)
}

/// Verify a Google ID token via the tokeninfo endpoint.
///
/// The endpoint rejects expired or malformed tokens with a non-2xx status,
/// so the only local check left is the audience. Every failure mode
/// (network, provider rejection, audience mismatch, missing email claim)
/// collapses to Unauthorized.
pub async fn resolve_identity(cfg: &Config, bearer: &str) -> Result<Identity, AppError> {
    let client = Client::new();
    let resp = client
        .get(&cfg.tokeninfo_url)
        .query(&[("id_token", bearer)])
        .send()
        .await
        .map_err(|e| {
            warn!("tokeninfo request failed: {e}");
            AppError::Unauthorized
        })?
        .error_for_status()
        .map_err(|_| AppError::Unauthorized)?;

    let info: TokenInfo = resp.json().await.map_err(|_| AppError::Unauthorized)?;

    if info.aud != cfg.google_client_id {
        warn!("tokeninfo audience mismatch");
        return Err(AppError::Unauthorized);
    }

    let email = info.email.filter(|e| !e.is_empty()).ok_or(AppError::Unauthorized)?;

    Ok(Identity {
        subject_id: info.sub,
        email,
        name: info.name.unwrap_or_default(),
        picture_url: info.picture.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(tokeninfo_url: String) -> Config {
        Config {
            database_url: "postgres://unused".into(),
            google_client_id: "client-123".into(),
            bind_addr: "127.0.0.1:0".into(),
            tokeninfo_url,
        }
    }

    #[tokio::test]
    async fn resolves_identity_from_valid_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .and(query_param("id_token", "good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aud": "client-123",
                "sub": "sub-1",
                "email": "ada@example.com",
                "name": "Ada",
                "picture": "https://example.com/ada.png",
            })))
            .mount(&server)
            .await;

        let cfg = test_config(format!("{}/tokeninfo", server.uri()));
        let identity = resolve_identity(&cfg, "good-token").await.unwrap();
        assert_eq!(identity.subject_id, "sub-1");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.name, "Ada");
    }

    #[tokio::test]
    async fn audience_mismatch_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aud": "someone-else",
                "sub": "sub-1",
                "email": "ada@example.com",
            })))
            .mount(&server)
            .await;

        let cfg = test_config(format!("{}/tokeninfo", server.uri()));
        let err = resolve_identity(&cfg, "good-token").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn provider_rejection_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_token",
            })))
            .mount(&server)
            .await;

        let cfg = test_config(format!("{}/tokeninfo", server.uri()));
        let err = resolve_identity(&cfg, "expired").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn missing_email_claim_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aud": "client-123",
                "sub": "sub-1",
            })))
            .mount(&server)
            .await;

        let cfg = test_config(format!("{}/tokeninfo", server.uri()));
        let err = resolve_identity(&cfg, "tok").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
