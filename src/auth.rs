use reqwest::Client;
use serde_json::Value;

use crate::error::{FireflyError, Result};
use crate::types::{AccessToken, Credentials};

/// Adobe IMS token endpoint.
pub const AUTH_URL: &str = "https://ims-na1.adobelogin.com/ims/token/v3";

/// Scopes requested on every exchange.
const SCOPE: &str = "firefly_api,openid,AdobeID,read_organizations";

/// Exchange long-lived client credentials for a short-lived bearer token.
///
/// One URL-encoded form POST against the IMS endpoint; no retry. The
/// `access_token` field of the response is returned verbatim. A rejected
/// exchange — or a success response with no `access_token` — surfaces as
/// [`FireflyError::Auth`].
pub async fn fetch_access_token(
    http: &Client,
    auth_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken> {
    credentials.ensure_present()?;

    let form = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("grant_type", "client_credentials"),
        ("scope", SCOPE),
    ];

    let resp = http
        .post(auth_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| FireflyError::Network {
            context: format!("Cannot reach IMS token endpoint at {}", auth_url),
            source: e,
        })?;

    if !resp.status().is_success() {
        return Err(FireflyError::Auth {
            status: resp.status().to_string(),
        });
    }

    let json: Value = resp.json().await.map_err(|e| FireflyError::Network {
        context: "Failed to parse IMS token response".into(),
        source: e,
    })?;

    json.get("access_token")
        .and_then(|v| v.as_str())
        .map(AccessToken::new)
        .ok_or_else(|| FireflyError::Auth {
            status: "response missing access_token".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_list() {
        // The scope set is fixed; Firefly rejects tokens without firefly_api.
        assert!(SCOPE.contains("firefly_api"));
        assert!(SCOPE.contains("openid"));
        assert!(SCOPE.contains("AdobeID"));
        assert!(SCOPE.contains("read_organizations"));
    }

    #[tokio::test]
    async fn test_empty_credentials_fail_before_any_call() {
        let http = Client::new();
        // Unroutable URL: the precondition must fail before it matters.
        let err = fetch_access_token(&http, "http://127.0.0.1:0", &Credentials::new("", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, FireflyError::MissingCredentials));
    }
}
