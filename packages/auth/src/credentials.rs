// ABOUTME: OAuth client credentials importer
// ABOUTME: Reads installed-app (or web) client secret files into a typed client id / secret pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AuthError, AuthResult};
use crate::files::write_private;

/// OAuth client id and secret, handed to the authorization flow
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Client secret file as downloaded from the cloud console
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSection>,
    web: Option<ClientSection>,
}

#[derive(Debug, Deserialize)]
struct ClientSection {
    client_id: Option<String>,
    client_secret: Option<String>,
}

/// Parse a client secret file
pub async fn load_client_credentials(path: &Path) -> AuthResult<ClientCredentials> {
    debug!("Reading client credentials from {}", path.display());

    let malformed = |reason: String| AuthError::MalformedCredentialsFile {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| malformed(format!("cannot read file: {}", e)))?;

    parse_client_credentials(&content).map_err(malformed)
}

/// Parse client secret JSON; the error is a human-readable reason
pub fn parse_client_credentials(content: &str) -> Result<ClientCredentials, String> {
    let file: ClientSecretFile =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

    let section = file
        .installed
        .or(file.web)
        .ok_or_else(|| "expected an \"installed\" or \"web\" object".to_string())?;

    let client_id = required(section.client_id, "client_id")?;
    let client_secret = required(section.client_secret, "client_secret")?;

    Ok(ClientCredentials {
        client_id,
        client_secret,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(format!("\"{}\" is empty", field)),
        None => Err(format!("\"{}\" is missing", field)),
    }
}

/// Keep the parsed pair for the authorization flow
pub async fn save_client_credentials(
    credentials: &ClientCredentials,
    path: &Path,
) -> AuthResult<()> {
    let json = serde_json::to_vec_pretty(credentials)?;
    write_private(path, &json).await?;
    info!("Saved client credentials to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_installed() {
        let creds =
            parse_client_credentials(r#"{"installed":{"client_id":"id","client_secret":"sec"}}"#)
                .unwrap();
        assert_eq!(creds.client_id, "id");
        assert_eq!(creds.client_secret, "sec");
    }

    #[test]
    fn test_parse_web() {
        let creds = parse_client_credentials(
            r#"{"web":{"client_id":"id","client_secret":"sec","redirect_uris":[]}}"#,
        )
        .unwrap();
        assert_eq!(creds.client_id, "id");
    }

    #[rstest]
    #[case("not json", "invalid JSON")]
    #[case(r#"{"other":{}}"#, "installed")]
    #[case(r#"{"installed":{"client_secret":"sec"}}"#, "client_id")]
    #[case(r#"{"installed":{"client_id":"id","client_secret":"  "}}"#, "client_secret")]
    fn test_parse_rejects(#[case] content: &str, #[case] mentions: &str) {
        let reason = parse_client_credentials(content).unwrap_err();
        assert!(reason.contains(mentions), "reason was {reason}");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = ClientCredentials {
            client_id: "id".to_string(),
            client_secret: "very-secret".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("very-secret"));
    }
}
