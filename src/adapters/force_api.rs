//! REST client for the platform's metadata (describe) endpoints.

use crate::domain::model::{ObjectDescription, ObjectSummary};
use crate::domain::ports::MetadataSource;
use crate::utils::error::{CodegenError, Result};
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "v52.0";

/// Username-password OAuth credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceCredentials {
    pub login_url: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ForceCredentials {
    /// Parses `force://host?user=..&password=..&oauth_key=..&oauth_secret=..`.
    /// The `;`-separated form `force://host;user=..;password=..` is accepted too.
    ///
    /// Query-form values are percent-decoded (`+` stays a `+`). Values in the
    /// `;` form are taken verbatim, so `password=p+ss%word` keeps its `+` and `%`.
    pub fn from_connection_url(connection_url: &str) -> Result<Self> {
        let invalid = |reason: &str| CodegenError::InvalidConfigValue {
            field: "connection_url".to_string(),
            value: redact(connection_url),
            reason: reason.to_string(),
        };

        let (head, params): (&str, Vec<(String, String)>) = match connection_url.find(['?', ';'])
        {
            Some(idx) if connection_url[idx..].starts_with(';') => (
                &connection_url[..idx],
                connection_url[idx + 1..]
                    .split(';')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                    .collect(),
            ),
            Some(idx) => (
                &connection_url[..idx],
                connection_url[idx + 1..]
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(k, v)| {
                        let value = percent_decode_str(v).decode_utf8_lossy().into_owned();
                        (k.trim().to_string(), value)
                    })
                    .collect(),
            ),
            None => (connection_url, Vec::new()),
        };

        let url = Url::parse(head).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "force" {
            return Err(invalid("scheme must be force://"));
        }
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let login_url = match url.port() {
            Some(port) => format!("https://{}:{}", host, port),
            None => format!("https://{}", host),
        };

        let param = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        Ok(Self {
            login_url,
            username: param("user").ok_or_else(|| invalid("missing user"))?,
            password: param("password").ok_or_else(|| invalid("missing password"))?,
            client_id: param("oauth_key").unwrap_or_default(),
            client_secret: param("oauth_secret").unwrap_or_default(),
        })
    }
}

/// Keeps the host of a connection URL and drops the credentials.
fn redact(connection_url: &str) -> String {
    let end = connection_url
        .find(['?', ';'])
        .unwrap_or(connection_url.len());
    format!("{}...", &connection_url[..end])
}

#[derive(Debug, Clone)]
pub enum ForceAuth {
    Password(ForceCredentials),
    /// An already issued access token.
    Session {
        access_token: String,
        instance_url: String,
    },
}

#[derive(Debug, Clone)]
struct Session {
    access_token: String,
    instance_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Deserialize)]
struct DescribeGlobalResponse {
    sobjects: Vec<ObjectSummary>,
}

pub struct ForceApiClient {
    client: Client,
    auth: ForceAuth,
    api_version: String,
    session: OnceCell<Session>,
}

impl ForceApiClient {
    pub fn new(auth: ForceAuth, api_version: impl Into<String>) -> Result<Self> {
        Self::with_timeout(auth, api_version, Duration::from_secs(30))
    }

    pub fn with_timeout(
        auth: ForceAuth,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            auth,
            api_version: api_version.into(),
            session: OnceCell::new(),
        })
    }

    async fn session(&self) -> Result<&Session> {
        self.session.get_or_try_init(|| self.login()).await
    }

    async fn login(&self) -> Result<Session> {
        let credentials = match &self.auth {
            ForceAuth::Session {
                access_token,
                instance_url,
            } => {
                return Ok(Session {
                    access_token: access_token.clone(),
                    instance_url: instance_url.trim_end_matches('/').to_string(),
                })
            }
            ForceAuth::Password(credentials) => credentials,
        };

        let token_url = format!(
            "{}/services/oauth2/token",
            credentials.login_url.trim_end_matches('/')
        );
        tracing::info!("Logging in to {} as {}", credentials.login_url, credentials.username);

        let response = self
            .client
            .post(&token_url)
            .form(&[
                ("grant_type", "password"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenError>(&body) {
                Ok(err) if !err.error_description.is_empty() => {
                    format!("{}: {}", err.error, err.error_description)
                }
                Ok(err) => err.error,
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            return Err(CodegenError::AuthError { message });
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!("Authenticated against instance {}", token.instance_url);
        Ok(Session {
            access_token: token.access_token,
            instance_url: token.instance_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        object_name: Option<&str>,
    ) -> Result<T> {
        let session = self.session().await?;
        let url = format!(
            "{}/services/data/{}{}",
            session.instance_url, self.api_version, path
        );
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        match (response.status(), object_name) {
            (status, _) if status.is_success() => Ok(response.json().await?),
            (StatusCode::NOT_FOUND, Some(name)) => Err(CodegenError::ObjectNotFound {
                name: name.to_string(),
            }),
            (StatusCode::UNAUTHORIZED, _) => Err(CodegenError::AuthError {
                message: "session expired or invalid".to_string(),
            }),
            (status, _) => Err(CodegenError::ApiStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl MetadataSource for ForceApiClient {
    async fn describe_global(&self) -> Result<Vec<ObjectSummary>> {
        let response: DescribeGlobalResponse = self.get_json("/sobjects/", None).await?;
        Ok(response.sobjects)
    }

    async fn describe_object(&self, name: &str) -> Result<ObjectDescription> {
        let path = format!("/sobjects/{}/describe/", name);
        self.get_json(&path, Some(name)).await
    }
}
