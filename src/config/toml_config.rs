use crate::adapters::force_api::{
    ForceAuth, ForceCredentials, DEFAULT_API_VERSION, DEFAULT_LOGIN_URL,
};
use crate::config::GeneratorSettings;
use crate::utils::error::{CodegenError, Result};
use crate::utils::validation::{
    validate_api_version, validate_non_empty_string, validate_package_name, validate_path,
    validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "./generated";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub login_url: Option<String>,
    pub api_version: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub instance_url: Option<String>,
    pub connection_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub package_name: Option<String>,
    pub output_dir: Option<String>,
    #[serde(default)]
    pub objects: Vec<String>,
    pub include_references: Option<bool>,
    pub archive: Option<bool>,
    /// Metadata snapshot to read instead of calling the API.
    pub snapshot: Option<String>,
}

impl TomlConfig {
    /// Loads the config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CodegenError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CodegenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable, leaving
    /// unset variables untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CodegenError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn api_version(&self) -> &str {
        self.connection
            .api_version
            .as_deref()
            .unwrap_or(DEFAULT_API_VERSION)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.connection
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    pub fn output_dir(&self) -> &str {
        self.generator
            .output_dir
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// How to authenticate: a ready session, a connection URL, or username and password.
    pub fn auth(&self) -> Result<ForceAuth> {
        let connection = &self.connection;

        if let (Some(access_token), Some(instance_url)) =
            (&connection.access_token, &connection.instance_url)
        {
            return Ok(ForceAuth::Session {
                access_token: access_token.clone(),
                instance_url: instance_url.clone(),
            });
        }

        if let Some(connection_url) = &connection.connection_url {
            return Ok(ForceAuth::Password(ForceCredentials::from_connection_url(
                connection_url,
            )?));
        }

        let username = validate_required_field("connection.username", &connection.username)?;
        let password = validate_required_field("connection.password", &connection.password)?;

        Ok(ForceAuth::Password(ForceCredentials {
            login_url: connection
                .login_url
                .clone()
                .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string()),
            username: username.clone(),
            password: password.clone(),
            client_id: connection.client_id.clone().unwrap_or_default(),
            client_secret: connection.client_secret.clone().unwrap_or_default(),
        }))
    }

    pub fn settings(&self, dry_run: bool) -> Result<GeneratorSettings> {
        let package_name =
            validate_required_field("generator.package_name", &self.generator.package_name)?;

        Ok(GeneratorSettings {
            package_name: package_name.clone(),
            output_path: self.output_dir().to_string(),
            include_references: self.generator.include_references.unwrap_or(false),
            archive: self.generator.archive.unwrap_or(false),
            dry_run,
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        let package_name =
            validate_required_field("generator.package_name", &self.generator.package_name)?;
        validate_package_name(package_name)?;
        validate_path("generator.output_dir", self.output_dir())?;

        for object in &self.generator.objects {
            validate_non_empty_string("generator.objects", object)?;
        }

        if let Some(snapshot) = &self.generator.snapshot {
            validate_path("generator.snapshot", snapshot)?;
            return Ok(());
        }

        validate_api_version("connection.api_version", self.api_version())?;
        if let Some(login_url) = &self.connection.login_url {
            validate_url("connection.login_url", login_url)?;
        }
        if let Some(instance_url) = &self.connection.instance_url {
            validate_url("connection.instance_url", instance_url)?;
        }
        self.auth()?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
