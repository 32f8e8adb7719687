pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_package_name, validate_path, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// Settings the generator reads while it runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    pub package_name: String,
    pub output_path: String,
    pub include_references: bool,
    pub archive: bool,
    pub dry_run: bool,
}

impl GeneratorSettings {
    pub fn new(package_name: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            output_path: output_path.into(),
            include_references: false,
            archive: false,
            dry_run: false,
        }
    }

    pub fn set_package_name(&mut self, package_name: impl Into<String>) {
        self.package_name = package_name.into();
    }
}

impl ConfigProvider for GeneratorSettings {
    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn include_references(&self) -> bool {
        self.include_references
    }

    fn archive(&self) -> bool {
        self.archive
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for GeneratorSettings {
    fn validate(&self) -> Result<()> {
        validate_package_name(&self.package_name)?;
        validate_path("output_path", &self.output_path)
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "force-codegen")]
#[command(about = "Generate JPA entity classes from Salesforce object metadata")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Java package of the generated classes
    #[arg(long)]
    pub package_name: Option<String>,

    /// Directory the sources are written to
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Objects to generate, comma separated; `*` selects all objects
    #[arg(long, value_delimiter = ',')]
    pub objects: Vec<String>,

    /// force://host?user=..&password=..&oauth_key=..&oauth_secret=..
    #[arg(long, env = "FORCE_CONNECTION_URL", hide_env_values = true)]
    pub connection_url: Option<String>,

    /// Read metadata from a JSON snapshot instead of the API
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Also generate objects referenced through lookups
    #[arg(long)]
    pub include_references: bool,

    /// Bundle the sources into a zip archive
    #[arg(long)]
    pub archive: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file, if any, and applies command line overrides.
    pub fn resolve(&self) -> Result<toml_config::TomlConfig> {
        let mut config = match &self.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?,
            None => toml_config::TomlConfig::default(),
        };

        if let Some(package_name) = &self.package_name {
            config.generator.package_name = Some(package_name.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.generator.output_dir = Some(output_dir.clone());
        }
        if !self.objects.is_empty() {
            config.generator.objects = self.objects.clone();
        }
        if let Some(connection_url) = &self.connection_url {
            // A session from the file would otherwise win over the URL.
            config.connection.connection_url = Some(connection_url.clone());
            config.connection.access_token = None;
            config.connection.instance_url = None;
        }
        if let Some(snapshot) = &self.snapshot {
            config.generator.snapshot = Some(snapshot.clone());
        }
        if self.include_references {
            config.generator.include_references = Some(true);
        }
        if self.archive {
            config.generator.archive = Some(true);
        }

        Ok(config)
    }
}
