pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::force_api::{ForceApiClient, ForceAuth, ForceCredentials};
pub use adapters::snapshot::{MetadataSnapshot, SnapshotMetadataSource};
pub use config::{cli::LocalStorage, toml_config::TomlConfig, GeneratorSettings};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::{
    engine::CodegenEngine, generator::JpaClassGenerator, package_name::PackageName,
};
pub use utils::error::{CodegenError, Result};
pub use utils::validation::is_valid_package_name;
