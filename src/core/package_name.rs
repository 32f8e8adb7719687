use crate::utils::error::{CodegenError, Result};
use crate::utils::validation::is_valid_package_name;
use std::fmt;
use std::str::FromStr;

/// A Java package name that has passed [`is_valid_package_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn parse(name: &str) -> Result<Self> {
        if !is_valid_package_name(name) {
            return Err(CodegenError::InvalidPackageName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory layout of the package, e.g. `com/example/model`.
    pub fn as_path(&self) -> String {
        self.0.replace('.', "/")
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl FromStr for PackageName {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PackageName {
    type Error = CodegenError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
