use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of describe-global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default = "default_true")]
    pub queryable: bool,
    #[serde(default)]
    pub deprecated_and_hidden: bool,
}

/// Full describe of a single object, as returned by the metadata API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescription {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default = "default_true")]
    pub queryable: bool,
    #[serde(default)]
    pub deprecated_and_hidden: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescription>,
}

impl ObjectDescription {
    pub fn summary(&self) -> ObjectSummary {
        ObjectSummary {
            name: self.name.clone(),
            label: self.label.clone(),
            custom: self.custom,
            queryable: self.queryable,
            deprecated_and_hidden: self.deprecated_and_hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub precision: u32,
    #[serde(default)]
    pub scale: u32,
    #[serde(default = "default_true")]
    pub nillable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub reference_to: Vec<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default)]
    pub deprecated_and_hidden: bool,
}

impl FieldDescription {
    /// A reference field pointing at exactly one object type.
    pub fn single_reference_target(&self) -> Option<&str> {
        match (&self.field_type, self.reference_to.as_slice()) {
            (FieldType::Reference, [target]) => Some(target.as_str()),
            _ => None,
        }
    }
}

/// Remote field types. Unrecognised names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Id,
    String,
    TextArea,
    Phone,
    Url,
    Email,
    Picklist,
    MultiPicklist,
    Combobox,
    EncryptedString,
    Boolean,
    Int,
    Double,
    Currency,
    Percent,
    Date,
    DateTime,
    Time,
    Base64,
    Reference,
    Address,
    Location,
    AnyType,
    Unknown(std::string::String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Id => "id",
            FieldType::String => "string",
            FieldType::TextArea => "textarea",
            FieldType::Phone => "phone",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Picklist => "picklist",
            FieldType::MultiPicklist => "multipicklist",
            FieldType::Combobox => "combobox",
            FieldType::EncryptedString => "encryptedstring",
            FieldType::Boolean => "boolean",
            FieldType::Int => "int",
            FieldType::Double => "double",
            FieldType::Currency => "currency",
            FieldType::Percent => "percent",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Time => "time",
            FieldType::Base64 => "base64",
            FieldType::Reference => "reference",
            FieldType::Address => "address",
            FieldType::Location => "location",
            FieldType::AnyType => "anyType",
            FieldType::Unknown(name) => name,
        }
    }
}

impl From<std::string::String> for FieldType {
    fn from(value: std::string::String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "id" => FieldType::Id,
            "string" => FieldType::String,
            "textarea" => FieldType::TextArea,
            "phone" => FieldType::Phone,
            "url" => FieldType::Url,
            "email" => FieldType::Email,
            "picklist" => FieldType::Picklist,
            "multipicklist" => FieldType::MultiPicklist,
            "combobox" => FieldType::Combobox,
            "encryptedstring" => FieldType::EncryptedString,
            "boolean" => FieldType::Boolean,
            "int" => FieldType::Int,
            "double" => FieldType::Double,
            "currency" => FieldType::Currency,
            "percent" => FieldType::Percent,
            "date" => FieldType::Date,
            "datetime" => FieldType::DateTime,
            "time" => FieldType::Time,
            "base64" => FieldType::Base64,
            "reference" => FieldType::Reference,
            "address" => FieldType::Address,
            "location" => FieldType::Location,
            "anytype" => FieldType::AnyType,
            _ => FieldType::Unknown(value),
        }
    }
}

impl From<FieldType> for std::string::String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// A rendered Java compilation unit, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaSource {
    pub object_name: String,
    pub class_name: String,
    pub relative_path: String,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedField {
    pub object_name: String,
    pub field_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub sources: Vec<JavaSource>,
    pub skipped_fields: Vec<SkippedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub package_name: String,
    pub output_path: String,
    pub classes: Vec<String>,
    pub files_written: usize,
    pub generated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}
