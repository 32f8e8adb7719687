use crate::core::naming::{self, ClassNames};
use crate::domain::model::{FieldDescription, FieldType};
use std::collections::BTreeSet;

/// Fields already declared on `BaseForceObject`.
pub const BASE_OBJECT_FIELDS: &[&str] = &[
    "Id",
    "Name",
    "CreatedById",
    "CreatedDate",
    "LastModifiedById",
    "LastModifiedDate",
    "SystemModstamp",
];

pub const OWNER_FIELD: &str = "OwnerId";

const FORCE_OWNER: &str = "com.force.sdk.jpa.model.ForceOwner";

#[derive(Debug, Clone, PartialEq)]
pub struct JavaField {
    pub api_name: String,
    pub name: String,
    pub java_type: String,
    pub annotations: Vec<String>,
    pub imports: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldMapping {
    Mapped(JavaField),
    Skipped(String),
}

pub fn is_base_object_field(api_name: &str) -> bool {
    BASE_OBJECT_FIELDS
        .iter()
        .any(|base| base.eq_ignore_ascii_case(api_name))
}

/// Maps one remote field to a Java field declaration.
///
/// `generated` maps the lowercased name of every object in this run to its
/// class name; lookups to anything outside it are kept as plain id strings.
pub fn map_field(field: &FieldDescription, generated: &ClassNames) -> FieldMapping {
    if field.deprecated_and_hidden {
        return FieldMapping::Skipped("deprecated and hidden".to_string());
    }
    if is_base_object_field(&field.name) {
        return FieldMapping::Skipped("declared on BaseForceObject".to_string());
    }
    if field.name.eq_ignore_ascii_case(OWNER_FIELD) {
        return FieldMapping::Mapped(owner_field(field));
    }

    let mut imports = BTreeSet::new();
    let mut annotations = Vec::new();

    let java_type = match &field.field_type {
        FieldType::Id
        | FieldType::String
        | FieldType::TextArea
        | FieldType::Phone
        | FieldType::Url
        | FieldType::Email
        | FieldType::Picklist
        | FieldType::MultiPicklist
        | FieldType::Combobox
        | FieldType::EncryptedString => "String".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Int => "int".to_string(),
        FieldType::Double | FieldType::Percent => "double".to_string(),
        FieldType::Currency => {
            imports.insert("java.math.BigDecimal".to_string());
            "BigDecimal".to_string()
        }
        FieldType::Date | FieldType::Time => {
            imports.insert("java.util.Date".to_string());
            imports.insert("javax.persistence.Temporal".to_string());
            imports.insert("javax.persistence.TemporalType".to_string());
            let temporal = if field.field_type == FieldType::Date {
                "DATE"
            } else {
                "TIME"
            };
            annotations.push(format!("@Temporal(TemporalType.{})", temporal));
            "Date".to_string()
        }
        FieldType::DateTime => {
            imports.insert("java.util.Calendar".to_string());
            imports.insert("javax.persistence.Temporal".to_string());
            imports.insert("javax.persistence.TemporalType".to_string());
            annotations.push("@Temporal(TemporalType.TIMESTAMP)".to_string());
            "Calendar".to_string()
        }
        FieldType::Base64 => {
            imports.insert("javax.persistence.Basic".to_string());
            imports.insert("javax.persistence.FetchType".to_string());
            imports.insert("javax.persistence.Lob".to_string());
            annotations.push("@Lob".to_string());
            annotations.push("@Basic(fetch = FetchType.LAZY)".to_string());
            "byte[]".to_string()
        }
        FieldType::Reference => {
            let target_class = field
                .single_reference_target()
                .and_then(|target| generated.get(&target.to_ascii_lowercase()));
            match target_class {
                Some(class_name) => return FieldMapping::Mapped(lookup_field(field, class_name)),
                None => "String".to_string(),
            }
        }
        FieldType::Address | FieldType::Location | FieldType::AnyType => {
            return FieldMapping::Skipped(format!(
                "compound type {} is not mapped",
                field.field_type.as_str()
            ));
        }
        FieldType::Unknown(name) => {
            return FieldMapping::Skipped(format!("unsupported type {}", name));
        }
    };

    imports.insert("javax.persistence.Column".to_string());
    let numeric = matches!(
        field.field_type,
        FieldType::Currency | FieldType::Double | FieldType::Percent
    );
    annotations.push(column_annotation(
        "Column",
        field,
        java_type == "String",
        numeric,
    ));

    FieldMapping::Mapped(JavaField {
        api_name: field.name.clone(),
        name: naming::field_name(&field.name),
        java_type,
        annotations,
        imports,
    })
}

fn column_annotation(
    kind: &str,
    field: &FieldDescription,
    with_length: bool,
    with_precision: bool,
) -> String {
    let mut attrs = vec![format!("name = \"{}\"", field.name)];
    if with_length && field.length > 0 {
        attrs.push(format!("length = {}", field.length));
    }
    if with_precision && field.precision > 0 {
        attrs.push(format!("precision = {}", field.precision));
        attrs.push(format!("scale = {}", field.scale));
    }
    if !field.nillable && field.createable {
        attrs.push("nullable = false".to_string());
    }
    if !field.createable && !field.updateable {
        attrs.push("insertable = false".to_string());
        attrs.push("updatable = false".to_string());
    }
    format!("@{}({})", kind, attrs.join(", "))
}

/// Property name of a lookup, taken from its relationship name when the API
/// reports one (`Account__r` becomes `account`).
fn lookup_property_name(field: &FieldDescription) -> String {
    match field.relationship_name.as_deref() {
        Some(relationship) if !relationship.is_empty() => naming::field_name(relationship),
        _ => naming::reference_field_name(&field.name),
    }
}

fn lookup_field(field: &FieldDescription, target_class: &str) -> JavaField {
    let imports = [
        "javax.persistence.FetchType",
        "javax.persistence.JoinColumn",
        "javax.persistence.ManyToOne",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    JavaField {
        api_name: field.name.clone(),
        name: lookup_property_name(field),
        java_type: target_class.to_string(),
        annotations: vec![
            "@ManyToOne(fetch = FetchType.LAZY)".to_string(),
            column_annotation("JoinColumn", field, false, false),
        ],
        imports,
    }
}

fn owner_field(field: &FieldDescription) -> JavaField {
    let imports = [
        FORCE_OWNER,
        "javax.persistence.FetchType",
        "javax.persistence.JoinColumn",
        "javax.persistence.ManyToOne",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    JavaField {
        api_name: field.name.clone(),
        name: "owner".to_string(),
        java_type: "ForceOwner".to_string(),
        annotations: vec![
            "@ManyToOne(fetch = FetchType.EAGER)".to_string(),
            column_annotation("JoinColumn", field, false, false),
        ],
        imports,
    }
}
