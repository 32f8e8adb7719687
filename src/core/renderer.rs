use crate::core::naming::{self, ClassNames};
use crate::core::package_name::PackageName;
use crate::core::type_mapping::{map_field, FieldMapping, JavaField};
use crate::domain::model::{JavaSource, ObjectDescription, SkippedField};
use std::collections::{BTreeSet, HashSet};

const BASE_CLASS_IMPORT: &str = "com.force.sdk.jpa.model.BaseForceObject";

/// Property names already taken by `BaseForceObject`.
const BASE_PROPERTIES: &[&str] = &[
    "id",
    "name",
    "createdBy",
    "createdDate",
    "lastModifiedBy",
    "lastModifiedDate",
    "systemModstamp",
];

pub struct RenderedObject {
    pub source: JavaSource,
    pub skipped: Vec<SkippedField>,
}

/// Renders the JPA entity class for one object.
///
/// `generated` maps the lowercased names of all objects in this run to their
/// class names so that lookups between them become typed relationships. The
/// output does not depend on the time of generation.
pub fn render_object(
    package: &PackageName,
    object: &ObjectDescription,
    generated: &ClassNames,
) -> RenderedObject {
    let class_name = generated
        .get(&object.name.to_ascii_lowercase())
        .cloned()
        .unwrap_or_else(|| naming::class_name(&object.name));
    let mut skipped = Vec::new();
    let mut fields = Vec::new();
    let mut taken: HashSet<String> = BASE_PROPERTIES.iter().map(|p| p.to_string()).collect();

    let mut imports: BTreeSet<String> = [
        BASE_CLASS_IMPORT,
        "javax.persistence.Entity",
        "javax.persistence.Table",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for field in &object.fields {
        match map_field(field, generated) {
            FieldMapping::Mapped(mut java) => {
                java.name = unique_name(&java.name, &mut taken);
                imports.extend(java.imports.iter().cloned());
                fields.push(java);
            }
            FieldMapping::Skipped(reason) => {
                tracing::debug!("Skipping {}.{}: {}", object.name, field.name, reason);
                skipped.push(SkippedField {
                    object_name: object.name.clone(),
                    field_name: field.name.clone(),
                    reason,
                });
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "// Generated by force-codegen from the {} object. Do not edit.\n",
        object.name
    ));
    out.push_str(&format!("package {};\n\n", package));
    for import in &imports {
        out.push_str(&format!("import {};\n", import));
    }
    out.push('\n');

    out.push_str("/**\n");
    let label = if object.label.is_empty() {
        &object.name
    } else {
        &object.label
    };
    out.push_str(&format!(" * {}\n", label));
    out.push_str(" */\n");
    out.push_str("@Entity\n");
    out.push_str(&format!("@Table(name = \"{}\")\n", object.name));
    out.push_str(&format!(
        "public class {} extends BaseForceObject {{\n",
        class_name
    ));

    for field in &fields {
        out.push('\n');
        for annotation in &field.annotations {
            out.push_str(&format!("    {}\n", annotation));
        }
        out.push_str(&format!("    private {} {};\n", field.java_type, field.name));
    }

    for field in &fields {
        out.push('\n');
        render_accessors(&mut out, field);
    }

    out.push_str("}\n");

    RenderedObject {
        source: JavaSource {
            object_name: object.name.clone(),
            relative_path: format!("{}/{}.java", package.as_path(), class_name),
            class_name,
            contents: out,
        },
        skipped,
    }
}

fn render_accessors(out: &mut String, field: &JavaField) {
    let suffix = naming::accessor_suffix(&field.name);
    let getter = if field.java_type == "boolean" { "is" } else { "get" };

    out.push_str(&format!(
        "    public {} {}{}() {{\n        return this.{};\n    }}\n\n",
        field.java_type, getter, suffix, field.name
    ));
    out.push_str(&format!(
        "    public void set{}({} {}) {{\n        this.{} = {};\n    }}\n",
        suffix, field.java_type, field.name, field.name, field.name
    ));
}

fn unique_name(candidate: &str, taken: &mut HashSet<String>) -> String {
    let mut name = candidate.to_string();
    let mut counter = 2;
    while taken.contains(&name) {
        name = format!("{}{}", candidate.trim_end_matches('_'), counter);
        counter += 1;
    }
    taken.insert(name.clone());
    name
}
