use crate::core::type_mapping::OWNER_FIELD;
use crate::domain::model::ObjectDescription;
use crate::domain::ports::MetadataSource;
use crate::utils::error::{CodegenError, Result};
use std::collections::{HashSet, VecDeque};

pub const ALL_OBJECTS: &str = "*";

struct Pending {
    name: String,
    requested: bool,
}

/// Describes the requested objects.
///
/// Names match case-insensitively and `*` expands to every queryable object
/// in describe-global. With `include_references`, objects reached through
/// single-target lookups are pulled in as well. The result is sorted by name.
pub async fn resolve_objects<M: MetadataSource + ?Sized>(
    source: &M,
    requested: &[String],
    include_references: bool,
) -> Result<Vec<ObjectDescription>> {
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();

    let mut push = |name: &str, requested: bool, queue: &mut VecDeque<Pending>| {
        if seen.insert(name.to_ascii_lowercase()) {
            queue.push_back(Pending {
                name: name.to_string(),
                requested,
            });
        }
    };

    if requested.iter().any(|name| name.trim() == ALL_OBJECTS) {
        let global = source.describe_global().await?;
        tracing::debug!("describe-global returned {} objects", global.len());
        for summary in global
            .iter()
            .filter(|s| s.queryable && !s.deprecated_and_hidden)
        {
            push(&summary.name, true, &mut queue);
        }
    }

    for name in requested {
        let name = name.trim();
        if name.is_empty() || name == ALL_OBJECTS {
            continue;
        }
        push(name, true, &mut queue);
    }

    let mut objects = Vec::new();
    while let Some(pending) = queue.pop_front() {
        let object = match source.describe_object(&pending.name).await {
            Ok(object) => object,
            Err(CodegenError::ObjectNotFound { name }) if !pending.requested => {
                tracing::warn!("Referenced object {} could not be described, skipping", name);
                continue;
            }
            Err(e) => return Err(e),
        };

        if include_references {
            for field in &object.fields {
                if field.deprecated_and_hidden || field.name.eq_ignore_ascii_case(OWNER_FIELD) {
                    continue;
                }
                if let Some(target) = field.single_reference_target() {
                    push(target, false, &mut queue);
                }
            }
        }

        objects.push(object);
    }

    objects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(objects)
}
