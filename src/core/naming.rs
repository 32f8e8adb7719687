//! Java identifiers derived from remote object and field API names.

use std::collections::{HashMap, HashSet};

/// Lowercased object API name to generated class name.
pub type ClassNames = HashMap<String, String>;

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Simple type names every generated class imports or may import; a class of
/// the same name would shadow them.
const RESERVED_TYPE_NAMES: &[&str] = &[
    "BaseForceObject", "BigDecimal", "Basic", "Calendar", "Column", "Date", "Entity",
    "FetchType", "ForceOwner", "JoinColumn", "Lob", "ManyToOne", "Object", "String", "Table",
    "Temporal", "TemporalType",
];

pub fn is_java_keyword(word: &str) -> bool {
    JAVA_KEYWORDS.contains(&word)
}

/// Strips the custom suffix (`__c`, `__r`, `__mdt`, ...) from an API name.
fn strip_custom_suffix(api_name: &str) -> &str {
    match api_name.rfind("__") {
        Some(idx) if idx > 0 => &api_name[..idx],
        _ => api_name,
    }
}

fn words(api_name: &str) -> Vec<String> {
    strip_custom_suffix(api_name)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| part.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>())
        .filter(|part| !part.is_empty())
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn decapitalize(word: &str) -> String {
    // "URL" becomes "url", "URLLink" becomes "urlLink".
    let upper_run = word.chars().take_while(|c| c.is_ascii_uppercase()).count();
    match upper_run {
        0 => word.to_string(),
        n if n == word.len() => word.to_ascii_lowercase(),
        1 => word[..1].to_ascii_lowercase() + &word[1..],
        n => word[..n - 1].to_ascii_lowercase() + &word[n - 1..],
    }
}

fn guard_identifier(mut ident: String) -> String {
    if ident.is_empty() {
        ident.push_str("value");
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if is_java_keyword(&ident) {
        ident.push('_');
    }
    ident
}

/// `My_Object__c` becomes `MyObject`. Names that would shadow an imported type
/// get an `Object` suffix, so `Entity__c` becomes `EntityObject`.
pub fn class_name(api_name: &str) -> String {
    let name: String = words(api_name).iter().map(|w| capitalize(w)).collect();
    let mut name = guard_identifier(if name.is_empty() {
        "Unnamed".to_string()
    } else {
        name
    });
    if RESERVED_TYPE_NAMES.contains(&name.as_str()) {
        name.push_str("Object");
    }
    name
}

/// Assigns one class name per object, in the order given.
///
/// Names are unique ignoring case, since `Invoice` and `Invoice__c` would
/// otherwise land in the same source file. Later objects get a numeric suffix.
pub fn assign_class_names<S: AsRef<str>>(object_names: &[S]) -> ClassNames {
    let mut taken = HashSet::new();
    let mut assigned = ClassNames::new();

    for object_name in object_names {
        let object_name = object_name.as_ref();
        let key = object_name.to_ascii_lowercase();
        if assigned.contains_key(&key) {
            continue;
        }

        let base = class_name(object_name);
        let mut candidate = base.clone();
        let mut n = 2;
        while !taken.insert(candidate.to_ascii_lowercase()) {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        if candidate != base {
            tracing::warn!(
                "Class name {} is already taken, generating {} as {}",
                base,
                object_name,
                candidate
            );
        }
        assigned.insert(key, candidate);
    }

    assigned
}

/// `Some_Custom_Field__c` becomes `someCustomField`.
pub fn field_name(api_name: &str) -> String {
    let parts = words(api_name);
    let mut name = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            name.push_str(&decapitalize(part));
        } else {
            name.push_str(&capitalize(part));
        }
    }
    guard_identifier(name)
}

/// Java property name for a lookup: `ParentId` becomes `parent`, custom lookups
/// keep their base name.
pub fn reference_field_name(api_name: &str) -> String {
    let base = match api_name.strip_suffix("Id") {
        Some(stripped) if !stripped.is_empty() && !api_name.contains("__") => stripped,
        _ => api_name,
    };
    field_name(base)
}

/// Accessor suffix for getters and setters: `someCustomField` becomes `SomeCustomField`.
pub fn accessor_suffix(field: &str) -> String {
    capitalize(field.trim_end_matches('_'))
}
