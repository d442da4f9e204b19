// Identifier Heuristics
//
// STATIC ANALYSIS of parameter names, locations, descriptions, and schema
// types to decide whether a parameter references a resource instance, and
// what kind of identifier it carries. This module never looks beyond a
// single parameter object; operation- and path-level facts live in the
// annotator.
//
// Example:
//   Input:  {"name": "userId", "in": "path", "schema": {"type": "integer"}}
//   Output: is_identifier = true, id_type = NumericSequential,
//           location_class = ResourcePath

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use crate::doc;
use crate::models::{IdType, LocationClass};

lazy_static! {
    // Trailing id / _id / Id in a parameter name
    static ref ID_SUFFIX: Regex = Regex::new(r"(?i)id$|_id$|Id$").unwrap();

    // Trailing uuid / guid in a parameter name
    static ref UUID_SUFFIX: Regex = Regex::new(r"(?i)uuid$|guid$").unwrap();

    // Whole-word identifier vocabulary inside a description
    static ref DESC_IDENTIFIER: Regex = Regex::new(r"(?i)\b(id|uuid|guid|identifier)\b").unwrap();

    // Bare parameter names that routinely address a resource
    static ref COMMON_IDENTIFIER_NAMES: HashSet<&'static str> = [
        "id", "uuid", "guid", "name", "filename", "group", "key", "phone",
        "email", "user", "account", "bucket", "vault", "item", "resource",
        "object", "token",
    ]
    .into_iter()
    .collect();
}

// Name fragments that point at account or personal data
const PERSONAL_INFO_WORDS: [&str; 4] = ["email", "phone", "account", "user"];

/// Heuristic parameter classifier.
///
/// Holds no state beyond the precompiled patterns and fixed vocabulary
/// above, so one instance can be shared across concurrent analyses.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierClassifier;

impl IdentifierClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Decide whether a parameter references a resource instance.
    ///
    /// Rules are ordered by precedence and short-circuit at the first hit:
    /// name suffix, fixed vocabulary, path location, description wording,
    /// then a permissive scalar-type catch-all.
    pub fn is_identifier(&self, param: &Value) -> bool {
        let name = doc::str_or(param, "name", "").to_lowercase();
        let location = doc::str_or(param, "in", "");
        let description = doc::str_or(param, "description", "").to_lowercase();
        let schema_type = doc::schema_type(param);

        if ID_SUFFIX.is_match(&name) || UUID_SUFFIX.is_match(&name) {
            return true;
        }
        if COMMON_IDENTIFIER_NAMES.contains(name.as_str()) {
            return true;
        }
        // Path-segment parameters address a resource by construction.
        if location == "path" {
            return true;
        }
        if DESC_IDENTIFIER.is_match(&description) {
            return true;
        }
        // Permissive catch-all: plain scalars routinely carry identifiers.
        matches!(schema_type, "integer" | "string")
    }

    /// Classify the identifier representation carried by a parameter.
    pub fn id_type(&self, param: &Value) -> IdType {
        let name = doc::str_or(param, "name", "");
        let description = doc::str_or(param, "description", "").to_lowercase();

        match doc::schema_type(param) {
            "integer" => IdType::NumericSequential,
            "string" => {
                if UUID_SUFFIX.is_match(name)
                    || description.contains("uuid")
                    || description.contains("guid")
                {
                    IdType::UuidGuid
                } else {
                    let lower = name.to_lowercase();
                    if PERSONAL_INFO_WORDS.iter().any(|word| lower.contains(word)) {
                        IdType::AccountPersonalInfo
                    } else {
                        IdType::String
                    }
                }
            }
            "array" => IdType::Array,
            _ => IdType::Other,
        }
    }

    /// Map the parameter's `in` value to its location class.
    pub fn location_class(&self, param: &Value) -> LocationClass {
        LocationClass::from_in(doc::str_or(param, "in", ""))
    }
}
