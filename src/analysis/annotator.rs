// Annotation passes over a decoded spec
//
// Three descending passes (path item, operation, parameter) attach derived
// facts as x_endor_* keys beside the original fields. Annotation is purely
// additive: existing spec fields are never altered, and re-running the
// passes rewrites the same values.

use serde_json::Value;

use crate::analysis::classifier::IdentifierClassifier;
use crate::doc;
use crate::models::{
    DefinedVerbs, IdType, IdentifierCount, Method, ParameterPresence,
};

pub const KEY_DEFINED_VERBS: &str = "x_endor_defined_http_verbs";
pub const KEY_AUTHORIZATION_REQUIRED: &str = "x_endor_authorization_required";
pub const KEY_IDENTIFIERS_USED: &str = "x_endor_identifiers_used";
pub const KEY_OPERATION_PARAMETERS: &str = "x_endor_operation_parameters";
pub const KEY_IS_IDENTIFIER: &str = "x_endor_is_identifier";
pub const KEY_LOCATION: &str = "x_endor_location";
pub const KEY_ID_TYPE: &str = "x_endor_id_type";

/// Walks the document and writes the derived facts in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotator {
    classifier: IdentifierClassifier,
}

impl Annotator {
    pub fn new(classifier: IdentifierClassifier) -> Self {
        Self { classifier }
    }

    /// Annotate every path item, operation, and parameter in the document.
    /// A document without a `paths` mapping is left untouched.
    pub fn annotate(&self, spec: &mut Value) {
        let global_security = spec
            .get("security")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));

        let Some(paths) = spec.get_mut("paths").and_then(Value::as_object_mut) else {
            return;
        };
        for item in paths.values_mut() {
            self.annotate_path_item(item, &global_security);
        }
    }

    fn annotate_path_item(&self, item: &mut Value, global_security: &Value) {
        let Some(map) = item.as_object_mut() else {
            return;
        };

        // Pass 1: endpoint level
        let verb_count = map.keys().filter(|key| Method::from_key(key).is_some()).count();
        map.insert(
            KEY_DEFINED_VERBS.to_string(),
            Value::String(DefinedVerbs::from_count(verb_count).as_str().to_string()),
        );

        // Pass 3 on path-level parameters, once per path
        if let Some(params) = map.get_mut("parameters").and_then(Value::as_array_mut) {
            for param in params.iter_mut() {
                self.annotate_parameter(param);
            }
        }

        let path_params: Vec<Value> = map
            .get("parameters")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        // Pass 2 and the operation-level parameter pass
        for (key, operation) in map.iter_mut() {
            if Method::from_key(key).is_none() {
                continue;
            }
            self.annotate_operation(operation, &path_params, global_security);
        }
    }

    fn annotate_operation(&self, operation: &mut Value, path_params: &[Value], global_security: &Value) {
        // Operation-level security overrides the global default even when
        // it is an empty list; only a missing key falls back.
        let effective_security = operation.get("security").unwrap_or(global_security);
        let authorization_required = security_requires_auth(effective_security);

        let identifier_count = {
            let op_params = doc::seq(operation, "parameters");
            path_params
                .iter()
                .chain(op_params.iter())
                .filter(|param| self.classifier.is_identifier(param))
                .count()
        };
        let presence = ParameterPresence::classify(
            !doc::seq(operation, "parameters").is_empty(),
            !path_params.is_empty(),
        );

        let Some(map) = operation.as_object_mut() else {
            return;
        };
        map.insert(
            KEY_AUTHORIZATION_REQUIRED.to_string(),
            Value::Bool(authorization_required),
        );
        map.insert(
            KEY_IDENTIFIERS_USED.to_string(),
            Value::String(IdentifierCount::from_count(identifier_count).as_str().to_string()),
        );
        map.insert(
            KEY_OPERATION_PARAMETERS.to_string(),
            Value::String(presence.as_str().to_string()),
        );

        if let Some(params) = map.get_mut("parameters").and_then(Value::as_array_mut) {
            for param in params.iter_mut() {
                self.annotate_parameter(param);
            }
        }
    }

    fn annotate_parameter(&self, param: &mut Value) {
        let is_identifier = self.classifier.is_identifier(param);
        let location = self.classifier.location_class(param);
        let id_type = self.classifier.id_type(param);

        let Some(map) = param.as_object_mut() else {
            return;
        };
        map.insert(KEY_IS_IDENTIFIER.to_string(), Value::Bool(is_identifier));
        map.insert(
            KEY_LOCATION.to_string(),
            Value::String(location.as_str().to_string()),
        );
        map.insert(
            KEY_ID_TYPE.to_string(),
            Value::String(id_type.as_str().to_string()),
        );
    }
}

/// A security requirement list demands authorization when it is non-empty
/// and is not the single-empty-object form that allows anonymous access.
fn security_requires_auth(security: &Value) -> bool {
    let Some(requirements) = security.as_array() else {
        return false;
    };
    if requirements.is_empty() {
        return false;
    }
    let anonymous_allowed = requirements.len() == 1
        && requirements[0]
            .as_object()
            .map(|requirement| requirement.is_empty())
            .unwrap_or(false);
    !anonymous_allowed
}

// Read-back accessors for the annotated facts. Absent annotations read as
// the documented defaults rather than failing.

/// Whether the operation's effective security demands authorization.
pub fn authorization_required(operation: &Value) -> bool {
    doc::bool_or(operation, KEY_AUTHORIZATION_REQUIRED, false)
}

/// Identifier cardinality across path-level and operation-level parameters.
pub fn identifiers_used(operation: &Value) -> IdentifierCount {
    IdentifierCount::from_annotation(doc::str_or(operation, KEY_IDENTIFIERS_USED, "zero"))
}

/// Which parameter lists the operation sees.
pub fn operation_parameters(operation: &Value) -> ParameterPresence {
    ParameterPresence::from_annotation(doc::str_or(operation, KEY_OPERATION_PARAMETERS, "empty"))
}

/// Verb-definition class of the path item.
pub fn defined_verbs(path_item: &Value) -> DefinedVerbs {
    DefinedVerbs::from_annotation(doc::str_or(path_item, KEY_DEFINED_VERBS, "single"))
}

/// Identifier kind annotated on a parameter, if any.
pub fn param_id_type(param: &Value) -> Option<IdType> {
    param
        .get(KEY_ID_TYPE)
        .and_then(Value::as_str)
        .map(IdType::from_annotation)
}

/// Whether the parameter was judged to reference a resource.
pub fn param_is_identifier(param: &Value) -> bool {
    doc::bool_or(param, KEY_IS_IDENTIFIER, false)
}
