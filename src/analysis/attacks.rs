// Attack pattern rules
//
// Nine independent predicates over one annotated operation. Each yields at
// most one finding; matches are collected in declaration order. Only the
// verb-tampering rule reads sibling operations on the same path item.

use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

use crate::analysis::annotator::{
    authorization_required, defined_verbs, identifiers_used, operation_parameters, param_id_type,
};
use crate::doc;
use crate::models::{
    Attack, DefinedVerbs, IdType, IdentifierCount, Method, ParameterPresence,
};

/// Evaluate every rule against one operation.
pub fn check_attack_patterns(operation: &Value, path_item: &Value) -> Vec<Attack> {
    let mut attacks = Vec::new();

    if enumeration_without_prior_knowledge(operation) {
        attacks.push(Attack::new(
            "Enumeration without a priori knowledge",
            "Identifier is tampered for enumeration based on automatically determined pattern.",
        ));
    }
    if enumeration_with_prior_knowledge(operation) {
        attacks.push(Attack::new(
            "Enumeration with a priori knowledge",
            "Targeted identifier is hard to enumerate but can be checked with known identifiers.",
        ));
    }
    if add_change_file_extension(operation) {
        attacks.push(Attack::new(
            "Add/Change file extension",
            "Enumerated identifier is appended with an extension or changed to another extension.",
        ));
    }
    if wildcard_replacement(operation) {
        attacks.push(Attack::new(
            "Wildcard replacement/appending",
            "Enumerated identifier is decorated with a wildcard or special character.",
        ));
    }
    if id_encoding_decoding(operation) {
        attacks.push(Attack::new(
            "ID encoding/decoding",
            "Encoded or decoded identifier is substituted for enumeration.",
        ));
    }
    if json_list_appending(operation) {
        attacks.push(Attack::new(
            "JSON List appending",
            "Identifiers of non-owned objects are appended to a list to exploit improper access control.",
        ));
    }
    if authorization_token_manipulation(operation) {
        attacks.push(Attack::new(
            "Authorization token manipulation",
            "Request is repeated with authorization cookies of another user.",
        ));
    }
    if parameter_pollution(operation) {
        attacks.push(Attack::new(
            "Parameter pollution",
            "Tampering with parameter values in different locations to bypass authorization.",
        ));
    }
    if endpoint_verb_tampering(operation, path_item) {
        attacks.push(Attack::new(
            "Endpoint verb tampering",
            "Changing HTTP method or adding parameters from other methods to bypass checks.",
        ));
    }

    attacks
}

// Shared base condition: authorized endpoint that sees parameters and at
// least one identifier.
fn identifier_surface(operation: &Value) -> bool {
    authorization_required(operation)
        && operation_parameters(operation) != ParameterPresence::Empty
        && identifiers_used(operation) != IdentifierCount::Zero
}

// Identifier-kind existence checks look only at the operation's own
// parameter list.
fn any_param_of_type(operation: &Value, wanted: IdType) -> bool {
    doc::seq(operation, "parameters")
        .iter()
        .any(|param| param_id_type(param) == Some(wanted))
}

pub fn enumeration_without_prior_knowledge(operation: &Value) -> bool {
    identifier_surface(operation) && any_param_of_type(operation, IdType::NumericSequential)
}

pub fn enumeration_with_prior_knowledge(operation: &Value) -> bool {
    identifier_surface(operation)
        && (any_param_of_type(operation, IdType::UuidGuid)
            || any_param_of_type(operation, IdType::String)
            || any_param_of_type(operation, IdType::AccountPersonalInfo)
            || any_param_of_type(operation, IdType::Other))
}

pub fn add_change_file_extension(operation: &Value) -> bool {
    identifier_surface(operation)
}

pub fn wildcard_replacement(operation: &Value) -> bool {
    identifier_surface(operation) && any_param_of_type(operation, IdType::String)
}

// Same base condition as the extension rule; the two represent distinct
// exploitation narratives and stay separately reported.
pub fn id_encoding_decoding(operation: &Value) -> bool {
    identifier_surface(operation)
}

pub fn json_list_appending(operation: &Value) -> bool {
    identifier_surface(operation) && any_param_of_type(operation, IdType::Array)
}

pub fn authorization_token_manipulation(operation: &Value) -> bool {
    authorization_required(operation)
}

/// Duplicate parameter names on the operation itself (same name declared in
/// more than one location) open the door to pollution.
pub fn parameter_pollution(operation: &Value) -> bool {
    let params = doc::seq(operation, "parameters");
    let names: Vec<&str> = params
        .iter()
        .map(|param| doc::str_or(param, "name", ""))
        .collect();
    let unique: HashSet<&str> = names.iter().copied().collect();
    if unique.len() == names.len() {
        return false;
    }
    authorization_required(operation) && identifiers_used(operation) == IdentifierCount::Multiple
}

/// Sibling verbs on the same path with differing parameter name sets hint
/// that one verb's checks can be bypassed through another.
pub fn endpoint_verb_tampering(operation: &Value, path_item: &Value) -> bool {
    if defined_verbs(path_item) == DefinedVerbs::All {
        return false;
    }
    let Some(map) = path_item.as_object() else {
        return false;
    };

    let verb_keys: Vec<&String> = map
        .keys()
        .filter(|key| Method::from_key(key).is_some())
        .collect();
    if verb_keys.len() <= 1 {
        return false;
    }

    let mut name_sets: HashSet<BTreeSet<&str>> = HashSet::new();
    for key in verb_keys {
        let names: BTreeSet<&str> = doc::seq(&map[key.as_str()], "parameters")
            .iter()
            .map(|param| doc::str_or(param, "name", ""))
            .collect();
        name_sets.insert(names);
    }
    if name_sets.len() <= 1 {
        return false;
    }

    authorization_required(operation) && identifiers_used(operation) != IdentifierCount::Zero
}
