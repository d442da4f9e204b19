/// Tests for the annotation passes
/// Verifies the derived facts written onto path items, operations, and
/// parameters, plus idempotence and graceful handling of partial specs.
use endor::analysis::annotator::{
    authorization_required, defined_verbs, identifiers_used, operation_parameters,
    param_id_type, param_is_identifier, KEY_DEFINED_VERBS, KEY_ID_TYPE, KEY_IS_IDENTIFIER,
    KEY_LOCATION,
};
use endor::analyzer::IdorAnalyzer;
use endor::models::{DefinedVerbs, IdType, IdentifierCount, ParameterPresence};
use serde_json::{json, Value};

fn annotate(spec: Value) -> Value {
    IdorAnalyzer::new().annotate(spec)
}

#[test]
fn test_annotation_is_idempotent() {
    let spec = json!({
        "security": [{"apiKey": []}],
        "paths": {
            "/users/{id}": {
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}],
                "get": {"parameters": [{"name": "verbose", "in": "query", "schema": {"type": "boolean"}}]},
                "delete": {}
            }
        }
    });

    let once = annotate(spec);
    let twice = annotate(once.clone());
    assert_eq!(once, twice, "re-annotating must not accumulate or drift");
}

#[test]
fn test_annotation_is_additive() {
    let spec = json!({
        "paths": {
            "/users/{id}": {
                "get": {
                    "security": [{"apiKey": []}],
                    "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}]
                }
            }
        }
    });

    let annotated = annotate(spec);
    let operation = &annotated["paths"]["/users/{id}"]["get"];
    let param = &operation["parameters"][0];

    // Original fields survive untouched next to the new facts.
    assert_eq!(param["name"], "id");
    assert_eq!(param["in"], "path");
    assert_eq!(param["schema"]["type"], "integer");
    assert_eq!(operation["security"], json!([{"apiKey": []}]));
    assert!(param.get(KEY_IS_IDENTIFIER).is_some());
    assert!(param.get(KEY_LOCATION).is_some());
    assert!(param.get(KEY_ID_TYPE).is_some());
}

#[test]
fn test_path_parameters_are_always_identifiers() {
    let spec = json!({
        "paths": {
            "/things/{whatever}": {
                "get": {
                    "parameters": [
                        {"name": "whatever", "in": "path", "schema": {"type": "object"}}
                    ]
                }
            }
        }
    });

    let annotated = annotate(spec);
    let param = &annotated["paths"]["/things/{whatever}"]["get"]["parameters"][0];
    assert!(
        param_is_identifier(param),
        "path parameters count as identifiers regardless of name or type"
    );
}

#[test]
fn test_identifier_count_classes() {
    let spec = json!({
        "paths": {
            "/none": {
                "get": {"parameters": [{"name": "flag", "in": "query", "schema": {"type": "boolean"}}]}
            },
            "/one/{id}": {
                "get": {"parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}]}
            },
            "/two/{id}": {
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}],
                "get": {"parameters": [{"name": "user", "in": "query", "schema": {"type": "string"}}]}
            }
        }
    });

    let annotated = annotate(spec);
    let none = &annotated["paths"]["/none"]["get"];
    let one = &annotated["paths"]["/one/{id}"]["get"];
    let two = &annotated["paths"]["/two/{id}"]["get"];

    assert_eq!(identifiers_used(none), IdentifierCount::Zero);
    assert_eq!(identifiers_used(one), IdentifierCount::Single);
    // Path-level and operation-level parameters count together.
    assert_eq!(identifiers_used(two), IdentifierCount::Multiple);
}

#[test]
fn test_parameter_presence_classes() {
    let spec = json!({
        "paths": {
            "/bare": {"get": {}},
            "/inherited/{id}": {
                "parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}],
                "get": {}
            },
            "/own": {
                "get": {"parameters": [{"name": "q", "in": "query", "schema": {"type": "string"}}]}
            }
        }
    });

    let annotated = annotate(spec);
    assert_eq!(
        operation_parameters(&annotated["paths"]["/bare"]["get"]),
        ParameterPresence::Empty
    );
    assert_eq!(
        operation_parameters(&annotated["paths"]["/inherited/{id}"]["get"]),
        ParameterPresence::EndpointLevelOnly
    );
    assert_eq!(
        operation_parameters(&annotated["paths"]["/own"]["get"]),
        ParameterPresence::NonEmpty
    );
}

#[test]
fn test_authorization_requirements() {
    let spec = json!({
        "security": [{"bearerAuth": []}],
        "paths": {
            "/global": {"get": {}},
            "/opted-out": {"get": {"security": []}},
            "/anonymous": {"get": {"security": [{}]}},
            "/own-scheme": {"get": {"security": [{"apiKey": []}]}}
        }
    });

    let annotated = annotate(spec);
    // Global default applies when the operation stays silent.
    assert!(authorization_required(&annotated["paths"]["/global"]["get"]));
    // An explicit empty list overrides the global default.
    assert!(!authorization_required(&annotated["paths"]["/opted-out"]["get"]));
    // The single-empty-object form allows anonymous access.
    assert!(!authorization_required(&annotated["paths"]["/anonymous"]["get"]));
    assert!(authorization_required(&annotated["paths"]["/own-scheme"]["get"]));
}

#[test]
fn test_no_global_security_and_no_operation_security() {
    let spec = json!({"paths": {"/open": {"get": {}}}});
    let annotated = annotate(spec);
    assert!(!authorization_required(&annotated["paths"]["/open"]["get"]));
}

#[test]
fn test_defined_verbs_classes() {
    let spec = json!({
        "paths": {
            "/single": {"get": {}},
            "/multiple": {"get": {}, "post": {}, "delete": {}},
            "/verbless": {"parameters": [{"name": "id", "in": "path", "schema": {"type": "integer"}}]}
        }
    });

    let annotated = annotate(spec);
    assert_eq!(
        defined_verbs(&annotated["paths"]["/single"]),
        DefinedVerbs::Single
    );
    assert_eq!(
        defined_verbs(&annotated["paths"]["/multiple"]),
        DefinedVerbs::Multiple
    );
    // Zero recognized verbs falls through to the otherwise-unused class.
    assert_eq!(
        annotated["paths"]["/verbless"][KEY_DEFINED_VERBS],
        "all"
    );
}

#[test]
fn test_id_type_annotations() {
    let spec = json!({
        "paths": {
            "/mixed": {
                "get": {
                    "parameters": [
                        {"name": "user_id", "in": "query", "schema": {"type": "integer"}},
                        {"name": "docUuid", "in": "query", "schema": {"type": "string"}},
                        {"name": "email", "in": "query", "schema": {"type": "string"}},
                        {"name": "slug", "in": "query", "schema": {"type": "string"}},
                        {"name": "ids", "in": "query", "schema": {"type": "array"}},
                        {"name": "flag", "in": "query", "schema": {"type": "boolean"}}
                    ]
                }
            }
        }
    });

    let annotated = annotate(spec);
    let params = annotated["paths"]["/mixed"]["get"]["parameters"]
        .as_array()
        .expect("parameters survive annotation");

    assert_eq!(param_id_type(&params[0]), Some(IdType::NumericSequential));
    assert_eq!(param_id_type(&params[1]), Some(IdType::UuidGuid));
    assert_eq!(param_id_type(&params[2]), Some(IdType::AccountPersonalInfo));
    assert_eq!(param_id_type(&params[3]), Some(IdType::String));
    assert_eq!(param_id_type(&params[4]), Some(IdType::Array));
    assert_eq!(param_id_type(&params[5]), Some(IdType::Other));
}

#[test]
fn test_mistyped_sections_degrade_to_absence() {
    let spec = json!({
        "security": 5,
        "paths": {
            "/odd": {"get": {"parameters": "nonsense"}},
            "/worse": "not even a mapping"
        }
    });

    // Must not panic; the mistyped pieces read as empty.
    let annotated = annotate(spec);
    let operation = &annotated["paths"]["/odd"]["get"];
    assert!(!authorization_required(operation));
    assert_eq!(identifiers_used(operation), IdentifierCount::Zero);
    assert_eq!(operation_parameters(operation), ParameterPresence::Empty);

    let report = IdorAnalyzer::new().analyze(annotated);
    assert!(report.is_empty());
}

#[test]
fn test_missing_paths_yields_untouched_document() {
    let spec = json!({"info": {"title": "No paths here"}});
    let annotated = annotate(spec.clone());
    assert_eq!(annotated, spec);
}
