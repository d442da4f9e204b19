// Core data models for endor

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Supported HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl Method {
    /// Parse a path-item key ("get", "GET", ...) into a method.
    /// Keys that are not HTTP verbs (e.g. "parameters", "summary") return None.
    pub fn from_key(key: &str) -> Option<Method> {
        match key.to_uppercase().as_str() {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "PATCH" => Some(Method::PATCH),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
            Method::PUT => write!(f, "PUT"),
            Method::DELETE => write!(f, "DELETE"),
            Method::PATCH => write!(f, "PATCH"),
            Method::HEAD => write!(f, "HEAD"),
            Method::OPTIONS => write!(f, "OPTIONS"),
        }
    }
}

/// Where a parameter travels in the request, as annotated on the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationClass {
    ResourcePath,
    UrlParameter,
    Body,
    Header,
    Other,
}

impl LocationClass {
    /// Map an OpenAPI `in` value to its location class.
    /// Unknown locations (including "cookie") classify as Other.
    pub fn from_in(location: &str) -> LocationClass {
        match location {
            "path" => LocationClass::ResourcePath,
            "query" => LocationClass::UrlParameter,
            "body" => LocationClass::Body,
            "header" => LocationClass::Header,
            _ => LocationClass::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationClass::ResourcePath => "resource path in URI",
            LocationClass::UrlParameter => "URL parameter",
            LocationClass::Body => "Body",
            LocationClass::Header => "Request Header",
            LocationClass::Other => "other",
        }
    }
}

/// What kind of identifier a parameter carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdType {
    NumericSequential,
    UuidGuid,
    AccountPersonalInfo,
    String,
    Array,
    Other,
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::NumericSequential => "numerical sequential identifier",
            IdType::UuidGuid => "UUID/GUID",
            IdType::AccountPersonalInfo => "account/personal information",
            IdType::String => "string",
            IdType::Array => "array",
            IdType::Other => "other",
        }
    }

    /// Parse an annotated value back into the enum. Unknown strings read as Other.
    pub fn from_annotation(value: &str) -> IdType {
        match value {
            "numerical sequential identifier" => IdType::NumericSequential,
            "UUID/GUID" => IdType::UuidGuid,
            "account/personal information" => IdType::AccountPersonalInfo,
            "string" => IdType::String,
            "array" => IdType::Array,
            _ => IdType::Other,
        }
    }
}

/// How many HTTP verbs a path item defines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinedVerbs {
    Single,
    Multiple,
    All,
}

impl DefinedVerbs {
    /// Classify a verb count. Zero recognized verbs falls through to All;
    /// such a path item carries no operations, so the class never reaches a
    /// finding.
    pub fn from_count(count: usize) -> DefinedVerbs {
        if count == 1 {
            DefinedVerbs::Single
        } else if count > 1 {
            DefinedVerbs::Multiple
        } else {
            DefinedVerbs::All
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DefinedVerbs::Single => "single",
            DefinedVerbs::Multiple => "multiple",
            DefinedVerbs::All => "all",
        }
    }

    /// Parse an annotated value back into the enum. Unknown strings read as Single.
    pub fn from_annotation(value: &str) -> DefinedVerbs {
        match value {
            "multiple" => DefinedVerbs::Multiple,
            "all" => DefinedVerbs::All,
            _ => DefinedVerbs::Single,
        }
    }
}

/// Identifier cardinality across path-level and operation-level parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierCount {
    Zero,
    Single,
    Multiple,
}

impl IdentifierCount {
    pub fn from_count(count: usize) -> IdentifierCount {
        match count {
            0 => IdentifierCount::Zero,
            1 => IdentifierCount::Single,
            _ => IdentifierCount::Multiple,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierCount::Zero => "zero",
            IdentifierCount::Single => "single",
            IdentifierCount::Multiple => "multiple",
        }
    }

    /// Parse an annotated value back into the enum. Unknown strings read as Zero.
    pub fn from_annotation(value: &str) -> IdentifierCount {
        match value {
            "single" => IdentifierCount::Single,
            "multiple" => IdentifierCount::Multiple,
            _ => IdentifierCount::Zero,
        }
    }
}

/// Whether an operation sees parameters, and from which level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPresence {
    Empty,
    EndpointLevelOnly,
    NonEmpty,
}

impl ParameterPresence {
    /// Classify from the two parameter lists: the operation's own list wins,
    /// then path-level-only, then empty.
    pub fn classify(has_operation_params: bool, has_path_params: bool) -> ParameterPresence {
        if has_operation_params {
            ParameterPresence::NonEmpty
        } else if has_path_params {
            ParameterPresence::EndpointLevelOnly
        } else {
            ParameterPresence::Empty
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterPresence::Empty => "empty",
            ParameterPresence::EndpointLevelOnly => "endpoint-level-only",
            ParameterPresence::NonEmpty => "non-empty",
        }
    }

    /// Parse an annotated value back into the enum. Unknown strings read as Empty.
    pub fn from_annotation(value: &str) -> ParameterPresence {
        match value {
            "endpoint-level-only" => ParameterPresence::EndpointLevelOnly,
            "non-empty" => ParameterPresence::NonEmpty,
            _ => ParameterPresence::Empty,
        }
    }
}

/// One matched attack technique for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attack {
    pub technique: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Attack {
    pub fn new(technique: &str, description: &str) -> Self {
        Self {
            technique: technique.to_string(),
            description: description.to_string(),
            example: None,
        }
    }
}

/// One flagged operation with its matched techniques.
/// `method` carries the path-item key as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub path: String,
    pub method: String,
    pub attacks: Vec<Attack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

/// Full analysis result, ordered by spec path then method iteration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub vulnerabilities: Vec<Finding>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    /// Expose the report as a plain nested mapping/sequence structure so
    /// consumers never depend on the concrete types above.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Null)
    }
}
