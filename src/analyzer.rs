// IDOR/BOLA analysis pipeline
//
// Ties the loader, annotator, and rule engine together: decode, annotate,
// evaluate, aggregate. The analyzer is a pure synchronous computation; each
// call owns its document tree, so one instance can serve any number of
// concurrent analyses.

use serde_json::Value;
use tracing::debug;

use crate::analysis::annotator::Annotator;
use crate::analysis::attacks::check_attack_patterns;
use crate::analysis::classifier::IdentifierClassifier;
use crate::loader::{load_spec_bytes, ParseError};
use crate::models::{Finding, Method, Report};

/// Heuristic IDOR/BOLA analyzer for OpenAPI/Swagger documents.
///
/// Construct once and reuse; the only configuration is the precompiled
/// classifier behind the annotator.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdorAnalyzer {
    annotator: Annotator,
}

impl IdorAnalyzer {
    pub fn new() -> Self {
        Self {
            annotator: Annotator::new(IdentifierClassifier::new()),
        }
    }

    /// Decode raw bytes (JSON or YAML) and analyze the result.
    ///
    /// The only error surface is input that decodes as neither format;
    /// everything else degrades to an empty or partial report.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Report, ParseError> {
        let spec = load_spec_bytes(bytes)?;
        Ok(self.analyze(spec))
    }

    /// Run the annotation passes and the rule engine over a decoded spec.
    pub fn analyze(&self, spec: Value) -> Report {
        let annotated = self.annotate(spec);
        self.collect_findings(&annotated)
    }

    /// Annotation passes only; returns the enriched document.
    pub fn annotate(&self, mut spec: Value) -> Value {
        self.annotator.annotate(&mut spec);
        spec
    }

    /// Iterate paths then verb keys in document order and collect every
    /// operation that matched at least one rule.
    fn collect_findings(&self, annotated: &Value) -> Report {
        let mut vulnerabilities = Vec::new();

        if let Some(paths) = annotated.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                let Some(item_map) = path_item.as_object() else {
                    continue;
                };
                for (key, operation) in item_map {
                    if Method::from_key(key).is_none() {
                        continue;
                    }
                    let attacks = check_attack_patterns(operation, path_item);
                    if attacks.is_empty() {
                        continue;
                    }
                    debug!(path = %path, method = %key, matched = attacks.len(), "operation flagged");
                    vulnerabilities.push(Finding {
                        path: path.clone(),
                        method: key.clone(),
                        attacks,
                        recommendations: None,
                    });
                }
            }
        }

        Report { vulnerabilities }
    }
}
