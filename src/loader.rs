// Spec loading for endor
// Decodes raw bytes into a generic, order-preserving document tree.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Input bytes decoded as neither JSON nor YAML.
#[derive(Debug, Error)]
#[error("unparseable as JSON or YAML")]
pub struct ParseError;

/// Decode a specification from raw bytes.
///
/// Strict JSON is attempted first, then a safe YAML decode into the same
/// value type. Mapping key order is preserved in both cases, so later path
/// and method iteration follows document order.
pub fn load_spec_bytes(bytes: &[u8]) -> Result<Value, ParseError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(spec) => {
            debug!("decoded spec as JSON");
            Ok(spec)
        }
        Err(json_err) => match serde_yaml::from_slice::<Value>(bytes) {
            Ok(spec) => {
                debug!("decoded spec as YAML");
                Ok(spec)
            }
            Err(yaml_err) => {
                debug!(%json_err, %yaml_err, "spec decode failed");
                Err(ParseError)
            }
        },
    }
}
