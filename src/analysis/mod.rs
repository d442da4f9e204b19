// Annotation & Rule Evaluation Module
//
// This module turns a decoded spec into flat per-node facts and evaluates
// the attack-pattern rules over them:
//
// - classifier: name/location/schema heuristics for single parameters
// - annotator: descending passes that write x_endor_* facts onto the tree
// - attacks: per-operation rule predicates over the annotated facts
//
// Architecture:
//   classifier.rs (leaf, static heuristics)
//       ↑
//   annotator.rs (walks the document, writes annotations)
//       ↑
//   attacks.rs (combines annotated facts into findings)

pub mod annotator;
pub mod attacks;
pub mod classifier;

// Re-export commonly used items for convenience
pub use annotator::*;
pub use attacks::*;
pub use classifier::*;
