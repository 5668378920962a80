use crate::value::Value;
use syntax_js::error::SyntaxError;

/// Errors produced by the evaluator.
///
/// Only [`EvalError::Throw`] is catchable by the evaluated program's `try`/`catch`; every other
/// variant unwinds out of the top-level evaluation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
  /// A JavaScript `throw` value.
  #[error("uncaught exception")]
  Throw(Value),
  /// An unresolved identifier.
  #[error("{0} is not defined")]
  Reference(String),
  /// Calling a non-callable, constructing a non-constructor, reading through null/undefined, and
  /// similar type violations.
  #[error("{0}")]
  Type(String),
  /// An AST construct the evaluator does not implement (unless configured to skip it).
  #[error("unsupported construct: {0}")]
  Unsupported(&'static str),
  /// Early errors surfaced from the parser before evaluation begins.
  #[error("{0}")]
  Syntax(#[from] SyntaxError),
}
