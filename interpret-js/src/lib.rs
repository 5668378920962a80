//! Tree-walking evaluator for a JavaScript subset.
//!
//! The evaluator consumes a parsed tree from `syntax-js` that has been analysed by `scope-js`
//! (every name-bearing node annotated with its variable identity), plus a host-provided ambient
//! record, and produces a single runtime result value:
//!
//! ```
//! use interpret_js::{run_script, InterpreterOptions, Value};
//!
//! let value = run_script("let a = 1; a + 2;", InterpreterOptions::default()).unwrap();
//! assert_eq!(value, Value::Number(3.0));
//! ```
//!
//! For object-valued results, drive the pieces directly — the result's handles live in the
//! interpreter's heap:
//!
//! ```
//! use interpret_js::{Interpreter, InterpreterOptions};
//!
//! let mut top = syntax_js::parse("({ answer: 42 });").unwrap();
//! scope_js::compute_symbols(&mut top);
//! let mut interp = Interpreter::new(&top, InterpreterOptions::default());
//! let value = interp.run().unwrap();
//! assert_eq!(interp.render_value(&value), "{ answer: 42 }");
//! ```

mod display;
mod env;
mod error;
mod exec;
mod function;
pub mod globals;
mod heap;
mod object_ops;
mod ops;
mod property;
mod value;

pub use crate::error::EvalError;
pub use crate::exec::Completion;
pub use crate::exec::Interpreter;
pub use crate::exec::InterpreterOptions;
pub use crate::heap::CallableKind;
pub use crate::heap::Heap;
pub use crate::heap::NativeCallFn;
pub use crate::heap::NativeFunction;
pub use crate::heap::ObjectKind;
pub use crate::heap::RegexFlags;
pub use crate::ops::number_to_string;
pub use crate::ops::to_boolean;
pub use crate::ops::type_of;
pub use crate::property::PropertyDescriptor;
pub use crate::property::PropertyKind;
pub use crate::value::JsString;
pub use crate::value::ObjectId;
pub use crate::value::Value;

use tracing::debug_span;

/// Parse, analyse, and evaluate a script with the default globals installed, yielding its final
/// expression value.
///
/// An `Object` result is a handle into the interpreter's heap, which this function drops on
/// return; construct an [`Interpreter`] directly to inspect non-primitive results.
pub fn run_script(source: &str, options: InterpreterOptions) -> Result<Value, EvalError> {
  let _span = debug_span!("run_script").entered();
  let mut top = syntax_js::parse(source)?;
  scope_js::compute_symbols(&mut top);
  let mut interp = Interpreter::new(&top, options);
  globals::install_default_globals(&mut interp);
  interp.run()
}
