use crate::value::ObjectId;
use crate::value::Value;
use ahash::HashMap;
use scope_js::symbol::Symbol;

/// The binding store: one cell per scope-analysis symbol.
///
/// Cells are never removed, so a closure that references a symbol observes that symbol's latest
/// value for as long as the evaluator lives. This is the "indirection cell" scheme: a unique
/// symbol is the cell's identity, and every closure over the binding shares it.
pub struct Environment {
  slots: HashMap<Symbol, Value>,
}

impl Environment {
  pub fn new() -> Environment {
    Environment {
      slots: HashMap::default(),
    }
  }

  /// Bind a declaration's value, creating or overwriting the cell.
  pub fn declare(&mut self, symbol: Symbol, value: Value) {
    self.slots.insert(symbol, value);
  }

  pub fn is_declared(&self, symbol: Symbol) -> bool {
    self.slots.contains_key(&symbol)
  }

  pub fn get(&self, symbol: Symbol) -> Option<&Value> {
    self.slots.get(&symbol)
  }

  /// Update an existing cell (assignment / update expressions).
  pub fn set(&mut self, symbol: Symbol, value: Value) {
    self.slots.insert(symbol, value);
  }
}

/// One entry of the context stack: the `this` receiver of the running activation, plus an
/// optional ambient record consulted for free names.
///
/// Frames are pushed on function entry and popped on exit (normal or abrupt). The outermost frame
/// is the host-provided ambient context; `this` at the top level is that record.
pub struct ContextFrame {
  pub this_value: Value,
  pub ambient: Option<ObjectId>,
}
