use crate::error::EvalError;
use crate::exec::Interpreter;
use crate::property::Property;
use crate::property::PropertyDescriptor;
use crate::value::JsString;
use crate::value::ObjectId;
use crate::value::Value;
use syntax_js::ast::func::Func;
use syntax_js::ast::node::Node;

/// The arena all values with identity live in.
///
/// Slots are index-addressed and never freed during a run: the binding store keeps every declared
/// cell alive anyway, and cyclic values (an object holding a closure that references the object)
/// are unproblematic because the arena owns everything and handles are plain indices.
pub struct Heap<'a> {
  cells: Vec<HeapCell<'a>>,
}

pub struct HeapCell<'a> {
  pub kind: ObjectKind<'a>,
  pub prototype: Option<ObjectId>,
  // Ordered own properties; insertion order is observable through enumeration.
  pub properties: Vec<Property>,
}

/// What an arena object is, beyond its ordinary property table.
pub enum ObjectKind<'a> {
  Ordinary,
  /// Element storage; holes are materialised as null slots.
  Array(Vec<Value>),
  Function(UserFunction<'a>),
  Native(NativeFunction),
  Class(ClassRecord),
  Regex(RegexValue),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CallableKind {
  Function,
  Arrow,
  Method,
  Constructor,
}

/// A callable defined by the evaluated program: its parameters and body are AST borrowed from the
/// analysed tree, and arrows carry the receiver of the activation that created them.
pub struct UserFunction<'a> {
  pub kind: CallableKind,
  pub name: Option<JsString>,
  pub func: &'a Node<Func>,
  pub captured_this: Option<Value>,
}

pub type NativeCallFn = for<'t> fn(&mut Interpreter<'t>, Value, &[Value]) -> Result<Value, EvalError>;

/// A host-provided callable, optionally constructable.
pub struct NativeFunction {
  pub name: &'static str,
  pub call: NativeCallFn,
  pub construct: Option<NativeCallFn>,
}

/// A class value: callable only through `new`, carrying the chain links `new` needs.
pub struct ClassRecord {
  pub name: JsString,
  /// A `CallableKind::Constructor` function object, if the class declares one.
  pub constructor: Option<ObjectId>,
  pub parent: Option<ObjectId>,
  /// The instance prototype; own properties are the instance methods.
  pub prototype: ObjectId,
}

/// A regular expression value: pattern plus flag set. Matching is host territory; the evaluator
/// only carries the value.
pub struct RegexValue {
  pub pattern: JsString,
  pub flags: RegexFlags,
}

#[derive(Clone, Copy, Default, Debug)]
pub struct RegexFlags {
  pub global: bool,
  pub ignore_case: bool,
  pub multiline: bool,
  pub dot_all: bool,
  pub sticky: bool,
  pub unicode: bool,
}

impl RegexFlags {
  pub fn parse(flags: &str) -> RegexFlags {
    let mut out = RegexFlags::default();
    for c in flags.chars() {
      match c {
        'g' => out.global = true,
        'i' => out.ignore_case = true,
        'm' => out.multiline = true,
        's' => out.dot_all = true,
        'y' => out.sticky = true,
        'u' => out.unicode = true,
        _ => {}
      }
    }
    out
  }
}

impl std::fmt::Display for RegexFlags {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (set, c) in [
      (self.global, 'g'),
      (self.ignore_case, 'i'),
      (self.multiline, 'm'),
      (self.dot_all, 's'),
      (self.sticky, 'y'),
      (self.unicode, 'u'),
    ] {
      if set {
        write!(f, "{c}")?;
      }
    }
    Ok(())
  }
}

impl<'a> Heap<'a> {
  pub fn new() -> Heap<'a> {
    Heap { cells: Vec::new() }
  }

  pub fn alloc(&mut self, kind: ObjectKind<'a>) -> ObjectId {
    self.alloc_with_proto(kind, None)
  }

  pub fn alloc_with_proto(&mut self, kind: ObjectKind<'a>, prototype: Option<ObjectId>) -> ObjectId {
    let id = ObjectId(self.cells.len() as u32);
    self.cells.push(HeapCell {
      kind,
      prototype,
      properties: Vec::new(),
    });
    id
  }

  pub fn cell(&self, id: ObjectId) -> &HeapCell<'a> {
    &self.cells[id.0 as usize]
  }

  pub fn cell_mut(&mut self, id: ObjectId) -> &mut HeapCell<'a> {
    &mut self.cells[id.0 as usize]
  }

  pub fn own_property(&self, id: ObjectId, key: &str) -> Option<&PropertyDescriptor> {
    self
      .cell(id)
      .properties
      .iter()
      .find(|p| &*p.key == key)
      .map(|p| &p.desc)
  }

  pub fn own_property_mut(&mut self, id: ObjectId, key: &str) -> Option<&mut PropertyDescriptor> {
    self
      .cell_mut(id)
      .properties
      .iter_mut()
      .find(|p| &*p.key == key)
      .map(|p| &mut p.desc)
  }

  /// Install or replace an own property, preserving insertion order for replacements.
  pub fn define_property(&mut self, id: ObjectId, key: JsString, desc: PropertyDescriptor) {
    let cell = self.cell_mut(id);
    match cell.properties.iter_mut().find(|p| p.key == key) {
      Some(existing) => existing.desc = desc,
      None => cell.properties.push(Property { key, desc }),
    }
  }

  pub fn remove_property(&mut self, id: ObjectId, key: &str) -> bool {
    let cell = self.cell_mut(id);
    match cell.properties.iter().position(|p| &*p.key == key) {
      Some(idx) => {
        if !cell.properties[idx].desc.configurable {
          return false;
        };
        cell.properties.remove(idx);
        true
      }
      None => false,
    }
  }
}
