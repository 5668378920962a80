use crate::error::EvalError;
use crate::exec::Interpreter;
use crate::heap::ObjectKind;
use crate::ops;
use crate::property::PropertyDescriptor;
use crate::property::PropertyKind;
use crate::value::JsString;
use crate::value::ObjectId;
use crate::value::Value;
use std::sync::Arc;

/// Parse an array index key (`ToString(ToUint32(P)) === P`, no leading zeros).
pub fn array_index(key: &str) -> Option<usize> {
  if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
    return None;
  };
  if !key.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  };
  key.parse::<usize>().ok()
}

impl<'a> Interpreter<'a> {
  /// Property read with receiver binding: accessors run with `base` as `this`, lookups walk the
  /// prototype chain.
  pub fn get_property(&mut self, base: &Value, key: &str) -> Result<Value, EvalError> {
    match base {
      Value::Undefined | Value::Null => Err(EvalError::Type(format!(
        "Cannot read properties of {} (reading '{key}')",
        if matches!(base, Value::Undefined) {
          "undefined"
        } else {
          "null"
        },
      ))),
      Value::String(s) => Ok(string_property(s, key)),
      Value::Number(_) | Value::Bool(_) => Ok(Value::Undefined),
      Value::Object(id) => self.get_object_property(*id, key, base.clone()),
    }
  }

  fn get_object_property(
    &mut self,
    start: ObjectId,
    key: &str,
    receiver: Value,
  ) -> Result<Value, EvalError> {
    let mut current = Some(start);
    while let Some(id) = current {
      if let Some(value) = self.kind_property(id, key) {
        return Ok(value);
      };
      let found = self.heap().own_property(id, key).map(|d| d.kind.clone());
      match found {
        Some(PropertyKind::Data { value, .. }) => return Ok(value),
        Some(PropertyKind::Accessor { get, .. }) => {
          if !self.is_callable(&get) {
            // Absent getter half of an accessor pair.
            return Ok(Value::Undefined);
          };
          return self.call_value(get, receiver, &[]);
        }
        None => current = self.heap().cell(id).prototype,
      }
    }
    Ok(Value::Undefined)
  }

  /// Properties backed by the object's kind rather than its property table.
  fn kind_property(&self, id: ObjectId, key: &str) -> Option<Value> {
    match &self.heap().cell(id).kind {
      ObjectKind::Array(elements) => match key {
        "length" => Some(Value::Number(elements.len() as f64)),
        _ => array_index(key)
          .filter(|idx| *idx < elements.len())
          .map(|idx| elements[idx].clone()),
      },
      ObjectKind::Function(func) => match key {
        "name" => Some(Value::String(
          func.name.clone().unwrap_or_else(|| Arc::from("")),
        )),
        "length" => Some(Value::Number(func.func.stx.parameters.len() as f64)),
        _ => None,
      },
      ObjectKind::Native(native) => match key {
        "name" => Some(Value::string(native.name)),
        _ => None,
      },
      ObjectKind::Class(class) => match key {
        "name" => Some(Value::String(class.name.clone())),
        "prototype" => Some(Value::Object(class.prototype)),
        _ => None,
      },
      ObjectKind::Regex(regex) => match key {
        "source" => Some(Value::String(regex.pattern.clone())),
        "flags" => Some(Value::string(regex.flags.to_string())),
        "global" => Some(Value::Bool(regex.flags.global)),
        "ignoreCase" => Some(Value::Bool(regex.flags.ignore_case)),
        "multiline" => Some(Value::Bool(regex.flags.multiline)),
        "dotAll" => Some(Value::Bool(regex.flags.dot_all)),
        "sticky" => Some(Value::Bool(regex.flags.sticky)),
        "unicode" => Some(Value::Bool(regex.flags.unicode)),
        _ => None,
      },
      ObjectKind::Ordinary => None,
    }
  }

  /// Property write: setters (own or inherited) win, own writable data updates in place,
  /// everything else defines a fresh own data property. Writes to primitives are no-ops, matching
  /// non-strict host assignment.
  pub fn set_property(&mut self, base: &Value, key: &str, value: Value) -> Result<(), EvalError> {
    let id = match base {
      Value::Undefined | Value::Null => {
        return Err(EvalError::Type(format!(
          "Cannot set properties of {} (setting '{key}')",
          if matches!(base, Value::Undefined) {
            "undefined"
          } else {
            "null"
          },
        )));
      }
      Value::Object(id) => *id,
      _ => return Ok(()),
    };

    if let ObjectKind::Array(_) = self.heap().cell(id).kind {
      if key == "length" {
        let len = ops::to_number(self, &value)? as usize;
        let ObjectKind::Array(elements) = &mut self.heap_mut().cell_mut(id).kind else {
          unreachable!();
        };
        elements.resize(len, Value::Null);
        return Ok(());
      };
      if let Some(idx) = array_index(key) {
        let ObjectKind::Array(elements) = &mut self.heap_mut().cell_mut(id).kind else {
          unreachable!();
        };
        if idx >= elements.len() {
          elements.resize(idx + 1, Value::Null);
        };
        elements[idx] = value;
        return Ok(());
      };
    };

    let mut current = Some(id);
    while let Some(c) = current {
      let found = self.heap().own_property(c, key).map(|d| d.kind.clone());
      match found {
        Some(PropertyKind::Accessor { set, .. }) => {
          if self.is_callable(&set) {
            self.call_value(set, base.clone(), &[value])?;
          };
          // A get-only accessor swallows the write, as non-strict assignment does.
          return Ok(());
        }
        Some(PropertyKind::Data { writable, .. }) => {
          if c == id {
            if writable {
              if let Some(desc) = self.heap_mut().own_property_mut(id, key) {
                desc.kind = PropertyKind::Data {
                  value,
                  writable: true,
                };
              };
            };
            return Ok(());
          };
          // Inherited data property: shadow it with an own one.
          break;
        }
        None => current = self.heap().cell(c).prototype,
      }
    }

    self
      .heap_mut()
      .define_property(id, Arc::from(key), PropertyDescriptor::data(value));
    Ok(())
  }

  /// Install one half of an accessor property, merging with an existing accessor under the same
  /// name (an object literal's `get x` and `set x` accumulate into one descriptor).
  pub fn define_accessor(
    &mut self,
    id: ObjectId,
    key: &str,
    getter: Option<Value>,
    setter: Option<Value>,
  ) {
    if let Some(desc) = self.heap_mut().own_property_mut(id, key) {
      if let PropertyKind::Accessor { get, set } = &mut desc.kind {
        if let Some(getter) = getter {
          *get = getter;
        };
        if let Some(setter) = setter {
          *set = setter;
        };
        return;
      };
    };
    self.heap_mut().define_property(
      id,
      Arc::from(key),
      PropertyDescriptor {
        enumerable: true,
        configurable: true,
        kind: PropertyKind::Accessor {
          get: getter.unwrap_or(Value::Undefined),
          set: setter.unwrap_or(Value::Undefined),
        },
      },
    );
  }

  pub fn has_property(&self, id: ObjectId, key: &str) -> bool {
    let mut current = Some(id);
    while let Some(c) = current {
      if self.kind_property(c, key).is_some() || self.heap().own_property(c, key).is_some() {
        return true;
      };
      current = self.heap().cell(c).prototype;
    }
    false
  }

  pub fn delete_property(&mut self, base: &Value, key: &str) -> Result<bool, EvalError> {
    let Value::Object(id) = base else {
      return Ok(true);
    };
    if let ObjectKind::Array(_) = self.heap().cell(*id).kind {
      if key == "length" {
        return Ok(false);
      };
      if let Some(idx) = array_index(key) {
        let ObjectKind::Array(elements) = &mut self.heap_mut().cell_mut(*id).kind else {
          unreachable!();
        };
        if idx < elements.len() {
          elements[idx] = Value::Null;
        };
        return Ok(true);
      };
    };
    Ok(self.heap_mut().remove_property(*id, key))
  }

  /// Own enumerable string keys in insertion order (array indices lead for arrays).
  pub fn own_enumerable_keys(&self, id: ObjectId) -> Vec<JsString> {
    let cell = self.heap().cell(id);
    let mut keys: Vec<JsString> = Vec::new();
    if let ObjectKind::Array(elements) = &cell.kind {
      keys.extend((0..elements.len()).map(|i| JsString::from(i.to_string().as_str())));
    };
    keys.extend(
      cell
        .properties
        .iter()
        .filter(|p| p.desc.enumerable)
        .map(|p| p.key.clone()),
    );
    keys
  }

  /// `for-in` key order: own enumerable keys, then prototype-chain keys not shadowed closer to
  /// the receiver.
  pub fn enumerate_keys(&self, start: ObjectId) -> Vec<JsString> {
    let mut keys: Vec<JsString> = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
      for key in self.own_enumerable_keys(id) {
        if !keys.contains(&key) {
          keys.push(key);
        };
      }
      current = self.heap().cell(id).prototype;
    }
    keys
  }

  pub fn is_callable(&self, value: &Value) -> bool {
    match value {
      Value::Object(id) => matches!(
        self.heap().cell(*id).kind,
        ObjectKind::Function(_) | ObjectKind::Native(_)
      ),
      _ => false,
    }
  }

  pub fn instance_of(&mut self, left: &Value, right: &Value) -> Result<bool, EvalError> {
    let Value::Object(ctor) = right else {
      return Err(EvalError::Type(
        "Right-hand side of 'instanceof' is not callable".to_string(),
      ));
    };
    let target_proto = match &self.heap().cell(*ctor).kind {
      ObjectKind::Class(class) => Some(class.prototype),
      ObjectKind::Function(_) => match self.get_property(right, "prototype")? {
        Value::Object(p) => Some(p),
        _ => None,
      },
      ObjectKind::Native(_) => None,
      _ => {
        return Err(EvalError::Type(
          "Right-hand side of 'instanceof' is not callable".to_string(),
        ));
      }
    };
    let Some(target_proto) = target_proto else {
      return Ok(false);
    };
    let Value::Object(mut id) = left.clone() else {
      return Ok(false);
    };
    while let Some(proto) = self.heap().cell(id).prototype {
      if proto == target_proto {
        return Ok(true);
      };
      id = proto;
    }
    Ok(false)
  }

  /// The values a spread element or `for-of` walks: array elements in order, string characters,
  /// anything else is not iterable.
  pub fn iterate_values(&mut self, value: &Value) -> Result<Vec<Value>, EvalError> {
    match value {
      Value::String(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
      Value::Object(id) => match &self.heap().cell(*id).kind {
        ObjectKind::Array(elements) => Ok(elements.clone()),
        _ => Err(EvalError::Type("value is not iterable".to_string())),
      },
      _ => Err(EvalError::Type(format!(
        "{} is not iterable",
        ops::type_of(self, value)
      ))),
    }
  }
}

fn string_property(s: &str, key: &str) -> Value {
  if key == "length" {
    return Value::Number(s.chars().count() as f64);
  };
  match array_index(key) {
    Some(idx) => s
      .chars()
      .nth(idx)
      .map(|c| Value::string(c.to_string()))
      .unwrap_or(Value::Undefined),
    None => Value::Undefined,
  }
}
