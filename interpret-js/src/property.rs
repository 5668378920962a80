use crate::value::JsString;
use crate::value::Value;

/// A concrete property descriptor.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
  pub enumerable: bool,
  pub configurable: bool,
  pub kind: PropertyKind,
}

impl PropertyDescriptor {
  /// The descriptor ordinary assignment and object literals create.
  pub fn data(value: Value) -> PropertyDescriptor {
    PropertyDescriptor {
      enumerable: true,
      configurable: true,
      kind: PropertyKind::Data {
        value,
        writable: true,
      },
    }
  }

  /// Same as [`PropertyDescriptor::data`] but hidden from enumeration (`prototype`,
  /// `constructor`, and similar wiring).
  pub fn hidden_data(value: Value) -> PropertyDescriptor {
    PropertyDescriptor {
      enumerable: false,
      configurable: true,
      kind: PropertyKind::Data {
        value,
        writable: true,
      },
    }
  }
}

/// The kind of property described by a [`PropertyDescriptor`].
///
/// An accessor never also carries a data value; writes to an accessor property invoke the setter.
#[derive(Debug, Clone)]
pub enum PropertyKind {
  Data { value: Value, writable: bool },
  Accessor { get: Value, set: Value },
}

/// One slot of an object's ordered own-property table.
#[derive(Debug, Clone)]
pub struct Property {
  pub key: JsString,
  pub desc: PropertyDescriptor,
}
