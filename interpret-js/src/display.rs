use crate::exec::Interpreter;
use crate::heap::ObjectKind;
use crate::ops;
use crate::property::PropertyKind;
use crate::value::ObjectId;
use crate::value::Value;

impl<'a> Interpreter<'a> {
  /// Render a value the way a REPL would: primitives bare, strings quoted inside composites,
  /// callables and classes by name, cycle-safe.
  ///
  /// Accessors are shown, not invoked; rendering never re-enters the program.
  pub fn render_value(&self, value: &Value) -> String {
    let mut seen = Vec::new();
    self.render(value, &mut seen, false)
  }

  fn render(&self, value: &Value, seen: &mut Vec<ObjectId>, quote_strings: bool) -> String {
    match value {
      Value::Undefined => "undefined".to_string(),
      Value::Null => "null".to_string(),
      Value::Bool(b) => b.to_string(),
      Value::Number(n) => ops::number_to_string(*n),
      Value::String(s) => {
        if quote_strings {
          format!("'{s}'")
        } else {
          s.to_string()
        }
      }
      Value::Object(id) => {
        if seen.contains(id) {
          return "[Circular]".to_string();
        };
        seen.push(*id);
        let out = self.render_object(*id, seen);
        seen.pop();
        out
      }
    }
  }

  fn render_object(&self, id: ObjectId, seen: &mut Vec<ObjectId>) -> String {
    match &self.heap().cell(id).kind {
      ObjectKind::Array(elements) => {
        if elements.is_empty() {
          return "[]".to_string();
        };
        let rendered: Vec<String> = elements
          .iter()
          .map(|element| self.render(element, seen, true))
          .collect();
        format!("[ {} ]", rendered.join(", "))
      }
      ObjectKind::Function(func) => match &func.name {
        Some(name) if !name.is_empty() => format!("[Function: {name}]"),
        _ => "[Function (anonymous)]".to_string(),
      },
      ObjectKind::Native(native) => format!("[Function: {}]", native.name),
      ObjectKind::Class(class) => {
        if class.name.is_empty() {
          "[class (anonymous)]".to_string()
        } else {
          format!("[class {}]", class.name)
        }
      }
      ObjectKind::Regex(regex) => format!("/{}/{}", regex.pattern, regex.flags),
      ObjectKind::Ordinary => {
        let properties = &self.heap().cell(id).properties;
        if properties.is_empty() {
          return "{}".to_string();
        };
        let rendered: Vec<String> = properties
          .iter()
          .filter(|p| p.desc.enumerable)
          .map(|p| {
            let value = match &p.desc.kind {
              PropertyKind::Data { value, .. } => self.render(value, seen, true),
              PropertyKind::Accessor { get, set } => {
                match (get != &Value::Undefined, set != &Value::Undefined) {
                  (true, true) => "[Getter/Setter]".to_string(),
                  (true, false) => "[Getter]".to_string(),
                  _ => "[Setter]".to_string(),
                }
              }
            };
            format!("{}: {}", p.key, value)
          })
          .collect();
        if rendered.is_empty() {
          "{}".to_string()
        } else {
          format!("{{ {} }}", rendered.join(", "))
        }
      }
    }
  }
}
