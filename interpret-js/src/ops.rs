use crate::error::EvalError;
use crate::exec::Interpreter;
use crate::heap::ObjectKind;
use crate::value::JsString;
use crate::value::Value;
use std::sync::Arc;
use syntax_js::operator::OperatorName;

/// Coercion and operator primitives ("abstract operations").
///
/// Anything that can re-enter the program (`ToPrimitive` on objects with a user `valueOf`/
/// `toString`) takes the interpreter; the rest is pure.

pub fn to_boolean(value: &Value) -> bool {
  match value {
    Value::Undefined | Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => *n != 0.0 && !n.is_nan(),
    Value::String(s) => !s.is_empty(),
    Value::Object(_) => true,
  }
}

pub fn type_of(interp: &Interpreter, value: &Value) -> &'static str {
  match value {
    Value::Undefined => "undefined",
    Value::Null => "object",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Object(id) => match interp.heap().cell(*id).kind {
      ObjectKind::Function(_) | ObjectKind::Native(_) | ObjectKind::Class(_) => "function",
      _ => "object",
    },
  }
}

/// Strict Equality Comparison (`===`). Objects compare by identity, strings by content.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Undefined, Value::Undefined) => true,
    (Value::Null, Value::Null) => true,
    (Value::Bool(x), Value::Bool(y)) => x == y,
    (Value::Number(x), Value::Number(y)) => x == y,
    (Value::String(x), Value::String(y)) => x == y,
    (Value::Object(x), Value::Object(y)) => x == y,
    _ => false,
  }
}

/// Abstract Equality Comparison (`==`).
pub fn loose_equals<'a>(
  interp: &mut Interpreter<'a>,
  a: &Value,
  b: &Value,
) -> Result<bool, EvalError> {
  let mut a = a.clone();
  let mut b = b.clone();
  loop {
    match (&a, &b) {
      // Same-type comparisons use Strict Equality Comparison.
      (Value::Undefined, Value::Undefined)
      | (Value::Null, Value::Null)
      | (Value::Bool(_), Value::Bool(_))
      | (Value::Number(_), Value::Number(_))
      | (Value::String(_), Value::String(_))
      | (Value::Object(_), Value::Object(_)) => return Ok(strict_equals(&a, &b)),

      // `null == undefined`
      (Value::Undefined, Value::Null) | (Value::Null, Value::Undefined) => return Ok(true),

      // Number/string conversions.
      (Value::Number(_), Value::String(_)) => b = Value::Number(to_number(interp, &b)?),
      (Value::String(_), Value::Number(_)) => a = Value::Number(to_number(interp, &a)?),

      // Boolean conversions.
      (Value::Bool(_), _) => a = Value::Number(to_number(interp, &a)?),
      (_, Value::Bool(_)) => b = Value::Number(to_number(interp, &b)?),

      // Object-to-primitive conversions.
      (Value::Object(_), Value::String(_) | Value::Number(_)) => {
        a = to_primitive(interp, &a, PrimitiveHint::Default)?
      }
      (Value::String(_) | Value::Number(_), Value::Object(_)) => {
        b = to_primitive(interp, &b, PrimitiveHint::Default)?
      }

      _ => return Ok(false),
    }
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveHint {
  Default,
  Number,
  String,
}

/// `ToPrimitive` for objects: try the user's `valueOf`/`toString` (order per hint); fall back to
/// built-in renderings for arrays and regex values, and `"[object Object]"` otherwise.
pub fn to_primitive<'a>(
  interp: &mut Interpreter<'a>,
  value: &Value,
  hint: PrimitiveHint,
) -> Result<Value, EvalError> {
  let Value::Object(id) = value else {
    return Ok(value.clone());
  };

  let methods: [&str; 2] = match hint {
    PrimitiveHint::String => ["toString", "valueOf"],
    _ => ["valueOf", "toString"],
  };
  for name in methods {
    let method = interp.get_property(value, name)?;
    if interp.is_callable(&method) {
      let result = interp.call_value(method, value.clone(), &[])?;
      if !matches!(result, Value::Object(_)) {
        return Ok(result);
      };
    };
  }

  // Built-in fallbacks. Snapshot what we need first; array element stringification re-enters the
  // interpreter.
  enum Fallback {
    Array(Vec<Value>),
    Rendered(String),
  }
  let fallback = match &interp.heap().cell(*id).kind {
    ObjectKind::Array(elements) => Fallback::Array(elements.clone()),
    ObjectKind::Regex(regex) => Fallback::Rendered(format!("/{}/{}", regex.pattern, regex.flags)),
    ObjectKind::Function(_) | ObjectKind::Native(_) | ObjectKind::Class(_) => {
      Fallback::Rendered("function".to_string())
    }
    _ => Fallback::Rendered("[object Object]".to_string()),
  };
  Ok(match fallback {
    Fallback::Array(elements) => {
      // Array.prototype.toString: elements joined by commas.
      let mut out = String::new();
      for (i, element) in elements.iter().enumerate() {
        if i > 0 {
          out.push(',');
        };
        if !element.is_nullish() {
          out.push_str(&to_string(interp, element)?);
        };
      }
      Value::string(out)
    }
    Fallback::Rendered(s) => Value::string(s),
  })
}

pub fn to_number<'a>(interp: &mut Interpreter<'a>, value: &Value) -> Result<f64, EvalError> {
  Ok(match value {
    Value::Undefined => f64::NAN,
    Value::Null => 0.0,
    Value::Bool(b) => {
      if *b {
        1.0
      } else {
        0.0
      }
    }
    Value::Number(n) => *n,
    Value::String(s) => string_to_number(s),
    Value::Object(_) => {
      let prim = to_primitive(interp, value, PrimitiveHint::Number)?;
      to_number(interp, &prim)?
    }
  })
}

pub fn to_string<'a>(interp: &mut Interpreter<'a>, value: &Value) -> Result<JsString, EvalError> {
  Ok(match value {
    Value::Undefined => Arc::from("undefined"),
    Value::Null => Arc::from("null"),
    Value::Bool(true) => Arc::from("true"),
    Value::Bool(false) => Arc::from("false"),
    Value::Number(n) => Arc::from(number_to_string(*n).as_str()),
    Value::String(s) => s.clone(),
    Value::Object(_) => {
      let prim = to_primitive(interp, value, PrimitiveHint::String)?;
      to_string(interp, &prim)?
    }
  })
}

/// `ToString` for numbers: shortest round-tripping decimal, with the host's spellings for the
/// special values.
pub fn number_to_string(n: f64) -> String {
  if n.is_nan() {
    return "NaN".to_string();
  };
  if n.is_infinite() {
    return if n.is_sign_negative() {
      "-Infinity".to_string()
    } else {
      "Infinity".to_string()
    };
  };
  if n == 0.0 {
    // `ToString(-0)` is `"0"`.
    return "0".to_string();
  };
  let mut buffer = ryu::Buffer::new();
  let formatted = buffer.format_finite(n);
  formatted.strip_suffix(".0").unwrap_or(formatted).to_string()
}

fn string_to_number(s: &str) -> f64 {
  let trimmed = s.trim_matches(is_ecma_whitespace);
  if trimmed.is_empty() {
    return 0.0;
  };

  // Infinity is case-sensitive in string numeric literals.
  match trimmed {
    "Infinity" | "+Infinity" => return f64::INFINITY,
    "-Infinity" => return f64::NEG_INFINITY,
    _ => {}
  }

  // Guard against Rust accepting "inf"/"infinity" case-insensitively.
  let rest = trimmed
    .strip_prefix('+')
    .or_else(|| trimmed.strip_prefix('-'))
    .unwrap_or(trimmed);
  if rest.eq_ignore_ascii_case("inf") || rest.eq_ignore_ascii_case("infinity") {
    return f64::NAN;
  };

  if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
    return parse_ascii_int_radix(hex, 16).unwrap_or(f64::NAN);
  };
  if let Some(bin) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
    return parse_ascii_int_radix(bin, 2).unwrap_or(f64::NAN);
  };
  if let Some(oct) = trimmed.strip_prefix("0o").or_else(|| trimmed.strip_prefix("0O")) {
    return parse_ascii_int_radix(oct, 8).unwrap_or(f64::NAN);
  };

  trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn parse_ascii_int_radix(s: &str, radix: u32) -> Option<f64> {
  if s.is_empty() {
    return None;
  };
  let radix_f = radix as f64;
  let mut value = 0.0f64;
  for b in s.bytes() {
    let digit = match b {
      b'0'..=b'9' => (b - b'0') as u32,
      b'a'..=b'z' => (b - b'a' + 10) as u32,
      b'A'..=b'Z' => (b - b'A' + 10) as u32,
      _ => return None,
    };
    if digit >= radix {
      return None;
    };
    value = value * radix_f + digit as f64;
  }
  Some(value)
}

fn is_ecma_whitespace(c: char) -> bool {
  // ECMA-262 WhiteSpace + LineTerminator (used by TrimString / StringToNumber).
  matches!(
    c,
    '\u{0009}'
      | '\u{000a}'
      | '\u{000b}'
      | '\u{000c}'
      | '\u{000d}'
      | '\u{0020}'
      | '\u{00a0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200a}'
      | '\u{2028}'
      | '\u{2029}'
      | '\u{202f}'
      | '\u{205f}'
      | '\u{3000}'
      | '\u{feff}'
  )
}

/// ECMAScript `ToInt32`.
pub fn to_int32(n: f64) -> i32 {
  to_uint32(n) as i32
}

/// ECMAScript `ToUint32`.
pub fn to_uint32(n: f64) -> u32 {
  if !n.is_finite() || n == 0.0 {
    return 0;
  };
  let n = n.trunc();
  let modulo = n.rem_euclid(4294967296.0);
  modulo as u32
}

/// Apply a (non-short-circuiting) binary operator's data operation.
pub fn binary_op<'a>(
  interp: &mut Interpreter<'a>,
  operator: OperatorName,
  left: &Value,
  right: &Value,
) -> Result<Value, EvalError> {
  Ok(match operator {
    OperatorName::Addition => {
      let left = to_primitive(interp, left, PrimitiveHint::Default)?;
      let right = to_primitive(interp, right, PrimitiveHint::Default)?;
      if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        let mut out = to_string(interp, &left)?.to_string();
        out.push_str(&to_string(interp, &right)?);
        Value::string(out)
      } else {
        Value::Number(to_number(interp, &left)? + to_number(interp, &right)?)
      }
    }
    OperatorName::Subtraction => {
      Value::Number(to_number(interp, left)? - to_number(interp, right)?)
    }
    OperatorName::Multiplication => {
      Value::Number(to_number(interp, left)? * to_number(interp, right)?)
    }
    OperatorName::Division => Value::Number(to_number(interp, left)? / to_number(interp, right)?),
    OperatorName::Remainder => {
      // JS `%` truncates toward zero, like Rust's `%` on floats.
      Value::Number(to_number(interp, left)? % to_number(interp, right)?)
    }
    OperatorName::Exponentiation => {
      Value::Number(to_number(interp, left)?.powf(to_number(interp, right)?))
    }
    OperatorName::Equality => Value::Bool(loose_equals(interp, left, right)?),
    OperatorName::Inequality => Value::Bool(!loose_equals(interp, left, right)?),
    OperatorName::StrictEquality => Value::Bool(strict_equals(left, right)),
    OperatorName::StrictInequality => Value::Bool(!strict_equals(left, right)),
    OperatorName::LessThan
    | OperatorName::LessThanOrEqual
    | OperatorName::GreaterThan
    | OperatorName::GreaterThanOrEqual => relational(interp, operator, left, right)?,
    OperatorName::BitwiseAnd => {
      Value::Number((to_int32(to_number(interp, left)?) & to_int32(to_number(interp, right)?)) as f64)
    }
    OperatorName::BitwiseOr => {
      Value::Number((to_int32(to_number(interp, left)?) | to_int32(to_number(interp, right)?)) as f64)
    }
    OperatorName::BitwiseXor => {
      Value::Number((to_int32(to_number(interp, left)?) ^ to_int32(to_number(interp, right)?)) as f64)
    }
    OperatorName::BitwiseLeftShift => {
      let shift = to_uint32(to_number(interp, right)?) & 31;
      Value::Number(((to_int32(to_number(interp, left)?)) << shift) as f64)
    }
    OperatorName::BitwiseRightShift => {
      let shift = to_uint32(to_number(interp, right)?) & 31;
      Value::Number(((to_int32(to_number(interp, left)?)) >> shift) as f64)
    }
    OperatorName::BitwiseUnsignedRightShift => {
      let shift = to_uint32(to_number(interp, right)?) & 31;
      Value::Number(((to_uint32(to_number(interp, left)?)) >> shift) as f64)
    }
    OperatorName::In => {
      let Value::Object(id) = right else {
        return Err(EvalError::Type(format!(
          "Cannot use 'in' operator to search for '{}' in non-object",
          to_string(interp, left)?
        )));
      };
      let key = to_string(interp, left)?;
      Value::Bool(interp.has_property(*id, &key))
    }
    OperatorName::Instanceof => Value::Bool(interp.instance_of(left, right)?),
    _ => {
      return Err(EvalError::Unsupported("binary operator"));
    }
  })
}

fn relational<'a>(
  interp: &mut Interpreter<'a>,
  operator: OperatorName,
  left: &Value,
  right: &Value,
) -> Result<Value, EvalError> {
  let left = to_primitive(interp, left, PrimitiveHint::Number)?;
  let right = to_primitive(interp, right, PrimitiveHint::Number)?;
  if let (Value::String(a), Value::String(b)) = (&left, &right) {
    return Ok(Value::Bool(match operator {
      OperatorName::LessThan => a < b,
      OperatorName::LessThanOrEqual => a <= b,
      OperatorName::GreaterThan => a > b,
      _ => a >= b,
    }));
  };
  let a = to_number(interp, &left)?;
  let b = to_number(interp, &right)?;
  // Comparisons involving NaN are false.
  Ok(Value::Bool(match operator {
    OperatorName::LessThan => a < b,
    OperatorName::LessThanOrEqual => a <= b,
    OperatorName::GreaterThan => a > b,
    _ => a >= b,
  }))
}
