use crate::error::EvalError;
use crate::exec::Interpreter;
use crate::heap::NativeCallFn;
use crate::heap::NativeFunction;
use crate::heap::ObjectKind;
use crate::ops;
use crate::property::PropertyDescriptor;
use crate::value::ObjectId;
use crate::value::Value;
use std::sync::Arc;

/// Install the default ambient record: host standard-library objects a script expects to find.
///
/// Hosts embedding the evaluator can skip this and build their own ambient context with
/// [`Interpreter::define_global`] and the allocation helpers.
pub fn install_default_globals(interp: &mut Interpreter) {
  interp.define_global("undefined", Value::Undefined);
  interp.define_global("NaN", Value::Number(f64::NAN));
  interp.define_global("Infinity", Value::Number(f64::INFINITY));
  interp.define_global("globalThis", Value::Object(interp.globals()));

  define_global_native(interp, "parseInt", parse_int);
  define_global_native(interp, "parseFloat", parse_float);
  define_global_native(interp, "isNaN", is_nan);
  define_global_native(interp, "isFinite", is_finite);
  define_global_native(interp, "String", string_constructor);
  define_global_native(interp, "Number", number_constructor);
  define_global_native(interp, "Boolean", boolean_constructor);

  let console = interp.heap_mut().alloc(ObjectKind::Ordinary);
  define_native(interp, console, "log", console_log);
  define_native(interp, console, "error", console_error);
  define_native(interp, console, "warn", console_error);
  interp.define_global("console", Value::Object(console));

  let math = interp.heap_mut().alloc(ObjectKind::Ordinary);
  define_data(interp, math, "PI", Value::Number(std::f64::consts::PI));
  define_data(interp, math, "E", Value::Number(std::f64::consts::E));
  define_native(interp, math, "abs", math_abs);
  define_native(interp, math, "ceil", math_ceil);
  define_native(interp, math, "floor", math_floor);
  define_native(interp, math, "max", math_max);
  define_native(interp, math, "min", math_min);
  define_native(interp, math, "pow", math_pow);
  define_native(interp, math, "round", math_round);
  define_native(interp, math, "sqrt", math_sqrt);
  define_native(interp, math, "trunc", math_trunc);
  interp.define_global("Math", Value::Object(math));

  let object = interp.heap_mut().alloc(ObjectKind::Ordinary);
  define_native(interp, object, "keys", object_keys);
  interp.define_global("Object", Value::Object(object));

  let array = interp.heap_mut().alloc(ObjectKind::Ordinary);
  define_native(interp, array, "isArray", array_is_array);
  interp.define_global("Array", Value::Object(array));
}

pub fn alloc_native(interp: &mut Interpreter, name: &'static str, call: NativeCallFn) -> ObjectId {
  interp.heap_mut().alloc(ObjectKind::Native(NativeFunction {
    name,
    call,
    construct: None,
  }))
}

fn define_native(interp: &mut Interpreter, obj: ObjectId, name: &'static str, call: NativeCallFn) {
  let func = alloc_native(interp, name, call);
  define_data(interp, obj, name, Value::Object(func));
}

fn define_data(interp: &mut Interpreter, obj: ObjectId, name: &'static str, value: Value) {
  interp
    .heap_mut()
    .define_property(obj, Arc::from(name), PropertyDescriptor::data(value));
}

fn define_global_native(interp: &mut Interpreter, name: &'static str, call: NativeCallFn) {
  let func = alloc_native(interp, name, call);
  interp.define_global(name, Value::Object(func));
}

fn arg(args: &[Value], i: usize) -> Value {
  args.get(i).cloned().unwrap_or(Value::Undefined)
}

fn console_log<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  println!("{}", render_args(interp, args));
  Ok(Value::Undefined)
}

fn console_error<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  eprintln!("{}", render_args(interp, args));
  Ok(Value::Undefined)
}

fn render_args(interp: &Interpreter, args: &[Value]) -> String {
  args
    .iter()
    .map(|value| interp.render_value(value))
    .collect::<Vec<_>>()
    .join(" ")
}

fn parse_int<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let text = ops::to_string(interp, &arg(args, 0))?;
  let mut s = text.trim();
  let mut sign = 1.0;
  if let Some(rest) = s.strip_prefix('-') {
    sign = -1.0;
    s = rest;
  } else if let Some(rest) = s.strip_prefix('+') {
    s = rest;
  };

  let mut radix = match arg(args, 1) {
    Value::Undefined => 0,
    value => ops::to_number(interp, &value)? as u32,
  };
  if radix == 16 || radix == 0 {
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
      s = rest;
      radix = 16;
    };
  };
  if radix == 0 {
    radix = 10;
  };
  if !(2..=36).contains(&radix) {
    return Ok(Value::Number(f64::NAN));
  };

  // Longest valid digit prefix.
  let end = s
    .bytes()
    .position(|b| {
      let digit = (b as char).to_digit(36);
      !digit.is_some_and(|d| d < radix)
    })
    .unwrap_or(s.len());
  match ops::parse_ascii_int_radix(&s[..end], radix) {
    Some(n) => Ok(Value::Number(sign * n)),
    None => Ok(Value::Number(f64::NAN)),
  }
}

fn parse_float<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let text = ops::to_string(interp, &arg(args, 0))?;
  let s = text.trim();
  let bytes = s.as_bytes();

  // Longest prefix matching a decimal literal.
  let mut i = 0;
  if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
    i += 1;
  };
  if s[i..].starts_with("Infinity") {
    let n = if s.starts_with('-') {
      f64::NEG_INFINITY
    } else {
      f64::INFINITY
    };
    return Ok(Value::Number(n));
  };
  let mantissa_start = i;
  while i < bytes.len() && bytes[i].is_ascii_digit() {
    i += 1;
  }
  if i < bytes.len() && bytes[i] == b'.' {
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
    }
  };
  if i == mantissa_start || s[mantissa_start..i].chars().all(|c| c == '.') {
    return Ok(Value::Number(f64::NAN));
  };
  if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
    let mut j = i + 1;
    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
      j += 1;
    };
    let exp_start = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
      j += 1;
    }
    if j > exp_start {
      i = j;
    };
  };
  Ok(Value::Number(s[..i].parse::<f64>().unwrap_or(f64::NAN)))
}

fn is_nan<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  Ok(Value::Bool(ops::to_number(interp, &arg(args, 0))?.is_nan()))
}

fn is_finite<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  Ok(Value::Bool(
    ops::to_number(interp, &arg(args, 0))?.is_finite(),
  ))
}

fn string_constructor<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  if args.is_empty() {
    return Ok(Value::string(""));
  };
  Ok(Value::String(ops::to_string(interp, &args[0])?))
}

fn number_constructor<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  if args.is_empty() {
    return Ok(Value::Number(0.0));
  };
  Ok(Value::Number(ops::to_number(interp, &args[0])?))
}

fn boolean_constructor<'t>(
  _interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  Ok(Value::Bool(ops::to_boolean(&arg(args, 0))))
}

fn object_keys<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let keys = match arg(args, 0) {
    Value::Object(id) => interp
      .own_enumerable_keys(id)
      .into_iter()
      .map(Value::String)
      .collect(),
    _ => Vec::new(),
  };
  Ok(Value::Object(
    interp.heap_mut().alloc(ObjectKind::Array(keys)),
  ))
}

fn array_is_array<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  Ok(Value::Bool(match arg(args, 0) {
    Value::Object(id) => matches!(interp.heap().cell(id).kind, ObjectKind::Array(_)),
    _ => false,
  }))
}

macro_rules! math_unary {
  ($name:ident, $op:ident) => {
    fn $name<'t>(
      interp: &mut Interpreter<'t>,
      _this: Value,
      args: &[Value],
    ) -> Result<Value, EvalError> {
      Ok(Value::Number(ops::to_number(interp, &arg(args, 0))?.$op()))
    }
  };
}

math_unary!(math_abs, abs);
math_unary!(math_ceil, ceil);
math_unary!(math_floor, floor);
math_unary!(math_sqrt, sqrt);
math_unary!(math_trunc, trunc);

fn math_round<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let n = ops::to_number(interp, &arg(args, 0))?;
  // JS rounds half-way cases toward +Infinity; Rust's `round` rounds away from zero.
  Ok(Value::Number((n + 0.5).floor()))
}

fn math_pow<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let base = ops::to_number(interp, &arg(args, 0))?;
  let exponent = ops::to_number(interp, &arg(args, 1))?;
  Ok(Value::Number(base.powf(exponent)))
}

fn math_max<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let mut out = f64::NEG_INFINITY;
  for value in args {
    let n = ops::to_number(interp, value)?;
    if n.is_nan() {
      return Ok(Value::Number(f64::NAN));
    };
    out = out.max(n);
  }
  Ok(Value::Number(out))
}

fn math_min<'t>(
  interp: &mut Interpreter<'t>,
  _this: Value,
  args: &[Value],
) -> Result<Value, EvalError> {
  let mut out = f64::INFINITY;
  for value in args {
    let n = ops::to_number(interp, value)?;
    if n.is_nan() {
      return Ok(Value::Number(f64::NAN));
    };
    out = out.min(n);
  }
  Ok(Value::Number(out))
}
