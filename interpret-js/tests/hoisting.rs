use interpret_js::run_script;
use interpret_js::EvalError;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn function_declarations_are_hoisted() {
  let value = eval("f(); function f() { return 1; }");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn var_declarations_are_hoisted_to_undefined() {
  let value = eval("x === undefined; var x = 1;");
  assert_eq!(value, Value::Bool(true));

  let value = eval("var x = 1; x;");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn var_hoists_out_of_nested_blocks() {
  let value = eval("function f() { { var a = 1; } return a; } f();");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn function_declarations_hoist_within_blocks() {
  let value = eval("function f() { return g(); function g() { return 7; } } f();");
  assert_eq!(value, Value::Number(7.0));
}

#[test]
fn let_before_declaration_is_a_reference_error() {
  let err = run_script("{ x; let x = 1; }", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Reference(name) if name == "x"));
}

#[test]
fn var_in_loop_body_is_function_scoped() {
  let value = eval("function f() { for (let i = 0; i < 3; i++) { var total = (total || 0) + i; } return total; } f();");
  assert_eq!(value, Value::Number(3.0));
}
