use interpret_js::run_script;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn nested_property_access() {
  let value = eval(r#"let a = {b:2,c:{ca:"hello"}}; a.c.ca;"#);
  assert_eq!(value, Value::string("hello"));
}

#[test]
fn nested_loops_with_break() {
  let value = eval(
    "let b = 0; for (let a = 1; a <= 2; a++) {for (let i = 1; i < 10; i++) {break; b++;}; b = b + a;} b;",
  );
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn function_declaration_and_call() {
  let value = eval("function a(){return 2}; a();");
  assert_eq!(value, Value::Number(2.0));
}

#[test]
fn method_receiver_and_outer_binding() {
  let value = eval(
    r#"let a = { expected: "hello", test: function(actual){ return actual === a.expected; } }; a.test("hello");"#,
  );
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn accessor_pair_on_object_literal() {
  let value = eval("let a = { set b(c) {this._b = c + 10}, get b(){return this._b} }; a.b = 22; a.b;");
  assert_eq!(value, Value::Number(32.0));
}

#[test]
fn early_return_from_if() {
  let value = eval("function f(){ if (true) return 'in'; return 'out'; } f();");
  assert_eq!(value, Value::string("in"));
}

#[test]
fn script_completion_value_ignores_empty_statements() {
  // UpdateEmpty: a trailing statement that produces no value keeps the previous one.
  let value = eval("1; if (true) {}");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn evaluation_is_deterministic() {
  let source = "let xs = []; for (let i = 0; i < 5; i++) { xs[i] = i * 2; } xs[3] + xs[4];";
  assert_eq!(
    run_script(source, InterpreterOptions::default()).unwrap(),
    run_script(source, InterpreterOptions::default()).unwrap(),
  );
}

#[test]
fn template_literals_concatenate() {
  let value = eval("let who = 'world'; `hello ${who}${1 + 1}`;");
  assert_eq!(value, Value::string("hello world2"));
}

#[test]
fn conditional_expression() {
  let value = eval("let a = 5; a > 3 ? 'big' : 'small';");
  assert_eq!(value, Value::string("big"));
}

#[test]
fn this_at_top_level_is_the_ambient_record() {
  let value = eval("this === globalThis;");
  assert_eq!(value, Value::Bool(true));
}
