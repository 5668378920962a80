use interpret_js::run_script;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn closure_captures_outer_binding() {
  let value = eval(
    r#"
      function makeAdder(x) {
        return function(y) { return x + y; };
      }
      var add5 = makeAdder(5);
      add5(3);
    "#,
  );
  assert_eq!(value, Value::Number(8.0));
}

#[test]
fn closures_observe_the_latest_value_not_the_captured_one() {
  let value = eval(
    r#"
      let x = 1;
      let read = () => x;
      x = 42;
      read();
    "#,
  );
  assert_eq!(value, Value::Number(42.0));
}

#[test]
fn closures_can_mutate_captured_bindings() {
  let value = eval(
    r#"
      let count = 0;
      let bump = function() { count = count + 1; return count; };
      bump(); bump();
      count;
    "#,
  );
  assert_eq!(value, Value::Number(2.0));
}

#[test]
fn arrow_this_is_lexical() {
  let value = eval(
    r#"
      let o = {
        v: 7,
        m: function() {
          let f = () => this.v;
          return f();
        }
      };
      o.m();
    "#,
  );
  assert_eq!(value, Value::Number(7.0));
}

#[test]
fn function_this_is_the_callsite_receiver() {
  let value = eval(
    r#"
      let a = { v: 1, get_v: function() { return this.v; } };
      let b = { v: 2, get_v: a.get_v };
      b.get_v();
    "#,
  );
  assert_eq!(value, Value::Number(2.0));
}

#[test]
fn named_function_expression_can_recurse() {
  let value = eval("let f = function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); }; f(5);");
  assert_eq!(value, Value::Number(120.0));
}

#[test]
fn default_parameters_apply_to_missing_and_undefined() {
  let value = eval("function f(a, b = 10) { return a + b; } f(1) + f(1, undefined) + f(1, 2);");
  assert_eq!(value, Value::Number(25.0));
}

#[test]
fn arrow_expression_body_returns_its_value() {
  let value = eval("let double = x => x * 2; double(21);");
  assert_eq!(value, Value::Number(42.0));
}
