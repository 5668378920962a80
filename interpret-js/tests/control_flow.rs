use interpret_js::run_script;
use interpret_js::EvalError;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn try_catch_binds_the_thrown_value() {
  let value = eval("try { throw { x: 1 }; } catch (e) { e.x }");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn any_value_can_be_thrown() {
  let value = eval("try { throw 'boom'; } catch (e) { e }");
  assert_eq!(value, Value::string("boom"));
}

#[test]
fn uncaught_throw_unwinds_to_the_top() {
  let err = run_script("throw 5;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Throw(Value::Number(n)) if n == 5.0));
}

#[test]
fn exceptions_from_catch_propagate() {
  let err = run_script(
    "try { throw 1; } catch (e) { throw 2; }",
    InterpreterOptions::default(),
  )
  .unwrap_err();
  assert!(matches!(err, EvalError::Throw(Value::Number(n)) if n == 2.0));
}

#[test]
fn finally_runs_on_normal_and_abrupt_paths() {
  let value = eval(
    r#"
      let log = '';
      function f() {
        try { return 'r'; } finally { log = log + 'f'; }
      }
      try {
        try { throw 'x'; } finally { log = log + 'g'; }
      } catch (e) {}
      f();
      log;
    "#,
  );
  assert_eq!(value, Value::string("gf"));
}

#[test]
fn normally_completing_finalizer_preserves_the_return_value() {
  let value = eval("function f() { try { return 1; } finally { 2; } } f();");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn abrupt_finalizer_replaces_the_pending_completion() {
  let value = eval("function f() { try { return 1; } finally { return 2; } } f();");
  assert_eq!(value, Value::Number(2.0));
}

#[test]
fn catch_without_parameter() {
  let value = eval("let r = 0; try { throw 1; } catch { r = 9; } r;");
  assert_eq!(value, Value::Number(9.0));
}

#[test]
fn return_stops_function_body_evaluation() {
  let value = eval(
    r#"
      let touched = false;
      function f() { return 1; touched = true; }
      f();
      touched;
    "#,
  );
  assert_eq!(value, Value::Bool(false));
}

#[test]
fn return_propagates_through_nested_loops_and_blocks() {
  let value = eval(
    r#"
      function find(limit) {
        for (let i = 0; i < limit; i++) {
          { if (i === 3) { return i; } }
        }
        return -1;
      }
      find(10);
    "#,
  );
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn switch_matches_strictly_and_falls_through() {
  let value = eval(
    r#"
      function classify(x) {
        let out = '';
        switch (x) {
          case '1': out = out + 'str'; break;
          case 1: out = out + 'one';
          case 2: out = out + 'two'; break;
          default: out = out + 'other';
        }
        return out;
      }
      classify(1) + ':' + classify(2) + ':' + classify('1') + ':' + classify(9);
    "#,
  );
  assert_eq!(value, Value::string("onetwo:two:str:other"));
}

#[test]
fn switch_break_does_not_escape_enclosing_loop() {
  let value = eval(
    r#"
      let total = 0;
      for (let i = 0; i < 3; i++) {
        switch (i) {
          case 0: break;
          default: total = total + i;
        }
        total = total + 10;
      }
      total;
    "#,
  );
  assert_eq!(value, Value::Number(33.0));
}

#[test]
fn do_while_runs_at_least_once() {
  let value = eval("let n = 0; do { n++; } while (false); n;");
  assert_eq!(value, Value::Number(1.0));
}
