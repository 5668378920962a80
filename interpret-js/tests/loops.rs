use interpret_js::run_script;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn for_triple_with_update() {
  let value = eval("let total = 0; for (let i = 1; i <= 4; i++) { total = total + i; } total;");
  assert_eq!(value, Value::Number(10.0));
}

#[test]
fn while_with_continue() {
  let value = eval(
    r#"
      let total = 0;
      let i = 0;
      while (i < 10) {
        i++;
        if (i % 2 === 0) continue;
        total = total + i;
      }
      total;
    "#,
  );
  assert_eq!(value, Value::Number(25.0));
}

#[test]
fn continue_in_for_still_runs_the_update() {
  let value = eval(
    r#"
      let odd = 0;
      for (let i = 0; i < 6; i++) {
        if (i % 2 === 0) continue;
        odd = odd + i;
      }
      odd;
    "#,
  );
  assert_eq!(value, Value::Number(9.0));
}

#[test]
fn break_terminates_only_the_nearest_loop() {
  let value = eval(
    r#"
      let outer = 0;
      for (let i = 0; i < 3; i++) {
        for (let j = 0; j < 10; j++) {
          if (j === 1) break;
        }
        outer = outer + 1;
      }
      outer;
    "#,
  );
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn for_in_enumerates_own_keys_in_insertion_order() {
  let value = eval(
    r#"
      let keys = '';
      let o = { b: 1, a: 2, c: 3 };
      for (let k in o) { keys = keys + k; }
      keys;
    "#,
  );
  assert_eq!(value, Value::string("bac"));
}

#[test]
fn for_in_walks_the_prototype_chain() {
  let value = eval(
    r#"
      function Base() { this.own = 1; }
      Base.prototype.inherited = 2;
      let keys = '';
      for (let k in new Base()) { keys = keys + k + ';'; }
      keys;
    "#,
  );
  assert_eq!(value, Value::string("own;inherited;"));
}

#[test]
fn for_in_over_null_is_empty() {
  let value = eval("let n = 0; for (let k in null) { n++; } n;");
  assert_eq!(value, Value::Number(0.0));
}

#[test]
fn for_of_iterates_array_values() {
  let value = eval("let total = 0; for (let v of [1, 2, 3]) { total = total + v; } total;");
  assert_eq!(value, Value::Number(6.0));
}

#[test]
fn for_of_iterates_string_characters() {
  let value = eval("let out = ''; for (let c of 'abc') { out = c + out; } out;");
  assert_eq!(value, Value::string("cba"));
}

#[test]
fn for_of_assignment_form_writes_the_outer_binding() {
  let value = eval("let v = 0; for (v of [1, 2, 3]) {} v;");
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn loop_body_without_braces() {
  let value = eval("let n = 0; for (let i = 0; i < 3; i++) n++; n;");
  assert_eq!(value, Value::Number(3.0));
}
