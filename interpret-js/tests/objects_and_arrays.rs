use interpret_js::run_script;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn object_literal_member_forms() {
  let value = eval(
    r#"
      let key = 'dyn';
      let b = 2;
      let o = {
        a: 1,
        b,
        [key + 'amic']: 3,
        m() { return this.a; },
        'with space': 4,
        5: 'five',
      };
      o.a + o.b + o.dynamic + o.m() + o['with space'] + o[5].length;
    "#,
  );
  assert_eq!(value, Value::Number(15.0));
}

#[test]
fn object_spread_copies_own_enumerable_properties() {
  let value = eval("let base = { a: 1, b: 2 }; let o = { ...base, b: 3 }; o.a + o.b;");
  assert_eq!(value, Value::Number(4.0));
}

#[test]
fn computed_member_assignment() {
  let value = eval("let o = {}; let k = 'x'; o[k] = 5; o.x;");
  assert_eq!(value, Value::Number(5.0));
}

#[test]
fn getter_setter_halves_accumulate_into_one_property() {
  let value = eval(
    r#"
      let calls = '';
      let o = {
        get v() { calls = calls + 'g'; return 1; },
        set v(x) { calls = calls + 's'; },
      };
      o.v;
      o.v = 2;
      calls;
    "#,
  );
  assert_eq!(value, Value::string("gs"));
}

#[test]
fn getter_only_property_swallows_writes() {
  let value = eval("let o = { get v() { return 1; } }; o.v = 9; o.v;");
  assert_eq!(value, Value::Number(1.0));
}

#[test]
fn setters_are_found_through_the_prototype_chain() {
  let value = eval(
    r#"
      function C() {}
      let hit = 0;
      C.prototype = { set v(x) { hit = x; } };
      let c = new C();
      c.v = 41;
      hit;
    "#,
  );
  assert_eq!(value, Value::Number(41.0));
}

#[test]
fn array_literal_elements_and_holes() {
  let value = eval("let xs = [1, , 3]; xs.length;");
  assert_eq!(value, Value::Number(3.0));
  // A hole reads as a null slot.
  let value = eval("let xs = [1, , 3]; xs[1];");
  assert_eq!(value, Value::Null);
}

#[test]
fn array_spread_inlines_values() {
  let value = eval("let xs = [2, 3]; let ys = [1, ...xs, 4]; ys.length + ys[3];");
  assert_eq!(value, Value::Number(8.0));
}

#[test]
fn spread_in_call_arguments() {
  let value = eval("function add3(a, b, c) { return a + b + c; } add3(...[1, 2, 3]);");
  assert_eq!(value, Value::Number(6.0));
}

#[test]
fn writing_past_the_end_grows_the_array() {
  let value = eval("let xs = []; xs[3] = 1; xs.length;");
  assert_eq!(value, Value::Number(4.0));
}

#[test]
fn assigning_length_truncates() {
  let value = eval("let xs = [1, 2, 3]; xs.length = 1; xs[1] === undefined || xs[1] === null;");
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn string_length_and_indexing() {
  assert_eq!(eval("'hello'.length;"), Value::Number(5.0));
  assert_eq!(eval("'hello'[1];"), Value::string("e"));
}

#[test]
fn regex_literal_carries_pattern_and_flags() {
  assert_eq!(eval("/ab+c/gi.source;"), Value::string("ab+c"));
  assert_eq!(eval("/ab+c/gi.flags;"), Value::string("gi"));
  assert_eq!(eval("/a/s.dotAll;"), Value::Bool(true));
  assert_eq!(eval("/a/.global;"), Value::Bool(false));
  assert_eq!(eval("typeof /a/;"), Value::string("object"));
}

#[test]
fn property_insertion_order_is_preserved() {
  let value = eval(
    r#"
      let o = {};
      o.z = 1; o.a = 2; o.m = 3;
      Object.keys(o)[0] + Object.keys(o)[1] + Object.keys(o)[2];
    "#,
  );
  assert_eq!(value, Value::string("zam"));
}
