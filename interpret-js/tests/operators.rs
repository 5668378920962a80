use interpret_js::run_script;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn addition_follows_host_coercion() {
  assert_eq!(eval("1 + 2;"), Value::Number(3.0));
  assert_eq!(eval("'1' + 2;"), Value::string("12"));
  assert_eq!(eval("1 + '2';"), Value::string("12"));
  assert_eq!(eval("true + 1;"), Value::Number(2.0));
  assert_eq!(eval("null + 1;"), Value::Number(1.0));
  assert_eq!(eval("[1, 2] + '';"), Value::string("1,2"));
}

#[test]
fn arithmetic_and_remainder() {
  assert_eq!(eval("7 % 3;"), Value::Number(1.0));
  assert_eq!(eval("-7 % 3;"), Value::Number(-1.0));
  assert_eq!(eval("2 ** 10;"), Value::Number(1024.0));
  assert_eq!(eval("'6' * '7';"), Value::Number(42.0));
}

#[test]
fn division_by_zero_is_infinite() {
  assert_eq!(eval("1 / 0;"), Value::Number(f64::INFINITY));
  let Value::Number(n) = eval("0 / 0;") else {
    panic!("expected number");
  };
  assert!(n.is_nan());
}

#[test]
fn loose_and_strict_equality() {
  assert_eq!(eval("1 == '1';"), Value::Bool(true));
  assert_eq!(eval("1 === '1';"), Value::Bool(false));
  assert_eq!(eval("null == undefined;"), Value::Bool(true));
  assert_eq!(eval("null === undefined;"), Value::Bool(false));
  assert_eq!(eval("NaN === NaN;"), Value::Bool(false));
  assert_eq!(eval("let o = {}; let p = o; o === p;"), Value::Bool(true));
  assert_eq!(eval("({}) === ({});"), Value::Bool(false));
}

#[test]
fn relational_comparisons() {
  assert_eq!(eval("2 < 10;"), Value::Bool(true));
  // String operands compare lexicographically.
  assert_eq!(eval("'2' < '10';"), Value::Bool(false));
  assert_eq!(eval("'a' < 'b';"), Value::Bool(true));
  assert_eq!(eval("1 <= 1 && 1 >= 1 && 2 > 1;"), Value::Bool(true));
}

#[test]
fn short_circuit_evaluation_laws() {
  // The right operand's side effect happens iff it is evaluated.
  let value = eval("let n = 0; let bump = () => { n++; return true; }; false && bump(); n;");
  assert_eq!(value, Value::Number(0.0));
  let value = eval("let n = 0; let bump = () => { n++; return true; }; true && bump(); n;");
  assert_eq!(value, Value::Number(1.0));
  let value = eval("let n = 0; let bump = () => { n++; return true; }; true || bump(); n;");
  assert_eq!(value, Value::Number(0.0));

  assert_eq!(eval("0 || 'fallback';"), Value::string("fallback"));
  assert_eq!(eval("0 ?? 'fallback';"), Value::Number(0.0));
  assert_eq!(eval("null ?? 'fallback';"), Value::string("fallback"));
}

#[test]
fn comma_operator_yields_the_right_operand() {
  let value = eval("let n = 0; let v = (n = 5, n + 1); v;");
  assert_eq!(value, Value::Number(6.0));
}

#[test]
fn bitwise_operators_use_int32_semantics() {
  assert_eq!(eval("(5 & 3) + (5 | 3) + (5 ^ 3);"), Value::Number(15.0));
  assert_eq!(eval("1 << 3;"), Value::Number(8.0));
  assert_eq!(eval("-8 >> 1;"), Value::Number(-4.0));
  assert_eq!(eval("-1 >>> 28;"), Value::Number(15.0));
  assert_eq!(eval("~5;"), Value::Number(-6.0));
}

#[test]
fn update_expressions() {
  assert_eq!(eval("let a = 1; a++;"), Value::Number(1.0));
  assert_eq!(eval("let a = 1; a++; a;"), Value::Number(2.0));
  assert_eq!(eval("let a = 1; ++a;"), Value::Number(2.0));
  assert_eq!(eval("let o = { n: 1 }; o.n++; o.n;"), Value::Number(2.0));
}

#[test]
fn compound_assignment() {
  assert_eq!(eval("let a = 2; a += 3; a;"), Value::Number(5.0));
  assert_eq!(eval("let s = 'a'; s += 'b'; s;"), Value::string("ab"));
  assert_eq!(eval("let a = 8; a >>= 2; a;"), Value::Number(2.0));
  assert_eq!(eval("let a = null; a ??= 7; a;"), Value::Number(7.0));
  assert_eq!(eval("let a = 1; a ||= 9; a;"), Value::Number(1.0));
  assert_eq!(eval("let o = { n: 10 }; o.n *= 2; o.n;"), Value::Number(20.0));
}

#[test]
fn unary_operators() {
  assert_eq!(eval("-'5';"), Value::Number(-5.0));
  assert_eq!(eval("+true;"), Value::Number(1.0));
  assert_eq!(eval("!0;"), Value::Bool(true));
  assert_eq!(eval("void 42;"), Value::Undefined);
  assert_eq!(eval("typeof 1;"), Value::string("number"));
  assert_eq!(eval("typeof 'x';"), Value::string("string"));
  assert_eq!(eval("typeof null;"), Value::string("object"));
  assert_eq!(eval("typeof undefined;"), Value::string("undefined"));
  assert_eq!(eval("typeof {};"), Value::string("object"));
  assert_eq!(eval("typeof function(){};"), Value::string("function"));
}

#[test]
fn delete_removes_own_properties() {
  assert_eq!(eval("let o = { a: 1 }; delete o.a; o.a;"), Value::Undefined);
  assert_eq!(eval("let o = { a: 1 }; delete o.a;"), Value::Bool(true));
  assert_eq!(eval("let o = {}; 'a' in o;"), Value::Bool(false));
}

#[test]
fn in_and_instanceof() {
  assert_eq!(eval("'a' in { a: 1 };"), Value::Bool(true));
  assert_eq!(eval("'b' in { a: 1 };"), Value::Bool(false));
  assert_eq!(eval("0 in [9];"), Value::Bool(true));
  assert_eq!(eval("function C() {} new C() instanceof C;"), Value::Bool(true));
  assert_eq!(eval("function C() {} function D() {} new C() instanceof D;"), Value::Bool(false));
}

#[test]
fn string_to_number_coercions() {
  assert_eq!(eval("'' * 1;"), Value::Number(0.0));
  assert_eq!(eval("' 42 ' * 1;"), Value::Number(42.0));
  assert_eq!(eval("'0x10' * 1;"), Value::Number(16.0));
  let Value::Number(n) = eval("'12px' * 1;") else {
    panic!("expected number");
  };
  assert!(n.is_nan());
}
