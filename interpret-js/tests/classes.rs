use interpret_js::run_script;
use interpret_js::EvalError;
use interpret_js::InterpreterOptions;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn constructor_and_instance_methods() {
  let value = eval(
    r#"
      class Point {
        constructor(x, y) { this.x = x; this.y = y; }
        manhattan() { return this.x + this.y; }
      }
      new Point(3, 4).manhattan();
    "#,
  );
  assert_eq!(value, Value::Number(7.0));
}

#[test]
fn methods_live_on_the_prototype() {
  let value = eval(
    r#"
      class A { m() { return 1; } }
      let a = new A();
      a.m === A.prototype.m;
    "#,
  );
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn static_members_attach_to_the_class() {
  let value = eval(
    r#"
      class Registry {
        static make() { return 42; }
      }
      Registry.make();
    "#,
  );
  assert_eq!(value, Value::Number(42.0));
}

#[test]
fn subclass_inherits_methods() {
  let value = eval(
    r#"
      class Base { greet() { return 'hi'; } }
      class Derived extends Base {}
      new Derived().greet();
    "#,
  );
  assert_eq!(value, Value::string("hi"));
}

#[test]
fn subclass_without_constructor_forwards_arguments() {
  let value = eval(
    r#"
      class Base { constructor(v) { this.v = v; } }
      class Derived extends Base {}
      new Derived(9).v;
    "#,
  );
  assert_eq!(value, Value::Number(9.0));
}

#[test]
fn subclass_methods_shadow_base_methods() {
  let value = eval(
    r#"
      class Base { id() { return 'base'; } }
      class Derived extends Base { id() { return 'derived'; } }
      new Derived().id() + ':' + new Base().id();
    "#,
  );
  assert_eq!(value, Value::string("derived:base"));
}

#[test]
fn class_accessors() {
  let value = eval(
    r#"
      class Box {
        constructor() { this._v = 0; }
        get v() { return this._v; }
        set v(x) { this._v = x * 2; }
      }
      let b = new Box();
      b.v = 21;
      b.v;
    "#,
  );
  assert_eq!(value, Value::Number(42.0));
}

#[test]
fn instanceof_walks_the_class_chain() {
  let value = eval(
    r#"
      class A {}
      class B extends A {}
      let b = new B();
      (b instanceof B) && (b instanceof A);
    "#,
  );
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn class_expression_can_be_named_and_anonymous() {
  let value = eval("let C = class { m() { return 5; } }; new C().m();");
  assert_eq!(value, Value::Number(5.0));
  let value = eval("let C = class Named { m() { return Named; } }; new C().m() === C;");
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn calling_a_class_without_new_is_a_type_error() {
  let err = run_script("class A {} A();", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Type(_)));
}

#[test]
fn constructing_a_non_constructor_is_a_type_error() {
  let err = run_script("new 5;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Type(_)));

  let err = run_script("let f = x => x; new f();", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Type(_)));
}

#[test]
fn prototype_constructor_points_back() {
  let value = eval("class A {} A.prototype.constructor === A;");
  assert_eq!(value, Value::Bool(true));
}

#[test]
fn function_prototype_chain_supports_new() {
  let value = eval(
    r#"
      function C() { this.x = 1; }
      C.prototype.y = 2;
      var o = new C();
      o.x + o.y;
    "#,
  );
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn constructor_returning_an_object_overrides_the_instance() {
  let value = eval("function C() { return { marker: 7 }; } new C().marker;");
  assert_eq!(value, Value::Number(7.0));

  let value = eval("function C() { return 5; this.x = 1; } new C() instanceof C;");
  assert_eq!(value, Value::Bool(true));
}
