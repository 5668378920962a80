use interpret_js::globals::alloc_native;
use interpret_js::run_script;
use interpret_js::EvalError;
use interpret_js::Interpreter;
use interpret_js::InterpreterOptions;
use interpret_js::JsString;
use interpret_js::ObjectKind;
use interpret_js::PropertyDescriptor;
use interpret_js::Value;

fn eval(source: &str) -> Value {
  run_script(source, InterpreterOptions::default())
    .unwrap_or_else(|err| panic!("{source:?} failed: {err:?}"))
}

#[test]
fn unresolved_identifier_is_a_reference_error() {
  let err = run_script("missing;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Reference(name) if name == "missing"));
}

#[test]
fn typeof_an_undeclared_identifier_is_undefined() {
  assert_eq!(eval("typeof missing;"), Value::string("undefined"));
}

#[test]
fn reference_errors_are_not_catchable() {
  // Only program-thrown exceptions recover at try/catch; evaluator errors flow out.
  let err = run_script(
    "try { missing; } catch (e) { 'caught' }",
    InterpreterOptions::default(),
  )
  .unwrap_err();
  assert!(matches!(err, EvalError::Reference(_)));
}

#[test]
fn calling_a_non_function_is_a_type_error() {
  let err = run_script("let x = 5; x();", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Type(_)));
}

#[test]
fn reading_through_nullish_is_a_type_error() {
  let err = run_script("let x = null; x.y;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Type(_)));
}

#[test]
fn optional_chaining_short_circuits_instead() {
  assert_eq!(eval("let x = null; x?.y;"), Value::Undefined);
  assert_eq!(eval("let x = null; x?.[0];"), Value::Undefined);
  assert_eq!(eval("let f = null; f?.();"), Value::Undefined);
  assert_eq!(eval("let o = { a: { b: 1 } }; o?.a?.b;"), Value::Number(1.0));
}

#[test]
fn unsupported_constructs_error_by_default() {
  let err = run_script("label: 1;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Unsupported(_)));

  let err = run_script("with ({}) {}", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Unsupported(_)));

  let err = run_script("let [a] = [1];", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Unsupported(_)));

  let err = run_script(
    "async function f() {} f();",
    InterpreterOptions::default(),
  )
  .unwrap_err();
  assert!(matches!(err, EvalError::Unsupported(_)));
}

#[test]
fn skip_unsupported_evaluates_them_to_undefined() {
  let options = InterpreterOptions {
    skip_unsupported: true,
  };
  let value = run_script("label: 1; 'after';", options).unwrap();
  assert_eq!(value, Value::string("after"));

  let value = run_script("let [a] = [1]; 'after';", options).unwrap();
  assert_eq!(value, Value::string("after"));
}

#[test]
fn parse_errors_surface_as_syntax_errors() {
  let err = run_script("let 1 = 2;", InterpreterOptions::default()).unwrap_err();
  assert!(matches!(err, EvalError::Syntax(_)));
}

#[test]
fn side_effects_on_ambient_objects_are_observable() {
  let mut top = syntax_js::parse("host.counter = host.counter + 1; host.tag = 'touched';").unwrap();
  scope_js::compute_symbols(&mut top);
  let mut interp = Interpreter::new(&top, InterpreterOptions::default());

  let host = interp.heap_mut().alloc(ObjectKind::Ordinary);
  interp.heap_mut().define_property(
    host,
    JsString::from("counter"),
    PropertyDescriptor::data(Value::Number(1.0)),
  );
  interp.define_global("host", Value::Object(host));

  interp.run().unwrap();

  let host_value = Value::Object(host);
  assert_eq!(
    interp.get_property(&host_value, "counter").unwrap(),
    Value::Number(2.0)
  );
  assert_eq!(
    interp.get_property(&host_value, "tag").unwrap(),
    Value::string("touched")
  );
}

#[test]
fn host_callables_receive_receiver_and_arguments() {
  fn sum<'t>(
    _interp: &mut Interpreter<'t>,
    _this: Value,
    args: &[Value],
  ) -> Result<Value, EvalError> {
    let mut total = 0.0;
    for value in args {
      let Value::Number(n) = value else {
        return Err(EvalError::Type("sum expects numbers".to_string()));
      };
      total += n;
    }
    Ok(Value::Number(total))
  }

  let mut top = syntax_js::parse("sum(1, 2, 3) + sum(...[4, 5]);").unwrap();
  scope_js::compute_symbols(&mut top);
  let mut interp = Interpreter::new(&top, InterpreterOptions::default());
  let sum_fn = alloc_native(&mut interp, "sum", sum);
  interp.define_global("sum", Value::Object(sum_fn));

  assert_eq!(interp.run().unwrap(), Value::Number(15.0));
}

#[test]
fn assignment_to_an_undeclared_name_creates_an_ambient_binding() {
  let value = eval("function f() { leaked = 3; } f(); leaked;");
  assert_eq!(value, Value::Number(3.0));
}

#[test]
fn default_globals_are_available() {
  assert_eq!(eval("Math.max(1, 9, 4);"), Value::Number(9.0));
  assert_eq!(eval("Math.floor(2.9);"), Value::Number(2.0));
  assert_eq!(eval("parseInt('0x10');"), Value::Number(16.0));
  assert_eq!(eval("parseInt('42px');"), Value::Number(42.0));
  assert_eq!(eval("parseFloat('2.5rem');"), Value::Number(2.5));
  assert_eq!(eval("isNaN('abc');"), Value::Bool(true));
  assert_eq!(eval("Number('12');"), Value::Number(12.0));
  assert_eq!(eval("String(12);"), Value::string("12"));
  assert_eq!(eval("Boolean('');"), Value::Bool(false));
  assert_eq!(eval("Array.isArray([]);"), Value::Bool(true));
  assert_eq!(eval("Object.keys({ a: 1, b: 2 }).length;"), Value::Number(2.0));
  assert_eq!(eval("typeof console.log;"), Value::string("function"));
}
