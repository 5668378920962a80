use syntax_js::ast::expr::lit::LitArrElem;
use syntax_js::ast::expr::lit::LitTemplatePart;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::stmt::decl::VarDeclMode;
use syntax_js::ast::stmt::ForInOfLhs;
use syntax_js::ast::stmt::ForTripleStmtInit;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::ast::node::Node;
use syntax_js::operator::OperatorName;
use syntax_js::parse;

fn parse_ok(source: &str) -> Node<TopLevel> {
  parse(source).unwrap_or_else(|err| panic!("{source:?} failed to parse: {err}"))
}

fn first_expr(top: &Node<TopLevel>) -> &Node<Expr> {
  match &*top.stx.body[0].stx {
    Stmt::Expr(stmt) => &stmt.stx.expr,
    other => panic!("expected expression statement, got {other:?}"),
  }
}

#[test]
fn binary_operator_precedence() {
  let top = parse_ok("1 + 2 * 3;");
  let Expr::Binary(add) = &*first_expr(&top).stx else {
    panic!("expected binary expression");
  };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = &*add.stx.right.stx else {
    panic!("expected nested multiplication");
  };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);
}

#[test]
fn assignment_is_right_associative() {
  let top = parse_ok("a = b = 1;");
  let Expr::Binary(outer) = &*first_expr(&top).stx else {
    panic!("expected assignment");
  };
  assert_eq!(outer.stx.operator, OperatorName::Assignment);
  let Expr::Binary(inner) = &*outer.stx.right.stx else {
    panic!("expected nested assignment");
  };
  assert_eq!(inner.stx.operator, OperatorName::Assignment);
}

#[test]
fn member_and_call_chain() {
  let top = parse_ok("a.b.c(1, ...rest);");
  let Expr::Call(call) = &*first_expr(&top).stx else {
    panic!("expected call");
  };
  assert_eq!(call.stx.arguments.len(), 2);
  assert!(!call.stx.arguments[0].stx.spread);
  assert!(call.stx.arguments[1].stx.spread);
  let Expr::Member(member) = &*call.stx.callee.stx else {
    panic!("expected member callee");
  };
  assert_eq!(member.stx.right, "c");
}

#[test]
fn var_decl_modes_and_declarators() {
  let top = parse_ok("let a = 1, b;");
  let Stmt::VarDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected var decl");
  };
  assert_eq!(decl.stx.mode, VarDeclMode::Let);
  assert_eq!(decl.stx.declarators.len(), 2);
  assert!(decl.stx.declarators[0].initializer.is_some());
  assert!(decl.stx.declarators[1].initializer.is_none());
}

#[test]
fn array_literal_with_holes_and_spread() {
  let top = parse_ok("[1, , 2, ...xs];");
  let Expr::LitArr(arr) = &*first_expr(&top).stx else {
    panic!("expected array literal");
  };
  assert_eq!(arr.stx.elements.len(), 4);
  assert!(matches!(arr.stx.elements[0], LitArrElem::Single(_)));
  assert!(matches!(arr.stx.elements[1], LitArrElem::Empty));
  assert!(matches!(arr.stx.elements[3], LitArrElem::Rest(_)));
}

#[test]
fn object_literal_member_forms() {
  use syntax_js::ast::class_or_object::{ClassOrObjVal, ObjMemberType};
  let top = parse_ok("({ a: 1, b, c() {}, get d() {}, set d(v) {}, [e]: 2 });");
  let Expr::LitObj(obj) = &*first_expr(&top).stx else {
    panic!("expected object literal");
  };
  let members = &obj.stx.members;
  assert_eq!(members.len(), 6);
  assert!(matches!(&members[1].stx.typ, ObjMemberType::Shorthand { .. }));
  let ObjMemberType::Valued { val, .. } = &members[2].stx.typ else {
    panic!("expected valued member");
  };
  assert!(matches!(val, ClassOrObjVal::Method(_)));
  let ObjMemberType::Valued { val, .. } = &members[3].stx.typ else {
    panic!("expected valued member");
  };
  assert!(matches!(val, ClassOrObjVal::Getter(_)));
  let ObjMemberType::Valued { key, .. } = &members[5].stx.typ else {
    panic!("expected valued member");
  };
  assert!(matches!(
    key,
    syntax_js::ast::class_or_object::ClassOrObjKey::Computed(_)
  ));
}

#[test]
fn arrow_function_forms() {
  let top = parse_ok("let f = (a, b) => a + b;");
  let Stmt::VarDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected var decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::ArrowFunc(arrow) = &*init.stx else {
    panic!("expected arrow function");
  };
  assert_eq!(arrow.stx.func.stx.parameters.len(), 2);

  let top = parse_ok("let g = x => x;");
  let Stmt::VarDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected var decl");
  };
  let init = decl.stx.declarators[0].initializer.as_ref().unwrap();
  assert!(matches!(&*init.stx, Expr::ArrowFunc(_)));
}

#[test]
fn grouping_is_not_an_arrow_function() {
  let top = parse_ok("(a + b);");
  assert!(matches!(&*first_expr(&top).stx, Expr::Binary(_)));
}

#[test]
fn template_literal_parts() {
  let top = parse_ok("`a${b}c`;");
  let Expr::LitTemplate(template) = &*first_expr(&top).stx else {
    panic!("expected template literal");
  };
  let parts = &template.stx.parts;
  assert_eq!(parts.len(), 3);
  assert!(matches!(&parts[0], LitTemplatePart::String(s) if s == "a"));
  assert!(matches!(&parts[1], LitTemplatePart::Substitution(_)));
  assert!(matches!(&parts[2], LitTemplatePart::String(s) if s == "c"));
}

#[test]
fn regex_literal_in_operand_position() {
  let top = parse_ok("x = /ab+c/gi;");
  let Expr::Binary(assign) = &*first_expr(&top).stx else {
    panic!("expected assignment");
  };
  let Expr::LitRegex(regex) = &*assign.stx.right.stx else {
    panic!("expected regex literal");
  };
  assert_eq!(regex.stx.pattern, "ab+c");
  assert_eq!(regex.stx.flags, "gi");
}

#[test]
fn slash_after_operand_is_division() {
  let top = parse_ok("a / b;");
  let Expr::Binary(div) = &*first_expr(&top).stx else {
    panic!("expected division");
  };
  assert_eq!(div.stx.operator, OperatorName::Division);
}

#[test]
fn for_statement_forms() {
  let top = parse_ok("for (let i = 0; i < 3; i++) {} for (let k in o) {} for (let v of xs) {}");
  let Stmt::ForTriple(triple) = &*top.stx.body[0].stx else {
    panic!("expected for-triple");
  };
  assert!(matches!(triple.stx.init, ForTripleStmtInit::Decl(_)));
  assert!(triple.stx.cond.is_some());
  assert!(triple.stx.post.is_some());
  let Stmt::ForIn(for_in) = &*top.stx.body[1].stx else {
    panic!("expected for-in");
  };
  assert!(matches!(for_in.stx.lhs, ForInOfLhs::Decl(_)));
  assert!(matches!(&*top.stx.body[2].stx, Stmt::ForOf(_)));
}

#[test]
fn automatic_semicolon_insertion() {
  let top = parse_ok("let a = 1\nlet b = 2\na + b");
  assert_eq!(top.stx.body.len(), 3);

  // Restricted production: `return` with a line terminator returns undefined.
  let top = parse_ok("function f() { return\n2; }");
  let Stmt::FunctionDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected function decl");
  };
  let syntax_js::ast::func::FuncBody::Block(body) = &decl.stx.function.stx.body else {
    panic!("expected block body");
  };
  let Stmt::Return(ret) = &*body[0].stx else {
    panic!("expected return statement");
  };
  assert!(ret.stx.value.is_none());
}

#[test]
fn string_escapes_decode() {
  let top = parse_ok(r#"'a\nb\t\x41B\u{1F600}';"#);
  let Expr::LitStr(s) = &*first_expr(&top).stx else {
    panic!("expected string literal");
  };
  assert_eq!(s.stx.value, "a\nb\tAB\u{1F600}");
}

#[test]
fn keywords_as_member_names() {
  let top = parse_ok("a.delete;");
  let Expr::Member(member) = &*first_expr(&top).stx else {
    panic!("expected member access");
  };
  assert_eq!(member.stx.right, "delete");
}

#[test]
fn class_declaration_members() {
  use syntax_js::ast::class_or_object::ClassOrObjVal;
  let top = parse_ok("class A extends B { constructor(x) {} m() {} static s() {} }");
  let Stmt::ClassDecl(decl) = &*top.stx.body[0].stx else {
    panic!("expected class decl");
  };
  assert_eq!(decl.stx.name.stx.name, "A");
  assert!(decl.stx.extends.is_some());
  assert_eq!(decl.stx.members.len(), 3);
  assert!(decl.stx.members.iter().all(|m| matches!(m.stx.val, ClassOrObjVal::Method(_))));
  assert!(decl.stx.members[2].stx.static_);
}

#[test]
fn syntax_errors() {
  assert!(parse("let 1 = 2;").is_err());
  assert!(parse("a +;").is_err());
  assert!(parse("try {}").is_err());
  assert!(parse("throw\n1;").is_err());
  assert!(parse("1 = 2;").is_err());
}

#[test]
fn serializes_to_tagged_json() {
  let top = parse_ok("a + 1;");
  let json = serde_json::to_value(&top.stx.body[0]).unwrap();
  assert_eq!(json["$t"], "Expr");
  assert_eq!(json["expr"]["$t"], "Binary");
}
