use scope_js::compute_symbols;
use scope_js::resolved_symbol;
use scope_js::symbol::Symbol;
use syntax_js::ast::expr::Expr;
use syntax_js::ast::node::Node;
use syntax_js::ast::stmt::Stmt;
use syntax_js::ast::stx::TopLevel;
use syntax_js::parse;

fn analysed(source: &str) -> Node<TopLevel> {
  let mut top = parse(source).unwrap();
  compute_symbols(&mut top);
  top
}

fn stmt_expr<'a>(top: &'a Node<TopLevel>, i: usize) -> &'a Node<Expr> {
  match &*top.stx.body[i].stx {
    Stmt::Expr(stmt) => &stmt.stx.expr,
    other => panic!("expected expression statement, got {other:?}"),
  }
}

fn id_symbol(expr: &Node<Expr>) -> Option<Symbol> {
  match &*expr.stx {
    Expr::Id(id) => resolved_symbol(&id.assoc),
    other => panic!("expected identifier, got {other:?}"),
  }
}

#[test]
fn same_binding_resolves_to_same_symbol() {
  let top = analysed("let a = 1; a; a;");
  let first = id_symbol(stmt_expr(&top, 1)).unwrap();
  let second = id_symbol(stmt_expr(&top, 2)).unwrap();
  assert_eq!(first, second);
}

#[test]
fn block_shadowing_creates_a_distinct_symbol() {
  let top = analysed("let a = 1; { let a = 2; a; } a;");
  let Stmt::Block(block) = &*top.stx.body[1].stx else {
    panic!("expected block");
  };
  let Stmt::Expr(inner) = &*block.stx.body[1].stx else {
    panic!("expected expression statement");
  };
  let inner = id_symbol(&inner.stx.expr).unwrap();
  let outer = id_symbol(stmt_expr(&top, 2)).unwrap();
  assert_ne!(inner, outer);
}

#[test]
fn var_hoists_out_of_blocks() {
  let top = analysed("{ var a = 1; } a;");
  let outer = id_symbol(stmt_expr(&top, 1));
  assert!(outer.is_some());
}

#[test]
fn closures_capture_outer_bindings() {
  let top = analysed("let x = 1; let f = () => x;");
  let Stmt::VarDecl(outer_decl) = &*top.stx.body[0].stx else {
    panic!("expected var decl");
  };
  let syntax_js::ast::expr::pat::Pat::Id(outer_pat) =
    &*outer_decl.stx.declarators[0].pattern.stx.pat.stx
  else {
    panic!("expected identifier pattern");
  };
  let declared = resolved_symbol(&outer_pat.assoc).unwrap();

  let Stmt::VarDecl(f_decl) = &*top.stx.body[1].stx else {
    panic!("expected var decl");
  };
  let init = f_decl.stx.declarators[0].initializer.as_ref().unwrap();
  let Expr::ArrowFunc(arrow) = &*init.stx else {
    panic!("expected arrow function");
  };
  let syntax_js::ast::func::FuncBody::Expression(body) = &arrow.stx.func.stx.body else {
    panic!("expected expression body");
  };
  assert_eq!(id_symbol(body).unwrap(), declared);
}

#[test]
fn function_parameters_shadow_outer_names() {
  let top = analysed("let a = 1; function f(a) { return a; } a;");
  let Stmt::FunctionDecl(decl) = &*top.stx.body[1].stx else {
    panic!("expected function decl");
  };
  let syntax_js::ast::func::FuncBody::Block(body) = &decl.stx.function.stx.body else {
    panic!("expected block body");
  };
  let Stmt::Return(ret) = &*body[0].stx else {
    panic!("expected return");
  };
  let param_use = id_symbol(ret.stx.value.as_ref().unwrap()).unwrap();
  let outer_use = id_symbol(stmt_expr(&top, 2)).unwrap();
  assert_ne!(param_use, outer_use);
}

#[test]
fn free_names_stay_unresolved() {
  let top = analysed("console;");
  assert!(id_symbol(stmt_expr(&top, 0)).is_none());
}

#[test]
fn function_declarations_resolve_forward() {
  let top = analysed("f; function f() {}");
  assert!(id_symbol(stmt_expr(&top, 0)).is_some());
}

#[test]
fn catch_parameter_scopes_to_the_catch_body() {
  let top = analysed("try { x; } catch (e) { e; }");
  let Stmt::Try(try_stmt) = &*top.stx.body[0].stx else {
    panic!("expected try");
  };
  let catch = try_stmt.stx.catch.as_ref().unwrap();
  let Stmt::Expr(use_stmt) = &*catch.stx.body[0].stx else {
    panic!("expected expression statement");
  };
  assert!(id_symbol(&use_stmt.stx.expr).is_some());
}
