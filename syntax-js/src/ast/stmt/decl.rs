use serde::Serialize;

use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;

#[derive(Debug, Serialize)]
pub struct ClassDecl {
  pub name: Node<ClassOrFuncName>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Serialize)]
pub struct FuncDecl {
  pub name: Node<ClassOrFuncName>,
  pub function: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct ParamDecl {
  pub rest: bool,
  pub pattern: Node<PatDecl>,
  pub default_value: Option<Node<Expr>>,
}

// A unified type for patterns in declaration position (function params, var/let/const, catch
// binding). This contains only the pattern; initializers live beside it, as they themselves could
// contain patterns (e.g. assignment), defeating the purpose.
#[derive(Debug, Serialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

#[derive(Debug, Serialize)]
pub struct VarDecl {
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}
