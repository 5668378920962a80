use super::expr::Expr;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;
use derive_more::derive::From;
use serde::Serialize;

// This common type exists for better downstream usage, as one type is easier to match on and
// wrangle than many different types (ArrowFuncExpr, ClassOrObjMethod, FuncDecl, etc.).
#[derive(Debug, Serialize)]
pub struct Func {
  pub arrow: bool,
  pub async_: bool,
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}

// A function body is different from a block statement, as the scopes are different: the function
// scope starts at the parameters, not the braces.
#[derive(Debug, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}
