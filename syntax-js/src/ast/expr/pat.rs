use derive_more::derive::From;
use serde::Serialize;

use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::node::Node;

use super::Expr;

// Each variant wraps Node<T> so a pattern node (with its loc and assoc data) survives being
// moved into the enum.
#[derive(Debug, From, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

impl From<Pat> for Expr {
  fn from(value: Pat) -> Self {
    match value {
      Pat::Arr(arr) => Expr::ArrPat(arr),
      Pat::Id(id) => Expr::IdPat(id),
      Pat::Obj(obj) => Expr::ObjPat(obj),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Serialize)]
pub struct ArrPat {
  // Unnamed elements can exist (`[, a]`).
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

// Not really a pattern but functions similarly so kept here in pat.rs. A separate type as a
// function/class name binds in a different scope than the parameters.
#[derive(Debug, Serialize)]
pub struct ClassOrFuncName {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct IdPat {
  pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // If `shorthand`, `key` is Direct and `target` is an IdPat of the same name.
  pub target: Node<Pat>,
  pub shorthand: bool,
  pub default_value: Option<Node<Expr>>,
}
