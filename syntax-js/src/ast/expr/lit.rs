use serde::Serialize;

use crate::ast::class_or_object::ObjMember;
use crate::ast::node::Node;
use crate::num::JsNumber;

use super::Expr;

#[derive(Debug, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  // An elision (`[1, , 3]`); evaluates to a hole slot.
  Empty,
}

#[derive(Debug, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Serialize)]
pub struct LitBoolExpr {
  pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Serialize)]
pub struct LitNumExpr {
  pub value: JsNumber,
}

#[derive(Debug, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Serialize)]
pub struct LitRegexExpr {
  pub pattern: String,
  // Flag characters exactly as written (validated by the lexer to be identifier characters).
  pub flags: String,
}

#[derive(Debug, Serialize)]
pub struct LitStrExpr {
  pub value: String,
}

#[derive(Debug, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Serialize)]
pub enum LitTemplatePart {
  Substitution(Node<Expr>),
  String(String),
}
