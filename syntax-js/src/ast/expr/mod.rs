pub mod lit;
pub mod pat;

use derive_more::derive::From;
use lit::LitArrExpr;
use lit::LitBoolExpr;
use lit::LitNullExpr;
use lit::LitNumExpr;
use lit::LitObjExpr;
use lit::LitRegexExpr;
use lit::LitStrExpr;
use lit::LitTemplateExpr;
use pat::ArrPat;
use pat::ClassOrFuncName;
use pat::IdPat;
use pat::ObjPat;
use serde::Serialize;

use crate::operator::OperatorName;

use super::class_or_object::ClassMember;
use super::func::Func;
use super::node::Node;

// Each variant wraps Node<T> so a node (with its loc and assoc data) survives being moved into
// the enum.
#[derive(Debug, From, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  Super(Node<SuperExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),

  // Patterns. These show up in expression position as assignment targets.
  ArrPat(Node<ArrPat>),
  IdPat(Node<IdPat>),
  ObjPat(Node<ObjPat>),
}

#[derive(Debug, Serialize)]
pub struct CallArg {
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct BinaryExpr {
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct CallExpr {
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct ComputedMemberExpr {
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Serialize)]
pub struct IdExpr {
  pub name: String,
}

// Dedicated type (rather than IdExpr as `right`) since a static member name is not a variable
// usage.
#[derive(Debug, Serialize)]
pub struct MemberExpr {
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  pub right: String,
}

#[derive(Debug, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Serialize)]
pub struct UnaryExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Serialize)]
pub struct UnaryPostfixExpr {
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}
