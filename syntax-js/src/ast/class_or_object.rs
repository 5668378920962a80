use derive_more::derive::From;
use serde::Serialize;

use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;

/// This is a node as the key may not be the same as source[node.loc], due to
/// decoding/normalization (string and number keys).
#[derive(Debug, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  pub key: String,
}

// WARNING: This enum must exist, and the two variants cannot be merged by representing Direct
// with an IdExpr, as a direct key is not a usage of a variable.
#[derive(Debug, Serialize)]
pub enum ClassOrObjKey {
  // Identifier, keyword, string, or number.
  // NOTE: This isn't used by ObjMemberType::Shorthand.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>, // `parameters` is empty.
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>, // `parameters` contains exactly one ParamDecl with no default or rest.
}

#[derive(Debug, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Debug, From, Serialize)]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Setter(Node<ClassOrObjSetter>),
  Method(Node<ClassOrObjMethod>),
  // Must be Some if object, as shorthands are covered by ObjMemberType::Shorthand.
  Prop(Option<Node<Expr>>),
}

#[derive(Debug, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  Shorthand {
    id: Node<IdExpr>,
  },
  Rest {
    val: Node<Expr>,
  },
}

#[derive(Debug, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  pub static_: bool,
  pub val: ClassOrObjVal,
}

#[derive(Debug, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
