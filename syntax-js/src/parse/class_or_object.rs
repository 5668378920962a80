use super::Parser;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::num::JsNumber;
use crate::parse::expr::decode_string_text;
use crate::parse::expr::Asi;
use crate::token::is_valid_binding_identifier;
use crate::token::is_valid_member_name;
use crate::token::TT;

/// Tokens that, after an identifier-ish token, mean the identifier was a key or shorthand rather
/// than a `get`/`set`/`async`/`static` modifier.
fn ends_key(typ: TT) -> bool {
  matches!(
    typ,
    TT::Colon
      | TT::Comma
      | TT::ParenthesisOpen
      | TT::BraceClose
      | TT::Equals
      | TT::Semicolon
      | TT::EOF
  )
}

impl<'a> Parser<'a> {
  pub fn class_expr(&mut self) -> SyntaxResult<Node<ClassExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordClass)?;
      let name = p.maybe_class_or_func_name();
      let extends = p
        .consume_if(TT::KeywordExtends)
        .and_then(|| p.expr([TT::BraceOpen]))?;
      let members = p.class_body()?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })
  }

  pub fn class_body(&mut self) -> SyntaxResult<Vec<Node<ClassMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      };
      if self.peek().typ == TT::BraceClose {
        break;
      };
      members.push(self.class_member()?);
    }
    self.require(TT::BraceClose)?;
    Ok(members)
  }

  fn class_member(&mut self) -> SyntaxResult<Node<ClassMember>> {
    self.with_loc(|p| {
      let [t0, t1] = p.peek_n::<2>();
      let static_ = t0.typ == TT::KeywordStatic && !ends_key(t1.typ);
      if static_ {
        p.consume();
      };

      if let Some((key, val)) = p.maybe_accessor_member()? {
        return Ok(ClassMember { key, static_, val });
      }

      let [t0, t1] = p.peek_n::<2>();
      let is_async = t0.typ == TT::KeywordAsync && !ends_key(t1.typ);
      if is_async {
        p.consume();
      };
      let generator = p.consume_if(TT::Asterisk).is_match();

      let key = p.class_or_obj_key()?;
      if p.peek().typ == TT::ParenthesisOpen {
        let func = p.func_signature_and_block_body(is_async, generator)?;
        let loc = func.loc;
        return Ok(ClassMember {
          key,
          static_,
          val: ClassOrObjVal::Method(Node::new(loc, ClassOrObjMethod { func })),
        });
      };

      // Class field, with or without initializer.
      let value = p
        .consume_if(TT::Equals)
        .and_then(|| p.expr_with_asi([TT::Semicolon, TT::BraceClose], &mut Asi::can()))?;
      if p.peek().typ == TT::Semicolon {
        p.consume();
      };
      Ok(ClassMember {
        key,
        static_,
        val: ClassOrObjVal::Prop(value),
      })
    })
  }

  /// Parses `get key() { ... }` / `set key(v) { ... }` if present.
  fn maybe_accessor_member(&mut self) -> SyntaxResult<Option<(ClassOrObjKey, ClassOrObjVal)>> {
    let [t0, t1] = self.peek_n::<2>();
    let is_get = t0.typ == TT::KeywordGet;
    let is_set = t0.typ == TT::KeywordSet;
    if (!is_get && !is_set) || ends_key(t1.typ) {
      return Ok(None);
    };
    self.consume();
    let key = self.class_or_obj_key()?;
    let func = self.func_signature_and_block_body(false, false)?;
    let loc = func.loc;
    let val = if is_get {
      ClassOrObjVal::Getter(Node::new(loc, ClassOrObjGetter { func }))
    } else {
      ClassOrObjVal::Setter(Node::new(loc, ClassOrObjSetter { func }))
    };
    Ok(Some((key, val)))
  }

  pub fn class_or_obj_key(&mut self) -> SyntaxResult<ClassOrObjKey> {
    if self.consume_if(TT::BracketOpen).is_match() {
      let expr = self.expr([TT::BracketClose])?;
      self.require(TT::BracketClose)?;
      return Ok(ClassOrObjKey::Computed(expr));
    };
    let t = self.consume();
    let key = match t.typ {
      TT::LiteralString => {
        let raw = self.str(t.loc);
        decode_string_text(&raw[1..raw.len() - 1]).map_err(|typ| t.error(typ))?
      }
      TT::LiteralNumber => {
        let value = JsNumber::from_literal(self.str(t.loc))
          .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
        value.to_string()
      }
      typ if is_valid_member_name(typ) => self.string(t.loc),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("property key"))),
    };
    Ok(ClassOrObjKey::Direct(Node::new(
      t.loc,
      ClassOrObjMemberDirectKey { key },
    )))
  }

  pub fn lit_obj(&mut self) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      while p.peek().typ != TT::BraceClose {
        let member = p.with_loc(|p| {
          if p.consume_if(TT::DotDotDot).is_match() {
            return Ok(ObjMember {
              typ: ObjMemberType::Rest {
                val: p.expr([TT::Comma, TT::BraceClose])?,
              },
            });
          };

          if let Some((key, val)) = p.maybe_accessor_member()? {
            return Ok(ObjMember {
              typ: ObjMemberType::Valued { key, val },
            });
          };

          let [t0, t1] = p.peek_n::<2>();
          let is_async = t0.typ == TT::KeywordAsync && !ends_key(t1.typ);
          if is_async {
            p.consume();
          };
          let generator = p.consume_if(TT::Asterisk).is_match();

          // Shorthand property.
          let [t0, t1] = p.peek_n::<2>();
          if !is_async
            && !generator
            && is_valid_binding_identifier(t0.typ)
            && matches!(t1.typ, TT::Comma | TT::BraceClose)
          {
            p.consume();
            return Ok(ObjMember {
              typ: ObjMemberType::Shorthand {
                id: Node::new(t0.loc, IdExpr {
                  name: p.string(t0.loc),
                }),
              },
            });
          };

          let key = p.class_or_obj_key()?;
          if p.peek().typ == TT::ParenthesisOpen {
            let func = p.func_signature_and_block_body(is_async, generator)?;
            let loc = func.loc;
            return Ok(ObjMember {
              typ: ObjMemberType::Valued {
                key,
                val: ClassOrObjVal::Method(Node::new(loc, ClassOrObjMethod { func })),
              },
            });
          };
          p.require(TT::Colon)?;
          let value = p.expr([TT::Comma, TT::BraceClose])?;
          Ok(ObjMember {
            typ: ObjMemberType::Valued {
              key,
              val: ClassOrObjVal::Prop(Some(value)),
            },
          })
        })?;
        members.push(member);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })
  }
}
