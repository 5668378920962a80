use super::Parser;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::is_valid_binding_identifier;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    self.with_loc(|p| Ok(PatDecl { pat: p.pat()? }))
  }

  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    match self.peek().typ {
      TT::BracketOpen => Ok(self.arr_pat()?.into_wrapped()),
      TT::BraceOpen => Ok(self.obj_pat()?.into_wrapped()),
      _ => Ok(self.id_pat()?.into_wrapped()),
    }
  }

  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    let t = self.consume();
    if !is_valid_binding_identifier(t.typ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    Ok(Node::new(t.loc, IdPat {
      name: self.string(t.loc),
    }))
  }

  fn arr_pat(&mut self) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat()?);
          break;
        };
        let target = p.pat()?;
        let default_value = p
          .consume_if(TT::Equals)
          .and_then(|| p.expr([TT::Comma, TT::BracketClose]))?;
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }

  fn obj_pat(&mut self) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BraceClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          break;
        };
        let prop = p.with_loc(|p| {
          let key = p.class_or_obj_key()?;
          let (target, shorthand) = if p.consume_if(TT::Colon).is_match() {
            (p.pat()?, false)
          } else {
            // Shorthand; rebuild the target from the direct key so there is always an IdPat.
            let name = match &key {
              crate::ast::class_or_object::ClassOrObjKey::Direct(key) => key.stx.key.clone(),
              _ => return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("pattern"))),
            };
            let pat: Node<Pat> = Node::new(p.peek().loc, IdPat { name }).into_wrapped();
            (pat, true)
          };
          let default_value = p
            .consume_if(TT::Equals)
            .and_then(|| p.expr([TT::Comma, TT::BraceClose]))?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand,
            default_value,
          })
        })?;
        properties.push(prop);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties, rest })
    })
  }
}
