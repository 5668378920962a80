use super::Parser;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn func_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    let mut parameters = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let param = self.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl()?;
        let default_value = p
          .consume_if(TT::Equals)
          .and_then(|| p.expr([TT::Comma, TT::ParenthesisClose]))?;
        Ok(ParamDecl {
          rest,
          pattern,
          default_value,
        })
      })?;
      parameters.push(param);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    self.require(TT::ParenthesisClose)?;
    Ok(parameters)
  }

  pub fn parse_func_block_body(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let mut body = Vec::new();
    while self.peek().typ != TT::BraceClose {
      body.push(self.stmt()?);
    }
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  /// Parses `(params) { body }` for non-arrow functions and methods.
  pub fn func_signature_and_block_body(
    &mut self,
    is_async: bool,
    generator: bool,
  ) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = p.func_params()?;
      let body = p.parse_func_block_body()?.into();
      Ok(Func {
        arrow: false,
        async_: is_async,
        generator,
        parameters,
        body,
      })
    })
  }
}
