use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek().typ != TT::EOF {
      body.push(self.stmt()?);
    }
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }
}
