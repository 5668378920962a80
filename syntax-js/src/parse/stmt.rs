use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForBody;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::expr::Asi;
use crate::token::is_valid_binding_identifier;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1] = self.peek_n::<2>();
    match t0.typ {
      TT::BraceOpen => Ok(self.block_stmt()?.into_wrapped()),
      TT::KeywordVar | TT::KeywordConst => self.var_decl_stmt(),
      TT::KeywordLet
        if matches!(t1.typ, TT::BracketOpen | TT::BraceOpen)
          || is_valid_binding_identifier(t1.typ) =>
      {
        self.var_decl_stmt()
      }
      TT::KeywordFunction => self.func_decl(),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction => self.func_decl(),
      TT::KeywordClass => self.class_decl(),
      TT::KeywordBreak => self.break_stmt(),
      TT::KeywordContinue => self.continue_stmt(),
      TT::KeywordDebugger => {
        let t = self.consume();
        self.require_semicolon()?;
        Ok(Node::new(t.loc, DebuggerStmt {}).into_wrapped())
      }
      TT::KeywordDo => self.do_while_stmt(),
      TT::KeywordFor => self.for_stmt(),
      TT::KeywordIf => self.if_stmt(),
      TT::KeywordReturn => self.return_stmt(),
      TT::KeywordSwitch => self.switch_stmt(),
      TT::KeywordThrow => self.throw_stmt(),
      TT::KeywordTry => self.try_stmt(),
      TT::KeywordWhile => self.while_stmt(),
      TT::KeywordWith => self.with_stmt(),
      TT::Semicolon => {
        let t = self.consume();
        Ok(Node::new(t.loc, EmptyStmt {}).into_wrapped())
      }
      _ if is_valid_binding_identifier(t0.typ) && t1.typ == TT::Colon => self.label_stmt(),
      _ => self.expr_stmt(),
    }
  }

  /// Consumes `;`, or accepts an Automatic Semicolon Insertion position (`}`, end of input, or a
  /// preceding line terminator).
  pub fn require_semicolon(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    if t.typ == TT::Semicolon {
      self.consume();
      return Ok(());
    };
    if t.typ == TT::BraceClose || t.typ == TT::EOF || t.preceded_by_line_terminator {
      return Ok(());
    };
    Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
  }

  pub fn block_stmt(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut body = Vec::new();
      while p.peek().typ != TT::BraceClose {
        body.push(p.stmt()?);
      }
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  fn expr_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          let expr = p.expr_with_asi([TT::Semicolon], &mut Asi::can())?;
          p.require_semicolon()?;
          Ok(ExprStmt { expr })
        })?
        .into_wrapped(),
    )
  }

  /// Parses the `var`/`let`/`const` keyword and declarators, but not the statement terminator
  /// (the `for` header reuses this).
  pub fn var_decl(&mut self) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let t = p.consume();
      let mode = match t.typ {
        TT::KeywordVar => VarDeclMode::Var,
        TT::KeywordLet => VarDeclMode::Let,
        TT::KeywordConst => VarDeclMode::Const,
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
      };
      let mut declarators = Vec::new();
      loop {
        let pattern = p.pat_decl()?;
        let initializer = p
          .consume_if(TT::Equals)
          .and_then(|| p.expr_with_asi([TT::Semicolon, TT::Comma], &mut Asi::can()))?;
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      Ok(VarDecl { mode, declarators })
    })
  }

  fn var_decl_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let decl = self.var_decl()?;
    self.require_semicolon()?;
    Ok(decl.into_wrapped())
  }

  fn func_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          let is_async = p.consume_if(TT::KeywordAsync).is_match();
          p.require(TT::KeywordFunction)?;
          let generator = p.consume_if(TT::Asterisk).is_match();
          let name = p.class_or_func_name()?;
          let function = p.func_signature_and_block_body(is_async, generator)?;
          Ok(FuncDecl { name, function })
        })?
        .into_wrapped(),
    )
  }

  fn class_decl(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordClass)?;
          let name = p.class_or_func_name()?;
          let extends = p
            .consume_if(TT::KeywordExtends)
            .and_then(|| p.expr([TT::BraceOpen]))?;
          let members = p.class_body()?;
          Ok(ClassDecl {
            name,
            extends,
            members,
          })
        })?
        .into_wrapped(),
    )
  }

  fn if_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordIf)?;
          p.require(TT::ParenthesisOpen)?;
          let test = p.expr([TT::ParenthesisClose])?;
          p.require(TT::ParenthesisClose)?;
          let consequent = p.stmt()?;
          let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt())?;
          Ok(IfStmt {
            test,
            consequent,
            alternate,
          })
        })?
        .into_wrapped(),
    )
  }

  fn while_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordWhile)?;
          p.require(TT::ParenthesisOpen)?;
          let condition = p.expr([TT::ParenthesisClose])?;
          p.require(TT::ParenthesisClose)?;
          let body = p.stmt()?;
          Ok(WhileStmt { condition, body })
        })?
        .into_wrapped(),
    )
  }

  fn do_while_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordDo)?;
          let body = p.stmt()?;
          p.require(TT::KeywordWhile)?;
          p.require(TT::ParenthesisOpen)?;
          let condition = p.expr([TT::ParenthesisClose])?;
          p.require(TT::ParenthesisClose)?;
          p.require_semicolon()?;
          Ok(DoWhileStmt { condition, body })
        })?
        .into_wrapped(),
    )
  }

  fn for_body(&mut self) -> SyntaxResult<Node<ForBody>> {
    self.with_loc(|p| {
      let body = if p.peek().typ == TT::BraceOpen {
        p.require(TT::BraceOpen)?;
        let mut body = Vec::new();
        while p.peek().typ != TT::BraceClose {
          body.push(p.stmt()?);
        }
        p.require(TT::BraceClose)?;
        body
      } else {
        vec![p.stmt()?]
      };
      Ok(ForBody { body })
    })
  }

  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      let await_ = p.consume_if(TT::KeywordAwait).is_match();
      p.require(TT::ParenthesisOpen)?;

      let [t0, t1] = p.peek_n::<2>();
      let is_decl = matches!(t0.typ, TT::KeywordVar | TT::KeywordConst)
        || (t0.typ == TT::KeywordLet
          && (matches!(t1.typ, TT::BracketOpen | TT::BraceOpen)
            || is_valid_binding_identifier(t1.typ)));

      if is_decl {
        let decl = p.var_decl()?;
        let head = p.consume();
        match head.typ {
          TT::KeywordIn | TT::KeywordOf => {
            let mode = decl.stx.mode;
            let mut declarators = decl.stx.declarators;
            if declarators.len() != 1 || declarators[0].initializer.is_some() {
              return Err(head.error(SyntaxErrorType::ExpectedSyntax("for loop binding")));
            };
            let lhs = ForInOfLhs::Decl((mode, declarators.remove(0).pattern));
            p.for_in_of_tail(head.typ == TT::KeywordIn, await_, lhs)
          }
          TT::Semicolon => p.for_triple_tail(ForTripleStmtInit::Decl(decl)),
          _ => Err(head.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon))),
        }
      } else if p.peek().typ == TT::Semicolon {
        p.consume();
        p.for_triple_tail(ForTripleStmtInit::None)
      } else {
        let init = p.expr([TT::Semicolon, TT::KeywordIn, TT::KeywordOf])?;
        let head = p.consume();
        match head.typ {
          TT::KeywordIn | TT::KeywordOf => {
            let lhs = ForInOfLhs::Assign(expr_to_for_target(init)?);
            p.for_in_of_tail(head.typ == TT::KeywordIn, await_, lhs)
          }
          TT::Semicolon => p.for_triple_tail(ForTripleStmtInit::Expr(init)),
          _ => Err(head.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon))),
        }
      }
    })
  }

  /// The rest of a `for (;;)` header after the first `;`, plus the body.
  fn for_triple_tail(&mut self, init: ForTripleStmtInit) -> SyntaxResult<Stmt> {
    let cond = match self.peek().typ {
      TT::Semicolon => None,
      _ => Some(self.expr([TT::Semicolon])?),
    };
    self.require(TT::Semicolon)?;
    let post = match self.peek().typ {
      TT::ParenthesisClose => None,
      _ => Some(self.expr([TT::ParenthesisClose])?),
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.for_body()?;
    Ok(Stmt::ForTriple(Node::new(body.loc, ForTripleStmt {
      init,
      cond,
      post,
      body,
    })))
  }

  fn for_in_of_tail(&mut self, is_in: bool, await_: bool, lhs: ForInOfLhs) -> SyntaxResult<Stmt> {
    let rhs = self.expr([TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    let body = self.for_body()?;
    Ok(if is_in {
      Stmt::ForIn(Node::new(body.loc, ForInStmt { lhs, rhs, body }))
    } else {
      Stmt::ForOf(Node::new(body.loc, ForOfStmt {
        await_,
        lhs,
        rhs,
        body,
      }))
    })
  }

  fn switch_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordSwitch)?;
          p.require(TT::ParenthesisOpen)?;
          let test = p.expr([TT::ParenthesisClose])?;
          p.require(TT::ParenthesisClose)?;
          p.require(TT::BraceOpen)?;
          let mut branches = Vec::new();
          while p.peek().typ != TT::BraceClose {
            let branch = p.with_loc(|p| {
              let case = match p.consume_if(TT::KeywordCase).is_match() {
                true => Some(p.expr([TT::Colon])?),
                false => {
                  p.require(TT::KeywordDefault)?;
                  None
                }
              };
              p.require(TT::Colon)?;
              let mut body = Vec::new();
              while !matches!(
                p.peek().typ,
                TT::KeywordCase | TT::KeywordDefault | TT::BraceClose
              ) {
                body.push(p.stmt()?);
              }
              Ok(SwitchBranch { case, body })
            })?;
            branches.push(branch);
          }
          p.require(TT::BraceClose)?;
          Ok(SwitchStmt { test, branches })
        })?
        .into_wrapped(),
    )
  }

  fn try_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordTry)?;
          let wrapped = p.block_stmt()?;
          let catch = p
            .consume_if(TT::KeywordCatch)
            .and_then(|| {
              p.with_loc(|p| {
                let parameter = p
                  .consume_if(TT::ParenthesisOpen)
                  .and_then(|| {
                    let parameter = p.pat_decl()?;
                    p.require(TT::ParenthesisClose)?;
                    Ok(parameter)
                  })?;
                p.require(TT::BraceOpen)?;
                let mut body = Vec::new();
                while p.peek().typ != TT::BraceClose {
                  body.push(p.stmt()?);
                }
                p.require(TT::BraceClose)?;
                Ok(CatchBlock { parameter, body })
              })
            })?;
          let finally = p.consume_if(TT::KeywordFinally).and_then(|| p.block_stmt())?;
          if catch.is_none() && finally.is_none() {
            return Err(
              p.peek()
                .error(SyntaxErrorType::TryStatementHasNoCatchOrFinally),
            );
          };
          Ok(TryStmt {
            wrapped,
            catch,
            finally,
          })
        })?
        .into_wrapped(),
    )
  }

  fn throw_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordThrow)?;
          let t = p.peek();
          if t.preceded_by_line_terminator {
            // Illegal under Automatic Semicolon Insertion rules.
            return Err(t.error(SyntaxErrorType::LineTerminatorAfterThrow));
          };
          let value = p.expr_with_asi([TT::Semicolon], &mut Asi::can())?;
          p.require_semicolon()?;
          Ok(ThrowStmt { value })
        })?
        .into_wrapped(),
    )
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordReturn)?;
          let t = p.peek();
          let value = if t.typ == TT::Semicolon
            || t.typ == TT::BraceClose
            || t.typ == TT::EOF
            || t.preceded_by_line_terminator
          {
            None
          } else {
            Some(p.expr_with_asi([TT::Semicolon], &mut Asi::can())?)
          };
          p.require_semicolon()?;
          Ok(ReturnStmt { value })
        })?
        .into_wrapped(),
    )
  }

  fn break_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordBreak)?;
          let label = p.label_if_same_line();
          p.require_semicolon()?;
          Ok(BreakStmt { label })
        })?
        .into_wrapped(),
    )
  }

  fn continue_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordContinue)?;
          let label = p.label_if_same_line();
          p.require_semicolon()?;
          Ok(ContinueStmt { label })
        })?
        .into_wrapped(),
    )
  }

  fn label_if_same_line(&mut self) -> Option<String> {
    let t = self.peek();
    if t.typ == TT::Identifier && !t.preceded_by_line_terminator {
      self.consume();
      Some(self.string(t.loc))
    } else {
      None
    }
  }

  fn label_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          let t = p.consume();
          let name = p.string(t.loc);
          p.require(TT::Colon)?;
          let statement = p.stmt()?;
          Ok(LabelStmt { name, statement })
        })?
        .into_wrapped(),
    )
  }

  fn with_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordWith)?;
          p.require(TT::ParenthesisOpen)?;
          let object = p.expr([TT::ParenthesisClose])?;
          p.require(TT::ParenthesisClose)?;
          let body = p.stmt()?;
          Ok(WithStmt { object, body })
        })?
        .into_wrapped(),
    )
  }
}

/// Convert a parsed `for (<lhs> in/of ...)` expression head into a pattern target.
fn expr_to_for_target(expr: Node<crate::ast::expr::Expr>) -> SyntaxResult<Node<Pat>> {
  use crate::ast::expr::Expr;
  let loc = expr.loc;
  match *expr.stx {
    Expr::Id(id) => Ok(Node::new(loc, Pat::Id(id.map_stx(|id| {
      crate::ast::expr::pat::IdPat { name: id.name }
    })))),
    Expr::IdPat(id) => Ok(Node::new(loc, Pat::Id(id))),
    _ => Err(loc.error(SyntaxErrorType::ExpectedSyntax("for loop binding"), None)),
  }
}
